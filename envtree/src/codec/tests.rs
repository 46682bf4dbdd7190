//! Unit tests for key transcoding, flattening and merging.

use std::collections::BTreeMap;

use rstest::{fixture, rstest};
use serde_json::json;

use super::{FlatMap, decode, encode, flatten, merge, unflatten};
use crate::{ConfigPath, Domain, Value};

#[fixture]
fn domain() -> Domain {
    Domain::new("myapp").expect("valid domain")
}

fn leaves(pairs: &[(&str, &str)]) -> FlatMap {
    pairs
        .iter()
        .map(|(path, scalar)| (ConfigPath::parse(path), (*scalar).to_owned()))
        .collect()
}

#[rstest]
#[case("MYAPP_DB_1_USER", Some("db.1.user"))]
#[case("myapp_db_host", Some("db.host"))]
#[case("MyApp_Server_Node_2", Some("server.node.2"))]
#[case("MYAPP__X", Some(".x"))]
#[case("MYAPP", None)]
#[case("MYAPP_", None)]
#[case("MYAPPDB", None)]
#[case("PATH", None)]
fn decodes_keys(domain: Domain, #[case] key: &str, #[case] expected: Option<&str>) {
    let decoded = decode(key, &domain).map(|path| path.to_string());
    assert_eq!(decoded.as_deref(), expected);
}

#[rstest]
#[case("db.1.user", "MYAPP_DB_1_USER")]
#[case("Server.Node", "MYAPP_SERVER_NODE")]
#[case("", "MYAPP")]
fn encodes_paths(domain: Domain, #[case] path: &str, #[case] expected: &str) {
    assert_eq!(encode(&ConfigPath::parse(path), &domain), expected);
}

#[rstest]
fn encode_then_decode_recovers_lowercase_path(domain: Domain) {
    let path = ConfigPath::parse("server.node.10");
    assert_eq!(decode(&encode(&path, &domain), &domain), Some(path));
}

#[test]
fn flatten_numbers_sequences_from_one() {
    let value = Value::from(json!({"server": {"node": ["a", "b"], "port": "80"}}));
    assert_eq!(
        flatten(&value),
        leaves(&[
            ("server.node.1", "a"),
            ("server.node.2", "b"),
            ("server.port", "80"),
        ])
    );
}

#[test]
fn flatten_of_scalar_uses_root_path() {
    assert_eq!(flatten(&Value::from("x")), leaves(&[("", "x")]));
    assert!(flatten(&Value::default()).is_empty());
}

#[rstest]
#[case(json!({"a": {"b": "1", "c": ["x", "y", "z"]}}))]
#[case(json!({"list": [{"name": "a"}, {"name": "b"}]}))]
#[case(json!({"nested": [["a", "b"], ["c"]]}))]
#[case(json!({"single": "value"}))]
fn unflatten_inverts_flatten(#[case] json: serde_json::Value) {
    let value = Value::from(json);
    assert_eq!(unflatten(flatten(&value)), value);
}

#[test]
fn unflatten_orders_sequences_numerically() {
    let pairs = (1..=11).map(|n| (ConfigPath::parse(&format!("n.{n}")), n.to_string()));
    let value = unflatten(pairs);
    let expected: Vec<String> = (1..=11).map(|n| n.to_string()).collect();
    assert_eq!(value.get("n"), Some(&Value::from(expected)));
}

#[rstest]
#[case(&[("n.1", "a"), ("n.3", "c")])]
#[case(&[("n.0", "a"), ("n.1", "b")])]
#[case(&[("n.1", "a"), ("n.name", "b")])]
#[case(&[("n.01", "a")])]
fn irregular_numeric_siblings_fall_back_to_mapping(#[case] pairs: &[(&str, &str)]) {
    let value = unflatten(leaves(pairs));
    let node = value.get("n").expect("node present");
    let map = node.as_mapping().expect("mapping fallback");
    assert_eq!(map.len(), pairs.len());
    assert_eq!(unflatten(flatten(&value)), value);
}

#[test]
fn deeper_leaves_win_over_scalars() {
    let forward = unflatten(leaves(&[("a", "x"), ("a.b", "y")]));
    let backward = unflatten(vec![
        (ConfigPath::parse("a.b"), "y".to_owned()),
        (ConfigPath::parse("a"), "x".to_owned()),
    ]);
    let expected = Value::from(json!({"a": {"b": "y"}}));
    assert_eq!(forward, expected);
    assert_eq!(backward, expected);
}

#[test]
fn unflatten_of_nothing_is_empty_mapping() {
    assert_eq!(unflatten(FlatMap::new()), Value::Mapping(BTreeMap::new()));
}

#[test]
fn merge_recurses_into_mappings() {
    let base = Value::from(json!({"db": {"host": "a", "port": "1"}, "keep": "k"}));
    let overlay = Value::from(json!({"db": {"host": "b", "user": "u"}}));
    assert_eq!(
        merge(base, overlay),
        Value::from(json!({"db": {"host": "b", "port": "1", "user": "u"}, "keep": "k"}))
    );
}

#[test]
fn merge_replaces_sequences_wholesale() {
    let base = Value::from(json!({"node": ["a", "b", "c"]}));
    let overlay = Value::from(json!({"node": ["z"]}));
    assert_eq!(merge(base, overlay), Value::from(json!({"node": ["z"]})));
}

#[rstest]
#[case(json!({"a": "scalar"}), json!({"a": {"b": "1"}}))]
#[case(json!({"a": {"b": "1"}}), json!({"a": "scalar"}))]
#[case(json!({"a": ["x"]}), json!({"a": {"1": "y"}}))]
fn merge_overlay_replaces_mismatched_shapes(
    #[case] base: serde_json::Value,
    #[case] overlay: serde_json::Value,
) {
    let expected = Value::from(overlay.clone());
    assert_eq!(merge(Value::from(base), Value::from(overlay)), expected);
}

#[test]
fn merge_is_idempotent() {
    let base = Value::from(json!({"a": {"b": "1"}}));
    let overlay = Value::from(json!({"a": {"c": ["x", "y"]}}));
    let once = merge(base, overlay.clone());
    let twice = merge(once.clone(), overlay);
    assert_eq!(once, twice);
}
