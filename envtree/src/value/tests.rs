//! Unit tests for value accessors and conversions.

use std::collections::BTreeMap;

use rstest::rstest;
use serde_json::json;

use super::Value;
use crate::ConfigPath;

fn sample() -> Value {
    Value::from(json!({
        "server": {
            "node": ["10.10.10.02", "10.10.10.03"],
            "port": 8080
        },
        "debug": true
    }))
}

#[rstest]
#[case("server.node.1", Some("10.10.10.02"))]
#[case("server.node.2", Some("10.10.10.03"))]
#[case("SERVER.PORT", Some("8080"))]
#[case("debug", Some("true"))]
#[case("server.node.3", None)]
#[case("server.node.0", None)]
#[case("debug.extra", None)]
#[case("missing", None)]
fn walks_paths(#[case] dotted: &str, #[case] expected: Option<&str>) {
    let value = sample();
    let found = value.get_path(&ConfigPath::parse(dotted));
    assert_eq!(found.and_then(Value::as_str), expected);
}

#[test]
fn root_path_returns_self() {
    let value = sample();
    assert_eq!(value.get_path(&ConfigPath::root()), Some(&value));
}

#[test]
fn json_conversion_normalises_keys_and_scalars() {
    let value = Value::from(json!({"Mixed": {"KEY": null, "n": 1.5}}));
    let mut inner = BTreeMap::new();
    inner.insert("key".to_owned(), Value::from(""));
    inner.insert("n".to_owned(), Value::from("1.5"));
    let mut outer = BTreeMap::new();
    outer.insert("mixed".to_owned(), Value::Mapping(inner));
    assert_eq!(value, Value::Mapping(outer));
}

#[test]
fn collections_convert_recursively() {
    let mut map = BTreeMap::new();
    map.insert("Hosts", vec!["a", "b"]);
    let value = Value::from(map);
    assert_eq!(
        value.get("hosts").and_then(Value::as_sequence).map(<[Value]>::len),
        Some(2)
    );
}

#[test]
fn display_renders_scalars_verbatim_and_composites_as_json() {
    assert_eq!(Value::from("plain").to_string(), "plain");
    assert_eq!(
        Value::from(vec!["a", "b"]).to_string(),
        r#"["a","b"]"#
    );
    assert_eq!(Value::default().to_string(), "{}");
}

#[test]
fn serializes_untagged() {
    let rendered = serde_json::to_value(sample()).expect("serialize value");
    assert_eq!(rendered, sample().to_json());
    assert_eq!(rendered["server"]["port"], json!("8080"));
}
