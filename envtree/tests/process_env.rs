//! Tests that exercise the real process environment.
//!
//! Each test isolates its domain with `test_helpers::env::scrub_prefix` and
//! runs serially because the environment is process-global.

use envtree::{EnvStore, ProcessEnv, Registry, Value};
use serial_test::serial;
use test_helpers::env;

#[test]
#[serial]
fn reads_variables_set_before_construction() {
    let _scope = env::scrub_prefix("ETPROC_");
    figment::Jail::expect_with(|j| {
        j.set_env("ETPROC_DB_1_USER", "admin");
        let registry = Registry::new("etproc").expect("registry builds");
        assert_eq!(registry.param("db.1.user"), Some(Value::from("admin")));
        Ok(())
    });
}

#[test]
#[serial]
fn writes_become_visible_to_the_process() {
    let _scope = env::scrub_prefix("ETWRITE_");
    let registry = Registry::new("etwrite").expect("registry builds");
    registry.set_param("server", serde_json::json!({"node": ["10.10.10.02", "10.10.10.03"]}));
    assert_eq!(
        std::env::var("ETWRITE_SERVER_NODE_1").as_deref(),
        Ok("10.10.10.02")
    );
    assert_eq!(
        std::env::var("ETWRITE_SERVER_NODE_2").as_deref(),
        Ok("10.10.10.03")
    );
}

#[test]
#[serial]
fn lifecycle_reverts_process_variables() {
    let _scope = env::scrub_prefix("ETLIFE_");
    let _existing = env::set_var("ETLIFE_MODE", "original");
    {
        let registry = Registry::builder("etlife")
            .lifecycle(true)
            .build()
            .expect("registry builds");
        registry.set_param("mode", "temporary");
        registry.set_param("added.key", "value");
        assert_eq!(std::env::var("ETLIFE_MODE").as_deref(), Ok("temporary"));
        assert_eq!(std::env::var("ETLIFE_ADDED_KEY").as_deref(), Ok("value"));
    }
    assert_eq!(std::env::var("ETLIFE_MODE").as_deref(), Ok("original"));
    assert!(std::env::var("ETLIFE_ADDED_KEY").is_err());
}

#[test]
#[serial]
fn process_store_round_trips_values() {
    let _scope = env::scrub_prefix("ETSTORE_");
    let store = ProcessEnv;
    store.set("ETSTORE_KEY", "value");
    assert_eq!(store.get("ETSTORE_KEY").as_deref(), Some("value"));
    assert!(
        store
            .vars()
            .iter()
            .any(|(key, value)| key == "ETSTORE_KEY" && value == "value")
    );
    store.remove("ETSTORE_KEY");
    assert!(store.get("ETSTORE_KEY").is_none());
}

#[test]
#[serial]
fn replaced_subtrees_leave_no_variables_behind() {
    let _scope = env::scrub_prefix("ETSHRINK_");
    let registry = Registry::new("etshrink").expect("registry builds");
    registry.set_param("hosts", vec!["a", "b", "c"]);
    registry.set_param("hosts", vec!["z"]);
    assert_eq!(std::env::var("ETSHRINK_HOSTS_1").as_deref(), Ok("z"));
    assert!(std::env::var("ETSHRINK_HOSTS_2").is_err());
    assert!(std::env::var("ETSHRINK_HOSTS_3").is_err());

    let fresh = Registry::new("etshrink").expect("registry builds");
    assert_eq!(fresh.tree(), registry.tree());
}
