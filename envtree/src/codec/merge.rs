//! Right-biased deep merge of two values.

use std::collections::BTreeMap;

use crate::Value;

/// Merge `overlay` onto `base`, returning the combined value.
///
/// See [`merge_value`] for the rules.
///
/// # Examples
///
/// ```
/// use envtree::{Value, codec};
/// use serde_json::json;
///
/// let base = Value::from(json!({"db": {"host": "a", "port": "1"}}));
/// let overlay = Value::from(json!({"db": {"host": "b"}}));
/// let merged = codec::merge(base, overlay);
/// assert_eq!(merged, Value::from(json!({"db": {"host": "b", "port": "1"}})));
/// ```
#[must_use]
pub fn merge(mut base: Value, overlay: Value) -> Value {
    merge_value(&mut base, overlay);
    base
}

/// Overlay `layer` onto `target`, updating `target` in place.
///
/// Behaviour:
/// - Mappings merge recursively: keys are added or overwritten and nested
///   mappings are overlaid.
/// - A mapping laid over a scalar or a sequence replaces it.
/// - Scalars and sequences replace `target` wholesale. A sequence is never
///   concatenated or merged element by element.
pub fn merge_value(target: &mut Value, layer: Value) {
    match layer {
        Value::Mapping(map) => merge_mapping(target, map),
        other => *target = other,
    }
}

fn merge_mapping(target: &mut Value, map: BTreeMap<String, Value>) {
    if !matches!(target, Value::Mapping(_)) {
        *target = Value::Mapping(BTreeMap::new());
    }

    let Value::Mapping(target_map) = target else {
        return;
    };

    for (key, value) in map {
        match target_map.get_mut(&key) {
            Some(existing) => merge_value(existing, value),
            None => {
                target_map.insert(key, value);
            }
        }
    }
}
