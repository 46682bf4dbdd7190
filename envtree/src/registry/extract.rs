//! Typed extraction of subtrees through `figment`.

use figment::value::{Dict, Tag, Value as FigmentValue};
use serde::de::DeserializeOwned;

use crate::{ConfigPath, EnvTreeError, EnvTreeResult, Value};

/// Deserialize `value` (found at `path`) into `T`.
///
/// Scalars are parsed the way `figment`'s environment provider parses
/// variables, so `"8080"` becomes a number and `"true"` a boolean.
pub(crate) fn extract<T: DeserializeOwned>(path: &ConfigPath, value: &Value) -> EnvTreeResult<T> {
    to_figment(value)
        .deserialize()
        .map_err(|err| EnvTreeError::extract(path.to_string(), err))
}

fn to_figment(value: &Value) -> FigmentValue {
    match value {
        Value::Scalar(text) => text
            .parse()
            .unwrap_or_else(|_| FigmentValue::from(text.clone())),
        Value::Sequence(items) => {
            FigmentValue::Array(Tag::Default, items.iter().map(to_figment).collect())
        }
        Value::Mapping(map) => FigmentValue::Dict(
            Tag::Default,
            map.iter()
                .map(|(key, child)| (key.clone(), to_figment(child)))
                .collect::<Dict>(),
        ),
    }
}
