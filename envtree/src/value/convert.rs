//! Conversions into [`Value`] from strings, collections and JSON.

use std::collections::BTreeMap;

use super::Value;

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Scalar(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Scalar(text)
    }
}

impl From<&String> for Value {
    fn from(text: &String) -> Self {
        Self::Scalar(text.clone())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<K, V> From<BTreeMap<K, V>> for Value
where
    K: AsRef<str>,
    V: Into<Value>,
{
    /// Keys are lower-cased; when two keys collide the later one wins.
    fn from(map: BTreeMap<K, V>) -> Self {
        Self::Mapping(
            map.into_iter()
                .map(|(key, value)| (key.as_ref().to_lowercase(), value.into()))
                .collect(),
        )
    }
}

impl From<serde_json::Value> for Value {
    /// Numbers and booleans become their textual form and `null` becomes an
    /// empty scalar. Object keys are lower-cased.
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Scalar(String::new()),
            serde_json::Value::Bool(flag) => Self::Scalar(flag.to_string()),
            serde_json::Value::Number(number) => Self::Scalar(number.to_string()),
            serde_json::Value::String(text) => Self::Scalar(text),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key.to_lowercase(), Self::from(value)))
                    .collect(),
            ),
        }
    }
}
