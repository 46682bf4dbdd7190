//! The tree-shaped value stored by a registry.

mod convert;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::ConfigPath;
use crate::path::sequence_offset;

/// A configuration value: a string scalar, an ordered sequence, or a mapping
/// keyed by lower-case strings.
///
/// Sequences are addressed with 1-based positions, matching the numeric
/// segments of environment variable names (`SERVER_NODE_1`).
///
/// # Examples
///
/// ```
/// use envtree::{ConfigPath, Value};
/// use serde_json::json;
///
/// let value = Value::from(json!({"Node": ["10.0.0.1", "10.0.0.2"]}));
/// let first = value.get_path(&ConfigPath::parse("node.1"));
/// assert_eq!(first.and_then(Value::as_str), Some("10.0.0.1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A leaf string.
    Scalar(String),
    /// An ordered list of values.
    Sequence(Vec<Value>),
    /// String-keyed children; keys are lower-case.
    Mapping(BTreeMap<String, Value>),
}

impl Value {
    /// The scalar text, if this is a scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(text) => Some(text),
            Self::Sequence(_) | Self::Mapping(_) => None,
        }
    }

    /// The elements, if this is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            Self::Scalar(_) | Self::Mapping(_) => None,
        }
    }

    /// The children, if this is a mapping.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Mapping(map) => Some(map),
            Self::Scalar(_) | Self::Sequence(_) => None,
        }
    }

    /// Whether this is a scalar.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Descend one level.
    ///
    /// Mappings are indexed by key (case-insensitively) and sequences by a
    /// 1-based position. Scalars have no children.
    #[must_use]
    pub fn get(&self, segment: &str) -> Option<&Self> {
        match self {
            Self::Mapping(map) => map
                .get(segment)
                .or_else(|| map.get(&segment.to_lowercase())),
            Self::Sequence(items) => items.get(sequence_offset(segment)?),
            Self::Scalar(_) => None,
        }
    }

    /// Walk `path` from this node, failing as soon as a segment is missing or
    /// the walk would descend into a scalar.
    #[must_use]
    pub fn get_path(&self, path: &ConfigPath) -> Option<&Self> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.get(segment))
    }

    /// Render as a JSON value with every scalar as a JSON string.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Scalar(text) => serde_json::Value::String(text.clone()),
            Self::Sequence(items) => items.iter().map(Self::to_json).collect(),
            Self::Mapping(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Mapping(BTreeMap::new())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(text) => f.write_str(text),
            Self::Sequence(_) | Self::Mapping(_) => write!(f, "{}", self.to_json()),
        }
    }
}

#[cfg(test)]
mod tests;
