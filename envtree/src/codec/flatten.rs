//! Conversion between nested values and full-path scalar leaves.

use std::collections::BTreeMap;

use crate::path::sequence_offset;
use crate::{ConfigPath, Value};

/// Scalar leaves keyed by their full path.
pub type FlatMap = BTreeMap<ConfigPath, String>;

/// Flatten `value` into one entry per scalar leaf.
///
/// Sequence elements receive 1-based numeric segments. A scalar at the top
/// level produces a single entry keyed by the root path; empty sequences and
/// mappings produce nothing.
///
/// # Examples
///
/// ```
/// use envtree::{ConfigPath, Value, codec};
///
/// let leaves = codec::flatten(&Value::from(vec!["a", "b"]));
/// assert_eq!(leaves.get(&ConfigPath::parse("2")).map(String::as_str), Some("b"));
/// ```
#[must_use]
pub fn flatten(value: &Value) -> FlatMap {
    let mut leaves = FlatMap::new();
    flatten_into(&ConfigPath::root(), value, &mut leaves);
    leaves
}

/// Flatten `value` below `prefix`, adding the leaves to `out`.
pub(crate) fn flatten_into(prefix: &ConfigPath, value: &Value, out: &mut FlatMap) {
    match value {
        Value::Scalar(text) => {
            out.insert(prefix.clone(), text.clone());
        }
        Value::Sequence(items) => {
            for (offset, item) in items.iter().enumerate() {
                let position = offset + 1;
                flatten_into(&prefix.child(&position.to_string()), item, out);
            }
        }
        Value::Mapping(map) => {
            for (key, child) in map {
                flatten_into(&prefix.child(key), child, out);
            }
        }
    }
}

/// Rebuild a nested value from full-path scalar leaves.
///
/// A node whose children are exactly the positions `1..=n` becomes a
/// [`Value::Sequence`] in positional order. Every other node, including one
/// whose numeric children have gaps or are mixed with names, becomes a
/// [`Value::Mapping`].
///
/// When a scalar and deeper leaves share a prefix (`a` and `a.b`), the deeper
/// leaves win regardless of input order.
///
/// # Examples
///
/// ```
/// use envtree::{ConfigPath, Value, codec};
///
/// let value = codec::unflatten([
///     (ConfigPath::parse("node.2"), "b".to_owned()),
///     (ConfigPath::parse("node.1"), "a".to_owned()),
/// ]);
/// assert_eq!(value.get("node"), Some(&Value::from(vec!["a", "b"])));
/// ```
#[must_use]
pub fn unflatten<I>(leaves: I) -> Value
where
    I: IntoIterator<Item = (ConfigPath, String)>,
{
    let mut root = Node::empty();
    for (path, scalar) in leaves {
        root.insert(path.segments(), scalar);
    }
    root.into_value()
}

enum Node {
    Leaf(String),
    Branch(BTreeMap<String, Node>),
}

impl Node {
    const fn empty() -> Self {
        Self::Branch(BTreeMap::new())
    }

    fn insert(&mut self, segments: &[String], scalar: String) {
        let Some((head, rest)) = segments.split_first() else {
            if !matches!(self, Self::Branch(children) if !children.is_empty()) {
                *self = Self::Leaf(scalar);
            }
            return;
        };
        if matches!(self, Self::Leaf(_)) {
            *self = Self::empty();
        }
        if let Self::Branch(children) = self {
            children
                .entry(head.clone())
                .or_insert_with(Self::empty)
                .insert(rest, scalar);
        }
    }

    fn into_value(self) -> Value {
        match self {
            Self::Leaf(scalar) => Value::Scalar(scalar),
            Self::Branch(children) if is_sequence(&children) => {
                let mut slots: Vec<Option<Self>> = Vec::new();
                slots.resize_with(children.len(), || None);
                for (key, child) in children {
                    if let Some(slot) = sequence_offset(&key).and_then(|at| slots.get_mut(at)) {
                        *slot = Some(child);
                    }
                }
                Value::Sequence(slots.into_iter().flatten().map(Self::into_value).collect())
            }
            Self::Branch(children) => Value::Mapping(
                children
                    .into_iter()
                    .map(|(key, child)| (key, child.into_value()))
                    .collect(),
            ),
        }
    }
}

/// Whether the keys of `children` are exactly the positions `1..=n`.
fn is_sequence(children: &BTreeMap<String, Node>) -> bool {
    let count = children.len();
    count > 0
        && children
            .keys()
            .all(|key| sequence_offset(key).is_some_and(|offset| offset < count))
}
