//! In-memory environment store.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::EnvStore;

/// Environment store backed by a map.
///
/// Clones share the same variables, so a test can hand one clone to a
/// registry and inspect the effect of writes through another.
///
/// # Examples
///
/// ```
/// use envtree::{EnvStore, MemoryEnv};
///
/// let env = MemoryEnv::from_pairs([("MYAPP_DB_HOST", "localhost")]);
/// let shared = env.clone();
/// shared.set("MYAPP_DB_PORT", "5432");
/// assert_eq!(env.get("MYAPP_DB_PORT").as_deref(), Some("5432"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryEnv {
    vars: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryEnv {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded from key-value pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            vars: Arc::new(RwLock::new(vars)),
        }
    }

    /// Number of variables held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.read().len()
    }

    /// Whether the store holds no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.read().is_empty()
    }

    /// Copy of every variable, ordered by name.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.vars.read().clone()
    }
}

impl EnvStore for MemoryEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.read().get(name).cloned()
    }

    fn set(&self, name: &str, value: &str) {
        self.vars.write().insert(name.to_owned(), value.to_owned());
    }

    fn remove(&self, name: &str) {
        self.vars.write().remove(name);
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .read()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
