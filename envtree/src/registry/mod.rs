//! The merged configuration tree for one domain.
//!
//! A [`Registry`] decodes the variables of its domain into a nested
//! [`Value`], answers lookups by dotted path, and writes new values back to
//! its [`EnvStore`] so they become visible as environment variables.

mod builder;
mod extract;
mod options;
mod snapshot;

pub use builder::RegistryBuilder;
pub use options::RegistryOptions;
pub use snapshot::EnvSnapshot;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use uncased::UncasedStr;

use crate::codec::{self, FlatMap};
use crate::{ConfigPath, Domain, EnvStore, EnvTreeResult, Scope, Value};

/// Tree and lookup cache, guarded together by the registry's lock.
#[derive(Default)]
struct State {
    tree: Value,
    cache: HashMap<ConfigPath, Value>,
}

/// Configuration tree decoded from the environment variables of one domain.
///
/// Every method takes `&self`; the tree and its lookup cache sit behind a
/// single lock, which [`Scope`] handles share.
///
/// # Examples
///
/// ```
/// use envtree::{EnvStore, MemoryEnv, Registry, Value};
/// use serde_json::json;
///
/// let env = MemoryEnv::new();
/// let registry = Registry::builder("myapp").store(env.clone()).build()?;
///
/// registry.set_param("server", json!({"node": ["10.10.10.02", "10.10.10.03"]}));
/// assert_eq!(env.get("MYAPP_SERVER_NODE_2").as_deref(), Some("10.10.10.03"));
///
/// let node = registry.param("server.node.1");
/// assert_eq!(node.as_ref().and_then(Value::as_str), Some("10.10.10.02"));
/// # Ok::<_, envtree::EnvTreeError>(())
/// ```
pub struct Registry {
    domain: Domain,
    options: RegistryOptions,
    store: Box<dyn EnvStore>,
    state: Mutex<State>,
    snapshot: Option<EnvSnapshot>,
}

impl Registry {
    /// Build a registry for `domain` over the process environment with
    /// default options.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EnvTreeError::InvalidDomain`] when the domain is
    /// empty.
    pub fn new(domain: impl Into<String>) -> EnvTreeResult<Self> {
        RegistryBuilder::new(domain).build()
    }

    /// Start configuring a registry for `domain`.
    #[must_use]
    pub fn builder(domain: impl Into<String>) -> RegistryBuilder {
        RegistryBuilder::new(domain)
    }

    /// The registry's domain.
    #[must_use]
    pub const fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Options the registry was built with.
    #[must_use]
    pub const fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Merge variables from `source` into the tree.
    ///
    /// Entries whose key does not belong to the domain are ignored. Composite
    /// values are flattened below their decoded path, with sequences numbered
    /// from 1, and the batch is merged so that newer values win. A sequence
    /// value replaces the whole sequence at its path, whereas a numeric
    /// segment in a key (`MYAPP_DB_2_HOST`) updates one element. When
    /// mirroring is enabled every resulting leaf is then written to the store
    /// and variables left over from the replaced subtrees are removed, so the
    /// store keeps decoding to the same tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use envtree::{MemoryEnv, Registry, Value};
    ///
    /// let registry = Registry::builder("myapp").store(MemoryEnv::new()).build()?;
    /// registry.load([("MYAPP_DB_HOST", "a"), ("PATH", "/bin")]);
    /// registry.load([("myapp_db_host", "b")]);
    /// let host = registry.param("db.host");
    /// assert_eq!(host.as_ref().and_then(Value::as_str), Some("b"));
    /// # Ok::<_, envtree::EnvTreeError>(())
    /// ```
    pub fn load<I, K, V>(&self, source: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let entries: Vec<(ConfigPath, Value)> = source
            .into_iter()
            .filter_map(|(key, value)| {
                codec::decode(key.as_ref(), &self.domain).map(|path| (path, value.into()))
            })
            .collect();
        if entries.is_empty() {
            return;
        }
        let mut state = self.state.lock();
        self.apply(&mut state, entries);
    }

    /// Look up the value at `path`.
    ///
    /// Returns `None` when a segment is missing or the walk would descend
    /// into a scalar. Sequence elements are addressed by 1-based position.
    pub fn param<P: Into<ConfigPath>>(&self, path: P) -> Option<Value> {
        let path = path.into();
        let mut state = self.state.lock();
        if let Some(hit) = state.cache.get(&path) {
            tracing::trace!(path = %path, "parameter cache hit");
            return Some(hit.clone());
        }
        tracing::trace!(path = %path, "parameter cache miss");
        let found = state.tree.get_path(&path)?.clone();
        state.cache.insert(path, found.clone());
        Some(found)
    }

    /// Set `path` to `value`, returning whether the write was applied.
    ///
    /// The write behaves like loading a single variable named after `path`.
    /// When overriding is disabled and the store already holds that
    /// variable under any casing, the write is dropped and the existing value
    /// stays visible.
    ///
    /// A scalar written to the root path is dropped as well: it would encode
    /// to the bare domain name, which no later load reads back.
    pub fn set_param<P, V>(&self, path: P, value: V) -> bool
    where
        P: Into<ConfigPath>,
        V: Into<Value>,
    {
        let path = path.into();
        let value = value.into();
        if path.is_root() && value.is_scalar() {
            tracing::debug!(domain = %self.domain, "ignoring scalar written to the root path");
            return false;
        }
        let mut state = self.state.lock();
        if !self.options.override_existing {
            let key = codec::encode(&path, &self.domain);
            if self.store_holds(&key) {
                tracing::debug!(key = %key, "override disabled; keeping existing variable");
                return false;
            }
        }
        self.apply(&mut state, vec![(path.clone(), value.clone())]);
        state.cache.insert(path, value);
        true
    }

    /// Look up several paths, preserving their order.
    pub fn params<I, P>(&self, paths: I) -> Vec<Option<Value>>
    where
        I: IntoIterator<Item = P>,
        P: Into<ConfigPath>,
    {
        paths.into_iter().map(|path| self.param(path)).collect()
    }

    /// Every leaf of the tree as an environment variable.
    #[must_use]
    pub fn environment(&self) -> BTreeMap<String, String> {
        self.environment_under(&ConfigPath::root())
    }

    /// A read/write view rooted at `path`.
    pub fn scope<P: Into<ConfigPath>>(&self, path: P) -> Scope<'_> {
        Scope::new(self, path.into())
    }

    /// Deserialize the subtree at `path` into `T`.
    ///
    /// Returns `Ok(None)` when nothing is stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EnvTreeError::Extract`] when the subtree does not
    /// match `T`.
    pub fn extract<T, P>(&self, path: P) -> EnvTreeResult<Option<T>>
    where
        T: DeserializeOwned,
        P: Into<ConfigPath>,
    {
        let path = path.into();
        self.param(&path)
            .map(|value| extract::extract(&path, &value))
            .transpose()
    }

    /// A copy of the current tree.
    #[must_use]
    pub fn tree(&self) -> Value {
        self.state.lock().tree.clone()
    }

    /// Drop every cached lookup.
    pub fn clear_cache(&self) {
        self.state.lock().cache.clear();
    }

    pub(crate) fn environment_under(&self, prefix: &ConfigPath) -> BTreeMap<String, String> {
        let state = self.state.lock();
        let mut leaves = FlatMap::new();
        if let Some(subtree) = state.tree.get_path(prefix) {
            codec::flatten_into(prefix, subtree, &mut leaves);
        }
        leaves
            .into_iter()
            .map(|(path, scalar)| (codec::encode(&path, &self.domain), scalar))
            .collect()
    }

    /// Merge `entries` into the tree at leaf granularity.
    ///
    /// Each entry first evicts the leaves it replaces: everything at or below
    /// each point where its value stops being a mapping, plus any scalar
    /// ancestor. Its own leaves are then added, so later entries win and a
    /// sequence value replaces the whole sequence at its path while a numeric
    /// segment in a key addresses a single element.
    fn apply(&self, state: &mut State, entries: Vec<(ConfigPath, Value)>) {
        let mut leaves = codec::flatten(&state.tree);
        let mut fresh = FlatMap::new();
        let mut replaced_roots = Vec::new();
        for (path, value) in &entries {
            let mut roots = Vec::new();
            replacement_roots(path, value, &mut roots);
            let replaced = |leaf: &ConfigPath| roots.iter().any(|root| root.overlaps(leaf));
            leaves.retain(|leaf, _| !replaced(leaf));
            fresh.retain(|leaf, _| !replaced(leaf));
            codec::flatten_into(path, value, &mut fresh);
            replaced_roots.extend(roots);
        }
        leaves.extend(fresh.iter().map(|(path, scalar)| (path.clone(), scalar.clone())));
        state.tree = codec::unflatten(leaves);

        let written: FlatMap = codec::flatten(&state.tree)
            .into_iter()
            .filter(|(path, _)| fresh.contains_key(path))
            .collect();
        state
            .cache
            .retain(|cached, _| !entries.iter().any(|(path, _)| path.overlaps(cached)));
        if self.options.mirror {
            self.mirror(&replaced_roots, &written);
        }
        tracing::debug!(
            domain = %self.domain,
            keys = entries.len(),
            leaves = written.len(),
            "loaded environment entries"
        );
    }

    /// Write `leaves` to the store after removing every variable under
    /// `roots` that does not spell one of them canonically.
    ///
    /// Every leaf the tree holds under `roots` is in `leaves`, so anything
    /// else there is a leftover of a replaced subtree or a differently cased
    /// alias that would shadow the new value on the next load.
    fn mirror(&self, roots: &[ConfigPath], leaves: &FlatMap) {
        let mut removed = 0_usize;
        for (key, _) in self.store.vars() {
            let Some(path) = codec::decode(&key, &self.domain) else {
                continue;
            };
            if !roots.iter().any(|root| root.overlaps(&path)) {
                continue;
            }
            if !leaves.contains_key(&path) || key != codec::encode(&path, &self.domain) {
                self.store.remove(&key);
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::debug!(domain = %self.domain, removed, "removed stale variables");
        }
        for (path, scalar) in leaves {
            let key = codec::encode(path, &self.domain);
            if self.store.get(&key).as_deref() != Some(scalar.as_str()) {
                self.store.set(&key, scalar);
            }
        }
    }

    /// Whether the store holds `key`, compared case-insensitively.
    fn store_holds(&self, key: &str) -> bool {
        self.store.get(key).is_some()
            || self
                .store
                .vars()
                .iter()
                .any(|(name, _)| UncasedStr::new(name) == UncasedStr::new(key))
    }
}

/// Collect the paths below which `value`, placed at `path`, replaces
/// whatever the tree holds: the first non-mapping node on every branch.
fn replacement_roots(path: &ConfigPath, value: &Value, out: &mut Vec<ConfigPath>) {
    match value {
        Value::Mapping(map) => {
            for (key, child) in map {
                replacement_roots(&path.child(key), child, out);
            }
        }
        Value::Scalar(_) | Value::Sequence(_) => out.push(path.clone()),
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            snapshot.restore(self.store.as_ref());
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("domain", &self.domain)
            .field("options", &self.options)
            .field("lifecycle_snapshot", &self.snapshot.is_some())
            .finish_non_exhaustive()
    }
}
