//! Views bound to a sub-path of a shared registry.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::{ConfigPath, EnvTreeResult, Registry, Value};

/// A read/write handle that resolves every path below a fixed prefix.
///
/// Scopes borrow their registry and copy nothing: writes through a scope are
/// visible through the registry and through every other scope.
///
/// # Examples
///
/// ```
/// use envtree::{MemoryEnv, Registry};
///
/// let env = MemoryEnv::from_pairs([("MYAPP_DB_1_CONN", "postgres://db")]);
/// let registry = Registry::builder("myapp").store(env).build()?;
///
/// let first = registry.scope("db").scope("1");
/// assert_eq!(first.param("conn"), registry.param("db.1.conn"));
/// assert_eq!(first.path().to_string(), "db.1");
/// # Ok::<_, envtree::EnvTreeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Scope<'r> {
    registry: &'r Registry,
    prefix: ConfigPath,
}

impl<'r> Scope<'r> {
    pub(crate) const fn new(registry: &'r Registry, prefix: ConfigPath) -> Self {
        Self { registry, prefix }
    }

    /// The registry this scope reads from and writes to.
    #[must_use]
    pub const fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// The scope's prefix relative to the registry root.
    #[must_use]
    pub const fn path(&self) -> &ConfigPath {
        &self.prefix
    }

    /// A narrower scope at `path` below this one.
    #[must_use]
    pub fn scope<P: Into<ConfigPath>>(&self, path: P) -> Self {
        Self::new(self.registry, self.resolve(path))
    }

    /// Look up `path` relative to the scope.
    #[must_use]
    pub fn param<P: Into<ConfigPath>>(&self, path: P) -> Option<Value> {
        self.registry.param(self.resolve(path))
    }

    /// Set `path` relative to the scope; see [`Registry::set_param`].
    pub fn set_param<P, V>(&self, path: P, value: V) -> bool
    where
        P: Into<ConfigPath>,
        V: Into<Value>,
    {
        self.registry.set_param(self.resolve(path), value)
    }

    /// Look up several paths relative to the scope, preserving their order.
    pub fn params<I, P>(&self, paths: I) -> Vec<Option<Value>>
    where
        I: IntoIterator<Item = P>,
        P: Into<ConfigPath>,
    {
        paths.into_iter().map(|path| self.param(path)).collect()
    }

    /// Deserialize the subtree at `path` relative to the scope.
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
        self.registry.extract(self.resolve(path))
    }

    /// The leaves under this scope as environment variables.
    #[must_use]
    pub fn environment(&self) -> BTreeMap<String, String> {
        self.registry.environment_under(&self.prefix)
    }

    fn resolve<P: Into<ConfigPath>>(&self, path: P) -> ConfigPath {
        self.prefix.join(&path.into())
    }
}
