//! Builder for [`Registry`] instances.

use std::fmt;

use parking_lot::Mutex;

use super::{EnvSnapshot, Registry, RegistryOptions, State};
use crate::{Domain, EnvStore, EnvTreeResult, ProcessEnv};

/// Builder for [`Registry`].
///
/// # Examples
///
/// ```
/// use envtree::{MemoryEnv, Registry, Value};
///
/// let env = MemoryEnv::from_pairs([("MYAPP_DB_1_USER", "admin")]);
/// let registry = Registry::builder("myapp")
///     .store(env.clone())
///     .override_existing(false)
///     .build()?;
///
/// assert!(!registry.set_param("db.1.user", "newuser"));
/// let user = registry.param("db.1.user");
/// assert_eq!(user.as_ref().and_then(Value::as_str), Some("admin"));
/// # Ok::<_, envtree::EnvTreeError>(())
/// ```
pub struct RegistryBuilder {
    domain: String,
    options: RegistryOptions,
    store: Option<Box<dyn EnvStore>>,
}

impl RegistryBuilder {
    /// Creates a builder for `domain` with default options over the process
    /// environment.
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            options: RegistryOptions::default(),
            store: None,
        }
    }

    /// Replaces every option at once.
    #[must_use]
    pub fn options(mut self, options: RegistryOptions) -> Self {
        self.options = options;
        self
    }

    /// Whether to load the store's matching variables during [`Self::build`].
    #[must_use]
    pub fn autoload(mut self, autoload: bool) -> Self {
        self.options.autoload = autoload;
        self
    }

    /// Whether writes may replace variables that already exist in the store.
    #[must_use]
    pub fn override_existing(mut self, override_existing: bool) -> Self {
        self.options.override_existing = override_existing;
        self
    }

    /// Whether loaded values are written back to the store.
    #[must_use]
    pub fn mirror(mut self, mirror: bool) -> Self {
        self.options.mirror = mirror;
        self
    }

    /// Whether dropping the registry restores the domain's variables.
    #[must_use]
    pub fn lifecycle(mut self, lifecycle: bool) -> Self {
        self.options.lifecycle = lifecycle;
        self
    }

    /// Uses `store` instead of the process environment.
    #[must_use]
    pub fn store(mut self, store: impl EnvStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Builds the registry, capturing a snapshot and loading the store as the
    /// options require.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EnvTreeError::InvalidDomain`] when the domain is
    /// empty.
    pub fn build(self) -> EnvTreeResult<Registry> {
        let domain = Domain::new(&self.domain)?;
        let store = self.store.unwrap_or_else(|| Box::new(ProcessEnv));
        let snapshot = self
            .options
            .lifecycle
            .then(|| EnvSnapshot::capture(store.as_ref(), &domain));
        let registry = Registry {
            domain,
            options: self.options,
            store,
            state: Mutex::new(State::default()),
            snapshot,
        };
        if registry.options.autoload {
            let vars = registry.store.vars();
            registry.load(vars);
        }
        Ok(registry)
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("domain", &self.domain)
            .field("options", &self.options)
            .field("custom_store", &self.store.is_some())
            .finish()
    }
}
