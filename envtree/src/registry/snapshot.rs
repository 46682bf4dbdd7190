//! Capture and restore of a domain's variables.

use std::collections::BTreeMap;

use crate::{Domain, EnvStore};

/// The variables under one domain at a point in time.
///
/// A registry built with `lifecycle` enabled captures a snapshot before its
/// initial load and restores it when dropped, removing variables it
/// introduced and reinstating values it replaced.
///
/// # Examples
///
/// ```
/// use envtree::{Domain, EnvSnapshot, EnvStore, MemoryEnv};
///
/// let env = MemoryEnv::from_pairs([("MYAPP_A", "1"), ("OTHER", "x")]);
/// let domain = Domain::new("myapp")?;
/// let snapshot = EnvSnapshot::capture(&env, &domain);
/// env.set("MYAPP_A", "2");
/// env.set("MYAPP_B", "3");
/// snapshot.restore(&env);
/// assert_eq!(env.get("MYAPP_A").as_deref(), Some("1"));
/// assert!(env.get("MYAPP_B").is_none());
/// # Ok::<_, envtree::EnvTreeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvSnapshot {
    domain: Domain,
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Record every variable in `store` that belongs to `domain`.
    #[must_use]
    pub fn capture(store: &dyn EnvStore, domain: &Domain) -> Self {
        let vars = store
            .vars()
            .into_iter()
            .filter(|(key, _)| domain.owns(key))
            .collect();
        Self {
            domain: domain.clone(),
            vars,
        }
    }

    /// Variables recorded at capture time.
    #[must_use]
    pub const fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Return the domain's variables in `store` to their captured state.
    ///
    /// Variables outside the domain are left alone.
    pub fn restore(&self, store: &dyn EnvStore) {
        let mut removed = 0_usize;
        for (key, _) in store.vars() {
            if self.domain.owns(&key) && !self.vars.contains_key(&key) {
                store.remove(&key);
                removed += 1;
            }
        }
        let mut restored = 0_usize;
        for (key, value) in &self.vars {
            if store.get(key).as_deref() != Some(value.as_str()) {
                store.set(key, value);
                restored += 1;
            }
        }
        tracing::debug!(
            domain = %self.domain,
            removed,
            restored,
            "restored environment snapshot"
        );
    }
}
