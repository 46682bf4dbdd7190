//! Construction options for a registry.

use figment::{Figment, Provider, providers::Serialized};
use serde::{Deserialize, Serialize};

use crate::EnvTreeResult;

/// Behaviour switches applied when a [`crate::Registry`] is built.
///
/// The options are plain `serde` data so an application can source them from
/// its own configuration layers.
///
/// # Examples
///
/// ```
/// use envtree::RegistryOptions;
/// use figment::providers::Serialized;
///
/// let options = RegistryOptions::from_provider(Serialized::defaults(
///     serde_json::json!({"override": false}),
/// ))?;
/// assert!(!options.override_existing);
/// assert!(options.autoload);
/// # Ok::<_, envtree::EnvTreeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryOptions {
    /// Load every matching variable from the store when the registry is built.
    pub autoload: bool,
    /// Allow [`crate::Registry::set_param`] to replace a variable that already
    /// exists in the store.
    #[serde(rename = "override")]
    pub override_existing: bool,
    /// Write loaded values back to the store.
    pub mirror: bool,
    /// Restore the store's variables under the domain to their state at
    /// construction when the registry is dropped.
    pub lifecycle: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            autoload: true,
            override_existing: true,
            mirror: true,
            lifecycle: false,
        }
    }
}

impl RegistryOptions {
    /// Extract options from `provider`, falling back to the defaults for any
    /// field it does not supply.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EnvTreeError::Options`] when the provider fails or
    /// supplies a value of the wrong type.
    pub fn from_provider<P: Provider>(provider: P) -> EnvTreeResult<Self> {
        Ok(Figment::from(Serialized::defaults(Self::default()))
            .merge(provider)
            .extract::<Self>()?)
    }
}
