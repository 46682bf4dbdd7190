//! Primary error enum for registry construction and extraction.

use figment::Error as FigmentError;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type EnvTreeResult<T> = Result<T, EnvTreeError>;

/// Errors that can occur while constructing or reading a registry.
///
/// Lookups that miss are not errors: [`crate::Registry::param`] returns
/// `None`, and writes refused because overriding is disabled are dropped
/// silently.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EnvTreeError {
    /// The domain prefix was empty once whitespace and trailing underscores
    /// were removed.
    #[error("invalid domain '{domain}': a non-empty prefix is required")]
    InvalidDomain {
        /// Domain as supplied by the caller.
        domain: String,
    },

    /// Registry options could not be extracted from a provider.
    #[error("failed to read registry options: {0}")]
    Options(#[from] Box<FigmentError>),

    /// A subtree could not be deserialized into the requested type.
    #[error("failed to extract '{path}': {source}")]
    Extract {
        /// Dotted path of the subtree that failed to deserialize.
        path: String,
        /// Underlying deserialization error.
        #[source]
        source: Box<FigmentError>,
    },
}
