//! Transcoding between environment variable names and tree paths.
//!
//! An environment key is the upper-case domain followed by the path's
//! segments, all joined with underscores: the path `server.node.1` under the
//! domain `myapp` is `MYAPP_SERVER_NODE_1`. Sequence elements use 1-based
//! numeric segments in both directions.
//!
//! Underscores are the only separator, so a path segment that itself
//! contains an underscore does not survive a round trip: `db_host` encodes to
//! `MYAPP_DB_HOST`, which decodes to `db.host`.

mod flatten;
mod merge;

pub use flatten::{FlatMap, flatten, unflatten};
pub(crate) use flatten::flatten_into;
pub use merge::{merge, merge_value};

use crate::{ConfigPath, Domain};

/// Decode an environment variable name into a path below `domain`.
///
/// Returns `None` when `env_key` is not prefixed by the domain and an
/// underscore (compared case-insensitively), or when nothing follows that
/// prefix.
///
/// # Examples
///
/// ```
/// use envtree::{Domain, codec};
///
/// let domain = Domain::new("myapp")?;
/// let path = codec::decode("MYAPP_DB_1_USER", &domain);
/// assert_eq!(path.map(|p| p.to_string()).as_deref(), Some("db.1.user"));
/// assert!(codec::decode("MYAPP", &domain).is_none());
/// # Ok::<_, envtree::EnvTreeError>(())
/// ```
#[must_use]
pub fn decode(env_key: &str, domain: &Domain) -> Option<ConfigPath> {
    domain
        .strip(env_key)
        .map(|rest| ConfigPath::from_segments(rest.split('_')))
}

/// Encode `path` as an upper-case environment variable name under `domain`.
///
/// # Examples
///
/// ```
/// use envtree::{ConfigPath, Domain, codec};
///
/// let domain = Domain::new("myapp")?;
/// let key = codec::encode(&ConfigPath::parse("server.node.2"), &domain);
/// assert_eq!(key, "MYAPP_SERVER_NODE_2");
/// # Ok::<_, envtree::EnvTreeError>(())
/// ```
#[must_use]
pub fn encode(path: &ConfigPath, domain: &Domain) -> String {
    std::iter::once(domain.as_str())
        .chain(path.segments().iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

#[cfg(test)]
mod tests;
