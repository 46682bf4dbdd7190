//! Key-value stores that hold environment variables.
//!
//! A [`crate::Registry`] reads and writes variables through [`EnvStore`]
//! rather than touching the process environment directly, so tests and
//! embedded uses can substitute [`MemoryEnv`] for [`ProcessEnv`].

mod memory;
mod process;

pub use memory::MemoryEnv;
pub use process::ProcessEnv;

/// External environment variable store.
///
/// Methods take `&self`; implementations provide their own synchronisation.
pub trait EnvStore: Send + Sync {
    /// Value of `name`, if set.
    fn get(&self, name: &str) -> Option<String>;

    /// Set `name` to `value`, replacing any previous value.
    fn set(&self, name: &str, value: &str);

    /// Remove `name` if present.
    fn remove(&self, name: &str);

    /// Snapshot of every variable currently set.
    fn vars(&self) -> Vec<(String, String)>;
}
