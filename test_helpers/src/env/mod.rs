//! Helpers for safely mutating environment variables in tests.
//!
//! Each mutation acquires a global re-entrant mutex and returns an RAII guard
//! that restores the previous state when dropped:
//! - [`set_var`] and [`remove_var`] restore a single key, removing it if it
//!   was previously absent. Stacked guards for one key restore in LIFO order.
//! - [`scrub_prefix`] removes every variable whose name starts with a prefix
//!   (compared case-insensitively) and, on drop, removes whatever was added
//!   under that prefix in the meantime before reinstating the originals.
//!   Use it around code that writes variables whose names are not known in
//!   advance.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _scope = env::scrub_prefix("DEMO_");
//! let _g = env::set_var("DEMO_KEY", "VALUE");
//! // `DEMO_KEY` is set to `VALUE` for the duration of the guard.
//! ```

use parking_lot::ReentrantMutex;
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Wrapper around `std::env::set_var`.
///
/// # Safety
///
/// Callers must ensure the global environment is synchronised.
unsafe fn env_set_var(key: &str, value: &OsStr) {
    unsafe { env::set_var(key, value) };
}

/// Wrapper around `std::env::remove_var`.
///
/// # Safety
///
/// Callers must ensure the global environment is synchronised.
unsafe fn env_remove_var(key: &str) {
    unsafe { env::remove_var(key) };
}

/// Restore `key` to `original`, removing it when `original` is `None`.
///
/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn restore(key: &str, original: Option<&OsStr>) {
    match original {
        // SAFETY: the caller holds `ENV_MUTEX`.
        Some(value) => unsafe { env_set_var(key, value) },
        // SAFETY: the caller holds `ENV_MUTEX`.
        None => unsafe { env_remove_var(key) },
    }
}

fn mutate_env_var<K, F>(key: K, mutator: F) -> EnvVarGuard
where
    K: Into<String>,
    F: FnOnce(&str),
{
    let key = key.into();
    let _guard = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        // SAFETY: We hold `ENV_MUTEX` during restoration.
        unsafe { restore(&self.key, self.original.as_deref()) };
    }
}

/// Sets an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use test_helpers::env;
/// let _g = env::set_var("FOO", "bar");
/// assert!(matches!(std::env::var("FOO"), Ok(ref value) if value == "bar"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    // SAFETY: `mutate_env_var` holds `ENV_MUTEX` while the mutator runs.
    mutate_env_var(key, |k| unsafe { env_set_var(k, value.as_ref()) })
}

/// Removes an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use test_helpers::env;
/// let _g = env::remove_var("FOO");
/// assert!(std::env::var("FOO").is_err());
/// ```
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    // SAFETY: `mutate_env_var` holds `ENV_MUTEX` while the mutator runs.
    mutate_env_var(key, |k| unsafe { env_remove_var(k) })
}

/// RAII guard isolating every variable under a prefix.
#[must_use = "dropping restores the variables under the prefix"]
pub struct PrefixGuard {
    prefix: String,
    original: Vec<(String, OsString)>,
}

impl PrefixGuard {
    /// Names of the variables that were present when the guard was created.
    #[must_use]
    pub fn original_keys(&self) -> Vec<&str> {
        self.original.iter().map(|(key, _)| key.as_str()).collect()
    }
}

impl fmt::Debug for PrefixGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixGuard")
            .field("prefix", &self.prefix)
            .field("originals", &self.original.len())
            .finish()
    }
}

impl Drop for PrefixGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        for key in keys_with_prefix(&self.prefix) {
            // SAFETY: We hold `ENV_MUTEX` during restoration.
            unsafe { env_remove_var(&key) };
        }
        for (key, value) in &self.original {
            // SAFETY: We hold `ENV_MUTEX` during restoration.
            unsafe { env_set_var(key, value) };
        }
    }
}

/// Whether `key` starts with `prefix`, ignoring ASCII case.
fn has_prefix(key: &str, prefix: &str) -> bool {
    key.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn keys_with_prefix(prefix: &str) -> Vec<String> {
    env::vars_os()
        .filter_map(|(key, _)| key.into_string().ok())
        .filter(|key| has_prefix(key, prefix))
        .collect()
}

/// Removes every variable whose name starts with `prefix` and returns a
/// guard that undoes all changes under that prefix when dropped.
///
/// # Examples
/// ```
/// use test_helpers::env;
///
/// let _outer = env::set_var("SCRUB_DEMO_A", "1");
/// {
///     let _scope = env::scrub_prefix("scrub_demo_");
///     assert!(std::env::var("SCRUB_DEMO_A").is_err());
/// }
/// assert_eq!(std::env::var("SCRUB_DEMO_A").as_deref(), Ok("1"));
/// ```
pub fn scrub_prefix(prefix: impl Into<String>) -> PrefixGuard {
    let prefix = prefix.into();
    let _guard = ENV_MUTEX.lock();
    let original: Vec<(String, OsString)> = env::vars_os()
        .filter_map(|(key, value)| key.into_string().ok().map(|key| (key, value)))
        .filter(|(key, _)| has_prefix(key, &prefix))
        .collect();
    for (key, _) in &original {
        // SAFETY: We hold `ENV_MUTEX` while scrubbing.
        unsafe { env_remove_var(key) };
    }
    PrefixGuard { prefix, original }
}

/// Run a closure while holding the global environment lock.
///
/// # Examples
/// ```
/// use test_helpers::env;
///
/// env::with_lock(|| {
///     let _guard = env::set_var("KEY", "VALUE");
/// });
/// ```
pub fn with_lock<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock();
    f()
}
