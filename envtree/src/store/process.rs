//! Adapter over the real process environment.

use std::sync::LazyLock;

use parking_lot::ReentrantMutex;

use super::EnvStore;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Environment store that reads and writes the process environment.
///
/// Every access made through this type is serialised by a process-wide lock.
/// Code elsewhere in the process that calls `std::env::set_var` directly
/// bypasses that lock; avoid doing so while registries are in use on other
/// threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        let _guard = ENV_MUTEX.lock();
        std::env::var(name).ok()
    }

    fn set(&self, name: &str, value: &str) {
        if !is_settable(name, value) {
            tracing::warn!(key = name, "refusing to set an unrepresentable environment variable");
            return;
        }
        let _guard = ENV_MUTEX.lock();
        // SAFETY: mutation is serialised by `ENV_MUTEX`.
        unsafe { std::env::set_var(name, value) };
    }

    fn remove(&self, name: &str) {
        if !is_settable(name, "") {
            return;
        }
        let _guard = ENV_MUTEX.lock();
        // SAFETY: mutation is serialised by `ENV_MUTEX`.
        unsafe { std::env::remove_var(name) };
    }

    fn vars(&self) -> Vec<(String, String)> {
        let _guard = ENV_MUTEX.lock();
        std::env::vars_os()
            .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => Some((key, value)),
                (key, _) => {
                    tracing::warn!(
                        key = ?key,
                        "skipping environment variable that is not valid UTF-8"
                    );
                    None
                }
            })
            .collect()
    }
}

/// `std::env::set_var` panics on empty names and on names or values holding
/// `=` (names only) or NUL.
fn is_settable(name: &str, value: &str) -> bool {
    !name.is_empty() && !name.contains(['=', '\0']) && !value.contains('\0')
}
