//! Test-only helpers: env mutation guards and a retry policy that keeps tests fast.

use std::time::Duration;

use backon::ExponentialBuilder;

/// Backoff with millisecond delays for exercising retry paths in tests.
#[must_use]
pub fn fast_backoff(max_times: usize) -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(5))
        .with_max_delay(Duration::from_millis(20))
        .with_max_times(max_times)
}

/// RAII guard for temporarily setting an environment variable.
///
/// The variable is restored to its previous state (or removed if it was not
/// set) when the guard is dropped.
pub struct EnvGuard {
    key: &'static str,
    prev: Option<String>,
}

impl EnvGuard {
    /// Set an environment variable until the guard drops.
    ///
    /// Only sound under `#[serial(env)]`: `std::env::set_var` races with
    /// concurrent readers.
    #[must_use]
    pub fn set(key: &'static str, val: &str) -> Self {
        let prev = std::env::var(key).ok();
        // SAFETY: callers serialise env access with `#[serial(env)]`.
        unsafe { std::env::set_var(key, val) };
        Self { key, prev }
    }

    /// Remove an environment variable until the guard drops.
    ///
    /// Only sound under `#[serial(env)]`.
    #[must_use]
    pub fn remove(key: &'static str) -> Self {
        let prev = std::env::var(key).ok();
        // SAFETY: callers serialise env access with `#[serial(env)]`.
        unsafe { std::env::remove_var(key) };
        Self { key, prev }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.prev {
            // SAFETY: the guard is dropped inside the same serialised test.
            Some(v) => unsafe { std::env::set_var(self.key, v) },
            // SAFETY: as above.
            None => unsafe { std::env::remove_var(self.key) },
        }
    }
}
