//! Environment abstraction for deterministic testing.
//!
//! Decouples protocol logic from system resources. Production uses the system
//! clock and tokio timers, tests use a fixed clock and instant sleeps.

use std::time::Duration;

/// Abstract environment providing wall-clock time and async sleeping.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Milliseconds since the Unix epoch.
    ///
    /// Used for outgoing `typing` and `message` timestamps. The relay does not
    /// correct these, so no monotonicity is required.
    fn wall_clock_millis(&self) -> u64;

    /// Sleeps for the specified duration.
    ///
    /// Only driver code sleeps (the reconnect timer). State machines never do.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}
