//! Production Environment implementation using the system clock.
//!
//! `SystemEnv` reads wall-clock time from the OS and sleeps on the tokio
//! timer. Must be used inside a tokio runtime.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use relaychat_client::Environment;

/// Production environment using system time and tokio timers.
#[derive(Clone, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    fn wall_clock_millis(&self) -> u64 {
        // A clock before 1970 is reported as the epoch itself
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
