//! Time source abstraction for token expiry checks.
//!
//! The authentication check compares a token's `exp` claim against "now".
//! Taking "now" from a `TimeSource` lets production use the system clock
//! while tests pin the verification instant.

use std::time::{SystemTime, UNIX_EPOCH};

/// Abstraction over the current time.
pub trait TimeSource: Send + Sync {
    /// Get the current time in seconds since Unix epoch.
    fn now_secs(&self) -> u64;
}

/// Real time source using the system clock.
///
/// This is the default implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_secs(&self) -> u64 {
        // A clock set before 1970 treats every token as expired.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(u64::MAX, |duration| duration.as_secs())
    }
}

/// A time source frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource {
    now_secs: u64,
}

impl FixedTimeSource {
    #[must_use]
    pub const fn new(now_secs: u64) -> Self {
        Self { now_secs }
    }
}

impl TimeSource for FixedTimeSource {
    fn now_secs(&self) -> u64 {
        self.now_secs
    }
}
