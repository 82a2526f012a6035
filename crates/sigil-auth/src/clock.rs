//! Time source abstraction for token verification.
//!
//! Expiry checks depend on the current clock, which makes them the one
//! non-deterministic input to verification. This module abstracts the clock
//! behind a trait so production code uses system time while tests pin time
//! to a fixed instant.

use time::OffsetDateTime;

/// Abstraction over the current time.
pub trait Clock: Send + Sync {
    /// Current time in whole seconds since the Unix epoch.
    fn now_unix(&self) -> i64;
}

/// Real clock backed by the system time.
///
/// This is the default implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        OffsetDateTime::now_utc().unix_timestamp()
    }
}
