//! Timestamp generation for GDAX API authentication.
//!
//! Every signed request carries a unix timestamp in seconds, both inside the
//! signed message and in the `CB-ACCESS-TIMESTAMP` header. The server rejects
//! requests whose timestamp drifts too far from its own clock.

use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing timestamps for authenticated requests.
pub trait TimestampProvider: Send + Sync {
    /// Current time in whole seconds since the UNIX epoch.
    fn timestamp(&self) -> u64;
}

/// Timestamp provider backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimestamp;

impl TimestampProvider for SystemTimestamp {
    fn timestamp(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Timestamp provider that always returns the same value.
///
/// Useful for reproducing signatures in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimestamp(pub u64);

impl TimestampProvider for FixedTimestamp {
    fn timestamp(&self) -> u64 {
        self.0
    }
}
