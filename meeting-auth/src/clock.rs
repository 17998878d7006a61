//! Time source used for token expiry and date defaults.

use chrono::{DateTime, Utc};

/// Source of the current instant.
///
/// The token cache and the recordings pipeline read time through this trait so
/// tests can move the clock past a token's expiry without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by [`Utc::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
