//! Pacing between consecutive calls to a rate-limited API.

use async_trait::async_trait;
use std::time::Duration;

/// Gate awaited between two consecutive units of work against the remote API.
#[async_trait]
pub trait Throttle: Send + Sync {
    async fn pause(&self);
}

/// Waits a fixed interval on every pause.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    interval: Duration,
}

impl FixedDelay {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

#[async_trait]
impl Throttle for FixedDelay {
    async fn pause(&self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }
}
