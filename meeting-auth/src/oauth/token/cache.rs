//! Access token cache with single-flight refresh.

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::Tokens;
use crate::clock::{Clock, SystemClock};
use crate::error::Error;
use crate::oauth::Provider;

/// Capability to hand out a currently valid bearer token.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Return a token usable right now, acquiring a new one if needed.
    async fn access_token(&self) -> Result<SecretString, Error>;
}

/// Token cache that reuses an access token until shortly before it expires.
///
/// The cached token lives behind one async mutex that stays held while an
/// exchange is in flight. Concurrent callers that find the token expired queue
/// on that lock and, once the first exchange lands, are served the new token,
/// so one expiry costs exactly one exchange.
pub struct Cache<P: Provider, C: Clock = SystemClock> {
    provider: P,
    clock: C,
    tokens: Mutex<Option<Tokens>>,
}

impl<P: Provider, C: Clock> Cache<P, C> {
    /// Create an empty cache; the first call triggers the exchange.
    pub fn new(provider: P, clock: C) -> Self {
        Self {
            provider,
            clock,
            tokens: Mutex::new(None),
        }
    }
}

#[async_trait]
impl<P: Provider, C: Clock> TokenSource for Cache<P, C> {
    async fn access_token(&self) -> Result<SecretString, Error> {
        let mut cached = self.tokens.lock().await;

        if let Some(tokens) = cached.as_ref() {
            if tokens.is_valid_at(self.clock.now()) {
                return Ok(tokens.access_token.clone());
            }
            debug!("Cached {} token expired, refreshing", self.provider.name());
        }

        let grant = self.provider.exchange().await.inspect_err(|e| {
            warn!("Failed to obtain {} access token: {}", self.provider.name(), e);
        })?;

        // A lifetime inside the safety margin is still handed out once; the
        // next call exchanges again.
        let tokens = Tokens::from_grant(grant, self.clock.now()).inspect_err(|e| {
            warn!("Rejected {} token grant: {}", self.provider.name(), e);
        })?;

        let access_token = tokens.access_token.clone();
        *cached = Some(tokens);
        debug!("Cached new {} access token", self.provider.name());

        Ok(access_token)
    }
}
