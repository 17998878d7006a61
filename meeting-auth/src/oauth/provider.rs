//! OAuth provider trait and grant types.

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Deserialize;

use crate::error::Error;

/// Token endpoint response for a client-credentials grant.
#[derive(Debug, Clone, Deserialize)]
pub struct Grant {
    /// Bearer token for API requests.
    pub access_token: SecretString,
    /// Lifetime of the token in seconds, as reported by the provider.
    pub expires_in: i64,
    /// Token type (usually "bearer").
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Trait for OAuth 2.0 providers that authenticate the service itself
/// (client-credentials style flows) rather than an end user.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short provider identifier used in logs (e.g. "zoom").
    fn name(&self) -> &'static str;

    /// Exchange the configured client credentials for a fresh access token.
    ///
    /// Every call performs one request against the token endpoint; caching is
    /// the job of [`crate::oauth::token::Cache`].
    async fn exchange(&self) -> Result<Grant, Error>;
}
