//! Zoom Server-to-Server OAuth provider implementation.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use crate::error::{oauth_error, Error, OAuthErrorKind};
use crate::oauth::Grant;

/// Default Zoom OAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://zoom.us/oauth/token";

/// Grant type Zoom uses for account-level client credentials.
const GRANT_TYPE: &str = "account_credentials";

/// App credentials of a Zoom Server-to-Server OAuth app.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub account_id: String,
    pub client_id: String,
    pub client_secret: SecretString,
}

/// Zoom OAuth provider.
///
/// The account identity travels in the form body, the client identity as an
/// HTTP Basic credential built from the client id and secret.
pub struct Provider {
    credentials: Credentials,
    token_url: String,
    http_client: reqwest::Client,
}

impl Provider {
    /// Create a new Zoom OAuth provider.
    ///
    /// # Arguments
    ///
    /// * `credentials` - Account id, client id and client secret of the app
    /// * `token_url` - Token endpoint, normally [`DEFAULT_TOKEN_URL`]
    /// * `http_client` - Client used for the exchange request
    pub fn new(credentials: Credentials, token_url: String, http_client: reqwest::Client) -> Self {
        Self {
            credentials,
            token_url,
            http_client,
        }
    }
}

#[async_trait]
impl crate::oauth::Provider for Provider {
    fn name(&self) -> &'static str {
        "zoom"
    }

    async fn exchange(&self) -> Result<Grant, Error> {
        debug!("Requesting Zoom access token for account {}", self.credentials.account_id);

        let form = [
            ("grant_type", GRANT_TYPE),
            ("account_id", self.credentials.account_id.as_str()),
        ];

        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(self.credentials.client_secret.expose_secret()),
            )
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach Zoom token endpoint: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: crate::ErrorKind::OAuth(OAuthErrorKind::Network),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Zoom token endpoint returned {}: {}", status, error_text);
            return Err(oauth_error(
                OAuthErrorKind::TokenExchangeFailed(status.as_u16()),
                &error_text,
            ));
        }

        let grant: Grant = response.json().await.map_err(|e| {
            warn!("Failed to parse Zoom token response: {:?}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: crate::ErrorKind::OAuth(OAuthErrorKind::InvalidResponse),
            }
        })?;

        info!("Zoom access token refreshed, expires in {}s", grant.expires_in);
        Ok(grant)
    }
}
