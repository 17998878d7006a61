//! OAuth token types.

use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;

use crate::error::{oauth_error, Error, OAuthErrorKind};
use crate::oauth::Grant;

/// Margin subtracted from the provider-reported lifetime so a request in
/// flight at the boundary never carries a token the server already dropped.
pub const EXPIRY_SAFETY_MARGIN_SECS: i64 = 60;

/// Cached access token with its expiry.
#[derive(Debug, Clone)]
pub struct Tokens {
    /// Access token for API requests.
    pub access_token: SecretString,
    /// Instant after which the token must not be used.
    pub expires_at: DateTime<Utc>,
    /// Token type (usually "bearer").
    pub token_type: String,
}

impl Tokens {
    /// Build cached tokens from a grant received at `issued_at`.
    ///
    /// Fails with `InvalidResponse` when `expires_in` does not fit in a
    /// representable expiry instant.
    pub fn from_grant(grant: Grant, issued_at: DateTime<Utc>) -> Result<Self, Error> {
        let expires_at = grant
            .expires_in
            .checked_sub(EXPIRY_SAFETY_MARGIN_SECS)
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                oauth_error(
                    OAuthErrorKind::InvalidResponse,
                    &format!("expires_in out of range: {}", grant.expires_in),
                )
            })?;

        Ok(Self {
            access_token: grant.access_token,
            expires_at,
            token_type: grant.token_type,
        })
    }

    /// Check if the access token is still usable at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
