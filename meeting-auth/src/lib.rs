//! # meeting-auth
//!
//! Authentication for the Zoom recordings manager:
//! - OAuth 2.0 client-credentials exchange (Zoom Server-to-Server OAuth)
//! - Access token caching with single-flight refresh
//! - Clock abstraction so token expiry can be driven from tests
//! - HTTP client building shared by the token exchange and API gateway
//!
//! ## Usage
//!
//! ```rust,ignore
//! use meeting_auth::{
//!     clock::SystemClock,
//!     http::ClientBuilder,
//!     oauth::{providers::zoom, token::{Cache, TokenSource}},
//! };
//!
//! let http_client = ClientBuilder::new().build()?;
//! let provider = zoom::Provider::new(credentials, token_url, http_client);
//! let cache = Cache::new(provider, SystemClock);
//! let token = cache.access_token().await?;
//! ```

pub mod clock;
pub mod error;
pub mod http;
pub mod oauth;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
