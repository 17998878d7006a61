//! OAuth access token caching and refresh.

mod cache;
mod tokens;

pub use cache::{Cache, TokenSource};
pub use tokens::{Tokens, EXPIRY_SAFETY_MARGIN_SECS};
