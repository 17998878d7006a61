//! OAuth 2.0 authentication infrastructure.
//!
//! Provides the client-credentials exchange for the meeting platform and the
//! access token cache built on top of it.

mod provider;

pub mod providers;
pub mod token;

pub use provider::{Grant, Provider};
