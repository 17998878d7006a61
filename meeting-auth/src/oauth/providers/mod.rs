//! OAuth provider implementations.

pub mod zoom;
