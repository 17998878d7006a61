//! Zoom cloud recording management.
//!
//! `gateway::zoom` speaks the Zoom REST API, `recording` builds the
//! account-wide listing and deletion operations the web layer exposes.

pub mod error;
pub mod gateway;
pub mod pagination;
pub mod recording;
pub mod throttle;
