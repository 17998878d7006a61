//! Clients for the third-party APIs the domain talks to.

pub mod zoom;
