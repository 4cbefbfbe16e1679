//! Database models shared across the client repository.

pub mod client;
#[cfg(feature = "server")]
pub mod config;
