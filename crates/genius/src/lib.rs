//! Genius: client core for the Codebase Genius documentation service.
//!
//! This crate submits repositories to the service, lists processed repositories,
//! and probes liveness. The service's responses are inconsistent: results may or
//! may not be wrapped in a `reports` envelope, errors may arrive inside a
//! successful response, and the body may not be JSON at all. [`GeniusClient`]
//! resolves all of that into a single [`Outcome`] per call.

#![forbid(unsafe_code)]
// Public API types have docs; internal helpers are documented where non-obvious.
#![allow(missing_docs)]

pub mod classify;
pub mod client;
pub mod config;
pub mod decoder;
pub mod envelope;
pub mod error;
pub mod model;
pub mod transport;

pub use crate::client::GeniusClient;
pub use crate::config::ClientConfig;
pub use crate::error::{ErrorCode, GeniusError, GeniusResult};
pub use crate::model::*;
