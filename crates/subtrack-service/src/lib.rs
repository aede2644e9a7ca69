//! Subtrack HTTP API Service.
//!
//! This crate provides the HTTP API for subscription records:
//!
//! - Create, retrieve, replace, delete and list subscriptions
//! - Total cost over a month range with optional user and service filters
//! - Health check
//!
//! The store handle is built by the binary and injected through [`AppState`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod shutdown;
pub mod state;
pub mod telemetry;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
