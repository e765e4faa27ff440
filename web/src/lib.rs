//! Axum integration for the Setlist event catalogue.
//!
//! This crate holds the HTTP plumbing shared by Setlist servers:
//!
//! - [`AppError`]: maps store errors to JSON error responses
//! - [`middleware`]: request id, tracing and CORS layers
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract** path parameters and JSON body
//! 3. **Call** the `EventService` operation
//! 4. **Map** the result (or `RepositoryError` via [`AppError`]) to an HTTP response

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod middleware;

// Re-export key types for convenience
pub use error::AppError;
pub use middleware::{with_http_layers, REQUEST_ID_HEADER};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
