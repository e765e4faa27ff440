//! Setlist HTTP server.
//!
//! Serves the event catalogue over a small JSON API:
//!
//! - **List** every event
//! - **Search** events by band member name, annotated with band and member counts
//! - **Delete** an event by id
//! - **Update** an event's rating and comment
//!
//! The store is chosen at startup: `PostgreSQL` in production, or an
//! in-memory store for local runs and tests.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod metrics;
pub mod server;

pub use config::Config;
pub use server::{build_router, AppState};
