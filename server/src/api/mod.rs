//! REST API handlers.

pub mod events;
