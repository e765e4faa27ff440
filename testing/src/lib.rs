//! # Setlist Testing
//!
//! Testing utilities for the Setlist event catalogue.
//!
//! This crate provides:
//! - In-memory implementations of [`EventRepository`](setlist_core::EventRepository)
//! - A store that always fails, for error propagation tests
//! - Event fixtures
//!
//! ## Example
//!
//! ```
//! use setlist_core::EventService;
//! use setlist_testing::{fixtures, InMemoryEventRepository};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = InMemoryEventRepository::with_events(fixtures::walsh_and_doe());
//! let service = EventService::new(Arc::new(repository.clone()));
//!
//! let found = service.search_events(Some("wa")).await?;
//! assert_eq!(found.len(), 1);
//! assert_eq!(repository.calls().find_all, 1);
//! # Ok(())
//! # }
//! ```

pub mod fixtures;
pub mod repository_mocks;

// Re-export commonly used items
pub use repository_mocks::{CallCounts, FailingEventRepository, InMemoryEventRepository};
