//! Event store contract.
//!
//! This module defines the abstraction over the persistent record store that
//! holds events. The search and update logic only ever talks to the store
//! through [`EventRepository`].
//!
//! # Implementations
//!
//! - `PostgresEventRepository` (in `setlist-postgres` crate): Production implementation
//! - `InMemoryEventRepository` (in `setlist-testing` crate): Fast, deterministic testing
//!
//! # Example
//!
//! ```no_run
//! use setlist_core::model::EventId;
//! use setlist_core::repository::{EventRepository, RepositoryError};
//!
//! async fn example<R: EventRepository>(repository: &R) -> Result<(), RepositoryError> {
//!     if let Some(mut event) = repository.find_by_id(EventId::new(1)).await? {
//!         event.nb_stars = Some(5);
//!         repository.save(event).await?;
//!     }
//!     Ok(())
//! }
//! ```

use crate::model::{Event, EventId};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors raised by an event store.
///
/// Search and update never produce these themselves; they pass them through
/// to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Query or connection failure in the backing database.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored record could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The backing storage cannot be reached.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Boxed future returned by [`EventRepository`] methods.
pub type RepositoryFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, RepositoryError>> + Send + 'a>>;

/// Persistent record store for events.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a single instance is shared by all
/// requests. The store is the only shared state, and concurrent writes to the
/// same event are resolved by the store (last write wins).
///
/// # Dyn Compatibility
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of `async fn`
/// so it can be held as `Arc<dyn EventRepository>`.
pub trait EventRepository: Send + Sync {
    /// Load every stored event.
    ///
    /// The order is stable within one call. It is implementation-defined
    /// across calls.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage fails.
    fn find_all(&self) -> RepositoryFuture<'_, Vec<Event>>;

    /// Load one event by identifier, `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage fails.
    fn find_by_id(&self, id: EventId) -> RepositoryFuture<'_, Option<Event>>;

    /// Delete one event by identifier.
    ///
    /// Deleting an identifier that does not exist is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage fails.
    fn delete_by_id(&self, id: EventId) -> RepositoryFuture<'_, ()>;

    /// Insert or replace an event, returning the persisted form.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage fails.
    fn save(&self, event: Event) -> RepositoryFuture<'_, Event>;
}
