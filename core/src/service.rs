//! Event operations exposed to the HTTP layer.
//!
//! [`EventService`] wires the pure search and update logic to an injected
//! [`EventRepository`]. It holds no state of its own besides the repository
//! handle, so it is cheap to clone and share across requests.

use crate::model::{Event, EventId, EventPatch};
use crate::query;
use crate::repository::{EventRepository, RepositoryError};
use crate::update::{self, UpdateOutcome};
use std::sync::Arc;

/// Event operations backed by an event store.
///
/// # Example
///
/// ```no_run
/// use setlist_core::repository::EventRepository;
/// use setlist_core::service::EventService;
/// use std::sync::Arc;
///
/// # async fn example(repository: Arc<dyn EventRepository>) -> Result<(), Box<dyn std::error::Error>> {
/// let service = EventService::new(repository);
/// let found = service.search_events(Some("walsh")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct EventService {
    repository: Arc<dyn EventRepository>,
}

impl EventService {
    /// Create a service on top of `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    /// Every stored event, unannotated.
    ///
    /// # Errors
    ///
    /// Returns the repository error if the store cannot be read.
    #[tracing::instrument(skip(self))]
    pub async fn list_events(&self) -> Result<Vec<Event>, RepositoryError> {
        let events = self.repository.find_all().await.inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to load events");
        })?;

        tracing::debug!(count = events.len(), "Listed events");
        Ok(query::list_all(events))
    }

    /// Events with a member whose name contains `query`, annotated with counts.
    ///
    /// # Errors
    ///
    /// Returns the repository error if the store cannot be read.
    #[tracing::instrument(skip(self))]
    pub async fn search_events(&self, query: Option<&str>) -> Result<Vec<Event>, RepositoryError> {
        let events = self.repository.find_all().await.inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to load events for search");
        })?;

        let found = query::search(&events, query);
        tracing::debug!(scanned = events.len(), matched = found.len(), "Searched events");
        Ok(found)
    }

    /// Delete the event `id`; deleting a missing event is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the repository error if the delete fails.
    #[tracing::instrument(skip(self))]
    pub async fn delete_event(&self, id: EventId) -> Result<(), RepositoryError> {
        self.repository.delete_by_id(id).await.inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to delete event");
        })?;

        tracing::info!(event_id = %id, "Event deleted");
        Ok(())
    }

    /// Merge the rating and comment of `patch` into the event `id`.
    ///
    /// A missing event is left missing and reported as [`UpdateOutcome::Missing`].
    ///
    /// # Errors
    ///
    /// Returns the repository error if the lookup or the save fails.
    #[tracing::instrument(skip(self))]
    pub async fn update_event(
        &self,
        id: EventId,
        patch: &EventPatch,
    ) -> Result<UpdateOutcome, RepositoryError> {
        let outcome = update::apply_update(self.repository.as_ref(), id, patch)
            .await
            .inspect_err(|e| {
                tracing::warn!(error = %e, "Failed to update event");
            })?;

        if matches!(outcome, UpdateOutcome::Applied(_)) {
            tracing::info!(event_id = %id, "Event rating updated");
        }
        Ok(outcome)
    }
}
