//! In-memory event stores
//!
//! Provides fast, deterministic stand-ins for the Postgres store:
//! - [`InMemoryEventRepository`]: `BTreeMap`-based store with call counters
//! - [`FailingEventRepository`]: store whose every call fails

use setlist_core::model::{Event, EventId};
use setlist_core::repository::{EventRepository, RepositoryError, RepositoryFuture};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Number of calls made to each store operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallCounts {
    /// Calls to `find_all`.
    pub find_all: usize,
    /// Calls to `find_by_id`.
    pub find_by_id: usize,
    /// Calls to `delete_by_id`.
    pub delete_by_id: usize,
    /// Calls to `save`.
    pub save: usize,
}

#[derive(Debug, Default)]
struct Counters {
    find_all: AtomicUsize,
    find_by_id: AtomicUsize,
    delete_by_id: AtomicUsize,
    save: AtomicUsize,
}

/// In-memory event store for fast, deterministic testing.
///
/// Events are kept ordered by identifier, so `find_all` returns them in
/// ascending id order. Every operation is counted, which lets tests assert
/// that an update saved exactly once or not at all.
///
/// Clones share the same data and counters.
///
/// # Example
///
/// ```
/// use setlist_core::model::{Event, EventId};
/// use setlist_core::repository::EventRepository;
/// use setlist_testing::InMemoryEventRepository;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repository = InMemoryEventRepository::with_events([
///     Event::new(EventId::new(1), "Hellfest"),
/// ]);
///
/// let found = repository.find_by_id(EventId::new(1)).await?;
/// assert!(found.is_some());
/// assert_eq!(repository.calls().find_by_id, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<BTreeMap<EventId, Event>>>,
    counters: Arc<Counters>,
}

impl InMemoryEventRepository {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `events`
    ///
    /// A later event with the same id replaces an earlier one.
    #[must_use]
    pub fn with_events(events: impl IntoIterator<Item = Event>) -> Self {
        let events = events.into_iter().map(|event| (event.id, event)).collect();
        Self {
            events: Arc::new(RwLock::new(events)),
            counters: Arc::default(),
        }
    }

    /// Snapshot of the stored event `id`, read without counting a call
    #[must_use]
    pub fn get(&self, id: EventId) -> Option<Event> {
        self.events
            .read()
            .ok()
            .and_then(|events| events.get(&id).cloned())
    }

    /// Number of stored events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().map_or(0, |events| events.len())
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls made so far to each operation
    #[must_use]
    pub fn calls(&self) -> CallCounts {
        CallCounts {
            find_all: self.counters.find_all.load(Ordering::SeqCst),
            find_by_id: self.counters.find_by_id.load(Ordering::SeqCst),
            delete_by_id: self.counters.delete_by_id.load(Ordering::SeqCst),
            save: self.counters.save.load(Ordering::SeqCst),
        }
    }

    fn poisoned() -> RepositoryError {
        RepositoryError::Unavailable("in-memory store lock poisoned".to_string())
    }
}

impl EventRepository for InMemoryEventRepository {
    fn find_all(&self) -> RepositoryFuture<'_, Vec<Event>> {
        self.counters.find_all.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            let events = self.events.read().map_err(|_| Self::poisoned())?;
            Ok(events.values().cloned().collect())
        })
    }

    fn find_by_id(&self, id: EventId) -> RepositoryFuture<'_, Option<Event>> {
        self.counters.find_by_id.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            let events = self.events.read().map_err(|_| Self::poisoned())?;
            Ok(events.get(&id).cloned())
        })
    }

    fn delete_by_id(&self, id: EventId) -> RepositoryFuture<'_, ()> {
        self.counters.delete_by_id.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            let mut events = self.events.write().map_err(|_| Self::poisoned())?;
            if events.remove(&id).is_none() {
                tracing::trace!(event_id = %id, "Delete of missing event ignored");
            }
            Ok(())
        })
    }

    fn save(&self, event: Event) -> RepositoryFuture<'_, Event> {
        self.counters.save.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            let mut events = self.events.write().map_err(|_| Self::poisoned())?;
            events.insert(event.id, event.clone());
            Ok(event)
        })
    }
}

/// Event store whose every operation fails with [`RepositoryError::Unavailable`].
///
/// Used to check that store faults reach the caller unchanged.
#[derive(Clone, Debug)]
pub struct FailingEventRepository {
    reason: String,
}

impl FailingEventRepository {
    /// Create a failing store reporting `reason`
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The error every operation returns
    #[must_use]
    pub fn error(&self) -> RepositoryError {
        RepositoryError::Unavailable(self.reason.clone())
    }
}

impl Default for FailingEventRepository {
    fn default() -> Self {
        Self::new("storage offline")
    }
}

impl EventRepository for FailingEventRepository {
    fn find_all(&self) -> RepositoryFuture<'_, Vec<Event>> {
        Box::pin(async move { Err(self.error()) })
    }

    fn find_by_id(&self, _id: EventId) -> RepositoryFuture<'_, Option<Event>> {
        Box::pin(async move { Err(self.error()) })
    }

    fn delete_by_id(&self, _id: EventId) -> RepositoryFuture<'_, ()> {
        Box::pin(async move { Err(self.error()) })
    }

    fn save(&self, _event: Event) -> RepositoryFuture<'_, Event> {
        Box::pin(async move { Err(self.error()) })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_all_orders_by_id() {
        let repository = InMemoryEventRepository::with_events([
            Event::new(EventId::new(3), "c"),
            Event::new(EventId::new(1), "a"),
            Event::new(EventId::new(2), "b"),
        ]);

        let titles: Vec<_> = repository
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|event| event.title)
            .collect();

        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_save_upserts() {
        let repository = InMemoryEventRepository::new();

        repository
            .save(Event::new(EventId::new(1), "first"))
            .await
            .unwrap();
        repository
            .save(Event::new(EventId::new(1), "second"))
            .await
            .unwrap();

        assert_eq!(repository.len(), 1);
        assert_eq!(repository.get(EventId::new(1)).unwrap().title, "second");
        assert_eq!(repository.calls().save, 2);
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let repository = InMemoryEventRepository::with_events([Event::new(EventId::new(1), "a")]);

        repository.delete_by_id(EventId::new(99)).await.unwrap();
        repository.delete_by_id(EventId::new(1)).await.unwrap();
        repository.delete_by_id(EventId::new(1)).await.unwrap();

        assert!(repository.is_empty());
        assert_eq!(repository.calls().delete_by_id, 3);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repository = InMemoryEventRepository::new();
        let clone = repository.clone();

        clone.save(Event::new(EventId::new(5), "shared")).await.unwrap();

        assert!(repository.get(EventId::new(5)).is_some());
        assert_eq!(repository.calls().save, 1);
    }

    #[tokio::test]
    async fn test_failing_repository_fails_every_call() {
        let repository = FailingEventRepository::new("disk on fire");
        let expected = RepositoryError::Unavailable("disk on fire".to_string());

        assert_eq!(repository.find_all().await.unwrap_err(), expected);
        assert_eq!(
            repository.find_by_id(EventId::new(1)).await.unwrap_err(),
            expected
        );
        assert_eq!(
            repository.delete_by_id(EventId::new(1)).await.unwrap_err(),
            expected
        );
        assert_eq!(
            repository
                .save(Event::new(EventId::new(1), "x"))
                .await
                .unwrap_err(),
            expected
        );
    }
}
