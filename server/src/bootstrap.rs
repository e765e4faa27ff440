//! Event store construction from configuration.

use crate::config::{StoreBackend, StoreConfig};
use setlist_core::{EventRepository, RepositoryError};
use setlist_postgres::PostgresEventRepository;
use setlist_testing::{fixtures, InMemoryEventRepository};
use std::sync::Arc;

/// Build the event store selected by `config`.
///
/// The `PostgreSQL` store is connected and migrated before it is returned.
/// The in-memory store starts empty unless `seed_demo_data` is set.
///
/// # Errors
///
/// Returns [`RepositoryError::Unavailable`] if the database cannot be reached,
/// or the migration error if the schema cannot be brought up to date.
pub async fn build_repository(
    config: &StoreConfig,
) -> Result<Arc<dyn EventRepository>, RepositoryError> {
    match config.backend {
        StoreBackend::Postgres => {
            tracing::info!(
                max_connections = config.max_connections,
                "Connecting to event store database..."
            );
            let repository = PostgresEventRepository::connect(
                &config.database_url,
                config.max_connections,
                config.connect_timeout(),
            )
            .await?;
            repository.migrate().await?;
            tracing::info!("Event store connected and migrated");
            Ok(Arc::new(repository))
        }
        StoreBackend::Memory => {
            let repository = if config.seed_demo_data {
                let events = fixtures::demo_catalogue();
                tracing::info!(count = events.len(), "Seeding in-memory store with demo events");
                InMemoryEventRepository::with_events(events)
            } else {
                InMemoryEventRepository::new()
            };
            tracing::warn!("Using in-memory event store, data is lost on restart");
            Ok(Arc::new(repository))
        }
    }
}
