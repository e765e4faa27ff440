//! `PostgreSQL` event store for Setlist.
//!
//! This crate provides a `PostgreSQL`-backed implementation of the
//! [`EventRepository`] trait from `setlist-core`. It uses sqlx and supports:
//!
//! - Event persistence with bands stored inline as JSONB
//! - Upsert on save (last write wins)
//! - Connection pooling
//! - Embedded migrations
//!
//! # Example
//!
//! ```no_run
//! use setlist_postgres::PostgresEventRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repository = PostgresEventRepository::new("postgres://localhost/setlist").await?;
//!     repository.migrate().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use setlist_core::model::{Band, Event, EventId};
use setlist_core::repository::{EventRepository, RepositoryError, RepositoryFuture};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;

const SELECT_EVENTS: &str = "SELECT id, title, img_url, nb_stars, comment, bands FROM events";

/// `PostgreSQL`-backed event store.
///
/// Events live in the `events` table. The band collection of an event,
/// members included, is stored as a single JSONB value (`NULL` when absent).
#[derive(Clone, Debug)]
pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    /// Connect to `database_url` with default pool settings.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Unavailable`] if the database cannot be reached.
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;
        Ok(Self::from_pool(pool))
    }

    /// Connect to `database_url` with an explicit pool size and connect timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Unavailable`] if the database cannot be reached.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        connect_timeout: Duration,
    ) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(connect_timeout)
            .connect(database_url)
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;

        tracing::info!(max_connections, "Connected to event database");
        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run the embedded database migrations.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Database`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(format!("Migration failed: {e}")))?;
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<Event>, RepositoryError> {
        let rows = sqlx::query(&format!("{SELECT_EVENTS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| storage_error("find_all", &e))?;

        rows.iter()
            .map(event_from_row)
            .collect::<Result<_, _>>()
            .map_err(|e| storage_error("find_all", &e))
    }

    async fn load_one(&self, id: EventId) -> Result<Option<Event>, RepositoryError> {
        let row = sqlx::query(&format!("{SELECT_EVENTS} WHERE id = $1"))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("find_by_id", &e))?;

        row.as_ref()
            .map(event_from_row)
            .transpose()
            .map_err(|e| storage_error("find_by_id", &e))
    }

    async fn remove(&self, id: EventId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete_by_id", &e))?;

        tracing::debug!(
            event_id = %id,
            deleted = result.rows_affected(),
            "Delete executed"
        );
        Ok(())
    }

    async fn upsert(&self, event: Event) -> Result<Event, RepositoryError> {
        let row = sqlx::query(
            r"
            INSERT INTO events (id, title, img_url, nb_stars, comment, bands, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                img_url = EXCLUDED.img_url,
                nb_stars = EXCLUDED.nb_stars,
                comment = EXCLUDED.comment,
                bands = EXCLUDED.bands,
                updated_at = EXCLUDED.updated_at
            RETURNING id, title, img_url, nb_stars, comment, bands
            ",
        )
        .bind(event.id.value())
        .bind(&event.title)
        .bind(&event.img_url)
        .bind(event.nb_stars)
        .bind(&event.comment)
        .bind(event.bands.as_ref().map(Json))
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("save", &e))?;

        event_from_row(&row).map_err(|e| storage_error("save", &e))
    }
}

impl EventRepository for PostgresEventRepository {
    fn find_all(&self) -> RepositoryFuture<'_, Vec<Event>> {
        Box::pin(self.load_all())
    }

    fn find_by_id(&self, id: EventId) -> RepositoryFuture<'_, Option<Event>> {
        Box::pin(self.load_one(id))
    }

    fn delete_by_id(&self, id: EventId) -> RepositoryFuture<'_, ()> {
        Box::pin(self.remove(id))
    }

    fn save(&self, event: Event) -> RepositoryFuture<'_, Event> {
        Box::pin(self.upsert(event))
    }
}

fn event_from_row(row: &PgRow) -> Result<Event, sqlx::Error> {
    let bands: Option<Json<Vec<Band>>> = row.try_get("bands")?;

    Ok(Event {
        id: EventId::new(row.try_get("id")?),
        title: row.try_get("title")?,
        img_url: row.try_get("img_url")?,
        nb_stars: row.try_get("nb_stars")?,
        comment: row.try_get("comment")?,
        bands: bands.map(|Json(bands)| bands),
    })
}

fn storage_error(operation: &'static str, error: &sqlx::Error) -> RepositoryError {
    metrics::counter!("setlist_store_errors_total", "operation" => operation).increment(1);
    tracing::error!(operation, error = %error, "Event store operation failed");

    match error {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::Unavailable(error.to_string())
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            RepositoryError::Serialization(error.to_string())
        }
        _ => RepositoryError::Database(error.to_string()),
    }
}
