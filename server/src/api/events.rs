//! Event API handlers.
//!
//! - `GET /api/events` - Every event, unannotated
//! - `GET /api/events/search/:query` - Events with a matching member, annotated with counts
//! - `DELETE /api/events/:id` - Delete an event (idempotent)
//! - `PUT /api/events/:id` - Update an event's rating and comment

use crate::metrics;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use setlist_core::{Event, EventId, EventPatch, EventService, UpdateOutcome};
use setlist_web::{AppError, WebResult};

fn event_id(path: Result<Path<i64>, PathRejection>) -> WebResult<EventId> {
    let Path(id) = path?;
    Ok(EventId::new(id))
}

/// List every stored event.
///
/// # Errors
///
/// Returns 503 or 500 if the event store fails.
pub async fn list_events(State(service): State<EventService>) -> WebResult<Json<Vec<Event>>> {
    metrics::record_request("list");

    let events = service.list_events().await?;
    Ok(Json(events))
}

/// Search events by band member name.
///
/// Titles and band names in the response carry a `[count]` suffix.
///
/// # Errors
///
/// Returns 400 for a path that is not valid UTF-8, 503 or 500 if the event
/// store fails.
pub async fn search_events(
    State(service): State<EventService>,
    path: Result<Path<String>, PathRejection>,
) -> WebResult<Json<Vec<Event>>> {
    metrics::record_request("search");
    let Path(query) = path?;

    let found = service.search_events(Some(&query)).await?;
    metrics::record_search_results(found.len());

    tracing::info!(query = %query, matched = found.len(), "Search completed");
    Ok(Json(found))
}

/// Delete an event. Deleting an unknown id still returns 200.
///
/// # Errors
///
/// Returns 400 for a non-numeric id, 503 or 500 if the event store fails.
pub async fn delete_event(
    State(service): State<EventService>,
    path: Result<Path<i64>, PathRejection>,
) -> WebResult<StatusCode> {
    metrics::record_request("delete");
    let id = event_id(path)?;

    service.delete_event(id).await?;

    tracing::info!(event_id = %id, "Event deleted");
    Ok(StatusCode::OK)
}

/// Update an event's `nbStars` and `comment`; other body fields are ignored.
///
/// An unknown id is not an error: nothing is written and 200 is returned.
///
/// # Errors
///
/// Returns 400 for a non-numeric id or malformed body, 503 or 500 if the
/// event store fails.
pub async fn update_event(
    State(service): State<EventService>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<EventPatch>, JsonRejection>,
) -> WebResult<StatusCode> {
    metrics::record_request("update");
    let id = event_id(path)?;
    let Json(patch) = body.map_err(AppError::from)?;

    match service.update_event(id, &patch).await? {
        UpdateOutcome::Applied(event) => {
            metrics::record_update("applied");
            tracing::info!(event_id = %event.id, nb_stars = ?event.nb_stars, "Event updated");
        }
        UpdateOutcome::Missing => {
            metrics::record_update("missing");
            tracing::info!(event_id = %id, "Update skipped, event not found");
        }
    }

    Ok(StatusCode::OK)
}
