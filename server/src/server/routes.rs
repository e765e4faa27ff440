//! Router configuration for the Setlist server.

use super::health::{health_check, readiness_check};
use super::state::AppState;
use crate::api::events;
use axum::{
    routing::{get, put},
    Router,
};
use setlist_web::with_http_layers;

/// Build the complete Axum router.
///
/// Routes:
/// - `GET /health`
/// - `GET /ready`
/// - `GET /api/events` (also `/api/events/`)
/// - `GET /api/events/search/:query`
/// - `PUT /api/events/:id`
/// - `DELETE /api/events/:id`
///
/// Every route is wrapped in the request id, tracing and CORS layers.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/events", get(events::list_events))
        .route("/events/", get(events::list_events))
        .route("/events/search/:query", get(events::search_events))
        .route(
            "/events/:id",
            put(events::update_event).delete(events::delete_event),
        );

    let router = Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .nest("/api", api_routes)
        .with_state(state);

    with_http_layers(router)
}
