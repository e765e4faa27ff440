//! Liveness and readiness endpoints.
//!
//! `/health` answers as long as the process is up. `/ready` additionally
//! reads the event store, so a load balancer can hold traffic back while the
//! database is unreachable.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use setlist_core::EventService;

/// Liveness response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `"ok"`
    pub status: &'static str,
    /// Crate version of the running binary
    pub version: &'static str,
}

/// `GET /health`: 200 while the process runs. Never touches the store.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness response.
#[derive(Serialize)]
pub struct ReadinessResponse {
    /// Whether the server should receive traffic
    pub ready: bool,
    /// Number of stored events, absent when the store could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<usize>,
}

/// `GET /ready`: 200 when the event store answers a full read, 503 otherwise.
///
/// ```bash
/// curl http://localhost:8080/ready
/// # {"ready":true,"events":4}
/// ```
pub async fn readiness_check(
    State(service): State<EventService>,
) -> (StatusCode, Json<ReadinessResponse>) {
    match service.list_events().await {
        Ok(events) => (
            StatusCode::OK,
            Json(ReadinessResponse {
                ready: true,
                events: Some(events.len()),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse {
                    ready: false,
                    events: None,
                }),
            )
        }
    }
}
