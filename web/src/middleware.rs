//! Axum middleware for request tracking and observability.
//!
//! This module provides the layers every Setlist router is wrapped in:
//! - **Request ID**: take the `x-request-id` header or generate a UUID, and echo it back
//! - **Tracing**: one span per request carrying the request id, method and URI
//! - **CORS**: permissive, so the single-page front end can call the API
//!
//! # Example
//!
//! ```ignore
//! use axum::{routing::get, Router};
//! use setlist_web::middleware::with_http_layers;
//!
//! let app = with_http_layers(Router::new().route("/api/events", get(list_events)));
//! ```

use axum::{
    http::{HeaderName, Request},
    Router,
};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{MakeSpan, TraceLayer},
};
use tracing::Span;

/// Header name for the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Layer that sets `x-request-id` on incoming requests that lack one.
#[must_use]
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(HeaderName::from_static(REQUEST_ID_HEADER), MakeRequestUuid)
}

/// Layer that copies the request's `x-request-id` onto the response.
#[must_use]
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(REQUEST_ID_HEADER))
}

/// Span factory recording the request id alongside method and URI.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "http_request",
            request_id = %request_id,
            method = %request.method(),
            uri = %request.uri(),
        )
    }
}

/// HTTP trace layer using [`RequestSpan`].
#[must_use]
pub fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan> {
    TraceLayer::new_for_http().make_span_with(RequestSpan)
}

/// Wrap `router` in the request id, tracing and CORS layers.
///
/// Request order: CORS, set request id, trace, propagate request id, handler.
pub fn with_http_layers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(set_request_id_layer())
        .layer(CorsLayer::permissive())
}
