//! HTTP API tests against the in-memory and failing stores.

#![allow(clippy::unwrap_used)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use setlist_core::{EventId, EventRepository};
use setlist_server::{build_router, AppState};
use setlist_testing::{fixtures, FailingEventRepository, InMemoryEventRepository};
use std::sync::Arc;
use tower::ServiceExt;

fn app(repository: InMemoryEventRepository) -> Router {
    build_router(AppState::new(Arc::new(repository)))
}

fn failing_app(repository: FailingEventRepository) -> Router {
    build_router(AppState::new(Arc::new(repository)))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn put_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let response = app(InMemoryEventRepository::new())
        .oneshot(get("/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_readiness_reports_event_count() {
    let repository = InMemoryEventRepository::with_events(fixtures::walsh_and_doe());

    let response = app(repository.clone()).oneshot(get("/ready")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"ready": true, "events": 2}));
    assert_eq!(repository.calls().find_all, 1);
}

#[tokio::test]
async fn test_readiness_fails_when_store_is_down() {
    let response = failing_app(FailingEventRepository::default())
        .oneshot(get("/ready"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(response).await, json!({"ready": false}));
}

#[tokio::test]
async fn test_list_events_unannotated() {
    let repository = InMemoryEventRepository::with_events(fixtures::walsh_and_doe());

    let response = app(repository).oneshot(get("/api/events")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["title"], "GrasPop Metal Meeting");
    assert_eq!(events[0]["bands"][0]["name"], "Metallica");
}

#[tokio::test]
async fn test_list_events_trailing_slash() {
    let repository = InMemoryEventRepository::with_events(fixtures::walsh_and_doe());

    let response = app(repository).oneshot(get("/api/events/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_annotates_matches() {
    let repository = InMemoryEventRepository::with_events([fixtures::two_band_event()]);

    let response = app(repository.clone())
        .oneshot(get("/api/events/search/Walsh"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body,
        json!([{
            "id": 1,
            "title": "Rock Werchter [2]",
            "imgUrl": null,
            "nbStars": null,
            "comment": null,
            "bands": [
                {
                    "name": "Metallica [2]",
                    "members": [{"name": "Queen Anika Walsh"}, {"name": "Lars Ulrich"}]
                },
                {
                    "name": "Pink Floyd [1]",
                    "members": [{"name": "Nick Mason"}]
                }
            ]
        }])
    );

    // The stored record keeps its plain title
    let stored = repository.get(EventId::new(1)).unwrap();
    assert_eq!(stored.title, "Rock Werchter");
}

#[tokio::test]
async fn test_search_is_case_insensitive_and_filters() {
    let repository = InMemoryEventRepository::with_events(fixtures::walsh_and_doe());

    let response = app(repository)
        .oneshot(get("/api/events/search/wa"))
        .await
        .unwrap();

    let body = json_body(response).await;
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["id"], 1);
    assert_eq!(events[0]["title"], "GrasPop Metal Meeting [1]");
}

#[tokio::test]
async fn test_search_without_match_returns_empty_list() {
    let repository = InMemoryEventRepository::with_events(fixtures::walsh_and_doe());

    let response = app(repository)
        .oneshot(get("/api/events/search/nobody"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn test_search_invalid_utf8_is_bad_request() {
    let repository = InMemoryEventRepository::with_events(fixtures::walsh_and_doe());

    let response = app(repository.clone())
        .oneshot(get("/api/events/search/%FF"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "BAD_REQUEST");
    assert_eq!(repository.calls().find_all, 0);
}

#[tokio::test]
async fn test_delete_removes_event() {
    let repository = InMemoryEventRepository::with_events(fixtures::walsh_and_doe());

    let response = app(repository.clone())
        .oneshot(delete("/api/events/1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(repository.get(EventId::new(1)).is_none());
    assert_eq!(repository.len(), 1);
}

#[tokio::test]
async fn test_delete_unknown_id_is_ok() {
    let repository = InMemoryEventRepository::with_events(fixtures::walsh_and_doe());

    let response = app(repository.clone())
        .oneshot(delete("/api/events/42"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(repository.len(), 2);
}

#[tokio::test]
async fn test_delete_non_numeric_id_is_bad_request() {
    let repository = InMemoryEventRepository::with_events(fixtures::walsh_and_doe());

    let response = app(repository.clone())
        .oneshot(delete("/api/events/abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "BAD_REQUEST");
    assert_eq!(repository.calls().delete_by_id, 0);
}

#[tokio::test]
async fn test_update_merges_rating_and_comment_only() {
    let repository = InMemoryEventRepository::with_events(fixtures::walsh_and_doe());

    let response = app(repository.clone())
        .oneshot(put_json(
            "/api/events/1",
            &json!({"nbStars": 5, "comment": "Loud", "title": "Ignored"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let stored = repository.get(EventId::new(1)).unwrap();
    assert_eq!(stored.nb_stars, Some(5));
    assert_eq!(stored.comment.as_deref(), Some("Loud"));
    assert_eq!(stored.title, "GrasPop Metal Meeting");
    assert_eq!(stored.band_count(), 1);
}

#[tokio::test]
async fn test_update_keeps_fields_absent_from_body() {
    let events = fixtures::demo_catalogue();
    let repository = InMemoryEventRepository::with_events(events);

    let response = app(repository.clone())
        .oneshot(put_json("/api/events/1001", &json!({"nbStars": 2})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let stored = repository.get(EventId::new(1001)).unwrap();
    assert_eq!(stored.nb_stars, Some(2));
    assert_eq!(stored.comment.as_deref(), Some("Great line-up"));
}

#[tokio::test]
async fn test_update_unknown_id_writes_nothing() {
    let repository = InMemoryEventRepository::with_events(fixtures::walsh_and_doe());

    let response = app(repository.clone())
        .oneshot(put_json("/api/events/42", &json!({"nbStars": 5})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(repository.calls().save, 0);
    assert!(repository.get(EventId::new(42)).is_none());
}

#[tokio::test]
async fn test_update_malformed_body_is_bad_request() {
    let repository = InMemoryEventRepository::with_events(fixtures::walsh_and_doe());

    let request = Request::builder()
        .method(Method::PUT)
        .uri("/api/events/1")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app(repository.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(repository.calls().save, 0);
}

#[tokio::test]
async fn test_update_wrong_field_type_is_bad_request() {
    let repository = InMemoryEventRepository::with_events(fixtures::walsh_and_doe());

    let response = app(repository.clone())
        .oneshot(put_json("/api/events/1", &json!({"nbStars": "five"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "BAD_REQUEST");
    assert_eq!(repository.calls().save, 0);
    assert_eq!(repository.get(EventId::new(1)).unwrap().nb_stars, None);
}

#[tokio::test]
async fn test_update_without_content_type_is_bad_request() {
    let repository = InMemoryEventRepository::with_events(fixtures::walsh_and_doe());

    let request = Request::builder()
        .method(Method::PUT)
        .uri("/api/events/1")
        .body(Body::from(json!({"nbStars": 5}).to_string()))
        .unwrap();
    let response = app(repository.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "BAD_REQUEST");
    assert_eq!(repository.calls().save, 0);
}

#[tokio::test]
async fn test_store_outage_maps_to_service_unavailable() {
    let repository = FailingEventRepository::default();

    for request in [
        get("/api/events"),
        get("/api/events/search/walsh"),
        delete("/api/events/1"),
        put_json("/api/events/1", &json!({"nbStars": 1})),
    ] {
        let response = failing_app(repository.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(response).await;
        assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
        assert_eq!(body["message"], "Event storage is unavailable");
    }
}

#[tokio::test]
async fn test_router_shares_repository_across_requests() {
    let repository = InMemoryEventRepository::with_events(fixtures::walsh_and_doe());
    let router = app(repository.clone());

    router.clone().oneshot(delete("/api/events/2")).await.unwrap();
    let response = router.oneshot(get("/api/events")).await.unwrap();

    assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);
    assert_eq!(repository.find_all().await.unwrap().len(), 1);
}
