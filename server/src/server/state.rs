//! Application state for the Setlist HTTP server.

use axum::extract::FromRef;
use setlist_core::{EventRepository, EventService};
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request; the clone only bumps the repository `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Event operations over the configured store
    pub events: EventService,
}

impl AppState {
    /// Create application state over `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self {
            events: EventService::new(repository),
        }
    }
}

/// Lets handlers extract `State<EventService>` directly.
impl FromRef<AppState> for EventService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.events.clone()
    }
}
