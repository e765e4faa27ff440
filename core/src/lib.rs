//! # Setlist Core
//!
//! Event model, store contract, and the search and update logic of the Setlist
//! concert catalogue.
//!
//! ## Modules
//!
//! - [`model`]: events, bands, members and the partial update payload
//! - [`repository`]: the [`EventRepository`] store contract
//! - [`query`]: member-name search with count annotation (pure, no I/O)
//! - [`update`]: partial rating/comment updates
//! - [`service`]: [`EventService`], the operations used by the HTTP layer
//!
//! ## Data Flow
//!
//! ```text
//! search:  EventRepository::find_all ──► query::search ──► caller
//! update:  caller ──► update::apply_update ──► EventRepository::{find_by_id, save}
//! ```
//!
//! The two paths never interact. The store is the only shared state.

pub mod model;
pub mod query;
pub mod repository;
pub mod service;
pub mod update;

// Re-export commonly used types
pub use model::{Band, Event, EventId, EventPatch, Member};
pub use repository::{EventRepository, RepositoryError, RepositoryFuture};
pub use service::EventService;
pub use update::UpdateOutcome;
