//! Member-name search over the event catalogue.
//!
//! Search is a pure transformation: it reads the full collection returned by
//! the store, keeps the events that have a member whose name contains the
//! query (case-insensitive) and returns annotated copies of them.
//!
//! # Annotation
//!
//! Every returned event is a fresh value:
//!
//! - its title is suffixed with ` [N]`, N being the number of bands
//! - each band name is suffixed with ` [M]`, M being the number of members
//! - member data is shared with the source band, not copied
//!
//! The input slice is only borrowed, so the stored records cannot be changed.
//!
//! # Example
//!
//! ```
//! use setlist_core::model::{Band, Event, EventId, Member};
//! use setlist_core::query;
//!
//! let events = vec![
//!     Event::new(EventId::new(1), "GrasPop Metal Meeting")
//!         .with_bands([Band::new("Metallica", [Member::named("Queen Anika Walsh")])]),
//!     Event::new(EventId::new(2), "Other Event")
//!         .with_bands([Band::new("Other Band", [Member::named("John Doe")])]),
//! ];
//!
//! let found = query::search(&events, Some("Wa"));
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].title, "GrasPop Metal Meeting [1]");
//! assert_eq!(events[0].title, "GrasPop Metal Meeting");
//! ```

use crate::model::{Band, Event};

/// Return the store's collection as-is, without annotation.
#[must_use]
pub fn list_all(events: Vec<Event>) -> Vec<Event> {
    events
}

/// Find events with a member whose name contains `query`, annotated with counts.
///
/// Matching ignores case and is evaluated against the original records.
/// The result keeps the relative order of `events`.
///
/// - `None` matches nothing.
/// - `Some("")` matches every event with at least one named member.
#[must_use]
pub fn search(events: &[Event], query: Option<&str>) -> Vec<Event> {
    let Some(query) = query else {
        return Vec::new();
    };
    let needle = query.to_lowercase();

    events
        .iter()
        .filter(|event| contains_member(event, &needle))
        .map(annotate)
        .collect()
}

/// Whether `event` has a member whose lowercased name contains `needle`.
///
/// Absent band or member collections and unnamed members never match.
fn contains_member(event: &Event, needle: &str) -> bool {
    let Some(bands) = &event.bands else {
        return false;
    };

    bands
        .iter()
        .filter_map(|band| band.members.as_deref())
        .flatten()
        .filter_map(|member| member.name.as_deref())
        .any(|name| name.to_lowercase().contains(needle))
}

/// Build an annotated copy of `event`.
///
/// The title gets a ` [N]` suffix with the band count and every band name a
/// ` [M]` suffix with its member count. Absent collections count as zero; an
/// event without bands keeps `bands` absent in the copy.
///
/// # Examples
///
/// ```
/// use setlist_core::model::{Event, EventId};
/// use setlist_core::query::annotate;
///
/// let copy = annotate(&Event::new(EventId::new(9), "Unbooked"));
/// assert_eq!(copy.title, "Unbooked [0]");
/// assert!(copy.bands.is_none());
/// ```
#[must_use]
pub fn annotate(event: &Event) -> Event {
    Event {
        id: event.id,
        title: with_count(&event.title, event.band_count()),
        img_url: event.img_url.clone(),
        nb_stars: event.nb_stars,
        comment: event.comment.clone(),
        bands: event
            .bands
            .as_ref()
            .map(|bands| bands.iter().map(annotate_band).collect()),
    }
}

fn annotate_band(band: &Band) -> Band {
    Band {
        name: with_count(&band.name, band.member_count()),
        members: band.members.clone(),
    }
}

fn with_count(label: &str, count: usize) -> String {
    format!("{label} [{count}]")
}
