//! Event, band and member records.
//!
//! This module defines the records held by the event store and returned over
//! HTTP. An [`Event`] owns its [`Band`]s, and a band owns its [`Member`]s.
//! Neither bands nor members carry an identifier of their own.
//!
//! # Absent collections
//!
//! Both `Event::bands` and `Band::members` are `Option`s. `None` means the
//! collection is absent (serialized as `null`), which is distinct from an
//! empty collection. Search treats absent collections as "no match" and
//! annotation treats them as a count of zero.
//!
//! # Shared member data
//!
//! Members are held behind an [`Arc`] so that the annotated copy of a band
//! produced by search shares the member data of the stored band instead of
//! copying it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of a stored event.
///
/// Assigned by the store and never changed afterwards.
///
/// # Examples
///
/// ```
/// use setlist_core::model::EventId;
///
/// let id = EventId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Create a new `EventId`.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw identifier value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for EventId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named individual playing in a band.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member name, if known.
    pub name: Option<String>,
}

impl Member {
    /// Create a member with a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Create a member without a name.
    #[must_use]
    pub const fn unnamed() -> Self {
        Self { name: None }
    }
}

/// A named group performing at an event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    /// Band name.
    pub name: String,
    /// Band members, `None` when the collection is absent.
    pub members: Option<Arc<[Member]>>,
}

impl Band {
    /// Create a band with the given members.
    ///
    /// # Examples
    ///
    /// ```
    /// use setlist_core::model::{Band, Member};
    ///
    /// let band = Band::new("Metallica", [Member::named("Queen Anika Walsh")]);
    /// assert_eq!(band.member_count(), 1);
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, members: impl IntoIterator<Item = Member>) -> Self {
        Self {
            name: name.into(),
            members: Some(members.into_iter().collect()),
        }
    }

    /// Create a band whose member collection is absent.
    #[must_use]
    pub fn without_members(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: None,
        }
    }

    /// Number of members, zero when the collection is absent.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.as_ref().map_or(0, |members| members.len())
    }
}

/// A concert with its line-up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Store-assigned identifier.
    pub id: EventId,
    /// Display title.
    pub title: String,
    /// Poster image URL.
    pub img_url: Option<String>,
    /// Star rating given by the user.
    pub nb_stars: Option<i32>,
    /// Free-text comment given by the user.
    pub comment: Option<String>,
    /// Bands on the bill, `None` when the collection is absent.
    pub bands: Option<Vec<Band>>,
}

impl Event {
    /// Create an event with no rating, comment, image or bands.
    #[must_use]
    pub fn new(id: EventId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            img_url: None,
            nb_stars: None,
            comment: None,
            bands: None,
        }
    }

    /// Set the bands of this event.
    #[must_use]
    pub fn with_bands(mut self, bands: impl IntoIterator<Item = Band>) -> Self {
        self.bands = Some(bands.into_iter().collect());
        self
    }

    /// Set the poster image URL of this event.
    #[must_use]
    pub fn with_img_url(mut self, img_url: impl Into<String>) -> Self {
        self.img_url = Some(img_url.into());
        self
    }

    /// Set the star rating of this event.
    #[must_use]
    pub const fn with_nb_stars(mut self, nb_stars: i32) -> Self {
        self.nb_stars = Some(nb_stars);
        self
    }

    /// Set the comment of this event.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Number of bands, zero when the collection is absent.
    #[must_use]
    pub fn band_count(&self) -> usize {
        self.bands.as_ref().map_or(0, Vec::len)
    }
}

/// Partial update of an event.
///
/// Only the rating and the comment can be changed. Any other field present in
/// an incoming JSON payload is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    /// New star rating, left unchanged when `None`.
    pub nb_stars: Option<i32>,
    /// New comment, left unchanged when `None`.
    pub comment: Option<String>,
}
