//! Partial updates of stored events.

use crate::model::{Event, EventId, EventPatch};
use crate::repository::{EventRepository, RepositoryError};

/// Outcome of [`apply_update`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The event existed; the merged record was saved.
    Applied(Event),
    /// No event with that identifier; nothing was written.
    Missing,
}

/// Merge `patch` into `event` in place.
///
/// Only the rating and the comment are touched, and only when the patch
/// carries a value for them.
///
/// # Examples
///
/// ```
/// use setlist_core::model::{Event, EventId, EventPatch};
/// use setlist_core::update::apply_patch;
///
/// let mut event = Event::new(EventId::new(1), "Festival")
///     .with_nb_stars(3)
///     .with_comment("Old comment");
///
/// apply_patch(&mut event, &EventPatch { nb_stars: Some(5), comment: None });
///
/// assert_eq!(event.nb_stars, Some(5));
/// assert_eq!(event.comment.as_deref(), Some("Old comment"));
/// ```
pub fn apply_patch(event: &mut Event, patch: &EventPatch) {
    if let Some(nb_stars) = patch.nb_stars {
        event.nb_stars = Some(nb_stars);
    }
    if let Some(comment) = &patch.comment {
        event.comment = Some(comment.clone());
    }
}

/// Load the event `id`, merge `patch` into it and save it back.
///
/// When the event does not exist nothing is written and no error is raised.
/// When it exists the merged record is saved exactly once, even if the patch
/// is empty.
///
/// # Errors
///
/// Returns the repository error unchanged if the lookup or the save fails.
pub async fn apply_update<R>(
    repository: &R,
    id: EventId,
    patch: &EventPatch,
) -> Result<UpdateOutcome, RepositoryError>
where
    R: EventRepository + ?Sized,
{
    let Some(mut event) = repository.find_by_id(id).await? else {
        tracing::debug!(event_id = %id, "No event to update");
        return Ok(UpdateOutcome::Missing);
    };

    apply_patch(&mut event, patch);
    let saved = repository.save(event).await?;

    tracing::debug!(event_id = %id, "Event updated");
    Ok(UpdateOutcome::Applied(saved))
}
