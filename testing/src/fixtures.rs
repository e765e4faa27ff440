//! Ready-made events for tests and demos.

use setlist_core::model::{Band, Event, EventId, Member};

/// Two events, only the first of which has a member matching "Wa".
///
/// - `1` "GrasPop Metal Meeting": Metallica with "Queen Anika Walsh"
/// - `2` "Other Event": Other Band with "John Doe"
#[must_use]
pub fn walsh_and_doe() -> Vec<Event> {
    vec![
        Event::new(EventId::new(1), "GrasPop Metal Meeting")
            .with_bands([Band::new("Metallica", [Member::named("Queen Anika Walsh")])]),
        Event::new(EventId::new(2), "Other Event")
            .with_bands([Band::new("Other Band", [Member::named("John Doe")])]),
    ]
}

/// One event with two bands of two and one members, "Walsh" in the first.
#[must_use]
pub fn two_band_event() -> Event {
    Event::new(EventId::new(1), "Rock Werchter").with_bands([
        Band::new(
            "Metallica",
            [Member::named("Queen Anika Walsh"), Member::named("Lars Ulrich")],
        ),
        Band::new("Pink Floyd", [Member::named("Nick Mason")]),
    ])
}

/// Demo catalogue used to seed an empty in-memory store.
#[must_use]
pub fn demo_catalogue() -> Vec<Event> {
    vec![
        Event::new(EventId::new(1000), "GrasPop Metal Meeting")
            .with_img_url("img/1000.jpeg")
            .with_bands([
                Band::new(
                    "Metallica",
                    [
                        Member::named("Queen Anika Walsh"),
                        Member::named("Queen Jody Hayes"),
                    ],
                ),
                Band::new("Pink Floyd", [Member::named("Queen Frankie Gross")]),
            ]),
        Event::new(EventId::new(1001), "Pinkpop Festival")
            .with_img_url("img/1001.jpeg")
            .with_nb_stars(4)
            .with_comment("Great line-up")
            .with_bands([
                Band::new(
                    "AC/DC",
                    [
                        Member::named("Queen Louise Perry"),
                        Member::named("Sir Ryan Walsh"),
                        Member::named("Lady Kelsey Pugh"),
                    ],
                ),
                Band::new("The Doors", [Member::named("Sir Jimmy Flynn")]),
            ]),
        Event::new(EventId::new(1002), "Hellfest Open Air")
            .with_img_url("img/1002.jpeg")
            .with_bands([Band::new(
                "Iron Maiden",
                [Member::named("Lady Abby Blackwell"), Member::named("Sir Otis Paul")],
            )]),
        Event::new(EventId::new(1003), "Les Eurockéennes")
            .with_img_url("img/1003.jpeg")
            .with_nb_stars(2)
            .with_bands([Band::new("Muse", [Member::named("Queen Bella Hooper")])]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalogue_ids_are_unique() {
        let mut ids: Vec<_> = demo_catalogue().iter().map(|event| event.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), demo_catalogue().len());
    }

    #[test]
    fn test_two_band_event_counts() {
        let event = two_band_event();
        let counts: Vec<_> = event
            .bands
            .iter()
            .flatten()
            .map(Band::member_count)
            .collect();
        assert_eq!(counts, vec![2, 1]);
    }
}
