//! Cross-provider event deduplication.
//!
//! Two events are the same when their name, date and venue match after
//! trimming and lowercasing. Events with none of those three fields fall back
//! to their identifier, so anonymous events with distinct ids survive while
//! anonymous events without an id collapse into one.

use std::collections::HashSet;

use crate::event::Event;

/// Identity of an event for deduplication purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey(String, String, String);

impl DedupKey {
    /// Computes the key for an event.
    pub fn of(event: &Event) -> Self {
        let key = Self(
            fold(&event.name),
            fold(&event.date),
            fold(&event.venue),
        );

        if key.0.is_empty() && key.1.is_empty() && key.2.is_empty() {
            Self(fold(&event.id), String::new(), String::new())
        } else {
            key
        }
    }
}

fn fold(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Removes duplicate events, keeping the first occurrence and the input order.
pub fn dedupe_events(events: Vec<Event>) -> Vec<Event> {
    let mut seen = HashSet::with_capacity(events.len());
    events
        .into_iter()
        .filter(|event| seen.insert(DedupKey::of(event)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(provider: &str, name: &str, date: &str, venue: &str) -> Event {
        Event::new(provider, name).with_date(date).with_venue(venue)
    }

    #[test]
    fn case_and_whitespace_insensitive() {
        let events = vec![
            event("eventbrite", "Jazz Night", "2026-01-01", "The Hall"),
            event("ticketmaster", "jazz night ", " 2026-01-01", "the hall"),
        ];

        let deduped = dedupe_events(events);

        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].provider, "eventbrite");
        assert_eq!(deduped[0].name, "Jazz Night");
    }

    #[test]
    fn preserves_first_seen_order() {
        let events = vec![
            event("a", "One", "2026-01-01", "X"),
            event("a", "Two", "2026-01-02", "X"),
            event("b", "ONE", "2026-01-01", "x"),
            event("b", "Three", "2026-01-03", "Y"),
        ];

        let names: Vec<_> = dedupe_events(events)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn different_dates_are_distinct() {
        let events = vec![
            event("a", "Jazz Night", "2026-01-01", "The Hall"),
            event("a", "Jazz Night", "2026-01-08", "The Hall"),
        ];
        assert_eq!(dedupe_events(events).len(), 2);
    }

    #[test]
    fn anonymous_events_fall_back_to_id() {
        let events = vec![
            Event::new("a", "").with_id("x-1"),
            Event::new("a", "").with_id("X-1 "),
            Event::new("b", "").with_id("x-2"),
        ];

        let deduped = dedupe_events(events);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].id, "x-1");
        assert_eq!(deduped[1].id, "x-2");
    }

    #[test]
    fn anonymous_events_without_id_collapse() {
        let events = vec![Event::new("a", ""), Event::new("b", "  ")];

        let deduped = dedupe_events(events);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].provider, "a");
    }

    #[test]
    fn id_key_can_match_name_only_event() {
        // The id fallback occupies the name slot of the key.
        let events = vec![
            Event::new("a", "").with_id("gala"),
            Event::new("b", "gala"),
        ];
        assert_eq!(dedupe_events(events).len(), 1);
    }

    #[test]
    fn idempotent() {
        let events = vec![
            event("a", "Jazz Night", "2026-01-01", "The Hall"),
            event("b", "JAZZ NIGHT", "2026-01-01", "The Hall"),
            Event::new("c", "").with_id("1"),
            Event::new("c", ""),
            Event::new("d", ""),
            event("e", "Open Mic", "", ""),
        ];

        let once = dedupe_events(events);
        let twice = dedupe_events(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 4);
    }
}
