//! RawEvent to Event conversion.
//!
//! Normalization never fails. Missing fields are filled with defaults and the
//! provider tag is always set from the adapter identifier, whatever the raw
//! payload claims.

use eventfinder_core::{Event, PriceRange};

use crate::raw_event::{RawEvent, RawPriceRange};

/// Name given to events whose payload has no name.
pub const UNKNOWN_EVENT_NAME: &str = "Unknown Event";

/// Converts a [`RawEvent`] from `provider` into a canonical [`Event`].
pub fn normalize_event(provider: &str, raw: &RawEvent) -> Event {
    Event {
        id: text(&raw.id),
        name: raw
            .name
            .clone()
            .unwrap_or_else(|| UNKNOWN_EVENT_NAME.to_string()),
        url: text(&raw.url),
        date: text(&raw.date),
        time: text(&raw.time),
        location: text(&raw.location),
        venue: text(&raw.venue),
        image: text(&raw.image),
        price_range: raw
            .price_range
            .as_ref()
            .map(convert_price_range)
            .unwrap_or_default(),
        provider: provider.to_string(),
    }
}

/// Normalizes every event of one provider call.
pub fn normalize_events(provider: &str, raw_events: &[RawEvent]) -> Vec<Event> {
    raw_events
        .iter()
        .map(|raw| normalize_event(provider, raw))
        .collect()
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn convert_price_range(raw: &RawPriceRange) -> PriceRange {
    PriceRange {
        min: raw.min,
        max: raw.max,
        currency: raw.currency.clone(),
    }
}
