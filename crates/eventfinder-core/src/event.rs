//! Canonical event types.
//!
//! Every provider's payload ends up as an [`Event`]. All fields are always
//! present after normalization (possibly empty), so consumers never need to
//! check for missing values.

use serde::{Deserialize, Serialize};

/// Price information for an event.
///
/// Each part is optional; a price range with no parts serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lowest ticket price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Highest ticket price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// ISO currency code (e.g. "USD").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl PriceRange {
    /// Creates a complete price range.
    pub fn new(min: f64, max: f64, currency: impl Into<String>) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            currency: Some(currency.into()),
        }
    }

    /// Returns true if no part of the range is known.
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.currency.is_none()
    }
}

/// A provider-agnostic event record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Provider-specific identifier.
    pub id: String,
    /// Event title.
    pub name: String,
    /// Link to the event page.
    pub url: String,
    /// Event date, as reported by the provider.
    pub date: String,
    /// Event start time, as reported by the provider.
    pub time: String,
    /// Human-readable location (e.g. "Los Angeles, CA").
    pub location: String,
    /// Venue name.
    pub venue: String,
    /// Image URL.
    pub image: String,
    /// Ticket price range.
    #[serde(rename = "priceRange")]
    pub price_range: PriceRange,
    /// Identifier of the provider that produced this event.
    pub provider: String,
}

impl Event {
    /// Creates an event with the given provider and name; other fields are empty.
    pub fn new(provider: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Builder: set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Builder: set the date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Builder: set the venue.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = venue.into();
        self
    }

    /// Builder: set the price range.
    pub fn with_price_range(mut self, price_range: PriceRange) -> Self {
        self.price_range = price_range;
        self
    }
}
