//! Raw event type from event providers.
//!
//! A [`RawEvent`] is an event record as an adapter hands it over, before
//! normalization. Every field is optional: providers differ in what they
//! report, and a missing or `null` value is not an error. The normalizer
//! turns a raw event into a fully populated
//! [`Event`](eventfinder_core::Event).

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, ProviderResult};

/// Price information as reported by a provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPriceRange {
    /// Lowest price.
    #[serde(default)]
    pub min: Option<f64>,
    /// Highest price.
    #[serde(default)]
    pub max: Option<f64>,
    /// Currency code.
    #[serde(default)]
    pub currency: Option<String>,
}

/// A provider-native event record.
///
/// The JSON form uses the same keys as the canonical event (`priceRange` in
/// camel case), so adapters that already speak that shape can deserialize
/// straight into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEvent {
    /// Provider-specific identifier.
    pub id: Option<String>,
    /// Event title.
    pub name: Option<String>,
    /// Event page URL.
    pub url: Option<String>,
    /// Event date.
    pub date: Option<String>,
    /// Start time.
    pub time: Option<String>,
    /// Human-readable location.
    pub location: Option<String>,
    /// Venue name.
    pub venue: Option<String>,
    /// Image URL.
    pub image: Option<String>,
    /// Ticket prices.
    #[serde(rename = "priceRange")]
    pub price_range: Option<RawPriceRange>,
    /// Provider tag claimed by the payload. Never trusted; the normalizer
    /// overwrites it with the adapter identifier.
    pub provider: Option<String>,
}

impl RawEvent {
    /// Creates an empty raw event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw event from a JSON value.
    pub fn from_json(value: serde_json::Value) -> ProviderResult<Self> {
        serde_json::from_value(value).map_err(|e| {
            ProviderError::invalid_response(format!("malformed event record: {}", e))
                .with_source(e)
        })
    }

    /// Builder: set the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder: set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: set the URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Builder: set the date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Builder: set the start time.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Builder: set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder: set the venue.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    /// Builder: set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Builder: set the price range.
    pub fn with_price_range(mut self, price_range: RawPriceRange) -> Self {
        self.price_range = Some(price_range);
        self
    }

    /// Builder: set the claimed provider.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }
}
