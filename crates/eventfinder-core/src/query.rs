//! Event search query.
//!
//! A [`Query`] describes what the caller is looking for: a place (either a
//! free-form location or a coordinate pair), an optional date range, optional
//! event-type/category hints and optional price bounds.
//!
//! Date values are opaque tokens. They are passed through to providers
//! untouched; each provider decides how to interpret them. Price bounds are
//! passed through the same way and applied by the providers as filters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a [`Query`] violates its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Neither a location nor a complete coordinate pair was given.
    #[error("a location or both latitude and longitude are required")]
    MissingLocation,
}

/// A request for events near a place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Free-form location (usually a city name).
    pub location: String,
    /// Start of the date range, as supplied by the caller.
    pub start_date: Option<String>,
    /// End of the date range, as supplied by the caller.
    pub end_date: Option<String>,
    /// Event type hint (e.g. "concert", "sports").
    pub event_type: Option<String>,
    /// Category hint (e.g. "music", "arts").
    pub category: Option<String>,
    /// Lower price bound.
    pub min_price: Option<f64>,
    /// Upper price bound.
    pub max_price: Option<f64>,
    /// Latitude override.
    pub lat: Option<f64>,
    /// Longitude override.
    pub lon: Option<f64>,
    /// Search radius around `lat`/`lon`.
    pub radius: Option<f64>,
}

impl Query {
    /// Creates a query for a free-form location.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Default::default()
        }
    }

    /// Creates a query centred on a coordinate pair.
    pub fn at_coordinates(lat: f64, lon: f64) -> Self {
        Self {
            lat: Some(lat),
            lon: Some(lon),
            ..Default::default()
        }
    }

    /// Builder: set the start of the date range.
    pub fn with_start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    /// Builder: set the end of the date range.
    pub fn with_end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    /// Builder: set the event type hint.
    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    /// Builder: set the category hint.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder: set the price bounds.
    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Builder: set the search radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Returns the coordinate pair when both halves are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Checks the query invariants.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.location.trim().is_empty() && self.coordinates().is_none() {
            return Err(QueryError::MissingLocation);
        }
        Ok(())
    }
}
