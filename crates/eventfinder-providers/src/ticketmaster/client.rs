//! Ticketmaster Discovery API client.
//!
//! Low-level pieces of the adapter: query-parameter building, the HTTP call,
//! and conversion of the `events.json` response into [`RawEvent`]s.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use eventfinder_core::Query;

use crate::error::{ProviderError, ProviderResult};
use crate::raw_event::{RawEvent, RawPriceRange};

use super::config::TicketmasterConfig;

/// Segment id for music events.
const SEGMENT_MUSIC: &str = "KZFzniwnSyZfZ7v7nJ";
/// Segment id for sports events.
const SEGMENT_SPORTS: &str = "KZFzniwnSyZfZ7v7nE";
/// Segment id for arts & theatre events.
const SEGMENT_ARTS_THEATRE: &str = "KZFzniwnSyZfZ7v7na";
/// Segment id for miscellaneous events.
const SEGMENT_MISC: &str = "KZFzniwnSyZfZ7v7n1";

/// Which end of the date range a value bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RangeEdge {
    Start,
    End,
}

/// Formats a caller date token as the `YYYY-MM-DDTHH:MM:SSZ` form the API
/// expects.
///
/// Bare dates expand to the start or end of that day. Values chrono cannot
/// read are passed through with the same suffix rules applied textually.
pub(crate) fn format_date_bound(value: &str, edge: RangeEdge) -> String {
    const API_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.with_timezone(&Utc).format(API_FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, pattern) {
            return dt.format(API_FORMAT).to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let (h, m, s) = match edge {
            RangeEdge::Start => (0, 0, 0),
            RangeEdge::End => (23, 59, 59),
        };
        if let Some(dt) = date.and_hms_opt(h, m, s) {
            return dt.format(API_FORMAT).to_string();
        }
    }

    if value.contains('T') {
        format!("{}:00Z", value)
    } else {
        match edge {
            RangeEdge::Start => format!("{}T00:00:00Z", value),
            RangeEdge::End => format!("{}T23:59:59Z", value),
        }
    }
}

/// Maps an event type hint to a classification id.
pub(crate) fn event_type_classification(event_type: &str) -> Option<&'static str> {
    match event_type.trim().to_lowercase().as_str() {
        "concert" => Some(SEGMENT_MUSIC),
        "sports" => Some(SEGMENT_SPORTS),
        "theater" => Some(SEGMENT_ARTS_THEATRE),
        "festival" | "conference" | "workshop" => Some(SEGMENT_MISC),
        _ => None,
    }
}

/// Maps a category hint to a classification id.
pub(crate) fn category_classification(category: &str) -> Option<&'static str> {
    match category.trim().to_lowercase().as_str() {
        "music" => Some(SEGMENT_MUSIC),
        "arts" => Some(SEGMENT_ARTS_THEATRE),
        "food" | "outdoor" | "family" => Some(SEGMENT_MISC),
        _ => None,
    }
}

/// Builds the query string for `events.json`, without the API key.
pub(crate) fn build_params(query: &Query, page_size: usize) -> Vec<(&'static str, String)> {
    let mut params = vec![("size", page_size.to_string())];

    if !query.location.trim().is_empty() {
        params.push(("city", query.location.trim().to_string()));
    }

    if let Some((lat, lon)) = query.coordinates() {
        params.push(("latlong", format!("{},{}", lat, lon)));
        if let Some(radius) = query.radius {
            params.push(("radius", radius.to_string()));
            params.push(("unit", "miles".to_string()));
        }
    }

    if let Some(ref start) = query.start_date {
        params.push(("startDateTime", format_date_bound(start, RangeEdge::Start)));
    }
    if let Some(ref end) = query.end_date {
        params.push(("endDateTime", format_date_bound(end, RangeEdge::End)));
    }

    let mut classifications: Vec<&str> = Vec::new();
    if let Some(id) = query.event_type.as_deref().and_then(event_type_classification) {
        classifications.push(id);
    }
    if let Some(id) = query.category.as_deref().and_then(category_classification) {
        classifications.push(id);
    }
    if !classifications.is_empty() {
        params.push(("classificationId", classifications.join(",")));
    }

    params
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct EventSearchResponse {
    #[serde(rename = "_embedded")]
    embedded: Option<EmbeddedEvents>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EmbeddedEvents {
    events: Vec<ApiEvent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiEvent {
    id: Option<String>,
    name: Option<String>,
    url: Option<String>,
    dates: Option<ApiDates>,
    images: Vec<ApiImage>,
    #[serde(rename = "priceRanges")]
    price_ranges: Vec<ApiPriceRange>,
    #[serde(rename = "_embedded")]
    embedded: Option<EmbeddedVenues>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiDates {
    start: Option<ApiStart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiStart {
    #[serde(rename = "localDate")]
    local_date: Option<String>,
    #[serde(rename = "localTime")]
    local_time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiImage {
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiPriceRange {
    min: Option<f64>,
    max: Option<f64>,
    currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EmbeddedVenues {
    venues: Vec<ApiVenue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiVenue {
    name: Option<String>,
    city: Option<ApiNamed>,
    state: Option<ApiState>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiNamed {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiState {
    #[serde(rename = "stateCode")]
    state_code: Option<String>,
}

/// Parses an `events.json` body.
pub(crate) fn parse_response(body: &str) -> ProviderResult<EventSearchResponse> {
    serde_json::from_str(body).map_err(|e| {
        ProviderError::invalid_response(format!("failed to parse response: {}", e))
    })
}

/// Converts a parsed response into raw events.
///
/// Events outside the price bounds are dropped (events without price
/// information are kept), as are events whose name already appeared earlier
/// in the same response.
pub(crate) fn convert_events(
    response: EventSearchResponse,
    min_price: Option<f64>,
    max_price: Option<f64>,
) -> Vec<RawEvent> {
    let api_events = response.embedded.map(|e| e.events).unwrap_or_default();
    let mut seen_names: HashSet<String> = HashSet::new();
    let mut events = Vec::with_capacity(api_events.len());

    for api_event in api_events {
        let raw = convert_event(api_event);

        if !within_price_bounds(raw.price_range.as_ref(), min_price, max_price) {
            continue;
        }

        let name = raw.name.clone().unwrap_or_default();
        if !seen_names.insert(name) {
            continue;
        }

        events.push(raw);
    }

    events
}

fn convert_event(event: ApiEvent) -> RawEvent {
    let start = event.dates.and_then(|d| d.start).unwrap_or_default();

    let mut raw = RawEvent {
        id: Some(event.id.unwrap_or_default()),
        name: event.name,
        url: Some(event.url.unwrap_or_default()),
        date: Some(start.local_date.unwrap_or_else(|| "TBD".to_string())),
        time: Some(start.local_time.unwrap_or_default()),
        location: Some(String::new()),
        venue: Some(String::new()),
        image: Some(String::new()),
        price_range: None,
        provider: None,
    };

    if let Some(venue) = event
        .embedded
        .and_then(|e| e.venues.into_iter().next())
    {
        let city = venue.city.and_then(|c| c.name).unwrap_or_default();
        let state = venue.state.and_then(|s| s.state_code).unwrap_or_default();
        raw.venue = Some(venue.name.unwrap_or_default());
        raw.location = Some(format!("{}, {}", city, state));
    }

    if let Some(image) = event.images.into_iter().next() {
        raw.image = Some(image.url.unwrap_or_default());
    }

    if let Some(price) = event.price_ranges.into_iter().next() {
        raw.price_range = Some(RawPriceRange {
            min: Some(price.min.unwrap_or(0.0)),
            max: Some(price.max.unwrap_or(0.0)),
            currency: Some(price.currency.unwrap_or_else(|| "USD".to_string())),
        });
    }

    raw
}

fn within_price_bounds(
    price: Option<&RawPriceRange>,
    min_price: Option<f64>,
    max_price: Option<f64>,
) -> bool {
    let Some(price) = price else {
        return true;
    };
    let event_min = price.min.unwrap_or(0.0);
    let event_max = price.max.unwrap_or(f64::INFINITY);

    if let Some(min) = min_price
        && event_max < min
    {
        return false;
    }
    if let Some(max) = max_price
        && event_min > max
    {
        return false;
    }
    true
}

/// HTTP client for the Discovery API.
#[derive(Debug)]
pub(crate) struct TicketmasterClient {
    http_client: reqwest::Client,
    events_url: String,
    page_size: usize,
}

impl TicketmasterClient {
    /// Creates a client from the adapter configuration.
    pub(crate) fn new(config: &TicketmasterConfig) -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ProviderError::internal(format!("failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self {
            http_client,
            events_url: config.events_url(),
            page_size: config.page_size,
        })
    }

    /// Searches for events. Returns at most one page.
    pub(crate) async fn search(&self, api_key: &str, query: &Query) -> ProviderResult<Vec<RawEvent>> {
        let params = build_params(query, self.page_size);

        let response = self
            .http_client
            .get(&self.events_url)
            .query(&[("apikey", api_key)])
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::network("request timeout")
                } else if e.is_connect() {
                    ProviderError::network(format!("connection failed: {}", e))
                } else {
                    ProviderError::network(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::rate_limited("rate limit exceeded"));
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ProviderError::authentication("API key rejected"));
        }

        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::bad_request(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::server(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;

        let parsed = parse_response(&body)?;
        let events = convert_events(parsed, query.min_price, query.max_price);

        debug!(count = events.len(), "fetched events from Ticketmaster");
        Ok(events)
    }
}
