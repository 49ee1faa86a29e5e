//! EventProvider trait definition.
//!
//! This module defines the [`EventProvider`] trait, the abstraction over
//! event-listing sources (Ticketmaster, Eventbrite, ...), and the
//! [`FetchResult`] every call produces.
//!
//! An adapter reports failure in one of two ways:
//! - returning `Err(ProviderError)` when the call could not be made at all
//! - returning a [`FetchResult`] with `error` set, for failures the adapter
//!   chooses to describe itself (e.g. a missing API key)
//!
//! Both are recorded per provider by the orchestrator; neither aborts the
//! other providers of the same query.

use std::future::Future;
use std::pin::Pin;

use eventfinder_core::Query;

use crate::error::{ProviderError, ProviderResult};
use crate::raw_event::RawEvent;

/// The outcome of one provider call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchResult {
    /// Events in provider order.
    pub events: Vec<RawEvent>,
    /// The number of events the provider reports.
    pub total: usize,
    /// A failure described by the provider itself.
    pub error: Option<String>,
    /// A non-fatal note (e.g. "not implemented yet").
    pub warning: Option<String>,
}

impl FetchResult {
    /// Creates a result holding `events`, with `total` set to their count.
    pub fn with_events(events: Vec<RawEvent>) -> Self {
        let total = events.len();
        Self {
            events,
            total,
            error: None,
            warning: None,
        }
    }

    /// Creates an empty result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a result that carries only an error.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Builder: override the reported total.
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = total;
        self
    }

    /// Builder: attach a warning.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    /// Returns true if the provider reported an error.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so adapters can live in a
/// registry as `Arc<dyn EventProvider>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// An event-listing source.
///
/// # Implementation Notes
///
/// - Implementations must be `Send + Sync`; calls for one query run
///   concurrently on the tokio runtime.
/// - Date strings in the query are opaque; each adapter formats them for its
///   own API.
/// - Adapters return at most one page of results.
///
/// # Example Implementation
///
/// ```ignore
/// struct MeetupProvider {
///     client: reqwest::Client,
/// }
///
/// impl EventProvider for MeetupProvider {
///     fn name(&self) -> &str { "meetup" }
///
///     fn guidance(&self) -> &str { "informal meetups and user groups" }
///
///     fn fetch_events<'a>(&'a self, query: &'a Query) -> BoxFuture<'a, ProviderResult<FetchResult>> {
///         Box::pin(async move {
///             Ok(FetchResult::with_events(events))
///         })
///     }
/// }
/// ```
pub trait EventProvider: Send + Sync {
    /// Returns the registry identifier of this provider (e.g. "ticketmaster").
    fn name(&self) -> &str;

    /// Describes when this provider is the right choice.
    ///
    /// The text is handed to the reasoning service as routing guidance.
    fn guidance(&self) -> &str;

    /// Fetches events matching the query.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on network errors, authentication failures,
    /// unparseable responses, etc.
    fn fetch_events<'a>(&'a self, query: &'a Query)
    -> BoxFuture<'a, ProviderResult<FetchResult>>;
}

/// A registered source that has no implementation yet.
///
/// Always returns zero events and a warning, so routing to it is visible in
/// the fusion result without being an error.
#[derive(Debug, Clone)]
pub struct PlaceholderProvider {
    name: String,
    guidance: String,
    warning: String,
}

impl PlaceholderProvider {
    /// Creates a placeholder with a default warning text.
    pub fn new(name: impl Into<String>, guidance: impl Into<String>) -> Self {
        let name = name.into();
        let warning = format!("{} provider not implemented yet", capitalize(&name));
        Self {
            name,
            guidance: guidance.into(),
            warning,
        }
    }

    /// Builder: replace the warning text.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = warning.into();
        self
    }
}

impl EventProvider for PlaceholderProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn guidance(&self) -> &str {
        &self.guidance
    }

    fn fetch_events<'a>(
        &'a self,
        _query: &'a Query,
    ) -> BoxFuture<'a, ProviderResult<FetchResult>> {
        let result = FetchResult::empty().with_warning(self.warning.clone());
        Box::pin(async move { Ok(result) })
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A provider that always returns an error.
///
/// Registered in place of an adapter that failed to initialize, so the
/// failure shows up in fusion results instead of silently dropping the
/// provider.
#[derive(Debug)]
pub struct ErrorProvider {
    name: String,
    error: ProviderError,
}

impl ErrorProvider {
    /// Creates a new error provider.
    pub fn new(name: impl Into<String>, error: ProviderError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }
}

impl EventProvider for ErrorProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn guidance(&self) -> &str {
        "unavailable"
    }

    fn fetch_events<'a>(
        &'a self,
        _query: &'a Query,
    ) -> BoxFuture<'a, ProviderResult<FetchResult>> {
        // ProviderError is not Clone; rebuild it from its parts.
        let error =
            ProviderError::new(self.error.code(), self.error.message()).with_provider(&self.name);
        Box::pin(async move { Err(error) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;

    #[test]
    fn fetch_result_counts_events() {
        let result = FetchResult::with_events(vec![RawEvent::new(), RawEvent::new()]);
        assert_eq!(result.total, 2);
        assert!(!result.is_error());

        let overridden = FetchResult::with_events(vec![RawEvent::new()]).with_total(120);
        assert_eq!(overridden.events.len(), 1);
        assert_eq!(overridden.total, 120);
    }

    #[test]
    fn fetch_result_failed() {
        let result = FetchResult::failed("Ticketmaster API key not configured");
        assert!(result.is_error());
        assert!(result.events.is_empty());
        assert_eq!(result.total, 0);
    }

    #[tokio::test]
    async fn placeholder_returns_warning() {
        let provider = PlaceholderProvider::new("eventbrite", "local community events");
        assert_eq!(provider.name(), "eventbrite");
        assert_eq!(provider.guidance(), "local community events");

        let result = provider
            .fetch_events(&Query::new("Los Angeles"))
            .await
            .unwrap();
        assert!(result.events.is_empty());
        assert_eq!(result.total, 0);
        assert_eq!(
            result.warning.as_deref(),
            Some("Eventbrite provider not implemented yet")
        );
    }

    #[tokio::test]
    async fn error_provider_returns_error() {
        let provider =
            ErrorProvider::new("ticketmaster", ProviderError::configuration("no api key"));

        let err = provider
            .fetch_events(&Query::new("Austin"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::ConfigurationError);
        assert_eq!(err.provider(), Some("ticketmaster"));
        assert_eq!(err.to_string(), "[ticketmaster] configuration_error: no api key");
    }
}
