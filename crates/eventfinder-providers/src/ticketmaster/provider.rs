//! Ticketmaster provider implementation.
//!
//! This module implements the [`EventProvider`] trait for the Ticketmaster
//! Discovery API.

use tracing::{debug, warn};

use eventfinder_core::Query;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, EventProvider, FetchResult};

use super::client::TicketmasterClient;
use super::config::TicketmasterConfig;

/// Registry identifier of the Ticketmaster provider.
pub const TICKETMASTER_PROVIDER: &str = "ticketmaster";

const GUIDANCE: &str = "big, formally organized events (major concerts, sports, large venues)";

/// Ticketmaster provider.
///
/// Failures are reported through [`FetchResult::error`] rather than as
/// `Err`, so a missing key or an unreachable API never hides the events
/// other providers return for the same query.
#[derive(Debug)]
pub struct TicketmasterProvider {
    config: TicketmasterConfig,
    client: TicketmasterClient,
}

impl TicketmasterProvider {
    /// Creates a new Ticketmaster provider.
    ///
    /// A configuration without an API key is accepted; fetches then report
    /// the missing key.
    pub fn new(config: TicketmasterConfig) -> ProviderResult<Self> {
        config.validate().map_err(ProviderError::configuration)?;
        let client = TicketmasterClient::new(&config)?;

        Ok(Self { config, client })
    }

    /// Returns true if an API key is configured.
    pub fn is_configured(&self) -> bool {
        self.config.has_api_key()
    }

    async fn fetch_impl(&self, query: &Query) -> FetchResult {
        let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.trim().is_empty())
        else {
            warn!(provider = TICKETMASTER_PROVIDER, "API key not configured");
            return FetchResult::failed("Ticketmaster API key not configured");
        };

        debug!(location = %query.location, "searching Ticketmaster");

        match self.client.search(api_key, query).await {
            Ok(events) => FetchResult::with_events(events),
            Err(e) => {
                let e = e.with_provider(TICKETMASTER_PROVIDER);
                warn!(error = %e, code = e.code().as_str(), "Ticketmaster fetch failed");
                FetchResult::failed(format!("Failed to fetch events: {}", e.message()))
            }
        }
    }
}

impl EventProvider for TicketmasterProvider {
    fn name(&self) -> &str {
        TICKETMASTER_PROVIDER
    }

    fn guidance(&self) -> &str {
        GUIDANCE
    }

    fn fetch_events<'a>(&'a self, query: &'a Query) -> BoxFuture<'a, ProviderResult<FetchResult>> {
        Box::pin(async move { Ok(self.fetch_impl(query).await) })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn provider_identity() {
        let provider = TicketmasterProvider::new(TicketmasterConfig::new("key")).unwrap();
        assert_eq!(provider.name(), "ticketmaster");
        assert!(provider.guidance().contains("major concerts"));
        assert!(provider.is_configured());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = TicketmasterProvider::new(TicketmasterConfig::new("key").with_page_size(0))
            .unwrap_err();
        assert_eq!(err.code(), crate::ProviderErrorCode::ConfigurationError);
    }

    #[tokio::test]
    async fn missing_key_is_reported_in_result() {
        let provider = TicketmasterProvider::new(TicketmasterConfig::unconfigured()).unwrap();
        assert!(!provider.is_configured());

        let result = provider
            .fetch_events(&Query::new("Los Angeles"))
            .await
            .unwrap();
        assert!(result.events.is_empty());
        assert_eq!(
            result.error.as_deref(),
            Some("Ticketmaster API key not configured")
        );
    }

    #[tokio::test]
    async fn unreachable_api_is_reported_in_result() {
        let config = TicketmasterConfig::new("key")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(2));
        let provider = TicketmasterProvider::new(config).unwrap();

        let result = provider.fetch_events(&Query::new("Austin")).await.unwrap();
        assert!(result.events.is_empty());
        assert!(
            result
                .error
                .as_deref()
                .is_some_and(|e| e.starts_with("Failed to fetch events: "))
        );
    }
}
