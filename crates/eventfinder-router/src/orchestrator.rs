//! Fusion orchestrator.
//!
//! Runs one query through the whole pipeline:
//!
//! ```text
//! Query ─▶ Decider ─▶ [provider, provider, ...] ─▶ normalize ─▶ dedupe ─▶ FusionResult
//!                          (concurrent tasks)
//! ```
//!
//! Provider failures are recorded per provider and never abort the query.
//! The only errors returned are an invalid query and a routing failure in
//! strict mode.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{Instrument, Span, debug, info, warn};

use eventfinder_core::{Event, FusionResult, ProviderSummary, Query, dedupe_events};
use eventfinder_providers::{EventProvider, FetchResult, ProviderRegistry, normalize_events};

use crate::config::FusionConfig;
use crate::decider::Decider;
use crate::error::FusionError;

/// What one provider call produced.
#[derive(Debug)]
enum CallOutcome {
    /// The adapter returned a result (which may carry its own error).
    Returned(FetchResult),
    /// The adapter raised, timed out or panicked.
    Failed(String),
}

/// Routes queries, fans out to providers and fuses the results.
pub struct FusionOrchestrator {
    registry: Arc<ProviderRegistry>,
    decider: Arc<dyn Decider>,
    config: FusionConfig,
}

impl FusionOrchestrator {
    /// Creates an orchestrator with default settings.
    pub fn new(registry: Arc<ProviderRegistry>, decider: Arc<dyn Decider>) -> Self {
        Self {
            registry,
            decider,
            config: FusionConfig::default(),
        }
    }

    /// Builder: set the configuration.
    pub fn with_config(mut self, config: FusionConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the provider registry.
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Fetches events for `query` from the routed providers.
    ///
    /// # Errors
    ///
    /// Returns `FusionError::InvalidQuery` when the query names no place and
    /// `FusionError::Routing` when the decider fails (strict mode only).
    #[tracing::instrument(
        name = "fusion",
        skip(self, query),
        fields(location = %query.location, providers)
    )]
    pub async fn fetch(&self, query: &Query) -> Result<FusionResult, FusionError> {
        query.validate()?;

        let routing = self.decider.decide(query).await?;
        debug!(
            source = routing.source.as_str(),
            providers = ?routing.providers,
            reason = %routing.reason,
            "routing decided"
        );

        let selected: Vec<(String, Arc<dyn EventProvider>)> = routing
            .providers
            .iter()
            .filter_map(|name| {
                let provider = self.registry.get(name);
                if provider.is_none() {
                    warn!(provider = %name, "routed to unregistered provider, skipping");
                }
                provider.map(|p| (name.clone(), Arc::clone(p)))
            })
            .collect();
        let providers_called: Vec<String> = selected.iter().map(|(n, _)| n.clone()).collect();
        Span::current().record("providers", providers_called.join(",").as_str());

        let tasks = selected.into_iter().map(|(name, provider)| {
            let query = query.clone();
            let timeout = self.config.provider_timeout;
            let span = tracing::debug_span!("provider", provider = %name);
            tokio::spawn(call_provider(provider, query, timeout).instrument(span))
        });
        let joined = join_all(tasks).await;

        let mut provider_results: BTreeMap<String, ProviderSummary> = BTreeMap::new();
        let mut errors: BTreeMap<String, String> = BTreeMap::new();
        let mut pooled: Vec<Event> = Vec::new();

        for (name, joined) in providers_called.iter().zip(joined) {
            let outcome = joined.unwrap_or_else(|e| {
                CallOutcome::Failed(format!("provider task failed: {}", e))
            });

            match outcome {
                CallOutcome::Returned(result) => {
                    let mut summary = ProviderSummary::new(result.total);
                    if let Some(ref warning) = result.warning {
                        summary = summary.with_warning(warning.clone());
                    }
                    provider_results.insert(name.clone(), summary);

                    if let Some(error) = result.error {
                        warn!(provider = %name, error = %error, "provider reported an error");
                        errors.insert(name.clone(), error);
                    } else {
                        debug!(
                            provider = %name,
                            event_count = result.events.len(),
                            "provider returned events"
                        );
                        pooled.extend(normalize_events(name, &result.events));
                    }
                }
                CallOutcome::Failed(error) => {
                    warn!(provider = %name, error = %error, "provider call failed");
                    errors.insert(name.clone(), error);
                }
            }
        }

        let pooled_count = pooled.len();
        let events = dedupe_events(pooled);
        info!(
            pooled = pooled_count,
            total = events.len(),
            errors = errors.len(),
            "fusion complete"
        );

        Ok(FusionResult {
            routing,
            providers_called,
            provider_results,
            errors,
            total: events.len(),
            events,
        })
    }
}

impl std::fmt::Debug for FusionOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FusionOrchestrator")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}

async fn call_provider(
    provider: Arc<dyn EventProvider>,
    query: Query,
    timeout: Option<Duration>,
) -> CallOutcome {
    let call = provider.fetch_events(&query);

    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => {
                return CallOutcome::Failed(format!(
                    "timed out after {}s",
                    limit.as_secs_f64()
                ));
            }
        },
        None => call.await,
    };

    match result {
        Ok(result) => CallOutcome::Returned(result),
        Err(e) => CallOutcome::Failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventfinder_core::{RoutingDecision, RoutingSource};
    use eventfinder_providers::{
        ErrorProvider, PlaceholderProvider, ProviderError, RawEvent, RawPriceRange,
    };

    use crate::config::RuleSet;
    use crate::decider::{FallbackDecider, RuleDecider};
    use crate::error::RoutingError;
    use crate::reasoning::ReasoningDecider;
    use crate::testing::{
        COMMUNITY_GUIDANCE, FailingDecider, FixedDecider, PanickingProvider, ScriptedClient,
        SlowProvider, StaticProvider,
    };

    fn raw(name: &str, date: &str, venue: &str) -> RawEvent {
        RawEvent::new()
            .with_id(format!("{}-{}", name.to_lowercase().replace(' ', "-"), date))
            .with_name(name)
            .with_date(date)
            .with_venue(venue)
    }

    fn registry_of(providers: Vec<Arc<dyn EventProvider>>) -> Arc<ProviderRegistry> {
        let mut registry = ProviderRegistry::new();
        for provider in providers {
            registry.register(provider).unwrap();
        }
        Arc::new(registry)
    }

    fn fixed(providers: &[&str]) -> Arc<dyn Decider> {
        Arc::new(FixedDecider(RoutingDecision::new(
            providers.iter().map(|p| p.to_string()).collect(),
            "fixed",
            RoutingSource::ReasoningService,
        )))
    }

    fn rule_based(registry: &ProviderRegistry) -> Arc<dyn Decider> {
        let rules = RuleDecider::new(RuleSet::default(), registry).unwrap();
        Arc::new(FallbackDecider::rules_only(rules))
    }

    #[tokio::test]
    async fn los_angeles_end_to_end() {
        let ticketmaster = StaticProvider::new(
            "ticketmaster",
            FetchResult::with_events(vec![
                raw("Lakers vs Celtics", "2026-02-14", "Crypto.com Arena"),
                raw("Hollywood Bowl Gala", "2026-02-20", "Hollywood Bowl"),
                raw("Lakers vs Celtics", "2026-02-14", "Crypto.com Arena"),
                raw("Kings vs Ducks", "2026-02-21", "Crypto.com Arena"),
                raw("Symphony Night", "2026-02-27", "Walt Disney Concert Hall"),
            ]),
        );
        let eventbrite = PlaceholderProvider::new("eventbrite", COMMUNITY_GUIDANCE);
        let registry = registry_of(vec![Arc::new(ticketmaster), Arc::new(eventbrite)]);
        let orchestrator = FusionOrchestrator::new(registry.clone(), rule_based(&registry));

        let query = Query::new("Los Angeles")
            .with_start_date("2026-02-01T00:00")
            .with_end_date("2026-03-01T00:00");
        let result = orchestrator.fetch(&query).await.unwrap();

        assert_eq!(result.providers_called, vec!["eventbrite", "ticketmaster"]);
        assert_eq!(result.routing.source, RoutingSource::FallbackRule);
        assert!(result.errors.is_empty());
        assert_eq!(result.total, 4);
        assert_eq!(result.events.len(), 4);
        assert_eq!(result.provider_results["ticketmaster"].total, 5);
        assert_eq!(
            result.provider_results["eventbrite"].warning.as_deref(),
            Some("Eventbrite provider not implemented yet")
        );
        assert!(result.events.iter().all(|e| e.provider == "ticketmaster"));
    }

    #[tokio::test]
    async fn partial_failure_keeps_successful_events() {
        let good = StaticProvider::new(
            "ticketmaster",
            FetchResult::with_events(vec![
                raw("A", "2026-03-01", "Hall"),
                raw("B", "2026-03-02", "Hall"),
                raw("C", "2026-03-03", "Hall"),
            ]),
        );
        let bad = ErrorProvider::new("eventbrite", ProviderError::network("connection refused"));
        let registry = registry_of(vec![Arc::new(good), Arc::new(bad)]);
        let orchestrator =
            FusionOrchestrator::new(registry, fixed(&["eventbrite", "ticketmaster"]));

        let result = orchestrator.fetch(&Query::new("Denver")).await.unwrap();

        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors["eventbrite"],
            "[eventbrite] network_error: connection refused"
        );
        assert!(!result.provider_results.contains_key("eventbrite"));
        assert_eq!(result.total, 3);
        assert_eq!(result.providers_called, vec!["eventbrite", "ticketmaster"]);
    }

    #[tokio::test]
    async fn reported_error_contributes_no_events() {
        let mut reported =
            FetchResult::with_events(vec![raw("Stale", "2026-03-01", "Hall")]).with_total(1);
        reported.error = Some("Failed to fetch events: upstream 503".to_string());
        let provider = StaticProvider::new("ticketmaster", reported);
        let registry = registry_of(vec![Arc::new(provider)]);
        let orchestrator = FusionOrchestrator::new(registry, fixed(&["ticketmaster"]));

        let result = orchestrator.fetch(&Query::new("Denver")).await.unwrap();

        assert_eq!(result.total, 0);
        assert_eq!(
            result.errors["ticketmaster"],
            "Failed to fetch events: upstream 503"
        );
        assert_eq!(result.provider_results["ticketmaster"].total, 1);
        assert_eq!(result.providers_called, vec!["ticketmaster"]);
    }

    #[tokio::test]
    async fn selection_order_decides_duplicates() {
        let jazz = |venue: &str, price: f64| {
            RawEvent::new()
                .with_name("Jazz Night")
                .with_date("2026-02-14")
                .with_venue(venue)
                .with_price_range(RawPriceRange {
                    min: Some(price),
                    max: Some(price),
                    currency: Some("USD".to_string()),
                })
        };
        let first = SlowProvider::new(
            "eventbrite",
            Duration::from_millis(50),
            FetchResult::with_events(vec![jazz("The Blue Room", 10.0)]),
        );
        let second = StaticProvider::new(
            "ticketmaster",
            FetchResult::with_events(vec![jazz(" the blue room ", 25.0)]),
        );
        let registry = registry_of(vec![Arc::new(first), Arc::new(second)]);
        let orchestrator =
            FusionOrchestrator::new(registry, fixed(&["eventbrite", "ticketmaster"]));

        let result = orchestrator.fetch(&Query::new("New Orleans")).await.unwrap();

        assert_eq!(result.total, 1);
        assert_eq!(result.events[0].provider, "eventbrite");
        assert_eq!(result.events[0].price_range.min, Some(10.0));
    }

    #[tokio::test]
    async fn unknown_reasoning_choices_are_not_called() {
        let registry = registry_of(vec![
            Arc::new(PlaceholderProvider::new("ticketmaster", "big")),
            Arc::new(PlaceholderProvider::new("eventbrite", "small")),
        ]);
        let client = Arc::new(ScriptedClient::replying(
            r#"{"providers": ["meetup", "ticketmaster"], "reason": "Sports plus meetups."}"#,
        ));
        let reasoning = ReasoningDecider::new(client, &registry).unwrap();
        let rules = RuleDecider::new(RuleSet::default(), &registry).unwrap();
        let decider = Arc::new(FallbackDecider::new(Arc::new(reasoning), rules));
        let orchestrator = FusionOrchestrator::new(registry, decider);

        let result = orchestrator.fetch(&Query::new("Chicago")).await.unwrap();

        assert_eq!(result.routing.source, RoutingSource::ReasoningService);
        assert_eq!(result.providers_called, vec!["ticketmaster"]);
        assert!(!result.provider_results.contains_key("meetup"));
    }

    #[tokio::test]
    async fn unregistered_routes_are_skipped() {
        let registry = registry_of(vec![Arc::new(PlaceholderProvider::new("eventbrite", "x"))]);
        let orchestrator = FusionOrchestrator::new(registry, fixed(&["meetup", "eventbrite"]));

        let result = orchestrator.fetch(&Query::new("Boise")).await.unwrap();
        assert_eq!(result.providers_called, vec!["eventbrite"]);
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn strict_routing_failure_is_fatal() {
        let registry = registry_of(vec![
            Arc::new(PlaceholderProvider::new("ticketmaster", "big")),
            Arc::new(PlaceholderProvider::new("eventbrite", "small")),
        ]);
        let rules = RuleDecider::new(RuleSet::default(), &registry).unwrap();
        let primary = Arc::new(FailingDecider::new(|| RoutingError::transport("timeout")));
        let decider = Arc::new(FallbackDecider::new(primary, rules).with_strict(true));
        let orchestrator = FusionOrchestrator::new(registry, decider);

        let err = orchestrator.fetch(&Query::new("Seattle")).await.unwrap_err();
        assert!(matches!(
            err,
            FusionError::Routing(RoutingError::Transport { .. })
        ));
    }

    #[tokio::test]
    async fn invalid_query_is_rejected_before_routing() {
        let registry = registry_of(vec![Arc::new(PlaceholderProvider::new("eventbrite", "x"))]);
        let decider = Arc::new(FailingDecider::new(|| {
            RoutingError::transport("should not be called")
        }));
        let orchestrator = FusionOrchestrator::new(registry, decider);

        let err = orchestrator.fetch(&Query::new("  ")).await.unwrap_err();
        assert!(matches!(err, FusionError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn odd_price_bounds_reach_the_providers() {
        let registry = registry_of(vec![
            Arc::new(StaticProvider::new(
                "ticketmaster",
                FetchResult::with_events(vec![RawEvent::new().with_name("Rodeo")]),
            )),
            Arc::new(PlaceholderProvider::new("eventbrite", "x")),
        ]);
        let orchestrator =
            FusionOrchestrator::new(registry, fixed(&["eventbrite", "ticketmaster"]));

        for (min, max) in [(Some(50.0), Some(10.0)), (Some(-5.0), None)] {
            let query = Query::new("Los Angeles").with_price_range(min, max);
            let result = orchestrator.fetch(&query).await.unwrap();
            assert_eq!(result.providers_called, vec!["eventbrite", "ticketmaster"]);
            assert_eq!(result.total, 1);
            assert!(result.errors.is_empty());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_times_out() {
        let slow = SlowProvider::new(
            "eventbrite",
            Duration::from_secs(120),
            FetchResult::with_events(vec![raw("Late", "2026-03-01", "Hall")]),
        );
        let fast = StaticProvider::new(
            "ticketmaster",
            FetchResult::with_events(vec![raw("On Time", "2026-03-01", "Arena")]),
        );
        let registry = registry_of(vec![Arc::new(slow), Arc::new(fast)]);
        let orchestrator =
            FusionOrchestrator::new(registry, fixed(&["eventbrite", "ticketmaster"]))
                .with_config(
                    FusionConfig::default().with_provider_timeout(Some(Duration::from_secs(30))),
                );

        let result = orchestrator.fetch(&Query::new("Tulsa")).await.unwrap();

        assert_eq!(result.errors["eventbrite"], "timed out after 30s");
        assert_eq!(result.total, 1);
        assert_eq!(result.events[0].name, "On Time");
    }

    #[tokio::test]
    async fn panicking_provider_is_recorded() {
        let registry = registry_of(vec![
            Arc::new(PanickingProvider("eventbrite")),
            Arc::new(StaticProvider::new(
                "ticketmaster",
                FetchResult::with_events(vec![raw("Fine", "2026-03-01", "Arena")]),
            )),
        ]);
        let orchestrator =
            FusionOrchestrator::new(registry, fixed(&["eventbrite", "ticketmaster"]));

        let result = orchestrator.fetch(&Query::new("Omaha")).await.unwrap();

        assert!(result.errors["eventbrite"].starts_with("provider task failed"));
        assert_eq!(result.total, 1);
    }

    #[tokio::test]
    async fn fallback_envelope_snapshot() {
        let registry = registry_of(vec![
            Arc::new(ErrorProvider::new(
                "ticketmaster",
                ProviderError::rate_limited("rate limit exceeded"),
            )),
            Arc::new(StaticProvider::new(
                "eventbrite",
                FetchResult::with_events(vec![
                    RawEvent::new()
                        .with_id("eb-1")
                        .with_name("Jazz Night")
                        .with_date("2026-02-14")
                        .with_venue("The Blue Room")
                        .with_provider("spoofed"),
                ]),
            )),
        ]);
        let rules = RuleDecider::new(RuleSet::default(), &registry).unwrap();
        let primary = Arc::new(FailingDecider::new(|| RoutingError::service(503, "overloaded")));
        let decider = Arc::new(FallbackDecider::new(primary, rules));
        let orchestrator = FusionOrchestrator::new(registry, decider);

        let result = orchestrator.fetch(&Query::new("New Orleans")).await.unwrap();

        insta::assert_json_snapshot!(result, @r#"
        {
          "routing": {
            "providers": [
              "eventbrite",
              "ticketmaster"
            ],
            "reason": "Rule: try local/community first, then ticketmaster.",
            "source": "fallback-after-error",
            "fallback_error": "Reasoning service error (503): overloaded"
          },
          "providers_called": [
            "eventbrite",
            "ticketmaster"
          ],
          "provider_results": {
            "eventbrite": {
              "total": 1
            }
          },
          "errors": {
            "ticketmaster": "[ticketmaster] rate_limited: rate limit exceeded"
          },
          "total": 1,
          "events": [
            {
              "id": "eb-1",
              "name": "Jazz Night",
              "url": "",
              "date": "2026-02-14",
              "time": "",
              "location": "",
              "venue": "The Blue Room",
              "image": "",
              "priceRange": {},
              "provider": "eventbrite"
            }
          ]
        }
        "#);
    }
}
