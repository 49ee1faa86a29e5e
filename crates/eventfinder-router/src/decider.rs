//! Routing deciders.
//!
//! A [`Decider`] turns a query into a [`RoutingDecision`]. Three
//! implementations exist:
//!
//! - [`RuleDecider`]: deterministic, never fails
//! - [`ReasoningDecider`](crate::ReasoningDecider): asks the reasoning service
//! - [`FallbackDecider`]: tries a primary decider and falls back to the rules,
//!   unless strict mode makes primary failures fatal

use std::sync::Arc;

use tracing::{debug, warn};

use eventfinder_core::{Query, RoutingDecision, RoutingSource};
use eventfinder_providers::{BoxFuture, ProviderRegistry};

use crate::config::RuleSet;
use crate::error::{RoutingError, RoutingResult};

/// Chooses which providers to query.
pub trait Decider: Send + Sync {
    /// Decides the ordered provider set for `query`.
    ///
    /// # Errors
    ///
    /// Returns `RoutingError` when no valid decision can be produced.
    fn decide<'a>(&'a self, query: &'a Query) -> BoxFuture<'a, RoutingResult<RoutingDecision>>;
}

/// Rule-based decider.
///
/// Large, organized event classes go to the major venue provider only;
/// everything else tries the community provider first, then the major venue
/// provider.
#[derive(Debug, Clone)]
pub struct RuleDecider {
    rules: RuleSet,
    community_registered: bool,
}

impl RuleDecider {
    /// Creates a rule decider bound to `registry`.
    ///
    /// A community provider missing from the registry is left out of every
    /// decision.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the major venue provider is not
    /// registered.
    pub fn new(rules: RuleSet, registry: &ProviderRegistry) -> RoutingResult<Self> {
        if !registry.contains(&rules.major_venue_provider) {
            return Err(RoutingError::config(format!(
                "major venue provider '{}' is not registered",
                rules.major_venue_provider
            )));
        }

        let community_registered = registry.contains(&rules.community_provider);
        if !community_registered {
            warn!(
                provider = %rules.community_provider,
                "community provider not registered, rules will only use the major venue provider"
            );
        }

        Ok(Self {
            rules,
            community_registered,
        })
    }

    /// Produces the rule-based decision for `query`.
    pub fn route(&self, query: &Query) -> RoutingDecision {
        let major = self.rules.major_venue_provider.clone();

        if self
            .rules
            .is_large_event(query.event_type.as_deref(), query.category.as_deref())
        {
            return RoutingDecision::new(
                vec![major],
                "Rule: likely a large/organized event type.",
                RoutingSource::FallbackRule,
            );
        }

        let mut providers = Vec::with_capacity(2);
        if self.community_registered {
            providers.push(self.rules.community_provider.clone());
        }
        providers.push(major);

        RoutingDecision::new(
            providers,
            format!(
                "Rule: try local/community first, then {}.",
                self.rules.major_venue_provider
            ),
            RoutingSource::FallbackRule,
        )
    }
}

impl Decider for RuleDecider {
    fn decide<'a>(&'a self, query: &'a Query) -> BoxFuture<'a, RoutingResult<RoutingDecision>> {
        let decision = self.route(query);
        Box::pin(async move { Ok(decision) })
    }
}

/// Chains a primary decider with the rule-based fallback.
///
/// | primary outcome           | strict off                   | strict on     |
/// |---------------------------|------------------------------|---------------|
/// | decision                  | decision                     | decision      |
/// | none configured           | rules, `fallback-rule`       | `Unconfigured`|
/// | `Unconfigured` error      | rules, `fallback-rule`       | the error     |
/// | any other error           | rules, `fallback-after-error`| the error     |
pub struct FallbackDecider {
    primary: Option<Arc<dyn Decider>>,
    fallback: RuleDecider,
    strict: bool,
}

impl FallbackDecider {
    /// Creates a decider that tries `primary` first.
    pub fn new(primary: Arc<dyn Decider>, fallback: RuleDecider) -> Self {
        Self {
            primary: Some(primary),
            fallback,
            strict: false,
        }
    }

    /// Creates a decider without a reasoning service.
    pub fn rules_only(fallback: RuleDecider) -> Self {
        Self {
            primary: None,
            fallback,
            strict: false,
        }
    }

    /// Builder: make primary failures fatal.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Returns true if strict mode is on.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Returns true if a primary decider is configured.
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    async fn decide_impl(&self, query: &Query) -> RoutingResult<RoutingDecision> {
        let Some(ref primary) = self.primary else {
            if self.strict {
                return Err(RoutingError::unconfigured(
                    "reasoning service required but not configured",
                ));
            }
            debug!("no reasoning service configured, using rules");
            return Ok(self.fallback.route(query));
        };

        match primary.decide(query).await {
            Ok(decision) => Ok(decision),
            Err(e) if self.strict => {
                warn!(error = %e, "routing failed in strict mode");
                Err(e)
            }
            Err(e) if e.is_unconfigured() => {
                debug!(reason = %e, "reasoning service unavailable, using rules");
                Ok(self.fallback.route(query))
            }
            Err(e) => {
                warn!(error = %e, "reasoning service failed, falling back to rules");
                let mut decision = self.fallback.route(query).with_fallback_error(e.to_string());
                decision.source = RoutingSource::FallbackAfterError;
                Ok(decision)
            }
        }
    }
}

impl Decider for FallbackDecider {
    fn decide<'a>(&'a self, query: &'a Query) -> BoxFuture<'a, RoutingResult<RoutingDecision>> {
        Box::pin(self.decide_impl(query))
    }
}

impl std::fmt::Debug for FallbackDecider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackDecider")
            .field("has_primary", &self.primary.is_some())
            .field("fallback", &self.fallback)
            .field("strict", &self.strict)
            .finish()
    }
}
