//! Builds the provider registry, decider and orchestrator from configuration.

use std::sync::Arc;

use tracing::{info, warn};

use eventfinder_providers::{PlaceholderProvider, ProviderRegistry};
use eventfinder_router::{
    Decider, FallbackDecider, FusionOrchestrator, OpenAiClient, ReasoningDecider, RuleDecider,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Guidance for the community provider, which has no adapter yet.
pub const COMMUNITY_GUIDANCE: &str =
    "local/community/smaller events (meetups, workshops, local gatherings)";

/// Runtime switches that override the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Force strict routing.
    pub strict: bool,
    /// Reasoning model to use instead of the configured one.
    pub model: Option<String>,
}

/// Builds the provider registry.
///
/// Ticketmaster is registered when enabled (as an error provider if it fails
/// to initialize); the community provider is registered as a placeholder.
pub fn build_registry(config: &ClientConfig) -> ClientResult<ProviderRegistry> {
    let mut registry = ProviderRegistry::new();

    #[cfg(feature = "ticketmaster")]
    if config.ticketmaster.enabled {
        use eventfinder_providers::ErrorProvider;
        use eventfinder_providers::ticketmaster::{TICKETMASTER_PROVIDER, TicketmasterProvider};

        let provider_config = config
            .ticketmaster
            .to_provider_config()
            .map_err(|e| ClientError::Config(format!("invalid Ticketmaster configuration: {}", e)))?;

        match TicketmasterProvider::new(provider_config) {
            Ok(provider) => {
                if provider.is_configured() {
                    info!("Ticketmaster provider initialized");
                } else {
                    warn!(
                        "Ticketmaster provider initialized without an API key; \
                         set TICKETMASTER_API_KEY or [ticketmaster] api_key"
                    );
                }
                registry.register(Arc::new(provider))?;
            }
            Err(e) => {
                warn!(error = %e, "failed to create Ticketmaster provider");
                registry.register(Arc::new(ErrorProvider::new(TICKETMASTER_PROVIDER, e)))?;
            }
        }
    }

    let community = config.router.community_provider.trim();
    if !community.is_empty() && !registry.contains(community) {
        registry.register(Arc::new(PlaceholderProvider::new(
            community,
            COMMUNITY_GUIDANCE,
        )))?;
    }

    for name in registry.names() {
        info!(name = %name, "Provider registered");
    }

    Ok(registry)
}

/// Builds the routing decider for `registry`.
pub fn build_decider(
    config: &ClientConfig,
    registry: &ProviderRegistry,
    overrides: &Overrides,
) -> ClientResult<Arc<dyn Decider>> {
    let strict = overrides.strict || config.router.strict;

    let rules = RuleDecider::new(config.router.to_rule_set(), registry)
        .map_err(|e| ClientError::Config(e.to_string()))?;

    let reasoning = config
        .reasoning
        .to_reasoning_config(overrides.model.as_deref())
        .map_err(|e| ClientError::Config(format!("invalid reasoning configuration: {}", e)))?;

    let decider = match reasoning {
        Some(reasoning) => {
            info!(model = %reasoning.model, strict, "routing with reasoning service");
            let client = OpenAiClient::new(reasoning)?;
            let primary = ReasoningDecider::new(Arc::new(client), registry)?;
            FallbackDecider::new(Arc::new(primary), rules)
        }
        None => {
            info!(strict, "reasoning service not configured, routing with rules");
            FallbackDecider::rules_only(rules)
        }
    };

    Ok(Arc::new(decider.with_strict(strict)))
}

/// Builds a ready-to-use orchestrator.
pub fn build_orchestrator(
    config: &ClientConfig,
    overrides: &Overrides,
) -> ClientResult<FusionOrchestrator> {
    let registry = build_registry(config)?;
    let decider = build_decider(config, &registry, overrides)?;

    Ok(FusionOrchestrator::new(Arc::new(registry), decider)
        .with_config(config.fusion.to_fusion_config()))
}
