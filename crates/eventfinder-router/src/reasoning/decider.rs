//! Reasoning-backed decider.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use eventfinder_core::{Query, RoutingDecision, RoutingSource};
use eventfinder_providers::{BoxFuture, ProviderRegistry};

use crate::decider::Decider;
use crate::error::{RoutingError, RoutingResult};

use super::client::{ReasoningClient, RoutingRequest};

/// Longest accepted rationale, in characters.
pub const MAX_REASON_CHARS: usize = 240;

/// Most providers a single decision may name.
pub const MAX_PROVIDERS_PER_DECISION: usize = 3;

/// The JSON object the reasoning service must produce.
#[derive(Debug, Deserialize)]
struct RoutingReply {
    providers: Vec<String>,
    #[serde(default)]
    weights: Option<BTreeMap<String, f64>>,
    reason: String,
}

/// Decider that asks a reasoning service which providers to use.
///
/// The service sees the registry identifiers as a closed vocabulary, along
/// with each provider's guidance text. Its answer is checked against the
/// schema limits and the registry before it is acted on.
pub struct ReasoningDecider {
    client: Arc<dyn ReasoningClient>,
    registry: ProviderRegistry,
    instructions: String,
    schema: Value,
}

impl ReasoningDecider {
    /// Creates a decider for the providers of `registry`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the registry is empty.
    pub fn new(client: Arc<dyn ReasoningClient>, registry: &ProviderRegistry) -> RoutingResult<Self> {
        if registry.is_empty() {
            return Err(RoutingError::config(
                "reasoning decider needs at least one registered provider",
            ));
        }

        Ok(Self {
            client,
            registry: registry.clone(),
            instructions: build_instructions(registry),
            schema: routing_schema(&registry.names()),
        })
    }

    /// Returns the system instructions sent with every request.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Returns the reply schema sent with every request.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    fn max_providers(&self) -> usize {
        MAX_PROVIDERS_PER_DECISION.min(self.registry.len())
    }

    async fn decide_impl(&self, query: &Query) -> RoutingResult<RoutingDecision> {
        let request = RoutingRequest {
            instructions: self.instructions.clone(),
            input: build_input(query),
            schema: self.schema.clone(),
        };

        let text = self.client.complete(&request).await?;
        let decision = self.validate_reply(&text)?;

        info!(
            model = self.client.model(),
            providers = ?decision.providers,
            "reasoning service chose providers"
        );
        Ok(decision)
    }

    /// Parses and checks a reply, then keeps only registered providers.
    fn validate_reply(&self, text: &str) -> RoutingResult<RoutingDecision> {
        let reply: RoutingReply = serde_json::from_str(text).map_err(|e| {
            RoutingError::invalid_decision(format!("reply does not match schema: {}", e))
        })?;

        let max = self.max_providers();
        if reply.providers.is_empty() || reply.providers.len() > max {
            return Err(RoutingError::invalid_decision(format!(
                "expected 1 to {} providers, got {}",
                max,
                reply.providers.len()
            )));
        }

        let reason = reply.reason.trim();
        if reason.is_empty() {
            return Err(RoutingError::invalid_decision("reason must not be empty"));
        }
        if reason.chars().count() > MAX_REASON_CHARS {
            return Err(RoutingError::invalid_decision(format!(
                "reason exceeds {} characters",
                MAX_REASON_CHARS
            )));
        }

        if let Some(ref weights) = reply.weights
            && let Some((name, value)) = weights
                .iter()
                .find(|(_, v)| !v.is_finite() || **v < 0.0 || **v > 1.0)
        {
            return Err(RoutingError::invalid_decision(format!(
                "weight for '{}' is outside [0, 1]: {}",
                name, value
            )));
        }

        let providers = self.registry.retain_known(&reply.providers);
        if providers.len() < reply.providers.len() {
            debug!(
                requested = ?reply.providers,
                kept = ?providers,
                "dropped unknown or repeated providers"
            );
        }
        if providers.is_empty() {
            return Err(RoutingError::invalid_decision(
                "reasoning service returned no valid providers",
            ));
        }

        let mut decision =
            RoutingDecision::new(providers, reason, RoutingSource::ReasoningService);

        if let Some(weights) = reply.weights {
            let kept: BTreeMap<String, f64> = weights
                .into_iter()
                .filter(|(name, _)| decision.providers.contains(name))
                .collect();
            if !kept.is_empty() {
                decision = decision.with_weights(kept);
            }
        }

        Ok(decision)
    }
}

impl Decider for ReasoningDecider {
    fn decide<'a>(&'a self, query: &'a Query) -> BoxFuture<'a, RoutingResult<RoutingDecision>> {
        Box::pin(self.decide_impl(query))
    }
}

impl std::fmt::Debug for ReasoningDecider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReasoningDecider")
            .field("model", &self.client.model())
            .field("registry", &self.registry)
            .finish()
    }
}

/// Builds the system instructions from the registry.
fn build_instructions(registry: &ProviderRegistry) -> String {
    let vocabulary = registry
        .names()
        .iter()
        .map(|n| format!("\"{}\"", n))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::from(
        "You are a router that chooses the best event provider APIs to call.\n",
    );
    out.push_str(&format!("Available providers: [{}].\n\n", vocabulary));
    out.push_str("Routing guidance:\n");
    for (name, provider) in registry.iter() {
        out.push_str(&format!("- Use \"{}\" for {}.\n", name, provider.guidance()));
    }
    out.push_str("- If uncertain, choose up to TWO providers to improve recall.\n\n");
    out.push_str("Return JSON that matches the schema exactly.");
    out
}

/// Builds the user message carrying the query context.
fn build_input(query: &Query) -> String {
    let mut context = json!({
        "location": query.location,
        "start_date": query.start_date,
        "end_date": query.end_date,
        "event_type": query.event_type,
        "category": query.category,
        "min_price": query.min_price,
        "max_price": query.max_price,
    });
    if let Some((lat, lon)) = query.coordinates() {
        context["lat"] = json!(lat);
        context["lon"] = json!(lon);
        context["radius"] = json!(query.radius);
    }
    format!("Select providers for this request:\n{}", context)
}

/// Builds the reply schema for the given (sorted) identifiers.
fn routing_schema(names: &[String]) -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "providers": {
                "type": "array",
                "items": {"type": "string", "enum": names},
                "minItems": 1,
                "maxItems": MAX_PROVIDERS_PER_DECISION.min(names.len()),
            },
            "weights": {
                "type": "object",
                "additionalProperties": {"type": "number", "minimum": 0, "maximum": 1},
            },
            "reason": {"type": "string", "minLength": 1, "maxLength": MAX_REASON_CHARS},
        },
        "required": ["providers", "reason"],
    })
}
