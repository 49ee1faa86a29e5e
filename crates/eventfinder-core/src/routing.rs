//! Routing decision types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a routing decision came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoutingSource {
    /// The reasoning service chose the providers.
    ReasoningService,
    /// The deterministic rule set chose the providers.
    FallbackRule,
    /// The reasoning service was tried and failed; the rule set chose instead.
    FallbackAfterError,
}

impl RoutingSource {
    /// Returns the wire name of this source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReasoningService => "reasoning-service",
            Self::FallbackRule => "fallback-rule",
            Self::FallbackAfterError => "fallback-after-error",
        }
    }

    /// Returns true if the rule set produced the decision.
    pub fn is_fallback(&self) -> bool {
        !matches!(self, Self::ReasoningService)
    }
}

impl fmt::Display for RoutingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The providers selected for a query, in call order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Provider identifiers, deduplicated, in the order they should be called.
    pub providers: Vec<String>,
    /// Human-readable rationale.
    pub reason: String,
    /// Which strategy produced this decision.
    pub source: RoutingSource,
    /// Relative confidence per provider, when the reasoning service gave one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<BTreeMap<String, f64>>,
    /// Why the reasoning service was abandoned, for fallback decisions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_error: Option<String>,
}

impl RoutingDecision {
    /// Creates a decision. Duplicate provider identifiers are removed,
    /// keeping the first occurrence.
    pub fn new(providers: Vec<String>, reason: impl Into<String>, source: RoutingSource) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(providers.len());
        for provider in providers {
            if !unique.contains(&provider) {
                unique.push(provider);
            }
        }

        Self {
            providers: unique,
            reason: reason.into(),
            source,
            weights: None,
            fallback_error: None,
        }
    }

    /// Builder: attach per-provider weights.
    pub fn with_weights(mut self, weights: BTreeMap<String, f64>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Builder: record the error that caused a fallback.
    pub fn with_fallback_error(mut self, error: impl Into<String>) -> Self {
        self.fallback_error = Some(error.into());
        self
    }
}
