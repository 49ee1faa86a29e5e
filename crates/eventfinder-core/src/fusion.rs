//! Fusion result envelope.
//!
//! A [`FusionResult`] is built once per query by the orchestrator and is not
//! modified afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::routing::RoutingDecision;

/// Per-provider summary of a completed call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSummary {
    /// The total reported by the provider.
    pub total: usize,
    /// A non-fatal note from the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ProviderSummary {
    /// Creates a summary with the given total.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            warning: None,
        }
    }

    /// Builder: attach a warning.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }
}

/// The combined, deduplicated answer to a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionResult {
    /// How the providers were chosen.
    pub routing: RoutingDecision,
    /// Providers that were invoked, in selection order.
    pub providers_called: Vec<String>,
    /// Summaries for providers whose call completed.
    pub provider_results: BTreeMap<String, ProviderSummary>,
    /// Error text for providers that failed or reported an error.
    pub errors: BTreeMap<String, String>,
    /// Number of events in `events`.
    pub total: usize,
    /// Deduplicated events, first-seen order.
    pub events: Vec<Event>,
}

impl FusionResult {
    /// Returns true if at least one provider failed.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the client-facing view: only `events` and `total`.
    pub fn public_view(&self) -> PublicView<'_> {
        PublicView {
            events: &self.events,
            total: self.total,
        }
    }
}

/// The reduced response body exposed to end users.
#[derive(Debug, Serialize)]
pub struct PublicView<'a> {
    /// Deduplicated events.
    pub events: &'a [Event],
    /// Number of events.
    pub total: usize,
}
