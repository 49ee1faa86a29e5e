//! Provider routing and result fusion.
//!
//! This crate decides which event providers to consult for a query and
//! merges their answers:
//!
//! - [`Decider`] implementations choose providers: [`RuleDecider`] (fixed
//!   rules), [`ReasoningDecider`] (reasoning service) and [`FallbackDecider`]
//!   (reasoning first, rules on failure, optional strict mode)
//! - [`FusionOrchestrator`] calls the chosen providers concurrently,
//!   normalizes and deduplicates their events and records per-provider
//!   errors
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use eventfinder_core::Query;
//! use eventfinder_providers::{PlaceholderProvider, ProviderRegistry};
//! use eventfinder_router::{FallbackDecider, FusionOrchestrator, RuleDecider, RuleSet};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = ProviderRegistry::new()
//!         .with_provider(Arc::new(PlaceholderProvider::new("ticketmaster", "large venues")))?
//!         .with_provider(Arc::new(PlaceholderProvider::new("eventbrite", "community events")))?;
//!
//!     let rules = RuleDecider::new(RuleSet::default(), &registry)?;
//!     let decider = Arc::new(FallbackDecider::rules_only(rules));
//!     let orchestrator = FusionOrchestrator::new(Arc::new(registry), decider);
//!
//!     let result = orchestrator.fetch(&Query::new("Los Angeles")).await?;
//!     println!("{} events", result.total);
//!     Ok(())
//! }
//! ```

mod config;
mod decider;
mod error;
mod orchestrator;
pub mod reasoning;

#[cfg(test)]
mod testing;

pub use config::{FusionConfig, ReasoningConfig, RuleSet};
pub use decider::{Decider, FallbackDecider, RuleDecider};
pub use error::{FusionError, RoutingError, RoutingResult};
pub use orchestrator::FusionOrchestrator;
pub use reasoning::{OpenAiClient, ReasoningClient, ReasoningDecider};
