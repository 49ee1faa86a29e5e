//! Reasoning-service routing.
//!
//! The reasoning service is asked, with a strict JSON schema, which
//! registered providers fit a query. Its reply is validated before use:
//!
//! 1. 1 to `min(3, registry size)` providers, a non-blank rationale of at
//!    most 240 characters, weights within `[0, 1]`
//! 2. unknown identifiers dropped, repeats removed (order kept), weights of
//!    dropped identifiers removed
//! 3. an emptied provider list is an invalid decision
//!
//! Any failure is returned as a [`RoutingError`](crate::RoutingError); the
//! [`FallbackDecider`](crate::FallbackDecider) decides what happens next.

mod client;
mod decider;

pub use client::{OpenAiClient, ROUTING_FORMAT_NAME, ReasoningClient, RoutingRequest};
pub use decider::{MAX_PROVIDERS_PER_DECISION, MAX_REASON_CHARS, ReasoningDecider};
