//! Core types: queries, canonical events, routing decisions, fusion results, dedup

pub mod dedupe;
pub mod event;
pub mod fusion;
pub mod query;
pub mod routing;
pub mod tracing;

pub use dedupe::{DedupKey, dedupe_events};
pub use event::{Event, PriceRange};
pub use fusion::{FusionResult, ProviderSummary, PublicView};
pub use query::{Query, QueryError};
pub use routing::{RoutingDecision, RoutingSource};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
