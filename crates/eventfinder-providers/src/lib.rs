//! EventProvider trait, normalization and registry.
//!
//! This crate provides the abstraction layer for event-listing sources:
//!
//! - [`EventProvider`] - The core trait that all sources implement
//! - [`RawEvent`] - Provider-native event data, every field optional
//! - [`normalize_event`] - Conversion of raw events to the canonical [`Event`](eventfinder_core::Event)
//! - [`ProviderRegistry`] - Identifier to adapter mapping shared by routing and fusion
//! - [`ProviderError`] - Error types for provider operations
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │ Ticketmaster API│    │   (Eventbrite)  │
//! └────────┬────────┘    └────────┬────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌─────────────────────┐ ┌─────────────────────┐
//! │ TicketmasterProvider│ │ PlaceholderProvider │
//! └────────┬────────────┘ └────────┬────────────┘
//!          │     EventProvider     │
//!          └──────────┬────────────┘
//!                     ▼
//!              ┌─────────────┐
//!              │  RawEvent   │
//!              └──────┬──────┘
//!                     ▼ normalize_event()
//!              ┌─────────────┐
//!              │    Event    │
//!              └─────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use eventfinder_providers::{EventProvider, normalize_events};
//!
//! async fn fetch(provider: &dyn EventProvider, query: &Query) -> Vec<Event> {
//!     let result = provider.fetch_events(query).await?;
//!     normalize_events(provider.name(), &result.events)
//! }
//! ```

pub mod error;
pub mod normalize;
pub mod provider;
pub mod raw_event;
pub mod registry;
#[cfg(feature = "ticketmaster")]
pub mod ticketmaster;

// Re-export main types at crate root
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use normalize::{UNKNOWN_EVENT_NAME, normalize_event, normalize_events};
pub use provider::{BoxFuture, ErrorProvider, EventProvider, FetchResult, PlaceholderProvider};
pub use raw_event::{RawEvent, RawPriceRange};
pub use registry::ProviderRegistry;
