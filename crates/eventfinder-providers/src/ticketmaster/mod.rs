//! Ticketmaster Discovery API provider.
//!
//! Fetches one page of events from `GET {base_url}/events.json` and maps
//! them to raw events. Query hints are translated as follows:
//!
//! - `location` becomes `city`, coordinates become `latlong` (+ `radius`)
//! - date bounds are sent as `YYYY-MM-DDTHH:MM:SSZ`
//! - event type and category map to Discovery classification ids
//! - price bounds are applied locally, since the API has no price filter
//!
//! # Example
//!
//! ```ignore
//! use eventfinder_providers::ticketmaster::{TicketmasterConfig, TicketmasterProvider};
//!
//! let provider = TicketmasterProvider::new(TicketmasterConfig::new(api_key))?;
//! let result = provider.fetch_events(&Query::new("Los Angeles")).await?;
//! ```

mod client;
mod config;
mod provider;

pub use config::TicketmasterConfig;
pub use provider::{TICKETMASTER_PROVIDER, TicketmasterProvider};
