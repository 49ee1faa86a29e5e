//! Routing and fusion error types.

use eventfinder_core::QueryError;
use thiserror::Error;

/// Result type for routing operations.
pub type RoutingResult<T> = Result<T, RoutingError>;

/// Errors that can occur while choosing providers.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// No reasoning service is configured, and rules alone are not allowed.
    #[error("Reasoning service not configured: {message}")]
    Unconfigured { message: String },

    /// The reasoning service could not be reached.
    #[error("Reasoning service request failed: {message}")]
    Transport { message: String },

    /// The reasoning service answered with an HTTP error.
    #[error("Reasoning service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// The reasoning service answered, but the decision is unusable.
    #[error("Invalid routing decision: {message}")]
    InvalidDecision { message: String },

    /// Router configuration error.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl RoutingError {
    /// Creates an unconfigured error.
    pub fn unconfigured(message: impl Into<String>) -> Self {
        Self::Unconfigured {
            message: message.into(),
        }
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a service error.
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    /// Creates an invalid decision error.
    pub fn invalid_decision(message: impl Into<String>) -> Self {
        Self::InvalidDecision {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns true if this error means the reasoning path was never tried.
    pub fn is_unconfigured(&self) -> bool {
        matches!(self, Self::Unconfigured { .. })
    }
}

/// Errors returned by [`FusionOrchestrator::fetch`](crate::FusionOrchestrator::fetch).
///
/// Provider failures never show up here; they are recorded in the result.
#[derive(Debug, Error)]
pub enum FusionError {
    /// The query itself is malformed.
    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] QueryError),

    /// No valid route could be chosen (strict mode only).
    #[error("Routing failed: {0}")]
    Routing(#[from] RoutingError),
}
