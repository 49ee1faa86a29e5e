//! Client error types.

use thiserror::Error;

use eventfinder_core::QueryError;
use eventfinder_providers::ProviderError;
use eventfinder_router::{FusionError, RoutingError};

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The search arguments do not form a valid query.
    #[error("invalid query: {0}")]
    Query(#[from] QueryError),

    /// Routing failed (strict mode, or the router could not be built).
    #[error("routing error: {0}")]
    Routing(#[from] RoutingError),

    /// Provider setup error.
    #[error("provider error: {0}")]
    Provider(String),

    /// Output could not be produced.
    #[error("output error: {0}")]
    Output(String),
}

impl From<ProviderError> for ClientError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err.to_string())
    }
}

impl From<FusionError> for ClientError {
    fn from(err: FusionError) -> Self {
        match err {
            FusionError::InvalidQuery(e) => Self::Query(e),
            FusionError::Routing(e) => Self::Routing(e),
        }
    }
}
