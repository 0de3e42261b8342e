use thiserror::Error;

use crate::domain::errors::{ErrorKind, ValidationError};

use super::transport::TransportError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to decode API response (status {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("Endpoint did not return expected response: {status} - {body}")]
    UnexpectedResponse { status: u16, body: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// Classification for callers that branch on the error family.
    ///
    /// Transport, decode and configuration failures have no validation
    /// meaning and are reported as `Generic`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Validation(e) => e.kind(),
            _ => ErrorKind::Generic,
        }
    }
}
