//! Typed error definitions for the catalog sync engine
//!
//! Transport-level and status-level failures are kept distinct for
//! diagnostics, but both degrade to "no data" at the reconciliation
//! boundary — the client never propagates them further up.

use thiserror::Error;

/// Failures of a single marketplace API call.
#[derive(Error, Debug, Clone)]
pub enum ClientError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {message}")]
    Connection { message: String },

    #[error("Remote rejected the request with status {status}")]
    Status { status: u16 },

    #[error("Unexpected response body: {message}")]
    InvalidResponse { message: String },

    #[error("Ozon API credentials are not configured")]
    MissingCredentials,
}

impl ClientError {
    /// Create a connection error from any transport-level failure message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create an invalid-response error for a malformed or unparseable body.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// True for timeout/connection failures, false for remote rejections.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout | Self::Connection { .. })
    }
}

/// Failures surfaced to catalog readers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("No product at position {position}")]
    PositionNotFound { position: usize },

    #[error("Catalog is empty")]
    EmptyCatalog,
}

pub type ClientResult<T> = Result<T, ClientError>;
