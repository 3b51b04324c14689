//! Client error types and their classification into the source taxonomy.

use briefdesk_core::api::SourceError;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while talking to the advisor API.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// Folds the HTTP-level error into the retry taxonomy.
    ///
    /// Timeouts, connection failures, 408/429, and 5xx classify as transient;
    /// 404 and 401 are terminal; anything else (including malformed bodies)
    /// is unknown and surfaced as-is.
    pub fn classify(self) -> SourceError {
        match self {
            ClientError::Request(err) if err.is_timeout() || err.is_connect() => {
                SourceError::Transient(err.to_string())
            }
            ClientError::Request(err) => SourceError::Unknown(err.to_string()),
            ClientError::Server { status, message } if is_transient_status(status) => {
                SourceError::Transient(format!("HTTP {status}: {message}"))
            }
            ClientError::Server { status, message } => {
                SourceError::Unknown(format!("HTTP {status}: {message}"))
            }
            ClientError::NotFound { resource, id } => SourceError::not_found(resource, id),
            ClientError::Unauthorized(message) => SourceError::Unauthorized(message),
            ClientError::Decode(message) => SourceError::Unknown(message),
        }
    }
}

impl From<ClientError> for SourceError {
    fn from(err: ClientError) -> Self {
        err.classify()
    }
}

fn is_transient_status(status: u16) -> bool {
    status == 408 || status == 429 || (500..600).contains(&status)
}
