use thiserror::Error;

/// Failure taxonomy shared by every data source.
///
/// The classification drives retry behavior: only `Transient` failures may be
/// re-issued; `NotFound` and `Unauthorized` are terminal by contract, and
/// `Unknown` is surfaced immediately after being logged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Transient failure: {0}")]
    Transient(String),
    #[error("Unexpected failure: {0}")]
    Unknown(String),
}

impl SourceError {
    /// Shorthand for the not-found case.
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        SourceError::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Whether the retry policy may re-issue the failed request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SourceError::Transient(_))
    }

    /// True for the not-found classification.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound { .. })
    }
}

/// Result type for data-source operations.
pub type Result<T> = std::result::Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = SourceError::not_found("Client", "client-404");
        assert_eq!(error.to_string(), "Client not found: client-404");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_only_transient_is_retryable() {
        assert!(SourceError::Transient("connection reset".to_string()).is_retryable());
        assert!(!SourceError::not_found("Meeting", "meeting-9").is_retryable());
        assert!(!SourceError::Unauthorized("token expired".to_string()).is_retryable());
        assert!(!SourceError::Unknown("malformed body".to_string()).is_retryable());
    }

    #[test]
    fn test_transient_display() {
        let error = SourceError::Transient("HTTP 503".to_string());
        assert_eq!(error.to_string(), "Transient failure: HTTP 503");
    }
}
