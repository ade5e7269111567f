//! Error types for the SPARQL bridge

use thiserror::Error;

use crate::rdf::RdfError;

/// Errors that can occur when building SPARQL text or talking to the store
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Malformed caller input, rejected before any network call
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The store was reachable but rejected or failed the operation
    #[error("Store returned HTTP {status}: {body}")]
    Store {
        /// Upstream HTTP status code
        status: u16,
        /// Upstream response body (empty when it could not be read)
        body: String,
    },

    /// The store could not be reached (connection refused, DNS, timeout)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a success status but an unreadable body
    #[error("Malformed store response: {0}")]
    MalformedResponse(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BridgeError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        BridgeError::InvalidArgument(msg.into())
    }

    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            BridgeError::InvalidArgument(_) => "invalid_argument",
            BridgeError::Store { .. } => "store_error",
            BridgeError::Transport(_) => "transport_error",
            BridgeError::MalformedResponse(_) => "malformed_response",
            BridgeError::Config(_) => "config_error",
        }
    }

    /// Whether the caller, not the store, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, BridgeError::InvalidArgument(_))
    }
}

impl From<RdfError> for BridgeError {
    fn from(err: RdfError) -> Self {
        BridgeError::InvalidArgument(err.to_string())
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinct() {
        let store = BridgeError::Store { status: 500, body: "syntax error".to_string() };
        let invalid = BridgeError::invalid("limit must be positive");

        assert_eq!(store.kind(), "store_error");
        assert_eq!(invalid.kind(), "invalid_argument");
        assert!(invalid.is_client_error());
        assert!(!store.is_client_error());
    }

    #[test]
    fn test_store_error_message_carries_body() {
        let err = BridgeError::Store { status: 400, body: "Parse error line 1".to_string() };
        assert_eq!(err.to_string(), "Store returned HTTP 400: Parse error line 1");
    }

    #[test]
    fn test_rdf_error_is_invalid_argument() {
        let err: BridgeError = RdfError::InvalidIri("nope".to_string()).into();
        assert!(matches!(err, BridgeError::InvalidArgument(_)));
    }
}
