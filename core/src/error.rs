//! Error types and handling for jobdash core

use thiserror::Error;

/// Result type alias for jobdash operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for jobdash core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Router errors
    #[error("Router error: {0}")]
    Router(#[from] RouterError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// The API error behind this error, if any
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the request was aborted by the client-side timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Api(ApiError::Timeout { .. }))
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },
}

/// Backend API errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server did not answer before the client-side timer fired
    #[error("Request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// The server answered with a non-success status
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// Transport failure (refused connection, DNS, broken body)
    #[error("Network error: {message}")]
    Network { message: String },

    /// The body could not be decoded into the expected shape
    #[error("Failed to parse response: {message}")]
    Parse { message: String },
}

/// Router errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RouterError {
    #[error("No routes configured")]
    NoRoutes,

    #[error("Default route '{0}' is not registered")]
    DefaultRouteMissing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_messages() {
        let error = ApiError::Http { status: 503 };
        assert_eq!(error.to_string(), "HTTP error! status: 503");

        let error = ApiError::Timeout { timeout_ms: 30000 };
        assert_eq!(error.to_string(), "Request timed out after 30000 ms");
    }

    #[test]
    fn test_timeout_classification() {
        let error: Error = ApiError::Timeout { timeout_ms: 10 }.into();
        assert!(error.is_timeout());

        let error: Error = ApiError::Network {
            message: "connection refused".to_string(),
        }
        .into();
        assert!(!error.is_timeout());
        assert!(matches!(error.api(), Some(ApiError::Network { .. })));
    }

    #[test]
    fn test_serialization_error_converts() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = source.into();
        assert!(matches!(error, Error::Serialization(_)));
        assert!(error.api().is_none());
    }

    #[test]
    fn test_router_error_types() {
        let error = RouterError::DefaultRouteMissing("dashboard".to_string());
        assert_eq!(
            error.to_string(),
            "Default route 'dashboard' is not registered"
        );
    }
}
