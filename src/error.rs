//! Error types for chatflow.

use std::path::PathBuf;
use std::time::Duration;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Remote query error: {0}")]
    Query(#[from] QueryError),

    #[error("Shell error: {0}")]
    Shell(#[from] ShellError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors raised while loading the response catalog or greeting.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog failed validation with {count} issue(s): {summary}")]
    Invalid { count: usize, summary: String },
}

/// Remote Q&A endpoint failures. Never surfaced to the user.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("Request to {endpoint} timed out after {timeout:?}")]
    Timeout { endpoint: String, timeout: Duration },

    #[error("Endpoint {endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Malformed payload from {endpoint}: {reason}")]
    MalformedPayload { endpoint: String, reason: String },
}

/// Presentation shell errors (terminal I/O, HTTP listener).
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for chatflow.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_display() {
        let err = QueryError::Status {
            endpoint: "http://localhost:8000/ask".into(),
            status: 502,
        };
        assert_eq!(
            err.to_string(),
            "Endpoint http://localhost:8000/ask returned status 502"
        );
    }

    #[test]
    fn test_catalog_error_wraps_into_top_level() {
        let err: Error = CatalogError::Invalid {
            count: 2,
            summary: "a; b".into(),
        }
        .into();
        assert!(matches!(err, Error::Catalog(_)));
        assert_eq!(
            err.to_string(),
            "Catalog error: Catalog failed validation with 2 issue(s): a; b"
        );
    }
}
