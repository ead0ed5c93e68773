//! Remote Q&A integration for free-text questions.
//!
//! The engine only sees the [`QueryClient`] trait; [`HttpQueryClient`] is the
//! production implementation talking JSON over HTTP.

mod http;

pub use http::HttpQueryClient;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::RemoteConfig;
use crate::error::QueryError;

/// Answers a free-text question.
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Human-readable name of the backend, for logs.
    fn name(&self) -> &str;

    /// Ask `question` and return the answer text.
    async fn ask(&self, question: &str) -> Result<String, QueryError>;
}

/// Create the HTTP client from configuration.
pub fn create_client(config: &RemoteConfig) -> Result<Arc<dyn QueryClient>, QueryError> {
    let client = HttpQueryClient::new(config)?;
    tracing::info!(
        endpoint = %config.endpoint,
        timeout = ?config.timeout,
        "Using remote Q&A endpoint"
    );
    Ok(Arc::new(client))
}
