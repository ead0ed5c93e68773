//! JSON-over-HTTP query client.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::config::RemoteConfig;
use crate::error::QueryError;

use super::QueryClient;

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

#[derive(Debug, Deserialize)]
struct AskResponse {
    answer: String,
}

/// Sends `POST <endpoint>` with `{ "question" }` and expects `{ "answer" }`.
pub struct HttpQueryClient {
    endpoint: String,
    timeout: std::time::Duration,
    client: reqwest::Client,
}

impl HttpQueryClient {
    pub fn new(config: &RemoteConfig) -> Result<Self, QueryError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| QueryError::Transport {
                endpoint: config.endpoint.clone(),
                reason: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            timeout: config.timeout,
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport_error(&self, err: reqwest::Error) -> QueryError {
        if err.is_timeout() {
            QueryError::Timeout {
                endpoint: self.endpoint.clone(),
                timeout: self.timeout,
            }
        } else {
            QueryError::Transport {
                endpoint: self.endpoint.clone(),
                reason: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl QueryClient for HttpQueryClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn ask(&self, question: &str) -> Result<String, QueryError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&AskRequest { question })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(QueryError::Status {
                endpoint: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(|e| self.transport_error(e))?;
        let parsed: AskResponse =
            serde_json::from_slice(&body).map_err(|e| QueryError::MalformedPayload {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!(
            endpoint = %self.endpoint,
            answer_len = parsed.answer.len(),
            "Remote answer received"
        );
        Ok(parsed.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(AskRequest { question: "hours?" }).unwrap();
        assert_eq!(body, serde_json::json!({ "question": "hours?" }));
    }

    #[test]
    fn test_response_requires_answer() {
        assert!(serde_json::from_str::<AskResponse>(r#"{"answer": "9-5"}"#).is_ok());
        assert!(serde_json::from_str::<AskResponse>(r#"{"reply": "9-5"}"#).is_err());
        assert!(serde_json::from_str::<AskResponse>(r#"{"answer": null}"#).is_err());
        assert!(serde_json::from_str::<AskResponse>(r#"{"answer": 42}"#).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let config = RemoteConfig {
            // Port 9 (discard) on localhost is practically never listening.
            endpoint: "http://127.0.0.1:9/ask".into(),
            timeout: std::time::Duration::from_secs(2),
        };
        let client = HttpQueryClient::new(&config).unwrap();
        let err = client.ask("hello").await.unwrap_err();
        assert!(matches!(
            err,
            QueryError::Transport { .. } | QueryError::Timeout { .. }
        ));
    }
}
