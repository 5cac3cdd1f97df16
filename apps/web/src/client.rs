//! HTTP client for the PathWeaver gateway.

use std::time::Duration;

use pathweaver_api::models::path::{LearningPathRequest, LearningPathResponse};
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response from gateway (status {status}): {source}")]
    Decode {
        status: u16,
        source: serde_json::Error,
    },
}

#[derive(Clone)]
pub struct GatewayClient {
    client: Client,
    generate_url: String,
}

impl GatewayClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            generate_url: format!("{}/generate-path", endpoint.trim_end_matches('/')),
        })
    }

    /// Calls `POST /generate-path`.
    ///
    /// The body is decoded whatever the status: a `500` still carries the `{error, details}`
    /// shape and decodes as a failure.
    pub async fn generate_path(
        &self,
        query: &str,
        user_id: Option<&str>,
    ) -> Result<LearningPathResponse, ClientError> {
        let request = LearningPathRequest {
            query: query.to_string(),
            user_id: user_id.map(str::to_string),
        };

        let response = self
            .client
            .post(&self.generate_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("Gateway answered {status} with {} bytes", body.len());

        serde_json::from_str(&body).map_err(|source| ClientError::Decode { status, source })
    }
}
