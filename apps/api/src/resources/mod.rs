//! Resource index: keyword search over the learning-resource catalog held in OpenSearch.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::models::resource::ResourceRecord;

#[derive(Debug, Error)]
pub enum ResourceIndexError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected search response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The search seam. Ranking is whatever the index decides; results come back best-first.
#[async_trait]
pub trait ResourceIndex: Send + Sync {
    async fn search(
        &self,
        query: &str,
        fields: &[&str],
        limit: usize,
    ) -> Result<Vec<ResourceRecord>, ResourceIndexError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: SearchHits,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "_source", default)]
    source: ResourceRecord,
}

/// Optional basic-auth credentials for the cluster.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

/// OpenSearch client speaking the REST `_search` API directly.
#[derive(Clone)]
pub struct OpenSearchIndex {
    client: Client,
    search_url: String,
    auth: Option<BasicAuth>,
}

impl OpenSearchIndex {
    pub fn new(
        base_url: &str,
        index: &str,
        auth: Option<BasicAuth>,
        timeout: Duration,
    ) -> Result<Self, ResourceIndexError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            search_url: format!("{}/{}/_search", base_url.trim_end_matches('/'), index),
            auth,
        })
    }
}

#[async_trait]
impl ResourceIndex for OpenSearchIndex {
    async fn search(
        &self,
        query: &str,
        fields: &[&str],
        limit: usize,
    ) -> Result<Vec<ResourceRecord>, ResourceIndexError> {
        let mut request = self
            .client
            .post(&self.search_url)
            .json(&multi_match_body(query, fields, limit));
        if let Some(auth) = &self.auth {
            request = request.basic_auth(&auth.username, Some(&auth.password));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ResourceIndexError::Api {
                status: status.as_u16(),
                message: search_error_message(&body),
            });
        }

        let records = parse_hits(&body)?;
        debug!("Resource search returned {} hits", records.len());
        Ok(records)
    }
}

/// Builds a `multi_match` query body returning at most `limit` hits.
fn multi_match_body(query: &str, fields: &[&str], limit: usize) -> Value {
    json!({
        "size": limit,
        "query": {
            "multi_match": {
                "query": query,
                "fields": fields,
            }
        }
    })
}

fn parse_hits(body: &str) -> Result<Vec<ResourceRecord>, serde_json::Error> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.hits.hits.into_iter().map(|hit| hit.source).collect())
}

/// OpenSearch errors look like `{"error": {"reason": "..."}}` or `{"error": "..."}`.
fn search_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| match &v["error"] {
            Value::String(s) => Some(s.clone()),
            Value::Object(o) => o.get("reason").and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .unwrap_or_else(|| body.to_string())
}
