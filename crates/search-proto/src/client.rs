//! HTTP client for the role search endpoint.

use reqwest::Client;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::SearchError;
use crate::record::{ResultRecord, SearchRequest, SearchResponse};

/// Thin wrapper over `reqwest::Client` bound to one search origin.
///
/// Cloning is cheap and shares the connection pool, so the TUI hands a clone
/// to every spawned request task.
#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    base_url: String,
    top_k: Option<u32>,
    bm25_weight: Option<f32>,
    vector_weight: Option<f32>,
}

impl SearchClient {
    pub fn new(config: &ApiConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(SearchError::Transport)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            top_k: config.top_k,
            bm25_weight: config.bm25_weight,
            vector_weight: config.vector_weight,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    /// `POST {base_url}/search` with `{ "query": ... }`.
    ///
    /// One attempt, no retries. Non-2xx statuses and undecodable bodies are
    /// errors; a body without `results` is an empty list.
    pub async fn search(&self, query: &str) -> Result<Vec<ResultRecord>, SearchError> {
        let request = SearchRequest {
            query: query.to_string(),
            top_k: self.top_k,
            bm25_weight: self.bm25_weight,
            vector_weight: self.vector_weight,
        };

        let url = self.search_url();
        debug!("POST {} query={:?}", url, request.query);

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let body = response.bytes().await?;
        let parsed: SearchResponse = serde_json::from_slice(&body)?;
        let records = parsed.into_records();
        debug!("search {:?} returned {} records", request.query, records.len());
        Ok(records)
    }
}
