//! Tavily search API client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{SearchClient, SearchError, SearchHit};
use crate::config::ResolvedSearchConfig;

/// Tavily API client
pub struct TavilyClient {
    api_key: String,
    base_url: String,
    search_depth: String,
    http: Client,
}

impl TavilyClient {
    pub fn from_config(config: &ResolvedSearchConfig) -> Result<Self, SearchError> {
        debug!(?config, "from_config: called");
        let api_key = config
            .get_api_key()
            .map_err(|e| SearchError::MissingApiKey(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(SearchError::Network)?;

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            search_depth: config.search_depth.clone(),
            http,
        })
    }

    fn build_request_body(&self, query: &str, max_results: usize) -> serde_json::Value {
        serde_json::json!({
            "api_key": self.api_key,
            "query": query,
            "max_results": max_results,
            "search_depth": self.search_depth,
        })
    }
}

#[async_trait]
impl SearchClient for TavilyClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        debug!(%query, %max_results, "TavilyClient::search: called");
        let url = format!("{}/search", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&self.build_request_body(query, max_results))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            debug!(%status, "TavilyClient::search: API error");
            return Err(SearchError::ApiError { status, message });
        }

        let body: TavilyResponse = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        debug!(hits = body.results.len(), "TavilyClient::search: success");
        Ok(body.into_hits(max_results))
    }
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    title: Option<String>,
    url: Option<String>,
    content: Option<String>,
}

impl TavilyResponse {
    fn into_hits(self, max_results: usize) -> Vec<SearchHit> {
        self.results
            .into_iter()
            .take(max_results)
            .map(|r| SearchHit {
                title: r.title.unwrap_or_else(|| "No title".to_string()),
                url: r.url.unwrap_or_else(|| "No URL".to_string()),
                content: r.content.unwrap_or_else(|| "No content".to_string()),
            })
            .collect()
    }
}
