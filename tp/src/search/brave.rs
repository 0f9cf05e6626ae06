//! Brave Search API client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{SearchClient, SearchError, SearchHit};
use crate::config::ResolvedSearchConfig;

/// Brave caps `count` at 20
const MAX_COUNT: usize = 20;

/// Brave Search API client
pub struct BraveClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl BraveClient {
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
            http,
        })
    }
}

#[async_trait]
impl SearchClient for BraveClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        debug!(%query, %max_results, "BraveClient::search: called");
        let url = format!("{}/res/v1/web/search", self.base_url);
        let count = max_results.min(MAX_COUNT).to_string();

        let response = self
            .http
            .get(&url)
            .header("X-Subscription-Token", &self.api_key)
            .header("Accept", "application/json")
            .query(&[("q", query), ("count", count.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            debug!(%status, "BraveClient::search: API error");
            return Err(SearchError::ApiError { status, message });
        }

        let body: BraveResponse = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        Ok(body.into_hits(max_results))
    }
}

#[derive(Debug, Deserialize)]
struct BraveResponse {
    web: Option<BraveWeb>,
}

#[derive(Debug, Deserialize)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<BraveResult>,
}

#[derive(Debug, Deserialize)]
struct BraveResult {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
}

impl BraveResponse {
    fn into_hits(self, max_results: usize) -> Vec<SearchHit> {
        self.web
            .map(|w| w.results)
            .unwrap_or_default()
            .into_iter()
            .take(max_results)
            .map(|r| SearchHit {
                title: r.title.unwrap_or_else(|| "No title".to_string()),
                url: r.url.unwrap_or_else(|| "No URL".to_string()),
                content: r.description.unwrap_or_else(|| "No content".to_string()),
            })
            .collect()
    }
}
