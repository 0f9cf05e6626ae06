//! SearchClient trait definition

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::SearchError;

/// One web-search result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub content: String,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
        }
    }
}

/// Web-search collaborator
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Run one query, returning at most `max_results` hits in ranked order
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError>;
}
