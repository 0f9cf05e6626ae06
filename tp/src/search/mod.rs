//! Web-search collaborator
//!
//! Provides the [`SearchClient`] trait, Tavily and Brave clients, and the
//! formatting used to embed results in a prompt.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod brave;
mod error;
mod tavily;

pub use brave::BraveClient;
pub use client::{SearchClient, SearchHit};
pub use error::SearchError;
pub use tavily::TavilyClient;

use crate::config::{ResolvedSearchConfig, SearchConfig};

/// Create a search client based on the provider specified in config
pub fn create_search_client(config: &SearchConfig) -> Result<Arc<dyn SearchClient>, SearchError> {
    let resolved = config
        .resolve()
        .map_err(|e| SearchError::UnsupportedProvider(e.to_string()))?;

    create_search_client_from_resolved(&resolved)
}

/// Create a search client from a resolved configuration
pub fn create_search_client_from_resolved(
    config: &ResolvedSearchConfig,
) -> Result<Arc<dyn SearchClient>, SearchError> {
    debug!(provider = %config.provider, "create_search_client_from_resolved: called");
    match config.provider.as_str() {
        "tavily" => Ok(Arc::new(TavilyClient::from_config(config)?)),
        "brave" => Ok(Arc::new(BraveClient::from_config(config)?)),
        other => Err(SearchError::UnsupportedProvider(format!(
            "Unknown search provider: '{}'. Supported: tavily, brave",
            other
        ))),
    }
}

/// Render hits as the numbered source block embedded in the suggestion prompt
///
/// Uses the first `max_results` hits; each hit's content is cut to
/// `content_chars` characters.
pub fn format_results(hits: &[SearchHit], max_results: usize, content_chars: usize) -> String {
    debug!(hit_count = hits.len(), %max_results, "format_results: called");
    hits.iter()
        .take(max_results)
        .enumerate()
        .map(|(i, hit)| {
            format!(
                "Source {}: {}\nURL: {}\nContent: {}...\n\n",
                i + 1,
                hit.title,
                hit.url,
                truncate_chars(&hit.content, content_chars)
            )
        })
        .collect()
}

/// Truncate to at most `max_chars` characters, never splitting a character
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
