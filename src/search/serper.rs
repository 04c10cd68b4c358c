//! Serper Client
//!
//! Google web search through the Serper API. Only organic results are
//! used; answer boxes and knowledge graphs are ignored.
//!
//! The number of results per query is fixed when the client is built and is
//! not exposed to the end user.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Serper API key not configured")]
    NoApiKey,

    #[error("Search request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse search results: {0}")]
    ParseError(String),
}

/// A single organic web result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub date: Option<String>,
}

#[derive(Serialize)]
struct SerperQuery<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperOrganic>,
}

#[derive(Deserialize)]
struct SerperOrganic {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

pub struct SerperClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    result_count: usize,
}

impl SerperClient {
    /// Create a client against a given endpoint
    pub fn new(api_key: impl Into<String>, base_url: &str, result_count: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            result_count,
        }
    }

    /// Search the web and return at most `result_count` organic results
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        if self.api_key.is_empty() {
            return Err(SearchError::NoApiKey);
        }

        info!(query = %query, num = self.result_count, "Searching the web via Serper");

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .header("X-API-KEY", &self.api_key)
            .json(&SerperQuery {
                q: query,
                num: self.result_count,
            })
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::RequestFailed(format!("{}: {}", status, body)));
        }

        let parsed: SerperResponse = response
            .json()
            .await
            .map_err(|e| SearchError::ParseError(e.to_string()))?;

        debug!(raw_count = parsed.organic.len(), "Raw Serper response received");

        let results: Vec<SearchResult> = parsed
            .organic
            .into_iter()
            .filter_map(|r| {
                // A result without a link cannot be cited
                let link = r.link.filter(|l| !l.is_empty())?;
                Some(SearchResult {
                    title: r.title.unwrap_or_else(|| "Untitled".to_string()),
                    link,
                    snippet: r.snippet.unwrap_or_default(),
                    date: r.date,
                })
            })
            .take(self.result_count)
            .collect();

        info!(count = results.len(), "Serper search completed");
        Ok(results)
    }
}

/// Render results as a numbered list for inclusion in a prompt
pub fn format_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "No web search results available.".to_string();
    }

    let mut output = String::new();
    for (i, result) in results.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, result.title));
        output.push_str(&format!("   Source: {}\n", result.link));
        if let Some(date) = &result.date {
            output.push_str(&format!("   Date: {}\n", date));
        }
        if !result.snippet.is_empty() {
            output.push_str(&format!("   {}\n", result.snippet));
        }
    }
    output
}
