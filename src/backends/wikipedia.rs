//! Wikipedia REST API client implementation for knowledge lookup.
//!
//! Uses the page summary endpoint, which returns a short plain-text extract
//! for a topic. A missing page is not an error; it maps to `Ok(None)`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::SmartBotError;
use crate::knowledge::KnowledgeProvider;

const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";

/// Client for Wikipedia's page summary endpoint. No authentication needed.
pub struct Wikipedia {
    pub base_url: String,
    client: Client,
}

#[derive(Deserialize)]
struct SummaryResponse {
    extract: Option<String>,
}

impl Wikipedia {
    /// Creates a new Wikipedia client.
    pub fn new(timeout_seconds: Option<u64>) -> Self {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(sec));
        }
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client: builder.build().expect("Failed to build reqwest Client"),
        }
    }
}

impl Default for Wikipedia {
    fn default() -> Self {
        Self::new(Some(15))
    }
}

#[async_trait]
impl KnowledgeProvider for Wikipedia {
    async fn search(&self, topic: &str) -> Result<Option<String>, SmartBotError> {
        let title = topic.trim().replace(' ', "_");
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, title))
            .send()
            .await?;

        log::debug!("Wikipedia HTTP status: {}", response.status());

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(SmartBotError::ProviderError(format!(
                "Wikipedia API returned status {}",
                response.status()
            )));
        }

        let summary: SummaryResponse = response
            .json()
            .await
            .map_err(|e| SmartBotError::JsonError(e.to_string()))?;
        Ok(summary.extract.filter(|s| !s.is_empty()))
    }
}

#[tokio::test]
async fn test_wikipedia_search() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var("SMARTBOT_LIVE_TESTS").is_err() {
        eprintln!("test test_wikipedia_search ... ignored, SMARTBOT_LIVE_TESTS not set");
        return Ok(());
    }
    let wiki = Wikipedia::default();
    let snippet = wiki.search("Rust (programming language)").await?;
    assert!(snippet.is_some(), "Expected a summary extract");
    Ok(())
}
