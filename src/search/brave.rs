//! Subscription-token web search (secondary provider C).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::error::{SearchError, SearchResult};
use super::provider::{SearchProvider, capped, upstream_error};
use super::types::{CategorizedCandidates, SearchCategory, SourceCandidate};
use crate::http::host_of;

pub const PROVIDER_NAME: &str = "Brave Search";

pub const DEFAULT_BASE_URL: &str = "https://api.search.brave.com";

const TOKEN_HEADER: &str = "X-Subscription-Token";

#[derive(Debug, Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWeb>,
}

#[derive(Debug, Deserialize)]
struct BraveWeb {
    #[serde(default)]
    results: Vec<BraveHit>,
}

#[derive(Debug, Deserialize)]
struct BraveHit {
    title: String,
    url: String,
    #[serde(default)]
    description: Option<String>,
}

impl From<BraveHit> for SourceCandidate {
    fn from(hit: BraveHit) -> Self {
        SourceCandidate {
            display_host: host_of(&hit.url),
            title: hit.title,
            url: hit.url,
            snippet: hit.description.unwrap_or_default(),
        }
    }
}

#[derive(Clone)]
pub struct BraveSearch {
    client: Client,
    api_key: String,
    base_url: String,
}

impl BraveSearch {
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl SearchProvider for BraveSearch {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    #[tracing::instrument(skip(self), fields(provider = PROVIDER_NAME))]
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> SearchResult<CategorizedCandidates> {
        let limit = capped(max_results);
        let count = limit.to_string();
        let response = self
            .client
            .get(format!("{}/res/v1/web/search", self.base_url))
            .query(&[("q", query), ("count", count.as_str())])
            .header(reqwest::header::ACCEPT, "application/json")
            .header(TOKEN_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| SearchError::network(PROVIDER_NAME, e))?;

        if !response.status().is_success() {
            return Err(upstream_error(PROVIDER_NAME, response).await);
        }

        let body: BraveResponse = response
            .json()
            .await
            .map_err(|e| SearchError::parse(PROVIDER_NAME, e))?;

        let items: Vec<SourceCandidate> = body
            .web
            .map(|w| w.results)
            .unwrap_or_default()
            .into_iter()
            .take(limit)
            .map(SourceCandidate::from)
            .collect();

        debug!(results = items.len(), "Web search complete");
        Ok(CategorizedCandidates::single(SearchCategory::News, items))
    }
}
