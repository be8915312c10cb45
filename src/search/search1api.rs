//! Bearer-token search aggregator (secondary provider A).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::error::{SearchError, SearchResult};
use super::provider::{SearchProvider, capped, upstream_error};
use super::types::{CategorizedCandidates, SearchCategory, SourceCandidate};
use crate::http::host_of;

pub const PROVIDER_NAME: &str = "Search1API";

pub const DEFAULT_BASE_URL: &str = "https://api.search1api.com";

/// Engine the aggregator fans out to.
const SEARCH_SERVICE: &str = "duckduckgo";

#[derive(Debug, Serialize)]
struct AggregatorRequest<'a> {
    query: &'a str,
    search_service: &'a str,
    max_results: usize,
}

#[derive(Debug, Default, Deserialize)]
struct AggregatorItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    display_link: Option<String>,
}

#[derive(Clone)]
pub struct Search1ApiSearch {
    client: Client,
    api_key: String,
    base_url: String,
}

impl Search1ApiSearch {
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

/// Finds the result list: `results`, `data`, or the body itself.
pub(crate) fn extract_items(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => ["results", "data"]
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn to_candidate(item: AggregatorItem) -> SourceCandidate {
    let link = item.link.unwrap_or_default();
    let display_host = item.display_link.unwrap_or_else(|| host_of(&link));
    SourceCandidate {
        title: item.title.unwrap_or_default(),
        url: link,
        snippet: item.snippet.unwrap_or_default(),
        display_host,
    }
}

pub(crate) fn map_items(items: Vec<Value>, limit: usize) -> Vec<SourceCandidate> {
    items
        .into_iter()
        .take(limit)
        .map(|v| serde_json::from_value::<AggregatorItem>(v).unwrap_or_default())
        .map(to_candidate)
        .collect()
}

#[async_trait]
impl SearchProvider for Search1ApiSearch {
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
        let request = AggregatorRequest {
            query,
            search_service: SEARCH_SERVICE,
            max_results: limit,
        };

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SearchError::network(PROVIDER_NAME, e))?;

        if !response.status().is_success() {
            return Err(upstream_error(PROVIDER_NAME, response).await);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(PROVIDER_NAME, e))?;

        let items = map_items(extract_items(body), limit);
        debug!(results = items.len(), "Aggregator search complete");
        Ok(CategorizedCandidates::single(SearchCategory::News, items))
    }
}
