//! Keyless encyclopedia search, queried on every run.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::error::{SearchError, SearchResult};
use super::provider::{SearchProvider, capped, upstream_error};
use super::types::{CategorizedCandidates, SearchCategory, SourceCandidate};

pub const PROVIDER_NAME: &str = "Wikipedia";

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("static regex is valid"));

#[derive(Debug, Deserialize)]
struct WikiResponse {
    #[serde(default)]
    query: Option<WikiQuery>,
}

#[derive(Debug, Deserialize)]
struct WikiQuery {
    #[serde(default)]
    search: Vec<WikiHit>,
}

#[derive(Debug, Deserialize)]
struct WikiHit {
    title: String,
    #[serde(default)]
    snippet: Option<String>,
}

#[derive(Clone)]
pub struct WikipediaSearch {
    client: Client,
    api_url: Url,
    host: String,
}

impl WikipediaSearch {
    /// Creates an adapter for the `api.php` endpoint at `api_url`.
    pub fn new(client: Client, api_url: &str) -> SearchResult<Self> {
        let api_url = Url::parse(api_url).map_err(|e| SearchError::parse(PROVIDER_NAME, e))?;
        let host = api_url
            .host_str()
            .ok_or_else(|| SearchError::parse(PROVIDER_NAME, "API URL has no host"))?
            .to_string();

        Ok(Self {
            client,
            api_url,
            host,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn request_url(&self, query: &str, limit: usize) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("list", "search")
            .append_pair("srsearch", query)
            .append_pair("srlimit", &limit.to_string())
            .append_pair("format", "json")
            .append_pair("origin", "*");
        url
    }

    /// Builds `https://{host}/wiki/{Title_With_Underscores}`.
    pub(crate) fn article_url(&self, title: &str) -> String {
        let fallback = format!("https://{}/wiki/", self.host);
        let Ok(mut url) = Url::parse(&fallback) else {
            return fallback;
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&title.replace(' ', "_"));
        }
        url.to_string()
    }

    fn to_candidate(&self, hit: WikiHit) -> SourceCandidate {
        let snippet = hit
            .snippet
            .map(|s| HTML_TAG.replace_all(&s, "").into_owned())
            .unwrap_or_default();

        SourceCandidate {
            url: self.article_url(&hit.title),
            title: hit.title,
            snippet,
            display_host: self.host.clone(),
        }
    }
}

#[async_trait]
impl SearchProvider for WikipediaSearch {
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
        let response = self
            .client
            .get(self.request_url(query, limit))
            .send()
            .await
            .map_err(|e| SearchError::network(PROVIDER_NAME, e))?;

        if !response.status().is_success() {
            return Err(upstream_error(PROVIDER_NAME, response).await);
        }

        let body: WikiResponse = response
            .json()
            .await
            .map_err(|e| SearchError::parse(PROVIDER_NAME, e))?;

        let items: Vec<SourceCandidate> = body
            .query
            .map(|q| q.search)
            .unwrap_or_default()
            .into_iter()
            .take(limit)
            .map(|hit| self.to_candidate(hit))
            .collect();

        debug!(results = items.len(), "Encyclopedia search complete");
        Ok(CategorizedCandidates::single(SearchCategory::News, items))
    }
}
