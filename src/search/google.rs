//! API-key custom search (secondary provider B).
//!
//! This is the one provider invoked through the four-category fan-out: one
//! site-restricted sub-query per [`SearchCategory`], issued concurrently. A
//! failing sub-query is logged and contributes an empty bucket, so one
//! category never aborts the others.

use async_trait::async_trait;
use futures_util::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::error::{SearchError, SearchResult};
use super::provider::{SearchProvider, capped};
use super::types::{CategorizedCandidates, SearchCategory, SourceCandidate};
use crate::constants::CATEGORY_RESULTS;

pub const PROVIDER_NAME: &str = "Google Search";

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// The API refuses `num` above 10.
const GOOGLE_RESULT_CEILING: usize = 10;

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    items: Vec<GoogleItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleItem {
    title: String,
    link: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    display_link: String,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: Option<GoogleErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    message: Option<String>,
}

impl From<GoogleItem> for SourceCandidate {
    fn from(item: GoogleItem) -> Self {
        SourceCandidate {
            title: item.title,
            url: item.link,
            snippet: item.snippet,
            display_host: item.display_link,
        }
    }
}

/// Site restriction appended to the query for each category.
pub fn category_filter(category: SearchCategory) -> &'static str {
    match category {
        SearchCategory::Official => "site:gov.ru OR site:gov OR site:org",
        SearchCategory::News => {
            "site:ria.ru OR site:rbc.ru OR site:tass.ru OR site:interfax.ru OR site:lenta.ru"
        }
        SearchCategory::Blog => "site:habr.com OR site:vc.ru OR site:dtf.ru",
        SearchCategory::Research => {
            "site:scholar.google.com OR site:arxiv.org OR site:pubmed.ncbi.nlm.nih.gov"
        }
    }
}

pub fn category_query(query: &str, category: SearchCategory) -> String {
    format!("{} {}", query, category_filter(category))
}

#[derive(Clone)]
pub struct GoogleSearch {
    client: Client,
    api_key: String,
    engine_id: String,
    base_url: String,
}

impl GoogleSearch {
    pub fn new(client: Client, api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Single unrestricted query. Errors propagate.
    pub async fn search_raw(
        &self,
        query: &str,
        max_results: usize,
    ) -> SearchResult<Vec<SourceCandidate>> {
        let limit = capped(max_results).min(GOOGLE_RESULT_CEILING);
        let num = limit.to_string();

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::network(PROVIDER_NAME, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GoogleErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .map(str::to_string)
                        .unwrap_or(body)
                });
            warn!(status = %status, "Custom search returned an error");
            return Err(SearchError::Upstream {
                provider: PROVIDER_NAME,
                status: status.as_u16(),
                message,
            });
        }

        let body: GoogleResponse = response
            .json()
            .await
            .map_err(|e| SearchError::parse(PROVIDER_NAME, e))?;

        Ok(body
            .items
            .into_iter()
            .take(limit)
            .map(SourceCandidate::from)
            .collect())
    }

    /// Site-restricted query for one category. Errors propagate.
    pub async fn search_category(
        &self,
        query: &str,
        category: SearchCategory,
        max_results: usize,
    ) -> SearchResult<Vec<SourceCandidate>> {
        self.search_raw(&category_query(query, category), max_results)
            .await
    }

    /// Runs all four category sub-queries concurrently and joins them once
    /// every one has completed or failed.
    pub async fn search_all_categories(&self, query: &str, per_category: usize) -> CategoryFanOut {
        let outcomes = join_all(
            SearchCategory::ALL
                .iter()
                .map(|category| self.search_category(query, *category, per_category)),
        )
        .await;

        let mut fan_out = CategoryFanOut::default();
        for (category, outcome) in SearchCategory::ALL.iter().zip(outcomes) {
            *fan_out.candidates.bucket_mut(*category) = match outcome {
                Ok(items) => items,
                Err(e) => {
                    warn!(category = %category, error = %e, "Category search failed, using empty bucket");
                    fan_out.failed.push(*category);
                    Vec::new()
                }
            };
        }

        if fan_out.all_failed() {
            warn!(
                provider = PROVIDER_NAME,
                "Every category search failed; check GOOGLE_SEARCH_API_KEY and GOOGLE_SEARCH_ENGINE_ID"
            );
        }
        fan_out
    }
}

/// Joined outcome of the category fan-out.
#[derive(Debug, Default)]
pub struct CategoryFanOut {
    pub candidates: CategorizedCandidates,
    /// Categories whose sub-query failed and contributed an empty bucket.
    pub failed: Vec<SearchCategory>,
}

impl CategoryFanOut {
    pub fn all_failed(&self) -> bool {
        self.failed.len() == SearchCategory::ALL.len()
    }
}

#[async_trait]
impl SearchProvider for GoogleSearch {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    #[tracing::instrument(skip(self), fields(provider = PROVIDER_NAME))]
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> SearchResult<CategorizedCandidates> {
        let per_category = max_results.min(CATEGORY_RESULTS);
        let fan_out = self.search_all_categories(query, per_category).await;
        debug!(
            results = fan_out.candidates.len(),
            failed = fan_out.failed.len(),
            "Category fan-out complete"
        );
        Ok(fan_out.candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_query_appends_filter() {
        let q = category_query("moon landing", SearchCategory::Research);
        assert!(q.starts_with("moon landing "));
        assert!(q.contains("site:arxiv.org"));
    }

    #[test]
    fn test_every_category_has_a_filter() {
        for category in SearchCategory::ALL {
            assert!(category_filter(category).starts_with("site:"));
        }
    }

    #[test]
    fn test_item_deserializes_camel_case() {
        let body: GoogleResponse = serde_json::from_str(
            r#"{"items":[{"title":"T","link":"https://tass.ru/1","snippet":"S","displayLink":"tass.ru"}]}"#,
        )
        .unwrap();
        let candidate = SourceCandidate::from(body.items.into_iter().next().unwrap());
        assert_eq!(candidate.display_host, "tass.ru");
        assert_eq!(candidate.url, "https://tass.ru/1");
    }

    #[test]
    fn test_missing_items_is_empty() {
        let body: GoogleResponse = serde_json::from_str(r#"{"kind":"customsearch"}"#).unwrap();
        assert!(body.items.is_empty());
    }
}
