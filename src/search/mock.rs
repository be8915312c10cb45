use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::error::{SearchError, SearchResult};
use super::provider::SearchProvider;
use super::types::{CategorizedCandidates, SearchCategory, SourceCandidate};

/// In-memory provider that returns a fixed outcome and records its calls.
pub struct MockSearchProvider {
    name: &'static str,
    outcome: Result<CategorizedCandidates, SearchError>,
    calls: AtomicUsize,
    queries: Mutex<Vec<(String, usize)>>,
}

impl MockSearchProvider {
    pub fn returning(name: &'static str, candidates: CategorizedCandidates) -> Self {
        Self {
            name,
            outcome: Ok(candidates),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Convenience: every candidate in the `news` bucket.
    pub fn with_news(name: &'static str, items: Vec<SourceCandidate>) -> Self {
        Self::returning(name, CategorizedCandidates::single(SearchCategory::News, items))
    }

    pub fn empty(name: &'static str) -> Self {
        Self::returning(name, CategorizedCandidates::default())
    }

    pub fn failing(name: &'static str, error: SearchError) -> Self {
        Self {
            name,
            outcome: Err(error),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(query, max_results)` for every call, in order.
    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> SearchResult<CategorizedCandidates> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut queries) = self.queries.lock() {
            queries.push((query.to_string(), max_results));
        }
        self.outcome.clone()
    }
}

/// Builds `n` distinct candidates titled `"{prefix} {i}"` (1-based).
pub fn numbered_candidates(prefix: &str, n: usize) -> Vec<SourceCandidate> {
    (1..=n)
        .map(|i| {
            SourceCandidate::new(
                format!("{prefix} {i}"),
                format!("https://example.org/{}/{i}", prefix.to_lowercase().replace(' ', "-")),
                format!("Snippet {i}"),
                "example.org",
            )
        })
        .collect()
}
