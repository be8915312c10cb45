use async_trait::async_trait;
use reqwest::Response;

use super::error::{SearchError, SearchResult};
use super::types::CategorizedCandidates;
use crate::constants::PROVIDER_RESULT_CEILING;

/// One remote search API behind the common candidate shape.
///
/// Implementations build the provider request, map its fields into
/// [`SourceCandidate`](super::SourceCandidate)s and cap the output at
/// `min(max_results, ceiling)`. Failures are returned, never swallowed.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Display name used in logs, progress notices and error messages.
    fn name(&self) -> &'static str;

    async fn search(&self, query: &str, max_results: usize)
    -> SearchResult<CategorizedCandidates>;
}

/// Applies the shared provider ceiling to a requested result count.
pub(crate) fn capped(requested: usize) -> usize {
    requested.min(PROVIDER_RESULT_CEILING)
}

/// Turns a non-success response into [`SearchError::Upstream`].
pub(crate) async fn upstream_error(provider: &'static str, response: Response) -> SearchError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(provider, status = %status, "Search provider returned an error");
    SearchError::Upstream {
        provider,
        status: status.as_u16(),
        message: body,
    }
}
