use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use super::error::AnalysisOutcome;
use super::prompt::{ANALYSIS_SYSTEM_PROMPT, QUERY_SYSTEM_PROMPT, analysis_prompt, query_prompt};
use super::repair::{repair, strip_code_fence};
use super::types::AnalysisResult;
use crate::constants::MAX_QUERY_CHARS;
use crate::llm::LanguageBackend;
use crate::search::SourceCandidate;

#[derive(Debug, Deserialize)]
struct QueryReply {
    #[serde(default)]
    query: Option<String>,
}

/// Drives both backend calls of a run: query formation and relevance analysis.
#[derive(Clone)]
pub struct RelevanceAnalyzer {
    backend: Arc<dyn LanguageBackend>,
}

impl std::fmt::Debug for RelevanceAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelevanceAnalyzer").finish_non_exhaustive()
    }
}

impl RelevanceAnalyzer {
    pub fn new(backend: Arc<dyn LanguageBackend>) -> Self {
        Self { backend }
    }

    /// Asks the backend to condense `claim` into a search query.
    ///
    /// Transport failures propagate. A reply that carries no usable query
    /// falls back to the claim itself, cut to [`MAX_QUERY_CHARS`].
    #[tracing::instrument(skip_all, fields(claim_chars = claim.chars().count()))]
    pub async fn generate_query(&self, claim: &str) -> AnalysisOutcome<String> {
        let reply = self
            .backend
            .complete_json(QUERY_SYSTEM_PROMPT, &query_prompt(claim))
            .await?;

        let query = serde_json::from_str::<QueryReply>(strip_code_fence(&reply))
            .ok()
            .and_then(|r| r.query)
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        match query {
            Some(query) => {
                debug!(query = %query, "Search query formed");
                Ok(query)
            }
            None => {
                warn!("Query reply unusable, searching with the claim text");
                Ok(fallback_query(claim))
            }
        }
    }

    /// Judges every candidate against `claim` and repairs the reply.
    #[tracing::instrument(skip_all, fields(candidates = candidates.len()))]
    pub async fn analyze(
        &self,
        claim: &str,
        candidates: &[SourceCandidate],
    ) -> AnalysisOutcome<AnalysisResult> {
        let reply = self
            .backend
            .complete_json(ANALYSIS_SYSTEM_PROMPT, &analysis_prompt(claim, candidates))
            .await?;

        let result = repair(&reply, candidates)?;
        if result.sources.len() < candidates.len() {
            debug!(
                returned = result.sources.len(),
                supplied = candidates.len(),
                "Model skipped some candidates"
            );
        }
        Ok(result)
    }
}

pub(crate) fn fallback_query(claim: &str) -> String {
    claim.trim().chars().take(MAX_QUERY_CHARS).collect()
}
