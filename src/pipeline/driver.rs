use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, info};
use uuid::Uuid;

use super::error::{PipelineError, PipelineResult};
use super::link::{PostLinkResolver, TelegramPostResolver, find_post_link};
use crate::analysis::{AnalysisResult, RelevanceAnalyzer};
use crate::config::Config;
use crate::constants::{MAX_ANALYZED_CANDIDATES, MIN_CLAIM_CHARS};
use crate::llm::{ChatCompletionsBackend, LanguageBackend};
use crate::progress::{NoProgress, ProgressSink};
use crate::ranking::rank_result;
use crate::search::{SearchOrchestrator, SearchResult};

pub const MISSING_BACKEND: &str = "set OPENAI_API_KEY or OPENROUTER_API_KEY";

pub const NOTICE_LINK_UNRESOLVED: &str =
    "🔗 Could not read the linked post, checking the message text instead...";
pub const NOTICE_FORMING_QUERY: &str = "🤖 AI is forming a search query...";
pub const NOTICE_ANALYZING: &str = "🤖 Analyzing the sources found with AI...";

/// Sequences one run: link resolution, length check, query formation,
/// search, truncation, analysis, ranking.
///
/// Holds no per-run state; concurrent runs share it read-only.
#[derive(Clone)]
pub struct SourcePipeline {
    analyzer: Option<RelevanceAnalyzer>,
    search: SearchOrchestrator,
    resolver: Option<Arc<dyn PostLinkResolver>>,
}

impl std::fmt::Debug for SourcePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourcePipeline")
            .field("backend_configured", &self.analyzer.is_some())
            .field("search", &self.search)
            .field("link_resolution", &self.resolver.is_some())
            .finish()
    }
}

impl SourcePipeline {
    pub fn new(
        backend: Option<Arc<dyn LanguageBackend>>,
        search: SearchOrchestrator,
        resolver: Option<Arc<dyn PostLinkResolver>>,
    ) -> Self {
        Self {
            analyzer: backend.map(RelevanceAnalyzer::new),
            search,
            resolver,
        }
    }

    /// Wires every collaborator from `config`, sharing one HTTP client.
    ///
    /// Link resolution is enabled only when a transport credential is set.
    pub fn from_config(config: &Config, client: Client) -> SearchResult<Self> {
        let backend = ChatCompletionsBackend::from_config(config, client.clone())
            .map(|b| Arc::new(b) as Arc<dyn LanguageBackend>);
        let search = SearchOrchestrator::from_config(config, client.clone())?;
        let resolver = config
            .telegram_bot_token
            .as_ref()
            .map(|_| Arc::new(TelegramPostResolver::new(client)) as Arc<dyn PostLinkResolver>);

        info!(
            backend = backend.is_some(),
            link_resolution = resolver.is_some(),
            "Pipeline configured"
        );

        Ok(Self::new(backend, search, resolver))
    }

    pub fn is_backend_configured(&self) -> bool {
        self.analyzer.is_some()
    }

    /// Runs the whole pipeline for `text` and returns every verdict, ranked.
    ///
    /// `progress` receives a notice at each step boundary; pass `None` for no
    /// notices.
    #[tracing::instrument(skip_all, fields(run_id = %Uuid::new_v4()))]
    pub async fn discover_and_rank(
        &self,
        text: &str,
        progress: Option<&dyn ProgressSink>,
    ) -> PipelineResult<AnalysisResult> {
        let progress = progress.unwrap_or(&NoProgress);
        let analyzer = self
            .analyzer
            .as_ref()
            .ok_or_else(|| PipelineError::Configuration(MISSING_BACKEND.to_string()))?;

        let mut claim = text.trim().to_string();

        if let Some(resolver) = &self.resolver
            && let Some(link) = find_post_link(&claim).map(str::to_string)
        {
            match resolver.resolve(&link).await {
                Some(body) => {
                    debug!(chars = body.chars().count(), "Using linked post text");
                    claim = body.trim().to_string();
                }
                None => progress.notify(NOTICE_LINK_UNRESOLVED).await,
            }
        }

        if claim.chars().count() < MIN_CLAIM_CHARS {
            return Err(PipelineError::InputTooShort {
                min_chars: MIN_CLAIM_CHARS,
            });
        }

        progress.notify(NOTICE_FORMING_QUERY).await;
        let query = analyzer.generate_query(&claim).await?;

        let mut candidates = self.search.discover(&query, progress).await?;
        if candidates.is_empty() {
            return Err(PipelineError::NoSourcesFound);
        }
        let found = candidates.len();
        candidates.truncate(MAX_ANALYZED_CANDIDATES);

        progress.notify(NOTICE_ANALYZING).await;
        let analysis = analyzer.analyze(&claim, &candidates).await?;

        info!(
            found,
            analyzed = candidates.len(),
            verdicts = analysis.sources.len(),
            "Run complete"
        );

        Ok(rank_result(analysis))
    }
}
