use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, info};

use super::brave::BraveSearch;
use super::error::SearchResult;
use super::google::GoogleSearch;
use super::provider::SearchProvider;
use super::search1api::Search1ApiSearch;
use super::types::SourceCandidate;
use super::wikipedia::WikipediaSearch;
use crate::config::Config;
use crate::constants::{BASELINE_RESULTS, SECONDARY_RESULTS};
use crate::progress::ProgressSink;

/// Credentialed search backends, in strict priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryProvider {
    Search1Api,
    Google,
    Brave,
}

impl SecondaryProvider {
    /// Picks at most one provider: A if its key is set, else B if key and
    /// engine id are both set, else C if its key is set.
    pub fn select(config: &Config) -> Option<Self> {
        if config.search1api_key.is_some() {
            Some(Self::Search1Api)
        } else if config.google_api_key.is_some() && config.google_engine_id.is_some() {
            Some(Self::Google)
        } else if config.brave_api_key.is_some() {
            Some(Self::Brave)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search1Api => "search1api",
            Self::Google => "google",
            Self::Brave => "brave",
        }
    }

    /// Builds the adapter for this provider from the credentials in `config`.
    pub fn build(&self, config: &Config, client: Client) -> Option<Arc<dyn SearchProvider>> {
        match self {
            Self::Search1Api => config
                .search1api_key
                .as_ref()
                .map(|key| Arc::new(Search1ApiSearch::new(client, key)) as Arc<dyn SearchProvider>),
            Self::Google => match (&config.google_api_key, &config.google_engine_id) {
                (Some(key), Some(cx)) => {
                    Some(Arc::new(GoogleSearch::new(client, key, cx)) as Arc<dyn SearchProvider>)
                }
                _ => None,
            },
            Self::Brave => config
                .brave_api_key
                .as_ref()
                .map(|key| Arc::new(BraveSearch::new(client, key)) as Arc<dyn SearchProvider>),
        }
    }
}

/// Runs the baseline provider plus at most one secondary provider and merges
/// their candidates.
///
/// The baseline runs on every call. The secondary, when configured, runs after
/// it; a secondary failure propagates to the caller.
#[derive(Clone)]
pub struct SearchOrchestrator {
    baseline: Arc<dyn SearchProvider>,
    secondary: Option<Arc<dyn SearchProvider>>,
}

impl std::fmt::Debug for SearchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchOrchestrator")
            .field("baseline", &self.baseline.name())
            .field("secondary", &self.secondary.as_ref().map(|s| s.name()))
            .finish()
    }
}

impl SearchOrchestrator {
    pub fn new(
        baseline: Arc<dyn SearchProvider>,
        secondary: Option<Arc<dyn SearchProvider>>,
    ) -> Self {
        Self {
            baseline,
            secondary,
        }
    }

    /// Wires the baseline and the highest-priority configured secondary.
    pub fn from_config(config: &Config, client: Client) -> SearchResult<Self> {
        let baseline = WikipediaSearch::new(client.clone(), &config.wikipedia_api_url)?;
        let selected = SecondaryProvider::select(config);
        let secondary = selected.and_then(|p| p.build(config, client));

        info!(
            baseline = baseline.host(),
            secondary = selected.map(|p| p.as_str()).unwrap_or("none"),
            "Search providers configured"
        );

        Ok(Self::new(Arc::new(baseline), secondary))
    }

    pub fn baseline_name(&self) -> &'static str {
        self.baseline.name()
    }

    pub fn secondary_name(&self) -> Option<&'static str> {
        self.secondary.as_ref().map(|s| s.name())
    }

    /// Returns every candidate in arrival order: baseline buckets first, then
    /// the secondary's, each flattened official, news, blog, research.
    pub async fn discover(
        &self,
        query: &str,
        progress: &dyn ProgressSink,
    ) -> SearchResult<Vec<SourceCandidate>> {
        progress
            .notify(&format!("🔍 Searching {}...", self.baseline.name()))
            .await;
        let mut candidates = self
            .baseline
            .search(query, BASELINE_RESULTS)
            .await?
            .into_ordered();
        debug!(
            provider = self.baseline.name(),
            count = candidates.len(),
            "Baseline candidates"
        );

        if let Some(secondary) = &self.secondary {
            progress
                .notify(&format!("🔍 Also searching {}...", secondary.name()))
                .await;
            let extra = secondary.search(query, SECONDARY_RESULTS).await?;
            debug!(
                provider = secondary.name(),
                count = extra.len(),
                "Secondary candidates"
            );
            candidates.extend(extra.into_ordered());
        }

        Ok(candidates)
    }
}
