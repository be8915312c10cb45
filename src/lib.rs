//! SourceHound library crate (used by the server binary and integration tests).
//!
//! Given a free-text claim, SourceHound discovers candidate web sources, asks a
//! language model to judge each one, and returns a ranked short list.
//!
//! # Public API Surface
//!
//! ## Core
//! - [`SourcePipeline`] - the claim-to-verdicts run ([`SourcePipeline::discover_and_rank`])
//! - [`Config`], [`ConfigError`] - environment configuration, read once at startup
//! - [`AnalysisResult`], [`SourceVerdict`], [`SourceCandidate`] - data model
//! - [`PipelineError`] - why a run stopped
//!
//! ## Collaborators
//! - [`SearchProvider`] adapters and the [`SearchOrchestrator`]
//! - [`LanguageBackend`] and its chat-completions client
//! - [`RelevanceAnalyzer`] and the reply [`repair`] step
//! - [`rank`] / [`format_condensed`] for presentation
//!
//! ## Surfaces
//! - [`gateway`] - Axum router for the chat webhook and the programmatic endpoint
//! - [`telegram`] - chat transport client and user-facing error text
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod analysis;
pub mod config;
pub mod constants;
pub mod gateway;
pub mod http;
pub mod llm;
pub mod pipeline;
pub mod progress;
pub mod ranking;
pub mod search;
pub mod telegram;

pub use analysis::{
    AnalysisError, AnalysisResult, ConfidenceLevel, RelevanceAnalyzer, SourceVerdict, repair,
};
pub use config::{Config, ConfigError};
pub use gateway::{AppState, GatewayError, create_router_with_state};
pub use http::build_client;
pub use llm::{BackendError, BackendTarget, ChatCompletionsBackend, LanguageBackend};
#[cfg(any(test, feature = "mock"))]
pub use llm::MockBackend;
pub use pipeline::{
    PipelineError, PipelineResult, PostLinkResolver, SourcePipeline, TelegramPostResolver,
};
#[cfg(any(test, feature = "mock"))]
pub use pipeline::MockPostResolver;
pub use progress::{NoProgress, ProgressSink};
#[cfg(any(test, feature = "mock"))]
pub use progress::RecordingProgress;
pub use ranking::{format_condensed, rank};
pub use search::{
    BraveSearch, CategorizedCandidates, GoogleSearch, Search1ApiSearch, SearchCategory,
    SearchError, SearchOrchestrator, SearchProvider, SecondaryProvider, SourceCandidate,
    WikipediaSearch,
};
#[cfg(any(test, feature = "mock"))]
pub use search::MockSearchProvider;
pub use telegram::{ChatProgress, ChatTransport, TelegramClient};
#[cfg(any(test, feature = "mock"))]
pub use telegram::MockTransport;
