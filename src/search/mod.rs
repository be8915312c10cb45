//! Source discovery across search providers.
//!
//! Four adapters share the [`SearchProvider`] contract:
//!
//! - [`WikipediaSearch`]: keyless baseline, queried on every run
//! - [`Search1ApiSearch`], [`GoogleSearch`], [`BraveSearch`]: credentialed
//!   secondaries, at most one of which runs per call (see
//!   [`SecondaryProvider::select`])
//!
//! [`SearchOrchestrator`] composes them and returns the merged candidate list
//! in arrival order. Truncation is the caller's job.

pub mod brave;
pub mod error;
pub mod google;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod orchestrator;
pub mod provider;
pub mod search1api;
pub mod types;
pub mod wikipedia;


pub use brave::BraveSearch;
pub use error::{SearchError, SearchResult};
pub use google::{CategoryFanOut, GoogleSearch};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockSearchProvider, numbered_candidates};
pub use orchestrator::{SearchOrchestrator, SecondaryProvider};
pub use provider::SearchProvider;
pub use search1api::Search1ApiSearch;
pub use types::{CategorizedCandidates, SearchCategory, SourceCandidate};
pub use wikipedia::WikipediaSearch;
