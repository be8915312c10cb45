//! Query formation and relevance analysis on top of a [`LanguageBackend`].
//!
//! The backend's reply is untrusted: [`repair`] turns it into an
//! [`AnalysisResult`] or fails with [`AnalysisError::InvalidModelOutput`].
//!
//! [`LanguageBackend`]: crate::llm::LanguageBackend

pub mod analyzer;
pub mod error;
pub mod prompt;
pub mod repair;
pub mod types;


pub use analyzer::RelevanceAnalyzer;
pub use error::{AnalysisError, AnalysisOutcome};
pub use repair::{MISSING_EXPLANATION, clamp_score, repair};
pub use types::{AnalysisResult, ConfidenceLevel, SourceVerdict};
