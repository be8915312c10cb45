use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::llm::BackendError;
use crate::search::SearchError;

/// Why a pipeline run stopped. Every variant ends the run.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// A required credential is missing. Raised before any network call.
    #[error("AI API not configured ({0})")]
    Configuration(String),

    #[error("Text is too short to analyze (at least {min_chars} characters required)")]
    InputTooShort { min_chars: usize },

    /// The baseline or the selected secondary search provider failed.
    #[error(transparent)]
    Provider(#[from] SearchError),

    #[error("No sources found. Try rephrasing the text.")]
    NoSourcesFound,

    #[error("AI returned an unusable analysis: {0}")]
    InvalidModelOutput(String),

    /// The language backend call itself failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl PipelineError {
    /// Errors the caller can fix by changing input or setup.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Self::InputTooShort { .. } | Self::NoSourcesFound | Self::Configuration(_)
        )
    }
}

impl From<AnalysisError> for PipelineError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidModelOutput(msg) => Self::InvalidModelOutput(msg),
            AnalysisError::Backend(e) => Self::Backend(e),
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
