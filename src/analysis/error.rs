use thiserror::Error;

use crate::llm::BackendError;

/// Errors from query formation and relevance analysis.
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    /// The backend reply could not be repaired into an [`AnalysisResult`].
    ///
    /// [`AnalysisResult`]: super::AnalysisResult
    #[error("invalid model output: {0}")]
    InvalidModelOutput(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

pub type AnalysisOutcome<T> = Result<T, AnalysisError>;
