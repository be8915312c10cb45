use std::fmt;

use serde::{Deserialize, Serialize};

/// How sure the model is that a source confirms or refutes the claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    #[default]
    Low,
}

impl ConfidenceLevel {
    /// Case-insensitive parse; anything unrecognized is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The model's judgment of one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceVerdict {
    pub source_url: String,
    pub source_title: String,
    /// Always within `0..=100`.
    pub relevance_score: u8,
    pub confidence_level: ConfidenceLevel,
    pub explanation: String,
    pub matches: Vec<String>,
}

/// Terminal output of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sources: Vec<SourceVerdict>,
    pub summary: String,
}
