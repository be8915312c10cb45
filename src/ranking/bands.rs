use crate::analysis::ConfidenceLevel;
use crate::constants::{HIGH_RELEVANCE_THRESHOLD, MEDIUM_RELEVANCE_THRESHOLD};

/// Display band for a relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelevanceBand {
    High,
    Medium,
    Low,
}

impl RelevanceBand {
    pub fn of(score: u8) -> Self {
        if score >= HIGH_RELEVANCE_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_RELEVANCE_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn mark(&self) -> &'static str {
        match self {
            Self::High => "🟢",
            Self::Medium => "🟡",
            Self::Low => "🔴",
        }
    }
}

pub fn confidence_mark(level: ConfidenceLevel) -> &'static str {
    match level {
        ConfidenceLevel::High => "✅",
        ConfidenceLevel::Medium => "⚠️",
        ConfidenceLevel::Low => "❓",
    }
}
