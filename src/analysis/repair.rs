//! Validation of untrusted backend replies.
//!
//! Replies are first deserialized into a permissive raw schema where every
//! per-verdict field is an optional JSON value. Only the top-level shape can
//! fail; field-level defects are repaired against the candidate that sits at
//! the same position.

use serde::Deserialize;
use serde_json::Value;

use super::error::{AnalysisError, AnalysisOutcome};
use super::types::{AnalysisResult, ConfidenceLevel, SourceVerdict};
use crate::constants::MAX_RELEVANCE_SCORE;
use crate::search::SourceCandidate;

pub const MISSING_EXPLANATION: &str = "No explanation provided";

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    sources: Vec<Value>,
    #[serde(default)]
    summary: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawVerdict {
    source_url: Option<Value>,
    source_title: Option<Value>,
    relevance_score: Option<Value>,
    confidence_level: Option<Value>,
    explanation: Option<Value>,
    matches: Option<Value>,
}

/// Parses and repairs an analysis reply.
///
/// Verdicts beyond `candidates.len()` are dropped. Candidates the model
/// skipped are not back-filled.
pub fn repair(reply: &str, candidates: &[SourceCandidate]) -> AnalysisOutcome<AnalysisResult> {
    let body = strip_code_fence(reply);
    if body.is_empty() {
        return Err(AnalysisError::InvalidModelOutput("empty reply".to_string()));
    }

    let raw: RawAnalysis = serde_json::from_str(body)
        .map_err(|e| AnalysisError::InvalidModelOutput(e.to_string()))?;

    let sources = raw
        .sources
        .into_iter()
        .zip(candidates)
        .map(|(entry, candidate)| {
            let raw = serde_json::from_value::<RawVerdict>(entry).unwrap_or_default();
            repair_verdict(raw, candidate)
        })
        .collect();

    Ok(AnalysisResult {
        sources,
        summary: non_empty_string(raw.summary).unwrap_or_default(),
    })
}

fn repair_verdict(raw: RawVerdict, candidate: &SourceCandidate) -> SourceVerdict {
    SourceVerdict {
        source_url: non_empty_string(raw.source_url).unwrap_or_else(|| candidate.url.clone()),
        source_title: non_empty_string(raw.source_title)
            .unwrap_or_else(|| candidate.title.clone()),
        relevance_score: clamp_score(raw.relevance_score.as_ref()),
        confidence_level: raw
            .confidence_level
            .as_ref()
            .and_then(Value::as_str)
            .and_then(ConfidenceLevel::parse)
            .unwrap_or_default(),
        explanation: non_empty_string(raw.explanation)
            .unwrap_or_else(|| MISSING_EXPLANATION.to_string()),
        matches: string_list(raw.matches),
    }
}

/// Numeric values are rounded and clamped to `0..=100`; anything else is 0.
pub fn clamp_score(value: Option<&Value>) -> u8 {
    value
        .and_then(Value::as_f64)
        .filter(|score| score.is_finite())
        .map(|score| score.round().clamp(0.0, f64::from(MAX_RELEVANCE_SCORE)) as u8)
        .unwrap_or(0)
}

fn non_empty_string(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

fn string_list(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Removes a surrounding markdown code fence, if any.
pub(crate) fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
