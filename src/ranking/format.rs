use std::fmt::Write;

use super::bands::{RelevanceBand, confidence_mark};
use super::rank::{rank, top_n};
use crate::analysis::AnalysisResult;
use crate::constants::{CONDENSED_MATCHES, CONDENSED_TOP_N};

pub const HEADER: &str = "🔍 Source search results:";
pub const NO_SOURCES: &str = "❌ No sources found.";

/// Human-facing rendering: the top verdicts by relevance plus the summary.
pub fn format_condensed(result: &AnalysisResult) -> String {
    if result.sources.is_empty() {
        return NO_SOURCES.to_string();
    }

    let ranked = rank(&result.sources);
    let mut out = format!("{HEADER}\n\n");

    for (idx, verdict) in top_n(&ranked, CONDENSED_TOP_N).iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} {}",
            idx + 1,
            confidence_mark(verdict.confidence_level),
            verdict.source_title
        );
        let _ = writeln!(
            out,
            "{} Relevance: {}%",
            RelevanceBand::of(verdict.relevance_score).mark(),
            verdict.relevance_score
        );
        let _ = writeln!(out, "🔗 {}", verdict.source_url);
        let _ = writeln!(out, "📝 {}", verdict.explanation);
        if !verdict.matches.is_empty() {
            let shown: Vec<&str> = verdict
                .matches
                .iter()
                .take(CONDENSED_MATCHES)
                .map(String::as_str)
                .collect();
            let _ = writeln!(out, "✓ Matches: {}", shown.join(", "));
        }
        out.push('\n');
    }

    if !result.summary.trim().is_empty() {
        let _ = write!(out, "\n📊 Summary:\n{}\n", result.summary);
    }

    out
}
