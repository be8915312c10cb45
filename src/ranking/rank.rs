use crate::analysis::{AnalysisResult, SourceVerdict};

/// Returns the verdicts ordered by descending relevance. Equal scores keep
/// their input order.
pub fn rank(verdicts: &[SourceVerdict]) -> Vec<SourceVerdict> {
    let mut ranked = verdicts.to_vec();
    ranked.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    ranked
}

pub fn top_n(ranked: &[SourceVerdict], n: usize) -> &[SourceVerdict] {
    &ranked[..ranked.len().min(n)]
}

/// Full ranked set for programmatic callers; the summary is untouched.
pub fn rank_result(result: AnalysisResult) -> AnalysisResult {
    AnalysisResult {
        sources: rank(&result.sources),
        summary: result.summary,
    }
}
