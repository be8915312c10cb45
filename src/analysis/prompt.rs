//! Prompt text for the two backend calls of a run.

use std::fmt::Write;

use crate::search::SourceCandidate;

pub const QUERY_SYSTEM_PROMPT: &str = "You turn claims into web search queries. \
Reply with a JSON object of the form {\"query\": \"...\"} and nothing else.";

pub const ANALYSIS_SYSTEM_PROMPT: &str = "You are a fact-checking expert. \
Analyze information sources and judge how relevant each one is to the original text.";

pub fn query_prompt(claim: &str) -> String {
    format!(
        "Summarize the key verifiable statements of the text below into one short \
search query (at most 12 words, same language as the text). Keep names, \
dates and numbers.\n\nText:\n{claim}"
    )
}

/// Numbered candidate block: `Source N:` followed by title, URL and snippet.
pub fn candidate_list(candidates: &[SourceCandidate]) -> String {
    let mut out = String::new();
    for (idx, candidate) in candidates.iter().enumerate() {
        if idx > 0 {
            out.push_str("\n\n");
        }
        let _ = write!(
            out,
            "Source {}:\nTitle: {}\nURL: {}\nSnippet: {}",
            idx + 1,
            candidate.title,
            candidate.url,
            candidate.snippet
        );
    }
    out
}

pub fn analysis_prompt(claim: &str, candidates: &[SourceCandidate]) -> String {
    format!(
        r#"Analyze the original text and the sources found for it. For each source, in the order given, determine:
1. Relevance (0-100): how closely the source relates to the statements in the text
2. Confidence (high/medium/low): how certain it is that the source confirms or refutes the information
3. A short explanation (1-2 sentences) of why the source is or is not relevant
4. Key matches: concrete facts or statements that coincide

Original text:
{claim}

Sources found:
{sources}

Return the result as JSON:
{{
  "sources": [
    {{
      "sourceUrl": "source URL",
      "sourceTitle": "source title",
      "relevanceScore": number from 0 to 100,
      "confidenceLevel": "high" | "medium" | "low",
      "explanation": "short explanation",
      "matches": ["match 1", "match 2"]
    }}
  ],
  "summary": "overall summary across all sources (2-3 sentences)"
}}

Judge semantic similarity, not literal text overlap."#,
        sources = candidate_list(candidates)
    )
}
