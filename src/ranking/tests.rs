use super::*;
use crate::analysis::{AnalysisResult, ConfidenceLevel, SourceVerdict, repair};
use crate::search::SourceCandidate;

fn verdict(title: &str, score: u8, confidence: ConfidenceLevel) -> SourceVerdict {
    SourceVerdict {
        source_url: format!("https://example.org/{}", title.to_lowercase()),
        source_title: title.to_string(),
        relevance_score: score,
        confidence_level: confidence,
        explanation: format!("{title} explanation"),
        matches: Vec::new(),
    }
}

fn titles(verdicts: &[SourceVerdict]) -> Vec<&str> {
    verdicts.iter().map(|v| v.source_title.as_str()).collect()
}

#[test]
fn test_rank_descending() {
    let ranked = rank(&[
        verdict("Low", 10, ConfidenceLevel::Low),
        verdict("High", 90, ConfidenceLevel::High),
        verdict("Mid", 50, ConfidenceLevel::Medium),
    ]);
    assert_eq!(titles(&ranked), vec!["High", "Mid", "Low"]);
}

#[test]
fn test_rank_is_stable_for_ties() {
    let ranked = rank(&[
        verdict("First", 60, ConfidenceLevel::Low),
        verdict("Top", 80, ConfidenceLevel::Low),
        verdict("Second", 60, ConfidenceLevel::High),
        verdict("Third", 60, ConfidenceLevel::Medium),
    ]);
    assert_eq!(titles(&ranked), vec!["Top", "First", "Second", "Third"]);
}

#[test]
fn test_rank_does_not_modify_scores() {
    let input = vec![verdict("A", 0, ConfidenceLevel::Low), verdict("B", 100, ConfidenceLevel::High)];
    let ranked = rank(&input);
    assert_eq!(ranked[0].relevance_score, 100);
    assert_eq!(ranked[1].relevance_score, 0);
}

#[test]
fn test_top_n_bounds() {
    let ranked = rank(&[verdict("A", 1, ConfidenceLevel::Low)]);
    assert_eq!(top_n(&ranked, 3).len(), 1);
    assert!(top_n(&[], 3).is_empty());
}

#[test]
fn test_rank_result_keeps_full_set() {
    let result = AnalysisResult {
        sources: (0..5)
            .map(|i| verdict(&format!("S{i}"), i * 10, ConfidenceLevel::Low))
            .collect(),
        summary: "sum".to_string(),
    };
    let ranked = rank_result(result);
    assert_eq!(ranked.sources.len(), 5);
    assert_eq!(ranked.sources[0].source_title, "S4");
    assert_eq!(ranked.summary, "sum");
}

#[test]
fn test_relevance_band_thresholds() {
    assert_eq!(RelevanceBand::of(100), RelevanceBand::High);
    assert_eq!(RelevanceBand::of(70), RelevanceBand::High);
    assert_eq!(RelevanceBand::of(69), RelevanceBand::Medium);
    assert_eq!(RelevanceBand::of(40), RelevanceBand::Medium);
    assert_eq!(RelevanceBand::of(39), RelevanceBand::Low);
    assert_eq!(RelevanceBand::of(0), RelevanceBand::Low);
}

#[test]
fn test_confidence_marks_distinct() {
    let marks = [
        confidence_mark(ConfidenceLevel::High),
        confidence_mark(ConfidenceLevel::Medium),
        confidence_mark(ConfidenceLevel::Low),
    ];
    assert_eq!(marks, ["✅", "⚠️", "❓"]);
}

#[test]
fn test_format_empty_result() {
    assert_eq!(format_condensed(&AnalysisResult::default()), NO_SOURCES);
}

#[test]
fn test_format_shows_top_three_only() {
    let result = AnalysisResult {
        sources: vec![
            verdict("D", 20, ConfidenceLevel::Low),
            verdict("A", 90, ConfidenceLevel::High),
            verdict("C", 45, ConfidenceLevel::Medium),
            verdict("B", 75, ConfidenceLevel::High),
        ],
        summary: String::new(),
    };

    let text = format_condensed(&result);

    assert!(text.starts_with(HEADER));
    assert!(text.contains("1. ✅ A"));
    assert!(text.contains("2. ✅ B"));
    assert!(text.contains("3. ⚠️ C"));
    assert!(!text.contains("D explanation"));
    assert!(!text.contains("Summary"));
}

#[test]
fn test_format_limits_matches() {
    let mut v = verdict("A", 50, ConfidenceLevel::Medium);
    v.matches = vec!["m1", "m2", "m3", "m4"].into_iter().map(String::from).collect();
    let text = format_condensed(&AnalysisResult {
        sources: vec![v],
        summary: String::new(),
    });

    assert!(text.contains("✓ Matches: m1, m2, m3\n"));
    assert!(!text.contains("m4"));
    assert!(text.contains("🟡 Relevance: 50%"));
}

#[test]
fn test_claim_to_rendering_end_to_end() {
    let candidates = vec![SourceCandidate::new(
        "Source A",
        "https://a.example/article",
        "about claim X",
        "a.example",
    )];
    let reply = r#"{"sources":[{"relevanceScore":85,"confidenceLevel":"high","explanation":"matches","matches":["m1"]}],"summary":"ok"}"#;

    let result = repair(reply, &candidates).unwrap();
    let text = format_condensed(&result);

    assert!(text.contains("1. ✅ Source A\n"));
    assert!(text.contains("🟢 Relevance: 85%"));
    assert!(text.contains("🔗 https://a.example/article"));
    assert!(text.contains("✓ Matches: m1"));
    assert!(text.trim_end().ends_with("📊 Summary:\nok"));
}
