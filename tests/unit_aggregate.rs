use essay_metrics::aggregate;
use essay_metrics::model::{AnalysisResult, Tone};

fn result_with(clarity: u8, readability: f64) -> AnalysisResult {
    AnalysisResult {
        word_count: 100,
        sentence_count: 5,
        avg_words_per_sentence: 20.0,
        grammar_issues: 0,
        clarity_score: clarity,
        tone: Tone::Neutral,
        readability,
        suggestions: Vec::new(),
    }
}

#[test]
fn empty_input_yields_absent_averages() {
    let stats = aggregate(&[]);
    assert_eq!(stats.total, 0);
    assert_eq!(stats.avg_clarity, None);
    assert_eq!(stats.avg_readability, None);
}

#[test]
fn all_absent_entries_yield_absent_averages() {
    let stats = aggregate(&[None, None, None]);
    assert_eq!(stats.total, 0);
    assert_eq!(stats.avg_clarity, None);
    assert_eq!(stats.avg_readability, None);
}

#[test]
fn averages_over_contributing_entries() {
    let stats = aggregate(&[
        Some(result_with(80, 70.0)),
        Some(result_with(60, 50.0)),
    ]);
    assert_eq!(stats.total, 2);
    assert_eq!(stats.avg_clarity, Some(70.0));
    assert_eq!(stats.avg_readability, Some(60.0));
}

#[test]
fn absent_entries_do_not_count_toward_total() {
    let stats = aggregate(&[Some(result_with(42, 88.8)), None]);
    assert_eq!(stats.total, 1);
    assert_eq!(stats.avg_clarity, Some(42.0));
    assert_eq!(stats.avg_readability, Some(88.8));
}

#[test]
fn averages_round_to_one_decimal() {
    let stats = aggregate(&[
        Some(result_with(80, 70.55)),
        Some(result_with(81, 70.55)),
        Some(result_with(81, 70.55)),
    ]);
    // 242 / 3 = 80.666... -> 80.7
    assert_eq!(stats.avg_clarity, Some(80.7));
}
