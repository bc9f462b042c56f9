//! Heuristic essay analysis.
//!
//! Everything in here is a pure function over the submitted text: lexical
//! counts, a crude Flesch reading-ease estimate, rule-based clarity and tone
//! scoring, and canned improvement suggestions. There is deliberately no NLP
//! library behind any of this; the thresholds and formulas are frozen because
//! previously stored results were produced by them.

use crate::model::{AnalysisResult, Tone};

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "well",
    "outstanding",
    "strong",
    "positive",
    "benefit",
    "success",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "poor",
    "weak",
    "lack",
    "problem",
    "issue",
    "negative",
    "difficult",
    "fail",
];

/// Punctuation stripped from both ends of a token before tone matching.
/// A fixed set rather than `char::is_ascii_punctuation` so results do not
/// drift across platforms or locale settings.
const TONE_TRIM_CHARS: &[char] = &['.', ',', '!', '?', ';', ':', '(', ')', '[', ']', '"', '\''];

const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

const SUGGESTION_EXPAND: &str = "Essay is short; expand your arguments and add examples.";
const SUGGESTION_SPLIT_SENTENCES: &str =
    "Some sentences are very long. Try splitting them for clarity.";
const SUGGESTION_INTENSIFIERS: &str =
    "Avoid weak intensifiers like 'very'; use stronger, specific words.";
const SUGGESTION_READABILITY: &str =
    "Consider simpler sentence structure for readability (aim for Flesch > 50).";

/// Analyze a non-blank essay. Total over any non-empty-after-trim input;
/// blank input is the caller's problem to reject (see the HTTP boundary).
pub fn analyze(text: &str) -> AnalysisResult {
    let word_count = text.split_whitespace().count() as u64;
    let sentence_count = count_sentences(text);
    let avg_words_per_sentence = round1(word_count as f64 / sentence_count as f64);

    let mut grammar_issues = 0u32;
    if avg_words_per_sentence < 8.0 {
        grammar_issues += 1;
    }
    if avg_words_per_sentence > 30.0 {
        grammar_issues += 1;
    }
    if missing_terminal_punctuation(text) {
        grammar_issues += 1;
    }

    let clarity_score = clarity_score(word_count, avg_words_per_sentence);
    let tone = classify_tone(text);
    let readability = readability(text);

    let mut suggestions = Vec::new();
    if word_count < 200 {
        suggestions.push(SUGGESTION_EXPAND.to_string());
    }
    if avg_words_per_sentence > 25.0 {
        suggestions.push(SUGGESTION_SPLIT_SENTENCES.to_string());
    }
    if text.to_lowercase().contains("very ") {
        suggestions.push(SUGGESTION_INTENSIFIERS.to_string());
    }
    if readability < 50.0 {
        suggestions.push(SUGGESTION_READABILITY.to_string());
    }

    AnalysisResult {
        word_count,
        sentence_count,
        avg_words_per_sentence,
        grammar_issues,
        clarity_score,
        tone,
        readability,
        suggestions,
    }
}

/// Terminator occurrences anywhere in the text, floored at 1. Not a real
/// sentence splitter: abbreviations and repeated punctuation inflate the
/// count, which the scoring formulas expect.
fn count_sentences(text: &str) -> u64 {
    let count = text
        .chars()
        .filter(|ch| SENTENCE_TERMINATORS.contains(ch))
        .count() as u64;
    count.max(1)
}

fn missing_terminal_punctuation(text: &str) -> bool {
    match text.trim().chars().last() {
        Some(last) => !SENTENCE_TERMINATORS.contains(&last),
        None => false,
    }
}

/// 0-100 proxy for how easy the essay is to follow: rewards length up to a
/// point, penalizes deviation from a 16-word average sentence. Clamped, then
/// truncated toward zero (not rounded) to match historical scores.
fn clarity_score(word_count: u64, avg_words_per_sentence: f64) -> u8 {
    let raw = 60.0 + (word_count as f64 - 200.0) / 8.0 - (avg_words_per_sentence - 16.0).abs() * 1.2;
    raw.clamp(0.0, 100.0) as u8
}

fn classify_tone(text: &str) -> Tone {
    let mut positive = 0i64;
    let mut negative = 0i64;
    for token in text.split_whitespace() {
        let word = token.trim_matches(TONE_TRIM_CHARS).to_lowercase();
        if POSITIVE_WORDS.contains(&word.as_str()) {
            positive += 1;
        } else if NEGATIVE_WORDS.contains(&word.as_str()) {
            negative += 1;
        }
    }
    if positive - negative >= 2 {
        Tone::Positive
    } else if negative - positive >= 2 {
        Tone::Negative
    } else {
        Tone::Neutral
    }
}

/// Approximate Flesch reading ease, clamped to [0, 120].
///
/// The "syllable" estimate counts individual vowel letters per word (floored
/// at one), not syllable nuclei. That is linguistically wrong on purpose:
/// stored results were computed with this rule and aggregation mixes old and
/// new scores, so the rule is part of the contract.
pub fn readability(text: &str) -> f64 {
    let sentences = count_sentences(text) as f64;
    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = (words.len() as u64).max(1) as f64;

    let syllables: u64 = words.iter().map(|w| estimate_syllables(w)).sum();
    let syllables = syllables.max(1) as f64;

    let score = 206.835 - 1.015 * (word_count / sentences) - 84.6 * (syllables / word_count);
    round1(score.clamp(0.0, 120.0))
}

fn estimate_syllables(word: &str) -> u64 {
    let vowels = word
        .to_lowercase()
        .chars()
        .filter(|ch| matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u'))
        .count() as u64;
    vowels.max(1)
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vowel_count_floors_at_one() {
        assert_eq!(estimate_syllables("rhythm"), 1);
        assert_eq!(estimate_syllables("queueing"), 5);
        assert_eq!(estimate_syllables("AEIOU"), 5);
    }

    #[test]
    fn sentence_count_never_zero() {
        assert_eq!(count_sentences("no terminators here"), 1);
        assert_eq!(count_sentences("One. Two! Three?"), 3);
        assert_eq!(count_sentences("e.g. etc."), 3);
    }

    #[test]
    fn clarity_truncates_toward_zero() {
        // 60 + (100 - 200)/8 - |10 - 16|*1.2 = 60 - 12.5 - 7.2 = 40.3 -> 40
        assert_eq!(clarity_score(100, 10.0), 40);
    }
}
