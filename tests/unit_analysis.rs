use essay_metrics::analyze;
use essay_metrics::model::Tone;

#[test]
fn hello_world_baseline() {
    let result = analyze("Hello world.");
    assert_eq!(result.word_count, 2);
    assert_eq!(result.sentence_count, 1);
    assert_eq!(result.avg_words_per_sentence, 2.0);
    // One issue: average sentence length below 8.
    assert_eq!(result.grammar_issues, 1);
    assert_eq!(result.tone, Tone::Neutral);
}

#[test]
fn word_count_matches_whitespace_tokens() {
    let text = "one  two\tthree\nfour five";
    let result = analyze(text);
    assert_eq!(result.word_count, text.split_whitespace().count() as u64);
}

#[test]
fn sentence_count_floors_at_one() {
    let result = analyze("no terminators in this text at all");
    assert_eq!(result.sentence_count, 1);

    let result = analyze("First. Second! Third?");
    assert_eq!(result.sentence_count, 3);
}

#[test]
fn missing_terminator_costs_exactly_one_issue() {
    let without = analyze("these are some words without an ending");
    let with = analyze("these are some words without an ending.");
    assert_eq!(without.grammar_issues, with.grammar_issues + 1);
}

#[test]
fn run_on_average_flags_an_issue() {
    // 31 words, one terminator: average over 30.
    let words = vec!["word"; 31].join(" ");
    let text = format!("{words}.");
    let result = analyze(&text);
    assert_eq!(result.avg_words_per_sentence, 31.0);
    assert!(result.grammar_issues >= 1);
}

#[test]
fn clarity_stays_in_bounds_for_extreme_lengths() {
    let one_word = analyze("word.");
    assert!(one_word.clarity_score <= 100);

    // 10k words in one "sentence": the length bonus is swamped by the
    // sentence-length penalty and the clamp pins the score at zero.
    let huge = vec!["sentence"; 10_000].join(" ");
    let result = analyze(&format!("{huge}."));
    assert_eq!(result.clarity_score, 0);

    // Same length broken into 16-word sentences sits at the ideal average,
    // so the length bonus pushes the score to the ceiling.
    let sentence = format!("{}.", vec!["sentence"; 15].join(" "));
    let ideal = vec![sentence; 625].join(" ");
    let result = analyze(&ideal);
    assert_eq!(result.clarity_score, 100);
}

#[test]
fn readability_bounded_for_pathological_input() {
    let consonants = analyze("zzzz xrtp qwrt nghm");
    assert!((0.0..=120.0).contains(&consonants.readability));

    let long_word = "a".repeat(5_000);
    let result = analyze(&long_word);
    assert!((0.0..=120.0).contains(&result.readability));
    // Vowel-heavy single word drives the syllable ratio far negative,
    // so the clamp pins the score at the floor.
    assert_eq!(result.readability, 0.0);
}

#[test]
fn readability_known_value() {
    // "Hello world." -> 2 words, 1 sentence, syllables 2 + 1 = 3.
    // 206.835 - 1.015*2 - 84.6*1.5 = 77.905 -> 77.9
    let result = analyze("Hello world.");
    assert_eq!(result.readability, 77.9);
}

#[test]
fn tone_positive_requires_margin_of_two() {
    let positive = analyze("A good essay with great structure and excellent flow.");
    assert_eq!(positive.tone, Tone::Positive);

    let balanced = analyze("A good strong essay with bad and weak sections.");
    assert_eq!(balanced.tone, Tone::Neutral);

    let negative = analyze("The poor argument has a weak premise and a bad conclusion.");
    assert_eq!(negative.tone, Tone::Negative);
}

#[test]
fn tone_matching_strips_punctuation_and_case() {
    let result = analyze("\"Good!\" (GREAT). [excellent];");
    assert_eq!(result.tone, Tone::Positive);
}

#[test]
fn suggestions_follow_fixed_order() {
    // Short, run-on average, contains "very ", low readability.
    let words = vec!["strength"; 26].join(" ");
    let text = format!("This is very much a test. {words}.");
    let result = analyze(&text);

    assert!(result.suggestions.len() >= 2);
    let expand_pos = result
        .suggestions
        .iter()
        .position(|s| s.contains("expand"))
        .expect("short-essay suggestion");
    let intensifier_pos = result
        .suggestions
        .iter()
        .position(|s| s.contains("intensifiers"))
        .expect("intensifier suggestion");
    assert!(expand_pos < intensifier_pos);
}

#[test]
fn very_detection_is_case_insensitive() {
    let result = analyze("Very interesting stuff.");
    assert!(result.suggestions.iter().any(|s| s.contains("intensifiers")));

    // "very" without a trailing space does not match the literal pattern.
    let result = analyze("It was very.");
    assert!(!result.suggestions.iter().any(|s| s.contains("intensifiers")));
}

#[test]
fn long_essays_skip_the_expand_suggestion() {
    let words = vec!["steady"; 250].join(" ");
    let text = format!("{words}.");
    let result = analyze(&text);
    assert!(!result.suggestions.iter().any(|s| s.contains("expand")));
}

#[test]
fn analyze_is_deterministic() {
    let text = "Repeated analysis must not drift. Not even a little!";
    assert_eq!(analyze(text), analyze(text));
}
