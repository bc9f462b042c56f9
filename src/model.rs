use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tone::Positive => write!(f, "Positive"),
            Tone::Negative => write!(f, "Negative"),
            Tone::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Metrics derived from a single essay submission. Produced fresh per call,
/// carries no identity, and round-trips through the stored-record format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub word_count: u64,
    pub sentence_count: u64,
    pub avg_words_per_sentence: f64,
    pub grammar_issues: u32,
    pub clarity_score: u8,
    pub tone: Tone,
    pub readability: f64,
    pub suggestions: Vec<String>,
}

/// One persisted submission. Owned by the store; the engine and aggregator
/// only ever see the embedded result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEssay {
    pub id: u64,
    pub text: String,
    pub result: Option<AnalysisResult>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total: u64,
    pub avg_clarity: Option<f64>,
    pub avg_readability: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    pub text: Option<String>,
    /// Accepted alias for `text`, kept for older clients.
    pub essay: Option<String>,
}

impl AnalyzeRequest {
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().or(self.essay.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub ok: bool,
    pub result: AnalysisResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveRequest {
    pub text: Option<String>,
    pub essay: Option<String>,
    pub result: Option<AnalysisResult>,
}

impl SaveRequest {
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().or(self.essay.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    pub ok: bool,
    pub id: u64,
}

/// History entry with the essay text capped to a preview length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EssaySummary {
    pub id: u64,
    pub text: String,
    pub result: Option<AnalysisResult>,
    pub created_at: DateTime<Utc>,
}

impl EssaySummary {
    pub fn from_stored(essay: StoredEssay, preview_chars: usize) -> Self {
        let text = if essay.text.chars().count() > preview_chars {
            let mut preview: String = essay.text.chars().take(preview_chars).collect();
            preview.push_str("...");
            preview
        } else {
            essay.text
        };
        Self {
            id: essay.id,
            text,
            result: essay.result,
            created_at: essay.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub ok: bool,
    pub history: Vec<EssaySummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub ok: bool,
    pub total: u64,
    pub avg_clarity: Option<f64>,
    pub avg_readability: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub status: String,
    pub endpoints: Vec<String>,
}
