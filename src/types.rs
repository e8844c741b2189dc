//! Common Types and Constants
//!
//! Shared data structures used across all engine modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Mastery score below which a topic counts as weak
pub const DEFAULT_WEAK_THRESHOLD: f64 = 60.0;

/// Mastery score at or above which a topic counts as strong
pub const DEFAULT_STRONG_THRESHOLD: f64 = 80.0;

/// Attempts per trend comparison window
pub const DEFAULT_TREND_WINDOW: usize = 5;

/// Minimum accuracy change between windows to call a trend
pub const DEFAULT_TREND_MARGIN: f64 = 0.10;

// ==================== Attempt Types ====================

/// A single recorded question attempt. Immutable once appended.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub user_id: String,
    pub subject: String,
    pub topic: String,
    pub question_id: String,
    pub correct: bool,
    pub timestamp: DateTime<Utc>,
}

/// Trend direction of a topic's recent accuracy.
///
/// `Unknown` means there is not enough history to compare two windows;
/// callers must treat it as non-actionable, not as `Stable`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
    Unknown,
}

/// Derived mastery record for one `(user, subject, topic)` group.
///
/// Recomputed from attempts on every query; never independently mutated.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicMastery {
    pub user_id: String,
    pub subject: String,
    pub topic: String,
    /// Accuracy-derived proficiency estimate in [0, 100]
    pub mastery_score: f64,
    pub questions_attempted: u32,
    pub questions_correct: u32,
    pub last_attempt_date: DateTime<Utc>,
    pub trend: Trend,
}

// ==================== Question Types ====================

/// Question difficulty tier as tagged in the question bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A candidate question. The engine only reads id, subject, topic and
/// difficulty; `content` is carried through opaquely for the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub content: serde_json::Value,
}

// ==================== Composer Types ====================

/// Input parameters for one adaptive test composition. Not persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveTestConfig {
    pub user_id: String,
    /// Exact number of questions the composed test must contain
    pub number_of_questions: usize,
    /// Share of the test drawn from weak topics, as a percentage 0..=100
    pub focus_on_weak_areas: u8,
    pub include_strong_areas: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// Breakdown of a composed test by the mastery bucket each question was
/// selected from. Counts always sum to the test's question count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    pub weak_questions: usize,
    pub strong_questions: usize,
    pub medium_questions: usize,
}

/// A composed adaptive test. Ephemeral: the caller persists the question
/// list if it needs to.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveTestResult {
    pub questions: Vec<Question>,
    pub reasoning: String,
    pub composition: Composition,
}

// ==================== Recommendation Types ====================

/// Urgency of a recommended action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Single best-effort "next action" suggestion for a user.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedAction {
    pub action: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

/// Suggested easy/medium/hard percentage split for a manually configured
/// test. Percentages sum to 100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyDistribution {
    pub easy: u8,
    pub medium: u8,
    pub hard: u8,
}

// ==================== Analytics Types ====================

/// Per-subject rollup of a user's topic masteries.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectPerformance {
    pub subject: String,
    /// Mean of the subject's topic mastery scores
    pub average_mastery: f64,
    pub total_questions: u32,
    pub total_correct: u32,
    /// Overall accuracy across the subject's attempts, in [0, 100]
    pub accuracy: f64,
    pub topics: Vec<TopicMastery>,
}

/// Headline statistics across all of a user's subjects.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_questions_attempted: u32,
    pub total_correct_answers: u32,
    pub overall_accuracy: f64,
    pub weak_topics_count: usize,
    pub strong_topics_count: usize,
}

// ==================== Engine Configuration ====================

/// Tuning knobs for classification and trend detection.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    pub weak_threshold: f64,
    pub strong_threshold: f64,
    /// Number of attempts in each trend comparison window
    pub trend_window: usize,
    /// Accuracy delta between windows required to call improving/declining
    pub trend_margin: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weak_threshold: DEFAULT_WEAK_THRESHOLD,
            strong_threshold: DEFAULT_STRONG_THRESHOLD,
            trend_window: DEFAULT_TREND_WINDOW,
            trend_margin: DEFAULT_TREND_MARGIN,
        }
    }
}
