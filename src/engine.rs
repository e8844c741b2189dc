//! Engine facade wiring the collaborators to the algorithm modules.
//!
//! [`AdaptiveEngine`] is stateless between invocations: every call
//! recomputes mastery from the attempt store, so concurrent requests for
//! different users are fully independent and same-user races resolve to
//! whatever history was visible at read time.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::composer;
use crate::error::EngineError;
use crate::store::{AttemptStore, QuestionRepository};
use crate::types::{
    AdaptiveTestConfig, AdaptiveTestResult, Attempt, DifficultyDistribution, EngineConfig,
    OverallStats, RecommendedAction, SubjectPerformance, TopicMastery,
};
use crate::{classify, mastery, recommend};

/// Adaptive learning engine over an attempt store and a question bank.
///
/// Analytics entry points take `&self`; only test composition takes
/// `&mut self` because it advances the RNG.
pub struct AdaptiveEngine<S, Q> {
    attempts: S,
    questions: Q,
    config: EngineConfig,
    rng: ChaCha8Rng,
}

impl<S: AttemptStore, Q: QuestionRepository> AdaptiveEngine<S, Q> {
    /// Engine with default tuning and a clock-derived RNG seed.
    pub fn new(attempts: S, questions: Q) -> Self {
        Self::with_options(attempts, questions, EngineConfig::default(), None)
    }

    /// Engine with a fixed RNG seed, for reproducible composition.
    pub fn with_seed(attempts: S, questions: Q, seed: u64) -> Self {
        Self::with_options(attempts, questions, EngineConfig::default(), Some(seed))
    }

    pub fn with_options(
        attempts: S,
        questions: Q,
        config: EngineConfig,
        seed: Option<u64>,
    ) -> Self {
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        });
        Self {
            attempts,
            questions,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    // ==================== Mastery Analytics ====================

    /// One mastery record per `(subject, topic)` the user has attempted.
    pub fn topic_masteries(
        &self,
        user_id: &str,
        subject: Option<&str>,
    ) -> Result<Vec<TopicMastery>, EngineError> {
        let attempts = self.attempts.list_attempts(user_id, subject, None)?;
        Ok(mastery::aggregate(&attempts, &self.config))
    }

    /// Weak topics, lowest mastery first.
    pub fn weak_topics(
        &self,
        user_id: &str,
        subject: Option<&str>,
    ) -> Result<Vec<TopicMastery>, EngineError> {
        let masteries = self.topic_masteries(user_id, subject)?;
        Ok(classify::weak_topics(&masteries, &self.config))
    }

    /// Strong topics, highest mastery first.
    pub fn strong_topics(
        &self,
        user_id: &str,
        subject: Option<&str>,
    ) -> Result<Vec<TopicMastery>, EngineError> {
        let masteries = self.topic_masteries(user_id, subject)?;
        Ok(classify::strong_topics(&masteries, &self.config))
    }

    /// Topics between the weak and strong thresholds.
    pub fn average_topics(
        &self,
        user_id: &str,
        subject: Option<&str>,
    ) -> Result<Vec<TopicMastery>, EngineError> {
        let masteries = self.topic_masteries(user_id, subject)?;
        Ok(classify::average_topics(&masteries, &self.config))
    }

    // ==================== Test Composition ====================

    /// Compose an adaptive test. The sole entry point for test creation.
    pub fn generate_adaptive_test(
        &mut self,
        config: &AdaptiveTestConfig,
    ) -> Result<AdaptiveTestResult, EngineError> {
        composer::validate(config)?;

        let subject = config.subject.as_deref();
        let masteries = self.topic_masteries(&config.user_id, subject)?;
        let pool = self.questions.list_questions(subject)?;

        info!(
            user_id = %config.user_id,
            requested = config.number_of_questions,
            focus = config.focus_on_weak_areas,
            pool = pool.len(),
            "composing adaptive test"
        );
        if masteries.is_empty() {
            debug!(user_id = %config.user_id, "no mastery records, taking cold-start branch");
        }

        composer::compose(config, &masteries, pool, &self.config, &mut self.rng)
    }

    // ==================== Recommendations ====================

    /// Single best-effort "next action" suggestion for the user.
    pub fn next_recommended_action(&self, user_id: &str) -> Result<RecommendedAction, EngineError> {
        let weak = self.weak_topics(user_id, None)?;
        Ok(recommend::next_action(&weak))
    }

    /// Suggested easy/medium/hard split for a manually configured test.
    pub fn difficulty_distribution(
        &self,
        user_id: &str,
    ) -> Result<DifficultyDistribution, EngineError> {
        let masteries = self.topic_masteries(user_id, None)?;
        Ok(recommend::difficulty_distribution(&masteries))
    }

    // ==================== Performance Rollups ====================

    /// Per-subject aggregation of the user's masteries, ordered by subject.
    pub fn subject_performance(
        &self,
        user_id: &str,
    ) -> Result<Vec<SubjectPerformance>, EngineError> {
        let masteries = self.topic_masteries(user_id, None)?;

        let mut by_subject: BTreeMap<String, Vec<TopicMastery>> = BTreeMap::new();
        for m in masteries {
            by_subject.entry(m.subject.clone()).or_default().push(m);
        }

        Ok(by_subject
            .into_iter()
            .map(|(subject, topics)| {
                let total_questions: u32 = topics.iter().map(|t| t.questions_attempted).sum();
                let total_correct: u32 = topics.iter().map(|t| t.questions_correct).sum();
                let average_mastery =
                    topics.iter().map(|t| t.mastery_score).sum::<f64>() / topics.len() as f64;
                let accuracy = if total_questions > 0 {
                    100.0 * f64::from(total_correct) / f64::from(total_questions)
                } else {
                    0.0
                };
                SubjectPerformance {
                    subject,
                    average_mastery,
                    total_questions,
                    total_correct,
                    accuracy,
                    topics,
                }
            })
            .collect())
    }

    /// Headline statistics across all subjects.
    pub fn overall_stats(&self, user_id: &str) -> Result<OverallStats, EngineError> {
        let masteries = self.topic_masteries(user_id, None)?;

        let total_questions_attempted: u32 =
            masteries.iter().map(|m| m.questions_attempted).sum();
        let total_correct_answers: u32 = masteries.iter().map(|m| m.questions_correct).sum();
        let overall_accuracy = if total_questions_attempted > 0 {
            100.0 * f64::from(total_correct_answers) / f64::from(total_questions_attempted)
        } else {
            0.0
        };

        Ok(OverallStats {
            total_questions_attempted,
            total_correct_answers,
            overall_accuracy,
            weak_topics_count: classify::weak_topics(&masteries, &self.config).len(),
            strong_topics_count: classify::strong_topics(&masteries, &self.config).len(),
        })
    }

    // ==================== Attempt Recording ====================

    /// Append a batch of attempts. Each append is atomic per attempt;
    /// mastery is recomputed on read, so no invalidation is needed.
    pub fn record_attempts(&self, attempts: Vec<Attempt>) -> Result<(), EngineError> {
        let count = attempts.len();
        for attempt in attempts {
            self.attempts.append_attempt(attempt)?;
        }
        debug!(count, "recorded attempts");
        Ok(())
    }
}
