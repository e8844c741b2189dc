//! Topic Classifier
//!
//! Partitions a user's topic masteries into weak, average and strong sets
//! by thresholding the mastery score. The weak set is sorted ascending by
//! score: index 0 is the single highest-priority weak topic, and the
//! recommendation engine relies on that ordering.

use std::cmp::Ordering;

use crate::types::{EngineConfig, TopicMastery};

/// Topics below the weak threshold, lowest score first.
pub fn weak_topics(masteries: &[TopicMastery], config: &EngineConfig) -> Vec<TopicMastery> {
    let mut weak: Vec<TopicMastery> = masteries
        .iter()
        .filter(|m| m.mastery_score < config.weak_threshold)
        .cloned()
        .collect();
    weak.sort_by(|a, b| compare_scores(a, b, false));
    weak
}

/// Topics at or above the strong threshold, highest score first.
pub fn strong_topics(masteries: &[TopicMastery], config: &EngineConfig) -> Vec<TopicMastery> {
    let mut strong: Vec<TopicMastery> = masteries
        .iter()
        .filter(|m| m.mastery_score >= config.strong_threshold)
        .cloned()
        .collect();
    strong.sort_by(|a, b| compare_scores(a, b, true));
    strong
}

/// Everything between the two thresholds, highest score first.
pub fn average_topics(masteries: &[TopicMastery], config: &EngineConfig) -> Vec<TopicMastery> {
    let mut average: Vec<TopicMastery> = masteries
        .iter()
        .filter(|m| {
            m.mastery_score >= config.weak_threshold && m.mastery_score < config.strong_threshold
        })
        .cloned()
        .collect();
    average.sort_by(|a, b| compare_scores(a, b, true));
    average
}

/// Score ordering with a (subject, topic) tie-break so equal inputs
/// always classify into the same sequence.
fn compare_scores(a: &TopicMastery, b: &TopicMastery, descending: bool) -> Ordering {
    let by_score = a
        .mastery_score
        .partial_cmp(&b.mastery_score)
        .unwrap_or(Ordering::Equal);
    let by_score = if descending { by_score.reverse() } else { by_score };
    by_score
        .then_with(|| a.subject.cmp(&b.subject))
        .then_with(|| a.topic.cmp(&b.topic))
}
