//! Recommendation Engine
//!
//! Derives a single "next best action" from the classified mastery data,
//! plus a difficulty-distribution helper for manually configured tests.
//! Independent of test composition: dashboards call this directly.

use crate::types::{DifficultyDistribution, Priority, RecommendedAction, TopicMastery};

/// Below this score the weakest topic is an urgent problem
const HIGH_PRIORITY_BELOW: f64 = 40.0;

/// Below this score the weakest topic still warrants targeted practice
const MEDIUM_PRIORITY_BELOW: f64 = 70.0;

/// Suggest the next action from the weak-topic list.
///
/// `weak` must be sorted ascending by mastery score (the classifier's
/// ordering): index 0 is the highest-priority weak topic.
pub fn next_action(weak: &[TopicMastery]) -> RecommendedAction {
    let Some(weakest) = weak.first() else {
        return RecommendedAction {
            action: "No weak areas detected. Take a full mock test to keep your profile current."
                .to_string(),
            priority: Priority::Medium,
            topic: None,
        };
    };

    let score = weakest.mastery_score;
    if score < HIGH_PRIORITY_BELOW {
        RecommendedAction {
            action: format!(
                "Focus on {}: current mastery is only {:.0}%.",
                weakest.topic, score
            ),
            priority: Priority::High,
            topic: Some(weakest.topic.clone()),
        }
    } else if score < MEDIUM_PRIORITY_BELOW {
        RecommendedAction {
            action: format!("Practice more questions on {} to strengthen it.", weakest.topic),
            priority: Priority::Medium,
            topic: Some(weakest.topic.clone()),
        }
    } else {
        RecommendedAction {
            action: "Keep practicing consistently to maintain your level.".to_string(),
            priority: Priority::Low,
            topic: None,
        }
    }
}

/// Map the user's average mastery into a fixed easy/medium/hard split.
///
/// Guidance for manual test configuration; the adaptive composer does not
/// consume this. Users with no mastery records fall into the easiest
/// bucket, consistent with the composer's cold-start stance.
pub fn difficulty_distribution(masteries: &[TopicMastery]) -> DifficultyDistribution {
    let average = if masteries.is_empty() {
        0.0
    } else {
        masteries.iter().map(|m| m.mastery_score).sum::<f64>() / masteries.len() as f64
    };

    if average < 50.0 {
        DifficultyDistribution { easy: 60, medium: 30, hard: 10 }
    } else if average < 70.0 {
        DifficultyDistribution { easy: 40, medium: 40, hard: 20 }
    } else if average < 85.0 {
        DifficultyDistribution { easy: 25, medium: 45, hard: 30 }
    } else {
        DifficultyDistribution { easy: 10, medium: 40, hard: 50 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Trend;
    use chrono::Utc;

    fn mastery(topic: &str, score: f64) -> TopicMastery {
        TopicMastery {
            user_id: "u1".to_string(),
            subject: "Physics".to_string(),
            topic: topic.to_string(),
            mastery_score: score,
            questions_attempted: 10,
            questions_correct: (score / 10.0) as u32,
            last_attempt_date: Utc::now(),
            trend: Trend::Stable,
        }
    }

    #[test]
    fn no_weak_topics_suggests_a_mock_test() {
        let action = next_action(&[]);
        assert_eq!(action.priority, Priority::Medium);
        assert!(action.topic.is_none());
        assert!(action.action.contains("mock test"));
    }

    #[test]
    fn very_weak_topic_is_high_priority_with_exact_score() {
        let action = next_action(&[mastery("Thermodynamics", 32.0)]);
        assert_eq!(action.priority, Priority::High);
        assert_eq!(action.topic.as_deref(), Some("Thermodynamics"));
        assert!(action.action.contains("32%"));
    }

    #[test]
    fn mildly_weak_topic_is_medium_priority() {
        let action = next_action(&[mastery("X", 50.0)]);
        assert_eq!(action.priority, Priority::Medium);
        assert_eq!(action.topic.as_deref(), Some("X"));
    }

    #[test]
    fn barely_weak_topic_falls_back_to_generic_advice() {
        // Reachable when the weak threshold is configured above 70.
        let action = next_action(&[mastery("X", 72.0)]);
        assert_eq!(action.priority, Priority::Low);
        assert!(action.topic.is_none());
    }

    #[test]
    fn distribution_buckets_follow_average_mastery() {
        let low = difficulty_distribution(&[mastery("A", 40.0)]);
        assert_eq!(low.easy, 60);

        let mid = difficulty_distribution(&[mastery("A", 60.0), mastery("B", 70.0)]);
        assert_eq!(mid.easy, 40);

        let high = difficulty_distribution(&[mastery("A", 80.0)]);
        assert_eq!(high.hard, 30);

        let top = difficulty_distribution(&[mastery("A", 90.0)]);
        assert_eq!(top.hard, 50);
    }

    #[test]
    fn distribution_percentages_sum_to_hundred() {
        for score in [10.0, 55.0, 75.0, 95.0] {
            let d = difficulty_distribution(&[mastery("A", score)]);
            assert_eq!(u32::from(d.easy) + u32::from(d.medium) + u32::from(d.hard), 100);
        }
    }

    #[test]
    fn no_history_gets_the_easiest_mix() {
        let d = difficulty_distribution(&[]);
        assert_eq!(d.easy, 60);
    }
}
