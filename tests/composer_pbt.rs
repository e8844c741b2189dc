//! Property-based tests for the adaptive test composer.
//!
//! Invariants under test:
//! - Every successful composition has exactly the requested number of
//!   questions with unique ids
//! - Composition counts always sum to the question count
//! - Cold start yields an all-medium composition
//! - Raising the weak-area focus never reduces the weak question count

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use prepwise_engine::composer;
use prepwise_engine::types::{
    AdaptiveTestConfig, Difficulty, EngineConfig, Question, TopicMastery, Trend,
};

// ============================================================================
// Generators
// ============================================================================

fn mastery(index: usize, score: f64) -> TopicMastery {
    TopicMastery {
        user_id: "u1".to_string(),
        subject: "Physics".to_string(),
        topic: format!("T{index}"),
        mastery_score: score,
        questions_attempted: 10,
        questions_correct: (score / 10.0) as u32,
        last_attempt_date: chrono::Utc::now(),
        trend: Trend::Unknown,
    }
}

fn build_pool(topics: &[(f64, usize)]) -> Vec<Question> {
    let mut pool = Vec::new();
    for (index, (_, count)) in topics.iter().enumerate() {
        for i in 0..*count {
            pool.push(Question {
                id: format!("t{index}-q{i}"),
                subject: "Physics".to_string(),
                topic: format!("T{index}"),
                difficulty: Difficulty::Medium,
                content: serde_json::Value::Null,
            });
        }
    }
    pool
}

fn build_masteries(topics: &[(f64, usize)]) -> Vec<TopicMastery> {
    topics
        .iter()
        .enumerate()
        .map(|(index, (score, _))| mastery(index, *score))
        .collect()
}

fn arb_score() -> impl Strategy<Value = f64> {
    (0u32..=1000u32).prop_map(|v| f64::from(v) / 10.0)
}

/// Topics as (mastery score, question count), plus a valid request size.
fn arb_case() -> impl Strategy<Value = (Vec<(f64, usize)>, usize, u8, bool, u64)> {
    proptest::collection::vec((arb_score(), 1usize..6), 1..5).prop_flat_map(|topics| {
        let total: usize = topics.iter().map(|t| t.1).sum();
        (
            Just(topics),
            1..=total,
            0u8..=100u8,
            any::<bool>(),
            any::<u64>(),
        )
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn composition_is_exact_and_deduplicated(
        (topics, n, focus, include_strong, seed) in arb_case()
    ) {
        let config = AdaptiveTestConfig {
            user_id: "u1".to_string(),
            number_of_questions: n,
            focus_on_weak_areas: focus,
            include_strong_areas: include_strong,
            subject: None,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = composer::compose(
            &config,
            &build_masteries(&topics),
            build_pool(&topics),
            &EngineConfig::default(),
            &mut rng,
        )
        .unwrap();

        prop_assert_eq!(result.questions.len(), n);

        let mut ids: Vec<&str> = result.questions.iter().map(|q| q.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), n);

        let c = result.composition;
        prop_assert_eq!(c.weak_questions + c.strong_questions + c.medium_questions, n);
        if !include_strong {
            prop_assert_eq!(c.strong_questions, 0);
        }
    }

    #[test]
    fn cold_start_is_all_medium(
        (topics, n, focus, include_strong, seed) in arb_case()
    ) {
        let config = AdaptiveTestConfig {
            user_id: "u1".to_string(),
            number_of_questions: n,
            focus_on_weak_areas: focus,
            include_strong_areas: include_strong,
            subject: None,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let result = composer::compose(
            &config,
            &[],
            build_pool(&topics),
            &EngineConfig::default(),
            &mut rng,
        )
        .unwrap();

        prop_assert_eq!(result.composition.weak_questions, 0);
        prop_assert_eq!(result.composition.strong_questions, 0);
        prop_assert_eq!(result.composition.medium_questions, n);
    }

    #[test]
    fn more_focus_never_means_fewer_weak_questions(
        (topics, n, _, include_strong, seed) in arb_case(),
        focus_low in 0u8..=100u8,
        focus_high in 0u8..=100u8,
    ) {
        let (focus_low, focus_high) = if focus_low <= focus_high {
            (focus_low, focus_high)
        } else {
            (focus_high, focus_low)
        };

        let run = |focus: u8| {
            let config = AdaptiveTestConfig {
                user_id: "u1".to_string(),
                number_of_questions: n,
                focus_on_weak_areas: focus,
                include_strong_areas: include_strong,
                subject: None,
            };
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            composer::compose(
                &config,
                &build_masteries(&topics),
                build_pool(&topics),
                &EngineConfig::default(),
                &mut rng,
            )
            .unwrap()
            .composition
            .weak_questions
        };

        prop_assert!(run(focus_low) <= run(focus_high));
    }
}
