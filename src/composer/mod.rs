//! Adaptive Test Composer
//!
//! Turns a candidate question pool plus a user's topic masteries into a
//! concrete test: exactly the requested number of questions, unique ids,
//! biased toward weak topics, with a human-readable rationale.
//!
//! Selection within each bucket is randomized; the caller provides the
//! RNG so a seeded generator gives reproducible output in tests while
//! production seeds from the clock.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::classify;
use crate::error::EngineError;
use crate::types::{
    AdaptiveTestConfig, AdaptiveTestResult, Composition, EngineConfig, Question, TopicMastery,
};

/// Reject malformed configs before any repository call.
pub fn validate(config: &AdaptiveTestConfig) -> Result<(), EngineError> {
    if config.number_of_questions == 0 {
        return Err(EngineError::InvalidConfig(
            "numberOfQuestions must be positive".to_string(),
        ));
    }
    if config.focus_on_weak_areas > 100 {
        return Err(EngineError::InvalidConfig(format!(
            "focusOnWeakAreas must be within 0..=100, got {}",
            config.focus_on_weak_areas
        )));
    }
    Ok(())
}

/// Compose an adaptive test from a prefetched pool and mastery snapshot.
///
/// `masteries` must already be restricted to the config's subject scope;
/// an empty slice triggers the cold-start branch. Composition counts are
/// tracked by selection phase: backfilled and topped-up questions always
/// land in the medium bucket, whatever their topic happens to be.
pub fn compose(
    config: &AdaptiveTestConfig,
    masteries: &[TopicMastery],
    pool: Vec<Question>,
    engine: &EngineConfig,
    rng: &mut ChaCha8Rng,
) -> Result<AdaptiveTestResult, EngineError> {
    validate(config)?;

    let pool = dedup_by_id(pool);
    let requested = config.number_of_questions;
    if pool.len() < requested {
        return Err(EngineError::InsufficientPool {
            requested,
            available: pool.len(),
            subject: config.subject.clone(),
        });
    }

    // Cold start: no mastery records in scope, so weak/strong bias is
    // meaningless. Serve a neutral baseline instead.
    if masteries.is_empty() {
        let mut questions = pool;
        questions.shuffle(rng);
        questions.truncate(requested);
        return Ok(AdaptiveTestResult {
            questions,
            reasoning: format!(
                "No attempt history yet; composed a baseline assessment of \
                 {requested} questions drawn from the full pool."
            ),
            composition: Composition {
                weak_questions: 0,
                strong_questions: 0,
                medium_questions: requested,
            },
        });
    }

    let weak = classify::weak_topics(masteries, engine);
    let strong = classify::strong_topics(masteries, engine);
    let weak_keys: HashSet<(&str, &str)> = weak
        .iter()
        .map(|m| (m.subject.as_str(), m.topic.as_str()))
        .collect();
    let strong_keys: HashSet<(&str, &str)> = strong
        .iter()
        .map(|m| (m.subject.as_str(), m.topic.as_str()))
        .collect();

    let weak_target =
        ((requested as f64) * f64::from(config.focus_on_weak_areas) / 100.0).ceil() as usize;
    let strong_target = requested - weak_target;

    let mut weak_pool: Vec<Question> = Vec::new();
    let mut strong_pool: Vec<Question> = Vec::new();
    let mut medium_pool: Vec<Question> = Vec::new();
    for question in &pool {
        let key = (question.subject.as_str(), question.topic.as_str());
        if weak_keys.contains(&key) {
            weak_pool.push(question.clone());
        } else if strong_keys.contains(&key) {
            strong_pool.push(question.clone());
        } else {
            medium_pool.push(question.clone());
        }
    }

    let mut selected: Vec<Question> = Vec::with_capacity(requested);
    let mut selected_ids: HashSet<String> = HashSet::with_capacity(requested);

    // Weak quota
    weak_pool.shuffle(rng);
    let weak_questions = weak_target.min(weak_pool.len());
    for question in weak_pool.into_iter().take(weak_questions) {
        selected_ids.insert(question.id.clone());
        selected.push(question);
    }

    // Shortfall comes from topics that are neither weak nor strong
    let shortfall = weak_target - weak_questions;
    if shortfall > 0 {
        medium_pool.shuffle(rng);
        let mut filled = 0;
        for question in medium_pool {
            if filled == shortfall {
                break;
            }
            if selected_ids.insert(question.id.clone()) {
                selected.push(question);
                filled += 1;
            }
        }
    }

    // Strong quota, only when requested and the user has strong topics
    let mut strong_questions = 0;
    if config.include_strong_areas && !strong.is_empty() {
        strong_pool.shuffle(rng);
        for question in strong_pool {
            if strong_questions == strong_target {
                break;
            }
            if selected_ids.insert(question.id.clone()) {
                selected.push(question);
                strong_questions += 1;
            }
        }
        if strong_questions < strong_target {
            let need = strong_target - strong_questions;
            take_from_remaining(&pool, &mut selected, &mut selected_ids, need, rng);
        }
    }

    // Final shuffle and top-up to exactly the requested length
    selected.shuffle(rng);
    if selected.len() < requested {
        let need = requested - selected.len();
        take_from_remaining(&pool, &mut selected, &mut selected_ids, need, rng);
    }
    selected.truncate(requested);

    let medium_questions = requested - weak_questions - strong_questions;
    let composition = Composition {
        weak_questions,
        strong_questions,
        medium_questions,
    };

    Ok(AdaptiveTestResult {
        questions: selected,
        reasoning: build_reasoning(&weak, &composition, config.focus_on_weak_areas),
        composition,
    })
}

/// Move up to `count` random not-yet-selected questions into `selected`.
fn take_from_remaining(
    pool: &[Question],
    selected: &mut Vec<Question>,
    selected_ids: &mut HashSet<String>,
    count: usize,
    rng: &mut ChaCha8Rng,
) {
    let mut remaining: Vec<&Question> = pool
        .iter()
        .filter(|q| !selected_ids.contains(&q.id))
        .collect();
    remaining.shuffle(rng);
    for question in remaining.into_iter().take(count) {
        selected_ids.insert(question.id.clone());
        selected.push(question.clone());
    }
}

fn dedup_by_id(pool: Vec<Question>) -> Vec<Question> {
    let mut seen: HashSet<String> = HashSet::with_capacity(pool.len());
    pool.into_iter()
        .filter(|q| seen.insert(q.id.clone()))
        .collect()
}

/// Natural-language summary naming up to two representative weak topics.
fn build_reasoning(weak: &[TopicMastery], composition: &Composition, focus: u8) -> String {
    let Composition {
        weak_questions,
        strong_questions,
        medium_questions,
    } = *composition;

    let names: Vec<&str> = weak.iter().take(2).map(|m| m.topic.as_str()).collect();
    if names.is_empty() {
        format!(
            "No weak topics on record; composed {weak_questions} weak-area, \
             {strong_questions} strong-area and {medium_questions} mixed \
             questions at {focus}% weak-area focus."
        )
    } else {
        format!(
            "Prioritised weaker topics ({}) at {focus}% weak-area focus: \
             {weak_questions} weak-area, {strong_questions} strong-area and \
             {medium_questions} mixed questions.",
            names.join(" and ")
        )
    }
}
