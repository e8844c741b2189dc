//! Mastery Aggregator
//!
//! Derives per-(subject, topic) mastery records from a user's raw attempt
//! history. Pure functions of the attempts passed in: nothing is cached,
//! so a record is always consistent with the history visible at read time.
//!
//! Trend classification compares accuracy over the most recent
//! `trend_window` attempts against the prior window of equal size. A
//! topic with fewer than two full windows reports [`Trend::Unknown`].

use std::collections::BTreeMap;

use crate::types::{Attempt, EngineConfig, TopicMastery, Trend};

/// Compute one [`TopicMastery`] per attempted `(subject, topic)` group.
///
/// Topics with zero attempts have no record by construction, and an empty
/// attempt slice yields an empty vec. Output is ordered by
/// `(subject, topic)` so equal inputs always produce equal output.
pub fn aggregate(attempts: &[Attempt], config: &EngineConfig) -> Vec<TopicMastery> {
    let mut groups: BTreeMap<(String, String), Vec<&Attempt>> = BTreeMap::new();
    for attempt in attempts {
        groups
            .entry((attempt.subject.clone(), attempt.topic.clone()))
            .or_default()
            .push(attempt);
    }

    groups
        .into_iter()
        .map(|((subject, topic), mut group)| {
            group.sort_by_key(|a| a.timestamp);

            let attempted = group.len() as u32;
            let correct = group.iter().filter(|a| a.correct).count() as u32;
            let mastery_score = 100.0 * f64::from(correct) / f64::from(attempted);

            let outcomes: Vec<bool> = group.iter().map(|a| a.correct).collect();
            let trend = classify_trend(&outcomes, config.trend_window, config.trend_margin);

            let last_attempt_date = group
                .last()
                .map(|a| a.timestamp)
                .unwrap_or_else(chrono::Utc::now);

            TopicMastery {
                user_id: group[0].user_id.clone(),
                subject,
                topic,
                mastery_score,
                questions_attempted: attempted,
                questions_correct: correct,
                last_attempt_date,
                trend,
            }
        })
        .collect()
}

/// Classify the trend of a chronologically ordered outcome sequence.
fn classify_trend(outcomes: &[bool], window: usize, margin: f64) -> Trend {
    if window == 0 || outcomes.len() < window * 2 {
        return Trend::Unknown;
    }

    let accuracy = |slice: &[bool]| -> f64 {
        slice.iter().filter(|c| **c).count() as f64 / slice.len() as f64
    };

    let recent = &outcomes[outcomes.len() - window..];
    let prior = &outcomes[outcomes.len() - 2 * window..outcomes.len() - window];

    let delta = accuracy(recent) - accuracy(prior);
    if delta > margin {
        Trend::Improving
    } else if delta < -margin {
        Trend::Declining
    } else {
        Trend::Stable
    }
}
