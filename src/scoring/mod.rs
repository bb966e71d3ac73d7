//! Alignment scoring between a user's quiz answers and party stances.
//!
//! The scorer is a pure function over reference data: identical input
//! yields byte-identical output. It never errors; missing party
//! positions fall back to neutral and unanswered topics are excluded
//! rather than penalized.

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Party, PartyPosition, PolicyTopic, SliderPosition};

/// Per-topic detail behind a party's score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicBreakdown {
    pub topic: PolicyTopic,
    pub user_position: SliderPosition,
    pub party_position: SliderPosition,
    pub aligned: bool,
    /// 0..=4, lower is closer.
    pub distance: u8,
}

/// A party's overall match against the user's answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyScore {
    pub party: Party,
    /// 0..=100 percentage match.
    pub score: u8,
    /// Sorted ascending by distance, closest topics first.
    pub breakdown: Vec<TopicBreakdown>,
}

/// Score every party against the user's answered topics.
///
/// Topics absent from `user_positions` are skipped entirely. A party
/// with no recorded stance on an answered topic is treated as neutral.
/// When the user answered nothing, every party scores 50.
///
/// Output ordering is deterministic: parties descending by score with
/// input order preserved on ties, each breakdown ascending by distance.
pub fn compute_scores(
    user_positions: &BTreeMap<String, SliderPosition>,
    topics: &[PolicyTopic],
    parties: &[Party],
    positions: &[PartyPosition],
) -> Vec<PartyScore> {
    let stance_by_key: HashMap<(&str, &str), SliderPosition> = positions
        .iter()
        .map(|p| ((p.party_id.as_str(), p.topic_id.as_str()), p.position))
        .collect();

    let mut scores: Vec<PartyScore> = parties
        .iter()
        .map(|party| {
            let mut total = 0.0f64;
            let mut answered = 0usize;
            let mut breakdown = Vec::new();

            for topic in topics {
                let Some(&user_position) = user_positions.get(&topic.id) else {
                    continue;
                };
                let party_position = stance_by_key
                    .get(&(party.id.as_str(), topic.id.as_str()))
                    .copied()
                    .unwrap_or_default();

                // Neutral users get a flat partial match against every
                // stance instead of rewarding neutral parties.
                let distance = if user_position.is_neutral() {
                    1
                } else {
                    user_position.distance_to(party_position)
                };

                total += 1.0 - f64::from(distance) / 4.0;
                answered += 1;

                let aligned = user_position.is_neutral()
                    || (user_position.signum() == party_position.signum() && distance <= 1);

                breakdown.push(TopicBreakdown {
                    topic: topic.clone(),
                    user_position,
                    party_position,
                    aligned,
                    distance,
                });
            }

            let score = if answered > 0 {
                (total / answered as f64 * 100.0).round() as u8
            } else {
                50
            };

            breakdown.sort_by(|a, b| a.distance.cmp(&b.distance));

            PartyScore {
                party: party.clone(),
                score,
                breakdown,
            }
        })
        .collect();

    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores
}

/// Human-readable description of a 0..=100 alignment score.
pub fn alignment_label(score: u8) -> &'static str {
    match score {
        80..=u8::MAX => "Strongly aligned",
        65..=79 => "Well aligned",
        50..=64 => "Moderately aligned",
        35..=49 => "Somewhat aligned",
        _ => "Weakly aligned",
    }
}
