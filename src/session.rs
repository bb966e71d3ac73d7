//! Quiz session state.
//!
//! The scorer stays pure; this is the mutable shell around it. A
//! session owns the user's answers and progress through the topic
//! list and is serde-serializable so callers can persist it wherever
//! they like.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::SliderPosition;

/// A user's progress through the slider quiz
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizSession {
    /// Answered topics, keyed by topic id. Absent key = skipped.
    pub topic_positions: BTreeMap<String, SliderPosition>,
    pub current_topic_index: usize,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub electorate: Option<String>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or overwrite the answer for a topic.
    pub fn set_position(&mut self, topic_id: impl Into<String>, position: SliderPosition) {
        self.topic_positions.insert(topic_id.into(), position);
    }

    /// The answer for a topic, if one was given.
    pub fn position(&self, topic_id: &str) -> Option<SliderPosition> {
        self.topic_positions.get(topic_id).copied()
    }

    /// How many topics have an answer.
    pub fn answered_count(&self) -> usize {
        self.topic_positions.len()
    }

    /// Advance to the next topic, stopping at the last one.
    pub fn next_topic(&mut self, topic_count: usize) {
        if self.current_topic_index + 1 < topic_count {
            self.current_topic_index += 1;
        }
    }

    /// Step back one topic, stopping at the first.
    pub fn previous_topic(&mut self) {
        self.current_topic_index = self.current_topic_index.saturating_sub(1);
    }

    /// Jump to a topic by index, clamped to the valid range.
    pub fn go_to_topic(&mut self, index: usize, topic_count: usize) {
        self.current_topic_index = index.min(topic_count.saturating_sub(1));
    }

    /// Mark the quiz finished. Answers stay editable afterwards.
    pub fn finish(&mut self) {
        self.completed = true;
    }

    pub fn set_postcode(&mut self, postcode: impl Into<String>) {
        self.postcode = Some(postcode.into());
    }

    pub fn set_electorate(&mut self, electorate: impl Into<String>) {
        self.electorate = Some(electorate.into());
    }

    /// Clear everything back to a fresh session.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
