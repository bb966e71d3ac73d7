//! Static reference data — topics, parties, stances, opening debates.
//!
//! Data comes from two sources:
//! 1. **Embedded seed** — compiled-in JSON, always available
//! 2. **External tables** — caller-supplied JSON in the same format
//!
//! The tables are loaded once and never mutated afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{DebateMessage, Party, PartyPosition, PolicyTopic};

/// The full reference tables the scorer and quiz run against
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSet {
    pub topics: Vec<PolicyTopic>,
    pub parties: Vec<Party>,
    pub positions: Vec<PartyPosition>,
}

impl DataSet {
    /// Parse a dataset from caller-supplied JSON in the seed format.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The dataset compiled into the binary.
    ///
    /// Covers the ten Australian federal policy topics and the five
    /// major parties. Always available as a fallback when no external
    /// tables are supplied.
    pub fn embedded() -> Self {
        match serde_json::from_str(EMBEDDED_SEED) {
            Ok(data) => data,
            Err(e) => {
                // This should never happen — seed is compiled in and tested.
                // Log the error but don't panic; an empty dataset is usable.
                eprintln!("warning: failed to parse embedded data seed: {e}");
                Self::default()
            }
        }
    }

    pub fn topic(&self, id: &str) -> Option<&PolicyTopic> {
        self.topics.iter().find(|t| t.id == id)
    }

    pub fn party(&self, id: &str) -> Option<&Party> {
        self.parties.iter().find(|p| p.id == id)
    }

    /// A party's stance on a topic, if recorded.
    pub fn position(&self, party_id: &str, topic_id: &str) -> Option<&PartyPosition> {
        self.positions
            .iter()
            .find(|p| p.party_id == party_id && p.topic_id == topic_id)
    }
}

/// A pre-generated opening debate for one topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningDebate {
    pub topic_id: String,
    pub generated_at: String,
    pub messages: Vec<DebateMessage>,
}

/// All embedded opening debates, one per seeded topic.
pub fn opening_debates() -> Vec<OpeningDebate> {
    match serde_json::from_str(EMBEDDED_DEBATES) {
        Ok(debates) => debates,
        Err(e) => {
            eprintln!("warning: failed to parse embedded debates: {e}");
            Vec::new()
        }
    }
}

/// Lookup table of embedded opening debates keyed by topic id.
pub fn opening_debates_by_topic() -> HashMap<String, Vec<DebateMessage>> {
    opening_debates()
        .into_iter()
        .map(|d| (d.topic_id, d.messages))
        .collect()
}

/// Raw JSON seed data compiled into the binary.
const EMBEDDED_SEED: &str = include_str!("seed.json");

/// Pre-generated opening debates compiled into the binary.
const EMBEDDED_DEBATES: &str = include_str!("debates.json");
