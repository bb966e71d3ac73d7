//! Party reference data and per-topic stances

use serde::{Deserialize, Serialize};

use super::position::SliderPosition;

/// How a party's stance on a topic was established.
///
/// Descriptive metadata only; the scorer does not weight by confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Stated outright in published policy.
    Explicit,
    /// Derived from voting record or platform.
    Inferred,
    /// Best guess from adjacent positions.
    Estimated,
    Unknown,
}

/// A political party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: String,
    pub name: String,
    pub short_name: String,
    /// Display colour, hex string.
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coalition_group_id: Option<String>,
}

/// A party's stance on one policy topic, keyed by (party, topic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyPosition {
    pub party_id: String,
    pub topic_id: String,
    pub position: SliderPosition,
    pub confidence: Confidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Confidence::Explicit).unwrap(),
            "\"explicit\""
        );
        let back: Confidence = serde_json::from_str("\"inferred\"").unwrap();
        assert_eq!(back, Confidence::Inferred);
    }

    #[test]
    fn party_omits_absent_coalition() {
        let party = Party {
            id: "ind".into(),
            name: "Independents".into(),
            short_name: "IND".into(),
            color: "#888888".into(),
            coalition_group_id: None,
        };
        let json = serde_json::to_string(&party).unwrap();
        assert!(!json.contains("coalition_group_id"));
    }

    #[test]
    fn position_round_trips_with_sources() {
        let position = PartyPosition {
            party_id: "grn".into(),
            topic_id: "climate".into(),
            position: SliderPosition::STRONG_LEFT,
            confidence: Confidence::Explicit,
            source_url: Some("https://example.org/platform".into()),
            source_description: Some("2025 platform, p. 12".into()),
        };
        let json = serde_json::to_string(&position).unwrap();
        let back: PartyPosition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, position);
    }
}
