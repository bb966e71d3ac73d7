//! Policy topic reference data

use serde::{Deserialize, Serialize};

/// A policy topic with its two poles.
///
/// Each pole carries a label plus what you gain and what you trade by
/// choosing it. Immutable reference data; loaded once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyTopic {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub left_label: String,
    pub left_gain: String,
    pub left_cost: String,
    pub right_label: String,
    pub right_gain: String,
    pub right_cost: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_without_icon() {
        let topic = PolicyTopic {
            id: "housing".into(),
            name: "Housing".into(),
            icon: None,
            left_label: "Public housing investment".into(),
            left_gain: "More affordable supply".into(),
            left_cost: "Higher public spending".into(),
            right_label: "Deregulated development".into(),
            right_gain: "Faster construction".into(),
            right_cost: "Less planning control".into(),
        };
        let json = serde_json::to_string(&topic).unwrap();
        assert!(!json.contains("icon"));
        let back: PolicyTopic = serde_json::from_str(&json).unwrap();
        assert_eq!(back, topic);
    }
}
