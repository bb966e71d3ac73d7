//! Postcode to federal electorate lookup.
//!
//! Australian postcodes can span several electorates, so a lookup
//! returns every match with a confidence weight and the suburbs that
//! fall in each. The mapping table is caller-supplied JSON; lookups
//! against it are total.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One electorate a postcode maps into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectorateMatch {
    pub electorate_id: String,
    pub electorate_name: String,
    pub state: String,
    /// Fraction of the postcode's localities inside this electorate.
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suburbs: Option<Vec<String>>,
}

/// A postcode with all electorates it overlaps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostcodeMapping {
    pub postcode: String,
    pub electorates: Vec<ElectorateMatch>,
}

/// Lookup table from postcode to electorate matches
#[derive(Debug, Clone, Default)]
pub struct ElectorateIndex {
    mappings: HashMap<String, Vec<ElectorateMatch>>,
}

impl ElectorateIndex {
    /// Build an index from a JSON array of postcode mappings.
    pub fn from_json(json: &str) -> Result<Self> {
        let mappings: Vec<PostcodeMapping> = serde_json::from_str(json)?;
        Ok(Self::from_mappings(mappings))
    }

    pub fn from_mappings(mappings: Vec<PostcodeMapping>) -> Self {
        Self {
            mappings: mappings
                .into_iter()
                .map(|m| (m.postcode, m.electorates))
                .collect(),
        }
    }

    /// All electorates a postcode falls in. Unknown postcodes yield an
    /// empty slice, never an error.
    pub fn lookup(&self, postcode: &str) -> &[ElectorateMatch] {
        self.mappings
            .get(postcode)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether a postcode maps to exactly one electorate.
    pub fn is_unambiguous(&self, postcode: &str) -> bool {
        self.lookup(postcode).len() == 1
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Whether a string is a well-formed Australian postcode (four digits).
pub fn is_valid_postcode(postcode: &str) -> bool {
    postcode.len() == 4 && postcode.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> ElectorateIndex {
        ElectorateIndex::from_json(
            r#"[
                {
                    "postcode": "2000",
                    "electorates": [
                        {
                            "electorate_id": "sydney",
                            "electorate_name": "Sydney",
                            "state": "NSW",
                            "confidence": 1.0,
                            "suburbs": ["Sydney", "The Rocks"]
                        }
                    ]
                },
                {
                    "postcode": "3121",
                    "electorates": [
                        {
                            "electorate_id": "melbourne",
                            "electorate_name": "Melbourne",
                            "state": "VIC",
                            "confidence": 0.4,
                            "suburbs": ["Burnley"]
                        },
                        {
                            "electorate_id": "kooyong",
                            "electorate_name": "Kooyong",
                            "state": "VIC",
                            "confidence": 0.6,
                            "suburbs": ["Richmond"]
                        }
                    ]
                }
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn lookup_returns_all_matches() {
        let index = sample_index();
        assert_eq!(index.lookup("2000").len(), 1);
        assert_eq!(index.lookup("3121").len(), 2);
        assert!(index.is_unambiguous("2000"));
        assert!(!index.is_unambiguous("3121"));
    }

    #[test]
    fn unknown_postcode_yields_empty_slice() {
        let index = sample_index();
        assert!(index.lookup("9999").is_empty());
        assert!(!index.is_unambiguous("9999"));
    }

    #[test]
    fn postcode_format_validation() {
        assert!(is_valid_postcode("2000"));
        assert!(is_valid_postcode("0800"));
        assert!(!is_valid_postcode("200"));
        assert!(!is_valid_postcode("20000"));
        assert!(!is_valid_postcode("2OOO"));
        assert!(!is_valid_postcode(""));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ElectorateIndex::from_json("{not json").is_err());
    }
}
