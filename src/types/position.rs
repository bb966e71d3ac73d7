//! Slider position on the five-point left/right scale.

use serde::{Deserialize, Serialize};

use crate::error::AlthingError;

/// Stance value on a policy topic: -2 (strong left), -1 (lean left),
/// 0 (neutral), 1 (lean right), 2 (strong right).
///
/// The integer difference between two positions is the distance used by
/// the scorer, so this is a thin wrapper rather than a label enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct SliderPosition(i8);

impl SliderPosition {
    pub const STRONG_LEFT: Self = Self(-2);
    pub const LEAN_LEFT: Self = Self(-1);
    pub const NEUTRAL: Self = Self(0);
    pub const LEAN_RIGHT: Self = Self(1);
    pub const STRONG_RIGHT: Self = Self(2);

    /// Create a position, rejecting values outside -2..=2.
    pub fn new(value: i8) -> Result<Self, AlthingError> {
        if (-2..=2).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AlthingError::InvalidInput(format!(
                "slider position out of range: {value}"
            )))
        }
    }

    /// Raw stance value.
    pub fn value(self) -> i8 {
        self.0
    }

    /// Whether this is the neutral midpoint.
    pub fn is_neutral(self) -> bool {
        self.0 == 0
    }

    /// Sign of the stance: -1 left, 0 neutral, 1 right.
    pub fn signum(self) -> i8 {
        self.0.signum()
    }

    /// Absolute distance to another position (0..=4).
    pub fn distance_to(self, other: Self) -> u8 {
        self.0.abs_diff(other.0)
    }
}

impl Default for SliderPosition {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl TryFrom<i8> for SliderPosition {
    type Error = AlthingError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SliderPosition> for i8 {
    fn from(position: SliderPosition) -> i8 {
        position.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_out_of_range() {
        assert!(SliderPosition::new(-3).is_err());
        assert!(SliderPosition::new(3).is_err());
        assert!(SliderPosition::new(2).is_ok());
    }

    #[test]
    fn distance_spans_full_scale() {
        assert_eq!(
            SliderPosition::STRONG_LEFT.distance_to(SliderPosition::STRONG_RIGHT),
            4
        );
        assert_eq!(
            SliderPosition::NEUTRAL.distance_to(SliderPosition::NEUTRAL),
            0
        );
    }

    #[test]
    fn serde_round_trips_as_bare_integer() {
        let json = serde_json::to_string(&SliderPosition::LEAN_RIGHT).unwrap();
        assert_eq!(json, "1");
        let back: SliderPosition = serde_json::from_str("-2").unwrap();
        assert_eq!(back, SliderPosition::STRONG_LEFT);
    }

    #[test]
    fn serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<SliderPosition>("5").is_err());
    }
}
