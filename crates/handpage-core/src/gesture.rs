//! Gesture vocabulary
//!
//! The recognizer works with a closed set of static hand poses. "No gesture"
//! is modelled as `Option::<GestureLabel>::None` rather than a variant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::HandpageError;

/// Recognized hand pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureLabel {
    /// Thumb up, four fingers curled.
    ThumbsUp,
    /// Thumb down, four fingers curled.
    ThumbsDown,
    /// Four fingers extended, thumb out.
    OpenPalm,
    /// Four fingers curled, thumb tucked.
    Fist,
    /// Only the index finger extended.
    PointUp,
    /// Index and middle extended.
    Peace,
}

impl GestureLabel {
    /// All labels, in classification priority order
    pub fn all() -> &'static [GestureLabel; 6] {
        &[
            GestureLabel::ThumbsUp,
            GestureLabel::ThumbsDown,
            GestureLabel::PointUp,
            GestureLabel::Peace,
            GestureLabel::OpenPalm,
            GestureLabel::Fist,
        ]
    }

    /// Wire/callback identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThumbsUp => "thumbs_up",
            Self::ThumbsDown => "thumbs_down",
            Self::OpenPalm => "open_palm",
            Self::Fist => "fist",
            Self::PointUp => "point_up",
            Self::Peace => "peace",
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GestureLabel {
    type Err = HandpageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GestureLabel::all()
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| HandpageError::UnknownGesture(s.to_string()))
    }
}

/// Coarse thumb direction relative to the wrist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThumbOrientation {
    Up,
    Down,
    Side,
    Curled,
}

impl ThumbOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Side => "side",
            Self::Curled => "curled",
        }
    }

    /// Thumb visibly sticking out of the hand (open palm requirement)
    pub fn is_out(&self) -> bool {
        matches!(self, Self::Up | Self::Side)
    }
}

/// Extension flags for the four non-thumb fingers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerStates {
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    pub fn new(index: bool, middle: bool, ring: bool, pinky: bool) -> Self {
        Self {
            index,
            middle,
            ring,
            pinky,
        }
    }

    pub fn all_extended(&self) -> bool {
        self.index && self.middle && self.ring && self.pinky
    }

    pub fn all_curled(&self) -> bool {
        !self.index && !self.middle && !self.ring && !self.pinky
    }

    pub fn extended_count(&self) -> usize {
        [self.index, self.middle, self.ring, self.pinky]
            .iter()
            .filter(|&&e| e)
            .count()
    }
}

impl fmt::Display for FingerStates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "I:{} M:{} R:{} P:{}",
            self.index as u8, self.middle as u8, self.ring as u8, self.pinky as u8
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_label_as_str() {
        assert_eq!(GestureLabel::ThumbsUp.as_str(), "thumbs_up");
        assert_eq!(GestureLabel::ThumbsDown.as_str(), "thumbs_down");
        assert_eq!(GestureLabel::OpenPalm.as_str(), "open_palm");
        assert_eq!(GestureLabel::Fist.as_str(), "fist");
        assert_eq!(GestureLabel::PointUp.as_str(), "point_up");
        assert_eq!(GestureLabel::Peace.as_str(), "peace");
    }

    #[test]
    fn test_gesture_label_parse() {
        for label in GestureLabel::all() {
            assert_eq!(label.as_str().parse::<GestureLabel>().unwrap(), *label);
        }
        assert_eq!(
            "swipe_left".parse::<GestureLabel>(),
            Err(HandpageError::UnknownGesture("swipe_left".to_string()))
        );
    }

    #[test]
    fn test_gesture_label_serde_matches_as_str() {
        let json = serde_json::to_string(&GestureLabel::PointUp).unwrap();
        assert_eq!(json, "\"point_up\"");
        let back: GestureLabel = serde_json::from_str("\"open_palm\"").unwrap();
        assert_eq!(back, GestureLabel::OpenPalm);
    }

    #[test]
    fn test_finger_states() {
        let curled = FingerStates::default();
        assert!(curled.all_curled());
        assert!(!curled.all_extended());
        assert_eq!(curled.extended_count(), 0);

        let open = FingerStates::new(true, true, true, true);
        assert!(open.all_extended());
        assert_eq!(open.extended_count(), 4);

        let peace = FingerStates::new(true, true, false, false);
        assert!(!peace.all_curled());
        assert!(!peace.all_extended());
        assert_eq!(peace.to_string(), "I:1 M:1 R:0 P:0");
    }

    #[test]
    fn test_thumb_is_out() {
        assert!(ThumbOrientation::Up.is_out());
        assert!(ThumbOrientation::Side.is_out());
        assert!(!ThumbOrientation::Down.is_out());
        assert!(!ThumbOrientation::Curled.is_out());
    }
}
