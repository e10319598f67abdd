//! Gesture classification
//!
//! Several gestures share finger patterns (thumbs up, thumbs down and fist
//! are all "four fingers curled"), so rules are checked in a fixed priority
//! order and the first match wins:
//!
//! 1. thumbs up   - thumb up, fingers curled
//! 2. thumbs down - thumb down, fingers curled
//! 3. point up    - index only
//! 4. peace       - index and middle only
//! 5. open palm   - all fingers, thumb up or sideways
//! 6. fist        - fingers curled, thumb tucked

use handpage_core::{GestureLabel, HandLandmark, LandmarkSet, ThumbOrientation};

use crate::{analyze, FistThresholds, GestureConfig, HandFeatures, ThumbThresholds};

/// Is the thumb folded against the hand?
///
/// Either the tip lies near the palm centre (midpoint of index MCP and
/// wrist) on both axes, or it barely rises or drops relative to the wrist.
pub fn is_thumb_tucked(set: &LandmarkSet, thresholds: &FistThresholds) -> bool {
    let tip = set[HandLandmark::ThumbTip];
    let wrist = set[HandLandmark::Wrist];
    let palm = set[HandLandmark::IndexMcp].midpoint(&wrist);

    let near_palm =
        (tip.x - palm.x).abs() < thresholds.palm_x && (tip.y - palm.y).abs() < thresholds.palm_y;
    let not_pointing = (wrist.y - tip.y).abs() < thresholds.vertical;

    near_palm || not_pointing
}

/// Match precomputed features against the vocabulary
pub fn classify(
    set: &LandmarkSet,
    features: &HandFeatures,
    fist: &FistThresholds,
) -> Option<GestureLabel> {
    let fingers = &features.fingers;
    let curled = fingers.all_curled();

    if curled && features.thumb == ThumbOrientation::Up {
        return Some(GestureLabel::ThumbsUp);
    }
    if curled && features.thumb == ThumbOrientation::Down {
        return Some(GestureLabel::ThumbsDown);
    }
    if fingers.index && !fingers.middle && !fingers.ring && !fingers.pinky {
        return Some(GestureLabel::PointUp);
    }
    if fingers.index && fingers.middle && !fingers.ring && !fingers.pinky {
        return Some(GestureLabel::Peace);
    }
    if fingers.all_extended() && features.thumb.is_out() {
        return Some(GestureLabel::OpenPalm);
    }
    if curled && is_thumb_tucked(set, fist) {
        return Some(GestureLabel::Fist);
    }
    None
}

/// Result of classifying one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub features: HandFeatures,
    pub label: Option<GestureLabel>,
}

/// Stateless classifier bound to a set of thresholds
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    thumb: ThumbThresholds,
    fist: FistThresholds,
}

impl GestureClassifier {
    /// Classifier with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(thumb: ThumbThresholds, fist: FistThresholds) -> Self {
        Self { thumb, fist }
    }

    pub fn from_config(config: &GestureConfig) -> Self {
        Self::with_thresholds(config.thumb, config.fist)
    }

    /// Analyze and classify a frame
    pub fn classify(&self, set: &LandmarkSet) -> Classification {
        let features = analyze(set, &self.thumb);
        Classification {
            features,
            label: classify(set, &features, &self.fist),
        }
    }

    /// Label only
    pub fn label(&self, set: &LandmarkSet) -> Option<GestureLabel> {
        self.classify(set).label
    }
}
