//! Landmark geometry - per-frame hand features
//!
//! Pure functions over a single `LandmarkSet`. Image-space y grows downward,
//! so "higher on the frame" means a smaller y.
//!
//! NaN coordinates are not rejected here: every comparison against NaN is
//! false, which reads as a curled finger and a curled thumb.

use handpage_core::{FingerStates, HandLandmark, LandmarkSet, ThumbOrientation};

use crate::ThumbThresholds;

/// Geometry features derived from one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandFeatures {
    /// Extension of the four non-thumb fingers
    pub fingers: FingerStates,
    /// Thumb direction class
    pub thumb: ThumbOrientation,
    /// `wrist.y - thumb_tip.y` (positive: tip above wrist)
    pub thumb_rise: f32,
    /// `|thumb_tip.x - wrist.x|`
    pub thumb_reach: f32,
}

/// A finger is extended when its tip sits above its PIP joint.
#[inline]
pub fn is_extended(set: &LandmarkSet, tip: HandLandmark, pip: HandLandmark) -> bool {
    set[tip].y < set[pip].y
}

/// Extension flags for index, middle, ring and pinky
///
/// The thumb folds across the palm rather than toward it, so the tip/PIP
/// rule does not apply and it is handled by [`thumb_orientation`].
pub fn finger_states(set: &LandmarkSet) -> FingerStates {
    use HandLandmark::*;

    FingerStates {
        index: is_extended(set, IndexTip, IndexPip),
        middle: is_extended(set, MiddleTip, MiddlePip),
        ring: is_extended(set, RingTip, RingPip),
        pinky: is_extended(set, PinkyTip, PinkyPip),
    }
}

/// Thumb tip offsets from the wrist: (rise, reach)
pub fn thumb_offsets(set: &LandmarkSet) -> (f32, f32) {
    let wrist = set[HandLandmark::Wrist];
    let tip = set[HandLandmark::ThumbTip];
    (wrist.y - tip.y, (tip.x - wrist.x).abs())
}

/// Classify the thumb direction
pub fn thumb_orientation(set: &LandmarkSet, thresholds: &ThumbThresholds) -> ThumbOrientation {
    let (rise, reach) = thumb_offsets(set);
    orientation_from_offsets(rise, reach, thresholds)
}

fn orientation_from_offsets(rise: f32, reach: f32, thresholds: &ThumbThresholds) -> ThumbOrientation {
    if rise > thresholds.up {
        ThumbOrientation::Up
    } else if rise < thresholds.down {
        ThumbOrientation::Down
    } else if reach > thresholds.side {
        ThumbOrientation::Side
    } else {
        ThumbOrientation::Curled
    }
}

/// Compute all features for a frame
pub fn analyze(set: &LandmarkSet, thresholds: &ThumbThresholds) -> HandFeatures {
    let (rise, reach) = thumb_offsets(set);
    HandFeatures {
        fingers: finger_states(set),
        thumb: orientation_from_offsets(rise, reach, thresholds),
        thumb_rise: rise,
        thumb_reach: reach,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{curled, open, pose};
    use handpage_core::Landmark;

    #[test]
    fn test_finger_states_follow_tip_vs_pip() {
        let states = finger_states(&pose(open(), 0.0, 0.0));
        assert!(states.all_extended());

        let states = finger_states(&pose(curled(), 0.0, 0.0));
        assert!(states.all_curled());

        let states = finger_states(&pose(FingerStates::new(true, false, true, false), 0.0, 0.0));
        assert_eq!(states, FingerStates::new(true, false, true, false));
    }

    #[test]
    fn test_tip_level_with_pip_is_curled() {
        let set = pose(open(), 0.0, 0.0).with(HandLandmark::IndexTip, Landmark::planar(0.45, 0.5));
        assert!(!finger_states(&set).index);
    }

    #[test]
    fn test_thumb_up() {
        let set = pose(curled(), 0.20, 0.0);
        let thresholds = ThumbThresholds::default();
        assert_eq!(thumb_orientation(&set, &thresholds), ThumbOrientation::Up);

        let features = analyze(&set, &thresholds);
        assert!((features.thumb_rise - 0.20).abs() < 1e-5);
        assert!(features.thumb_reach < 1e-5);
    }

    #[test]
    fn test_thumb_down() {
        let set = pose(curled(), -0.12, 0.2);
        assert_eq!(
            thumb_orientation(&set, &ThumbThresholds::default()),
            ThumbOrientation::Down
        );
    }

    #[test]
    fn test_vertical_wins_over_horizontal() {
        // Far out to the side but also clearly raised: still "up".
        let set = pose(curled(), 0.18, 0.30);
        assert_eq!(
            thumb_orientation(&set, &ThumbThresholds::default()),
            ThumbOrientation::Up
        );
    }

    #[test]
    fn test_thumb_side_and_curled() {
        let thresholds = ThumbThresholds::default();
        assert_eq!(
            thumb_orientation(&pose(curled(), 0.05, -0.14), &thresholds),
            ThumbOrientation::Side
        );
        assert_eq!(
            thumb_orientation(&pose(curled(), 0.05, 0.14), &thresholds),
            ThumbOrientation::Side
        );
        assert_eq!(
            thumb_orientation(&pose(curled(), 0.05, 0.08), &thresholds),
            ThumbOrientation::Curled
        );
        assert_eq!(
            thumb_orientation(&pose(curled(), -0.08, 0.0), &thresholds),
            ThumbOrientation::Curled
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = ThumbThresholds {
            up: 0.25,
            ..Default::default()
        };
        let set = pose(curled(), 0.20, 0.0);
        assert_eq!(thumb_orientation(&set, &strict), ThumbOrientation::Curled);
    }

    #[test]
    fn test_offsets_on_threshold_do_not_trigger() {
        let thresholds = ThumbThresholds::default();
        assert_eq!(
            orientation_from_offsets(thresholds.up, 0.0, &thresholds),
            ThumbOrientation::Curled
        );
        assert_eq!(
            orientation_from_offsets(thresholds.down, 0.0, &thresholds),
            ThumbOrientation::Curled
        );
        assert_eq!(
            orientation_from_offsets(0.0, thresholds.side, &thresholds),
            ThumbOrientation::Curled
        );

        assert_eq!(
            orientation_from_offsets(thresholds.up + 1e-4, 0.0, &thresholds),
            ThumbOrientation::Up
        );
        assert_eq!(
            orientation_from_offsets(thresholds.down - 1e-4, 0.0, &thresholds),
            ThumbOrientation::Down
        );
        assert_eq!(
            orientation_from_offsets(0.0, thresholds.side + 1e-4, &thresholds),
            ThumbOrientation::Side
        );
    }

    #[test]
    fn test_measured_rise_equal_to_up_is_not_up() {
        let set = LandmarkSet::default()
            .with(HandLandmark::Wrist, Landmark::planar(0.5, 0.3))
            .with(HandLandmark::ThumbTip, Landmark::planar(0.5, 0.15));
        let (rise, _) = thumb_offsets(&set);
        let thresholds = ThumbThresholds {
            up: rise,
            ..Default::default()
        };
        assert_eq!(thumb_orientation(&set, &thresholds), ThumbOrientation::Curled);
    }

    #[test]
    fn test_measured_drop_equal_to_down_is_not_down() {
        let set = LandmarkSet::default()
            .with(HandLandmark::Wrist, Landmark::planar(0.5, 0.5))
            .with(HandLandmark::ThumbTip, Landmark::planar(0.5, 0.6));
        let (rise, _) = thumb_offsets(&set);
        let thresholds = ThumbThresholds {
            down: rise,
            ..Default::default()
        };
        assert_eq!(thumb_orientation(&set, &thresholds), ThumbOrientation::Curled);
    }

    #[test]
    fn test_measured_reach_equal_to_side_is_not_side() {
        let set = LandmarkSet::default()
            .with(HandLandmark::Wrist, Landmark::planar(0.5, 0.5))
            .with(HandLandmark::ThumbTip, Landmark::planar(0.62, 0.5));
        let (_, reach) = thumb_offsets(&set);
        let thresholds = ThumbThresholds {
            side: reach,
            ..Default::default()
        };
        assert_eq!(thumb_orientation(&set, &thresholds), ThumbOrientation::Curled);
    }

    #[test]
    fn test_nan_reads_as_curled() {
        let set = pose(open(), 0.0, 0.0)
            .with(HandLandmark::MiddleTip, Landmark::planar(0.5, f32::NAN))
            .with(HandLandmark::ThumbTip, Landmark::planar(f32::NAN, f32::NAN));
        let features = analyze(&set, &ThumbThresholds::default());
        assert!(!features.fingers.middle);
        assert!(features.fingers.index);
        assert_eq!(features.thumb, ThumbOrientation::Curled);
    }
}
