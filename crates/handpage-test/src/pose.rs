//! Synthetic hand poses
//!
//! Poses describe an upright hand in image coordinates (y grows downward).
//! Finger geometry scales with the hand; thumb offsets are given in frame
//! units because the thumb thresholds are.

use handpage_core::{FingerStates, GestureLabel, HandLandmark as L, Landmark, LandmarkSet};

/// Horizontal finger offsets from the wrist: index, middle, ring, pinky
const FINGER_X: [f32; 4] = [-0.05, 0.0, 0.05, 0.10];
const MCP_RISE: f32 = 0.20;
const PIP_RISE: f32 = 0.30;
const EXTENDED_DIP_RISE: f32 = 0.35;
const EXTENDED_TIP_RISE: f32 = 0.40;
const CURLED_DIP_RISE: f32 = 0.25;
const CURLED_TIP_RISE: f32 = 0.22;

/// Builder for a single landmark set
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseBuilder {
    wrist: (f32, f32),
    scale: f32,
    fingers: FingerStates,
    /// Thumb tip offset from the wrist: (dx, rise)
    thumb: (f32, f32),
}

impl Default for PoseBuilder {
    fn default() -> Self {
        PoseBuilder {
            wrist: (0.5, 0.8),
            scale: 1.0,
            fingers: FingerStates::default(),
            thumb: (0.0, 0.0),
        }
    }
}

impl PoseBuilder {
    /// Fist-shaped hand with the thumb resting on the wrist
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical pose for a gesture
    pub fn gesture(label: GestureLabel) -> Self {
        let (fingers, dx, rise) = match label {
            GestureLabel::ThumbsUp => (FingerStates::default(), 0.0, 0.20),
            GestureLabel::ThumbsDown => (FingerStates::default(), 0.0, -0.15),
            GestureLabel::Fist => (FingerStates::default(), -0.03, 0.05),
            GestureLabel::OpenPalm => (FingerStates::new(true, true, true, true), -0.18, 0.05),
            GestureLabel::PointUp => (FingerStates::new(true, false, false, false), -0.03, 0.05),
            GestureLabel::Peace => (FingerStates::new(true, true, false, false), -0.03, 0.05),
        };
        Self::new().fingers(fingers).thumb(dx, rise)
    }

    /// A hand that matches no gesture: three fingers up, thumb resting
    pub fn unclassified() -> Self {
        Self::new()
            .fingers(FingerStates::new(true, true, true, false))
            .thumb(0.0, 0.05)
    }

    pub fn wrist(mut self, x: f32, y: f32) -> Self {
        self.wrist = (x, y);
        self
    }

    /// Hand size relative to the canonical pose
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn fingers(mut self, fingers: FingerStates) -> Self {
        self.fingers = fingers;
        self
    }

    /// Thumb tip offset from the wrist; positive `rise` is above the wrist
    pub fn thumb(mut self, dx: f32, rise: f32) -> Self {
        self.thumb = (dx, rise);
        self
    }

    pub fn build(&self) -> LandmarkSet {
        let (wx, wy) = self.wrist;
        let s = self.scale;
        let at = |dx: f32, rise: f32| Landmark::planar(wx + dx * s, wy - rise * s);

        let mut set = LandmarkSet::default();
        set.set(L::Wrist, Landmark::planar(wx, wy));

        let (tdx, trise) = self.thumb;
        let thumb_tip = Landmark::planar(wx + tdx, wy - trise);
        for (joint, t) in [(L::ThumbCmc, 0.25), (L::ThumbMcp, 0.5), (L::ThumbIp, 0.75)] {
            set.set(
                joint,
                Landmark::planar(wx + (thumb_tip.x - wx) * t, wy + (thumb_tip.y - wy) * t),
            );
        }
        set.set(L::ThumbTip, thumb_tip);

        let chains = [
            (self.fingers.index, [L::IndexMcp, L::IndexPip, L::IndexDip, L::IndexTip]),
            (self.fingers.middle, [L::MiddleMcp, L::MiddlePip, L::MiddleDip, L::MiddleTip]),
            (self.fingers.ring, [L::RingMcp, L::RingPip, L::RingDip, L::RingTip]),
            (self.fingers.pinky, [L::PinkyMcp, L::PinkyPip, L::PinkyDip, L::PinkyTip]),
        ];
        for ((extended, [mcp, pip, dip, tip]), x) in chains.into_iter().zip(FINGER_X) {
            set.set(mcp, at(x, MCP_RISE));
            set.set(pip, at(x, PIP_RISE));
            if extended {
                set.set(dip, at(x, EXTENDED_DIP_RISE));
                set.set(tip, at(x, EXTENDED_TIP_RISE));
            } else {
                set.set(dip, at(x, CURLED_DIP_RISE));
                set.set(tip, at(x, CURLED_TIP_RISE));
            }
        }
        set
    }
}

/// Canonical landmark set for a gesture
pub fn canonical(label: GestureLabel) -> LandmarkSet {
    PoseBuilder::gesture(label).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use handpage_gesture::GestureClassifier;
    use proptest::prelude::*;

    #[test]
    fn test_canonical_poses_classify() {
        let classifier = GestureClassifier::new();
        for &label in GestureLabel::all() {
            assert_eq!(classifier.label(&canonical(label)), Some(label), "{label}");
        }
        assert_eq!(classifier.label(&PoseBuilder::unclassified().build()), None);
    }

    #[test]
    fn test_builder_places_wrist_and_thumb() {
        let set = PoseBuilder::new().wrist(0.3, 0.9).thumb(0.1, 0.2).build();
        assert_eq!(set[L::Wrist], Landmark::planar(0.3, 0.9));
        let tip = set[L::ThumbTip];
        assert!((tip.x - 0.4).abs() < 1e-6);
        assert!((tip.y - 0.7).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_gestures_survive_translation_and_scale(
            index in 0usize..6,
            x in 0.3f32..0.7,
            y in 0.7f32..0.9,
            scale in 0.8f32..1.2,
        ) {
            let label = GestureLabel::all()[index];
            let set = PoseBuilder::gesture(label).wrist(x, y).scale(scale).build();
            prop_assert_eq!(GestureClassifier::new().label(&set), Some(label));
        }
    }
}
