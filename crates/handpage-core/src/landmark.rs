//! Hand landmarks - the per-frame output of the external hand tracker
//!
//! Coordinates are normalized to the camera frame: x and y in [0, 1] with y
//! growing downward (image space), z relative to the wrist depth.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::{HandpageError, HandpageResult};

/// Number of landmarks in a tracked hand
pub const LANDMARK_COUNT: usize = 21;

/// Anatomical landmark identifier, in tracker order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum HandLandmark {
    Wrist = 0,

    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,

    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,

    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,

    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,

    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandLandmark {
    /// All landmarks in tracker order
    pub fn all() -> &'static [HandLandmark; LANDMARK_COUNT] {
        &[
            HandLandmark::Wrist,
            HandLandmark::ThumbCmc,
            HandLandmark::ThumbMcp,
            HandLandmark::ThumbIp,
            HandLandmark::ThumbTip,
            HandLandmark::IndexMcp,
            HandLandmark::IndexPip,
            HandLandmark::IndexDip,
            HandLandmark::IndexTip,
            HandLandmark::MiddleMcp,
            HandLandmark::MiddlePip,
            HandLandmark::MiddleDip,
            HandLandmark::MiddleTip,
            HandLandmark::RingMcp,
            HandLandmark::RingPip,
            HandLandmark::RingDip,
            HandLandmark::RingTip,
            HandLandmark::PinkyMcp,
            HandLandmark::PinkyPip,
            HandLandmark::PinkyDip,
            HandLandmark::PinkyTip,
        ]
    }

    /// Position in the tracker's landmark array
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse from a tracker array position
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }
}

/// Single tracked point (normalized frame coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Point in the image plane (z = 0)
    pub fn planar(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Midpoint in the image plane
    pub fn midpoint(&self, other: &Landmark) -> Landmark {
        Landmark {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
            z: (self.z + other.z) / 2.0,
        }
    }
}

/// One frame's complete hand skeleton
///
/// Always holds exactly [`LANDMARK_COUNT`] points; the only fallible step is
/// construction from an untrusted list.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: [Landmark; LANDMARK_COUNT],
}

impl LandmarkSet {
    /// Build from a complete point array
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build from a tracker slice, rejecting anything but 21 points
    pub fn from_slice(points: &[Landmark]) -> HandpageResult<Self> {
        let points: [Landmark; LANDMARK_COUNT] =
            points
                .try_into()
                .map_err(|_| HandpageError::LandmarkCount {
                    expected: LANDMARK_COUNT,
                    actual: points.len(),
                })?;
        Ok(Self { points })
    }

    /// Get a landmark by name
    #[inline]
    pub fn get(&self, landmark: HandLandmark) -> &Landmark {
        &self.points[landmark.index()]
    }

    /// Replace a landmark
    pub fn set(&mut self, landmark: HandLandmark, point: Landmark) {
        self.points[landmark.index()] = point;
    }

    /// Builder-style variant of [`LandmarkSet::set`]
    pub fn with(mut self, landmark: HandLandmark, point: Landmark) -> Self {
        self.set(landmark, point);
        self
    }

    /// All points in tracker order
    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }
}

impl Default for LandmarkSet {
    fn default() -> Self {
        Self {
            points: [Landmark::default(); LANDMARK_COUNT],
        }
    }
}

impl Index<HandLandmark> for LandmarkSet {
    type Output = Landmark;

    #[inline]
    fn index(&self, landmark: HandLandmark) -> &Landmark {
        self.get(landmark)
    }
}

impl TryFrom<Vec<Landmark>> for LandmarkSet {
    type Error = HandpageError;

    fn try_from(points: Vec<Landmark>) -> HandpageResult<Self> {
        Self::from_slice(&points)
    }
}

/// What the tracker saw in one frame
///
/// `NoHand` is distinct from a hand whose gesture classifies as none: it
/// resets all debounce state.
#[derive(Debug, Clone, PartialEq)]
pub enum HandFrame {
    Hand(LandmarkSet),
    NoHand,
}

impl HandFrame {
    pub fn is_hand(&self) -> bool {
        matches!(self, HandFrame::Hand(_))
    }

    pub fn landmarks(&self) -> Option<&LandmarkSet> {
        match self {
            HandFrame::Hand(set) => Some(set),
            HandFrame::NoHand => None,
        }
    }
}

impl From<LandmarkSet> for HandFrame {
    fn from(set: LandmarkSet) -> Self {
        HandFrame::Hand(set)
    }
}
