//! Frame sources
//!
//! A frame source stands in for the camera and hand tracker. Each poll
//! yields what the tracker saw in one frame, or `None` once the stream ends.

use std::collections::VecDeque;
use std::path::Path;

use handpage_core::{HandFrame, Landmark, LandmarkSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::RuntimeResult;

/// Raw tracker output for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Observation {
    NoHand,
    Hand {
        landmarks: Vec<Landmark>,
        /// Tracker confidence in [0, 1]
        confidence: f32,
    },
}

impl Observation {
    /// Hand observation with full confidence
    pub fn hand(set: &LandmarkSet) -> Self {
        Observation::Hand {
            landmarks: set.points().to_vec(),
            confidence: 1.0,
        }
    }

    /// Convert to a pipeline frame
    ///
    /// Low-confidence hands and malformed landmark lists become `NoHand`.
    pub fn into_frame(self, min_confidence: f32) -> HandFrame {
        match self {
            Observation::NoHand => HandFrame::NoHand,
            Observation::Hand { confidence, .. } if !(confidence >= min_confidence) => {
                debug!(confidence, min_confidence, "low tracking confidence, treating frame as no hand");
                HandFrame::NoHand
            }
            Observation::Hand { landmarks, .. } => match LandmarkSet::try_from(landmarks) {
                Ok(set) => HandFrame::Hand(set),
                Err(err) => {
                    warn!(%err, "malformed landmarks, treating frame as no hand");
                    HandFrame::NoHand
                }
            },
        }
    }
}

impl From<HandFrame> for Observation {
    fn from(frame: HandFrame) -> Self {
        match frame {
            HandFrame::Hand(set) => Observation::hand(&set),
            HandFrame::NoHand => Observation::NoHand,
        }
    }
}

/// Source of tracker observations
pub trait FrameSource: Send {
    /// Next observation; `Ok(None)` at end of stream
    ///
    /// Errors are per frame: the caller skips the frame and keeps polling.
    fn poll_frame(&mut self) -> RuntimeResult<Option<Observation>>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn poll_frame(&mut self) -> RuntimeResult<Option<Observation>> {
        (**self).poll_frame()
    }
}

/// Replays a recorded observation stream
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    frames: VecDeque<Observation>,
}

impl ReplaySource {
    pub fn new(frames: impl IntoIterator<Item = Observation>) -> Self {
        ReplaySource {
            frames: frames.into_iter().collect(),
        }
    }

    /// Parse a JSON array of observations
    pub fn from_json_str(json: &str) -> RuntimeResult<Self> {
        let frames: Vec<Observation> = serde_json::from_str(json)?;
        Ok(Self::new(frames))
    }

    pub fn from_file(path: impl AsRef<Path>) -> RuntimeResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Append observations to the end of the stream
    pub fn extend(&mut self, frames: impl IntoIterator<Item = Observation>) {
        self.frames.extend(frames);
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for ReplaySource {
    fn poll_frame(&mut self) -> RuntimeResult<Option<Observation>> {
        Ok(self.frames.pop_front())
    }
}
