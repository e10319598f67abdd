//! Jittered frame streams
//!
//! Simulates a real tracker over a scripted sequence of poses:
//! - Per-landmark positional noise
//! - Dropped detections (no hand)
//! - Detections below the runtime's confidence threshold

use std::collections::VecDeque;

use handpage_core::{GestureLabel, Landmark, LandmarkSet};
use handpage_runtime::{FrameSource, Observation, RuntimeResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::canonical;

/// Tracker noise model
#[derive(Clone, Debug, PartialEq)]
pub struct JitterConfig {
    /// Max displacement per coordinate, uniform in `[-noise, noise]`
    pub noise: f32,
    /// Probability that a hand frame is reported as no hand
    pub dropout_rate: f64,
    /// Probability that a hand frame carries a low confidence
    pub low_confidence_rate: f64,
    /// Confidence range for good detections
    pub confidence: (f32, f32),
    /// Confidence range for poor detections
    pub low_confidence: (f32, f32),
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self::shaky()
    }
}

impl JitterConfig {
    /// Exact poses, full confidence
    pub fn none() -> Self {
        JitterConfig {
            noise: 0.0,
            dropout_rate: 0.0,
            low_confidence_rate: 0.0,
            confidence: (1.0, 1.0),
            low_confidence: (0.0, 0.5),
        }
    }

    /// Steady hand in good light
    pub fn calm() -> Self {
        JitterConfig {
            noise: 0.005,
            dropout_rate: 0.0,
            low_confidence_rate: 0.0,
            confidence: (0.9, 1.0),
            low_confidence: (0.3, 0.6),
        }
    }

    /// Typical webcam conditions
    pub fn shaky() -> Self {
        JitterConfig {
            noise: 0.01,
            dropout_rate: 0.02,
            low_confidence_rate: 0.02,
            confidence: (0.8, 1.0),
            low_confidence: (0.3, 0.6),
        }
    }

    /// Tremor and poor lighting
    pub fn tremor() -> Self {
        JitterConfig {
            noise: 0.02,
            dropout_rate: 0.05,
            low_confidence_rate: 0.05,
            confidence: (0.75, 1.0),
            low_confidence: (0.2, 0.6),
        }
    }
}

#[derive(Clone, Debug)]
enum Shot {
    Pose(LandmarkSet),
    NoHand,
}

/// Seeded frame source over a pose script
#[derive(Clone, Debug)]
pub struct JitterSource {
    config: JitterConfig,
    rng: StdRng,
    script: VecDeque<(Shot, usize)>,
}

impl JitterSource {
    pub fn new(config: JitterConfig, seed: u64) -> Self {
        JitterSource {
            config,
            rng: StdRng::seed_from_u64(seed),
            script: VecDeque::new(),
        }
    }

    /// Show `set` for `frames` frames
    pub fn hold(mut self, set: LandmarkSet, frames: usize) -> Self {
        self.push(Shot::Pose(set), frames);
        self
    }

    /// Show the canonical pose for `label`
    pub fn hold_gesture(self, label: GestureLabel, frames: usize) -> Self {
        self.hold(canonical(label), frames)
    }

    /// Take the hand out of view
    pub fn no_hand(mut self, frames: usize) -> Self {
        self.push(Shot::NoHand, frames);
        self
    }

    /// Frames left in the script
    pub fn remaining(&self) -> usize {
        self.script.iter().map(|(_, n)| n).sum()
    }

    /// Next observation, `None` once the script is done
    pub fn next_observation(&mut self) -> Option<Observation> {
        let shot = loop {
            let (shot, left) = self.script.front_mut()?;
            if *left == 0 {
                self.script.pop_front();
                continue;
            }
            *left -= 1;
            break shot.clone();
        };

        let set = match shot {
            Shot::NoHand => return Some(Observation::NoHand),
            Shot::Pose(set) => set,
        };
        if self.chance(self.config.dropout_rate) {
            return Some(Observation::NoHand);
        }

        let range = if self.chance(self.config.low_confidence_rate) {
            self.config.low_confidence
        } else {
            self.config.confidence
        };
        let confidence = self.sample(range);
        let landmarks = set.points().iter().map(|p| self.displace(p)).collect();

        Some(Observation::Hand {
            landmarks,
            confidence,
        })
    }

    fn push(&mut self, shot: Shot, frames: usize) {
        if frames > 0 {
            self.script.push_back((shot, frames));
        }
    }

    /// Rates outside (0, 1] behave as never or always
    fn chance(&mut self, probability: f64) -> bool {
        probability > 0.0 && self.rng.gen::<f64>() < probability
    }

    fn displace(&mut self, point: &Landmark) -> Landmark {
        let noise = self.config.noise;
        if noise <= 0.0 {
            return *point;
        }
        Landmark::new(
            point.x + self.rng.gen_range(-noise..=noise),
            point.y + self.rng.gen_range(-noise..=noise),
            point.z,
        )
    }

    fn sample(&mut self, (low, high): (f32, f32)) -> f32 {
        if high > low {
            self.rng.gen_range(low..=high)
        } else {
            low
        }
    }
}

impl FrameSource for JitterSource {
    fn poll_frame(&mut self) -> RuntimeResult<Option<Observation>> {
        Ok(self.next_observation())
    }
}

impl Iterator for JitterSource {
    type Item = Observation;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_observation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handpage_core::HandFrame;
    use handpage_gesture::GestureClassifier;

    #[test]
    fn test_exact_stream_without_noise() {
        let set = canonical(GestureLabel::Peace);
        let frames: Vec<_> = JitterSource::new(JitterConfig::none(), 1)
            .hold(set.clone(), 3)
            .no_hand(2)
            .collect();

        assert_eq!(frames.len(), 5);
        assert_eq!(frames[0], Observation::hand(&set));
        assert_eq!(frames[3], Observation::NoHand);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let make = |seed| {
            JitterSource::new(JitterConfig::tremor(), seed)
                .hold_gesture(GestureLabel::Fist, 50)
                .collect::<Vec<_>>()
        };
        assert_eq!(make(7), make(7));
        assert_ne!(make(7), make(8));
    }

    #[test]
    fn test_remaining_counts_down() {
        let mut source = JitterSource::new(JitterConfig::calm(), 3)
            .hold_gesture(GestureLabel::PointUp, 2)
            .no_hand(0)
            .no_hand(1);
        assert_eq!(source.remaining(), 3);
        source.poll_frame().unwrap();
        assert_eq!(source.remaining(), 2);
        source.poll_frame().unwrap();
        source.poll_frame().unwrap();
        assert_eq!(source.poll_frame().unwrap(), None);
    }

    #[test]
    fn test_full_dropout() {
        let config = JitterConfig {
            dropout_rate: 1.0,
            ..JitterConfig::calm()
        };
        let mut source = JitterSource::new(config, 5).hold_gesture(GestureLabel::Peace, 20);
        assert!(source.all(|o| o == Observation::NoHand));
    }

    #[test]
    fn test_low_confidence_frames_become_no_hand() {
        let config = JitterConfig {
            low_confidence_rate: 1.0,
            ..JitterConfig::calm()
        };
        let source = JitterSource::new(config, 5).hold_gesture(GestureLabel::Peace, 20);
        for observation in source {
            assert_eq!(observation.into_frame(0.7), HandFrame::NoHand);
        }
    }

    #[test]
    fn test_tremor_noise_keeps_labels() {
        let classifier = GestureClassifier::new();
        for &label in GestureLabel::all() {
            let config = JitterConfig {
                dropout_rate: 0.0,
                low_confidence_rate: 0.0,
                ..JitterConfig::tremor()
            };
            let source = JitterSource::new(config, 11).hold_gesture(label, 100);
            for observation in source {
                let frame = observation.into_frame(0.7);
                let set = frame.landmarks().expect("hand frame");
                assert_eq!(classifier.label(set), Some(label));
            }
        }
    }
}
