//! Per-session gesture pipeline

use handpage_core::{GestureLabel, HandFrame, LandmarkSet, Timestamp};
use tracing::trace;

use crate::{
    DispatchGate, GateDecision, GestureClassifier, GestureConfig, GestureHandler, GestureResult,
    GestureStabilizer, HandFeatures, IgnoreGestures,
};

/// What happened to one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Geometry features; `None` when no hand was present
    pub features: Option<HandFeatures>,
    /// Single-frame label
    pub raw: Option<GestureLabel>,
    /// Majority-vote label
    pub stable: Option<GestureLabel>,
    pub decision: GateDecision,
}

impl FrameReport {
    fn no_hand() -> Self {
        FrameReport {
            features: None,
            raw: None,
            stable: None,
            decision: GateDecision::Idle,
        }
    }

    pub fn hand_present(&self) -> bool {
        self.features.is_some()
    }

    pub fn dispatched(&self) -> bool {
        matches!(self.decision, GateDecision::Dispatched(_))
    }
}

/// Analyzer, classifier, stabilizer and gate for one session
///
/// Owns all mutable recognition state. Independent sessions use independent
/// pipelines.
pub struct GesturePipeline {
    config: GestureConfig,
    classifier: GestureClassifier,
    stabilizer: GestureStabilizer,
    gate: DispatchGate,
    handler: Box<dyn GestureHandler>,
}

impl GesturePipeline {
    /// Pipeline that recognizes gestures but calls nothing
    pub fn new(config: GestureConfig) -> GestureResult<Self> {
        config.validate()?;
        Ok(Self {
            classifier: GestureClassifier::from_config(&config),
            stabilizer: GestureStabilizer::from_config(&config),
            gate: DispatchGate::from_config(&config),
            handler: Box::new(IgnoreGestures),
            config,
        })
    }

    /// Pipeline that reports dispatched actions to `handler`
    pub fn with_handler<H>(config: GestureConfig, handler: H) -> GestureResult<Self>
    where
        H: GestureHandler + 'static,
    {
        let mut pipeline = Self::new(config)?;
        pipeline.set_handler(handler);
        Ok(pipeline)
    }

    pub fn set_handler<H>(&mut self, handler: H)
    where
        H: GestureHandler + 'static,
    {
        self.handler = Box::new(handler);
    }

    /// Thread one frame through every stage
    pub fn process(&mut self, frame: &HandFrame, now: Timestamp) -> FrameReport {
        match frame {
            HandFrame::Hand(set) => self.process_hand(set, now),
            HandFrame::NoHand => {
                self.hand_lost();
                FrameReport::no_hand()
            }
        }
    }

    /// Shorthand for a frame with a hand in it
    pub fn process_hand(&mut self, set: &LandmarkSet, now: Timestamp) -> FrameReport {
        let classification = self.classifier.classify(set);
        let stable = self.stabilizer.push(classification.label);
        let decision = self.gate.offer(stable, now);

        trace!(
            fingers = %classification.features.fingers,
            thumb = classification.features.thumb.as_str(),
            rise = classification.features.thumb_rise,
            reach = classification.features.thumb_reach,
            raw = ?classification.label,
            stable = ?stable,
            "frame classified"
        );

        if let GateDecision::Dispatched(dispatch) = decision {
            if let Some(action) = dispatch.action {
                self.handler.on_gesture(dispatch.gesture, action);
            }
        }

        FrameReport {
            features: Some(classification.features),
            raw: classification.label,
            stable,
            decision,
        }
    }

    /// Hand left the frame: drop the history and the last label
    pub fn hand_lost(&mut self) {
        if !self.stabilizer.is_empty() {
            trace!("hand lost, clearing gesture history");
        }
        self.stabilizer.clear();
        self.gate.reset_label();
    }

    /// Back to a fresh session, cooldown included
    pub fn reset(&mut self) {
        self.stabilizer.clear();
        self.gate.reset();
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn stabilizer(&self) -> &GestureStabilizer {
        &self.stabilizer
    }

    pub fn gate(&self) -> &DispatchGate {
        &self.gate
    }
}

impl std::fmt::Debug for GesturePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GesturePipeline")
            .field("config", &self.config)
            .field("stabilizer", &self.stabilizer)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}
