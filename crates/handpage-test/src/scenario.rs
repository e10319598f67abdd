//! Scripted pipeline scenarios on a manual clock

use std::sync::Arc;
use std::time::Duration;

use handpage_core::{Action, GestureLabel, HandFrame, LandmarkSet, Timestamp};
use handpage_gesture::{FrameReport, GestureConfig, GesturePipeline, GestureResult};
use handpage_runtime::{
    command_channel, FrameSource, GestureCommand, GestureController, PollOutcome,
};
use handpage_time::{Clock, ManualClock};

use crate::canonical;

/// One scripted step
#[derive(Clone, Debug)]
pub enum Step {
    /// Feed `count` copies of a frame, one per frame interval
    Frames { frame: HandFrame, count: usize },
    /// Let time pass without frames
    Pause(Duration),
}

/// Deterministic sequence of frames and pauses
#[derive(Clone, Debug)]
pub struct Scenario {
    name: String,
    frame_interval: Duration,
    steps: Vec<Step>,
}

impl Scenario {
    /// Empty scenario at 30 ms per frame
    pub fn new(name: impl Into<String>) -> Self {
        Scenario {
            name: name.into(),
            frame_interval: Duration::from_millis(30),
            steps: Vec::new(),
        }
    }

    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn hold(mut self, set: LandmarkSet, count: usize) -> Self {
        self.steps.push(Step::Frames {
            frame: HandFrame::Hand(set),
            count,
        });
        self
    }

    pub fn hold_gesture(self, label: GestureLabel, count: usize) -> Self {
        self.hold(canonical(label), count)
    }

    pub fn no_hand(mut self, count: usize) -> Self {
        self.steps.push(Step::Frames {
            frame: HandFrame::NoHand,
            count,
        });
        self
    }

    pub fn pause(mut self, duration: Duration) -> Self {
        self.steps.push(Step::Pause(duration));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total number of frames fed
    pub fn frames(&self) -> usize {
        self.steps
            .iter()
            .map(|step| match step {
                Step::Frames { count, .. } => *count,
                Step::Pause(_) => 0,
            })
            .sum()
    }

    /// Feed the script through a fresh pipeline
    pub fn run(&self, config: GestureConfig) -> GestureResult<ScenarioOutcome> {
        let clock = ManualClock::new();
        let (handler, mut rx) = command_channel(Arc::new(clock.clone()));
        let mut pipeline = GesturePipeline::with_handler(config, handler)?;

        let mut reports = Vec::with_capacity(self.frames());
        for step in &self.steps {
            match step {
                Step::Frames { frame, count } => {
                    for _ in 0..*count {
                        reports.push(pipeline.process(frame, clock.now()));
                        clock.advance(self.frame_interval);
                    }
                }
                Step::Pause(duration) => {
                    clock.advance(*duration);
                }
            }
        }

        let mut commands = Vec::new();
        while let Ok(command) = rx.try_recv() {
            commands.push(command);
        }

        Ok(ScenarioOutcome {
            commands,
            reports,
            finished_at: clock.now(),
        })
    }
}

/// Everything a scenario run produced
#[derive(Clone, Debug)]
pub struct ScenarioOutcome {
    /// Commands delivered to the handler, in order
    pub commands: Vec<GestureCommand>,
    /// One report per frame
    pub reports: Vec<FrameReport>,
    pub finished_at: Timestamp,
}

impl ScenarioOutcome {
    pub fn gestures(&self) -> Vec<GestureLabel> {
        self.commands.iter().map(|c| c.gesture).collect()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.commands.iter().map(|c| c.action).collect()
    }

    /// Gate passes, including unmapped gestures
    pub fn dispatches(&self) -> usize {
        self.reports.iter().filter(|r| r.dispatched()).count()
    }

    /// Frames whose stabilized label was `label`
    pub fn stable_frames(&self, label: GestureLabel) -> usize {
        self.reports
            .iter()
            .filter(|r| r.stable == Some(label))
            .count()
    }
}

/// Poll a controller to the end of its source, advancing `clock` per frame
///
/// Returns the number of polls that produced a frame or an error.
pub fn drive_to_end<S: FrameSource>(
    controller: &mut GestureController<S>,
    clock: &ManualClock,
    interval: Duration,
) -> usize {
    let mut polls = 0;
    while controller.poll_once() != PollOutcome::Exhausted {
        polls += 1;
        clock.advance(interval);
    }
    polls
}
