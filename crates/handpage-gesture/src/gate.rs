//! Dispatch gate - cooldown and repeat suppression
//!
//! A stabilized gesture becomes an action at most once per cooldown window,
//! and never twice in a row without a reset in between (hand loss or
//! controller restart).

use std::time::Duration;

use handpage_core::{Action, ActionMap, GestureLabel, Timestamp};
use tracing::{debug, info};

use crate::GestureConfig;

/// Receiver of dispatched gestures
///
/// Runs on the polling loop's stack. Implementations that need to reach
/// another thread should hand the command off (e.g. over a channel) and
/// return quickly.
///
/// When the pipeline sits behind a lock (the runtime's `SharedPipeline`),
/// the handler is called with that lock held. Locking the same pipeline
/// from inside `on_gesture` deadlocks.
pub trait GestureHandler: Send {
    fn on_gesture(&mut self, gesture: GestureLabel, action: Action);
}

impl<F> GestureHandler for F
where
    F: FnMut(GestureLabel, Action) + Send,
{
    fn on_gesture(&mut self, gesture: GestureLabel, action: Action) {
        self(gesture, action)
    }
}

/// Handler that drops every command
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreGestures;

impl GestureHandler for IgnoreGestures {
    fn on_gesture(&mut self, _gesture: GestureLabel, _action: Action) {}
}

/// A gesture that passed the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub gesture: GestureLabel,
    /// `None` when the gesture has no binding; nothing is called then
    pub action: Option<Action>,
    pub at: Timestamp,
}

/// Outcome of offering a stabilized label to the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Nothing stable to offer
    Idle,
    /// Too soon after the last dispatch
    CoolingDown { remaining: Duration },
    /// Same label as the last dispatch
    Repeated,
    Dispatched(Dispatch),
}

impl GateDecision {
    pub fn dispatch(&self) -> Option<&Dispatch> {
        match self {
            GateDecision::Dispatched(dispatch) => Some(dispatch),
            _ => None,
        }
    }
}

/// Rate limiting and change detection before the action callback
#[derive(Debug, Clone)]
pub struct DispatchGate {
    cooldown: Duration,
    actions: ActionMap,
    last_label: Option<GestureLabel>,
    last_dispatch: Option<Timestamp>,
}

impl DispatchGate {
    /// Gate with the default cooldown and action table
    pub fn new() -> Self {
        Self::with_actions(GestureConfig::default().cooldown, ActionMap::default())
    }

    pub fn with_actions(cooldown: Duration, actions: ActionMap) -> Self {
        Self {
            cooldown,
            actions,
            last_label: None,
            last_dispatch: None,
        }
    }

    pub fn from_config(config: &GestureConfig) -> Self {
        Self::with_actions(config.cooldown, config.actions.clone())
    }

    /// Decide whether `label` dispatches at `now`
    ///
    /// On success the label and time are recorded even if the gesture is
    /// unmapped.
    pub fn offer(&mut self, label: Option<GestureLabel>, now: Timestamp) -> GateDecision {
        let Some(gesture) = label else {
            return GateDecision::Idle;
        };

        if let Some(last) = self.last_dispatch {
            let elapsed = now - last;
            if elapsed < self.cooldown {
                let remaining = self.cooldown - elapsed;
                debug!(%gesture, ?remaining, "dispatch suppressed: cooling down");
                return GateDecision::CoolingDown { remaining };
            }
        }

        if self.last_label == Some(gesture) {
            debug!(%gesture, "dispatch suppressed: repeated gesture");
            return GateDecision::Repeated;
        }

        self.last_label = Some(gesture);
        self.last_dispatch = Some(now);

        let action = self.actions.get(gesture);
        match action {
            Some(action) => info!(%gesture, %action, "gesture dispatched"),
            None => debug!(%gesture, "gesture has no bound action"),
        }

        GateDecision::Dispatched(Dispatch {
            gesture,
            action,
            at: now,
        })
    }

    /// Forget the last label (hand lost); the cooldown keeps running
    pub fn reset_label(&mut self) {
        self.last_label = None;
    }

    /// Forget everything, including the cooldown
    pub fn reset(&mut self) {
        self.last_label = None;
        self.last_dispatch = None;
    }

    pub fn last_label(&self) -> Option<GestureLabel> {
        self.last_label
    }

    pub fn last_dispatch(&self) -> Option<Timestamp> {
        self.last_dispatch
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn actions(&self) -> &ActionMap {
        &self.actions
    }
}

impl Default for DispatchGate {
    fn default() -> Self {
        Self::new()
    }
}
