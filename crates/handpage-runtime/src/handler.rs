//! Command handoff from the polling loop to the UI context

use std::sync::Arc;

use handpage_core::{Action, GestureLabel, Timestamp};
use handpage_gesture::GestureHandler;
use handpage_reader::{Narrator, ReaderChange, ReaderSession};
use handpage_time::Clock;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::warn;

/// A dispatched gesture on its way to the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureCommand {
    pub gesture: GestureLabel,
    pub action: Action,
    /// When the handler received it
    pub at: Timestamp,
}

/// Forwards dispatched gestures over an unbounded channel
///
/// Sending never blocks the polling loop. Once the receiver is gone,
/// commands are dropped with a single warning.
pub struct ChannelHandler {
    tx: UnboundedSender<GestureCommand>,
    clock: Arc<dyn Clock>,
    closed: bool,
}

impl ChannelHandler {
    pub fn new(tx: UnboundedSender<GestureCommand>, clock: Arc<dyn Clock>) -> Self {
        ChannelHandler {
            tx,
            clock,
            closed: false,
        }
    }
}

impl GestureHandler for ChannelHandler {
    fn on_gesture(&mut self, gesture: GestureLabel, action: Action) {
        let command = GestureCommand {
            gesture,
            action,
            at: self.clock.now(),
        };
        if self.tx.send(command).is_err() && !self.closed {
            warn!(%gesture, %action, "command receiver closed, dropping gesture commands");
            self.closed = true;
        }
    }
}

/// Handler plus the receiving end for the UI context
pub fn command_channel(clock: Arc<dyn Clock>) -> (ChannelHandler, UnboundedReceiver<GestureCommand>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelHandler::new(tx, clock), rx)
}

/// Apply every queued command to a reader session without waiting
///
/// Returns the changes in arrival order; commands ignored because gestures
/// are disabled are left out.
pub fn apply_pending<N: Narrator>(
    rx: &mut UnboundedReceiver<GestureCommand>,
    session: &mut ReaderSession<N>,
) -> Vec<ReaderChange> {
    let mut changes = Vec::new();
    while let Ok(command) = rx.try_recv() {
        if let Some(change) = session.apply_gesture(command.gesture, command.action) {
            changes.push(change);
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use handpage_reader::MemoryNarrator;
    use handpage_time::ManualClock;

    #[test]
    fn test_commands_carry_clock_time() {
        let clock = ManualClock::new();
        let (mut handler, mut rx) = command_channel(Arc::new(clock.clone()));

        clock.advance(Duration::from_millis(250));
        handler.on_gesture(GestureLabel::Peace, Action::PreviousPage);

        assert_eq!(
            rx.try_recv().unwrap(),
            GestureCommand {
                gesture: GestureLabel::Peace,
                action: Action::PreviousPage,
                at: Timestamp::from_millis(250),
            }
        );
    }

    #[test]
    fn test_closed_receiver_does_not_panic() {
        let (mut handler, rx) = command_channel(Arc::new(ManualClock::new()));
        drop(rx);
        handler.on_gesture(GestureLabel::Fist, Action::StopNarration);
        handler.on_gesture(GestureLabel::Fist, Action::StopNarration);
        assert!(handler.closed);
    }

    #[test]
    fn test_apply_pending_drives_reader() {
        let (mut handler, mut rx) = command_channel(Arc::new(ManualClock::new()));
        let mut session = ReaderSession::new(
            vec!["one".into(), "two".into()],
            MemoryNarrator::new(),
        );

        handler.on_gesture(GestureLabel::PointUp, Action::NextPage);
        handler.on_gesture(GestureLabel::ThumbsUp, Action::IncreaseFont);
        let changes = apply_pending(&mut rx, &mut session);
        assert_eq!(
            changes,
            vec![
                ReaderChange::Page { index: 1, total: 2 },
                ReaderChange::FontSize(20),
            ]
        );

        session.set_gestures_enabled(false);
        handler.on_gesture(GestureLabel::Peace, Action::PreviousPage);
        assert!(apply_pending(&mut rx, &mut session).is_empty());
        assert_eq!(session.current_page(), 1);
    }
}
