//! Gesture controller - the polling loop
//!
//! One poll pulls one observation from the source, converts it to a frame,
//! stamps it with the clock and threads it through the shared pipeline.

use std::sync::Arc;
use std::time::{Duration, Instant};

use handpage_gesture::{FrameReport, GestureHandler, GesturePipeline};
use handpage_time::{Clock, MonotonicClock};
use parking_lot::Mutex;
use tokio::sync::{mpsc::UnboundedReceiver, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::{command_channel, FrameSource, GestureCommand, RuntimeConfig, RuntimeResult};

/// Pipeline shared between the polling loop and its owners
pub type SharedPipeline = Arc<Mutex<GesturePipeline>>;

/// Result of a single poll
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PollOutcome {
    /// A frame went through the pipeline
    Frame(FrameReport),
    /// The source reported an error for this frame
    Skipped,
    /// The source has no more frames
    Exhausted,
}

/// Controller counters
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeStats {
    /// Polls that yielded a frame or an error
    pub frames_polled: u64,
    pub hand_frames: u64,
    pub no_hand_frames: u64,
    pub skipped_frames: u64,
    pub dispatches: u64,
    pub restarts: u64,
    pub last_poll_duration: Duration,
}

/// Polls a frame source and feeds a gesture pipeline
pub struct GestureController<S: FrameSource> {
    config: RuntimeConfig,
    source: S,
    clock: Arc<dyn Clock>,
    pipeline: SharedPipeline,
    stats: RuntimeStats,
}

impl<S: FrameSource> GestureController<S> {
    /// Controller on the OS monotonic clock
    pub fn new(config: RuntimeConfig, source: S) -> RuntimeResult<Self> {
        Self::with_clock(config, source, Arc::new(MonotonicClock::new()))
    }

    pub fn with_clock(config: RuntimeConfig, source: S, clock: Arc<dyn Clock>) -> RuntimeResult<Self> {
        config.validate()?;
        let pipeline = GesturePipeline::new(config.gesture.clone())?;
        Ok(GestureController {
            config,
            source,
            clock,
            pipeline: Arc::new(Mutex::new(pipeline)),
            stats: RuntimeStats::default(),
        })
    }

    /// Route dispatched actions to `handler`
    pub fn set_handler<H>(&mut self, handler: H)
    where
        H: GestureHandler + 'static,
    {
        self.pipeline.lock().set_handler(handler);
    }

    /// Route dispatched actions to a new channel and return its receiver
    pub fn command_channel(&mut self) -> UnboundedReceiver<GestureCommand> {
        let (handler, rx) = command_channel(self.clock.clone());
        self.set_handler(handler);
        rx
    }

    /// Pull and process one frame
    pub fn poll_once(&mut self) -> PollOutcome {
        let started = Instant::now();

        let observation = match self.source.poll_frame() {
            Ok(Some(observation)) => observation,
            Ok(None) => return PollOutcome::Exhausted,
            Err(err) => {
                warn!(%err, "frame source error, skipping frame");
                self.stats.frames_polled += 1;
                self.stats.skipped_frames += 1;
                self.stats.last_poll_duration = started.elapsed();
                return PollOutcome::Skipped;
            }
        };

        let frame = observation.into_frame(self.config.min_confidence);
        let now = self.clock.now();
        let report = self.pipeline.lock().process(&frame, now);

        self.stats.frames_polled += 1;
        if report.hand_present() {
            self.stats.hand_frames += 1;
        } else {
            self.stats.no_hand_frames += 1;
        }
        if report.dispatched() {
            self.stats.dispatches += 1;
        }
        self.stats.last_poll_duration = started.elapsed();

        PollOutcome::Frame(report)
    }

    /// Poll on a fixed interval until the source ends or shutdown is signalled
    ///
    /// Shutdown is requested by sending `true` (or dropping the sender).
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> RuntimeStats {
        info!(
            poll_interval = ?self.config.poll_interval,
            cooldown = ?self.config.gesture.cooldown,
            "gesture controller started"
        );

        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        if !*shutdown.borrow() {
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if self.poll_once() == PollOutcome::Exhausted {
                            info!("frame source exhausted");
                            break;
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            debug!("shutdown requested");
                            break;
                        }
                    }
                }
            }
        }

        info!(
            frames = self.stats.frames_polled,
            dispatches = self.stats.dispatches,
            skipped = self.stats.skipped_frames,
            "gesture controller stopped"
        );
        self.stats.clone()
    }

    /// Fresh session: history, last label and cooldown all cleared
    pub fn restart(&mut self) {
        self.pipeline.lock().reset();
        self.stats.restarts += 1;
        info!("gesture controller restarted");
    }

    pub fn pipeline(&self) -> SharedPipeline {
        self.pipeline.clone()
    }

    pub fn stats(&self) -> &RuntimeStats {
        &self.stats
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
