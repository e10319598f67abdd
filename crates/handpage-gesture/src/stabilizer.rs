//! Temporal stabilization by majority vote
//!
//! Single-frame labels flicker as landmarks jitter. The stabilizer keeps a
//! bounded FIFO of raw labels (including "none") and only reports a gesture
//! once it owns a large enough share of that window.

use std::collections::VecDeque;

use handpage_core::GestureLabel;
use tracing::debug;

use crate::GestureConfig;

/// Bounded history of raw labels with a majority vote over it
#[derive(Debug, Clone)]
pub struct GestureStabilizer {
    history: VecDeque<Option<GestureLabel>>,
    capacity: usize,
    min_samples: usize,
    majority_threshold: f64,
    /// Last value returned by `push`, only used for change logging
    last_stable: Option<GestureLabel>,
}

impl GestureStabilizer {
    /// Stabilizer with the default window (10 frames, 5 samples, 0.6)
    pub fn new() -> Self {
        let config = GestureConfig::default();
        Self::with_window(
            config.history_capacity,
            config.min_samples,
            config.majority_threshold,
        )
    }

    /// Stabilizer with an explicit window
    ///
    /// `capacity` is raised to at least 1. Use `GestureConfig::validate` to
    /// reject bad windows up front.
    pub fn with_window(capacity: usize, min_samples: usize, majority_threshold: f64) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
            min_samples,
            majority_threshold,
            last_stable: None,
        }
    }

    pub fn from_config(config: &GestureConfig) -> Self {
        Self::with_window(
            config.history_capacity,
            config.min_samples,
            config.majority_threshold,
        )
    }

    /// Record a raw label and return the stabilized one
    pub fn push(&mut self, label: Option<GestureLabel>) -> Option<GestureLabel> {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(label);

        let stable = self.majority();
        if stable != self.last_stable {
            debug!(
                from = ?self.last_stable,
                to = ?stable,
                samples = self.history.len(),
                "stable gesture changed"
            );
            self.last_stable = stable;
        }
        stable
    }

    /// Current vote without recording anything
    ///
    /// Ties between labels with equal counts go to the one that appears
    /// first in the window (oldest first).
    pub fn majority(&self) -> Option<GestureLabel> {
        let len = self.history.len();
        if len < self.min_samples {
            return None;
        }

        // (label, count) in order of first appearance
        let mut tally: Vec<(GestureLabel, usize)> = Vec::with_capacity(GestureLabel::all().len());
        for label in self.history.iter().flatten() {
            match tally.iter_mut().find(|(seen, _)| seen == label) {
                Some((_, count)) => *count += 1,
                None => tally.push((*label, 1)),
            }
        }

        let mut best: Option<(GestureLabel, usize)> = None;
        for (label, count) in tally {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((label, count));
            }
        }

        best.filter(|&(_, count)| count as f64 >= self.majority_threshold * len as f64)
            .map(|(label, _)| label)
    }

    /// Drop the whole history
    pub fn clear(&mut self) {
        self.history.clear();
        self.last_stable = None;
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Held samples, oldest first
    pub fn history(&self) -> impl Iterator<Item = Option<GestureLabel>> + '_ {
        self.history.iter().copied()
    }
}

impl Default for GestureStabilizer {
    fn default() -> Self {
        Self::new()
    }
}
