//! Clock implementations

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use handpage_core::Timestamp;

/// Monotonic timestamp source
/// INVARIANT: successive `now()` calls never go backwards
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Clock backed by the OS monotonic clock
pub struct MonotonicClock {
    /// Instant that maps to `Timestamp::ZERO`
    reference: Instant,
}

impl MonotonicClock {
    /// Create a clock starting at zero
    pub fn new() -> Self {
        MonotonicClock {
            reference: Instant::now(),
        }
    }

    /// Time since the clock was created
    pub fn elapsed(&self) -> Duration {
        self.reference.elapsed()
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_micros(self.elapsed().as_micros() as u64)
    }
}

/// Manually driven clock
///
/// Clones share the same timeline, so a test can keep one handle and give
/// another to the controller under test.
#[derive(Clone, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock at `Timestamp::ZERO`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock at a given time
    pub fn starting_at(time: Timestamp) -> Self {
        ManualClock {
            micros: Arc::new(AtomicU64::new(time.as_micros())),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, dt: Duration) -> Timestamp {
        let dt = u64::try_from(dt.as_micros()).unwrap_or(u64::MAX);
        let previous = self
            .micros
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |t| Some(t.saturating_add(dt)))
            .unwrap_or_else(|t| t);
        Timestamp::from_micros(previous.saturating_add(dt))
    }

    /// Jump to a time; only forward moves are applied
    pub fn set(&self, time: Timestamp) {
        self.micros.fetch_max(time.as_micros(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_micros(self.micros.load(Ordering::SeqCst))
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_clock_advances() {
        let clock = MonotonicClock::new();

        let t1 = clock.now();
        std::thread::sleep(Duration::from_millis(10));
        let t2 = clock.now();

        assert!(t2 > t1);
        assert!(t2 - t1 >= Duration::from_millis(10));
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Timestamp::ZERO);

        let t = clock.advance(Duration::from_millis(30));
        assert_eq!(t, Timestamp::from_millis(30));
        assert_eq!(clock.now(), Timestamp::from_millis(30));
    }

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::starting_at(Timestamp::from_millis(500));
        let handle = clock.clone();

        handle.advance(Duration::from_secs(1));
        assert_eq!(clock.now(), Timestamp::from_millis(1500));
    }

    #[test]
    fn test_manual_clock_never_goes_back() {
        let clock = ManualClock::starting_at(Timestamp::from_millis(100));
        clock.set(Timestamp::from_millis(50));
        assert_eq!(clock.now(), Timestamp::from_millis(100));

        clock.set(Timestamp::from_millis(250));
        assert_eq!(clock.now(), Timestamp::from_millis(250));
    }

    #[test]
    fn test_manual_clock_saturates_at_end_of_timeline() {
        let clock = ManualClock::starting_at(Timestamp::from_micros(u64::MAX - 10));
        let returned = clock.advance(Duration::from_secs(1));
        assert_eq!(returned, Timestamp::from_micros(u64::MAX));
        assert_eq!(clock.now(), returned);

        assert_eq!(clock.advance(Duration::MAX), Timestamp::from_micros(u64::MAX));
        assert_eq!(clock.now(), Timestamp::from_micros(u64::MAX));
    }

    #[test]
    fn test_clock_trait_object() {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::starting_at(Timestamp::from_millis(7)));
        assert_eq!(clock.now(), Timestamp::from_millis(7));
    }
}
