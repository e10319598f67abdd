//! Time primitives for Handpage
//!
//! Frames are stamped on a single monotonic timeline measured in
//! microseconds since the clock was created.

use std::ops::{Add, Sub};
use std::time::Duration;

/// Monotonic frame timestamp
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    #[inline]
    pub fn from_micros(micros: u64) -> Self {
        Timestamp(micros)
    }

    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        Timestamp(millis.saturating_mul(1000))
    }

    #[inline]
    pub fn from_secs_f64(secs: f64) -> Self {
        Timestamp((secs * 1_000_000.0) as u64)
    }

    #[inline]
    pub fn as_micros(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0 / 1000
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        Timestamp(self.0.saturating_add(duration.as_micros() as u64))
    }

    /// Time elapsed since an earlier timestamp (zero if `earlier` is later)
    #[inline]
    pub fn duration_since(self, earlier: Timestamp) -> Duration {
        self - earlier
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Timestamp) -> Self::Output {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

impl std::fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t({:.3}s)", self.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_conversions() {
        let t = Timestamp::from_millis(1500);
        assert_eq!(t.as_micros(), 1_500_000);
        assert_eq!(t.as_millis(), 1500);
        assert!((t.as_secs_f64() - 1.5).abs() < 1e-9);
        assert_eq!(Timestamp::from_secs_f64(0.25), Timestamp::from_millis(250));
    }

    #[test]
    fn test_from_millis_saturates() {
        assert_eq!(Timestamp::from_millis(u64::MAX), Timestamp::from_micros(u64::MAX));
        assert_eq!(
            Timestamp::from_millis(u64::MAX / 1000 + 1),
            Timestamp::from_micros(u64::MAX)
        );
    }

    #[test]
    fn test_timestamp_sub_saturates() {
        let a = Timestamp::from_millis(100);
        let b = Timestamp::from_millis(400);
        assert_eq!(b - a, Duration::from_millis(300));
        assert_eq!(a - b, Duration::ZERO);
        assert_eq!(b.duration_since(a), Duration::from_millis(300));
    }

    #[test]
    fn test_timestamp_add() {
        let t = Timestamp::ZERO + Duration::from_millis(30);
        assert_eq!(t, Timestamp::from_millis(30));
        assert_eq!(Timestamp(u64::MAX) + Duration::from_secs(1), Timestamp(u64::MAX));
    }
}
