//! Easing and tween state machines.
//!
//! A [`Tween`] carries its start instant, duration, and value range;
//! progress is a pure function of the instant handed to it, so tests can
//! drive time explicitly instead of sleeping.

use std::time::{Duration, Instant};

/// Decelerating cubic curve: `1 - (1 - p)^3`, monotonic on [0, 1].
pub fn ease_out_cubic(progress: f64) -> f64 {
    let inverse = 1.0 - progress.clamp(0.0, 1.0);
    1.0 - inverse * inverse * inverse
}

/// One running animation from `from` to `to`.
#[derive(Debug, Clone)]
pub struct Tween {
    started_at: Instant,
    duration: Duration,
    from: f64,
    to: f64,
}

impl Tween {
    pub fn new(started_at: Instant, duration: Duration, from: f64, to: f64) -> Self {
        Self {
            started_at,
            duration,
            from,
            to,
        }
    }

    /// Linear progress in [0, 1] at `now`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Eased value at `now`.
    pub fn value(&self, now: Instant) -> f64 {
        self.from + (self.to - self.from) * ease_out_cubic(self.progress(now))
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Terminal value; completion handlers pin to this exactly to avoid
    /// floating-point drift from the easing curve.
    pub fn target(&self) -> f64 {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic_bounds() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        // Clamped outside the unit interval.
        assert_eq!(ease_out_cubic(-1.0), 0.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }

    #[test]
    fn test_ease_out_cubic_monotonic() {
        let mut previous = 0.0;
        for step in 0..=100 {
            let value = ease_out_cubic(step as f64 / 100.0);
            assert!(value >= previous);
            assert!(value <= 1.0);
            previous = value;
        }
    }

    #[test]
    fn test_tween_progress_and_value() {
        let start = Instant::now();
        let tween = Tween::new(start, Duration::from_millis(2000), 0.0, 250.0);

        assert_eq!(tween.progress(start), 0.0);
        assert_eq!(tween.value(start), 0.0);

        let midway = start + Duration::from_millis(1000);
        assert!((tween.progress(midway) - 0.5).abs() < 1e-9);
        let mid_value = tween.value(midway);
        assert!(mid_value > 0.0 && mid_value < 250.0);

        let done = start + Duration::from_millis(2000);
        assert!(tween.is_finished(done));
        assert!((tween.value(done) - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_tween_never_overshoots() {
        let start = Instant::now();
        let tween = Tween::new(start, Duration::from_millis(2000), 0.0, 250.0);
        let mut previous = -1.0;
        for ms in (0..=2400).step_by(16) {
            let value = tween.value(start + Duration::from_millis(ms));
            assert!(value >= previous);
            assert!(value <= 250.0);
            previous = value;
        }
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let start = Instant::now();
        let tween = Tween::new(start, Duration::ZERO, 100.0, 0.0);
        assert!(tween.is_finished(start));
        assert_eq!(tween.value(start), 0.0);
    }
}
