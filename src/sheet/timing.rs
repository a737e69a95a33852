//! Fixed-duration eased animation used for keyboard-driven changes.

use super::MotionSample;
use std::time::Duration;

/// Quadratic ease-in-out on normalised time.
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Animates from a start value to a target over a fixed duration.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingMotion {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
}

impl TimingMotion {
    /// Start at `from`, reaching `to` after `duration`.
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Target value.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Value at the current elapsed time.
    pub fn value(&self) -> f64 {
        if self.duration.is_zero() || self.elapsed >= self.duration {
            return self.to;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * ease_in_out_quad(t)
    }

    /// Move the end point over the remaining time.
    ///
    /// The curve restarts from the live value, so the position stays
    /// continuous.
    pub fn retarget(&mut self, to: f64) {
        self.from = self.value();
        self.to = to;
        self.duration = self.duration.saturating_sub(self.elapsed);
        self.elapsed = Duration::ZERO;
    }

    /// Advance by `dt` and sample.
    pub fn step(&mut self, dt: Duration) -> MotionSample {
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.duration.is_zero() || self.elapsed >= self.duration {
            return MotionSample {
                value: self.to,
                velocity: 0.0,
                done: true,
            };
        }
        let secs = self.duration.as_secs_f64();
        let t = self.elapsed.as_secs_f64() / secs;
        let value = self.from + (self.to - self.from) * ease_in_out_quad(t);
        // d/dt of the quad ease, scaled to units per second.
        let slope = if t < 0.5 { 4.0 * t } else { 4.0 * (1.0 - t) };
        MotionSample {
            value,
            velocity: (self.to - self.from) * slope / secs,
            done: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn ease_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < 1e-12);
        assert_eq!(ease_in_out_quad(-1.0), 0.0);
        assert_eq!(ease_in_out_quad(2.0), 1.0);
    }

    #[test]
    fn reaches_target_after_duration() {
        let mut motion = TimingMotion::new(80.0, 380.0, Duration::from_millis(250));
        let mut last = None;
        for _ in 0..16 {
            last = Some(motion.step(FRAME));
        }
        let sample = last.unwrap();
        assert!(sample.done);
        assert_eq!(sample.value, 380.0);
    }

    #[test]
    fn progresses_monotonically() {
        let mut motion = TimingMotion::new(0.0, -300.0, Duration::from_millis(250));
        let mut previous = 0.0;
        loop {
            let sample = motion.step(FRAME);
            assert!(sample.value <= previous);
            previous = sample.value;
            if sample.done {
                break;
            }
        }
        assert_eq!(previous, -300.0);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut motion = TimingMotion::new(10.0, 20.0, Duration::ZERO);
        let sample = motion.step(Duration::ZERO);
        assert!(sample.done);
        assert_eq!(sample.value, 20.0);
    }

    #[test]
    fn retarget_changes_end_point() {
        let mut motion = TimingMotion::new(0.0, 100.0, Duration::from_millis(100));
        motion.step(Duration::from_millis(50));
        motion.retarget(200.0);
        let sample = motion.step(Duration::from_millis(50));
        assert_eq!(sample.value, 200.0);
        assert_eq!(motion.target(), 200.0);
    }

    #[test]
    fn retarget_keeps_position_continuous() {
        let mut motion = TimingMotion::new(0.0, 100.0, Duration::from_millis(100));
        motion.step(Duration::from_millis(30));
        let before = motion.value();
        motion.retarget(40.0);
        assert_eq!(motion.value(), before);
    }
}
