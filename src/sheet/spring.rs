//! Damped spring used to settle the sheet.
//!
//! Positions are evaluated from the closed-form solution of
//! `m·x'' + c·x' + k·x = 0`, so the curve does not depend on frame timing:
//! two hosts ticking at different rates sample the same trajectory.

use super::MotionSample;
use std::time::Duration;

/// Displacement below which a spring may come to rest.
pub const REST_DISPLACEMENT: f64 = 0.01;

/// Speed (units per second) below which a spring may come to rest.
pub const REST_SPEED: f64 = 2.0;

/// Physical spring parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    /// Damping coefficient `c`. Must be > 0 for the spring to converge.
    pub damping: f64,
    /// Stiffness `k`.
    pub stiffness: f64,
    /// Mass `m`.
    pub mass: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 20.0,
            stiffness: 200.0,
            mass: 1.0,
        }
    }
}

impl SpringConfig {
    /// Replace unusable parameters with defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let positive = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        Self {
            damping: positive(self.damping, defaults.damping),
            stiffness: positive(self.stiffness, defaults.stiffness),
            mass: positive(self.mass, defaults.mass),
        }
    }

    /// Undamped angular frequency `ω0 = √(k/m)`.
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping ratio `ζ = c / (2·√(k·m))`.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// A spring animation from a live value toward a fixed target.
#[derive(Debug, Clone, PartialEq)]
pub struct SpringMotion {
    config: SpringConfig,
    target: f64,
    initial_displacement: f64,
    initial_velocity: f64,
    elapsed: f64,
}

impl SpringMotion {
    /// Start a spring at `from` moving with `velocity`, pulled toward `target`.
    pub fn new(config: SpringConfig, from: f64, velocity: f64, target: f64) -> Self {
        Self {
            config: config.sanitized(),
            target,
            initial_displacement: from - target,
            initial_velocity: if velocity.is_finite() { velocity } else { 0.0 },
            elapsed: 0.0,
        }
    }

    /// Target extent.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Current value and velocity, without advancing time.
    pub fn current(&self) -> MotionSample {
        let (x, v) = self.state_at(self.elapsed);
        MotionSample {
            value: self.target + x,
            velocity: v,
            done: false,
        }
    }

    /// Keep the current position and velocity but pull toward a new target.
    pub fn retarget(&mut self, target: f64) {
        let now = self.current();
        *self = Self::new(self.config, now.value, now.velocity, target);
    }

    /// Advance by `dt` and sample.
    ///
    /// Once both rest thresholds hold the sample is exactly the target and
    /// `done` is set.
    pub fn step(&mut self, dt: Duration) -> MotionSample {
        self.elapsed += dt.as_secs_f64();
        let (x, v) = self.state_at(self.elapsed);
        if x.abs() < REST_DISPLACEMENT && v.abs() < REST_SPEED {
            return MotionSample {
                value: self.target,
                velocity: 0.0,
                done: true,
            };
        }
        MotionSample {
            value: self.target + x,
            velocity: v,
            done: false,
        }
    }

    /// Displacement from target and velocity at time `t` seconds.
    fn state_at(&self, t: f64) -> (f64, f64) {
        let x0 = self.initial_displacement;
        let v0 = self.initial_velocity;
        let omega = self.config.natural_frequency();
        let zeta = self.config.damping_ratio();

        if (zeta - 1.0).abs() < 1e-9 {
            // Critically damped.
            let decay = (-omega * t).exp();
            let b = v0 + omega * x0;
            let x = (x0 + b * t) * decay;
            let v = (v0 - omega * b * t) * decay;
            (x, v)
        } else if zeta < 1.0 {
            let a = zeta * omega;
            let omega_d = omega * (1.0 - zeta * zeta).sqrt();
            let b = (v0 + a * x0) / omega_d;
            let decay = (-a * t).exp();
            let (sin, cos) = (omega_d * t).sin_cos();
            let x = decay * (x0 * cos + b * sin);
            let v = decay * ((b * omega_d - a * x0) * cos - (a * b + x0 * omega_d) * sin);
            (x, v)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            let c2 = (v0 - r1 * x0) / (r2 - r1);
            let c1 = x0 - c2;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            (c1 * e1 + c2 * e2, r1 * c1 * e1 + r2 * c2 * e2)
        }
    }
}
