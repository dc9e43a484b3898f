//! Sine oscillator.

use std::f64::consts::PI;

/// 2 * PI.
pub const TWO_PI: f64 = 2.0 * PI;

/// Tracks oscillator phase across samples.
#[derive(Debug, Clone)]
pub struct PhaseAccumulator {
    phase: f64,
    sample_rate: f64,
}

impl PhaseAccumulator {
    /// Creates an accumulator starting at phase zero.
    pub fn new(sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            sample_rate,
        }
    }

    /// Returns the current phase and advances by one sample at `frequency`.
    pub fn advance(&mut self, frequency: f64) -> f64 {
        let current = self.phase;
        self.phase += TWO_PI * frequency / self.sample_rate;
        if self.phase >= TWO_PI {
            self.phase %= TWO_PI;
        }
        current
    }
}

/// Sine of a phase in radians.
#[inline]
pub fn sine(phase: f64) -> f64 {
    phase.sin()
}
