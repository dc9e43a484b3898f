//! Pitch comparison pairs.

use rand::Rng;
use serde::Serialize;

use crate::error::{StimulusError, StimulusResult};

/// Two tones to compare, played in a random order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PitchPair {
    /// Reference frequency in Hz.
    pub base_hz: f64,
    /// Reference plus the level's difference, in Hz.
    pub comparison_hz: f64,
    /// Whether the reference tone is played first.
    pub base_first: bool,
}

impl PitchPair {
    /// Frequency of the first tone.
    pub fn first_hz(&self) -> f64 {
        if self.base_first {
            self.base_hz
        } else {
            self.comparison_hz
        }
    }

    /// Frequency of the second tone.
    pub fn second_hz(&self) -> f64 {
        if self.base_first {
            self.comparison_hz
        } else {
            self.base_hz
        }
    }

    /// Returns true if the second tone is the higher one.
    pub fn second_is_higher(&self) -> bool {
        self.second_hz() > self.first_hz()
    }
}

/// Draws pitch pairs around a fixed reference frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchPairGenerator {
    base_hz: f64,
}

impl PitchPairGenerator {
    /// Creates a generator for a positive, finite reference frequency.
    pub fn new(base_hz: f64) -> StimulusResult<Self> {
        if !(base_hz.is_finite() && base_hz > 0.0) {
            return Err(StimulusError::invalid_param(
                "base_frequency_hz",
                format!("must be positive and finite, got {}", base_hz),
            ));
        }
        Ok(Self { base_hz })
    }

    /// Reference frequency.
    pub fn base_hz(&self) -> f64 {
        self.base_hz
    }

    /// Draws a pair whose comparison tone is `difference_hz` above the base.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, difference_hz: f64) -> PitchPair {
        PitchPair {
            base_hz: self.base_hz,
            comparison_hz: self.base_hz + difference_hz,
            base_first: rng.gen_bool(0.5),
        }
    }
}
