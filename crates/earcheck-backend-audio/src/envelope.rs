//! Linear fade envelope.
//!
//! Gain ramps from 0 to 1 over the fade-in, holds at 1, then ramps back to 0
//! over the fade-out. A zero-length fade means full gain from the first (or
//! until the last) sample.

/// Sample-domain fade envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeEnvelope {
    fade_in: usize,
    hold: usize,
    fade_out: usize,
}

impl FadeEnvelope {
    /// Creates an envelope from sample counts.
    pub fn new(fade_in: usize, hold: usize, fade_out: usize) -> Self {
        Self {
            fade_in,
            hold,
            fade_out,
        }
    }

    /// Creates an envelope from millisecond durations.
    pub fn from_ms(fade_in_ms: u32, hold_ms: u32, fade_out_ms: u32, sample_rate: u32) -> Self {
        let samples = |ms: u32| (ms as u64 * sample_rate as u64 / 1000) as usize;
        Self::new(samples(fade_in_ms), samples(hold_ms), samples(fade_out_ms))
    }

    /// Total length in samples.
    pub fn len(&self) -> usize {
        self.fade_in + self.hold + self.fade_out
    }

    /// Returns true if the envelope has no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gain at sample `index`; zero past the end.
    pub fn gain_at(&self, index: usize) -> f64 {
        if index < self.fade_in {
            return index as f64 / self.fade_in as f64;
        }
        let index = index - self.fade_in;
        if index < self.hold {
            return 1.0;
        }
        let index = index - self.hold;
        if index < self.fade_out {
            1.0 - index as f64 / self.fade_out as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramps() {
        let env = FadeEnvelope::new(4, 2, 4);
        assert_eq!(env.len(), 10);
        assert_eq!(env.gain_at(0), 0.0);
        assert_eq!(env.gain_at(2), 0.5);
        assert_eq!(env.gain_at(4), 1.0);
        assert_eq!(env.gain_at(5), 1.0);
        assert_eq!(env.gain_at(6), 1.0);
        assert_eq!(env.gain_at(8), 0.5);
        assert_eq!(env.gain_at(10), 0.0);
    }

    #[test]
    fn test_no_fades_is_full_gain() {
        let env = FadeEnvelope::new(0, 3, 0);
        assert_eq!(env.gain_at(0), 1.0);
        assert_eq!(env.gain_at(2), 1.0);
        assert_eq!(env.gain_at(3), 0.0);
    }

    #[test]
    fn test_from_ms() {
        let env = FadeEnvelope::from_ms(30, 530, 30, 44_100);
        assert_eq!(env.len(), 1323 + 23_373 + 1323);
    }
}
