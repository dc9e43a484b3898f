//! Tone requests and the playback trait.

use std::time::Duration;

use crate::error::{AudioError, AudioResult};

/// One faded sine tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneRequest {
    /// Frequency in Hz.
    pub frequency_hz: f64,
    /// Linear ramp up from silence, 0 for an instant start.
    pub fade_in_ms: u32,
    /// Time at full gain.
    pub duration_ms: u32,
    /// Linear ramp down to silence, 0 for an instant stop.
    pub fade_out_ms: u32,
}

impl ToneRequest {
    /// Creates an unfaded tone.
    pub fn new(frequency_hz: f64, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            fade_in_ms: 0,
            duration_ms,
            fade_out_ms: 0,
        }
    }

    /// Sets fade durations.
    pub fn with_fades(mut self, fade_in_ms: u32, fade_out_ms: u32) -> Self {
        self.fade_in_ms = fade_in_ms;
        self.fade_out_ms = fade_out_ms;
        self
    }

    /// Fade-in plus hold plus fade-out.
    pub fn total_ms(&self) -> u64 {
        self.fade_in_ms as u64 + self.duration_ms as u64 + self.fade_out_ms as u64
    }

    /// Total length as a `Duration`.
    pub fn total(&self) -> Duration {
        Duration::from_millis(self.total_ms())
    }

    /// Rejects non-positive or non-finite frequencies.
    pub fn validate(&self) -> AudioResult<()> {
        if self.frequency_hz.is_finite() && self.frequency_hz > 0.0 {
            Ok(())
        } else {
            Err(AudioError::InvalidFrequency {
                freq: self.frequency_hz,
            })
        }
    }
}

/// Plays one tone at a time.
///
/// Implementations are driven from a single-threaded runtime; `play` takes
/// `&self` so a handle can call `stop` while a `play` future is pending.
#[allow(async_fn_in_trait)]
pub trait TonePlayer {
    /// Plays a tone, resolving once its full length has elapsed.
    ///
    /// A tone still sounding when this is called is stopped first.
    async fn play(&self, request: ToneRequest) -> AudioResult<()>;

    /// Silences the active tone, if any. Idempotent.
    fn stop(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_length() {
        let request = ToneRequest::new(500.0, 530).with_fades(30, 30);
        assert_eq!(request.total_ms(), 590);
        assert_eq!(request.total(), Duration::from_millis(590));
    }

    #[test]
    fn test_validate_frequency() {
        assert!(ToneRequest::new(440.0, 100).validate().is_ok());
        assert!(ToneRequest::new(0.0, 100).validate().is_err());
        assert!(ToneRequest::new(f64::INFINITY, 100).validate().is_err());
    }
}
