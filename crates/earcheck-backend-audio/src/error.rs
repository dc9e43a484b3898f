//! Error types for audio backend.

use earcheck_spec::CodedError;
use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur during tone playback and export.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid frequency.
    #[error("invalid frequency: {freq} Hz")]
    InvalidFrequency {
        /// The invalid frequency.
        freq: f64,
    },

    /// WAV encoding or file error.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

impl CodedError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::InvalidSampleRate { .. } => "AUDIO_001",
            AudioError::InvalidFrequency { .. } => "AUDIO_002",
            AudioError::Wav(_) => "AUDIO_003",
        }
    }

    fn category(&self) -> &'static str {
        "audio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AudioError::InvalidFrequency { freq: -1.0 };
        assert_eq!(err.code(), "AUDIO_002");
        assert_eq!(err.category(), "audio");
        assert_eq!(err.to_string(), "invalid frequency: -1 Hz");
    }
}
