//! Error types for stimulus generation.

use earcheck_spec::CodedError;
use thiserror::Error;

/// Result type for stimulus operations.
pub type StimulusResult<T> = Result<T, StimulusError>;

/// Errors that can occur while generating stimuli.
///
/// `GenerationExhausted` and `ModificationExhausted` are recoverable: the pair
/// generators catch them and start over with a fresh draw.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StimulusError {
    /// The random walk reached a note whose candidate window was empty.
    #[error("no unused note within an octave at position {position} of a {length}-note melody")]
    GenerationExhausted {
        /// Requested melody length.
        length: usize,
        /// Position whose window was empty.
        position: usize,
    },

    /// No index/value combination produced an acceptable modified sequence.
    #[error("no single-element modification found for a sequence of length {length}")]
    ModificationExhausted {
        /// Length of the sequence that could not be modified.
        length: usize,
    },

    /// Requested length cannot produce a valid stimulus.
    #[error("length {length} is outside the supported range {min}..={max}")]
    InvalidLength {
        /// Requested length.
        length: usize,
        /// Smallest supported length.
        min: usize,
        /// Largest supported length.
        max: usize,
    },

    /// Invalid generator parameter.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },
}

impl StimulusError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Returns true for the exhaustion kinds that callers retry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StimulusError::GenerationExhausted { .. } | StimulusError::ModificationExhausted { .. }
        )
    }
}

impl CodedError for StimulusError {
    fn code(&self) -> &'static str {
        match self {
            StimulusError::GenerationExhausted { .. } => "STIMULUS_001",
            StimulusError::ModificationExhausted { .. } => "STIMULUS_002",
            StimulusError::InvalidLength { .. } => "STIMULUS_003",
            StimulusError::InvalidParameter { .. } => "STIMULUS_004",
        }
    }

    fn category(&self) -> &'static str {
        "stimulus"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_kinds() {
        assert!(StimulusError::GenerationExhausted {
            length: 9,
            position: 7
        }
        .is_recoverable());
        assert!(StimulusError::ModificationExhausted { length: 4 }.is_recoverable());
        assert!(!StimulusError::invalid_param("palette_ms", "empty").is_recoverable());
    }

    #[test]
    fn test_invalid_length_message() {
        let err = StimulusError::InvalidLength {
            length: 2,
            min: 4,
            max: 9,
        };
        assert_eq!(err.to_string(), "length 2 is outside the supported range 4..=9");
        assert_eq!(err.code(), "STIMULUS_003");
    }
}
