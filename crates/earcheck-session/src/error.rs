//! Error types for session control.

use earcheck_backend_audio::AudioError;
use earcheck_backend_stimulus::StimulusError;
use earcheck_spec::CodedError;
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors returned by the trial sequencer.
///
/// The first four kinds reject a call and leave the sequencer unchanged.
#[derive(Debug, Error)]
pub enum SessionError {
    /// `respond` was called while no trial was waiting for an answer.
    #[error("no trial is awaiting a response")]
    NotAwaitingResponse,

    /// The session was stopped and can no longer be driven.
    #[error("session has been stopped")]
    Stopped,

    /// The answer does not fit the current trial.
    #[error("invalid answer: {0}")]
    InvalidAnswer(String),

    /// `start` was called while a session was in progress.
    #[error("session is already running")]
    AlreadyRunning,

    /// Stimulus generation failed.
    #[error(transparent)]
    Stimulus(#[from] StimulusError),

    /// Tone playback failed.
    #[error(transparent)]
    Audio(#[from] AudioError),
}

impl CodedError for SessionError {
    fn code(&self) -> &'static str {
        match self {
            SessionError::NotAwaitingResponse => "SESSION_001",
            SessionError::Stopped => "SESSION_002",
            SessionError::InvalidAnswer(_) => "SESSION_003",
            SessionError::AlreadyRunning => "SESSION_004",
            SessionError::Stimulus(err) => err.code(),
            SessionError::Audio(err) => err.code(),
        }
    }

    fn category(&self) -> &'static str {
        match self {
            SessionError::Stimulus(err) => err.category(),
            SessionError::Audio(err) => err.category(),
            _ => "session",
        }
    }
}
