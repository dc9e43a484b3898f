//! earcheck session engine
//!
//! Runs a discrimination task as a sequence of trials grouped into levels,
//! each level with its own quota. A [`TrialSequencer`] owns the state machine
//! and is parameterized by a [`TrialTask`] that knows how to generate, play,
//! and judge one trial of its kind.
//!
//! Everything runs on a single-threaded runtime. Stopping goes through a
//! cancellation token checked after every wait, so a stopped session never
//! plays or generates anything further.
//!
//! # Example
//!
//! ```no_run
//! use std::rc::Rc;
//!
//! use earcheck_backend_audio::{SynthTonePlayer, DEFAULT_SAMPLE_RATE};
//! use earcheck_session::{PitchAnswer, PitchTask, TrialSequencer};
//! use earcheck_spec::PitchConfig;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let player = Rc::new(SynthTonePlayer::new(DEFAULT_SAMPLE_RATE)?);
//! let task = PitchTask::new(PitchConfig::default())?;
//! let mut session = TrialSequencer::new(task, player, 42);
//!
//! session.start().await?;
//! let verdict = session.respond(PitchAnswer::Higher).await?;
//! println!("{:?}", verdict);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`sequencer`]: Level/quota state machine
//! - [`task`]: The [`TrialTask`] strategy trait
//! - [`tasks`]: Pitch, rhythm, and melody drivers
//! - [`presentation`]: Cancellation-aware playback steps
//! - [`events`]: Events for the user interface

pub mod error;
pub mod events;
pub mod presentation;
pub mod sequencer;
pub mod task;
pub mod tasks;

pub use error::{SessionError, SessionResult};
pub use events::{EventSink, SessionEvent};
pub use presentation::{pause, Presentation};
pub use sequencer::{SequencerHandle, SequencerPhase, TrialSequencer};
pub use task::{TrialTask, Verdict};
pub use tasks::{MelodyTask, PitchAnswer, PitchTask, RhythmAnswer, RhythmTask};
