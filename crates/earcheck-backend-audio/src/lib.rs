//! earcheck audio backend
//!
//! Tone playback for the discrimination tasks. Sessions talk to a
//! [`TonePlayer`]; the bundled [`SynthTonePlayer`] keeps time on the tokio
//! clock, enforces one tone at a time, and can render everything it played
//! to a 16-bit mono WAV file.
//!
//! # Example
//!
//! ```no_run
//! use earcheck_backend_audio::{SynthTonePlayer, ToneRequest, TonePlayer, DEFAULT_SAMPLE_RATE};
//!
//! # async fn demo() -> earcheck_backend_audio::AudioResult<()> {
//! let player = SynthTonePlayer::new(DEFAULT_SAMPLE_RATE)?;
//! player.play(ToneRequest::new(500.0, 530).with_fades(30, 30)).await?;
//! player.write_recording(std::path::Path::new("session.wav"))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`tone`] - Tone requests and the [`TonePlayer`] trait
//! - [`player`] - Synthesizing player with session recording
//! - [`envelope`] - Linear fade envelope
//! - [`oscillator`] - Sine oscillator
//! - [`wav`] - WAV export

pub mod envelope;
pub mod error;
pub mod oscillator;
pub mod player;
pub mod tone;
pub mod wav;

pub use error::{AudioError, AudioResult};
pub use player::{SynthTonePlayer, ToneEvent, DEFAULT_SAMPLE_RATE};
pub use tone::{TonePlayer, ToneRequest};
pub use wav::{compute_pcm_hash, write_mono_wav, WavSummary};
