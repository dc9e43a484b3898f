//! earcheck stimulus backend
//!
//! Deterministic generation of the stimuli used by the discrimination tasks:
//! atonal melody pairs, rhythm pairs, and pitch pairs. All randomness comes
//! from a caller-provided RNG; [`create_rng`] builds the seeded PCG32 streams
//! the sessions use.
//!
//! # Example
//!
//! ```
//! use earcheck_backend_stimulus::{create_rng, MelodyGenerator};
//!
//! let mut rng = create_rng(42);
//! let mut generator = MelodyGenerator::new(2).unwrap();
//! let pair = generator.generate_pair(&mut rng, 5).unwrap();
//! assert_eq!(pair.original.len(), 5);
//! assert_ne!(pair.original, pair.modified);
//! ```
//!
//! # Modules
//!
//! - [`note`]: Note numbering and the frequency table
//! - [`scale`]: Circle-of-fifths scale index
//! - [`validator`]: Atonality and contour rules
//! - [`melody`]: Melody pair generation
//! - [`rhythm`]: Rhythm pair generation
//! - [`pitch`]: Pitch pair generation
//! - [`rng`]: Seeded RNG construction

pub mod error;
pub mod melody;
pub mod note;
pub mod pitch;
pub mod rhythm;
pub mod rng;
pub mod scale;
pub mod validator;

pub use error::{StimulusError, StimulusResult};
pub use melody::{GenerationStats, MelodyGenerator, MelodyPair};
pub use note::{note_name, pitch_class, Melody, Note, NoteTable, OCTAVE_SEMITONES};
pub use pitch::{PitchPair, PitchPairGenerator};
pub use rhythm::{ModificationMix, Rhythm, RhythmGenerator, RhythmPair, MODIFY_ATTEMPTS};
pub use rng::{create_component_rng, create_rng, derive_component_seed, fresh_seed};
pub use scale::{Direction, ScaleIndex, ScaleLabel, ScaleSet, ScaleType};
pub use validator::{first_difference, MelodyValidator, MelodyViolation, PairViolation};
