//! Task drivers for the three discrimination tasks.

mod melody;
mod pitch;
mod rhythm;

pub use melody::MelodyTask;
pub use pitch::{PitchAnswer, PitchTask};
pub use rhythm::{RhythmAnswer, RhythmTask};
