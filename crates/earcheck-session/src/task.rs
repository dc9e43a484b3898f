//! The per-task strategy plugged into the sequencer.

use earcheck_backend_audio::TonePlayer;
use earcheck_spec::{TaskKind, TrialLevel};
use rand::Rng;

use crate::error::SessionResult;
use crate::presentation::Presentation;

/// Outcome of judging one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The answer matched the stimulus.
    Pass,
    /// The answer was wrong; carries the failure line shown to the participant.
    Fail(String),
}

impl Verdict {
    /// Returns true for [`Verdict::Pass`].
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// A discrimination task: how to make, play, and judge one trial.
#[allow(async_fn_in_trait)]
pub trait TrialTask {
    /// Per-level difficulty parameter.
    type Difficulty: Clone;
    /// One generated trial.
    type Stimulus;
    /// A participant's answer.
    type Answer: Copy;

    /// Which task this is.
    const KIND: TaskKind;

    /// Levels with their quotas, in order.
    fn levels(&self) -> &[TrialLevel<Self::Difficulty>];

    /// Display form of a difficulty.
    fn describe(&self, difficulty: &Self::Difficulty) -> String;

    /// Generates the stimulus for one trial.
    fn generate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        difficulty: &Self::Difficulty,
    ) -> SessionResult<Self::Stimulus>;

    /// Plays the stimulus.
    async fn present<P: TonePlayer>(
        &self,
        stimulus: &Self::Stimulus,
        out: &Presentation<'_, P>,
    ) -> SessionResult<()>;

    /// Number of answer options for a stimulus.
    fn choices(&self, stimulus: &Self::Stimulus) -> usize;

    /// Rejects answers that do not fit the stimulus.
    fn check_answer(&self, _stimulus: &Self::Stimulus, _answer: Self::Answer) -> SessionResult<()> {
        Ok(())
    }

    /// Judges an answer. `trial` is the 1-based trial number.
    fn judge(&self, stimulus: &Self::Stimulus, answer: Self::Answer, trial: u32) -> Verdict;
}
