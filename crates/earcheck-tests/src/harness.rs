//! Scripted session driver.
//!
//! Runs a [`TrialSequencer`] to completion, answering each trial from the
//! stimulus itself according to an [`AnswerPolicy`]. Call from a test running
//! on tokio's paused clock.

use std::rc::Rc;

use earcheck_backend_audio::SynthTonePlayer;
use earcheck_backend_stimulus::{MelodyPair, PitchPair, RhythmPair};
use earcheck_session::{
    MelodyTask, PitchAnswer, PitchTask, RhythmAnswer, RhythmTask, SequencerPhase, SessionResult,
    TrialSequencer, TrialTask,
};
use earcheck_spec::SessionReport;

/// Sample rate of the scripted player; low to keep rendering cheap.
pub const HARNESS_SAMPLE_RATE: u32 = 8_000;

/// Tasks whose correct answer can be read off the stimulus.
pub trait Oracle: TrialTask {
    /// The answer that passes.
    fn correct_answer(stimulus: &Self::Stimulus) -> Self::Answer;

    /// An answer that fails.
    fn wrong_answer(stimulus: &Self::Stimulus) -> Self::Answer;
}

impl Oracle for PitchTask {
    fn correct_answer(pair: &PitchPair) -> PitchAnswer {
        if pair.second_is_higher() {
            PitchAnswer::Higher
        } else {
            PitchAnswer::Lower
        }
    }

    fn wrong_answer(pair: &PitchPair) -> PitchAnswer {
        match Self::correct_answer(pair) {
            PitchAnswer::Higher => PitchAnswer::Lower,
            PitchAnswer::Lower => PitchAnswer::Higher,
        }
    }
}

impl Oracle for RhythmTask {
    fn correct_answer(pair: &RhythmPair) -> RhythmAnswer {
        if pair.is_same() {
            RhythmAnswer::Same
        } else {
            RhythmAnswer::Different
        }
    }

    fn wrong_answer(pair: &RhythmPair) -> RhythmAnswer {
        if pair.is_same() {
            RhythmAnswer::Different
        } else {
            RhythmAnswer::Same
        }
    }
}

impl Oracle for MelodyTask {
    fn correct_answer(pair: &MelodyPair) -> usize {
        pair.changed_index
    }

    fn wrong_answer(pair: &MelodyPair) -> usize {
        (pair.changed_index + 1) % pair.original.len()
    }
}

/// How the scripted participant answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerPolicy {
    /// Every answer passes.
    AlwaysCorrect,
    /// Every answer fails.
    AlwaysWrong,
    /// Odd-numbered trials pass, even-numbered trials fail.
    Alternate,
}

impl AnswerPolicy {
    fn answers_correctly(self, trial: u32) -> bool {
        match self {
            AnswerPolicy::AlwaysCorrect => true,
            AnswerPolicy::AlwaysWrong => false,
            AnswerPolicy::Alternate => trial % 2 == 1,
        }
    }
}

/// Outcome of a scripted session.
pub struct ScriptedRun {
    /// Final report.
    pub report: SessionReport,
    /// Player that recorded every tone.
    pub player: Rc<SynthTonePlayer>,
}

/// Runs a whole session with answers chosen by `policy`.
pub async fn run_scripted<T: Oracle>(
    task: T,
    seed: u32,
    policy: AnswerPolicy,
) -> SessionResult<ScriptedRun> {
    let player = Rc::new(SynthTonePlayer::new(HARNESS_SAMPLE_RATE)?);
    let mut session = TrialSequencer::new(task, Rc::clone(&player), seed);
    session.start().await?;

    while let SequencerPhase::AwaitingResponse { .. } = session.phase() {
        let trial = session.scoreboard().total_trials + 1;
        let answer = match session.current_stimulus() {
            Some(stimulus) if policy.answers_correctly(trial) => T::correct_answer(stimulus),
            Some(stimulus) => T::wrong_answer(stimulus),
            None => break,
        };
        session.respond(answer).await?;
    }

    Ok(ScriptedRun {
        report: session.report(),
        player,
    })
}
