//! Level/quota state machine driving one task session.
//!
//! ```text
//! Idle -> Running -> AwaitingResponse -> Running -> ... -> Finished
//!            \______________ stop() ______________/-> Stopped
//! ```
//!
//! `start` and `respond` run until the next trial is waiting for an answer
//! (or the session ends). A [`SequencerHandle`] can stop the session while
//! either future is pending. A trial that fails to generate or play returns
//! the sequencer to `Idle`.

use std::rc::Rc;

use earcheck_backend_audio::TonePlayer;
use earcheck_backend_stimulus::create_component_rng;
use earcheck_spec::{Scoreboard, SessionOutcome, SessionReport, TrialRecord};
use rand::Rng;
use rand_pcg::Pcg32;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{SessionError, SessionResult};
use crate::events::{EventSink, SessionEvent};
use crate::presentation::Presentation;
use crate::task::{TrialTask, Verdict};

/// Where the sequencer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerPhase {
    /// Not started.
    Idle,
    /// Generating or presenting a trial.
    Running {
        /// Current level index.
        level: usize,
        /// Trials answered in the current level.
        count_in_level: u32,
    },
    /// A trial has been presented and needs an answer.
    AwaitingResponse {
        /// Current level index.
        level: usize,
        /// Trials answered in the current level.
        count_in_level: u32,
    },
    /// Every quota was met.
    Finished,
    /// Stopped; permanent.
    Stopped,
}

/// Stops a sequencer from outside the future driving it.
pub struct SequencerHandle<P> {
    token: CancellationToken,
    player: Rc<P>,
}

impl<P> Clone for SequencerHandle<P> {
    fn clone(&self) -> Self {
        Self {
            token: self.token.clone(),
            player: Rc::clone(&self.player),
        }
    }
}

impl<P: TonePlayer> SequencerHandle<P> {
    /// Cancels the session and silences the active tone.
    pub fn stop(&self) {
        self.token.cancel();
        self.player.stop();
    }

    /// Returns true once the session has been stopped.
    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Runs the trials of one task.
pub struct TrialSequencer<T: TrialTask, P, R = Pcg32> {
    task: T,
    player: Rc<P>,
    rng: R,
    seed: u32,
    token: CancellationToken,
    events: EventSink,
    phase: SequencerPhase,
    level: usize,
    count_in_level: u32,
    scoreboard: Scoreboard,
    trials: Vec<TrialRecord>,
    current: Option<T::Stimulus>,
    stop_reported: bool,
}

impl<T: TrialTask, P: TonePlayer> TrialSequencer<T, P, Pcg32> {
    /// Creates a sequencer drawing from the task's stream of `seed`.
    pub fn new(task: T, player: Rc<P>, seed: u32) -> Self {
        let rng = create_component_rng(seed, T::KIND.as_str());
        Self::with_rng(task, player, rng, seed)
    }
}

impl<T: TrialTask, P: TonePlayer, R: Rng> TrialSequencer<T, P, R> {
    /// Creates a sequencer with an explicit RNG. `seed` is only reported.
    pub fn with_rng(task: T, player: Rc<P>, rng: R, seed: u32) -> Self {
        Self {
            task,
            player,
            rng,
            seed,
            token: CancellationToken::new(),
            events: EventSink::disabled(),
            phase: SequencerPhase::Idle,
            level: 0,
            count_in_level: 0,
            scoreboard: Scoreboard::default(),
            trials: Vec::new(),
            current: None,
            stop_reported: false,
        }
    }

    /// Forwards session events to a channel.
    pub fn with_events(mut self, sender: UnboundedSender<SessionEvent>) -> Self {
        self.events = EventSink::new(sender);
        self
    }

    /// Handle that can stop this session.
    pub fn handle(&self) -> SequencerHandle<P> {
        SequencerHandle {
            token: self.token.clone(),
            player: Rc::clone(&self.player),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> SequencerPhase {
        if self.token.is_cancelled() {
            SequencerPhase::Stopped
        } else {
            self.phase
        }
    }

    /// The task strategy.
    pub fn task(&self) -> &T {
        &self.task
    }

    /// Counters so far.
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Stimulus awaiting an answer.
    pub fn current_stimulus(&self) -> Option<&T::Stimulus> {
        match self.phase() {
            SequencerPhase::AwaitingResponse { .. } => self.current.as_ref(),
            _ => None,
        }
    }

    /// Number of answer options for the current trial.
    pub fn choices(&self) -> Option<usize> {
        self.current_stimulus()
            .map(|stimulus| self.task.choices(stimulus))
    }

    /// Summary of the session so far.
    pub fn report(&self) -> SessionReport {
        let outcome = match self.phase() {
            SequencerPhase::Finished => SessionOutcome::Finished,
            _ => SessionOutcome::Stopped,
        };
        SessionReport {
            task: T::KIND,
            seed: self.seed,
            outcome,
            scoreboard: self.scoreboard.clone(),
            trials: self.trials.clone(),
        }
    }

    /// Starts (or restarts a finished) session and presents the first trial.
    pub async fn start(&mut self) -> SessionResult<()> {
        match self.phase() {
            SequencerPhase::Stopped => return Err(SessionError::Stopped),
            SequencerPhase::Idle | SequencerPhase::Finished => {}
            _ => return Err(SessionError::AlreadyRunning),
        }

        self.level = 0;
        self.count_in_level = 0;
        self.scoreboard = Scoreboard::default();
        self.trials.clear();
        self.current = None;
        info!(task = %T::KIND, seed = self.seed, "starting session");

        self.advance().await
    }

    /// Judges an answer to the waiting trial and presents the next one.
    pub async fn respond(&mut self, answer: T::Answer) -> SessionResult<Verdict> {
        let level = match self.phase() {
            SequencerPhase::Stopped => return Err(SessionError::Stopped),
            SequencerPhase::AwaitingResponse { level, .. } => level,
            _ => return Err(SessionError::NotAwaitingResponse),
        };
        let stimulus = self
            .current
            .as_ref()
            .ok_or(SessionError::NotAwaitingResponse)?;
        self.task.check_answer(stimulus, answer)?;

        let number = self.scoreboard.total_trials + 1;
        let verdict = self.task.judge(stimulus, answer, number);
        self.current = None;

        let detail = match &verdict {
            Verdict::Pass => {
                self.scoreboard.record_pass();
                None
            }
            Verdict::Fail(line) => {
                self.scoreboard.record_failure(line.clone());
                Some(line.clone())
            }
        };
        let record = TrialRecord {
            number,
            level,
            difficulty: self.task.describe(&self.task.levels()[level].difficulty),
            correct: verdict.is_pass(),
            detail,
        };
        debug!(number, passed = record.correct, "trial scored");
        self.trials.push(record.clone());
        self.events.emit(SessionEvent::TrialScored {
            record,
            scoreboard: self.scoreboard.clone(),
        });

        self.count_in_level += 1;
        self.phase = SequencerPhase::Running {
            level: self.level,
            count_in_level: self.count_in_level,
        };
        self.advance().await?;
        Ok(verdict)
    }

    /// Stops the session and silences the active tone.
    pub fn stop(&mut self) {
        self.handle().stop();
        self.mark_stopped();
    }

    fn mark_stopped(&mut self) {
        self.phase = SequencerPhase::Stopped;
        self.current = None;
        if !self.stop_reported {
            self.stop_reported = true;
            info!(
                task = %T::KIND,
                trials = self.scoreboard.total_trials,
                "session stopped"
            );
            self.events
                .emit(SessionEvent::Stopped(self.scoreboard.clone()));
        }
    }

    /// Drops back to `Idle` after a failed trial so the session can be restarted.
    fn abandon(&mut self, err: SessionError) -> SessionError {
        warn!(task = %T::KIND, %err, "trial failed, session reset");
        self.phase = SequencerPhase::Idle;
        self.current = None;
        err
    }

    async fn advance(&mut self) -> SessionResult<()> {
        if self.token.is_cancelled() {
            self.mark_stopped();
            return Ok(());
        }

        let levels = self.task.levels();
        while self.level < levels.len() && self.count_in_level >= levels[self.level].trials {
            self.level += 1;
            self.count_in_level = 0;
        }
        let Some(level) = levels.get(self.level) else {
            self.phase = SequencerPhase::Finished;
            info!(
                task = %T::KIND,
                passed = self.scoreboard.total_passed,
                total = self.scoreboard.total_trials,
                "session finished"
            );
            self.events
                .emit(SessionEvent::Finished(self.scoreboard.clone()));
            return Ok(());
        };
        let difficulty = level.difficulty.clone();

        self.phase = SequencerPhase::Running {
            level: self.level,
            count_in_level: self.count_in_level,
        };
        if self.count_in_level == 0 {
            let description = self.task.describe(&difficulty);
            debug!(level = self.level, difficulty = %description, "entering level");
            self.events.emit(SessionEvent::LevelChanged {
                level: self.level,
                difficulty: description,
            });
        }

        let stimulus = match self.task.generate(&mut self.rng, &difficulty) {
            Ok(stimulus) => stimulus,
            Err(err) => return Err(self.abandon(err)),
        };
        let out = Presentation::new(&*self.player, &self.token, &self.events);
        let presented = self.task.present(&stimulus, &out).await;
        match presented {
            Ok(()) => {}
            Err(SessionError::Stopped) => {
                self.mark_stopped();
                return Ok(());
            }
            Err(err) => return Err(self.abandon(err)),
        }
        if self.token.is_cancelled() {
            self.mark_stopped();
            return Ok(());
        }

        let choices = self.task.choices(&stimulus);
        self.current = Some(stimulus);
        self.phase = SequencerPhase::AwaitingResponse {
            level: self.level,
            count_in_level: self.count_in_level,
        };
        self.events.emit(SessionEvent::AwaitingResponse {
            trial: self.scoreboard.total_trials + 1,
            choices,
        });
        debug!(
            level = self.level,
            count_in_level = self.count_in_level,
            "awaiting response"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests;
