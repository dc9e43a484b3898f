use std::rc::Rc;
use std::time::Duration;

use earcheck_backend_audio::SynthTonePlayer;
use earcheck_backend_stimulus::{PitchPair, StimulusError};
use earcheck_spec::{MelodyConfig, PitchConfig, RhythmConfig, TaskKind, TrialLevel};
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

use super::*;
use crate::tasks::{MelodyTask, PitchAnswer, PitchTask, RhythmAnswer, RhythmTask};

fn player() -> Rc<SynthTonePlayer> {
    Rc::new(SynthTonePlayer::new(8000).unwrap())
}

fn pitch_task(levels: Vec<TrialLevel<f64>>) -> PitchTask {
    PitchTask::new(PitchConfig {
        levels,
        ..PitchConfig::default()
    })
    .unwrap()
}

fn correct_pitch_answer<R: Rng>(seq: &TrialSequencer<PitchTask, SynthTonePlayer, R>) -> PitchAnswer {
    if seq.current_stimulus().unwrap().second_is_higher() {
        PitchAnswer::Higher
    } else {
        PitchAnswer::Lower
    }
}

/// Pitch task whose first `failures` generations fail.
struct FlakyPitch {
    inner: PitchTask,
    failures: u32,
}

impl TrialTask for FlakyPitch {
    type Difficulty = f64;
    type Stimulus = PitchPair;
    type Answer = PitchAnswer;

    const KIND: TaskKind = TaskKind::Pitch;

    fn levels(&self) -> &[TrialLevel<f64>] {
        self.inner.levels()
    }

    fn describe(&self, difficulty: &f64) -> String {
        self.inner.describe(difficulty)
    }

    fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R, difficulty: &f64) -> SessionResult<PitchPair> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(StimulusError::invalid_param("difficulty", "unavailable").into());
        }
        self.inner.generate(rng, difficulty)
    }

    async fn present<P: TonePlayer>(
        &self,
        pair: &PitchPair,
        out: &Presentation<'_, P>,
    ) -> SessionResult<()> {
        self.inner.present(pair, out).await
    }

    fn choices(&self, pair: &PitchPair) -> usize {
        self.inner.choices(pair)
    }

    fn judge(&self, pair: &PitchPair, answer: PitchAnswer, trial: u32) -> Verdict {
        self.inner.judge(pair, answer, trial)
    }
}

fn wrong(answer: PitchAnswer) -> PitchAnswer {
    match answer {
        PitchAnswer::Higher => PitchAnswer::Lower,
        PitchAnswer::Lower => PitchAnswer::Higher,
    }
}

#[tokio::test(start_paused = true)]
async fn test_quotas_run_to_finished() {
    let task = pitch_task(vec![TrialLevel::new(17.0, 3), TrialLevel::new(12.0, 3)]);
    let mut seq = TrialSequencer::new(task, player(), 11);
    seq.start().await.unwrap();

    let pattern = [true, false, true, true, false, true];
    for (i, &answer_correctly) in pattern.iter().enumerate() {
        let expected_level = if i < 3 { 0 } else { 1 };
        assert!(matches!(
            seq.phase(),
            SequencerPhase::AwaitingResponse { level, .. } if level == expected_level
        ));
        let correct = correct_pitch_answer(&seq);
        let answer = if answer_correctly { correct } else { wrong(correct) };
        let verdict = seq.respond(answer).await.unwrap();
        assert_eq!(verdict.is_pass(), answer_correctly);
    }

    assert_eq!(seq.phase(), SequencerPhase::Finished);
    let board = seq.scoreboard();
    assert_eq!(board.total_trials, 6);
    assert_eq!(board.total_passed, 4);
    assert_eq!(board.failure_detail.len(), 2);
    assert!(board.failure_detail[0].starts_with("Test 2 failed"));
    assert!(board.failure_detail[1].starts_with("Test 5 failed"));

    let report = seq.report();
    assert_eq!(report.outcome, SessionOutcome::Finished);
    assert_eq!(report.trials.len(), 6);
    assert_eq!(report.trials[3].difficulty, "12 Hz");
}

#[tokio::test(start_paused = true)]
async fn test_stop_mid_playback_is_permanent() {
    let player = player();
    let task = pitch_task(vec![TrialLevel::new(17.0, 3)]);
    let mut seq = TrialSequencer::new(task, Rc::clone(&player), 3);
    let handle = seq.handle();

    // first tone plays from 1000 ms to 1590 ms
    let stopper = async {
        tokio::time::sleep(Duration::from_millis(1200)).await;
        handle.stop();
    };
    let (started, ()) = tokio::join!(seq.start(), stopper);
    started.unwrap();

    assert_eq!(seq.phase(), SequencerPhase::Stopped);
    assert!(seq.current_stimulus().is_none());
    assert!(matches!(
        seq.respond(PitchAnswer::Higher).await,
        Err(SessionError::Stopped)
    ));
    assert!(matches!(seq.start().await, Err(SessionError::Stopped)));

    let events = player.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].cut_ms, Some(1200));
    assert_eq!(seq.scoreboard().total_trials, 0);
    assert_eq!(seq.report().outcome, SessionOutcome::Stopped);
}

#[tokio::test(start_paused = true)]
async fn test_stop_while_awaiting_response() {
    let task = pitch_task(vec![TrialLevel::new(17.0, 2)]);
    let mut seq = TrialSequencer::new(task, player(), 3);
    seq.start().await.unwrap();
    seq.stop();
    seq.stop();
    assert_eq!(seq.phase(), SequencerPhase::Stopped);
    assert!(matches!(
        seq.respond(PitchAnswer::Lower).await,
        Err(SessionError::Stopped)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_respond_outside_awaiting_is_rejected() {
    let task = pitch_task(vec![TrialLevel::new(17.0, 1)]);
    let mut seq = TrialSequencer::new(task, player(), 5);
    assert!(matches!(
        seq.respond(PitchAnswer::Higher).await,
        Err(SessionError::NotAwaitingResponse)
    ));

    seq.start().await.unwrap();
    assert!(matches!(seq.start().await, Err(SessionError::AlreadyRunning)));

    let answer = correct_pitch_answer(&seq);
    seq.respond(answer).await.unwrap();
    assert_eq!(seq.phase(), SequencerPhase::Finished);
    assert!(matches!(
        seq.respond(answer).await,
        Err(SessionError::NotAwaitingResponse)
    ));
    assert_eq!(seq.scoreboard().total_trials, 1);
}

#[tokio::test(start_paused = true)]
async fn test_zero_quota_levels_are_skipped() {
    let task = pitch_task(vec![
        TrialLevel::new(17.0, 0),
        TrialLevel::new(12.0, 1),
        TrialLevel::new(8.0, 0),
    ]);
    let mut seq = TrialSequencer::new(task, player(), 9);
    seq.start().await.unwrap();
    assert!(matches!(
        seq.phase(),
        SequencerPhase::AwaitingResponse { level: 1, .. }
    ));
    let answer = correct_pitch_answer(&seq);
    seq.respond(answer).await.unwrap();
    assert_eq!(seq.phase(), SequencerPhase::Finished);
}

#[tokio::test(start_paused = true)]
async fn test_all_zero_quotas_finish_immediately() {
    let player = player();
    let task = pitch_task(vec![TrialLevel::new(17.0, 0)]);
    let mut seq = TrialSequencer::new(task, Rc::clone(&player), 9);
    seq.start().await.unwrap();
    assert_eq!(seq.phase(), SequencerPhase::Finished);
    assert!(player.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_finished_session_can_restart() {
    let task = pitch_task(vec![TrialLevel::new(17.0, 1)]);
    let mut seq = TrialSequencer::new(task, player(), 21);
    seq.start().await.unwrap();
    let answer = wrong(correct_pitch_answer(&seq));
    seq.respond(answer).await.unwrap();
    assert_eq!(seq.scoreboard().total_trials, 1);

    seq.start().await.unwrap();
    assert_eq!(seq.scoreboard(), &Scoreboard::default());
    assert!(seq.report().trials.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_same_seed_same_stimuli() {
    let mut a = TrialSequencer::new(pitch_task(vec![TrialLevel::new(5.0, 4)]), player(), 77);
    let mut b = TrialSequencer::new(pitch_task(vec![TrialLevel::new(5.0, 4)]), player(), 77);
    a.start().await.unwrap();
    b.start().await.unwrap();
    for _ in 0..4 {
        assert_eq!(a.current_stimulus(), b.current_stimulus());
        a.respond(PitchAnswer::Higher).await.unwrap();
        b.respond(PitchAnswer::Higher).await.unwrap();
    }
}

#[tokio::test(start_paused = true)]
async fn test_melody_session_plays_both_melodies() {
    let player = player();
    let task = MelodyTask::new(MelodyConfig {
        levels: vec![TrialLevel::new(5, 1)],
        ..MelodyConfig::default()
    })
    .unwrap();
    let mut seq = TrialSequencer::new(task, Rc::clone(&player), 4);
    seq.start().await.unwrap();

    let pair = seq.current_stimulus().unwrap().clone();
    assert_eq!(seq.choices(), Some(5));
    assert_eq!(player.events().len(), 10);

    assert!(matches!(
        seq.respond(5).await,
        Err(SessionError::InvalidAnswer(_))
    ));
    assert!(seq.current_stimulus().is_some());

    let verdict = seq.respond(pair.changed_index).await.unwrap();
    assert_eq!(verdict, Verdict::Pass);
    assert_eq!(seq.phase(), SequencerPhase::Finished);
}

#[tokio::test(start_paused = true)]
async fn test_rhythm_session_timing() {
    let player = player();
    let task = RhythmTask::new(RhythmConfig {
        levels: vec![TrialLevel::new(5, 1)],
        ..RhythmConfig::default()
    })
    .unwrap();
    let mut seq = TrialSequencer::new(task, Rc::clone(&player), 8);
    seq.start().await.unwrap();

    let pair = seq.current_stimulus().unwrap().clone();
    let events = player.events();
    assert_eq!(events.len(), 10);
    // onsets of the first rhythm follow its intervals
    for (i, window) in events[..5].windows(2).enumerate() {
        assert_eq!(window[1].start_ms - window[0].start_ms, pair.original[i] as u64);
    }
    assert_eq!(events[0].start_ms, 1000);

    let answer = if pair.is_same() {
        RhythmAnswer::Same
    } else {
        RhythmAnswer::Different
    };
    assert!(seq.respond(answer).await.unwrap().is_pass());
}

#[tokio::test(start_paused = true)]
async fn test_events_stream() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let task = pitch_task(vec![TrialLevel::new(17.0, 1)]);
    let mut seq = TrialSequencer::new(task, player(), 2).with_events(tx);
    seq.start().await.unwrap();
    let answer = correct_pitch_answer(&seq);
    seq.respond(answer).await.unwrap();

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    assert_eq!(
        events[0],
        SessionEvent::LevelChanged {
            level: 0,
            difficulty: "17 Hz".to_string()
        }
    );
    assert_eq!(
        events[1],
        SessionEvent::NowPlaying(Some("Playing Pitch 1".to_string()))
    );
    assert!(events.contains(&SessionEvent::AwaitingResponse {
        trial: 1,
        choices: 2
    }));
    assert!(matches!(
        events.last(),
        Some(SessionEvent::Finished(board)) if board.total_passed == 1
    ));
}

#[tokio::test(start_paused = true)]
async fn test_generation_failure_returns_to_idle() {
    let task = FlakyPitch {
        inner: pitch_task(vec![TrialLevel::new(17.0, 1)]),
        failures: 1,
    };
    let mut seq = TrialSequencer::new(task, player(), 4);
    assert!(matches!(
        seq.start().await,
        Err(SessionError::Stimulus(StimulusError::InvalidParameter { .. }))
    ));
    assert_eq!(seq.phase(), SequencerPhase::Idle);
    assert!(seq.current_stimulus().is_none());

    seq.start().await.unwrap();
    assert!(matches!(
        seq.phase(),
        SequencerPhase::AwaitingResponse { level: 0, .. }
    ));
}
