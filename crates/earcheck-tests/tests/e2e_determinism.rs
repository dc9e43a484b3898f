//! Determinism tests.
//!
//! A seed fully determines a session: the stimuli, the scored report, and
//! the recorded audio. Offline generation draws from the same per-task
//! stream as a live session.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p earcheck-tests --test e2e_determinism
//! ```

use pretty_assertions::assert_eq;

use earcheck_cli::commands::generate::{generate_pairs, StimulusKind};
use earcheck_cli::commands::json_output::GeneratedPairs;
use earcheck_session::{MelodyTask, PitchTask, RhythmTask, TrialSequencer};
use earcheck_spec::{BatteryConfig, MelodyConfig, PitchConfig, RhythmConfig, TrialLevel};
use earcheck_tests::{hash_json, run_scripted, verify_determinism, AnswerPolicy, ScriptedRun};

async fn melody_run(seed: u32) -> ScriptedRun {
    let task = MelodyTask::new(MelodyConfig::default()).unwrap();
    run_scripted(task, seed, AnswerPolicy::Alternate).await.unwrap()
}

#[tokio::test(start_paused = true)]
async fn same_seed_same_report_for_every_task() {
    let pitch = |seed: u32| async move {
        let task = PitchTask::new(PitchConfig::default()).unwrap();
        run_scripted(task, seed, AnswerPolicy::AlwaysWrong).await.unwrap()
    };
    let rhythm = |seed: u32| async move {
        let task = RhythmTask::new(RhythmConfig::default()).unwrap();
        run_scripted(task, seed, AnswerPolicy::AlwaysWrong).await.unwrap()
    };

    assert_eq!(pitch(10).await.report, pitch(10).await.report);
    assert_eq!(rhythm(10).await.report, rhythm(10).await.report);
    assert_eq!(melody_run(10).await.report, melody_run(10).await.report);
}

#[tokio::test(start_paused = true)]
async fn different_seeds_different_melodies() {
    let a = melody_run(1).await;
    let b = melody_run(2).await;
    let a_json = serde_json::to_value(&a.report).unwrap();
    let b_json = serde_json::to_value(&b.report).unwrap();
    assert_ne!(hash_json(&a_json), hash_json(&b_json));
}

#[tokio::test(start_paused = true)]
async fn recordings_are_identical_for_the_same_seed() {
    let dir = tempfile::tempdir().unwrap();
    let first = melody_run(33).await;
    let second = melody_run(33).await;

    let a = first
        .player
        .write_recording(&dir.path().join("a.wav"))
        .unwrap();
    let b = second
        .player
        .write_recording(&dir.path().join("b.wav"))
        .unwrap();
    assert_eq!(a, b);
    assert!(a.samples > 0);
}

#[test]
fn offline_generation_is_deterministic() {
    let config = BatteryConfig::default();
    for kind in [StimulusKind::Melody, StimulusKind::Rhythm] {
        let result = verify_determinism(
            || serde_json::to_value(generate_pairs(kind, 6, 2024, 5, &config).unwrap()).unwrap(),
            3,
        );
        result.assert_deterministic();
    }
}

#[tokio::test(start_paused = true)]
async fn offline_generation_matches_session_stream() {
    let seed = 71;
    let config = BatteryConfig::default();
    let offline = generate_pairs(StimulusKind::Melody, 5, seed, 1, &config).unwrap();
    let GeneratedPairs::Melody { pairs, .. } = offline.generated else {
        panic!("expected melody pairs");
    };

    let task = MelodyTask::new(MelodyConfig {
        levels: vec![TrialLevel::new(5, 1)],
        ..MelodyConfig::default()
    })
    .unwrap();
    let player = std::rc::Rc::new(earcheck_backend_audio::SynthTonePlayer::new(8_000).unwrap());
    let mut session = TrialSequencer::new(task, player, seed);
    session.start().await.unwrap();

    assert_eq!(session.current_stimulus(), Some(&pairs[0]));
}
