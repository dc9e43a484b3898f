//! Melody discrimination: which note changed?

use earcheck_backend_audio::{TonePlayer, ToneRequest};
use earcheck_backend_stimulus::{MelodyGenerator, MelodyPair, Note, NoteTable, StimulusError};
use earcheck_spec::{MelodyConfig, TaskKind, TrialLevel};
use rand::Rng;
use tracing::warn;

use crate::error::{SessionError, SessionResult};
use crate::presentation::Presentation;
use crate::task::{TrialTask, Verdict};

/// Melody task driver. Answers are 0-based note positions.
#[derive(Debug, Clone)]
pub struct MelodyTask {
    config: MelodyConfig,
    notes: NoteTable,
    generator: MelodyGenerator<'static>,
}

impl MelodyTask {
    /// Creates the task from its configuration.
    pub fn new(config: MelodyConfig) -> SessionResult<Self> {
        let notes = NoteTable::new(config.octaves)?;
        let generator = MelodyGenerator::new(config.octaves)?;
        for level in &config.levels {
            generator.check_length(level.difficulty)?;
        }
        Ok(Self {
            config,
            notes,
            generator,
        })
    }

    /// Rejection-sampling counters accumulated so far.
    pub fn generator(&self) -> &MelodyGenerator<'static> {
        &self.generator
    }

    async fn play_melody<P: TonePlayer>(
        &self,
        melody: &[Note],
        out: &Presentation<'_, P>,
    ) -> SessionResult<()> {
        let gap = self
            .config
            .tone_interval_ms
            .saturating_sub(self.config.tone_duration_ms);
        for (index, &note) in melody.iter().enumerate() {
            let frequency = self.notes.frequency(note).ok_or_else(|| {
                StimulusError::invalid_param("note", format!("{} is outside the note table", note))
            })?;
            out.highlight_note(Some(index));
            out.play(ToneRequest::new(frequency, self.config.tone_duration_ms))
                .await?;
            out.highlight_note(None);
            out.pause_ms(gap).await?;
        }
        Ok(())
    }
}

impl TrialTask for MelodyTask {
    type Difficulty = usize;
    type Stimulus = MelodyPair;
    type Answer = usize;

    const KIND: TaskKind = TaskKind::Melody;

    fn levels(&self) -> &[TrialLevel<usize>] {
        &self.config.levels
    }

    fn describe(&self, length: &usize) -> String {
        format!("{} notes", length)
    }

    fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R, length: &usize) -> SessionResult<MelodyPair> {
        Ok(self.generator.generate_pair(rng, *length)?)
    }

    async fn present<P: TonePlayer>(
        &self,
        pair: &MelodyPair,
        out: &Presentation<'_, P>,
    ) -> SessionResult<()> {
        out.pause_ms(self.config.silence_ms).await?;
        out.now_playing("Playing Melody 1");
        self.play_melody(&pair.original, out).await?;
        out.clear_now_playing();

        out.pause_ms(self.config.silence_ms).await?;
        out.now_playing("Playing Melody 2");
        self.play_melody(&pair.modified, out).await?;
        out.clear_now_playing();
        Ok(())
    }

    fn choices(&self, pair: &MelodyPair) -> usize {
        pair.original.len()
    }

    fn check_answer(&self, pair: &MelodyPair, index: usize) -> SessionResult<()> {
        if index < pair.original.len() {
            Ok(())
        } else {
            Err(SessionError::InvalidAnswer(format!(
                "note {} does not exist in a {}-note melody",
                index + 1,
                pair.original.len()
            )))
        }
    }

    fn judge(&self, pair: &MelodyPair, index: usize, trial: u32) -> Verdict {
        match pair.difference() {
            None => {
                warn!(
                    trial,
                    original = ?pair.original,
                    "melody pair has no differing note, scoring as pass"
                );
                Verdict::Pass
            }
            Some(changed) if changed == index => Verdict::Pass,
            Some(changed) => Verdict::Fail(format!(
                "Test {} failed, different note was {}, was marked {}",
                trial,
                changed + 1,
                index + 1
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair() -> MelodyPair {
        MelodyPair {
            original: vec![0, 1, 2, 3],
            modified: vec![0, 1, 2, 4],
            changed_index: 3,
            attempts: 1,
        }
    }

    #[test]
    fn test_judge_changed_note() {
        let task = MelodyTask::new(MelodyConfig::default()).unwrap();
        assert_eq!(task.judge(&pair(), 3, 1), Verdict::Pass);
        assert_eq!(
            task.judge(&pair(), 0, 2),
            Verdict::Fail("Test 2 failed, different note was 4, was marked 1".to_string())
        );
    }

    #[test]
    fn test_identical_pair_is_a_pass() {
        let task = MelodyTask::new(MelodyConfig::default()).unwrap();
        let mut identical = pair();
        identical.modified = identical.original.clone();
        assert_eq!(task.judge(&identical, 2, 1), Verdict::Pass);
    }

    #[test]
    fn test_rejects_unsupported_level_length() {
        let config = MelodyConfig {
            levels: vec![TrialLevel::new(5, 2), TrialLevel::new(3, 1)],
            ..MelodyConfig::default()
        };
        assert!(matches!(
            MelodyTask::new(config),
            Err(SessionError::Stimulus(StimulusError::InvalidLength { length: 3, .. }))
        ));

        let single_octave = MelodyConfig {
            octaves: 1,
            levels: vec![TrialLevel::new(9, 1)],
            ..MelodyConfig::default()
        };
        assert!(MelodyTask::new(single_octave).is_ok());
    }

    #[test]
    fn test_answer_range() {
        let task = MelodyTask::new(MelodyConfig::default()).unwrap();
        assert!(task.check_answer(&pair(), 3).is_ok());
        assert!(matches!(
            task.check_answer(&pair(), 4),
            Err(SessionError::InvalidAnswer(_))
        ));
    }
}
