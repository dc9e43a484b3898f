//! Rhythm discrimination: were the two sequences identical?

use earcheck_backend_audio::{TonePlayer, ToneRequest};
use earcheck_backend_stimulus::{RhythmGenerator, RhythmPair};
use earcheck_spec::{RhythmConfig, TaskKind, TrialLevel};
use rand::Rng;

use crate::error::SessionResult;
use crate::presentation::Presentation;
use crate::task::{TrialTask, Verdict};

/// Participant's judgement of the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RhythmAnswer {
    /// The sequences sounded identical.
    Same,
    /// The sequences sounded different.
    Different,
}

/// Rhythm task driver.
#[derive(Debug, Clone)]
pub struct RhythmTask {
    config: RhythmConfig,
    generator: RhythmGenerator,
}

impl RhythmTask {
    /// Creates the task from its configuration.
    pub fn new(config: RhythmConfig) -> SessionResult<Self> {
        let generator = RhythmGenerator::from_config(&config)?;
        for level in &config.levels {
            generator.check_length(level.difficulty)?;
        }
        Ok(Self { config, generator })
    }

    async fn play_rhythm<P: TonePlayer>(
        &self,
        rhythm: &[u32],
        out: &Presentation<'_, P>,
    ) -> SessionResult<()> {
        let sounding = self.config.tone_length_ms + self.config.release_ms;
        let tone = ToneRequest::new(self.config.tone_frequency_hz, self.config.tone_length_ms)
            .with_fades(0, self.config.release_ms);
        for &interval in rhythm {
            out.play(tone).await?;
            out.pause_ms(interval.saturating_sub(sounding)).await?;
        }
        Ok(())
    }
}

impl TrialTask for RhythmTask {
    type Difficulty = usize;
    type Stimulus = RhythmPair;
    type Answer = RhythmAnswer;

    const KIND: TaskKind = TaskKind::Rhythm;

    fn levels(&self) -> &[TrialLevel<usize>] {
        &self.config.levels
    }

    fn describe(&self, length: &usize) -> String {
        format!("{} intervals", length)
    }

    fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R, length: &usize) -> SessionResult<RhythmPair> {
        Ok(self.generator.generate_pair(rng, *length)?)
    }

    async fn present<P: TonePlayer>(
        &self,
        pair: &RhythmPair,
        out: &Presentation<'_, P>,
    ) -> SessionResult<()> {
        out.pause_ms(self.config.silence_ms).await?;
        out.now_playing("Playing Rhythm 1");
        self.play_rhythm(&pair.original, out).await?;
        out.clear_now_playing();

        out.pause_ms(self.config.silence_ms).await?;
        out.now_playing("Playing Rhythm 2");
        self.play_rhythm(&pair.modified, out).await?;
        out.clear_now_playing();
        Ok(())
    }

    fn choices(&self, _pair: &RhythmPair) -> usize {
        2
    }

    fn judge(&self, pair: &RhythmPair, answer: RhythmAnswer, trial: u32) -> Verdict {
        let marked_different = answer == RhythmAnswer::Different;
        let differs = !pair.is_same();
        if marked_different == differs {
            Verdict::Pass
        } else {
            Verdict::Fail(format!(
                "Test {} failed, sequences were {}different, was marked as {}different",
                trial,
                if differs { "" } else { "not " },
                if marked_different { "" } else { "not " }
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair(same: bool) -> RhythmPair {
        let original = vec![150, 300, 450, 600, 150];
        let modified = if same {
            original.clone()
        } else {
            vec![300, 450, 600, 150, 150]
        };
        RhythmPair {
            original,
            modified,
            attempts: 1,
        }
    }

    #[test]
    fn test_judge() {
        let task = RhythmTask::new(RhythmConfig::default()).unwrap();
        assert_eq!(task.judge(&pair(true), RhythmAnswer::Same, 1), Verdict::Pass);
        assert_eq!(task.judge(&pair(false), RhythmAnswer::Different, 1), Verdict::Pass);
        assert_eq!(
            task.judge(&pair(true), RhythmAnswer::Different, 3),
            Verdict::Fail(
                "Test 3 failed, sequences were not different, was marked as different".to_string()
            )
        );
        assert_eq!(
            task.judge(&pair(false), RhythmAnswer::Same, 5),
            Verdict::Fail(
                "Test 5 failed, sequences were different, was marked as not different".to_string()
            )
        );
    }

    #[test]
    fn test_rejects_unmodifiable_level_length() {
        let config = RhythmConfig {
            levels: vec![TrialLevel::new(4, 2), TrialLevel::new(1, 2)],
            ..RhythmConfig::default()
        };
        assert!(matches!(
            RhythmTask::new(config),
            Err(crate::error::SessionError::Stimulus(
                earcheck_backend_stimulus::StimulusError::InvalidLength { length: 1, .. }
            ))
        ));
    }

    #[test]
    fn test_rejects_degenerate_palette() {
        let config = RhythmConfig {
            palette_ms: vec![300],
            ..RhythmConfig::default()
        };
        assert!(RhythmTask::new(config).is_err());
    }
}
