//! Pitch discrimination: was the second tone higher or lower?

use earcheck_backend_audio::{TonePlayer, ToneRequest};
use earcheck_backend_stimulus::{PitchPair, PitchPairGenerator};
use earcheck_spec::{PitchConfig, TaskKind, TrialLevel};
use rand::Rng;

use crate::error::SessionResult;
use crate::presentation::Presentation;
use crate::task::{TrialTask, Verdict};

/// Participant's judgement of the second tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchAnswer {
    /// The second tone was higher.
    Higher,
    /// The second tone was lower.
    Lower,
}

/// Pitch task driver.
#[derive(Debug, Clone)]
pub struct PitchTask {
    config: PitchConfig,
    generator: PitchPairGenerator,
}

impl PitchTask {
    /// Creates the task from its configuration.
    pub fn new(config: PitchConfig) -> SessionResult<Self> {
        let generator = PitchPairGenerator::new(config.base_frequency_hz)?;
        Ok(Self { config, generator })
    }

    fn tone(&self, frequency_hz: f64) -> ToneRequest {
        ToneRequest::new(frequency_hz, self.config.duration_ms)
            .with_fades(self.config.fade_in_ms, self.config.fade_out_ms)
    }
}

impl TrialTask for PitchTask {
    type Difficulty = f64;
    type Stimulus = PitchPair;
    type Answer = PitchAnswer;

    const KIND: TaskKind = TaskKind::Pitch;

    fn levels(&self) -> &[TrialLevel<f64>] {
        &self.config.levels
    }

    fn describe(&self, difficulty: &f64) -> String {
        format!("{} Hz", difficulty)
    }

    fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R, difficulty: &f64) -> SessionResult<PitchPair> {
        Ok(self.generator.generate(rng, *difficulty))
    }

    async fn present<P: TonePlayer>(
        &self,
        pair: &PitchPair,
        out: &Presentation<'_, P>,
    ) -> SessionResult<()> {
        out.pause_ms(self.config.silence_ms).await?;
        out.now_playing("Playing Pitch 1");
        out.play(self.tone(pair.first_hz())).await?;
        out.clear_now_playing();

        out.pause_ms(self.config.silence_ms).await?;
        out.now_playing("Playing Pitch 2");
        out.play(self.tone(pair.second_hz())).await?;
        out.clear_now_playing();
        Ok(())
    }

    fn choices(&self, _pair: &PitchPair) -> usize {
        2
    }

    fn judge(&self, pair: &PitchPair, answer: PitchAnswer, trial: u32) -> Verdict {
        let marked_higher = answer == PitchAnswer::Higher;
        if marked_higher == pair.second_is_higher() {
            Verdict::Pass
        } else {
            Verdict::Fail(format!(
                "Test {} failed, frequencies were {}/{}, was marked {}",
                trial,
                pair.first_hz(),
                pair.second_hz(),
                if marked_higher { "Higher" } else { "Lower" }
            ))
        }
    }
}
