//! Synthesizing tone player with session recording.
//!
//! [`SynthTonePlayer`] keeps time with the tokio clock and logs every tone it
//! is asked to play, including where it was cut short. The log can be
//! rendered to samples afterwards, which is how a session is recorded.

use std::cell::RefCell;
use std::path::Path;

use tokio::time::{self, Instant};
use tracing::{debug, warn};

use crate::envelope::FadeEnvelope;
use crate::error::{AudioError, AudioResult};
use crate::oscillator::{self, PhaseAccumulator};
use crate::tone::{ToneRequest, TonePlayer};
use crate::wav::{write_mono_wav, WavSummary};

/// Default recording sample rate.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Peak amplitude of a rendered tone.
const TONE_GAIN: f64 = 0.5;

/// One tone as it was actually played.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneEvent {
    /// The request that started the tone.
    pub request: ToneRequest,
    /// Milliseconds since the player was created.
    pub start_ms: u64,
    /// Where the tone was silenced early, if it was.
    pub cut_ms: Option<u64>,
}

impl ToneEvent {
    /// Scheduled end of the tone.
    pub fn scheduled_end_ms(&self) -> u64 {
        self.start_ms + self.request.total_ms()
    }

    /// When the tone actually fell silent.
    pub fn end_ms(&self) -> u64 {
        self.cut_ms
            .map_or(self.scheduled_end_ms(), |cut| cut.min(self.scheduled_end_ms()))
    }
}

#[derive(Debug, Default)]
struct PlayerState {
    events: Vec<ToneEvent>,
    active: Option<usize>,
}

/// Tone player that synthesizes into a session log.
#[derive(Debug)]
pub struct SynthTonePlayer {
    sample_rate: u32,
    origin: Instant,
    state: RefCell<PlayerState>,
}

impl SynthTonePlayer {
    /// Creates a player recording at `sample_rate`.
    pub fn new(sample_rate: u32) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }
        Ok(Self {
            sample_rate,
            origin: Instant::now(),
            state: RefCell::new(PlayerState::default()),
        })
    }

    /// Recording sample rate.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Every tone played so far.
    pub fn events(&self) -> Vec<ToneEvent> {
        self.state.borrow().events.clone()
    }

    /// Returns true while a tone is sounding.
    pub fn is_playing(&self) -> bool {
        let now = self.now_ms();
        let state = self.state.borrow();
        state
            .active
            .is_some_and(|index| state.events[index].end_ms() > now)
    }

    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    /// Renders the whole session log to samples.
    pub fn render(&self) -> Vec<f64> {
        let state = self.state.borrow();
        let rate = self.sample_rate as u64;
        let to_samples = |ms: u64| (ms * rate / 1000) as usize;

        let total = state
            .events
            .iter()
            .map(|event| to_samples(event.end_ms()))
            .max()
            .unwrap_or(0);
        let mut output = vec![0.0; total];

        for event in &state.events {
            let request = &event.request;
            let envelope = FadeEnvelope::from_ms(
                request.fade_in_ms,
                request.duration_ms,
                request.fade_out_ms,
                self.sample_rate,
            );
            let start = to_samples(event.start_ms);
            let end = to_samples(event.end_ms()).min(start + envelope.len());
            let mut phase = PhaseAccumulator::new(self.sample_rate as f64);

            for (i, sample) in output[start..end].iter_mut().enumerate() {
                let value = oscillator::sine(phase.advance(request.frequency_hz));
                *sample += value * envelope.gain_at(i) * TONE_GAIN;
            }
        }

        output
    }

    /// Renders the session log and writes it as a mono WAV file.
    pub fn write_recording(&self, path: &Path) -> AudioResult<WavSummary> {
        let samples = self.render();
        write_mono_wav(path, &samples, self.sample_rate)
    }
}

impl TonePlayer for SynthTonePlayer {
    async fn play(&self, request: ToneRequest) -> AudioResult<()> {
        request.validate()?;

        let now = self.now_ms();
        let index = {
            let mut state = self.state.borrow_mut();
            if let Some(active) = state.active.take() {
                let event = &mut state.events[active];
                if event.end_ms() > now {
                    warn!(
                        frequency_hz = event.request.frequency_hz,
                        "tone still playing, stopping it first"
                    );
                    event.cut_ms = Some(now);
                }
            }
            state.events.push(ToneEvent {
                request,
                start_ms: now,
                cut_ms: None,
            });
            let index = state.events.len() - 1;
            state.active = Some(index);
            index
        };
        debug!(
            frequency_hz = request.frequency_hz,
            total_ms = request.total_ms(),
            "playing tone"
        );

        time::sleep(request.total()).await;

        let mut state = self.state.borrow_mut();
        if state.active == Some(index) {
            state.active = None;
        }
        Ok(())
    }

    fn stop(&self) {
        let now = self.now_ms();
        let mut state = self.state.borrow_mut();
        if let Some(active) = state.active.take() {
            let event = &mut state.events[active];
            if event.end_ms() > now {
                event.cut_ms = Some(now);
                debug!(frequency_hz = event.request.frequency_hz, "tone stopped");
            }
        }
    }
}
