//! Battery configuration types.
//!
//! A battery configuration is a JSON document with one section per task. Every
//! field has a default taken from the reference battery, so a partial document
//! only needs to name the values it overrides:
//!
//! ```
//! use earcheck_spec::BatteryConfig;
//!
//! let config = BatteryConfig::from_json(r#"{ "seed": 7, "pitch": { "base_frequency_hz": 440.0 } }"#).unwrap();
//! assert_eq!(config.seed, Some(7));
//! assert_eq!(config.pitch.base_frequency_hz, 440.0);
//! assert_eq!(config.pitch.silence_ms, 1000);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Shortest melody the generator supports.
pub const MIN_MELODY_LENGTH: usize = 4;

/// Longest melody the generator supports.
pub const MAX_MELODY_LENGTH: usize = 9;

/// Largest octave count the note table can be built for.
pub const MAX_OCTAVES: u8 = 4;

/// Shortest rhythm that can be swapped or rotated.
pub const MIN_RHYTHM_LENGTH: usize = 2;

/// A difficulty setting paired with a fixed number of trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrialLevel<D> {
    /// Difficulty parameter (Hz difference, rhythm length, melody length).
    pub difficulty: D,
    /// Number of trials to run at this difficulty.
    pub trials: u32,
}

impl<D> TrialLevel<D> {
    /// Creates a level.
    pub fn new(difficulty: D, trials: u32) -> Self {
        Self { difficulty, trials }
    }
}

/// Sum of all trial quotas in a level list.
pub fn total_quota<D>(levels: &[TrialLevel<D>]) -> u32 {
    levels.iter().map(|l| l.trials).sum()
}

fn zip_levels<D: Copy>(difficulties: &[D], counts: &[u32]) -> Vec<TrialLevel<D>> {
    difficulties
        .iter()
        .zip(counts)
        .map(|(&d, &n)| TrialLevel::new(d, n))
        .collect()
}

/// Which task of the battery a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Higher/lower pitch discrimination.
    Pitch,
    /// Same/different rhythm discrimination.
    Rhythm,
    /// Altered-note melody discrimination.
    Melody,
}

impl TaskKind {
    /// Returns the lowercase task name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Pitch => "pitch",
            TaskKind::Rhythm => "rhythm",
            TaskKind::Melody => "melody",
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pitch discrimination task settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PitchConfig {
    /// Frequency of the reference tone.
    pub base_frequency_hz: f64,
    /// Linear fade-in of each tone.
    pub fade_in_ms: u32,
    /// Full-gain hold of each tone.
    pub duration_ms: u32,
    /// Linear fade-out of each tone.
    pub fade_out_ms: u32,
    /// Silence before each tone.
    pub silence_ms: u32,
    /// Levels keyed by the Hz difference between the two tones.
    pub levels: Vec<TrialLevel<f64>>,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            base_frequency_hz: 500.0,
            fade_in_ms: 30,
            duration_ms: 530,
            fade_out_ms: 30,
            silence_ms: 1000,
            levels: zip_levels(
                &[17.0, 12.0, 8.0, 5.0, 4.0, 3.0, 2.0, 1.0],
                &[3, 3, 3, 4, 4, 4, 4, 2],
            ),
        }
    }
}

/// Rhythm discrimination task settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RhythmConfig {
    /// Frequency of every click tone.
    pub tone_frequency_hz: f64,
    /// Silence before each rhythm.
    pub silence_ms: u32,
    /// Full-gain length of each click.
    pub tone_length_ms: u32,
    /// Linear fade-out after each click.
    pub release_ms: u32,
    /// Inter-onset intervals a rhythm is drawn from.
    pub palette_ms: Vec<u32>,
    /// Chance that both rhythms of a trial are identical.
    pub same_probability: f64,
    /// Chance that a modification only rotates the start point.
    pub rotate_only_probability: f64,
    /// Chance that a modification only swaps two positions.
    pub swap_only_probability: f64,
    /// Levels keyed by rhythm length.
    pub levels: Vec<TrialLevel<usize>>,
}

impl Default for RhythmConfig {
    fn default() -> Self {
        Self {
            tone_frequency_hz: 500.0,
            silence_ms: 1000,
            tone_length_ms: 30,
            release_ms: 30,
            palette_ms: vec![150, 300, 450, 600],
            same_probability: 0.5,
            rotate_only_probability: 0.4,
            swap_only_probability: 0.4,
            levels: zip_levels(&[5, 6, 7], &[6, 6, 6]),
        }
    }
}

/// Melody discrimination task settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MelodyConfig {
    /// Onset-to-onset time between notes.
    pub tone_interval_ms: u32,
    /// Sounding length of each note.
    pub tone_duration_ms: u32,
    /// Silence before each melody.
    pub silence_ms: u32,
    /// Octaves above C4 available to the generator.
    pub octaves: u8,
    /// Levels keyed by melody length.
    pub levels: Vec<TrialLevel<usize>>,
}

impl Default for MelodyConfig {
    fn default() -> Self {
        Self {
            tone_interval_ms: 650,
            tone_duration_ms: 650,
            silence_ms: 1300,
            octaves: 2,
            levels: zip_levels(&[4, 5, 6, 7, 8, 9], &[3, 3, 3, 3, 3, 3]),
        }
    }
}

/// Complete configuration for the three-task battery.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Battery seed; a fresh one is drawn per run when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    /// Pitch task.
    pub pitch: PitchConfig,
    /// Rhythm task.
    pub rhythm: RhythmConfig,
    /// Melody task.
    pub melody: MelodyConfig,
}

impl BatteryConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
