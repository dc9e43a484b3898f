//! Generate command implementation
//!
//! Prints stimulus pairs without playing them. Pairs are drawn from the same
//! per-task random stream a session with the same seed would use.

use anyhow::{bail, Result};
use colored::Colorize;
use earcheck_backend_stimulus::{
    create_component_rng, fresh_seed, note_name, MelodyGenerator, Note, RhythmGenerator,
};
use earcheck_spec::BatteryConfig;
use std::process::ExitCode;

use super::json_output::{GenerateOutput, GeneratedPairs};
use crate::input::load_battery;

/// Stimulus kinds the generator can produce offline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StimulusKind {
    /// Melody pairs differing in exactly one note.
    Melody,
    /// Rhythm pairs, identical or modified.
    Rhythm,
}

impl StimulusKind {
    /// Returns the lowercase kind name, also used as the seed derivation key.
    pub fn as_str(&self) -> &'static str {
        match self {
            StimulusKind::Melody => "melody",
            StimulusKind::Rhythm => "rhythm",
        }
    }
}

/// Run the generate command
///
/// # Arguments
/// * `kind` - Stimulus kind to generate
/// * `length` - Notes per melody or intervals per rhythm
/// * `seed` - Seed for the random stream (default: random)
/// * `count` - Number of pairs
/// * `config_path` - Optional battery configuration supplying generator settings
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success
pub fn run(
    kind: StimulusKind,
    length: usize,
    seed: Option<u32>,
    count: usize,
    config_path: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let config = load_battery(config_path)?;
    let seed = seed.or(config.seed).unwrap_or_else(fresh_seed);
    let output = generate_pairs(kind, length, seed, count, &config)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_human(&output);
    }
    Ok(ExitCode::SUCCESS)
}

/// Generates `count` pairs of `kind` from `seed`.
pub fn generate_pairs(
    kind: StimulusKind,
    length: usize,
    seed: u32,
    count: usize,
    config: &BatteryConfig,
) -> Result<GenerateOutput> {
    if count == 0 {
        bail!("count must be at least 1");
    }
    let mut rng = create_component_rng(seed, kind.as_str());

    let generated = match kind {
        StimulusKind::Melody => {
            let mut generator = MelodyGenerator::new(config.melody.octaves)?;
            let pairs = (0..count)
                .map(|_| generator.generate_pair(&mut rng, length))
                .collect::<Result<Vec<_>, _>>()?;
            GeneratedPairs::Melody {
                pairs,
                stats: generator.stats(),
            }
        }
        StimulusKind::Rhythm => {
            let generator = RhythmGenerator::from_config(&config.rhythm)?;
            let pairs = (0..count)
                .map(|_| generator.generate_pair(&mut rng, length))
                .collect::<Result<Vec<_>, _>>()?;
            GeneratedPairs::Rhythm { pairs }
        }
    };

    Ok(GenerateOutput {
        seed,
        length,
        generated,
    })
}

fn print_human(output: &GenerateOutput) {
    println!("{} {}", "Seed:".dimmed(), output.seed);
    match &output.generated {
        GeneratedPairs::Melody { pairs, stats } => {
            for (i, pair) in pairs.iter().enumerate() {
                println!(
                    "{:>3}. {}  ->  {}",
                    i + 1,
                    format_melody(&pair.original, None),
                    format_melody(&pair.modified, Some(pair.changed_index))
                );
                println!(
                    "     {} note {} changed after {} attempt(s)",
                    "->".green(),
                    pair.changed_index + 1,
                    pair.attempts
                );
            }
            let rate = stats
                .success_rate()
                .map(|r| format!("{:.1}%", r * 100.0))
                .unwrap_or_else(|| "n/a".to_string());
            println!(
                "{} {} candidates, {} rejected, {} exhausted, {} unmodifiable ({} accepted)",
                "Stats:".dimmed(),
                stats.candidates,
                stats.rejected,
                stats.exhausted,
                stats.unmodifiable,
                rate
            );
        }
        GeneratedPairs::Rhythm { pairs } => {
            for (i, pair) in pairs.iter().enumerate() {
                let verdict = if pair.is_same() {
                    "same".cyan()
                } else {
                    "different".yellow()
                };
                println!(
                    "{:>3}. {}  ->  {}  ({}, {} attempt(s))",
                    i + 1,
                    format_rhythm(&pair.original),
                    format_rhythm(&pair.modified),
                    verdict,
                    pair.attempts
                );
            }
        }
    }
}

fn format_melody(melody: &[Note], highlight: Option<usize>) -> String {
    melody
        .iter()
        .enumerate()
        .map(|(i, &note)| {
            let name = note_name(note);
            if Some(i) == highlight {
                name.bold().to_string()
            } else {
                name
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_rhythm(rhythm: &[u32]) -> String {
    rhythm
        .iter()
        .map(|ms| ms.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
