//! CLI argument definitions for the earcheck command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// earcheck - Pitch, rhythm, and melody discrimination battery
#[derive(Parser)]
#[command(name = "earcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); overrides RUST_LOG
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Task selectable for an interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TaskArg {
    /// Which of two tones is higher
    Pitch,
    /// Were two rhythms identical
    Rhythm,
    /// Which note of a melody changed
    Melody,
}

/// Stimulus kind for offline generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum StimulusArg {
    /// Melody pairs differing in one note
    Melody,
    /// Rhythm pairs, identical or modified
    Rhythm,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run an interactive discrimination session on the terminal
    Run {
        /// Task to run
        #[arg(value_enum)]
        task: TaskArg,

        /// Path to a battery configuration file (JSON)
        #[arg(short, long)]
        config: Option<String>,

        /// Seed for the session's random stream (default: config seed, then random)
        #[arg(short, long)]
        seed: Option<u32>,

        /// Write everything played to a 16-bit mono WAV file
        #[arg(long)]
        record: Option<String>,

        /// Print the final report as JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Generate stimulus pairs without playing them
    Generate {
        /// Stimulus kind
        #[arg(value_enum)]
        kind: StimulusArg,

        /// Melody length in notes or rhythm length in intervals
        #[arg(short, long)]
        length: usize,

        /// Seed for the random stream (default: random)
        #[arg(short, long)]
        seed: Option<u32>,

        /// Number of pairs to generate
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Path to a battery configuration file (JSON)
        #[arg(short, long)]
        config: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Check whether a melody satisfies the melody rules
    Check {
        /// Notes as semitones above C4 (0, 7, 12) or names (C4, G4, C#5, Eb5)
        #[arg(required = true)]
        notes: Vec<String>,
    },

    /// List every registered scale containing a pitch class
    Scales {
        /// Pitch class as a number (0-11) or a name (C, F#, Bb)
        pitch_class: String,
    },

    /// Validate a battery configuration file
    Validate {
        /// Path to the configuration file (JSON)
        #[arg(short, long)]
        config: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the default battery configuration as JSON
    InitConfig {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}
