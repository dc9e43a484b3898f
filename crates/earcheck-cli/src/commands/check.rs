//! Check command implementation
//!
//! Runs a melody through the melody rules and explains the verdict.

use anyhow::Result;
use colored::Colorize;
use earcheck_backend_stimulus::{note_name, MelodyValidator, Note};
use std::process::ExitCode;

use crate::notes::parse_note;

/// Run the check command
///
/// # Arguments
/// * `notes` - Notes as semitone offsets or names
///
/// # Returns
/// Exit code: 0 if the melody is valid, 1 if it breaks a rule
pub fn run(notes: &[String]) -> Result<ExitCode> {
    let melody = notes
        .iter()
        .map(|n| parse_note(n))
        .collect::<Result<Vec<Note>>>()?;
    let validator = MelodyValidator::new();

    let names: Vec<String> = melody.iter().map(|&n| note_name(n)).collect();
    println!("{} {}", "Melody:".cyan().bold(), names.join(" "));

    let scales = validator.scales().common_scales(&melody);
    if scales.is_empty() {
        println!("{} none", "Scales:".dimmed());
    } else {
        let labels: Vec<String> = scales.iter().map(|label| label.to_string()).collect();
        println!("{} {}", "Scales:".dimmed(), labels.join(", "));
    }

    match validator.check_melody(&melody) {
        Ok(()) => {
            println!("{} melody is valid", "ok".green().bold());
            Ok(ExitCode::SUCCESS)
        }
        Err(violation) => {
            println!("{} {}", "x".red().bold(), violation);
            Ok(ExitCode::from(1))
        }
    }
}
