//! Scales command implementation
//!
//! Lists every registered scale containing a pitch class.

use anyhow::Result;
use colored::Colorize;
use earcheck_backend_stimulus::{ScaleIndex, ScaleLabel};
use std::process::ExitCode;

use crate::notes::parse_pitch_class;

/// Run the scales command
///
/// # Arguments
/// * `pitch_class` - Pitch class as a number or name
///
/// # Returns
/// Exit code: 0 on success
pub fn run(pitch_class: &str) -> Result<ExitCode> {
    let pc = parse_pitch_class(pitch_class)?;
    let labels = scales_with(pc);

    println!(
        "{} {} registered scale(s) contain pitch class {}",
        "Scales:".cyan().bold(),
        labels.len(),
        pc
    );
    for label in &labels {
        println!("  {} {}", "->".green(), label);
    }
    Ok(ExitCode::SUCCESS)
}

/// Registered scales containing `pc`, in index order.
pub fn scales_with(pc: u8) -> Vec<ScaleLabel> {
    ScaleIndex::global().scales_containing(pc).iter().collect()
}
