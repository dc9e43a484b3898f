//! Validate command implementation
//!
//! Validates a battery configuration file and reports every problem found.

use anyhow::{Context, Result};
use colored::Colorize;
use earcheck_spec::{validate_config, BatteryConfig, ValidationResult};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{JsonError, JsonWarning, ValidateOutput};

/// Run the validate command
///
/// # Arguments
/// * `config_path` - Path to the configuration file
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(config_path: &str, json_output: bool) -> Result<ExitCode> {
    let config = BatteryConfig::load(Path::new(config_path))
        .with_context(|| format!("Failed to load config file: {}", config_path))?;
    let result = validate_config(&config);
    let ok = result.is_ok();

    if json_output {
        let output = to_output(config_path, &result);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_human(config_path, &result);
    }

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::from(1) })
}

fn to_output(config_path: &str, result: &ValidationResult) -> ValidateOutput {
    ValidateOutput {
        success: result.is_ok(),
        config: config_path.to_string(),
        errors: result.errors.iter().map(JsonError::from).collect(),
        warnings: result.warnings.iter().map(JsonWarning::from).collect(),
    }
}

fn print_human(config_path: &str, result: &ValidationResult) {
    println!("{} {}", "Validating:".cyan().bold(), config_path);

    for warning in &result.warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
    for error in &result.errors {
        println!("  {} {}", "x".red(), error);
    }

    if result.is_ok() {
        println!("{} configuration is valid", "ok".green().bold());
    } else {
        println!(
            "{} {} error(s) found",
            "FAILED".red().bold(),
            result.errors.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use earcheck_spec::TrialLevel;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_output_collects_every_error() {
        let mut config = BatteryConfig::default();
        config.melody.levels = vec![TrialLevel::new(12, 3)];
        config.pitch.levels.clear();
        let output = to_output("battery.json", &validate_config(&config));
        assert!(!output.success);
        assert_eq!(output.errors.len(), 2);
        assert!(output
            .errors
            .iter()
            .any(|e| e.path.as_deref() == Some("pitch.levels")));
    }

    #[test]
    fn test_exit_code_follows_validity() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        std::fs::write(&good, "{}").unwrap();
        let code = run(good.to_str().unwrap(), true).unwrap();
        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::SUCCESS));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, r#"{"melody": {"octaves": 9}}"#).unwrap();
        let code = run(bad.to_str().unwrap(), true).unwrap();
        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::from(1)));
    }
}
