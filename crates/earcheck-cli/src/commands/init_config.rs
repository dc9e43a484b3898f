//! Init-config command implementation
//!
//! Prints the reference battery configuration as a starting point for edits.

use anyhow::{Context, Result};
use colored::Colorize;
use earcheck_spec::BatteryConfig;
use std::fs;
use std::process::ExitCode;

/// Run the init-config command
///
/// # Arguments
/// * `output` - Optional file to write instead of stdout
///
/// # Returns
/// Exit code: 0 on success
pub fn run(output: Option<&str>) -> Result<ExitCode> {
    let json = BatteryConfig::default().to_json_pretty()?;
    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write config file: {}", path))?;
            println!("{} {}", "Wrote:".green().bold(), path);
        }
        None => println!("{}", json),
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_written_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("battery.json");
        run(Some(path.to_str().unwrap())).unwrap();
        let loaded = BatteryConfig::load(&path).unwrap();
        assert_eq!(loaded, BatteryConfig::default());
    }
}
