//! Battery configuration loading for commands that accept `--config`.

use anyhow::{bail, Context, Result};
use earcheck_spec::{validate_config, BatteryConfig};
use std::path::Path;
use tracing::{debug, warn};

/// Loads and validates a battery configuration, or returns the defaults when
/// no path is given.
///
/// Validation warnings are logged; validation errors fail the load.
pub fn load_battery(path: Option<&str>) -> Result<BatteryConfig> {
    let config = match path {
        Some(path) => BatteryConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load config file: {}", path))?,
        None => {
            debug!("no config file given, using defaults");
            BatteryConfig::default()
        }
    };

    match validate_config(&config).into_result() {
        Ok(warnings) => {
            for warning in warnings {
                warn!(code = %warning.code, "{}", warning);
            }
            Ok(config)
        }
        Err(errors) => {
            let listed: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            bail!(
                "invalid configuration ({} error(s)):\n  {}",
                errors.len(),
                listed.join("\n  ")
            )
        }
    }
}
