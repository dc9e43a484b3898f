//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag on `validate` and `generate`. Session
//! reports from `run --json` use [`earcheck_spec::SessionReport`] directly.

use earcheck_backend_stimulus::{GenerationStats, MelodyPair, RhythmPair};
use earcheck_spec::{ValidationError, ValidationWarning};
use serde::Serialize;

/// A structured validation error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "E001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&ValidationError> for JsonError {
    fn from(error: &ValidationError) -> Self {
        Self {
            code: error.code.to_string(),
            message: error.message.clone(),
            path: error.path.clone(),
        }
    }
}

/// A structured validation warning in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// JSON path to the relevant field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&ValidationWarning> for JsonWarning {
    fn from(warning: &ValidationWarning) -> Self {
        Self {
            code: warning.code.to_string(),
            message: warning.message.clone(),
            path: warning.path.clone(),
        }
    }
}

/// Output of `validate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateOutput {
    /// Whether the configuration is valid
    pub success: bool,
    /// Path of the validated file
    pub config: String,
    /// Validation errors
    pub errors: Vec<JsonError>,
    /// Validation warnings
    pub warnings: Vec<JsonWarning>,
}

/// Generated pairs of one stimulus kind.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratedPairs {
    /// Melody pairs with the generator's rejection counters
    Melody {
        /// Generated pairs in order
        pairs: Vec<MelodyPair>,
        /// Rejection-sampling counters across all pairs
        stats: GenerationStats,
    },
    /// Rhythm pairs
    Rhythm {
        /// Generated pairs in order
        pairs: Vec<RhythmPair>,
    },
}

/// Output of `generate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutput {
    /// Seed the pairs were generated from
    pub seed: u32,
    /// Requested length
    pub length: usize,
    /// Generated stimuli
    #[serde(flatten)]
    pub generated: GeneratedPairs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use earcheck_spec::{ErrorCode, WarningCode};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validate_output_skips_missing_path() {
        let output = ValidateOutput {
            success: false,
            config: "battery.json".to_string(),
            errors: vec![JsonError::from(&ValidationError::new(
                ErrorCode::NoLevels,
                "no levels",
            ))],
            warnings: vec![JsonWarning::from(&ValidationWarning::with_path(
                WarningCode::NoTrials,
                "no trials",
                "melody.levels",
            ))],
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["errors"][0]["code"], "E001");
        assert!(json["errors"][0].get("path").is_none());
        assert_eq!(json["warnings"][0]["path"], "melody.levels");
    }

    #[test]
    fn test_generate_output_is_tagged_by_kind() {
        let output = GenerateOutput {
            seed: 3,
            length: 2,
            generated: GeneratedPairs::Rhythm {
                pairs: vec![RhythmPair {
                    original: vec![150, 300],
                    modified: vec![300, 150],
                    attempts: 1,
                }],
            },
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["kind"], "rhythm");
        assert_eq!(json["seed"], 3);
        assert_eq!(json["pairs"][0]["modified"][0], 300);
    }
}
