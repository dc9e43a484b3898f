//! earcheck battery specification library
//!
//! This crate provides the configuration, validation, and reporting types shared
//! by every earcheck crate. A battery is described by a JSON document with one
//! section per discrimination task (pitch, rhythm, melody).
//!
//! # Example
//!
//! ```
//! use earcheck_spec::{validate_config, BatteryConfig, TrialLevel};
//!
//! let mut config = BatteryConfig::default();
//! config.melody.levels = vec![TrialLevel::new(5, 2)];
//!
//! let result = validate_config(&config);
//! assert!(result.is_ok());
//! ```
//!
//! # Modules
//!
//! - [`config`]: Battery and per-task configuration with reference defaults
//! - [`error`]: Error and warning codes, the [`CodedError`] trait
//! - [`report`]: Scoreboard and session report types
//! - [`validation`]: Configuration validation

pub mod config;
pub mod error;
pub mod report;
pub mod validation;

pub use config::{
    total_quota, BatteryConfig, MelodyConfig, PitchConfig, RhythmConfig, TaskKind, TrialLevel,
    MAX_MELODY_LENGTH, MAX_OCTAVES, MIN_MELODY_LENGTH, MIN_RHYTHM_LENGTH,
};
pub use error::{
    CodedError, ConfigError, ErrorCode, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use report::{Scoreboard, SessionOutcome, SessionReport, TrialRecord};
pub use validation::validate_config;
