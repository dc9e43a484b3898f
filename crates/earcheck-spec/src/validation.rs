//! Battery configuration validation.
//!
//! Validation never stops at the first problem: every error and warning in
//! the document is collected so the caller can report them together.

use crate::config::{
    BatteryConfig, MelodyConfig, PitchConfig, RhythmConfig, TrialLevel, MAX_MELODY_LENGTH,
    MAX_OCTAVES, MIN_MELODY_LENGTH, MIN_RHYTHM_LENGTH,
};
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};

/// Validates every task section of a battery configuration.
///
/// # Example
/// ```
/// use earcheck_spec::{validate_config, BatteryConfig};
///
/// let result = validate_config(&BatteryConfig::default());
/// assert!(result.is_ok());
/// assert!(result.warnings.is_empty());
/// ```
pub fn validate_config(config: &BatteryConfig) -> ValidationResult {
    let mut result = ValidationResult::default();
    validate_pitch(&config.pitch, &mut result);
    validate_rhythm(&config.rhythm, &mut result);
    validate_melody(&config.melody, &mut result);
    result
}

/// Validates the pitch section.
pub fn validate_pitch(config: &PitchConfig, result: &mut ValidationResult) {
    check_frequency(config.base_frequency_hz, "pitch.base_frequency_hz", result);
    check_levels(&config.levels, "pitch", result);

    for (i, level) in config.levels.iter().enumerate() {
        if !level.difficulty.is_finite() || level.difficulty <= 0.0 {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidDifference,
                format!(
                    "pitch difference must be a positive number of Hz, got {}",
                    level.difficulty
                ),
                format!("pitch.levels[{}].difficulty", i),
            ));
        }
    }
}

/// Validates the rhythm section.
pub fn validate_rhythm(config: &RhythmConfig, result: &mut ValidationResult) {
    check_frequency(config.tone_frequency_hz, "rhythm.tone_frequency_hz", result);
    check_levels(&config.levels, "rhythm", result);

    let click_ms = config.tone_length_ms + config.release_ms;
    for (i, &ioi) in config.palette_ms.iter().enumerate() {
        if ioi < click_ms {
            result.add_error(ValidationError::with_path(
                ErrorCode::ToneExceedsInterval,
                format!(
                    "interval of {} ms is shorter than a {} ms click",
                    ioi, click_ms
                ),
                format!("rhythm.palette_ms[{}]", i),
            ));
        }
    }

    let mut distinct = config.palette_ms.clone();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() < 2 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidPalette,
            format!(
                "palette needs at least 2 distinct intervals, got {}",
                distinct.len()
            ),
            "rhythm.palette_ms",
        ));
    }

    for (name, p) in [
        ("same_probability", config.same_probability),
        ("rotate_only_probability", config.rotate_only_probability),
        ("swap_only_probability", config.swap_only_probability),
    ] {
        if !(0.0..=1.0).contains(&p) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidProbability,
                format!("probability must be in [0, 1], got {}", p),
                format!("rhythm.{}", name),
            ));
        }
    }
    let mix = config.rotate_only_probability + config.swap_only_probability;
    if mix > 1.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidProbability,
            format!(
                "rotate-only and swap-only probabilities sum to {}, must not exceed 1",
                mix
            ),
            "rhythm",
        ));
    }

    for (i, level) in config.levels.iter().enumerate() {
        if level.difficulty < MIN_RHYTHM_LENGTH {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidRhythmLength,
                format!(
                    "rhythm length must be at least {}, got {}",
                    MIN_RHYTHM_LENGTH, level.difficulty
                ),
                format!("rhythm.levels[{}].difficulty", i),
            ));
        }
    }
}

/// Validates the melody section.
pub fn validate_melody(config: &MelodyConfig, result: &mut ValidationResult) {
    check_levels(&config.levels, "melody", result);

    if config.tone_duration_ms > config.tone_interval_ms {
        result.add_error(ValidationError::with_path(
            ErrorCode::ToneExceedsInterval,
            format!(
                "tone duration {} ms exceeds the {} ms tone interval",
                config.tone_duration_ms, config.tone_interval_ms
            ),
            "melody.tone_duration_ms",
        ));
    }

    let octaves_ok = (1..=MAX_OCTAVES).contains(&config.octaves);
    if !octaves_ok {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidOctaves,
            format!(
                "octaves must be between 1 and {}, got {}",
                MAX_OCTAVES, config.octaves
            ),
            "melody.octaves",
        ));
    }
    let note_count = config.octaves as usize * 12;

    for (i, level) in config.levels.iter().enumerate() {
        let len = level.difficulty;
        let path = format!("melody.levels[{}].difficulty", i);
        if !(MIN_MELODY_LENGTH..=MAX_MELODY_LENGTH).contains(&len) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidMelodyLength,
                format!(
                    "melody length must be between {} and {}, got {}",
                    MIN_MELODY_LENGTH, MAX_MELODY_LENGTH, len
                ),
                path,
            ));
        } else if octaves_ok && len > note_count {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidMelodyLength,
                format!(
                    "melody length {} needs more than the {} notes available",
                    len, note_count
                ),
                path,
            ));
        }
    }
}

fn check_frequency(freq: f64, path: &str, result: &mut ValidationResult) {
    if !freq.is_finite() || freq <= 0.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidFrequency,
            format!("frequency must be a positive number of Hz, got {}", freq),
            path,
        ));
    }
}

fn check_levels<D>(levels: &[TrialLevel<D>], task: &str, result: &mut ValidationResult) {
    if levels.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::NoLevels,
            "at least one level is required",
            format!("{}.levels", task),
        ));
        return;
    }

    for (i, level) in levels.iter().enumerate() {
        if level.trials == 0 {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::ZeroQuotaLevel,
                "level has no trials and will be skipped",
                format!("{}.levels[{}].trials", task, i),
            ));
        }
    }
    if levels.iter().all(|l| l.trials == 0) {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::NoTrials,
            format!("the {} task runs no trials", task),
            format!("{}.levels", task),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn codes(result: &ValidationResult) -> Vec<ErrorCode> {
        result.errors.iter().map(|e| e.code).collect()
    }

    #[test]
    fn test_default_config_is_valid() {
        let result = validate_config(&BatteryConfig::default());
        assert!(result.is_ok(), "{:?}", result.errors);
    }

    #[test]
    fn test_empty_levels() {
        let mut config = BatteryConfig::default();
        config.melody.levels.clear();
        let result = validate_config(&config);
        assert_eq!(codes(&result), vec![ErrorCode::NoLevels]);
        assert_eq!(result.errors[0].path.as_deref(), Some("melody.levels"));
    }

    #[test]
    fn test_melody_length_bounds() {
        let mut config = BatteryConfig::default();
        config.melody.levels = vec![TrialLevel::new(3, 1), TrialLevel::new(10, 1)];
        let result = validate_config(&config);
        assert_eq!(
            codes(&result),
            vec![ErrorCode::InvalidMelodyLength, ErrorCode::InvalidMelodyLength]
        );
    }

    #[test]
    fn test_melody_length_exceeds_one_octave() {
        let mut config = BatteryConfig::default();
        config.melody.octaves = 1;
        config.melody.levels = vec![TrialLevel::new(9, 1)];
        assert!(validate_config(&config).is_ok());

        config.melody.octaves = 0;
        let result = validate_config(&config);
        assert_eq!(codes(&result), vec![ErrorCode::InvalidOctaves]);
    }

    #[test]
    fn test_melody_tone_longer_than_interval() {
        let mut config = BatteryConfig::default();
        config.melody.tone_duration_ms = 700;
        let result = validate_config(&config);
        assert_eq!(codes(&result), vec![ErrorCode::ToneExceedsInterval]);
    }

    #[test]
    fn test_rhythm_palette_problems() {
        let mut config = BatteryConfig::default();
        config.rhythm.palette_ms = vec![50, 50];
        let result = validate_config(&config);
        assert_eq!(
            codes(&result),
            vec![
                ErrorCode::ToneExceedsInterval,
                ErrorCode::ToneExceedsInterval,
                ErrorCode::InvalidPalette
            ]
        );
    }

    #[test]
    fn test_rhythm_probability_mix() {
        let mut config = BatteryConfig::default();
        config.rhythm.rotate_only_probability = 0.7;
        config.rhythm.same_probability = 1.5;
        let result = validate_config(&config);
        assert_eq!(
            codes(&result),
            vec![ErrorCode::InvalidProbability, ErrorCode::InvalidProbability]
        );
    }

    #[test]
    fn test_rhythm_length_too_short() {
        let mut config = BatteryConfig::default();
        config.rhythm.levels = vec![TrialLevel::new(1, 4)];
        assert_eq!(
            codes(&validate_config(&config)),
            vec![ErrorCode::InvalidRhythmLength]
        );
    }

    #[test]
    fn test_pitch_difference_and_frequency() {
        let mut config = BatteryConfig::default();
        config.pitch.base_frequency_hz = 0.0;
        config.pitch.levels = vec![TrialLevel::new(-2.0, 1)];
        assert_eq!(
            codes(&validate_config(&config)),
            vec![ErrorCode::InvalidFrequency, ErrorCode::InvalidDifference]
        );
    }

    #[test]
    fn test_zero_quota_warnings() {
        let mut config = BatteryConfig::default();
        config.pitch.levels = vec![TrialLevel::new(5.0, 0)];
        let result = validate_config(&config);
        assert!(result.is_ok());
        let warnings: Vec<WarningCode> = result.warnings.iter().map(|w| w.code).collect();
        assert_eq!(
            warnings,
            vec![WarningCode::ZeroQuotaLevel, WarningCode::NoTrials]
        );
    }
}
