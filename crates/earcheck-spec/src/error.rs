//! Error types for configuration validation and loading.

use thiserror::Error;

/// Error codes for configuration validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Task declares no trial levels
    NoLevels,
    /// E002: Tone frequency is not a positive finite number
    InvalidFrequency,
    /// E003: Tone lasts longer than the interval it is scheduled in
    ToneExceedsInterval,
    /// E004: Probability outside [0, 1] or probabilities summing above 1
    InvalidProbability,
    /// E005: Rhythm palette unusable (too short or not enough distinct values)
    InvalidPalette,
    /// E006: Melody length outside the supported range
    InvalidMelodyLength,
    /// E007: Rhythm length too short to be modified
    InvalidRhythmLength,
    /// E008: Octave count outside the note table
    InvalidOctaves,
    /// E009: Pitch difference is not a positive finite number
    InvalidDifference,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::NoLevels => "E001",
            ErrorCode::InvalidFrequency => "E002",
            ErrorCode::ToneExceedsInterval => "E003",
            ErrorCode::InvalidProbability => "E004",
            ErrorCode::InvalidPalette => "E005",
            ErrorCode::InvalidMelodyLength => "E006",
            ErrorCode::InvalidRhythmLength => "E007",
            ErrorCode::InvalidOctaves => "E008",
            ErrorCode::InvalidDifference => "E009",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for configuration validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: A level has a zero trial quota and will be skipped
    ZeroQuotaLevel,
    /// W002: A task runs no trials at all
    NoTrials,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::ZeroQuotaLevel => "W001",
            WarningCode::NoTrials => "W002",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "melody.levels\[0\].difficulty").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Errors raised while loading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed with one or more errors.
    #[error("configuration validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodedError for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            ConfigError::ValidationFailed(_) => "CONFIG_001",
            ConfigError::JsonParse(_) => "CONFIG_002",
            ConfigError::Io(_) => "CONFIG_003",
        }
    }

    fn category(&self) -> &'static str {
        "config"
    }
}

/// Result of configuration validation.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

/// Common trait for library errors.
///
/// Every earcheck crate error implements this so the CLI can report a stable
/// code and a category next to the human-readable message.
///
/// # Example
///
/// ```
/// use earcheck_spec::error::CodedError;
///
/// fn describe<E: CodedError>(err: &E) -> String {
///     format!("[{}/{}] {}", err.category(), err.code(), err.message())
/// }
/// ```
pub trait CodedError: std::error::Error {
    /// Stable error code such as "STIMULUS_001".
    fn code(&self) -> &'static str;

    /// Human-readable message; defaults to `Display`.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category such as "stimulus", "audio", "session".
    fn category(&self) -> &'static str;
}
