//! Error types for settings validation and processing.

use thiserror::Error;

/// Error codes for settings validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Output-size factor is not 0, 10 or 20
    UnsupportedOutputSize,
    /// E002: Font size is not a positive pixel value
    InvalidFontSize,
    /// E003: Output base name is empty
    EmptyOutputName,
    /// E004: Outline stroke width is outside 0..=MAX_OUTLINE_SIZE
    OutlineSizeOutOfRange,
    /// E005: Output base name contains a line break
    LineBreakInOutputName,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedOutputSize => "E001",
            ErrorCode::InvalidFontSize => "E002",
            ErrorCode::EmptyOutputName => "E003",
            ErrorCode::OutlineSizeOutOfRange => "E004",
            ErrorCode::LineBreakInOutputName => "E005",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for settings validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: A numeric field was not a number and was replaced with 0
    NumberSubstituted,
    /// W002: No font file configured for the font family
    MissingFontPath,
    /// W003: Output-size factor absent, 512x256 default applies
    DefaultOutputSize,
    /// W004: Output name contains characters outside Latin-1
    NonLatin1OutputName,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::NumberSubstituted => "W001",
            WarningCode::MissingFontPath => "W002",
            WarningCode::DefaultOutputSize => "W003",
            WarningCode::NonLatin1OutputName => "W004",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and the settings field it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Settings field name (e.g., "outline_color").
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

    /// Creates a new validation error for a field.
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

/// A validation warning with code, message, and optional field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Settings field name.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning for a field.
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

/// Top-level error type for settings operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Codepage label outside the supported set.
    #[error("unsupported codepage '{0}' (expected windows-1250, windows-1251, windows-1252 or windows-1254)")]
    UnsupportedCodepage(String),

    /// Color string could not be parsed.
    #[error("invalid color '{0}' (expected #rgb, #rrggbb or #rrggbbaa)")]
    InvalidColor(String),

    /// Font size could not be parsed.
    #[error("invalid font size '{0}' (expected a positive pixel value such as \"30px\")")]
    InvalidFontSize(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Result of settings validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_path() {
        let err = ValidationError::with_path(
            ErrorCode::InvalidFontSize,
            "invalid font size 'big'",
            "font_size",
        );
        assert_eq!(
            err.to_string(),
            "E002: invalid font size 'big' (at font_size)"
        );
    }

    #[test]
    fn test_result_tracks_errors() {
        let mut result = ValidationResult::default();
        assert!(result.is_ok());
        result.add_warning(ValidationWarning::new(
            WarningCode::MissingFontPath,
            "no font file",
        ));
        assert!(result.is_ok());
        result.add_error(ValidationError::new(ErrorCode::EmptyOutputName, "empty"));
        assert!(!result.is_ok());
        assert_eq!(result.into_result().unwrap_err().len(), 1);
    }
}
