//! Settings validation logic.

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::settings::{LenientInt, Settings};

/// Output-size factors the atlas planner accepts. 0 selects the default.
pub const SUPPORTED_OUTPUT_SIZES: [u32; 3] = [0, 10, 20];

/// Widest outline stroke, in pixels.
pub const MAX_OUTLINE_SIZE: i32 = 16;

/// Validates settings and returns a validation result.
///
/// Codepage and color fields are already checked when the document is
/// deserialized; this covers the remaining fields.
///
/// # Example
/// ```
/// use zenfont_spec::{Settings, validate_settings};
///
/// let settings = Settings::default().with_output_size(10);
/// assert!(validate_settings(&settings).is_ok());
///
/// let settings = Settings::default().with_output_size(15);
/// assert!(!validate_settings(&settings).is_ok());
/// ```
pub fn validate_settings(settings: &Settings) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_output_size(settings, &mut result);
    validate_font_size(settings, &mut result);
    validate_output_name(settings, &mut result);
    validate_outline_size(settings, &mut result);
    check_lenient_fields(settings, &mut result);

    if settings.font_path.is_none() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::MissingFontPath,
            format!(
                "no font file configured for family '{}'; pass one with --font",
                settings.font
            ),
            "font_path",
        ));
    }

    result
}

fn validate_output_size(settings: &Settings, result: &mut ValidationResult) {
    if !SUPPORTED_OUTPUT_SIZES.contains(&settings.output_size) {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsupportedOutputSize,
            format!(
                "output_size must be 10 or 20, got {}",
                settings.output_size
            ),
            "output_size",
        ));
    } else if settings.output_size == 0 {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::DefaultOutputSize,
            "output_size is 0, using 512x256",
            "output_size",
        ));
    }
}

fn validate_font_size(settings: &Settings, result: &mut ValidationResult) {
    if let Err(e) = settings.font_px() {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidFontSize,
            e.to_string(),
            "font_size",
        ));
    }
}

fn validate_output_name(settings: &Settings, result: &mut ValidationResult) {
    if settings.output_name.trim().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyOutputName,
            "output_name must not be empty",
            "output_name",
        ));
        return;
    }

    if settings.output_name.contains(&['\n', '\r'][..]) {
        result.add_error(ValidationError::with_path(
            ErrorCode::LineBreakInOutputName,
            "output_name must be a single line",
            "output_name",
        ));
    }

    if settings.output_name.to_uppercase().chars().any(|c| c as u32 > 0xff) {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::NonLatin1OutputName,
            "output_name has characters outside Latin-1; they are clamped to 0xFF in the descriptor",
            "output_name",
        ));
    }
}

fn validate_outline_size(settings: &Settings, result: &mut ValidationResult) {
    let size = settings.outline_size.value();
    if settings.outline && !(0..=MAX_OUTLINE_SIZE).contains(&size) {
        result.add_error(ValidationError::with_path(
            ErrorCode::OutlineSizeOutOfRange,
            format!(
                "outline_size must be between 0 and {}, got {}",
                MAX_OUTLINE_SIZE, size
            ),
            "outline_size",
        ));
    }
}

fn check_lenient_fields(settings: &Settings, result: &mut ValidationResult) {
    let fields: [(&str, &LenientInt); 5] = [
        ("outline_size", &settings.outline_size),
        ("uv_adjust_left", &settings.uv_adjust_left),
        ("uv_adjust_right", &settings.uv_adjust_right),
        ("uv_adjust_top", &settings.uv_adjust_top),
        ("uv_adjust_bottom", &settings.uv_adjust_bottom),
    ];
    for (name, value) in fields {
        if value.was_substituted() {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::NumberSubstituted,
                format!("{} is not a number, using 0", name),
                name,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn valid_settings() -> Settings {
        Settings {
            font_path: Some(PathBuf::from("fonts/arial.ttf")),
            ..Settings::default()
        }
    }

    #[test]
    fn test_default_settings_valid() {
        let result = validate_settings(&valid_settings());
        assert!(result.is_ok());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_font_path_warns() {
        let result = validate_settings(&Settings::default());
        assert!(result.is_ok());
        assert_eq!(result.warnings[0].code, WarningCode::MissingFontPath);
    }

    #[test]
    fn test_output_size_rules() {
        for size in [10, 20] {
            assert!(validate_settings(&valid_settings().with_output_size(size)).is_ok());
        }

        let result = validate_settings(&valid_settings().with_output_size(0));
        assert!(result.is_ok());
        assert_eq!(result.warnings[0].code, WarningCode::DefaultOutputSize);

        let result = validate_settings(&valid_settings().with_output_size(30));
        assert_eq!(result.errors[0].code, ErrorCode::UnsupportedOutputSize);
    }

    #[test]
    fn test_bad_font_size_and_name() {
        let mut settings = valid_settings().with_output_name("  ");
        settings.font_size = "huge".to_string();
        let errors = validate_settings(&settings).into_result().unwrap_err();
        let codes: Vec<_> = errors.iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![ErrorCode::InvalidFontSize, ErrorCode::EmptyOutputName]);
    }

    #[test]
    fn test_non_latin1_name_warns() {
        let result = validate_settings(&valid_settings().with_output_name("Шрифт"));
        assert!(result.is_ok());
        assert_eq!(result.warnings[0].code, WarningCode::NonLatin1OutputName);
    }

    #[test]
    fn test_outline_size_bounds() {
        let settings = valid_settings().with_outline(true, MAX_OUTLINE_SIZE);
        assert!(validate_settings(&settings).is_ok());

        for size in [MAX_OUTLINE_SIZE + 1, 1_000_000_000, -3] {
            let result = validate_settings(&valid_settings().with_outline(true, size));
            assert_eq!(result.errors[0].code, ErrorCode::OutlineSizeOutOfRange);
            assert_eq!(result.errors[0].path.as_deref(), Some("outline_size"));
        }

        // A disabled outline is never stroked.
        let settings = valid_settings().with_outline(false, 1_000_000_000);
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_line_break_in_name_rejected() {
        for name in ["My\nFont", "My\r\nFont"] {
            let result = validate_settings(&valid_settings().with_output_name(name));
            assert_eq!(result.errors.len(), 1);
            assert_eq!(result.errors[0].code, ErrorCode::LineBreakInOutputName);
        }
    }

    #[test]
    fn test_substituted_numbers_warn() {
        let mut settings = valid_settings();
        settings.uv_adjust_top = LenientInt::parse("top");
        let result = validate_settings(&settings);
        assert!(result.is_ok());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path.as_deref(), Some("uv_adjust_top"));
    }
}
