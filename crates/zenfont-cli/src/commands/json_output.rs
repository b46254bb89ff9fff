//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag on `generate` and `inspect`.

use serde::{Deserialize, Serialize};
use zenfont_spec::{ValidationError, ValidationWarning};

/// Error codes for CLI operations.
///
/// Validation errors pass their own codes (`E001`...) through unchanged.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Unknown file extension
    pub const UNKNOWN_EXTENSION: &str = "CLI_002";
    /// Settings JSON could not be parsed
    pub const SETTINGS_PARSE: &str = "CLI_003";
    /// Font could not be loaded or atlas could not be rendered
    pub const RENDER: &str = "CLI_004";
    /// Image or descriptor export failed
    pub const EXPORT: &str = "CLI_005";
    /// Artifact could not be written
    pub const WRITE: &str = "CLI_006";
    /// Descriptor file could not be decoded
    pub const FNT_DECODE: &str = "CLI_007";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Settings field the error refers to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonError {
    /// Creates an error without a field path.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }
}

impl From<&ValidationError> for JsonError {
    fn from(err: &ValidationError) -> Self {
        Self {
            code: err.code.to_string(),
            message: err.message.clone(),
            path: err.path.clone(),
        }
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    pub code: String,
    pub message: String,
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

/// One written artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactRecord {
    pub file_name: String,
    /// Path the artifact was written to.
    pub path: String,
    pub size: usize,
    /// BLAKE3 hex digest
    pub blake3: String,
}

/// Atlas geometry of a render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AtlasInfo {
    pub width: u32,
    pub height: u32,
    pub cell_width: f64,
    pub cell_height: f64,
    pub codepage: String,
    pub descriptor_name: String,
}

/// Output of `generate --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateOutput {
    pub success: bool,
    /// Settings file path
    pub settings: String,
    /// BLAKE3 hash of the settings file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atlas: Option<AtlasInfo>,
    pub artifacts: Vec<ArtifactRecord>,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
}

impl GenerateOutput {
    /// An output for a run that stopped with `errors`.
    pub fn failure(settings: &str, errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            settings: settings.to_string(),
            source_hash: None,
            atlas: None,
            artifacts: Vec::new(),
            errors,
            warnings: Vec::new(),
        }
    }
}

/// One populated slot in `inspect --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotRecord {
    pub index: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character: Option<char>,
    pub width: u8,
    pub uv1: [f64; 2],
    pub uv2: [f64; 2],
}

/// Output of `inspect --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectOutput {
    pub success: bool,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letters: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blake3: Option<String>,
    pub slots: Vec<SlotRecord>,
    pub errors: Vec<JsonError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use zenfont_spec::{ErrorCode, WarningCode};

    #[test]
    fn validation_codes_pass_through() {
        let err = ValidationError::with_path(ErrorCode::EmptyOutputName, "empty", "output_name");
        let json = JsonError::from(&err);
        assert_eq!(json.code, "E003");
        assert_eq!(json.path.as_deref(), Some("output_name"));

        let warning = ValidationWarning::new(WarningCode::MissingFontPath, "no font");
        assert_eq!(JsonWarning::from(&warning).code, "W002");
    }

    #[test]
    fn failure_output_serializes_without_optional_fields() {
        let output = GenerateOutput::failure(
            "font.json",
            vec![JsonError::new(error_codes::FILE_READ, "missing")],
        );
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("atlas").is_none());
        assert!(value.get("source_hash").is_none());
        assert_eq!(value["errors"][0]["code"], "CLI_001");
        assert!(value["errors"][0].get("path").is_none());
    }
}
