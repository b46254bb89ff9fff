//! Settings loading and command-line overrides.
//!
//! Settings documents are JSON files. Loading hashes the raw file content so
//! reports can tell which document produced an atlas.

use std::path::{Path, PathBuf};
use zenfont_spec::{Codepage, Settings};

/// Recognized settings extensions.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// Result of loading a settings document.
#[derive(Debug)]
pub struct LoadResult {
    /// The parsed settings.
    pub settings: Settings,
    /// BLAKE3 hash of the file content (hex string).
    pub source_hash: String,
}

/// Errors that can occur while loading settings.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Unknown file extension.
    UnknownExtension { extension: Option<String> },

    /// Document is not valid settings JSON.
    JsonParse { message: String },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::UnknownExtension { extension } => match extension {
                Some(ext) => write!(f, "unknown file extension '.{}' (expected .json)", ext),
                None => write!(f, "file has no extension (expected .json)"),
            },
            InputError::JsonParse { message } => {
                write!(f, "settings parse error: {}", message)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Load settings from a JSON file.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use zenfont_cli::input::load_settings;
///
/// let result = load_settings(Path::new("zenfont.json")).unwrap();
/// println!("Loaded {} settings", result.settings.codepage);
/// ```
pub fn load_settings(path: &Path) -> Result<LoadResult, InputError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some(ext) if JSON_EXTENSIONS.contains(&ext) => {}
        _ => return Err(InputError::UnknownExtension { extension }),
    }

    let content = std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();

    let settings = Settings::from_json(&content).map_err(|e| InputError::JsonParse {
        message: e.to_string(),
    })?;

    Ok(LoadResult {
        settings,
        source_hash,
    })
}

/// Settings fields replaced from command-line flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverrides {
    pub font_path: Option<PathBuf>,
    pub codepage: Option<Codepage>,
    pub output_size: Option<u32>,
    pub output_name: Option<String>,
}

impl SettingsOverrides {
    /// Returns true if no field is overridden.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Applies the overrides to `settings`.
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(path) = &self.font_path {
            settings.font_path = Some(path.clone());
        }
        if let Some(codepage) = self.codepage {
            settings.codepage = codepage;
        }
        if let Some(size) = self.output_size {
            settings.output_size = size;
        }
        if let Some(name) = &self.output_name {
            settings.output_name = name.clone();
        }
        settings
    }
}

/// Parses a codepage flag value.
pub fn parse_codepage(value: &str) -> Result<Codepage, String> {
    value.parse::<Codepage>().map_err(|e| e.to_string())
}
