//! Generate command implementation
//!
//! Renders the atlas for a settings file and writes the TGA and FNT pairs.

mod human;
mod json;


use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use zenfont_backend::{
    render_atlas, FontdueBackend, GlyphBackend, RenderError, RenderResult, TextError, Variant,
};
use zenfont_spec::{
    validate_settings, FntPolicy, Settings, ValidationError, ValidationWarning,
};

use crate::export::{export_blocking, write_artifacts, ExportError, ExportReport};
use crate::input::{load_settings, InputError, SettingsOverrides};

/// Creates the glyph backend for a settings document.
pub type BackendLoader = fn(&Settings) -> Result<Box<dyn GlyphBackend>, TextError>;

/// Options of one generate run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Output directory (default: current directory)
    pub out_dir: Option<String>,
    /// Fields replaced from flags
    pub overrides: SettingsOverrides,
    /// Saturate widths and reject non-Latin-1 names instead of wrapping and clamping
    pub strict: bool,
    /// Output machine-readable JSON
    pub json: bool,
}

impl GenerateOptions {
    pub(crate) fn policy(&self) -> FntPolicy {
        if self.strict {
            FntPolicy::Strict
        } else {
            FntPolicy::Reference
        }
    }

    pub(crate) fn out_dir(&self) -> &Path {
        Path::new(self.out_dir.as_deref().unwrap_or("."))
    }
}

/// Run the generate command
///
/// # Returns
/// Exit code: 0 success, 1 settings error, 2 render or export error
pub fn run(settings_path: &str, options: &GenerateOptions) -> Result<ExitCode> {
    run_with_loader(settings_path, options, load_font_backend)
}

/// Run the generate command with a custom glyph backend.
pub fn run_with_loader(
    settings_path: &str,
    options: &GenerateOptions,
    loader: BackendLoader,
) -> Result<ExitCode> {
    if options.json {
        json::run_json(settings_path, options, loader)
    } else {
        human::run_human(settings_path, options, loader)
    }
}

fn load_font_backend(settings: &Settings) -> Result<Box<dyn GlyphBackend>, TextError> {
    Ok(Box::new(FontdueBackend::from_settings(settings)?))
}

/// Settings that passed loading and validation.
#[derive(Debug)]
pub(crate) struct Prepared {
    pub settings: Settings,
    pub source_hash: String,
    pub warnings: Vec<ValidationWarning>,
}

/// Why settings could not be prepared.
#[derive(Debug)]
pub(crate) enum PrepareError {
    Load(InputError),
    Invalid {
        errors: Vec<ValidationError>,
        warnings: Vec<ValidationWarning>,
    },
}

/// Loads settings, applies overrides and validates them.
pub(crate) fn prepare(
    settings_path: &str,
    overrides: &SettingsOverrides,
) -> Result<Prepared, PrepareError> {
    let loaded = load_settings(Path::new(settings_path)).map_err(PrepareError::Load)?;
    let settings = overrides.apply(loaded.settings);
    let validation = validate_settings(&settings);
    let warnings = validation.warnings.clone();
    match validation.into_result() {
        Ok(_) => Ok(Prepared {
            settings,
            source_hash: loaded.source_hash,
            warnings,
        }),
        Err(errors) => Err(PrepareError::Invalid { errors, warnings }),
    }
}

/// Errors after settings were accepted.
#[derive(Debug, Error)]
pub(crate) enum GenerateError {
    #[error("failed to load font: {0}")]
    Font(#[from] TextError),

    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    #[error("export failed: {0}")]
    Export(ExportError),

    #[error(transparent)]
    Write(ExportError),
}

/// Rendered atlas plus what was exported and written.
#[derive(Debug)]
pub(crate) struct Generated {
    pub render: RenderResult,
    pub report: ExportReport,
    pub written: Vec<PathBuf>,
}

/// Renders, exports and writes the artifacts that succeeded.
pub(crate) fn generate(
    settings: &Settings,
    loader: BackendLoader,
    out_dir: &Path,
    policy: FntPolicy,
) -> Result<Generated, GenerateError> {
    let backend = loader(settings)?;
    let render = render_atlas(settings, backend.as_ref(), Variant::Base)?;

    let report = export_blocking(
        &render.atlas,
        &render.descriptor,
        &settings.output_name,
        policy,
    )
    .map_err(GenerateError::Export)?;

    let written = write_artifacts(out_dir, &report.artifacts()).map_err(GenerateError::Write)?;

    Ok(Generated {
        render,
        report,
        written,
    })
}
