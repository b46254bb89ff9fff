//! JSON output mode for the generate command.

use anyhow::Result;
use std::process::ExitCode;

use super::{generate, prepare, BackendLoader, GenerateError, GenerateOptions, PrepareError};
use crate::commands::json_output::{
    error_codes, ArtifactRecord, AtlasInfo, GenerateOutput, JsonError, JsonWarning,
};
use crate::input::InputError;

/// Run generate with machine-readable JSON output.
pub fn run_json(
    settings_path: &str,
    options: &GenerateOptions,
    loader: BackendLoader,
) -> Result<ExitCode> {
    let (output, code) = build_output(settings_path, options, loader);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

pub(super) fn build_output(
    settings_path: &str,
    options: &GenerateOptions,
    loader: BackendLoader,
) -> (GenerateOutput, ExitCode) {
    let prepared = match prepare(settings_path, &options.overrides) {
        Ok(prepared) => prepared,
        Err(PrepareError::Load(e)) => {
            let output = GenerateOutput::failure(settings_path, vec![input_error_to_json(&e)]);
            return (output, ExitCode::from(1));
        }
        Err(PrepareError::Invalid { errors, warnings }) => {
            let mut output =
                GenerateOutput::failure(settings_path, errors.iter().map(JsonError::from).collect());
            output.warnings = warnings.iter().map(JsonWarning::from).collect();
            return (output, ExitCode::from(1));
        }
    };

    let mut output = GenerateOutput {
        success: false,
        settings: settings_path.to_string(),
        source_hash: Some(prepared.source_hash.clone()),
        atlas: None,
        artifacts: Vec::new(),
        errors: Vec::new(),
        warnings: prepared.warnings.iter().map(JsonWarning::from).collect(),
    };

    let settings = &prepared.settings;
    let generated = match generate(settings, loader, options.out_dir(), options.policy()) {
        Ok(generated) => generated,
        Err(e) => {
            let code = match e {
                GenerateError::Font(_) | GenerateError::Render(_) => error_codes::RENDER,
                GenerateError::Export(_) => error_codes::EXPORT,
                GenerateError::Write(_) => error_codes::WRITE,
            };
            output.errors.push(JsonError::new(code, e.to_string()));
            return (output, ExitCode::from(2));
        }
    };

    let plan = &generated.render.plan;
    output.atlas = Some(AtlasInfo {
        width: plan.width,
        height: plan.height,
        cell_width: plan.cell_width,
        cell_height: plan.cell_height,
        codepage: settings.codepage.to_string(),
        descriptor_name: generated.render.descriptor.name.clone(),
    });

    output.artifacts = generated
        .report
        .artifacts()
        .into_iter()
        .zip(&generated.written)
        .map(|(artifact, path)| ArtifactRecord {
            file_name: artifact.file_name.clone(),
            path: path.display().to_string(),
            size: artifact.len(),
            blake3: artifact.hash(),
        })
        .collect();

    output.errors = generated
        .report
        .errors()
        .into_iter()
        .map(|e| JsonError::new(error_codes::EXPORT, e.to_string()))
        .collect();

    output.success = generated.report.is_ok();
    let code = if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    };
    (output, code)
}

fn input_error_to_json(e: &InputError) -> JsonError {
    let code = match e {
        InputError::FileRead { .. } => error_codes::FILE_READ,
        InputError::UnknownExtension { .. } => error_codes::UNKNOWN_EXTENSION,
        InputError::JsonParse { .. } => error_codes::SETTINGS_PARSE,
    };
    JsonError::new(code, e.to_string())
}
