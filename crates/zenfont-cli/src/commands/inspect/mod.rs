//! Inspect command implementation
//!
//! Decodes an FNT descriptor and prints its header and populated slots.
//! Characters are shown by decoding each slot's byte value under a codepage,
//! since the descriptor itself does not record one.


use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;
use zenfont_backend::{char_for_byte, decode_descriptor, hash_bytes, FntError};
use zenfont_spec::{Codepage, FontDescriptor};

use super::json_output::{error_codes, InspectOutput, JsonError, SlotRecord};

/// Run the inspect command
///
/// # Arguments
/// * `fnt_path` - Path to the FNT descriptor
/// * `codepage` - Codepage used to label slots (default: windows-1250)
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(fnt_path: &str, codepage: Option<Codepage>, json_output: bool) -> Result<ExitCode> {
    let codepage = codepage.unwrap_or_default();
    if json_output {
        run_json(fnt_path, codepage)
    } else {
        run_human(fnt_path, codepage)
    }
}

fn run_human(fnt_path: &str, codepage: Codepage) -> Result<ExitCode> {
    println!("{} {}", "Inspecting:".cyan().bold(), fnt_path);

    let bytes = std::fs::read(fnt_path)
        .with_context(|| format!("Failed to read descriptor: {}", fnt_path))?;
    let descriptor = match decode_descriptor(&bytes) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            println!("\n{} {}", "Decode failed:".red().bold(), e);
            return Ok(ExitCode::from(1));
        }
    };

    println!("{} {}", "Name:".cyan().bold(), descriptor.name);
    println!("{} {}", "Height:".cyan().bold(), descriptor.cell_height);
    println!("{} {}", "Letters:".cyan().bold(), descriptor.letters);
    println!(
        "{} {} bytes ({})",
        "Size:".cyan().bold(),
        bytes.len(),
        &hash_bytes(&bytes)[..16].dimmed()
    );
    println!("{} {}", "Codepage:".dimmed(), codepage);

    println!("\n{}", "Slots:".green().bold());
    for record in slot_records(&descriptor, codepage) {
        let character = record
            .character
            .filter(|c| !c.is_control())
            .map(|c| c.to_string())
            .unwrap_or_else(|| "·".to_string());
        println!(
            "  {:>3} {:<2} w={:<3} uv1=({:.4}, {:.4}) uv2=({:.4}, {:.4})",
            record.index,
            character,
            record.width,
            record.uv1[0],
            record.uv1[1],
            record.uv2[0],
            record.uv2[1]
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn run_json(fnt_path: &str, codepage: Codepage) -> Result<ExitCode> {
    let (output, code) = match std::fs::read(fnt_path) {
        Ok(bytes) => build_output(fnt_path, &bytes, codepage),
        Err(e) => (
            failure(fnt_path, JsonError::new(error_codes::FILE_READ, e.to_string())),
            ExitCode::from(1),
        ),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

/// Builds the JSON report for descriptor bytes.
pub(crate) fn build_output(file: &str, bytes: &[u8], codepage: Codepage) -> (InspectOutput, ExitCode) {
    match decode_descriptor(bytes) {
        Ok(descriptor) => (
            InspectOutput {
                success: true,
                file: file.to_string(),
                name: Some(descriptor.name.clone()),
                height: Some(descriptor.cell_height as u32),
                letters: Some(descriptor.letters),
                size: Some(bytes.len()),
                blake3: Some(hash_bytes(bytes)),
                slots: slot_records(&descriptor, codepage),
                errors: Vec::new(),
            },
            ExitCode::SUCCESS,
        ),
        Err(e) => (decode_failure(file, &e), ExitCode::from(1)),
    }
}

/// Populated slots, labelled under `codepage`.
pub(crate) fn slot_records(descriptor: &FontDescriptor, codepage: Codepage) -> Vec<SlotRecord> {
    descriptor
        .glyphs()
        .map(|slot| SlotRecord {
            index: slot.index,
            character: char_for_byte(codepage, slot.index),
            width: slot.advance as u8,
            uv1: slot.uv1,
            uv2: slot.uv2,
        })
        .collect()
}

fn decode_failure(file: &str, e: &FntError) -> InspectOutput {
    failure(file, JsonError::new(error_codes::FNT_DECODE, e.to_string()))
}

fn failure(file: &str, error: JsonError) -> InspectOutput {
    InspectOutput {
        success: false,
        file: file.to_string(),
        name: None,
        height: None,
        letters: None,
        size: None,
        blake3: None,
        slots: Vec::new(),
        errors: vec![error],
    }
}
