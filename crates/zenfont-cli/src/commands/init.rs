//! Init command implementation
//!
//! Writes a settings document holding every default.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use zenfont_spec::Settings;

/// Default settings file name.
pub const DEFAULT_SETTINGS: &str = "zenfont.json";

/// Run the init command
///
/// # Arguments
/// * `out` - Settings path to write (default: `zenfont.json`)
/// * `force` - Overwrite an existing file
///
/// # Returns
/// Exit code: 0 success, 1 file exists
pub fn run(out: Option<&str>, force: bool) -> Result<ExitCode> {
    let path = Path::new(out.unwrap_or(DEFAULT_SETTINGS));
    if path.exists() && !force {
        println!(
            "{} {} already exists (use --force to overwrite)",
            "Error:".red().bold(),
            path.display()
        );
        return Ok(ExitCode::from(1));
    }

    let json = Settings::default().to_json_pretty()?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write settings: {}", path.display()))?;

    println!("{} {}", "Wrote".green().bold(), path.display());
    println!(
        "{}",
        "Set font_path to the font file backing the family before generating.".dimmed()
    );
    Ok(ExitCode::SUCCESS)
}
