//! Human-readable (colored) output mode for the generate command.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;
use std::time::Instant;

use super::{generate, prepare, BackendLoader, GenerateError, GenerateOptions, PrepareError};

/// Run generate with human-readable (colored) output.
pub fn run_human(
    settings_path: &str,
    options: &GenerateOptions,
    loader: BackendLoader,
) -> Result<ExitCode> {
    let start = Instant::now();
    let out_dir = options.out_dir();

    println!("{} {}", "Generating from:".cyan().bold(), settings_path);
    println!("{} {}", "Output dir:".cyan().bold(), out_dir.display());
    if options.strict {
        println!("{} {}", "FNT policy:".cyan().bold(), "strict".yellow());
    }

    let prepared = match prepare(settings_path, &options.overrides) {
        Ok(prepared) => prepared,
        Err(PrepareError::Load(e)) => {
            println!("\n{} {}", "Error:".red().bold(), e);
            return Ok(ExitCode::from(1));
        }
        Err(PrepareError::Invalid { errors, warnings }) => {
            print_warnings(&warnings);
            println!("\n{}", "Settings errors:".red().bold());
            for error in &errors {
                println!("  {} {}", "x".red(), error);
            }
            return Ok(ExitCode::from(1));
        }
    };

    println!("{} {}", "Source:".dimmed(), &prepared.source_hash[..16]);
    print_warnings(&prepared.warnings);

    let settings = &prepared.settings;
    println!(
        "{} {} / {} {}",
        "Font:".cyan().bold(),
        settings.font,
        settings.font_size,
        settings.codepage
    );

    let generated = match generate(settings, loader, out_dir, options.policy()) {
        Ok(generated) => generated,
        Err(e @ (GenerateError::Font(_) | GenerateError::Render(_))) => {
            println!("\n{} {}", "Render failed:".red().bold(), e);
            return Ok(ExitCode::from(2));
        }
        Err(e) => {
            println!("\n{} {}", "Export failed:".red().bold(), e);
            return Ok(ExitCode::from(2));
        }
    };

    let plan = &generated.render.plan;
    println!(
        "{} {}x{} ({}x{} cells of {:.3}x{:.3})",
        "Atlas:".cyan().bold(),
        plan.width,
        plan.height,
        plan.columns,
        plan.rows,
        plan.cell_width,
        plan.cell_height
    );
    println!(
        "{} {}",
        "Descriptor:".cyan().bold(),
        generated.render.descriptor.name
    );

    println!("\n{}", "Artifacts:".green().bold());
    for (artifact, path) in generated
        .report
        .artifacts()
        .into_iter()
        .zip(&generated.written)
    {
        println!(
            "  {} {} ({} bytes, {})",
            "+".green(),
            path.display(),
            artifact.len(),
            &artifact.hash()[..16].dimmed()
        );
    }

    let errors = generated.report.errors();
    if generated.report.descriptor.is_none() {
        println!("  {} descriptor export skipped", "!".yellow());
    }
    if !errors.is_empty() {
        println!("\n{}", "Export errors:".red().bold());
        for error in errors {
            println!("  {} {}", "x".red(), error);
        }
        return Ok(ExitCode::from(2));
    }

    println!(
        "\n{} in {:.2}s",
        "Done".green().bold(),
        start.elapsed().as_secs_f64()
    );
    Ok(ExitCode::SUCCESS)
}

fn print_warnings(warnings: &[zenfont_spec::ValidationWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!("\n{}", "Warnings:".yellow().bold());
    for warning in warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
}
