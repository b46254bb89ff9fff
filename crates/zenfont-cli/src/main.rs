//! ZenFont CLI - Command-line interface for bitmap-font atlas generation
//!
//! This binary renders the printable range of a single-byte codepage into a
//! texture atlas and writes the TGA texture and FNT glyph descriptor pairs.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

// Use modules from the library crate
use zenfont_cli::commands;
use zenfont_cli::commands::generate::GenerateOptions;
use zenfont_cli::input::{parse_codepage, SettingsOverrides};
use zenfont_spec::Codepage;

/// ZenFont - Bitmap Font Atlas Generator
#[derive(Parser)]
#[command(name = "zenfont")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Flags that replace individual settings fields.
#[derive(Args, Debug, Default)]
struct OverrideArgs {
    /// Outline-font file backing the family (overrides font_path)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Codepage label (windows-1250, windows-1251, windows-1252, windows-1254)
    #[arg(long, value_parser = parse_codepage)]
    codepage: Option<Codepage>,

    /// Output-size factor (10 or 20)
    #[arg(long)]
    output_size: Option<u32>,

    /// Output base name (overrides output_name)
    #[arg(long)]
    name: Option<String>,
}

impl OverrideArgs {
    fn into_overrides(self) -> SettingsOverrides {
        SettingsOverrides {
            font_path: self.font,
            codepage: self.codepage,
            output_size: self.output_size,
            output_name: self.name,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render the atlas and write the TGA and FNT pairs
    Generate {
        /// Path to the settings JSON file
        #[arg(short, long)]
        settings: String,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        out_dir: Option<String>,

        #[command(flatten)]
        overrides: OverrideArgs,

        /// Saturate widths and reject non-Latin-1 names instead of wrapping and clamping
        #[arg(long)]
        strict: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render the atlas and write a composed preview PNG
    Preview {
        /// Path to the settings JSON file
        #[arg(short, long)]
        settings: String,

        /// Output PNG path (default: preview.png)
        #[arg(short, long)]
        out: Option<String>,

        /// Reference image drawn beneath the atlas when show_reference is set
        #[arg(short, long)]
        reference: Option<String>,

        #[command(flatten)]
        overrides: OverrideArgs,
    },

    /// Decode an FNT descriptor and print its header and slots
    Inspect {
        /// Path to the FNT file
        #[arg(short, long)]
        fnt: String,

        /// Codepage used to label slots (default: windows-1250)
        #[arg(long, value_parser = parse_codepage)]
        codepage: Option<Codepage>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the 28x8 glyph grid of a codepage
    Alphabet {
        /// Codepage label
        #[arg(short, long, value_parser = parse_codepage, default_value = "windows-1250")]
        codepage: Codepage,
    },

    /// Write a settings file holding every default
    Init {
        /// Settings path (default: zenfont.json)
        #[arg(short, long)]
        out: Option<String>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            settings,
            out_dir,
            overrides,
            strict,
            json,
        } => {
            let options = GenerateOptions {
                out_dir,
                overrides: overrides.into_overrides(),
                strict,
                json,
            };
            commands::generate::run(&settings, &options)
        }
        Commands::Preview {
            settings,
            out,
            reference,
            overrides,
        } => commands::preview::run(
            &settings,
            out.as_deref(),
            reference.as_deref(),
            &overrides.into_overrides(),
        ),
        Commands::Inspect {
            fnt,
            codepage,
            json,
        } => commands::inspect::run(&fnt, codepage, json),
        Commands::Alphabet { codepage } => commands::alphabet::run(codepage),
        Commands::Init { out, force } => commands::init::run(out.as_deref(), force),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
