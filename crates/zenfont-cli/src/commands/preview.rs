//! Preview command implementation
//!
//! Renders the atlas and writes a PNG of what the editor canvas shows: the
//! preview background, the optional reference image, the debug overlay and
//! the atlas itself.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use image::imageops::{self, FilterType};
use std::path::Path;
use std::process::ExitCode;
use zenfont_backend::png::{write_surface, PngConfig};
use zenfont_backend::{render_atlas, Color, FontdueBackend, RenderResult, Surface, Variant};
use zenfont_spec::Settings;

use super::generate::{prepare, PrepareError};
use crate::input::SettingsOverrides;

/// Default preview file name.
pub const DEFAULT_PREVIEW: &str = "preview.png";

/// Run the preview command
///
/// # Arguments
/// * `settings_path` - Path to the settings JSON file
/// * `out` - Output PNG path (default: `preview.png`)
/// * `reference` - Reference image drawn beneath the atlas when `show_reference` is set
/// * `overrides` - Settings fields replaced from flags
///
/// # Returns
/// Exit code: 0 success, 1 settings error
pub fn run(
    settings_path: &str,
    out: Option<&str>,
    reference: Option<&str>,
    overrides: &SettingsOverrides,
) -> Result<ExitCode> {
    let out = Path::new(out.unwrap_or(DEFAULT_PREVIEW));
    println!("{} {}", "Preview:".cyan().bold(), settings_path);

    let prepared = match prepare(settings_path, overrides) {
        Ok(prepared) => prepared,
        Err(PrepareError::Load(e)) => {
            println!("\n{} {}", "Error:".red().bold(), e);
            return Ok(ExitCode::from(1));
        }
        Err(PrepareError::Invalid { errors, .. }) => {
            println!("\n{}", "Settings errors:".red().bold());
            for error in &errors {
                println!("  {} {}", "x".red(), error);
            }
            return Ok(ExitCode::from(1));
        }
    };
    let settings = &prepared.settings;

    let backend = FontdueBackend::from_settings(settings).context("Failed to load font")?;
    let render = render_atlas(settings, &backend, Variant::Base).context("Failed to render atlas")?;

    let reference = match reference {
        Some(path) if settings.show_reference => Some(load_reference(
            Path::new(path),
            render.atlas.width,
            render.atlas.height,
        )?),
        Some(_) => {
            println!(
                "  {} show_reference is off, ignoring reference image",
                "!".yellow()
            );
            None
        }
        None => None,
    };

    let preview = compose_preview(settings, &render, reference.as_ref());
    write_surface(&preview, out, &PngConfig::default())
        .with_context(|| format!("Failed to write preview: {}", out.display()))?;

    println!(
        "{} {} ({}x{})",
        "Wrote".green().bold(),
        out.display(),
        preview.width,
        preview.height
    );
    Ok(ExitCode::SUCCESS)
}

/// Loads a reference image and scales it to the atlas size.
pub fn load_reference(path: &Path, width: u32, height: u32) -> Result<Surface> {
    let image = image::open(path)
        .with_context(|| format!("Failed to read reference image: {}", path.display()))?
        .to_rgba8();
    let scaled = imageops::resize(&image, width, height, FilterType::Triangle);
    match Surface::from_rgba8(width, height, scaled.as_raw()) {
        Some(surface) => Ok(surface),
        None => bail!("reference image has unexpected size after scaling"),
    }
}

/// Layers the preview: background, reference, debug overlay, atlas.
pub fn compose_preview(
    settings: &Settings,
    render: &RenderResult,
    reference: Option<&Surface>,
) -> Surface {
    let width = render.atlas.width;
    let height = render.atlas.height;
    let mut preview = Surface::filled(width, height, Color::from(settings.preview_background));

    if settings.show_reference {
        if let Some(reference) = reference {
            preview.draw_surface(reference);
        }
    }
    if settings.show_debug_uv {
        if let Some(overlay) = &render.debug_overlay {
            preview.draw_surface(overlay);
        }
    }
    preview.draw_surface(&render.atlas);
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use zenfont_backend::{DrawOptions, GlyphBackend, GlyphMetrics, Rect};
    use zenfont_spec::HexColor;

    struct Block;

    impl GlyphBackend for Block {
        fn measure(&self, _ch: char) -> GlyphMetrics {
            GlyphMetrics {
                advance: 10.0,
                ascent: 14.0,
                descent: 4.0,
            }
        }

        fn draw(&self, surface: &mut Surface, _ch: char, x: f64, baseline: f64, options: &DrawOptions) {
            surface.fill_rect(Rect::new(x, baseline - 10.0, 10.0, 10.0), options.color);
        }
    }

    fn settings() -> Settings {
        Settings {
            preview_background: HexColor::from_rgba8([0, 255, 0, 255]),
            ..Settings::default().with_output_size(10)
        }
    }

    #[test]
    fn preview_starts_from_background() {
        let mut settings = settings();
        settings.show_debug_uv = false;
        let render = render_atlas(&settings, &Block, Variant::Base).unwrap();
        let preview = compose_preview(&settings, &render, None);

        assert_eq!((preview.width, preview.height), (512, 256));
        // Top-left corner of the first cell holds no ink.
        assert_eq!(preview.get(0, 0).to_rgba8(), [0, 255, 0, 255]);
    }

    #[test]
    fn preview_draws_atlas_over_overlay() {
        let settings = settings();
        let render = render_atlas(&settings, &Block, Variant::Base).unwrap();
        let preview = compose_preview(&settings, &render, None);

        let placement = &render.placements[0];
        let x = (placement.draw_x + 5.0) as u32;
        let y = (placement.baseline - 5.0) as u32;
        assert_eq!(preview.get(x, y).to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn preview_reference_respects_flag() {
        let mut settings = settings();
        settings.show_debug_uv = false;
        let render = render_atlas(&settings, &Block, Variant::Base).unwrap();
        let reference = Surface::filled(512, 256, Color::rgb(1.0, 0.0, 0.0));

        let shown = compose_preview(&settings, &render, Some(&reference));
        assert_eq!(shown.get(0, 0).to_rgba8(), [255, 0, 0, 255]);

        settings.show_reference = false;
        let hidden = compose_preview(&settings, &render, Some(&reference));
        assert_eq!(hidden.get(0, 0).to_rgba8(), [0, 255, 0, 255]);
    }

    #[test]
    fn reference_is_scaled_to_atlas() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("reference.png");
        let image = image::RgbaImage::from_pixel(64, 32, image::Rgba([10, 20, 30, 255]));
        image.save(&path).unwrap();

        let surface = load_reference(&path, 512, 256).unwrap();
        assert_eq!((surface.width, surface.height), (512, 256));
        assert_eq!(surface.get(100, 100).to_rgba8(), [10, 20, 30, 255]);
    }
}
