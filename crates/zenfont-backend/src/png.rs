//! Deterministic PNG writer.
//!
//! Uses fixed compression settings so the same surface always compresses to
//! the same bytes. The atlas export decodes these bytes again before building
//! the TGA, so any change here shows up in the TGA hashes too.

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

use crate::surface::Surface;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Use a fixed value for determinism.
    pub compression: Compression,
    /// Filter type. Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

/// Write a surface as 8-bit RGBA PNG to any writer.
pub fn write_surface_to_writer<W: Write>(
    surface: &Surface,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    if surface.width == 0 || surface.height == 0 {
        return Err(PngError::InvalidDimensions(format!(
            "{}x{} surface",
            surface.width, surface.height
        )));
    }

    let mut encoder = Encoder::new(writer, surface.width, surface.height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    // The png crate writes no timestamps or other variable chunks.
    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&surface.to_rgba8())?;

    Ok(())
}

/// Write a surface to a PNG file.
pub fn write_surface(surface: &Surface, path: &Path, config: &PngConfig) -> Result<(), PngError> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    write_surface_to_writer(surface, writer, config)
}

/// Compresses a surface with the default configuration.
pub fn encode_surface(surface: &Surface) -> Result<Vec<u8>, PngError> {
    let mut data = Vec::new();
    write_surface_to_writer(surface, &mut data, &PngConfig::default())?;
    Ok(data)
}

/// Compute the BLAKE3 hex digest of some bytes.
pub fn hash_bytes(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
