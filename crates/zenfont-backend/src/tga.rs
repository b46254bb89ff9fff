//! Uncompressed 32-bit TGA export.
//!
//! The atlas leaves the renderer as PNG bytes. Export decodes them, writes
//! B,G,R,A pixels into an uncompressed true-color TGA with rows stored
//! bottom-up, and then forces the alpha-depth field at offset 0x11 to 8.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use image::ImageFormat;
use std::io::{self, Cursor, Write};
use thiserror::Error;

/// Header length in bytes.
pub const TGA_HEADER_LEN: usize = 18;

/// Offset of the image descriptor byte holding the alpha depth.
pub const ALPHA_DEPTH_OFFSET: usize = 0x11;

/// Alpha depth every exported file carries.
pub const FORCED_ALPHA_DEPTH: u8 = 8;

/// Uncompressed true-color image type.
const IMAGE_TYPE_TRUE_COLOR: u8 = 2;

/// Errors from TGA export.
#[derive(Debug, Error)]
pub enum TgaError {
    /// Compressed bytes did not decode to an image.
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Image dimensions do not fit the 16-bit header fields.
    #[error("image {0}x{1} is too large for TGA")]
    TooLarge(u32, u32),

    /// Bytes are not a TGA written by this module.
    #[error("malformed TGA: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// The fields of an 18-byte TGA header this exporter uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TgaHeader {
    pub image_type: u8,
    pub width: u16,
    pub height: u16,
    pub pixel_depth: u8,
    /// Low 4 bits: alpha depth. Bit 5: top-left origin.
    pub descriptor: u8,
}

impl TgaHeader {
    /// Header for a 32-bit bottom-up image with `alpha_bits` of alpha.
    pub fn true_color(width: u16, height: u16, alpha_bits: u8) -> Self {
        Self {
            image_type: IMAGE_TYPE_TRUE_COLOR,
            width,
            height,
            pixel_depth: 32,
            descriptor: alpha_bits & 0x0F,
        }
    }

    /// Alpha depth from the descriptor byte.
    pub fn alpha_depth(&self) -> u8 {
        self.descriptor & 0x0F
    }

    /// Write the header to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        // No image ID, no color map
        writer.write_u8(0)?;
        writer.write_u8(0)?;
        writer.write_u8(self.image_type)?;
        writer.write_all(&[0; 5])?;

        // Origin
        writer.write_u16::<LittleEndian>(0)?;
        writer.write_u16::<LittleEndian>(0)?;

        writer.write_u16::<LittleEndian>(self.width)?;
        writer.write_u16::<LittleEndian>(self.height)?;
        writer.write_u8(self.pixel_depth)?;
        writer.write_u8(self.descriptor)?;
        Ok(())
    }

    /// Parses the header at the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self, TgaError> {
        if bytes.len() < TGA_HEADER_LEN {
            return Err(TgaError::Malformed(format!(
                "{} bytes is shorter than the header",
                bytes.len()
            )));
        }
        let mut cursor = Cursor::new(bytes);
        cursor.set_position(2);
        let image_type = cursor.read_u8()?;
        cursor.set_position(12);
        let width = cursor.read_u16::<LittleEndian>()?;
        let height = cursor.read_u16::<LittleEndian>()?;
        let pixel_depth = cursor.read_u8()?;
        let descriptor = cursor.read_u8()?;
        Ok(Self {
            image_type,
            width,
            height,
            pixel_depth,
            descriptor,
        })
    }
}

/// Converts PNG bytes to an uncompressed BGRA TGA with alpha depth 8.
pub fn export_tga(png_bytes: &[u8]) -> Result<Vec<u8>, TgaError> {
    let image = image::load_from_memory_with_format(png_bytes, ImageFormat::Png)?;
    let alpha_bits = if image.color().has_alpha() { 8 } else { 0 };
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    let header = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => TgaHeader::true_color(w, h, alpha_bits),
        _ => return Err(TgaError::TooLarge(width, height)),
    };

    let row_len = width as usize * 4;
    let mut bytes = Vec::with_capacity(TGA_HEADER_LEN + row_len * height as usize);
    header.write(&mut bytes)?;

    // Bottom-up
    for row in rgba.as_raw().chunks_exact(row_len.max(1)).rev() {
        for px in row.chunks_exact(4) {
            bytes.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
        }
    }

    force_alpha_depth(&mut bytes);
    log::debug!("TGA {}x{} ({} bytes)", width, height, bytes.len());
    Ok(bytes)
}

/// Sets the alpha-depth header byte to 8, regardless of the source image.
pub fn force_alpha_depth(bytes: &mut [u8]) {
    if let Some(byte) = bytes.get_mut(ALPHA_DEPTH_OFFSET) {
        *byte = FORCED_ALPHA_DEPTH;
    }
}
