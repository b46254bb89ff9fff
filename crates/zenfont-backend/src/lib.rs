//! ZenFont Atlas Backend
//!
//! This crate builds fixed-layout bitmap font atlases and encodes the two
//! artifacts a legacy engine loads from them: an uncompressed 32-bit TGA
//! texture and a binary `.FNT` glyph descriptor.
//!
//! # Pipeline
//!
//! - **Alphabet**: 224 characters for byte values 32..=255 of a codepage
//! - **Layout**: 28x8 grid over a 512x256 or 1024x512 canvas
//! - **Placement**: centered glyph boxes, padded UV boxes
//! - **Raster**: fill and optional outline per cell, optional debug overlay
//! - **Encoding**: `.FNT` descriptor, deterministic PNG, TGA
//!
//! Text measurement and drawing go through [`GlyphBackend`], implemented by
//! [`FontdueBackend`] for real font files.
//!
//! # Example
//!
//! ```no_run
//! use zenfont_backend::{encode_descriptor, encode_surface, export_tga, render_with_font, Variant};
//! use zenfont_spec::{FntPolicy, Settings};
//!
//! let mut settings = Settings::default().with_output_size(10);
//! settings.font_path = Some("fonts/DejaVuSans.ttf".into());
//!
//! let result = render_with_font(&settings, Variant::Base).unwrap();
//! let fnt = encode_descriptor(&result.descriptor, FntPolicy::Reference).unwrap();
//! let tga = export_tga(&encode_surface(&result.atlas).unwrap()).unwrap();
//! assert_eq!(tga[0x11], 8);
//! # let _ = fnt;
//! ```
//!
//! # Determinism
//!
//! The same settings and the same glyph backend give byte-identical surfaces,
//! PNG, TGA and `.FNT` output. PNG encoding uses fixed compression settings.

pub mod alphabet;
pub mod color;
pub mod fnt;
pub mod layout;
pub mod placer;
pub mod png;
pub mod raster;
pub mod render;
pub mod surface;
pub mod text;
pub mod tga;

// Re-export main types for convenience
pub use alphabet::{alphabet_for, char_for_byte, ALPHABET_LEN, FIRST_PRINTABLE};
pub use color::Color;
pub use fnt::{decode_descriptor, encode_descriptor, encoded_len, FntError};
pub use layout::{AtlasPlan, Cell, LayoutError, COLUMNS, ROWS};
pub use placer::{place_glyph, GlyphPlacement};
pub use png::{encode_surface, hash_bytes, PngConfig, PngError};
pub use raster::{GlyphStyle, Variant};
pub use render::{render_atlas, render_with_font, RenderError, RenderResult};
pub use surface::{Rect, Surface};
pub use text::{DrawMode, DrawOptions, FontdueBackend, GlyphBackend, GlyphMetrics, TextError};
pub use tga::{export_tga, TgaError};
