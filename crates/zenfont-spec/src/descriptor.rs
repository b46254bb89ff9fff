//! Glyph descriptor types for the binary `.FNT` file.
//!
//! A descriptor holds 256 glyph slots indexed by byte value. Slots 0..=31 are
//! reserved control slots; 32..=255 are filled from the atlas grid.

use serde::{Deserialize, Serialize};

/// Descriptor format version marker (ASCII `'1'`).
pub const FNT_VERSION: u8 = 0x31;

/// Number of glyph slots in every descriptor.
pub const LETTER_COUNT: u32 = 256;

/// Number of leading reserved slots.
pub const RESERVED_SLOTS: usize = 32;

/// Suffix appended to the upper-cased output name to form the descriptor name.
pub const TEXTURE_SUFFIX: &str = ".TGA";

/// One glyph slot of a descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphSlot {
    /// Byte value this slot is indexed by.
    pub index: u8,

    /// Character drawn for this slot, absent for reserved slots.
    pub character: Option<char>,

    /// Horizontal advance width in pixels, as measured.
    pub advance: f64,

    /// Normalized top-left corner.
    pub uv1: [f64; 2],

    /// Normalized bottom-right corner.
    pub uv2: [f64; 2],
}

impl GlyphSlot {
    /// A reserved slot: zero width covering the whole atlas.
    pub fn reserved(index: u8) -> Self {
        Self {
            index,
            character: None,
            advance: 0.0,
            uv1: [0.0, 0.0],
            uv2: [1.0, 1.0],
        }
    }

    /// Returns true if this slot has the reserved layout.
    pub fn is_reserved(&self) -> bool {
        self.character.is_none()
            && self.advance == 0.0
            && self.uv1 == [0.0, 0.0]
            && self.uv2 == [1.0, 1.0]
    }
}

/// Atlas metadata and 256 glyph slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Texture name (e.g. "MY_FONT.TGA").
    pub name: String,

    /// Cell height in pixels, as computed from the atlas plan.
    pub cell_height: f64,

    /// Letter count, always [`LETTER_COUNT`].
    pub letters: u32,

    /// Slots in byte order 0..=255.
    pub slots: Vec<GlyphSlot>,
}

impl FontDescriptor {
    /// Creates a descriptor with all 256 slots reserved.
    pub fn new(output_name: &str, cell_height: f64) -> Self {
        Self {
            name: descriptor_name(output_name),
            cell_height,
            letters: LETTER_COUNT,
            slots: (0..=255u8).map(GlyphSlot::reserved).collect(),
        }
    }

    /// Returns the slot for a byte value.
    pub fn slot(&self, byte: u8) -> Option<&GlyphSlot> {
        self.slots.get(byte as usize)
    }

    /// Replaces the slot for the slot's byte value.
    pub fn set_slot(&mut self, slot: GlyphSlot) {
        let index = slot.index as usize;
        if let Some(existing) = self.slots.get_mut(index) {
            *existing = slot;
        }
    }

    /// Iterates the populated (non-reserved) slots.
    pub fn glyphs(&self) -> impl Iterator<Item = &GlyphSlot> {
        self.slots.iter().skip(RESERVED_SLOTS)
    }
}

/// Derives the descriptor name from an output base name.
pub fn descriptor_name(output_name: &str) -> String {
    format!("{}{}", output_name.to_uppercase(), TEXTURE_SUFFIX)
}

/// How lossy numeric and text fields are narrowed when encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FntPolicy {
    /// Byte-compatible with existing tooling: widths wrap modulo 256, name
    /// code units above 255 clamp to 255, height rounds to nearest.
    #[default]
    Reference,
    /// Widths saturate at 255 and non-Latin-1 names are rejected.
    Strict,
}
