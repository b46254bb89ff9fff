//! Binary `.FNT` descriptor encoding.
//!
//! Layout (multi-byte fields little endian):
//!
//! | field        | size        |
//! |--------------|-------------|
//! | version      | 1 (`0x31`)  |
//! | newline      | 1 (`0x0A`)  |
//! | name         | 1 per unit  |
//! | newline      | 1 (`0x0A`)  |
//! | height       | u32         |
//! | letter count | u32 (256)   |
//! | widths       | 256 x u8    |
//! | uv1          | 256 x 2 f32 |
//! | uv2          | 256 x 2 f32 |

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Cursor, Read, Write};
use thiserror::Error;
use zenfont_spec::{FntPolicy, FontDescriptor, GlyphSlot, FNT_VERSION, LETTER_COUNT};

/// Line separator around the name field.
pub const NEWLINE: u8 = 0x0A;

/// Bytes after the name field: newline, height, count, widths, uv1, uv2.
const TAIL_LEN: usize = 1 + 4 + 4 + 256 + 256 * 8 + 256 * 8;

/// Errors from encoding or decoding a descriptor.
#[derive(Debug, Error)]
pub enum FntError {
    /// Descriptor does not have exactly 256 slots.
    #[error("descriptor has {0} slots (expected 256)")]
    SlotCount(usize),

    /// Name character cannot be stored in one byte.
    #[error("name character '{0}' is outside Latin-1")]
    NonLatin1Name(char),

    /// Name contains the field separator.
    #[error("name contains a newline")]
    NewlineInName,

    /// Unknown version marker.
    #[error("unsupported version marker 0x{0:02x} (expected 0x31)")]
    Version(u8),

    /// Letter count field is not 256.
    #[error("letter count {0} (expected 256)")]
    LetterCount(u32),

    /// Input is not laid out as a descriptor.
    #[error("malformed descriptor: {0}")]
    Malformed(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Encoded length for a name of `name_len` bytes.
pub fn encoded_len(name_len: usize) -> usize {
    2 + name_len + TAIL_LEN
}

/// Encodes a descriptor to bytes.
pub fn encode_descriptor(
    descriptor: &FontDescriptor,
    policy: FntPolicy,
) -> Result<Vec<u8>, FntError> {
    let name = encode_name(&descriptor.name, policy)?;
    let mut buf = Vec::with_capacity(encoded_len(name.len()));
    write_descriptor(&mut buf, descriptor, &name, policy)?;
    Ok(buf)
}

fn write_descriptor<W: Write>(
    writer: &mut W,
    descriptor: &FontDescriptor,
    name: &[u8],
    policy: FntPolicy,
) -> Result<(), FntError> {
    if descriptor.slots.len() != LETTER_COUNT as usize {
        return Err(FntError::SlotCount(descriptor.slots.len()));
    }

    writer.write_u8(FNT_VERSION)?;
    writer.write_u8(NEWLINE)?;
    writer.write_all(name)?;
    writer.write_u8(NEWLINE)?;
    writer.write_u32::<LittleEndian>(encode_height(descriptor.cell_height))?;
    writer.write_u32::<LittleEndian>(descriptor.letters)?;

    for slot in &descriptor.slots {
        writer.write_u8(encode_width(slot, policy))?;
    }
    for slot in &descriptor.slots {
        writer.write_f32::<LittleEndian>(slot.uv1[0] as f32)?;
        writer.write_f32::<LittleEndian>(slot.uv1[1] as f32)?;
    }
    for slot in &descriptor.slots {
        writer.write_f32::<LittleEndian>(slot.uv2[0] as f32)?;
        writer.write_f32::<LittleEndian>(slot.uv2[1] as f32)?;
    }
    Ok(())
}

/// One byte per UTF-16 code unit.
fn encode_name(name: &str, policy: FntPolicy) -> Result<Vec<u8>, FntError> {
    if name.contains('\n') {
        return Err(FntError::NewlineInName);
    }
    match policy {
        FntPolicy::Reference => Ok(name.encode_utf16().map(|u| u.min(255) as u8).collect()),
        FntPolicy::Strict => name
            .chars()
            .map(|c| u8::try_from(u32::from(c)).map_err(|_| FntError::NonLatin1Name(c)))
            .collect(),
    }
}

/// Rounds to the nearest integer, saturating at the u32 range.
fn encode_height(cell_height: f64) -> u32 {
    cell_height.round() as u32
}

fn encode_width(slot: &GlyphSlot, policy: FntPolicy) -> u8 {
    match policy {
        FntPolicy::Reference => {
            let width = wrap_width(slot.advance);
            if slot.advance >= 256.0 {
                log::warn!(
                    "width {:.2} of slot {} wraps to {}",
                    slot.advance,
                    slot.index,
                    width
                );
            }
            width
        }
        FntPolicy::Strict => saturate_width(slot.advance),
    }
}

/// Truncates toward zero, then wraps modulo 256. Non-finite values become 0.
pub fn wrap_width(advance: f64) -> u8 {
    if !advance.is_finite() {
        return 0;
    }
    advance.trunc().rem_euclid(256.0) as u8
}

/// Truncates toward zero, then clamps to 0..=255. NaN becomes 0.
pub fn saturate_width(advance: f64) -> u8 {
    if advance.is_nan() {
        return 0;
    }
    advance.trunc().clamp(0.0, 255.0) as u8
}

/// Decodes descriptor bytes.
///
/// Slots come back without characters, and slots 0..=31 are not required to
/// hold the reserved layout. Name bytes are read as Latin-1.
pub fn decode_descriptor(bytes: &[u8]) -> Result<FontDescriptor, FntError> {
    let mut cursor = Cursor::new(bytes);

    let version = cursor.read_u8()?;
    if version != FNT_VERSION {
        return Err(FntError::Version(version));
    }
    if cursor.read_u8()? != NEWLINE {
        return Err(FntError::Malformed("missing newline after version".into()));
    }

    let name_start = cursor.position() as usize;
    let name_len = bytes[name_start..]
        .iter()
        .position(|&b| b == NEWLINE)
        .ok_or_else(|| FntError::Malformed("unterminated name".into()))?;
    if bytes.len() != encoded_len(name_len) {
        return Err(FntError::Malformed(format!(
            "length {} (expected {} for a {}-byte name)",
            bytes.len(),
            encoded_len(name_len),
            name_len
        )));
    }
    let name: String = bytes[name_start..name_start + name_len]
        .iter()
        .map(|&b| char::from(b))
        .collect();
    cursor.set_position((name_start + name_len + 1) as u64);

    let height = cursor.read_u32::<LittleEndian>()?;
    let letters = cursor.read_u32::<LittleEndian>()?;
    if letters != LETTER_COUNT {
        return Err(FntError::LetterCount(letters));
    }

    let mut widths = [0u8; 256];
    cursor.read_exact(&mut widths)?;
    let uv1 = read_pairs(&mut cursor)?;
    let uv2 = read_pairs(&mut cursor)?;

    let slots = (0..=255u8)
        .map(|i| GlyphSlot {
            index: i,
            character: None,
            advance: f64::from(widths[i as usize]),
            uv1: uv1[i as usize],
            uv2: uv2[i as usize],
        })
        .collect();

    Ok(FontDescriptor {
        name,
        cell_height: f64::from(height),
        letters,
        slots,
    })
}

fn read_pairs(cursor: &mut Cursor<&[u8]>) -> Result<Vec<[f64; 2]>, FntError> {
    (0..LETTER_COUNT)
        .map(|_| -> Result<[f64; 2], FntError> {
            let u = cursor.read_f32::<LittleEndian>()?;
            let v = cursor.read_f32::<LittleEndian>()?;
            Ok([f64::from(u), f64::from(v)])
        })
        .collect()
}
