//! Codepage alphabets.
//!
//! Maps the 224 printable byte values 32..=255 of a single-byte codepage to
//! Unicode scalars. Tables follow the WHATWG Encoding Standard, so bytes a
//! vendor table leaves undefined decode to the C1 control at the same value.

use encoding_rs::Encoding;
use zenfont_spec::Codepage;

/// First byte value placed in the atlas.
pub const FIRST_PRINTABLE: u8 = 32;

/// Number of characters in every alphabet.
pub const ALPHABET_LEN: usize = 224;

/// Returns the decoder table for a codepage.
pub fn encoding_for(codepage: Codepage) -> &'static Encoding {
    match codepage {
        Codepage::Windows1250 => encoding_rs::WINDOWS_1250,
        Codepage::Windows1251 => encoding_rs::WINDOWS_1251,
        Codepage::Windows1252 => encoding_rs::WINDOWS_1252,
        Codepage::Windows1254 => encoding_rs::WINDOWS_1254,
    }
}

/// Decodes byte values 32..=255 under `codepage`, in byte order.
pub fn alphabet_for(codepage: Codepage) -> Vec<char> {
    let bytes: Vec<u8> = (FIRST_PRINTABLE..=u8::MAX).collect();
    let (text, had_errors) = encoding_for(codepage).decode_without_bom_handling(&bytes);
    debug_assert!(!had_errors, "single-byte table with unmapped bytes");
    let alphabet: Vec<char> = text.chars().collect();
    debug_assert_eq!(alphabet.len(), ALPHABET_LEN);
    alphabet
}

/// Decodes a single byte value under `codepage`.
pub fn char_for_byte(codepage: Codepage, byte: u8) -> Option<char> {
    let bytes = [byte];
    let (text, _) = encoding_for(codepage).decode_without_bom_handling(&bytes);
    text.chars().next()
}
