//! ZenFont Settings and Descriptor Library
//!
//! This crate provides the configuration record, codepage identifiers, and
//! glyph descriptor types shared by the ZenFont backend and CLI.
//!
//! # Overview
//!
//! - **Settings**: one JSON document per atlas, every field defaulted
//! - **Descriptor**: 256 glyph slots with advance widths and UV boxes, the
//!   in-memory form of the binary `.FNT` file
//!
//! # Example
//!
//! ```
//! use zenfont_spec::{Codepage, Settings, validate_settings};
//!
//! let settings = Settings::from_json(r#"{
//!     "codepage": "windows-1252",
//!     "output_size": 10,
//!     "output_name": "My_Font",
//!     "uv_adjust_top": "2"
//! }"#).unwrap();
//!
//! assert_eq!(settings.codepage, Codepage::Windows1252);
//! assert_eq!(settings.uv_adjust().top, 2);
//! assert!(validate_settings(&settings).is_ok());
//! ```
//!
//! # Modules
//!
//! - [`codepage`]: Supported single-byte codepages
//! - [`descriptor`]: Glyph slots and font descriptor
//! - [`error`]: Error and warning types for validation
//! - [`settings`]: Settings document and lenient field types
//! - [`validation`]: Settings validation

pub mod codepage;
pub mod descriptor;
pub mod error;
pub mod settings;
pub mod validation;

pub use codepage::Codepage;
pub use descriptor::{
    descriptor_name, FntPolicy, FontDescriptor, GlyphSlot, FNT_VERSION, LETTER_COUNT,
    RESERVED_SLOTS, TEXTURE_SUFFIX,
};
pub use error::{
    ErrorCode, SettingsError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use settings::{HexColor, LenientInt, Settings, UvAdjust};
pub use validation::{validate_settings, MAX_OUTLINE_SIZE, SUPPORTED_OUTPUT_SIZES};
