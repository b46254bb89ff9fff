//! Atlas settings document.
//!
//! A [`Settings`] value is the immutable configuration of one render call. It
//! is loaded from JSON, every field has the default of the interactive tool,
//! and it is passed by reference into the rendering pipeline.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::PathBuf;

use crate::codepage::Codepage;
use crate::error::SettingsError;

/// Settings for one atlas render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Codepage whose bytes 32..=255 populate the atlas.
    #[serde(default)]
    pub codepage: Codepage,

    /// Font family name.
    #[serde(default = "default_font")]
    pub font: String,

    /// Outline-font file backing the family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,

    /// Font style (e.g. "normal", "italic").
    #[serde(default = "default_normal")]
    pub font_style: String,

    /// Font size as a pixel string (e.g. "30px").
    #[serde(default = "default_font_size")]
    pub font_size: String,

    /// Font weight (e.g. "normal", "bold", "700").
    #[serde(default = "default_normal")]
    pub font_weight: String,

    /// Glyph fill color.
    #[serde(default)]
    pub color: HexColor,

    /// Glyph fill color of the "hi" variant.
    #[serde(default)]
    pub color_hi: HexColor,

    /// Whether glyphs are stroked beneath the fill.
    #[serde(default)]
    pub outline: bool,

    /// Outline stroke width in pixels.
    #[serde(default = "default_outline_size")]
    pub outline_size: LenientInt,

    /// Outline stroke color.
    #[serde(default)]
    pub outline_color: HexColor,

    /// Outline stroke color of the "hi" variant.
    #[serde(default)]
    pub outline_color_hi: HexColor,

    /// Output base name used for artifact file names and the descriptor name.
    #[serde(default = "default_output_name")]
    pub output_name: String,

    /// Output-size scale factor: 10 (512x256) or 20 (1024x512). 0 selects 512x256.
    #[serde(default = "default_output_size")]
    pub output_size: u32,

    /// Left UV-adjust padding in pixels.
    #[serde(default)]
    pub uv_adjust_left: LenientInt,

    /// Right UV-adjust padding in pixels.
    #[serde(default)]
    pub uv_adjust_right: LenientInt,

    /// Top UV-adjust padding in pixels.
    #[serde(default)]
    pub uv_adjust_top: LenientInt,

    /// Bottom UV-adjust padding in pixels.
    #[serde(default)]
    pub uv_adjust_bottom: LenientInt,

    /// Background color used when composing previews.
    #[serde(default = "default_preview_background")]
    pub preview_background: HexColor,

    /// Compose the reference atlas beneath previews.
    #[serde(default = "default_true")]
    pub show_reference: bool,

    /// Draw the UV debug overlay.
    #[serde(default = "default_true")]
    pub show_debug_uv: bool,
}

fn default_font() -> String {
    "Arial".to_string()
}

fn default_normal() -> String {
    "normal".to_string()
}

fn default_font_size() -> String {
    "30px".to_string()
}

fn default_outline_size() -> LenientInt {
    LenientInt::new(2)
}

fn default_output_name() -> String {
    "My_Font".to_string()
}

fn default_output_size() -> u32 {
    20
}

fn default_preview_background() -> HexColor {
    HexColor::from_rgba8([0xcc, 0xcc, 0xcc, 0xff])
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            codepage: Codepage::default(),
            font: default_font(),
            font_path: None,
            font_style: default_normal(),
            font_size: default_font_size(),
            font_weight: default_normal(),
            color: HexColor::default(),
            color_hi: HexColor::default(),
            outline: false,
            outline_size: default_outline_size(),
            outline_color: HexColor::default(),
            outline_color_hi: HexColor::default(),
            output_name: default_output_name(),
            output_size: default_output_size(),
            uv_adjust_left: LenientInt::default(),
            uv_adjust_right: LenientInt::default(),
            uv_adjust_top: LenientInt::default(),
            uv_adjust_bottom: LenientInt::default(),
            preview_background: default_preview_background(),
            show_reference: true,
            show_debug_uv: true,
        }
    }
}

impl Settings {
    /// Parses settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes settings to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns the font size in pixels.
    pub fn font_px(&self) -> Result<f32, SettingsError> {
        parse_font_px(&self.font_size)
    }

    /// Returns the four UV-adjust paddings.
    pub fn uv_adjust(&self) -> UvAdjust {
        UvAdjust {
            left: self.uv_adjust_left.value(),
            right: self.uv_adjust_right.value(),
            top: self.uv_adjust_top.value(),
            bottom: self.uv_adjust_bottom.value(),
        }
    }

    /// Sets the codepage.
    pub fn with_codepage(mut self, codepage: Codepage) -> Self {
        self.codepage = codepage;
        self
    }

    /// Sets the output-size factor.
    pub fn with_output_size(mut self, output_size: u32) -> Self {
        self.output_size = output_size;
        self
    }

    /// Sets the output base name.
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self
    }

    /// Sets the outline flag and width.
    pub fn with_outline(mut self, enabled: bool, size: i32) -> Self {
        self.outline = enabled;
        self.outline_size = LenientInt::new(size);
        self
    }

    /// Sets the four UV-adjust paddings.
    pub fn with_uv_adjust(mut self, adjust: UvAdjust) -> Self {
        self.uv_adjust_left = LenientInt::new(adjust.left);
        self.uv_adjust_right = LenientInt::new(adjust.right);
        self.uv_adjust_top = LenientInt::new(adjust.top);
        self.uv_adjust_bottom = LenientInt::new(adjust.bottom);
        self
    }
}

/// Signed per-side growth of an emitted UV box, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UvAdjust {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

/// Parses "30px", "30" or "22.5px" into pixels.
fn parse_font_px(size: &str) -> Result<f32, SettingsError> {
    let trimmed = size.trim();
    let number = trimmed
        .strip_suffix("px")
        .unwrap_or(trimmed)
        .trim_end();
    match number.parse::<f32>() {
        Ok(px) if px.is_finite() && px > 0.0 => Ok(px),
        _ => Err(SettingsError::InvalidFontSize(size.to_string())),
    }
}

/// An integer field that never fails to load.
///
/// Accepts JSON numbers or strings. Strings are read like a leading-integer
/// parse (`"12px"` is 12, `" -3"` is -3); values with no leading integer
/// become 0 and are flagged as substituted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LenientInt {
    value: i32,
    substituted: bool,
}

impl LenientInt {
    /// Creates a lenient integer holding `value`.
    pub const fn new(value: i32) -> Self {
        Self {
            value,
            substituted: false,
        }
    }

    /// Parses a string, substituting 0 when no leading integer is present.
    pub fn parse(text: &str) -> Self {
        match parse_leading_int(text) {
            Some(value) => Self::new(value),
            None => {
                log::warn!("non-numeric value '{}' replaced with 0", text);
                Self {
                    value: 0,
                    substituted: true,
                }
            }
        }
    }

    /// Returns the integer value.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Returns true if the source value was not numeric.
    pub fn was_substituted(&self) -> bool {
        self.substituted
    }
}

fn parse_leading_int(text: &str) -> Option<i32> {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end]
        .bytes()
        .fold(0i64, |acc, b| (acc * 10 + i64::from(b - b'0')).min(i64::from(u32::MAX)));
    let signed = if negative { -magnitude } else { magnitude };
    Some(signed.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

impl Serialize for LenientInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.value)
    }
}

impl<'de> Deserialize<'de> for LenientInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(v) => LenientInt::new(v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32),
            Raw::Float(v) => LenientInt::new(v.trunc().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32),
            Raw::Text(s) => LenientInt::parse(&s),
        })
    }
}

/// An sRGB color written as `#rgb`, `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor([u8; 4]);

impl HexColor {
    /// Creates a color from RGBA bytes.
    pub const fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self(rgba)
    }

    /// Parses a hex color string.
    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        let invalid = || SettingsError::InvalidColor(text.to_string());
        let hex = text.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| invalid());
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        match hex.len() {
            3 => Ok(Self([
                nibble(0)? * 17,
                nibble(1)? * 17,
                nibble(2)? * 17,
                0xff,
            ])),
            6 => Ok(Self([byte(0)?, byte(2)?, byte(4)?, 0xff])),
            8 => Ok(Self([byte(0)?, byte(2)?, byte(4)?, byte(6)?])),
            _ => Err(invalid()),
        }
    }

    /// Returns the RGBA bytes.
    pub fn rgba8(&self) -> [u8; 4] {
        self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self([0, 0, 0, 0xff])
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b, a] = self.0;
        if a == 0xff {
            write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }
}

impl std::str::FromStr for HexColor {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HexColor::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = SettingsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.codepage, Codepage::Windows1250);
        assert_eq!(settings.font, "Arial");
        assert_eq!(settings.font_size, "30px");
        assert_eq!(settings.outline_size.value(), 2);
        assert_eq!(settings.output_name, "My_Font");
        assert_eq!(settings.output_size, 20);
        assert_eq!(settings.uv_adjust(), UvAdjust::default());
        assert_eq!(settings.preview_background.to_string(), "#cccccc");
        assert!(settings.show_reference);
        assert!(settings.show_debug_uv);
    }

    #[test]
    fn test_empty_document_is_default() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_roundtrip_json() {
        let settings = Settings::default()
            .with_codepage(Codepage::Windows1252)
            .with_output_size(10)
            .with_outline(true, 3);
        let json = settings.to_json_pretty().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Settings::from_json(r##"{"colour": "#fff"}"##).is_err());
    }

    #[test]
    fn test_lenient_int_from_strings() {
        let settings = Settings::from_json(
            r#"{
                "uv_adjust_left": "4",
                "uv_adjust_right": "-2px",
                "uv_adjust_top": "abc",
                "uv_adjust_bottom": 3.9,
                "outline_size": ""
            }"#,
        )
        .unwrap();
        assert_eq!(
            settings.uv_adjust(),
            UvAdjust {
                left: 4,
                right: -2,
                top: 0,
                bottom: 3
            }
        );
        assert!(settings.uv_adjust_top.was_substituted());
        assert!(!settings.uv_adjust_right.was_substituted());
        assert_eq!(settings.outline_size.value(), 0);
        assert!(settings.outline_size.was_substituted());
    }

    #[test]
    fn test_leading_int_parse() {
        assert_eq!(parse_leading_int("  12px"), Some(12));
        assert_eq!(parse_leading_int("+7"), Some(7));
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("1.9"), Some(1));
        assert_eq!(parse_leading_int("99999999999"), Some(i32::MAX));
        assert_eq!(parse_leading_int("-99999999999"), Some(i32::MIN));
    }

    #[test]
    fn test_font_px() {
        assert_eq!(parse_font_px("30px").unwrap(), 30.0);
        assert_eq!(parse_font_px(" 22.5px ").unwrap(), 22.5);
        assert_eq!(parse_font_px("16").unwrap(), 16.0);
        assert!(parse_font_px("0px").is_err());
        assert!(parse_font_px("large").is_err());
        assert!(parse_font_px("-4px").is_err());
    }

    #[test]
    fn test_hex_color_parse() {
        assert_eq!(HexColor::parse("#fff").unwrap().rgba8(), [255, 255, 255, 255]);
        assert_eq!(
            HexColor::parse("#0000ff").unwrap().rgba8(),
            [0, 0, 255, 255]
        );
        assert_eq!(
            HexColor::parse("#ff000040").unwrap().rgba8(),
            [255, 0, 0, 0x40]
        );
        assert!(HexColor::parse("red").is_err());
        assert!(HexColor::parse("#12345").is_err());
        assert!(HexColor::parse("#gggggg").is_err());
    }

    #[test]
    fn test_invalid_color_fails_load() {
        let err = Settings::from_json(r#"{"color": "blue"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid color"));
    }
}
