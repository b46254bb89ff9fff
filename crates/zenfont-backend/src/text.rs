//! Glyph measurement and drawing.
//!
//! The atlas pipeline only needs two things from a text engine: per-glyph
//! metrics and the ability to draw a glyph at a pen position. Both live behind
//! [`GlyphBackend`] so the layout and descriptor code can be tested with a
//! fixed-metrics stub. [`FontdueBackend`] is the real implementation on top of
//! a TrueType/OpenType file.

use std::path::Path;

use fontdue::{Font, FontSettings};
use thiserror::Error;
use zenfont_spec::{Settings, SettingsError, MAX_OUTLINE_SIZE};

use crate::color::Color;
use crate::surface::Surface;

/// Errors from loading or configuring a glyph backend.
#[derive(Debug, Error)]
pub enum TextError {
    /// No font file is configured for the family.
    #[error("no font file configured for family '{0}' (set font_path)")]
    NoFontFile(String),

    /// Font file could not be read.
    #[error("failed to read font file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Font data could not be parsed.
    #[error("failed to load font: {0}")]
    Parse(String),

    /// Font has no horizontal line metrics.
    #[error("font has no horizontal line metrics")]
    NoLineMetrics,

    /// Font size setting is invalid.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Per-glyph measurements in pixels.
///
/// `ascent` and `descent` are the font bounding box extents above and below
/// the baseline, both positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Horizontal advance width.
    pub advance: f64,
    /// Distance from baseline to the top of the font bounding box.
    pub ascent: f64,
    /// Distance from baseline to the bottom of the font bounding box.
    pub descent: f64,
}

impl GlyphMetrics {
    /// Glyph box height (`ascent + descent`).
    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// How a glyph is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawMode {
    /// Solid interior.
    Fill,
    /// Outline of the given line width, centered on the glyph edge.
    Stroke { line_width: f64 },
}

/// Options for one glyph draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOptions {
    pub mode: DrawMode,
    pub color: Color,
    /// Glyphs wider than this are compressed horizontally to fit.
    pub max_width: Option<f64>,
}

impl DrawOptions {
    /// Fill with `color`.
    pub fn fill(color: Color) -> Self {
        Self {
            mode: DrawMode::Fill,
            color,
            max_width: None,
        }
    }

    /// Stroke with `color` at `line_width`.
    pub fn stroke(color: Color, line_width: f64) -> Self {
        Self {
            mode: DrawMode::Stroke { line_width },
            color,
            max_width: None,
        }
    }

    /// Sets the maximum drawn width.
    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }
}

/// Measures and draws single glyphs.
pub trait GlyphBackend {
    /// Measures one character.
    fn measure(&self, ch: char) -> GlyphMetrics;

    /// Draws one character with its pen at `x` on the given `baseline`.
    fn draw(&self, surface: &mut Surface, ch: char, x: f64, baseline: f64, options: &DrawOptions);
}

/// Glyph backend rasterizing with `fontdue`.
pub struct FontdueBackend {
    font: Font,
    px: f32,
    ascent: f64,
    descent: f64,
}

impl std::fmt::Debug for FontdueBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontdueBackend")
            .field("px", &self.px)
            .field("ascent", &self.ascent)
            .field("descent", &self.descent)
            .finish_non_exhaustive()
    }
}

impl FontdueBackend {
    /// Loads a font from raw bytes at a pixel size.
    pub fn from_bytes(bytes: &[u8], px: f32) -> Result<Self, TextError> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| TextError::Parse(e.to_string()))?;
        let line = font
            .horizontal_line_metrics(px)
            .ok_or(TextError::NoLineMetrics)?;

        let backend = Self {
            font,
            px,
            ascent: f64::from(line.ascent),
            descent: f64::from(-line.descent),
        };
        log::debug!(
            "Font loaded at {}px (ascent {:.2}, descent {:.2})",
            px,
            backend.ascent,
            backend.descent
        );
        Ok(backend)
    }

    /// Loads a font file at a pixel size.
    pub fn from_file(path: &Path, px: f32) -> Result<Self, TextError> {
        let bytes = std::fs::read(path).map_err(|source| TextError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(&bytes, px)
    }

    /// Loads the font configured by `settings` at its font size.
    ///
    /// `font_style` and `font_weight` are not applied; the configured file is
    /// used as-is.
    pub fn from_settings(settings: &Settings) -> Result<Self, TextError> {
        let px = settings.font_px()?;
        let path = settings
            .font_path
            .as_deref()
            .ok_or_else(|| TextError::NoFontFile(settings.font.clone()))?;
        log::info!("Loading font '{}' from {}", settings.font, path.display());
        Self::from_file(path, px)
    }

    /// Pixel size the font is rasterized at.
    pub fn px(&self) -> f32 {
        self.px
    }

    fn coverage(&self, ch: char) -> Coverage {
        let (metrics, bitmap) = self.font.rasterize(ch, self.px);
        Coverage {
            width: metrics.width,
            height: metrics.height,
            left: i64::from(metrics.xmin),
            top: -(i64::from(metrics.ymin) + metrics.height as i64),
            data: bitmap.iter().map(|&v| f64::from(v) / 255.0).collect(),
        }
    }
}

impl GlyphBackend for FontdueBackend {
    fn measure(&self, ch: char) -> GlyphMetrics {
        let metrics = self.font.metrics(ch, self.px);
        GlyphMetrics {
            advance: f64::from(metrics.advance_width),
            ascent: self.ascent,
            descent: self.descent,
        }
    }

    fn draw(&self, surface: &mut Surface, ch: char, x: f64, baseline: f64, options: &DrawOptions) {
        let mut coverage = self.coverage(ch);
        if let DrawMode::Stroke { line_width } = options.mode {
            coverage = coverage.outline(line_width / 2.0);
        }

        let advance = f64::from(self.font.metrics(ch, self.px).advance_width);
        let scale_x = match options.max_width {
            Some(max) if max > 0.0 && advance > max => max / advance,
            _ => 1.0,
        };
        coverage.composite(surface, x, baseline, scale_x, options.color);
    }
}

/// An 8-bit glyph coverage mask positioned relative to the pen.
#[derive(Debug, Clone, PartialEq)]
struct Coverage {
    width: usize,
    height: usize,
    /// Column of the mask's left edge relative to the pen x.
    left: i64,
    /// Row of the mask's top edge relative to the baseline.
    top: i64,
    data: Vec<f64>,
}

impl Coverage {
    fn get(&self, x: i64, y: i64) -> f64 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return 0.0;
        }
        self.data[y as usize * self.width + x as usize]
    }

    /// Dilates the mask by `radius` and removes the interior, leaving a band
    /// centered on the glyph edge. The radius is capped at half the widest
    /// outline stroke.
    fn outline(&self, radius: f64) -> Coverage {
        if radius.is_nan() || radius <= 0.0 || self.width == 0 || self.height == 0 {
            return self.clone();
        }
        let radius = radius.min(f64::from(MAX_OUTLINE_SIZE) / 2.0);
        let reach = radius.ceil() as i64;
        let disk: Vec<(i64, i64)> = (-reach..=reach)
            .flat_map(|dy| (-reach..=reach).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| ((dx * dx + dy * dy) as f64).sqrt() <= radius)
            .collect();
        let width = self.width + 2 * reach as usize;
        let height = self.height + 2 * reach as usize;
        let mut data = vec![0.0; width * height];

        for y in 0..height as i64 {
            for x in 0..width as i64 {
                let sx = x - reach;
                let sy = y - reach;
                let mut dilated: f64 = 0.0;
                let mut eroded: f64 = 1.0;
                for &(dx, dy) in &disk {
                    let v = self.get(sx + dx, sy + dy);
                    dilated = dilated.max(v);
                    eroded = eroded.min(v);
                }
                data[y as usize * width + x as usize] = (dilated - eroded).clamp(0.0, 1.0);
            }
        }

        Coverage {
            width,
            height,
            left: self.left - reach,
            top: self.top - reach,
            data,
        }
    }

    /// Blends the mask onto `surface` with nearest-pixel sampling, compressing
    /// horizontally around the pen by `scale_x`.
    fn composite(&self, surface: &mut Surface, pen_x: f64, baseline: f64, scale_x: f64, color: Color) {
        if self.width == 0 || self.height == 0 || scale_x <= 0.0 {
            return;
        }
        let row0 = baseline.round() as i64 + self.top;
        let x0 = pen_x + self.left as f64 * scale_x;
        let x1 = pen_x + (self.left + self.width as i64) as f64 * scale_x;

        for row in 0..self.height as i64 {
            for dx in x0.floor() as i64..x1.ceil() as i64 {
                let src = ((dx as f64 + 0.5 - pen_x) / scale_x).floor() as i64 - self.left;
                let value = self.get(src, row);
                surface.blend(dx, row0 + row, color, value);
            }
        }
    }
}
