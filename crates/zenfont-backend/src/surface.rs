//! Drawing surface for the atlas and its debug overlay.

use crate::color::Color;

/// A 2D straight-alpha RGBA surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data (row-major).
    pub data: Vec<Color>,
}

/// An axis-aligned rectangle in pixel space. Width and height may be negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns (x0, y0, x1, y1) with x0 <= x1 and y0 <= y1.
    pub fn normalized(&self) -> (f64, f64, f64, f64) {
        let (x0, x1) = min_max(self.x, self.x + self.width);
        let (y0, y1) = min_max(self.y, self.y + self.height);
        (x0, y0, x1, y1)
    }

    /// Area of `[px, px+1) x [py, py+1)` covered by this rectangle.
    fn pixel_coverage(&self, px: i64, py: i64) -> f64 {
        let (x0, y0, x1, y1) = self.normalized();
        span_overlap(px as f64, x0, x1) * span_overlap(py as f64, y0, y1)
    }
}

fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Pixel indices touched by `[lo, hi)`, clipped to `0..limit`.
fn pixel_span(lo: f64, hi: f64, limit: u32) -> std::ops::Range<i64> {
    let limit = i64::from(limit);
    let start = lo.floor().clamp(0.0, limit as f64) as i64;
    let end = hi.ceil().clamp(0.0, limit as f64) as i64;
    start..end.max(start)
}

fn span_overlap(start: f64, lo: f64, hi: f64) -> f64 {
    ((start + 1.0).min(hi) - start.max(lo)).max(0.0)
}

impl Surface {
    /// Create a new fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::transparent())
    }

    /// Create a new surface filled with a color.
    pub fn filled(width: u32, height: u32, fill: Color) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            data: vec![fill; size],
        }
    }

    /// Create from 8-bit RGBA bytes. Returns `None` if the length does not match.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        let data = bytes
            .chunks_exact(4)
            .map(|px| Color::from_rgba8([px[0], px[1], px[2], px[3]]))
            .collect();
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        let idx = (y as usize) * (self.width as usize) + x as usize;
        self.data[idx]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = (y as usize) * (self.width as usize) + x as usize;
        self.data[idx] = color;
    }

    /// Composite `color` at signed coordinates with the given coverage.
    /// Pixels outside the surface are ignored.
    #[inline]
    pub fn blend(&mut self, x: i64, y: i64, color: Color, coverage: f64) {
        if coverage <= 0.0 || x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64
        {
            return;
        }
        let idx = (y as usize) * (self.width as usize) + x as usize;
        self.data[idx] = self.data[idx].over(&color.with_opacity(coverage.min(1.0)));
    }

    /// Fill a rectangle with anti-aliased edges.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (x0, y0, x1, y1) = rect.normalized();
        for py in pixel_span(y0, y1, self.height) {
            for px in pixel_span(x0, x1, self.width) {
                self.blend(px, py, color, rect.pixel_coverage(px, py));
            }
        }
    }

    /// Stroke a rectangle outline centered on its edges.
    pub fn stroke_rect(&mut self, rect: Rect, line_width: f64, color: Color) {
        if line_width <= 0.0 {
            return;
        }
        let (x0, y0, x1, y1) = rect.normalized();
        let half = line_width / 2.0;
        let outer = Rect::new(x0 - half, y0 - half, x1 - x0 + line_width, y1 - y0 + line_width);
        let inner_w = x1 - x0 - line_width;
        let inner_h = y1 - y0 - line_width;
        let inner = (inner_w > 0.0 && inner_h > 0.0)
            .then(|| Rect::new(x0 + half, y0 + half, inner_w, inner_h));

        let (ox0, oy0, ox1, oy1) = outer.normalized();
        for py in pixel_span(oy0, oy1, self.height) {
            for px in pixel_span(ox0, ox1, self.width) {
                let mut coverage = outer.pixel_coverage(px, py);
                if let Some(inner) = inner {
                    coverage -= inner.pixel_coverage(px, py);
                }
                self.blend(px, py, color, coverage);
            }
        }
    }

    /// Composite another surface of the same size over this one.
    pub fn draw_surface(&mut self, top: &Surface) {
        if top.width != self.width || top.height != self.height {
            return;
        }
        for (dst, src) in self.data.iter_mut().zip(&top.data) {
            *dst = dst.over(src);
        }
    }

    /// Returns true if every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|c| c.a <= 0.0)
    }

    /// Convert to 8-bit RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for color in &self.data {
            bytes.extend_from_slice(&color.to_rgba8());
        }
        bytes
    }
}
