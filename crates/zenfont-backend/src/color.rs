//! Straight-alpha colors and source-over compositing.

use zenfont_spec::HexColor;

/// RGBA color with f64 components (0.0 to 1.0 range), not premultiplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Create a new color with alpha = 1.0.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a new color with alpha.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::rgba(0.0, 0.0, 0.0, 0.0)
    }

    /// Create black.
    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Returns the same color with its alpha multiplied by `factor`.
    pub fn with_opacity(&self, factor: f64) -> Color {
        Color {
            a: self.a * factor,
            ..*self
        }
    }

    /// Clamp all components to [0.0, 1.0].
    pub fn clamp(&self) -> Color {
        Color {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Convert to 8-bit RGBA.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let c = self.clamp();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            (c.a * 255.0).round() as u8,
        ]
    }

    /// Create from 8-bit RGBA.
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self {
            r: rgba[0] as f64 / 255.0,
            g: rgba[1] as f64 / 255.0,
            b: rgba[2] as f64 / 255.0,
            a: rgba[3] as f64 / 255.0,
        }
    }

    /// Composite `src` over `self` (Porter-Duff source-over).
    pub fn over(&self, src: &Color) -> Color {
        let src_a = src.a.clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return *self;
        }
        let dst_a = self.a.clamp(0.0, 1.0);
        let out_a = src_a + dst_a * (1.0 - src_a);
        let mix = |s: f64, d: f64| (s * src_a + d * dst_a * (1.0 - src_a)) / out_a;
        Color {
            r: mix(src.r, self.r),
            g: mix(src.g, self.g),
            b: mix(src.b, self.b),
            a: out_a,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::transparent()
    }
}

impl From<HexColor> for Color {
    fn from(color: HexColor) -> Self {
        Color::from_rgba8(color.rgba8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_roundtrip() {
        let original = Color::rgb(0.5, 0.25, 0.75);
        let rgba = original.to_rgba8();
        let restored = Color::from_rgba8(rgba);

        // Allow for 8-bit quantization error
        assert!((original.r - restored.r).abs() < 0.01);
        assert!((original.g - restored.g).abs() < 0.01);
        assert!((original.b - restored.b).abs() < 0.01);
    }

    #[test]
    fn test_over_transparent_keeps_source() {
        let src = Color::rgba(1.0, 0.0, 0.0, 0.25);
        let out = Color::transparent().over(&src);
        assert_eq!(out.to_rgba8(), [255, 0, 0, 64]);
    }

    #[test]
    fn test_over_opaque_replaces() {
        let dst = Color::rgb(0.0, 0.0, 1.0);
        let out = dst.over(&Color::rgb(0.0, 1.0, 0.0));
        assert_eq!(out.to_rgba8(), [0, 255, 0, 255]);
    }

    #[test]
    fn test_over_half() {
        let dst = Color::rgb(0.0, 0.0, 0.0);
        let out = dst.over(&Color::rgba(1.0, 1.0, 1.0, 0.5));
        assert_eq!(out.to_rgba8(), [128, 128, 128, 255]);
    }

    #[test]
    fn test_from_hex_color() {
        let hex = HexColor::parse("#ff000080").unwrap();
        assert_eq!(Color::from(hex).to_rgba8(), [255, 0, 0, 128]);
    }
}
