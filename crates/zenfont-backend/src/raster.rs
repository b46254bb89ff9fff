//! Per-cell glyph drawing.

use zenfont_spec::Settings;

use crate::color::Color;
use crate::placer::GlyphPlacement;
use crate::surface::Surface;
use crate::text::{DrawOptions, GlyphBackend};

/// Opacity of the debug UV boxes.
pub const DEBUG_ALPHA: f64 = 0.25;

/// Line width of the debug UV box border.
pub const DEBUG_LINE_WIDTH: f64 = 2.0;

/// Debug UV box fill (#0000ff).
pub const DEBUG_FILL: Color = Color::rgb(0.0, 0.0, 1.0);

/// Debug UV box border (#ff0000).
pub const DEBUG_STROKE: Color = Color::rgb(1.0, 0.0, 0.0);

/// Which configured color set an atlas is drawn with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Variant {
    /// `color` / `outline_color`.
    #[default]
    Base,
    /// `color_hi` / `outline_color_hi`.
    ///
    /// Resolvable, but the export path never renders it: the `_HI` artifacts
    /// are copies of the base atlas.
    Hi,
}

impl Variant {
    /// File-name suffix for artifacts of this variant.
    pub fn suffix(&self) -> &'static str {
        match self {
            Variant::Base => "",
            Variant::Hi => "_HI",
        }
    }
}

/// Colors and outline resolved for one variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphStyle {
    pub fill: Color,
    /// Outline line width and color, present only when the outline is enabled
    /// with a positive width.
    pub outline: Option<(f64, Color)>,
}

impl GlyphStyle {
    /// Resolves the style for `variant` from settings.
    pub fn for_variant(settings: &Settings, variant: Variant) -> Self {
        let (fill, outline_color) = match variant {
            Variant::Base => (settings.color, settings.outline_color),
            Variant::Hi => (settings.color_hi, settings.outline_color_hi),
        };
        let width = settings.outline_size.value();
        let outline = (settings.outline && width > 0)
            .then(|| (f64::from(width), Color::from(outline_color)));

        Self {
            fill: Color::from(fill),
            outline,
        }
    }
}

/// Draws one placed glyph: outline stroke first (if any), then the fill.
///
/// Both draws are limited to the cell width.
pub fn rasterize_cell<B: GlyphBackend + ?Sized>(
    backend: &B,
    surface: &mut Surface,
    placement: &GlyphPlacement,
    style: &GlyphStyle,
    cell_width: f64,
) {
    let ch = placement.character;
    if let Some((line_width, color)) = style.outline {
        let options = DrawOptions::stroke(color, line_width).with_max_width(cell_width);
        backend.draw(surface, ch, placement.draw_x, placement.baseline, &options);
    }
    let options = DrawOptions::fill(style.fill).with_max_width(cell_width);
    backend.draw(surface, ch, placement.draw_x, placement.baseline, &options);
}

/// Draws the translucent adjusted UV box of a placed glyph.
pub fn draw_debug_box(overlay: &mut Surface, placement: &GlyphPlacement) {
    overlay.fill_rect(placement.uv_box, DEBUG_FILL.with_opacity(DEBUG_ALPHA));
    overlay.stroke_rect(
        placement.uv_box,
        DEBUG_LINE_WIDTH,
        DEBUG_STROKE.with_opacity(DEBUG_ALPHA),
    );
}
