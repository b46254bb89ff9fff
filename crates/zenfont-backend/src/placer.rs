//! Glyph placement inside grid cells.
//!
//! Each glyph is centered in its cell with at least [`MIN_CENTERING_PADDING`]
//! pixels on the leading edges. The emitted UV box is the ink box grown by the
//! four UV-adjust paddings and normalized by the canvas size. No clamping is
//! applied: paddings that push the box off the canvas yield UVs outside [0, 1].

use zenfont_spec::{GlyphSlot, UvAdjust};

use crate::layout::{AtlasPlan, Cell};
use crate::surface::Rect;
use crate::text::GlyphMetrics;

/// Minimum horizontal and vertical centering padding in pixels.
pub const MIN_CENTERING_PADDING: f64 = 2.0;

/// Where one glyph is drawn and which UV box it emits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    /// Grid cell.
    pub cell: Cell,
    /// Character drawn in the cell.
    pub character: char,
    /// Measured metrics.
    pub metrics: GlyphMetrics,
    /// Left edge of the glyph box.
    pub draw_x: f64,
    /// Top edge of the glyph box.
    pub draw_y: f64,
    /// Baseline the glyph is drawn on.
    pub baseline: f64,
    /// Glyph box before UV adjustment.
    pub ink_box: Rect,
    /// Glyph box after UV adjustment.
    pub uv_box: Rect,
    /// Normalized top-left corner of `uv_box`.
    pub uv1: [f64; 2],
    /// Normalized bottom-right corner of `uv_box`.
    pub uv2: [f64; 2],
}

impl GlyphPlacement {
    /// Converts to the descriptor slot for this cell's byte value.
    pub fn to_slot(&self) -> GlyphSlot {
        GlyphSlot {
            index: self.cell.byte,
            character: Some(self.character),
            advance: self.metrics.advance,
            uv1: self.uv1,
            uv2: self.uv2,
        }
    }
}

/// Centers a glyph in `cell` and computes its adjusted UV box.
pub fn place_glyph(
    plan: &AtlasPlan,
    cell: Cell,
    character: char,
    metrics: GlyphMetrics,
    adjust: UvAdjust,
) -> GlyphPlacement {
    let glyph_height = metrics.height();
    let padding_x = ((plan.cell_width - metrics.advance) / 2.0).max(MIN_CENTERING_PADDING);
    let padding_y = ((plan.cell_height - glyph_height) / 2.0).max(MIN_CENTERING_PADDING);

    let draw_x = cell.x + padding_x;
    let draw_y = cell.y + padding_y;

    let left = f64::from(adjust.left);
    let right = f64::from(adjust.right);
    let top = f64::from(adjust.top);
    let bottom = f64::from(adjust.bottom);

    let ink_box = Rect::new(draw_x, draw_y, metrics.advance, glyph_height);
    let uv_box = Rect::new(
        draw_x - left,
        draw_y - top,
        metrics.advance + left + right,
        glyph_height + top + bottom,
    );

    let canvas_w = f64::from(plan.width);
    let canvas_h = f64::from(plan.height);

    GlyphPlacement {
        cell,
        character,
        metrics,
        draw_x,
        draw_y,
        baseline: draw_y + metrics.ascent,
        ink_box,
        uv_box,
        uv1: [uv_box.x / canvas_w, uv_box.y / canvas_h],
        uv2: [
            (uv_box.x + uv_box.width) / canvas_w,
            (uv_box.y + uv_box.height) / canvas_h,
        ],
    }
}
