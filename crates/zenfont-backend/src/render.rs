//! Full atlas rendering.
//!
//! Every call recomputes the plan, all 224 placements, both surfaces and the
//! descriptor from scratch. Nothing is cached between calls.

use thiserror::Error;
use zenfont_spec::{FontDescriptor, Settings};

use crate::alphabet::alphabet_for;
use crate::layout::{AtlasPlan, LayoutError};
use crate::placer::{place_glyph, GlyphPlacement};
use crate::raster::{draw_debug_box, rasterize_cell, GlyphStyle, Variant};
use crate::surface::Surface;
use crate::text::{FontdueBackend, GlyphBackend, TextError};

/// Errors from rendering an atlas.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Text(#[from] TextError),
}

/// Everything one render produces.
#[derive(Debug, Clone)]
pub struct RenderResult {
    /// Canvas and grid geometry.
    pub plan: AtlasPlan,
    /// One placement per cell, row-major.
    pub placements: Vec<GlyphPlacement>,
    /// Descriptor with slots 32..=255 filled from `placements`.
    pub descriptor: FontDescriptor,
    /// The glyph atlas.
    pub atlas: Surface,
    /// Adjusted UV boxes, present when `show_debug_uv` is set.
    pub debug_overlay: Option<Surface>,
}

/// Renders the atlas for `settings` with `backend` in the colors of `variant`.
pub fn render_atlas<B: GlyphBackend + ?Sized>(
    settings: &Settings,
    backend: &B,
    variant: Variant,
) -> Result<RenderResult, RenderError> {
    let plan = AtlasPlan::for_output_size(settings.output_size)?;
    let alphabet = alphabet_for(settings.codepage);
    let style = GlyphStyle::for_variant(settings, variant);
    let adjust = settings.uv_adjust();

    log::debug!(
        "Rendering {} atlas {}x{} (cell {:.3}x{:.3}, {:?})",
        settings.codepage,
        plan.width,
        plan.height,
        plan.cell_width,
        plan.cell_height,
        variant
    );

    let mut atlas = Surface::new(plan.width, plan.height);
    let mut debug_overlay = settings
        .show_debug_uv
        .then(|| Surface::new(plan.width, plan.height));
    let mut descriptor = FontDescriptor::new(&settings.output_name, plan.cell_height);
    let mut placements = Vec::with_capacity(plan.cell_count());

    for (cell, &ch) in plan.cells().zip(&alphabet) {
        let metrics = backend.measure(ch);
        let placement = place_glyph(&plan, cell, ch, metrics, adjust);

        rasterize_cell(backend, &mut atlas, &placement, &style, plan.cell_width);
        if let Some(overlay) = debug_overlay.as_mut() {
            draw_debug_box(overlay, &placement);
        }

        descriptor.set_slot(placement.to_slot());
        placements.push(placement);
    }

    log::debug!(
        "Placed {} glyphs for '{}'",
        placements.len(),
        descriptor.name
    );

    Ok(RenderResult {
        plan,
        placements,
        descriptor,
        atlas,
        debug_overlay,
    })
}

/// Loads the font configured in `settings` and renders with it.
pub fn render_with_font(settings: &Settings, variant: Variant) -> Result<RenderResult, RenderError> {
    let backend = FontdueBackend::from_settings(settings)?;
    render_atlas(settings, &backend, variant)
}
