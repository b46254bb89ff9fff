//! End-to-end tests for the atlas pipeline with a fixed-metrics glyph backend.
//!
//! No font files are needed: the stub measures every character with simple
//! arithmetic and draws a solid box, and records every draw call it receives.

use std::cell::RefCell;

use pretty_assertions::assert_eq;
use zenfont_backend::{
    alphabet_for, decode_descriptor, encode_descriptor, encode_surface, encoded_len, export_tga,
    hash_bytes, render_atlas, Color, DrawMode, DrawOptions, GlyphBackend, GlyphMetrics, Rect,
    Surface, Variant,
};
use zenfont_spec::{Codepage, FntPolicy, GlyphSlot, Settings, UvAdjust};

/// Records draw calls and paints a solid box for each glyph.
#[derive(Default)]
struct StubBackend {
    calls: RefCell<Vec<(char, DrawMode)>>,
}

impl GlyphBackend for StubBackend {
    fn measure(&self, ch: char) -> GlyphMetrics {
        GlyphMetrics {
            advance: 6.0 + f64::from(u32::from(ch) % 5),
            ascent: 14.0,
            descent: 4.0,
        }
    }

    fn draw(&self, surface: &mut Surface, ch: char, x: f64, baseline: f64, options: &DrawOptions) {
        self.calls.borrow_mut().push((ch, options.mode));
        let advance = self.measure(ch).advance;
        let width = options.max_width.map_or(advance, |max| advance.min(max));
        surface.fill_rect(Rect::new(x, baseline - 10.0, width, 10.0), options.color);
    }
}

fn settings_1252() -> Settings {
    Settings::default()
        .with_codepage(Codepage::Windows1252)
        .with_output_size(10)
        .with_output_name("My_Font")
}

// ============================================================================
// Descriptor
// ============================================================================

#[test]
fn test_reserved_slots_for_every_configuration() {
    for codepage in Codepage::ALL {
        for size in [0, 10, 20] {
            let settings = Settings::default()
                .with_codepage(codepage)
                .with_output_size(size)
                .with_uv_adjust(UvAdjust {
                    left: 3,
                    right: -1,
                    top: 7,
                    bottom: 2,
                });
            let result = render_atlas(&settings, &StubBackend::default(), Variant::Base).unwrap();
            for index in 0..32u8 {
                assert_eq!(
                    result.descriptor.slot(index).unwrap(),
                    &GlyphSlot::reserved(index)
                );
            }
        }
    }
}

#[test]
fn test_slots_follow_alphabet_order() {
    let settings = Settings::default().with_codepage(Codepage::Windows1251);
    let result = render_atlas(&settings, &StubBackend::default(), Variant::Base).unwrap();
    let alphabet = alphabet_for(Codepage::Windows1251);

    for (i, ch) in alphabet.iter().enumerate() {
        let slot = result.descriptor.slot(32 + i as u8).unwrap();
        assert_eq!(slot.character, Some(*ch));
        assert_eq!(slot.index as usize, 32 + i);
    }
    assert_eq!(result.descriptor.slot(0xC0).unwrap().character, Some('А'));
}

#[test]
fn test_reference_example_header() {
    let result = render_atlas(&settings_1252(), &StubBackend::default(), Variant::Base).unwrap();
    assert_eq!(result.plan.width, 512);
    assert_eq!(result.plan.height, 256);

    let bytes = encode_descriptor(&result.descriptor, FntPolicy::Reference).unwrap();
    assert_eq!(&bytes[2..13], b"MY_FONT.TGA");

    let decoded = decode_descriptor(&bytes).unwrap();
    assert_eq!(decoded.name, "MY_FONT.TGA");
    assert_eq!(decoded.letters, 256);
    assert_eq!(decoded.cell_height, 32.0);
}

#[test]
fn test_height_for_large_atlas() {
    let settings = settings_1252().with_output_size(20);
    let result = render_atlas(&settings, &StubBackend::default(), Variant::Base).unwrap();
    let bytes = encode_descriptor(&result.descriptor, FntPolicy::Reference).unwrap();
    assert_eq!(decode_descriptor(&bytes).unwrap().cell_height, 64.0);
}

#[test]
fn test_encoded_length_tracks_name() {
    for name in ["A", "My_Font", "a_much_longer_font_name"] {
        let settings = Settings::default().with_output_name(name);
        let result = render_atlas(&settings, &StubBackend::default(), Variant::Base).unwrap();
        let bytes = encode_descriptor(&result.descriptor, FntPolicy::Reference).unwrap();
        let name_len = name.len() + ".TGA".len();
        assert_eq!(bytes.len(), encoded_len(name_len));
        assert_eq!(bytes.len(), 2 + name_len + 1 + 4 + 4 + 256 + 2048 + 2048);
    }
}

#[test]
fn test_widths_encoded_per_slot() {
    let result = render_atlas(&settings_1252(), &StubBackend::default(), Variant::Base).unwrap();
    let bytes = encode_descriptor(&result.descriptor, FntPolicy::Reference).unwrap();
    let decoded = decode_descriptor(&bytes).unwrap();

    // 'A' = 65, 65 % 5 = 0
    assert_eq!(decoded.slot(65).unwrap().advance, 6.0);
    // 'C' = 67, 67 % 5 = 2
    assert_eq!(decoded.slot(67).unwrap().advance, 8.0);
}

// ============================================================================
// Placement
// ============================================================================

#[test]
fn test_zero_paddings_emit_ink_box() {
    let result = render_atlas(&settings_1252(), &StubBackend::default(), Variant::Base).unwrap();
    for placement in &result.placements {
        assert_eq!(placement.uv_box, placement.ink_box);
        assert!(placement.draw_x >= placement.cell.x + 2.0);
        assert!(placement.draw_y >= placement.cell.y + 2.0);
    }
}

#[test]
fn test_paddings_grow_uv_box() {
    let adjust = UvAdjust {
        left: 2,
        right: 3,
        top: 1,
        bottom: 4,
    };
    let settings = settings_1252().with_uv_adjust(adjust);
    let result = render_atlas(&settings, &StubBackend::default(), Variant::Base).unwrap();
    let p = &result.placements[33];
    assert_eq!(p.uv_box.x, p.ink_box.x - 2.0);
    assert_eq!(p.uv_box.y, p.ink_box.y - 1.0);
    assert_eq!(p.uv_box.width, p.ink_box.width + 5.0);
    assert_eq!(p.uv_box.height, p.ink_box.height + 5.0);
}

#[test]
fn test_huge_paddings_keep_uvs_and_render_promptly() {
    let adjust = UvAdjust {
        left: 80_000,
        right: 80_000,
        top: 80_000,
        bottom: 80_000,
    };
    let settings = settings_1252().with_uv_adjust(adjust);
    let started = std::time::Instant::now();
    let result = render_atlas(&settings, &StubBackend::default(), Variant::Base).unwrap();
    assert!(started.elapsed() < std::time::Duration::from_secs(60));

    let p = &result.placements[0];
    assert_eq!(p.uv_box.x, p.ink_box.x - 80_000.0);
    assert_eq!(p.uv_box.width, p.ink_box.width + 160_000.0);
    let slot = result.descriptor.slot(32).unwrap();
    assert!(slot.uv1[0] < 0.0);
    assert!(slot.uv2[0] > 1.0);
    assert!(!result.debug_overlay.unwrap().is_blank());
}

// ============================================================================
// Raster
// ============================================================================

#[test]
fn test_outline_disabled_issues_only_fills() {
    let backend = StubBackend::default();
    render_atlas(&settings_1252(), &backend, Variant::Base).unwrap();
    let calls = backend.calls.borrow();
    assert_eq!(calls.len(), 224);
    assert!(calls.iter().all(|(_, mode)| *mode == DrawMode::Fill));
}

#[test]
fn test_outline_stroked_before_fill() {
    let backend = StubBackend::default();
    let settings = settings_1252().with_outline(true, 3);
    render_atlas(&settings, &backend, Variant::Base).unwrap();
    let calls = backend.calls.borrow();
    assert_eq!(calls.len(), 448);
    for pair in calls.chunks_exact(2) {
        assert_eq!(pair[0].0, pair[1].0);
        assert_eq!(pair[0].1, DrawMode::Stroke { line_width: 3.0 });
        assert_eq!(pair[1].1, DrawMode::Fill);
    }
}

#[test]
fn test_debug_overlay_follows_flag() {
    let mut settings = settings_1252();
    let result = render_atlas(&settings, &StubBackend::default(), Variant::Base).unwrap();
    let overlay = result.debug_overlay.unwrap();
    assert!(!overlay.is_blank());
    // Inside the first UV box: translucent blue over nothing.
    let p = &result.placements[0];
    let px = overlay.get((p.uv_box.x + 4.0) as u32, (p.uv_box.y + 6.0) as u32);
    assert!((px.a - 0.25).abs() < 1e-9);
    assert_eq!(px.b, 1.0);

    settings.show_debug_uv = false;
    let result = render_atlas(&settings, &StubBackend::default(), Variant::Base).unwrap();
    assert!(result.debug_overlay.is_none());
}

#[test]
fn test_hi_variant_uses_hi_colors() {
    let mut settings = settings_1252();
    settings.color_hi = "#ff0000".parse().unwrap();
    let base = render_atlas(&settings, &StubBackend::default(), Variant::Base).unwrap();
    let hi = render_atlas(&settings, &StubBackend::default(), Variant::Hi).unwrap();
    assert_eq!(base.descriptor, hi.descriptor);
    assert_ne!(base.atlas, hi.atlas);

    let p = &hi.placements[33];
    let px = hi.atlas.get((p.draw_x + 1.0) as u32, (p.baseline - 5.0) as u32);
    assert_eq!(px, Color::rgb(1.0, 0.0, 0.0));
}

// ============================================================================
// Export bytes
// ============================================================================

#[test]
fn test_render_is_deterministic() {
    let settings = settings_1252().with_outline(true, 2);
    let hashes = || {
        let result = render_atlas(&settings, &StubBackend::default(), Variant::Base).unwrap();
        let fnt = encode_descriptor(&result.descriptor, FntPolicy::Reference).unwrap();
        let png = encode_surface(&result.atlas).unwrap();
        let tga = export_tga(&png).unwrap();
        (hash_bytes(&fnt), hash_bytes(&png), hash_bytes(&tga))
    };
    assert_eq!(hashes(), hashes());
}

#[test]
fn test_atlas_tga_alpha_depth() {
    let result = render_atlas(&settings_1252(), &StubBackend::default(), Variant::Base).unwrap();
    let tga = export_tga(&encode_surface(&result.atlas).unwrap()).unwrap();
    assert_eq!(tga[0x11], 8);
    assert_eq!(tga.len(), 18 + 512 * 256 * 4);
}
