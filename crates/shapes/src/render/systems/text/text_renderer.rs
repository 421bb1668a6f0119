//! Text rendering
//!
//! Draws a [`GlyphRun`](super::GlyphRun) through a [`RenderBackend`]. Each
//! glyph gets its own transform built from the ambient one, so rounding in
//! one glyph's matrix never carries into the next:
//!
//! ```text
//! glyph transform = ambient * [size 0 x+offset; 0 size y; 0 0 1]
//! ```
//!
//! The ambient transform is back in place when a call returns, whether or
//! not drawing succeeded.

use crate::core::MalformedUtf8Policy;
use crate::foundation::math::{Mat3, Mat3Ext};
use crate::render::api::{BackendResult, PaintMode, RenderBackend};
use crate::render::Color;

use super::{Font, TextLayout};

/// Draws text with a loaded font
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextRenderer {
    layout: TextLayout,
}

impl TextRenderer {
    /// Create a renderer with the given malformed UTF-8 policy
    pub fn new(policy: MalformedUtf8Policy) -> Self {
        Self {
            layout: TextLayout::new(policy),
        }
    }

    /// Get the text layout engine
    pub fn text_layout(&self) -> &TextLayout {
        &self.layout
    }

    /// Width `text` would occupy
    pub fn measure(&self, text: impl AsRef<[u8]>, font: &Font<'_>, point_size: f32) -> f32 {
        self.layout.measure(text, font, point_size)
    }

    /// Draw `text` with its baseline starting at `(x, y)`.
    ///
    /// Returns the distance the pen advanced.
    pub fn draw<B>(
        &self,
        backend: &mut B,
        font: &Font<'_>,
        text: impl AsRef<[u8]>,
        x: f32,
        y: f32,
        point_size: f32,
    ) -> BackendResult<f32>
    where
        B: RenderBackend + ?Sized,
    {
        let ambient = backend.transform();
        let result = self.draw_glyphs(backend, &ambient, font, text.as_ref(), x, y, point_size);
        backend.load_transform(&ambient);
        result
    }

    fn draw_glyphs<B>(
        &self,
        backend: &mut B,
        ambient: &Mat3,
        font: &Font<'_>,
        text: &[u8],
        x: f32,
        y: f32,
        point_size: f32,
    ) -> BackendResult<f32>
    where
        B: RenderBackend + ?Sized,
    {
        let mut run = self.layout.glyphs(text, font, point_size);
        for placed in run.by_ref() {
            let Some(outline) = font.outline(placed.glyph) else {
                continue;
            };
            backend.load_transform(ambient);
            backend.multiply_transform(&Mat3::scale_then_translate(point_size, x + placed.offset, y));
            backend.draw_path(outline.path, PaintMode::FILL)?;
        }
        Ok(run.pen())
    }

    /// Draw `text` centered on `x`
    pub fn draw_centered<B>(
        &self,
        backend: &mut B,
        font: &Font<'_>,
        text: impl AsRef<[u8]>,
        x: f32,
        y: f32,
        point_size: f32,
    ) -> BackendResult<f32>
    where
        B: RenderBackend + ?Sized,
    {
        let text = text.as_ref();
        let width = self.measure(text, font, point_size);
        self.draw(backend, font, text, x - width / 2.0, y, point_size)
    }

    /// Draw `text` so that it ends at `x`
    pub fn draw_right_aligned<B>(
        &self,
        backend: &mut B,
        font: &Font<'_>,
        text: impl AsRef<[u8]>,
        x: f32,
        y: f32,
        point_size: f32,
    ) -> BackendResult<f32>
    where
        B: RenderBackend + ?Sized,
    {
        let text = text.as_ref();
        let width = self.measure(text, font, point_size);
        self.draw(backend, font, text, x - width, y, point_size)
    }

    /// Set the fill paint to `fill`, then draw.
    ///
    /// The fill paint is left at `fill`; callers tracking paint state
    /// restore their own.
    pub fn draw_with_fill<B>(
        &self,
        backend: &mut B,
        font: &Font<'_>,
        text: impl AsRef<[u8]>,
        x: f32,
        y: f32,
        point_size: f32,
        fill: Color,
    ) -> BackendResult<f32>
    where
        B: RenderBackend + ?Sized,
    {
        backend.set_paint(PaintMode::FILL, fill);
        self.draw(backend, font, text, x, y, point_size)
    }
}

/// Draw `text` at `(x, y)` with the default decoding policy
pub fn draw_text<B>(backend: &mut B, font: &Font<'_>, text: impl AsRef<[u8]>, x: f32, y: f32, point_size: f32) -> BackendResult<f32>
where
    B: RenderBackend + ?Sized,
{
    TextRenderer::default().draw(backend, font, text, x, y, point_size)
}

/// Draw `text` centered on `x` with the default decoding policy
pub fn draw_text_centered<B>(
    backend: &mut B,
    font: &Font<'_>,
    text: impl AsRef<[u8]>,
    x: f32,
    y: f32,
    point_size: f32,
) -> BackendResult<f32>
where
    B: RenderBackend + ?Sized,
{
    TextRenderer::default().draw_centered(backend, font, text, x, y, point_size)
}

/// Draw `text` ending at `x` with the default decoding policy
pub fn draw_text_right_aligned<B>(
    backend: &mut B,
    font: &Font<'_>,
    text: impl AsRef<[u8]>,
    x: f32,
    y: f32,
    point_size: f32,
) -> BackendResult<f32>
where
    B: RenderBackend + ?Sized,
{
    TextRenderer::default().draw_right_aligned(backend, font, text, x, y, point_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{measure_width, GlyphPathTable, RecordingBackend, RenderError};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;
    const MOVE: u8 = 2;
    const LINE: u8 = 4;
    const CLOSE: u8 = 0;

    // every glyph is the same unit triangle
    static POINTS: [i32; 6] = [0, 0, 65536, 0, 0, 65536];
    static POINT_INDICES: [i32; 2] = [0, 0];
    static INSTRUCTIONS: [u8; 4] = [MOVE, LINE, LINE, CLOSE];
    static INSTRUCTION_INDICES: [i32; 2] = [0, 0];
    static INSTRUCTION_COUNTS: [i32; 2] = [4, 4];

    fn table<'a>(advances: &'a [i32], map: &'a [i16]) -> GlyphPathTable<'a> {
        GlyphPathTable {
            points: &POINTS,
            point_indices: &POINT_INDICES,
            instructions: &INSTRUCTIONS,
            instruction_indices: &INSTRUCTION_INDICES,
            instruction_counts: &INSTRUCTION_COUNTS,
            advances,
            character_map: map,
            glyph_count: 2,
            font_height: 0,
            descender_height: 0,
        }
    }

    fn ab_map() -> Vec<i16> {
        let mut map = vec![-1i16; 128];
        map[usize::from(b'A')] = 0;
        map[usize::from(b'B')] = 1;
        map
    }

    #[test]
    fn test_draw_advances_like_measure() {
        let map = ab_map();
        let advances = [30000, 41234];
        let mut backend = RecordingBackend::new();
        let font = Font::load(&table(&advances, &map), &mut backend, 500).unwrap();

        let measured = measure_width("ABBA", &font, 100.0);
        let drawn = draw_text(&mut backend, &font, "ABBA", 0.0, 0.0, 100.0).unwrap();

        assert_eq!(measured, drawn);
        assert_eq!(backend.draws().len(), 4);
        assert_relative_eq!(measure_width("A", &font, 100.0), 45.776_367, epsilon = EPSILON);
        font.unload(&mut backend).unwrap();
    }

    #[test]
    fn test_glyph_transforms() {
        let map = ab_map();
        let advances = [65536, 65536];
        let mut backend = RecordingBackend::new();
        let font = Font::load(&table(&advances, &map), &mut backend, 500).unwrap();

        draw_text(&mut backend, &font, "AB", 10.0, 20.0, 12.0).unwrap();

        let draws = backend.draws();
        assert_eq!(draws[0].transform, Mat3::scale_then_translate(12.0, 10.0, 20.0));
        assert_eq!(draws[1].transform, Mat3::scale_then_translate(12.0, 22.0, 20.0));
        assert_eq!(draws[0].path, font.glyphs()[0].path);
        assert_eq!(draws[1].path, font.glyphs()[1].path);
        assert!(draws.iter().all(|d| d.mode == PaintMode::FILL));
        font.unload(&mut backend).unwrap();
    }

    #[test]
    fn test_ambient_transform_is_composed_and_restored() {
        let map = ab_map();
        let advances = [65536, 65536];
        let mut backend = RecordingBackend::new();
        let font = Font::load(&table(&advances, &map), &mut backend, 500).unwrap();
        let ambient = Mat3::translation(100.0, 50.0) * Mat3::rotation_degrees(90.0);
        backend.load_transform(&ambient);

        draw_text(&mut backend, &font, "AB", 1.0, 2.0, 3.0).unwrap();

        assert_eq!(backend.transform(), ambient);
        let expected = ambient * Mat3::scale_then_translate(3.0, 4.0, 2.0);
        assert_relative_eq!(backend.draws()[1].transform, expected, epsilon = EPSILON);
        font.unload(&mut backend).unwrap();
    }

    #[test]
    fn test_centered_and_right_aligned() {
        // 'A' is 40 units wide at point size 1
        let map = ab_map();
        let advances = [40 * 65536, 65536];
        let mut backend = RecordingBackend::new();
        let font = Font::load(&table(&advances, &map), &mut backend, 500).unwrap();

        draw_text_centered(&mut backend, &font, "A", 100.0, 0.0, 1.0).unwrap();
        draw_text_right_aligned(&mut backend, &font, "A", 100.0, 0.0, 1.0).unwrap();

        let draws = backend.draws();
        assert_relative_eq!(draws[0].transform.tx(), 80.0, epsilon = EPSILON);
        assert_relative_eq!(draws[1].transform.tx(), 60.0, epsilon = EPSILON);
        font.unload(&mut backend).unwrap();
    }

    #[test]
    fn test_undefined_glyph_draws_nothing() {
        let map = ab_map();
        let advances = [30000, 20000];
        let mut backend = RecordingBackend::new();
        let font = Font::load(&table(&advances, &map), &mut backend, 500).unwrap();

        let width = draw_text(&mut backend, &font, "A\x01B", 0.0, 0.0, 10.0).unwrap();

        assert_eq!(backend.draws().len(), 2);
        assert_eq!(width, measure_width("A", &font, 10.0) + measure_width("B", &font, 10.0));
        font.unload(&mut backend).unwrap();
    }

    #[test]
    fn test_malformed_byte_halts_drawing() {
        let map = ab_map();
        let advances = [30000, 20000];
        let mut backend = RecordingBackend::new();
        let font = Font::load(&table(&advances, &map), &mut backend, 500).unwrap();
        let text = [b'A', 0xFF, b'B'];

        let width = draw_text(&mut backend, &font, text, 0.0, 0.0, 10.0).unwrap();

        assert_eq!(backend.draws().len(), 1);
        assert_eq!(width, measure_width("A", &font, 10.0));
        assert_eq!(measure_width(text, &font, 10.0), width);

        backend.clear_draws();
        let resync = TextRenderer::new(MalformedUtf8Policy::Resync);
        resync.draw(&mut backend, &font, text, 0.0, 0.0, 10.0).unwrap();
        assert_eq!(backend.draws().len(), 2);
        font.unload(&mut backend).unwrap();
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let map = ab_map();
        let advances = [30000, 20000];
        let mut backend = RecordingBackend::new();
        let font = Font::load(&table(&advances, &map), &mut backend, 500).unwrap();

        assert_eq!(draw_text(&mut backend, &font, "", 5.0, 5.0, 10.0).unwrap(), 0.0);
        assert!(backend.draws().is_empty());
        font.unload(&mut backend).unwrap();
    }

    #[test]
    fn test_empty_font_skips_everything() {
        let map = ab_map();
        let mut backend = RecordingBackend::new();
        let empty = GlyphPathTable {
            glyph_count: 0,
            ..table(&[], &map)
        };
        let font = Font::load(&empty, &mut backend, 500).unwrap();

        assert_eq!(draw_text(&mut backend, &font, "AB", 0.0, 0.0, 10.0).unwrap(), 0.0);
        assert!(backend.draws().is_empty());
        font.unload(&mut backend).unwrap();
    }

    #[test]
    fn test_failed_draw_still_restores_transform() {
        let map = ab_map();
        let advances = [30000, 20000];
        let mut backend = RecordingBackend::new();
        let font = Font::load(&table(&advances, &map), &mut backend, 500).unwrap();
        backend.destroy_path(font.glyphs()[1].path).unwrap();
        let ambient = Mat3::translation(7.0, 7.0);
        backend.load_transform(&ambient);

        let result = draw_text(&mut backend, &font, "AB", 0.0, 0.0, 10.0);

        assert!(matches!(result, Err(RenderError::InvalidPath(_))));
        assert_eq!(backend.transform(), ambient);
        assert_eq!(backend.draws().len(), 1);
        // glyph 1 is already gone, so unload reports it
        assert!(font.unload(&mut backend).is_err());
    }

    #[test]
    fn test_draw_with_fill_sets_paint() {
        let map = ab_map();
        let advances = [30000, 20000];
        let mut backend = RecordingBackend::new();
        let font = Font::load(&table(&advances, &map), &mut backend, 500).unwrap();
        let red = Color::rgb(255, 0, 0);

        TextRenderer::default()
            .draw_with_fill(&mut backend, &font, "A", 0.0, 0.0, 10.0, red)
            .unwrap();

        assert_eq!(backend.draws()[0].fill, red);
        font.unload(&mut backend).unwrap();
    }

    #[test]
    fn test_stale_handles_after_unload() {
        let map = ab_map();
        let advances = [30000, 20000];
        let mut backend = RecordingBackend::new();
        let font = Font::load(&table(&advances, &map), &mut backend, 500).unwrap();
        let stale: Vec<_> = font.glyphs().iter().map(|g| g.path).collect();

        font.unload(&mut backend).unwrap();

        for path in stale {
            assert!(!backend.is_live(path));
            assert!(matches!(
                backend.draw_path(path, PaintMode::FILL),
                Err(RenderError::InvalidPath(_))
            ));
        }
    }
}
