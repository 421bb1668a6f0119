//! Text layout engine
//!
//! Turns a byte string into a run of placed glyphs. Measuring and drawing
//! both walk the same [`GlyphRun`], so the width a caller measures is exactly
//! the distance the pen travels when the text is drawn.
//!
//! # Layout Coordinate System
//!
//! - Offsets are relative to the start of the run, in user units
//! - +X points along the baseline
//! - Glyph outlines are in em units scaled by the point size

use crate::core::MalformedUtf8Policy;
use crate::foundation::math::FIXED_ONE;

use super::{Codepoints, Font, GlyphIndex};

/// One glyph positioned along the baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    /// Glyph drawn
    pub glyph: GlyphIndex,
    /// Codepoint it came from
    pub codepoint: u32,
    /// Pen offset from the start of the run
    pub offset: f32,
    /// Distance the pen moves after this glyph
    pub advance: f32,
}

/// Iterator placing each mapped codepoint of a string.
///
/// Codepoints without a glyph are skipped without moving the pen.
#[derive(Debug, Clone)]
pub struct GlyphRun<'t, 'f> {
    codepoints: Codepoints<'t>,
    font: &'f Font<'f>,
    point_size: f32,
    pen: f32,
}

impl GlyphRun<'_, '_> {
    /// Pen offset reached so far
    pub fn pen(&self) -> f32 {
        self.pen
    }

    /// Consume the rest of the run and return the final pen offset
    pub fn width(mut self) -> f32 {
        for _ in self.by_ref() {}
        self.pen
    }
}

impl Iterator for GlyphRun<'_, '_> {
    type Item = PlacedGlyph;

    fn next(&mut self) -> Option<PlacedGlyph> {
        for codepoint in self.codepoints.by_ref() {
            let Some(glyph) = self.font.lookup(codepoint) else {
                continue;
            };
            let advance = self.point_size * self.font.advance(glyph) as f32 / FIXED_ONE;
            let placed = PlacedGlyph {
                glyph,
                codepoint,
                offset: self.pen,
                advance,
            };
            self.pen += advance;
            return Some(placed);
        }
        None
    }
}

/// A fully laid-out string
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRun {
    /// Placed glyphs in drawing order
    pub glyphs: Vec<PlacedGlyph>,
    /// Total advance
    pub width: f32,
}

impl TextRun {
    /// Whether the run places no glyphs
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Lays out text against a loaded font
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextLayout {
    policy: MalformedUtf8Policy,
}

impl TextLayout {
    /// Create a layout engine with the given malformed UTF-8 policy
    pub fn new(policy: MalformedUtf8Policy) -> Self {
        Self { policy }
    }

    /// Malformed UTF-8 policy in use
    pub fn policy(&self) -> MalformedUtf8Policy {
        self.policy
    }

    /// Lazily place the glyphs of `text`
    pub fn glyphs<'t, 'f>(&self, text: &'t [u8], font: &'f Font<'f>, point_size: f32) -> GlyphRun<'t, 'f> {
        GlyphRun {
            codepoints: Codepoints::new(text, self.policy),
            font,
            point_size,
            pen: 0.0,
        }
    }

    /// Width of `text` at `point_size`, without drawing
    pub fn measure(&self, text: impl AsRef<[u8]>, font: &Font<'_>, point_size: f32) -> f32 {
        self.glyphs(text.as_ref(), font, point_size).width()
    }

    /// Collect the whole run
    pub fn layout(&self, text: impl AsRef<[u8]>, font: &Font<'_>, point_size: f32) -> TextRun {
        let mut run = self.glyphs(text.as_ref(), font, point_size);
        let glyphs: Vec<PlacedGlyph> = run.by_ref().collect();
        TextRun { glyphs, width: run.pen() }
    }
}

/// Width of `text` with the default decoding policy
pub fn measure_width(text: impl AsRef<[u8]>, font: &Font<'_>, point_size: f32) -> f32 {
    TextLayout::default().measure(text, font, point_size)
}

/// Line height of `font` at `point_size`
pub fn text_height(font: &Font<'_>, point_size: f32) -> f32 {
    font.height(point_size)
}

/// Depth below the baseline of `font` at `point_size`
pub fn text_depth(font: &Font<'_>, point_size: f32) -> f32 {
    font.depth(point_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{GlyphPathTable, RecordingBackend};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    static POINTS: [i32; 2] = [0, 0];
    static ZEROS: [i32; 3] = [0, 0, 0];
    static ADVANCES: [i32; 3] = [30000, 20000, 65536];

    // 'A' -> 0, 'B' -> 1, 0xE4 -> 2, code 1 undefined
    fn character_map() -> Vec<i16> {
        let mut map = vec![-1i16; 256];
        map[usize::from(b'A')] = 0;
        map[usize::from(b'B')] = 1;
        map[0xE4] = 2;
        map
    }

    fn with_font<R>(f: impl FnOnce(&Font<'_>) -> R) -> R {
        let map = character_map();
        let table = GlyphPathTable {
            points: &POINTS,
            point_indices: &ZEROS,
            instructions: &[],
            instruction_indices: &ZEROS,
            instruction_counts: &ZEROS,
            advances: &ADVANCES,
            character_map: &map,
            glyph_count: 3,
            font_height: 65536,
            descender_height: -16384,
        };
        let mut backend = RecordingBackend::new();
        let font = Font::load(&table, &mut backend, 500).unwrap();
        let result = f(&font);
        font.unload(&mut backend).unwrap();
        result
    }

    #[test]
    fn test_single_glyph_width() {
        with_font(|font| {
            let width = measure_width("A", font, 100.0);
            assert_relative_eq!(width, 100.0 * 30000.0 / 65536.0, epsilon = EPSILON);
            assert_relative_eq!(width, 45.776_367, epsilon = EPSILON);
        });
    }

    #[test]
    fn test_offsets_accumulate() {
        with_font(|font| {
            let run = TextLayout::default().layout("ABA", font, 65536.0);
            let offsets: Vec<f32> = run.glyphs.iter().map(|g| g.offset).collect();

            assert_eq!(offsets, vec![0.0, 30000.0, 50000.0]);
            assert_eq!(run.width, 80000.0);
        });
    }

    #[test]
    fn test_undefined_glyph_is_skipped() {
        with_font(|font| {
            let layout = TextLayout::default();
            let run = layout.layout("A\x01B", font, 12.0);

            assert_eq!(run.glyphs.len(), 2);
            assert_eq!(run.width, layout.measure("A", font, 12.0) + layout.measure("B", font, 12.0));
        });
    }

    #[test]
    fn test_empty_and_unmapped_text_have_zero_width() {
        with_font(|font| {
            assert_eq!(measure_width("", font, 12.0), 0.0);
            assert_eq!(measure_width("\x01\x02zz", font, 12.0), 0.0);
            assert!(TextLayout::default().layout("", font, 12.0).is_empty());
        });
    }

    #[test]
    fn test_out_of_range_codepoint_is_skipped() {
        with_font(|font| {
            // U+20AC decodes fine but is past the 256-entry map
            let run = TextLayout::default().layout("A€", font, 10.0);
            assert_eq!(run.glyphs.len(), 1);
        });
    }

    #[test]
    fn test_multibyte_lookup() {
        with_font(|font| {
            let run = TextLayout::default().layout([0xC3u8, 0xA4], font, 1.0);
            assert_eq!(run.glyphs[0].codepoint, 0xE4);
            assert_eq!(run.glyphs[0].glyph, GlyphIndex(2));
            assert_eq!(run.width, 1.0);
        });
    }

    #[test]
    fn test_malformed_byte_policies() {
        with_font(|font| {
            let text = [b'A', 0xFF, b'B'];
            let truncated = TextLayout::new(MalformedUtf8Policy::Truncate).layout(text, font, 1.0);
            let resynced = TextLayout::new(MalformedUtf8Policy::Resync).layout(text, font, 1.0);

            assert_eq!(truncated.glyphs.len(), 1);
            assert_eq!(resynced.glyphs.len(), 2);
        });
    }

    #[test]
    fn test_height_and_depth() {
        with_font(|font| {
            assert_relative_eq!(text_height(font, 24.0), 24.0, epsilon = EPSILON);
            assert_relative_eq!(text_depth(font, 24.0), 6.0, epsilon = EPSILON);
        });
    }
}
