//! Compact glyph path tables
//!
//! The on-disk-free font format: parallel arrays, usually generated from an
//! outline font and compiled in as static data.
//!
//! For glyph `i`:
//! - its coordinates start at `points[point_indices[i] * 2]`, interleaved
//!   `x, y` in 16.16 fixed point
//! - its opcodes are `instructions[instruction_indices[i]..][..instruction_counts[i]]`
//! - its advance is `advances[i]`, 16.16 fixed point
//!
//! `character_map[c]` gives the glyph for character code `c`, or `-1`.

/// Borrowed view over one typeface's glyph arrays
#[derive(Debug, Clone, Copy)]
pub struct GlyphPathTable<'a> {
    /// Interleaved fixed-point coordinates for all glyphs
    pub points: &'a [i32],
    /// Per-glyph start into `points`, counted in points (pairs)
    pub point_indices: &'a [i32],
    /// Opcode bytes for all glyphs
    pub instructions: &'a [u8],
    /// Per-glyph start into `instructions`
    pub instruction_indices: &'a [i32],
    /// Per-glyph opcode count
    pub instruction_counts: &'a [i32],
    /// Per-glyph advance width
    pub advances: &'a [i32],
    /// Character code to glyph index, `-1` for none
    pub character_map: &'a [i16],
    /// Number of glyphs the table declares
    pub glyph_count: usize,
    /// Line height, or 0 when the table predates height data
    pub font_height: i32,
    /// Descender (negative below the baseline), or 0 when absent
    pub descender_height: i32,
}

impl<'a> GlyphPathTable<'a> {
    /// Attach height and descender metrics
    pub fn with_metrics(mut self, font_height: i32, descender_height: i32) -> Self {
        self.font_height = font_height;
        self.descender_height = descender_height;
        self
    }
}
