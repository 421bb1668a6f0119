//! Block typeface
//!
//! A rectilinear capital-letter face made of axis-aligned bars. Outlines
//! sit on a 16-unit em (one unit is 4096 in 16.16 fixed point) with a cap
//! height of 12 and bars 2 units thick. Lowercase letters share the capital
//! glyphs, and `0`, `1` and `5` reuse `O`, `I` and `S`.

use crate::render::GlyphPathTable;

const MOVE: u8 = 2;
const LINE: u8 = 4;
const CLOSE: u8 = 0;

/// Em height in fixed point
pub const BLOCK_FONT_HEIGHT: i32 = 65536;

/// Descender reached by `_`, in fixed point
pub const BLOCK_DESCENDER_HEIGHT: i32 = -12288;

static POINTS: [i32; 328] = [
    0, 0, 8192, 0, 8192, 40960, 0, 40960,
    24576, 0, 32768, 0, 32768, 40960, 24576, 40960,
    0, 40960, 32768, 40960, 32768, 49152, 0, 49152,
    8192, 20480, 24576, 20480, 24576, 28672, 8192, 28672,
    0, 0, 8192, 0, 8192, 49152, 0, 49152,
    8192, 0, 32768, 0, 32768, 8192, 8192, 8192,
    8192, 40960, 32768, 40960, 32768, 49152, 8192, 49152,
    0, 0, 8192, 0, 8192, 49152, 0, 49152,
    8192, 0, 32768, 0, 32768, 8192, 8192, 8192,
    8192, 20480, 24576, 20480, 24576, 28672, 8192, 28672,
    8192, 40960, 32768, 40960, 32768, 49152, 8192, 49152,
    0, 0, 8192, 0, 8192, 49152, 0, 49152,
    8192, 20480, 24576, 20480, 24576, 28672, 8192, 28672,
    8192, 40960, 32768, 40960, 32768, 49152, 8192, 49152,
    0, 0, 8192, 0, 8192, 49152, 0, 49152,
    24576, 0, 32768, 0, 32768, 49152, 24576, 49152,
    8192, 20480, 24576, 20480, 24576, 28672, 8192, 28672,
    12288, 0, 20480, 0, 20480, 49152, 12288, 49152,
    0, 0, 8192, 0, 8192, 49152, 0, 49152,
    8192, 0, 32768, 0, 32768, 8192, 8192, 8192,
    0, 0, 8192, 0, 8192, 49152, 0, 49152,
    24576, 0, 32768, 0, 32768, 49152, 24576, 49152,
    8192, 0, 24576, 0, 24576, 8192, 8192, 8192,
    8192, 40960, 24576, 40960, 24576, 49152, 8192, 49152,
    0, 0, 8192, 0, 8192, 49152, 0, 49152,
    8192, 40960, 32768, 40960, 32768, 49152, 8192, 49152,
    24576, 20480, 32768, 20480, 32768, 40960, 24576, 40960,
    8192, 20480, 24576, 20480, 24576, 28672, 8192, 28672,
    0, 40960, 32768, 40960, 32768, 49152, 0, 49152,
    0, 28672, 8192, 28672, 8192, 40960, 0, 40960,
    0, 20480, 32768, 20480, 32768, 28672, 0, 28672,
    24576, 8192, 32768, 8192, 32768, 20480, 24576, 20480,
    0, 0, 32768, 0, 32768, 8192, 0, 8192,
    12288, 0, 20480, 0, 20480, 40960, 12288, 40960,
    0, 40960, 32768, 40960, 32768, 49152, 0, 49152,
    0, 0, 8192, 0, 8192, 49152, 0, 49152,
    24576, 0, 32768, 0, 32768, 49152, 24576, 49152,
    8192, 0, 24576, 0, 24576, 8192, 8192, 8192,
    4096, 20480, 28672, 20480, 28672, 28672, 4096, 28672,
    12288, 0, 20480, 0, 20480, 8192, 12288, 8192,
    0, -12288, 32768, -12288, 32768, -4096, 0, -4096,
];

static POINT_INDICES: [i32; 16] = [0, 0, 16, 28, 44, 56, 68, 72, 80, 96, 112, 132, 140, 152, 156, 160];

static INSTRUCTIONS: [u8; 205] = [
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE, MOVE, LINE, LINE, LINE, CLOSE,
    MOVE, LINE, LINE, LINE, CLOSE,
];

static INSTRUCTION_INDICES: [i32; 16] = [0, 0, 20, 35, 55, 70, 85, 90, 100, 120, 140, 165, 175, 190, 195, 200];

static INSTRUCTION_COUNTS: [i32; 16] = [0, 20, 15, 20, 15, 15, 5, 10, 20, 20, 25, 10, 15, 5, 5, 5];

static ADVANCES: [i32; 16] = [24576, 40960, 40960, 40960, 40960, 40960, 40960, 40960, 40960, 40960, 40960, 40960, 40960, 40960, 24576, 40960];

// glyphs, in index order: space A C E F H I L O P S T U - . _
const MAPPED: [(u8, i16); 16] = [
    (b' ', 0),
    (b'A', 1),
    (b'C', 2),
    (b'E', 3),
    (b'F', 4),
    (b'H', 5),
    (b'I', 6),
    (b'L', 7),
    (b'O', 8),
    (b'P', 9),
    (b'S', 10),
    (b'T', 11),
    (b'U', 12),
    (b'-', 13),
    (b'.', 14),
    (b'_', 15),
];

const fn character_map() -> [i16; 128] {
    let mut map = [-1i16; 128];
    let mut i = 0;
    while i < MAPPED.len() {
        let (code, glyph) = MAPPED[i];
        map[code as usize] = glyph;
        if code.is_ascii_uppercase() {
            map[code.to_ascii_lowercase() as usize] = glyph;
        }
        i += 1;
    }
    map[b'0' as usize] = 8;
    map[b'1' as usize] = 6;
    map[b'5' as usize] = 10;
    map
}

static CHARACTER_MAP: [i16; 128] = character_map();

/// Glyph table for the block typeface
pub fn block_sans() -> GlyphPathTable<'static> {
    GlyphPathTable {
        points: &POINTS,
        point_indices: &POINT_INDICES,
        instructions: &INSTRUCTIONS,
        instruction_indices: &INSTRUCTION_INDICES,
        instruction_counts: &INSTRUCTION_COUNTS,
        advances: &ADVANCES,
        character_map: &CHARACTER_MAP,
        glyph_count: ADVANCES.len(),
        font_height: BLOCK_FONT_HEIGHT,
        descender_height: BLOCK_DESCENDER_HEIGHT,
    }
}
