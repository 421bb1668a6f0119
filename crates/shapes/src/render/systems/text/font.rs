//! Vector font loading
//!
//! Turns a [`GlyphPathTable`] into a [`Font`]: one backend path per glyph,
//! plus the character map and advances needed to lay text out. The font
//! borrows the table's arrays rather than copying them, and owns the path
//! handles it created.

use thiserror::Error;

use crate::foundation::math::FIXED_ONE;
use crate::render::api::{PathDescriptor, PathHandle, RenderBackend};
use crate::render::primitives::coordinates_required;
use crate::render::{PathError, RenderError};

use super::GlyphPathTable;

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur while loading or unloading a font
#[derive(Debug, Error)]
pub enum FontError {
    /// Table declares more glyphs than the configured capacity
    #[error("font declares {requested} glyphs but capacity is {capacity}")]
    CapacityExceeded {
        /// Glyph count in the table
        requested: usize,
        /// Configured maximum
        capacity: usize,
    },

    /// A per-glyph array has fewer entries than the glyph count
    #[error("glyph table array `{array}` has {len} entries, expected at least {expected}")]
    TableTooShort {
        /// Array name
        array: &'static str,
        /// Actual length
        len: usize,
        /// Required length
        expected: usize,
    },

    /// One glyph's data points outside the table or holds bad opcodes
    #[error("glyph {glyph} is malformed: {reason}")]
    MalformedGlyph {
        /// Glyph index
        glyph: usize,
        /// What was wrong
        reason: String,
    },

    /// Backend rejected a path operation
    #[error("backend error: {0}")]
    Backend(#[from] RenderError),
}

/// Index into a font's glyph table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphIndex(pub usize);

/// One loaded glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphOutline {
    /// Backend path holding the outline
    pub path: PathHandle,
    /// Number of segments appended; zero for blank glyphs such as space
    pub instruction_count: usize,
}

/// Character code to glyph lookup with explicit domain bounds
#[derive(Debug, Clone, Copy)]
pub struct CharacterMap<'a> {
    entries: &'a [i16],
    glyph_count: usize,
}

impl<'a> CharacterMap<'a> {
    /// Wrap a raw map; entries outside `0..glyph_count` read as absent
    pub fn new(entries: &'a [i16], glyph_count: usize) -> Self {
        Self { entries, glyph_count }
    }

    /// Glyph for a codepoint, if the font has one
    pub fn get(&self, codepoint: u32) -> Option<GlyphIndex> {
        let index = usize::try_from(codepoint).ok()?;
        let raw = *self.entries.get(index)?;
        let glyph = usize::try_from(raw).ok()?;
        (glyph < self.glyph_count).then_some(GlyphIndex(glyph))
    }

    /// Number of character codes covered
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map covers no codes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A loaded typeface
///
/// Must be released with [`Font::unload`] against the backend that loaded
/// it. Dropping a font that still holds paths leaks them on the backend and
/// logs a warning.
#[derive(Debug)]
pub struct Font<'a> {
    character_map: CharacterMap<'a>,
    advances: &'a [i32],
    glyphs: Vec<GlyphOutline>,
    font_height: i32,
    descender_height: i32,
}

fn table_index(value: i32, glyph: usize, what: &str) -> FontResult<usize> {
    usize::try_from(value).map_err(|_| FontError::MalformedGlyph {
        glyph,
        reason: format!("negative {what} {value}"),
    })
}

fn check_len(array: &'static str, len: usize, expected: usize) -> FontResult<()> {
    if len < expected {
        return Err(FontError::TableTooShort { array, len, expected });
    }
    Ok(())
}

/// Locate glyph `i`'s opcodes and the exact coordinates they consume
fn glyph_data<'a>(table: &GlyphPathTable<'a>, i: usize) -> FontResult<(&'a [u8], &'a [i32])> {
    let malformed = |reason: String| FontError::MalformedGlyph { glyph: i, reason };

    let count = table_index(table.instruction_counts[i], i, "instruction count")?;
    let start = table_index(table.instruction_indices[i], i, "instruction index")?;
    let instructions = table
        .instructions
        .get(start..start + count)
        .ok_or_else(|| malformed(format!(
            "instructions {}..{} outside buffer of {}",
            start,
            start + count,
            table.instructions.len()
        )))?;

    let needed = coordinates_required(instructions).map_err(|e| malformed(e.to_string()))?;
    let first = table_index(table.point_indices[i], i, "point index")? * 2;
    let coords = table.points.get(first..first + needed).ok_or_else(|| {
        malformed(
            PathError::MissingCoordinates {
                needed,
                available: table.points.len().saturating_sub(first),
            }
            .to_string(),
        )
    })?;

    Ok((instructions, coords))
}

impl<'a> Font<'a> {
    /// Load every glyph of `table` into `backend`.
    ///
    /// Fails with [`FontError::CapacityExceeded`] before touching the
    /// backend if the table declares more than `capacity` glyphs. On any
    /// later failure the paths created so far are destroyed again.
    pub fn load<B>(table: &GlyphPathTable<'a>, backend: &mut B, capacity: usize) -> FontResult<Self>
    where
        B: RenderBackend + ?Sized,
    {
        let n = table.glyph_count;
        if n > capacity {
            return Err(FontError::CapacityExceeded { requested: n, capacity });
        }
        check_len("point_indices", table.point_indices.len(), n)?;
        check_len("instruction_indices", table.instruction_indices.len(), n)?;
        check_len("instruction_counts", table.instruction_counts.len(), n)?;
        check_len("advances", table.advances.len(), n)?;

        let mut glyphs = Vec::with_capacity(n);
        for i in 0..n {
            match Self::load_glyph(table, backend, i) {
                Ok(outline) => glyphs.push(outline),
                Err(e) => {
                    // the load error is the one worth reporting
                    let _ = release(backend, &mut glyphs);
                    return Err(e);
                }
            }
        }

        log::debug!(
            "Loaded font: {} glyphs, {} mapped character codes",
            glyphs.len(),
            table.character_map.len()
        );

        Ok(Self {
            character_map: CharacterMap::new(table.character_map, n),
            advances: table.advances,
            glyphs,
            font_height: table.font_height,
            descender_height: table.descender_height,
        })
    }

    fn load_glyph<B>(table: &GlyphPathTable<'a>, backend: &mut B, i: usize) -> FontResult<GlyphOutline>
    where
        B: RenderBackend + ?Sized,
    {
        let (instructions, coords) = glyph_data(table, i)?;
        let path = backend.create_path(PathDescriptor::fixed_point())?;
        if !instructions.is_empty() {
            if let Err(e) = backend.append_path_data(path, instructions, coords) {
                // the outline is useless without its data
                let _ = backend.destroy_path(path);
                return Err(e.into());
            }
        }
        Ok(GlyphOutline {
            path,
            instruction_count: instructions.len(),
        })
    }

    /// Destroy every glyph path.
    ///
    /// All paths are attempted even if one fails; the first error is
    /// returned.
    pub fn unload<B>(mut self, backend: &mut B) -> FontResult<()>
    where
        B: RenderBackend + ?Sized,
    {
        let count = self.glyphs.len();
        let result = release(backend, &mut self.glyphs);
        log::debug!("Unloaded font: {count} glyph paths released");
        result
    }

    /// Glyph mapped to a codepoint
    pub fn lookup(&self, codepoint: u32) -> Option<GlyphIndex> {
        self.character_map.get(codepoint)
    }

    /// Loaded outline for a glyph
    pub fn outline(&self, glyph: GlyphIndex) -> Option<&GlyphOutline> {
        self.glyphs.get(glyph.0)
    }

    /// Raw fixed-point advance of a glyph
    pub fn advance(&self, glyph: GlyphIndex) -> i32 {
        self.advances.get(glyph.0).copied().unwrap_or(0)
    }

    /// Character map
    pub fn character_map(&self) -> &CharacterMap<'a> {
        &self.character_map
    }

    /// Number of loaded glyphs
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// All loaded outlines, by glyph index
    pub fn glyphs(&self) -> &[GlyphOutline] {
        &self.glyphs
    }

    /// Raw fixed-point line height
    pub fn font_height(&self) -> i32 {
        self.font_height
    }

    /// Raw fixed-point descender, negative below the baseline
    pub fn descender_height(&self) -> i32 {
        self.descender_height
    }

    /// Line height at `point_size`; zero when the table had no height.
    ///
    /// Computed in `f32` and not truncated to a whole number.
    pub fn height(&self, point_size: f32) -> f32 {
        self.font_height as f32 * point_size / FIXED_ONE
    }

    /// Depth below the baseline at `point_size`; zero when absent.
    ///
    /// Computed in `f32` and not truncated to a whole number.
    pub fn depth(&self, point_size: f32) -> f32 {
        -(self.descender_height as f32) * point_size / FIXED_ONE
    }
}

fn release<B>(backend: &mut B, glyphs: &mut Vec<GlyphOutline>) -> FontResult<()>
where
    B: RenderBackend + ?Sized,
{
    let mut first_error = None;
    for outline in glyphs.drain(..) {
        if let Err(e) = backend.destroy_path(outline.path) {
            log::warn!("Failed to destroy glyph path {:?}: {}", outline.path, e);
            first_error.get_or_insert(e);
        }
    }
    first_error.map_or(Ok(()), |e| Err(e.into()))
}

impl Drop for Font<'_> {
    fn drop(&mut self) {
        if !self.glyphs.is_empty() {
            log::warn!(
                "Font dropped without unload; {} glyph paths leaked on the backend",
                self.glyphs.len()
            );
        }
    }
}
