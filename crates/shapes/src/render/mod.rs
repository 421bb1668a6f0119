//! # Rendering System
//!
//! This module provides the drawing abstraction the text layer sits on.
//!
//! ## Architecture
//!
//! - **API**: the [`RenderBackend`] trait plus handle and flag types
//! - **Primitives**: colors and the path segment codec
//! - **Backends**: a headless recorder and an SVG writer
//! - **Systems**: vector-font loading, text layout and text drawing
//!
//! Nothing here rasterizes. Backends either record what they were asked to
//! draw or serialize it for a rasterizer elsewhere.

pub mod api;
pub mod primitives;
pub mod backends;
pub mod systems;

pub use api::{BackendResult, PaintMode, PathCapabilities, PathDescriptor, PathHandle, RenderBackend};
pub use primitives::{Color, PathCommand, PathError, SegmentKind};
pub use backends::{DrawCall, RecordingBackend, SvgBackend};
pub use systems::text::{
    CharacterMap, Codepoints, Font, FontError, FontResult, GlyphIndex, GlyphOutline, GlyphPathTable,
    GlyphRun, PlacedGlyph, TextLayout, TextRenderer, TextRun, next_codepoint,
    draw_text, draw_text_centered, draw_text_right_aligned, measure_width, text_height, text_depth,
};

use thiserror::Error;

/// Errors raised by drawing backends
#[derive(Error, Debug)]
pub enum RenderError {
    /// Handle is unknown to the backend or was already destroyed
    #[error("invalid path handle {0:?}")]
    InvalidPath(PathHandle),

    /// Appending to a path created without `APPEND_TO`
    #[error("path {0:?} does not allow appending")]
    AppendNotAllowed(PathHandle),

    /// Segment or coordinate data could not be interpreted
    #[error("malformed path data: {0}")]
    MalformedPath(#[from] PathError),

    /// Writing backend output failed
    #[error("backend I/O error: {0}")]
    Io(#[from] std::io::Error),
}
