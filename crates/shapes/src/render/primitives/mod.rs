//! Core rendering primitives
//!
//! Colors and the path segment format shared by every backend.

pub mod color;
pub mod path;

pub use color::{Color, NAMED_COLORS};
pub use path::{PathCommand, PathError, SegmentKind, Segments, append_path_data, coordinates_required, segments};
