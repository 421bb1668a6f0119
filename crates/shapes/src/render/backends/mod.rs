//! Drawing backend implementations
//!
//! - [`RecordingBackend`]: headless, records every call; used for
//!   measurement checks and tests
//! - [`SvgBackend`]: serializes drawn paths into an SVG document

pub mod recording;
pub mod svg;

pub use recording::{DrawCall, RecordedPath, RecordingBackend};
pub use self::svg::SvgBackend;
