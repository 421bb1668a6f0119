//! Backend abstraction traits for the rendering system
//!
//! This module defines the trait that drawing backends implement. It is the
//! narrow slice of a retained-path vector API that text rendering needs:
//! build paths from segment/coordinate streams, draw them with a paint mode
//! under the current transform, and manipulate that transform.

use bitflags::bitflags;

use crate::foundation::math::Mat3;
use crate::render::{Color, RenderError};

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Handle to a path resource stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathHandle(pub u64);

bitflags! {
    /// Which paint a draw call uses
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PaintMode: u8 {
        /// Fill the path interior
        const FILL = 1 << 0;
        /// Stroke the path outline
        const STROKE = 1 << 1;
    }
}

bitflags! {
    /// Operations a path must support after creation
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PathCapabilities: u16 {
        /// Data can be appended
        const APPEND_TO = 1 << 0;
        /// Data can be read back
        const MODIFY = 1 << 1;
        /// Path can be transformed into another path
        const TRANSFORM_FROM = 1 << 2;
        /// Bounds can be queried
        const PATH_BOUNDS = 1 << 3;
        /// Point-along-path queries
        const POINT_ALONG_PATH = 1 << 4;
    }
}

/// Parameters for a new path.
///
/// Coordinates are signed 32-bit integers; the user-space value of a stored
/// coordinate `v` is `v * scale + bias`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathDescriptor {
    /// Coordinate scale factor
    pub scale: f32,
    /// Coordinate bias
    pub bias: f32,
    /// Capabilities requested at creation
    pub capabilities: PathCapabilities,
}

impl PathDescriptor {
    /// Descriptor for 16.16 fixed-point data, the glyph outline format
    pub fn fixed_point() -> Self {
        Self {
            scale: 1.0 / 65536.0,
            bias: 0.0,
            capabilities: PathCapabilities::all(),
        }
    }

    /// Map a stored coordinate to user space
    pub fn to_user(&self, value: i32) -> f32 {
        value as f32 * self.scale + self.bias
    }
}

/// Main rendering backend trait
///
/// Implementations own their path resources; handles are opaque and must be
/// rejected with [`RenderError::InvalidPath`] once destroyed. The current
/// transform starts as identity.
pub trait RenderBackend {
    /// Create an empty path and return its handle
    fn create_path(&mut self, descriptor: PathDescriptor) -> BackendResult<PathHandle>;

    /// Append segments and the coordinates they consume
    fn append_path_data(&mut self, path: PathHandle, segments: &[u8], coords: &[i32]) -> BackendResult<()>;

    /// Draw a path under the current transform with the current paint
    fn draw_path(&mut self, path: PathHandle, mode: PaintMode) -> BackendResult<()>;

    /// Release a path
    fn destroy_path(&mut self, path: PathHandle) -> BackendResult<()>;

    /// Current user-to-surface transform
    fn transform(&self) -> Mat3;

    /// Replace the current transform
    fn load_transform(&mut self, matrix: &Mat3);

    /// Post-multiply the current transform: `current = current * matrix`
    fn multiply_transform(&mut self, matrix: &Mat3) {
        let combined = self.transform() * matrix;
        self.load_transform(&combined);
    }

    /// Reset the current transform to identity
    fn load_identity(&mut self) {
        self.load_transform(&Mat3::identity());
    }

    /// Set the color used by fill and/or stroke draws
    fn set_paint(&mut self, mode: PaintMode, color: Color);

    /// Set the stroke line width
    fn set_stroke_width(&mut self, width: f32);
}

impl<B: RenderBackend + ?Sized> RenderBackend for &mut B {
    fn create_path(&mut self, descriptor: PathDescriptor) -> BackendResult<PathHandle> {
        (**self).create_path(descriptor)
    }

    fn append_path_data(&mut self, path: PathHandle, segments: &[u8], coords: &[i32]) -> BackendResult<()> {
        (**self).append_path_data(path, segments, coords)
    }

    fn draw_path(&mut self, path: PathHandle, mode: PaintMode) -> BackendResult<()> {
        (**self).draw_path(path, mode)
    }

    fn destroy_path(&mut self, path: PathHandle) -> BackendResult<()> {
        (**self).destroy_path(path)
    }

    fn transform(&self) -> Mat3 {
        (**self).transform()
    }

    fn load_transform(&mut self, matrix: &Mat3) {
        (**self).load_transform(matrix);
    }

    fn multiply_transform(&mut self, matrix: &Mat3) {
        (**self).multiply_transform(matrix);
    }

    fn set_paint(&mut self, mode: PaintMode, color: Color) {
        (**self).set_paint(mode, color);
    }

    fn set_stroke_width(&mut self, width: f32) {
        (**self).set_stroke_width(width);
    }
}
