//! Headless recording backend
//!
//! Keeps path data in a versioned slot map and appends a [`DrawCall`] for
//! every draw, capturing the transform and paint in effect at that moment.
//! Destroyed handles never resolve again, so a draw through a stale handle
//! is reported instead of silently hitting a reused slot.

use crate::foundation::collections::{HandleMap, key_from_raw, key_to_raw};
use crate::foundation::math::Mat3;
use crate::render::api::{BackendResult, PaintMode, PathDescriptor, PathHandle, RenderBackend};
use crate::render::primitives::append_path_data;
use crate::render::{Color, RenderError};

/// Path data held by the recorder
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPath {
    /// Creation parameters
    pub descriptor: PathDescriptor,
    /// Appended opcodes
    pub segments: Vec<u8>,
    /// Appended coordinates, exactly as many as `segments` consume
    pub coords: Vec<i32>,
}

/// One recorded draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Path drawn
    pub path: PathHandle,
    /// Paint mode requested
    pub mode: PaintMode,
    /// Transform in effect
    pub transform: Mat3,
    /// Fill paint in effect
    pub fill: Color,
    /// Stroke paint in effect
    pub stroke: Color,
    /// Stroke width in effect
    pub stroke_width: f32,
}

/// Backend that records instead of rendering
#[derive(Debug)]
pub struct RecordingBackend {
    paths: HandleMap<RecordedPath>,
    transform: Mat3,
    fill: Color,
    stroke: Color,
    stroke_width: f32,
    draws: Vec<DrawCall>,
    paths_created: usize,
    paths_destroyed: usize,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingBackend {
    /// Create an empty recorder with identity transform and black paint
    pub fn new() -> Self {
        Self {
            paths: HandleMap::with_key(),
            transform: Mat3::identity(),
            fill: Color::BLACK,
            stroke: Color::BLACK,
            stroke_width: 1.0,
            draws: Vec::new(),
            paths_created: 0,
            paths_destroyed: 0,
        }
    }

    /// Draws recorded so far, in call order
    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    /// Forget recorded draws, keeping paths and state
    pub fn clear_draws(&mut self) {
        self.draws.clear();
    }

    /// Look up a live path
    pub fn path(&self, handle: PathHandle) -> Option<&RecordedPath> {
        self.paths.get(key_from_raw(handle.0))
    }

    /// Whether a handle still refers to a live path
    pub fn is_live(&self, handle: PathHandle) -> bool {
        self.path(handle).is_some()
    }

    /// Number of live paths
    pub fn live_paths(&self) -> usize {
        self.paths.len()
    }

    /// Total paths ever created
    pub fn paths_created(&self) -> usize {
        self.paths_created
    }

    /// Total paths destroyed
    pub fn paths_destroyed(&self) -> usize {
        self.paths_destroyed
    }

    /// Current fill paint
    pub fn fill(&self) -> Color {
        self.fill
    }

    /// Current stroke paint
    pub fn stroke(&self) -> Color {
        self.stroke
    }

    /// Current stroke width
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }
}

impl RenderBackend for RecordingBackend {
    fn create_path(&mut self, descriptor: PathDescriptor) -> BackendResult<PathHandle> {
        let key = self.paths.insert(RecordedPath {
            descriptor,
            segments: Vec::new(),
            coords: Vec::new(),
        });
        self.paths_created += 1;
        Ok(PathHandle(key_to_raw(key)))
    }

    fn append_path_data(&mut self, path: PathHandle, segments: &[u8], coords: &[i32]) -> BackendResult<()> {
        let recorded = self
            .paths
            .get_mut(key_from_raw(path.0))
            .ok_or(RenderError::InvalidPath(path))?;
        append_path_data(
            &recorded.descriptor,
            path,
            &mut recorded.segments,
            &mut recorded.coords,
            segments,
            coords,
        )
    }

    fn draw_path(&mut self, path: PathHandle, mode: PaintMode) -> BackendResult<()> {
        if !self.is_live(path) {
            return Err(RenderError::InvalidPath(path));
        }
        self.draws.push(DrawCall {
            path,
            mode,
            transform: self.transform,
            fill: self.fill,
            stroke: self.stroke,
            stroke_width: self.stroke_width,
        });
        Ok(())
    }

    fn destroy_path(&mut self, path: PathHandle) -> BackendResult<()> {
        self.paths
            .remove(key_from_raw(path.0))
            .ok_or(RenderError::InvalidPath(path))?;
        self.paths_destroyed += 1;
        Ok(())
    }

    fn transform(&self) -> Mat3 {
        self.transform
    }

    fn load_transform(&mut self, matrix: &Mat3) {
        self.transform = *matrix;
    }

    fn set_paint(&mut self, mode: PaintMode, color: Color) {
        if mode.contains(PaintMode::FILL) {
            self.fill = color;
        }
        if mode.contains(PaintMode::STROKE) {
            self.stroke = color;
        }
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat3Ext;
    use crate::render::api::PathCapabilities;
    use crate::render::PathError;

    const MOVE: u8 = 2;
    const LINE: u8 = 4;
    const CLOSE: u8 = 0;

    #[test]
    fn test_append_keeps_only_consumed_coordinates() {
        let mut backend = RecordingBackend::new();
        let path = backend.create_path(PathDescriptor::fixed_point()).unwrap();

        backend.append_path_data(path, &[MOVE, LINE, CLOSE], &[0, 0, 10, 10, 99, 99]).unwrap();

        let recorded = backend.path(path).unwrap();
        assert_eq!(recorded.segments, vec![MOVE, LINE, CLOSE]);
        assert_eq!(recorded.coords, vec![0, 0, 10, 10]);
    }

    #[test]
    fn test_append_rejects_short_coordinates() {
        let mut backend = RecordingBackend::new();
        let path = backend.create_path(PathDescriptor::fixed_point()).unwrap();

        let result = backend.append_path_data(path, &[MOVE, LINE], &[0, 0, 1]);
        assert!(matches!(result, Err(RenderError::MalformedPath(PathError::MissingCoordinates { .. }))));
    }

    #[test]
    fn test_append_requires_capability() {
        let mut backend = RecordingBackend::new();
        let descriptor = PathDescriptor {
            capabilities: PathCapabilities::empty(),
            ..PathDescriptor::fixed_point()
        };
        let path = backend.create_path(descriptor).unwrap();

        let result = backend.append_path_data(path, &[CLOSE], &[]);
        assert!(matches!(result, Err(RenderError::AppendNotAllowed(_))));
    }

    #[test]
    fn test_draw_captures_transform_and_paint() {
        let mut backend = RecordingBackend::new();
        let path = backend.create_path(PathDescriptor::fixed_point()).unwrap();
        backend.set_paint(PaintMode::FILL, Color::rgb(255, 0, 0));
        backend.multiply_transform(&Mat3::translation(3.0, 4.0));

        backend.draw_path(path, PaintMode::FILL).unwrap();

        let draw = &backend.draws()[0];
        assert_eq!(draw.fill, Color::rgb(255, 0, 0));
        assert_eq!(draw.stroke, Color::BLACK);
        assert_eq!(draw.transform, Mat3::translation(3.0, 4.0));
    }

    #[test]
    fn test_destroyed_handle_is_rejected() {
        let mut backend = RecordingBackend::new();
        let path = backend.create_path(PathDescriptor::fixed_point()).unwrap();
        backend.destroy_path(path).unwrap();

        assert!(matches!(backend.draw_path(path, PaintMode::FILL), Err(RenderError::InvalidPath(_))));
        assert!(matches!(backend.destroy_path(path), Err(RenderError::InvalidPath(_))));
        assert_eq!(backend.paths_created(), 1);
        assert_eq!(backend.paths_destroyed(), 1);
        assert_eq!(backend.live_paths(), 0);
    }
}
