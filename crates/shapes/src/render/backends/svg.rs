//! SVG output backend
//!
//! Each draw becomes one `<path>` element carrying the draw-time transform
//! and paint. Path coordinates are y-up like the rest of the crate; the
//! document wraps everything in a group that flips the y axis so the output
//! reads the right way up.

use ::svg::node::element::path::Data;
use ::svg::node::element::{Group, Path, Rectangle};
use ::svg::Document;

use crate::core::SvgConfig;
use crate::foundation::collections::{HandleMap, key_from_raw, key_to_raw};
use crate::foundation::math::{Mat3, Mat3Ext};
use crate::render::api::{BackendResult, PaintMode, PathDescriptor, PathHandle, RenderBackend};
use crate::render::primitives::{append_path_data, segments};
use crate::render::{Color, PathError, RenderError, SegmentKind};

struct SvgPath {
    descriptor: PathDescriptor,
    segments: Vec<u8>,
    coords: Vec<i32>,
}

struct SvgDraw {
    data: Data,
    transform: Mat3,
    mode: PaintMode,
    fill: Color,
    stroke: Color,
    stroke_width: f32,
}

/// Backend that builds an SVG document
pub struct SvgBackend {
    width: u32,
    height: u32,
    background: Option<Color>,
    paths: HandleMap<SvgPath>,
    draws: Vec<SvgDraw>,
    transform: Mat3,
    fill: Color,
    stroke: Color,
    stroke_width: f32,
}

impl SvgBackend {
    /// Create a canvas of the given size with an optional background
    pub fn new(width: u32, height: u32, background: Option<Color>) -> Self {
        Self {
            width,
            height,
            background,
            paths: HandleMap::with_key(),
            draws: Vec::new(),
            transform: Mat3::identity(),
            fill: Color::BLACK,
            stroke: Color::BLACK,
            stroke_width: 1.0,
        }
    }

    /// Create a canvas from configuration
    pub fn from_config(config: &SvgConfig) -> Result<Self, crate::config::ConfigError> {
        Ok(Self::new(config.width, config.height, config.background_color()?))
    }

    /// Number of path elements drawn so far
    pub fn element_count(&self) -> usize {
        self.draws.len()
    }

    /// Build the document from everything drawn so far
    pub fn to_document(&self) -> Document {
        let (width, height) = (self.width, self.height);
        let mut group = Group::new().set("transform", format!("matrix(1 0 0 -1 0 {height})"));
        for draw in &self.draws {
            group = group.add(draw.to_element());
        }

        let mut document = Document::new()
            .set("viewBox", (0, 0, width, height))
            .set("width", width)
            .set("height", height);
        if let Some(background) = self.background {
            document = document.add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", background.to_hex()),
            );
        }
        document.add(group)
    }

    /// Serialize the document to a string
    pub fn to_svg_string(&self) -> String {
        self.to_document().to_string()
    }

    /// Write the document to a file
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> BackendResult<()> {
        ::svg::save(path, &self.to_document())?;
        Ok(())
    }
}

impl SvgDraw {
    fn to_element(&self) -> Path {
        let [a, b, c, d, e, f] = self.transform.affine_coefficients();
        let mut element = Path::new()
            .set("d", self.data.clone())
            .set("transform", format!("matrix({a} {b} {c} {d} {e} {f})"));

        element = if self.mode.contains(PaintMode::FILL) {
            element.set("fill", self.fill.to_hex()).set("fill-opacity", self.fill.a)
        } else {
            element.set("fill", "none")
        };
        if self.mode.contains(PaintMode::STROKE) {
            element = element
                .set("stroke", self.stroke.to_hex())
                .set("stroke-opacity", self.stroke.a)
                .set("stroke-width", self.stroke_width)
                .set("vector-effect", "non-scaling-stroke");
        }
        element
    }
}

/// Convert stored segments to SVG path data in user units
fn path_data(path: &SvgPath) -> Result<Data, PathError> {
    let mut data = Data::new();
    for segment in segments(&path.segments, &path.coords) {
        let (command, raw) = segment?;
        let v: Vec<f32> = raw.iter().map(|&c| path.descriptor.to_user(c)).collect();
        let rel = command.relative;

        data = match command.kind {
            SegmentKind::Close => data.close(),
            SegmentKind::MoveTo if rel => data.move_by(v),
            SegmentKind::MoveTo => data.move_to(v),
            SegmentKind::LineTo if rel => data.line_by(v),
            SegmentKind::LineTo => data.line_to(v),
            SegmentKind::HLineTo if rel => data.horizontal_line_by(v),
            SegmentKind::HLineTo => data.horizontal_line_to(v),
            SegmentKind::VLineTo if rel => data.vertical_line_by(v),
            SegmentKind::VLineTo => data.vertical_line_to(v),
            SegmentKind::QuadTo if rel => data.quadratic_curve_by(v),
            SegmentKind::QuadTo => data.quadratic_curve_to(v),
            SegmentKind::CubicTo if rel => data.cubic_curve_by(v),
            SegmentKind::CubicTo => data.cubic_curve_to(v),
            SegmentKind::SQuadTo if rel => data.smooth_quadratic_curve_by(v),
            SegmentKind::SQuadTo => data.smooth_quadratic_curve_to(v),
            SegmentKind::SCubicTo if rel => data.smooth_cubic_curve_by(v),
            SegmentKind::SCubicTo => data.smooth_cubic_curve_to(v),
            SegmentKind::SccwArcTo
            | SegmentKind::ScwArcTo
            | SegmentKind::LccwArcTo
            | SegmentKind::LcwArcTo => {
                let large = matches!(command.kind, SegmentKind::LccwArcTo | SegmentKind::LcwArcTo);
                // y-up space: counter-clockwise is the positive-angle sweep
                let sweep = matches!(command.kind, SegmentKind::SccwArcTo | SegmentKind::LccwArcTo);
                let params = vec![
                    v[0],
                    v[1],
                    v[2],
                    f32::from(u8::from(large)),
                    f32::from(u8::from(sweep)),
                    v[3],
                    v[4],
                ];
                if rel {
                    data.elliptical_arc_by(params)
                } else {
                    data.elliptical_arc_to(params)
                }
            }
        };
    }
    Ok(data)
}

impl RenderBackend for SvgBackend {
    fn create_path(&mut self, descriptor: PathDescriptor) -> BackendResult<PathHandle> {
        let key = self.paths.insert(SvgPath {
            descriptor,
            segments: Vec::new(),
            coords: Vec::new(),
        });
        Ok(PathHandle(key_to_raw(key)))
    }

    fn append_path_data(&mut self, path: PathHandle, segments: &[u8], coords: &[i32]) -> BackendResult<()> {
        let stored = self
            .paths
            .get_mut(key_from_raw(path.0))
            .ok_or(RenderError::InvalidPath(path))?;
        append_path_data(
            &stored.descriptor,
            path,
            &mut stored.segments,
            &mut stored.coords,
            segments,
            coords,
        )
    }

    fn draw_path(&mut self, path: PathHandle, mode: PaintMode) -> BackendResult<()> {
        let stored = self
            .paths
            .get(key_from_raw(path.0))
            .ok_or(RenderError::InvalidPath(path))?;
        if stored.segments.is_empty() {
            return Ok(());
        }

        let data = path_data(stored)?;
        self.draws.push(SvgDraw {
            data,
            transform: self.transform,
            mode,
            fill: self.fill,
            stroke: self.stroke,
            stroke_width: self.stroke_width,
        });
        Ok(())
    }

    fn destroy_path(&mut self, path: PathHandle) -> BackendResult<()> {
        self.paths
            .remove(key_from_raw(path.0))
            .map(|_| ())
            .ok_or(RenderError::InvalidPath(path))
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
