//! Path segment codec
//!
//! Path data is a pair of streams: one opcode byte per segment, and a flat
//! coordinate buffer from which each segment consumes a fixed number of
//! values. Opcodes use the OpenVG encoding: the segment kind in the upper
//! bits, and bit 0 selecting relative (1) or absolute (0) coordinates.

use thiserror::Error;

use crate::render::api::{BackendResult, PathCapabilities, PathDescriptor, PathHandle};
use crate::render::RenderError;

/// Segment kind, without the absolute/relative bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SegmentKind {
    /// Close the current subpath
    Close = 0,
    /// Start a new subpath at (x, y)
    MoveTo = 2,
    /// Straight line to (x, y)
    LineTo = 4,
    /// Horizontal line to x
    HLineTo = 6,
    /// Vertical line to y
    VLineTo = 8,
    /// Quadratic bezier (x0, y0, x1, y1)
    QuadTo = 10,
    /// Cubic bezier (x0, y0, x1, y1, x2, y2)
    CubicTo = 12,
    /// Smooth quadratic bezier (x1, y1)
    SQuadTo = 14,
    /// Smooth cubic bezier (x1, y1, x2, y2)
    SCubicTo = 16,
    /// Small counter-clockwise arc (rh, rv, rot, x, y)
    SccwArcTo = 18,
    /// Small clockwise arc
    ScwArcTo = 20,
    /// Large counter-clockwise arc
    LccwArcTo = 22,
    /// Large clockwise arc
    LcwArcTo = 24,
}

impl SegmentKind {
    /// Number of coordinates this segment consumes
    pub const fn coordinate_count(self) -> usize {
        match self {
            SegmentKind::Close => 0,
            SegmentKind::HLineTo | SegmentKind::VLineTo => 1,
            SegmentKind::MoveTo | SegmentKind::LineTo | SegmentKind::SQuadTo => 2,
            SegmentKind::QuadTo | SegmentKind::SCubicTo => 4,
            SegmentKind::SccwArcTo
            | SegmentKind::ScwArcTo
            | SegmentKind::LccwArcTo
            | SegmentKind::LcwArcTo => 5,
            SegmentKind::CubicTo => 6,
        }
    }
}

/// One decoded opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathCommand {
    /// Segment kind
    pub kind: SegmentKind,
    /// Coordinates are relative to the current point
    pub relative: bool,
}

impl PathCommand {
    /// Build an absolute command
    pub const fn absolute(kind: SegmentKind) -> Self {
        Self { kind, relative: false }
    }

    /// Build a relative command
    pub const fn relative(kind: SegmentKind) -> Self {
        Self { kind, relative: true }
    }

    /// Decode an opcode byte
    pub fn from_opcode(opcode: u8) -> Result<Self, PathError> {
        let kind = match opcode & !1 {
            0 => SegmentKind::Close,
            2 => SegmentKind::MoveTo,
            4 => SegmentKind::LineTo,
            6 => SegmentKind::HLineTo,
            8 => SegmentKind::VLineTo,
            10 => SegmentKind::QuadTo,
            12 => SegmentKind::CubicTo,
            14 => SegmentKind::SQuadTo,
            16 => SegmentKind::SCubicTo,
            18 => SegmentKind::SccwArcTo,
            20 => SegmentKind::ScwArcTo,
            22 => SegmentKind::LccwArcTo,
            24 => SegmentKind::LcwArcTo,
            _ => return Err(PathError::UnknownOpcode(opcode)),
        };
        Ok(Self {
            kind,
            relative: opcode & 1 == 1,
        })
    }

    /// Encode back to an opcode byte
    pub const fn opcode(self) -> u8 {
        self.kind as u8 | self.relative as u8
    }
}

/// Path data errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Opcode byte outside the known segment set
    #[error("unknown path opcode {0:#04x}")]
    UnknownOpcode(u8),

    /// The coordinate buffer ends before the segments do
    #[error("path needs {needed} coordinates but only {available} are available")]
    MissingCoordinates {
        /// Coordinates the segment stream consumes
        needed: usize,
        /// Coordinates present
        available: usize,
    },
}

/// Total number of coordinates consumed by a segment stream
pub fn coordinates_required(segments: &[u8]) -> Result<usize, PathError> {
    segments.iter().try_fold(0usize, |total, &opcode| {
        PathCommand::from_opcode(opcode).map(|cmd| total + cmd.kind.coordinate_count())
    })
}

/// Append `segments` to a stored path, keeping exactly the coordinates they
/// consume.
///
/// Backends call this from `append_path_data`. Nothing is stored unless the
/// path allows appending and `coords` covers every segment.
pub fn append_path_data(
    descriptor: &PathDescriptor,
    path: PathHandle,
    stored_segments: &mut Vec<u8>,
    stored_coords: &mut Vec<i32>,
    segments: &[u8],
    coords: &[i32],
) -> BackendResult<()> {
    if !descriptor.capabilities.contains(PathCapabilities::APPEND_TO) {
        return Err(RenderError::AppendNotAllowed(path));
    }

    let needed = coordinates_required(segments)?;
    if coords.len() < needed {
        return Err(PathError::MissingCoordinates { needed, available: coords.len() }.into());
    }
    stored_segments.extend_from_slice(segments);
    stored_coords.extend_from_slice(&coords[..needed]);
    Ok(())
}

/// Iterator pairing each command with its coordinate slice
pub struct Segments<'a, T> {
    commands: std::slice::Iter<'a, u8>,
    coords: &'a [T],
}

impl<'a, T> Iterator for Segments<'a, T> {
    type Item = Result<(PathCommand, &'a [T]), PathError>;

    fn next(&mut self) -> Option<Self::Item> {
        let opcode = *self.commands.next()?;
        let command = match PathCommand::from_opcode(opcode) {
            Ok(command) => command,
            Err(e) => return Some(Err(e)),
        };
        let count = command.kind.coordinate_count();
        if self.coords.len() < count {
            return Some(Err(PathError::MissingCoordinates {
                needed: count,
                available: self.coords.len(),
            }));
        }
        let (head, tail) = self.coords.split_at(count);
        self.coords = tail;
        Some(Ok((command, head)))
    }
}

/// Walk a segment stream together with its coordinates
pub fn segments<'a, T>(segments: &'a [u8], coords: &'a [T]) -> Segments<'a, T> {
    Segments {
        commands: segments.iter(),
        coords,
    }
}
