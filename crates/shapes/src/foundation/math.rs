//! Math utilities and types
//!
//! The drawing surface is 2D, so the only matrix in play is the 3x3 affine
//! transform OpenVG calls the "path user-to-surface" matrix. Matrices follow
//! the column-vector convention: a point `p` maps to `M * [x, y, 1]`, and
//! `M * N` applies `N` first.

pub use nalgebra::{Matrix3, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Fixed-point one, the em unit of glyph coordinates and advances
pub const FIXED_ONE: f32 = 65536.0;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Extension trait for Mat3 with 2D affine constructors
pub trait Mat3Ext {
    /// Translation by `(x, y)`
    fn translation(x: f32, y: f32) -> Mat3;

    /// Non-uniform scaling by `(sx, sy)`
    fn scaling(sx: f32, sy: f32) -> Mat3;

    /// Counter-clockwise rotation in degrees
    fn rotation_degrees(angle: f32) -> Mat3;

    /// Shear by factors `shx` (x += shx * y) and `shy` (y += shy * x)
    fn shear(shx: f32, shy: f32) -> Mat3;

    /// Scale uniformly by `size` then translate to `(x, y)`
    fn scale_then_translate(size: f32, x: f32, y: f32) -> Mat3;

    /// Horizontal translation component
    fn tx(&self) -> f32;

    /// Vertical translation component
    fn ty(&self) -> f32;

    /// The six affine coefficients `(a, b, c, d, e, f)` in SVG `matrix()` order
    fn affine_coefficients(&self) -> [f32; 6];
}

impl Mat3Ext for Mat3 {
    fn translation(x: f32, y: f32) -> Mat3 {
        Mat3::new(
            1.0, 0.0, x,
            0.0, 1.0, y,
            0.0, 0.0, 1.0,
        )
    }

    fn scaling(sx: f32, sy: f32) -> Mat3 {
        Mat3::new(
            sx, 0.0, 0.0,
            0.0, sy, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    fn rotation_degrees(angle: f32) -> Mat3 {
        let (sin, cos) = (angle * constants::DEG_TO_RAD).sin_cos();
        Mat3::new(
            cos, -sin, 0.0,
            sin, cos, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    fn shear(shx: f32, shy: f32) -> Mat3 {
        Mat3::new(
            1.0, shx, 0.0,
            shy, 1.0, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    fn scale_then_translate(size: f32, x: f32, y: f32) -> Mat3 {
        Mat3::new(
            size, 0.0, x,
            0.0, size, y,
            0.0, 0.0, 1.0,
        )
    }

    fn tx(&self) -> f32 {
        self[(0, 2)]
    }

    fn ty(&self) -> f32 {
        self[(1, 2)]
    }

    fn affine_coefficients(&self) -> [f32; 6] {
        [
            self[(0, 0)],
            self[(1, 0)],
            self[(0, 1)],
            self[(1, 1)],
            self[(0, 2)],
            self[(1, 2)],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_scale_then_translate_maps_origin_and_unit() {
        let m = Mat3::scale_then_translate(10.0, 3.0, 4.0);
        let origin = m.transform_point(&Point2::new(0.0, 0.0));
        let unit = m.transform_point(&Point2::new(1.0, 1.0));

        assert_relative_eq!(origin, Point2::new(3.0, 4.0), epsilon = EPSILON);
        assert_relative_eq!(unit, Point2::new(13.0, 14.0), epsilon = EPSILON);
    }

    #[test]
    fn test_composition_order_matches_openvg() {
        // translate then scale: the scale is applied to the point first
        let m = Mat3::translation(5.0, 0.0) * Mat3::scaling(2.0, 2.0);
        let p = m.transform_point(&Point2::new(1.0, 0.0));
        assert_relative_eq!(p, Point2::new(7.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let m = Mat3::rotation_degrees(90.0);
        let p = m.transform_point(&Point2::new(1.0, 0.0));
        assert_relative_eq!(p, Point2::new(0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_shear_moves_x_by_y() {
        let m = Mat3::shear(0.5, 0.0);
        let p = m.transform_point(&Point2::new(0.0, 2.0));
        assert_relative_eq!(p, Point2::new(1.0, 2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_affine_coefficients_order() {
        let m = Mat3::scale_then_translate(2.0, 7.0, 9.0);
        assert_eq!(m.affine_coefficients(), [2.0, 0.0, 0.0, 2.0, 7.0, 9.0]);
        assert_eq!(m.tx(), 7.0);
        assert_eq!(m.ty(), 9.0);
    }
}
