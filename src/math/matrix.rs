//! Homogeneous transform matrices
//!
//! Both types are row-major values applied to column vectors. Combining two
//! matrices with `*` always yields a new matrix; nothing mutates in place.
//! `a * b` applied to a point applies `b` first, then `a`.

use std::ops::Mul;
use super::vec::{Point2D, Vec3};

// ============================================================================
// Matrix3 (2D)
// ============================================================================

/// 3x3 homogeneous matrix for 2D transforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    pub m: [[f64; 3]; 3],
}

impl Matrix3 {
    pub const IDENTITY: Matrix3 = Matrix3 {
        m: [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ],
    };

    pub fn from_rows(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self::from_rows([
            [1.0, 0.0, dx],
            [0.0, 1.0, dy],
            [0.0, 0.0, 1.0],
        ])
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::from_rows([
            [sx, 0.0, 0.0],
            [0.0, sy, 0.0],
            [0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation about the origin (degrees)
    pub fn rotation(degrees: f64) -> Self {
        let rad = degrees.to_radians();
        let (s, c) = rad.sin_cos();
        Self::from_rows([
            [c, -s, 0.0],
            [s, c, 0.0],
            [0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about an arbitrary center: T(c) · R(θ) · T(-c)
    pub fn rotation_about(degrees: f64, center: Point2D) -> Self {
        Self::translation(center.x, center.y)
            * Self::rotation(degrees)
            * Self::translation(-center.x, -center.y)
    }

    pub fn shear(shx: f64, shy: f64) -> Self {
        Self::from_rows([
            [1.0, shx, 0.0],
            [shy, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ])
    }

    /// Axis reflection: -1 on every flipped axis
    pub fn reflection(flip_x: bool, flip_y: bool) -> Self {
        let sx = if flip_x { -1.0 } else { 1.0 };
        let sy = if flip_y { -1.0 } else { 1.0 };
        Self::scaling(sx, sy)
    }

    /// Multiply `[x, y, 1]` and drop the homogeneous term
    pub fn transform_point(&self, p: Point2D) -> Point2D {
        let v = [p.x, p.y, 1.0];
        let row = |r: usize| self.m[r][0] * v[0] + self.m[r][1] * v[1] + self.m[r][2] * v[2];
        Point2D::new(row(0), row(1))
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;
    fn mul(self, other: Matrix3) -> Matrix3 {
        let mut m = [[0.0; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[i][k] * other.m[k][j]).sum();
            }
        }
        Matrix3 { m }
    }
}

// ============================================================================
// Matrix4 (3D)
// ============================================================================

/// 4x4 homogeneous matrix for 3D transforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    pub m: [[f64; 4]; 4],
}

impl Matrix4 {
    pub const IDENTITY: Matrix4 = Matrix4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn from_rows(m: [[f64; 4]; 4]) -> Self {
        Self { m }
    }

    pub fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, tx],
            [0.0, 1.0, 0.0, ty],
            [0.0, 0.0, 1.0, tz],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn scaling(sx: f64, sy: f64, sz: f64) -> Self {
        Self::from_rows([
            [sx, 0.0, 0.0, 0.0],
            [0.0, sy, 0.0, 0.0],
            [0.0, 0.0, sz, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_x(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_y(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::from_rows([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_z(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::from_rows([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Shear with the three upper off-diagonal terms
    pub fn shear(xy: f64, xz: f64, yz: f64) -> Self {
        Self::from_rows([
            [1.0, xy, xz, 0.0],
            [0.0, 1.0, yz, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Negate the flagged axes
    pub fn reflection(flip_x: bool, flip_y: bool, flip_z: bool) -> Self {
        let sign = |flip: bool| if flip { -1.0 } else { 1.0 };
        Self::scaling(sign(flip_x), sign(flip_y), sign(flip_z))
    }

    /// Multiply `[x, y, z, 1]` and drop the homogeneous term
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let v = [p.x, p.y, p.z, 1.0];
        let row = |r: usize| (0..4).map(|k| self.m[r][k] * v[k]).sum::<f64>();
        Vec3::new(row(0), row(1), row(2))
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;
    fn mul(self, other: Matrix4) -> Matrix4 {
        let mut m = [[0.0; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[i][k] * other.m[k][j]).sum();
            }
        }
        Matrix4 { m }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_identity_is_neutral() {
        let t = Matrix3::translation(3.0, -2.0);
        assert_eq!(Matrix3::IDENTITY * t, t);
        assert_eq!(t * Matrix3::IDENTITY, t);

        let r = Matrix4::rotation_z(30.0);
        assert_eq!(Matrix4::IDENTITY * r, r);
    }

    #[test]
    fn test_product_applies_right_operand_first() {
        // scale after translate: (1,0) -> (11,0) -> (22,0)
        let m = Matrix3::scaling(2.0, 1.0) * Matrix3::translation(10.0, 0.0);
        let p = m.transform_point(Point2D::new(1.0, 0.0));
        assert!(p.approx_eq(Point2D::new(22.0, 0.0), EPS));
    }

    #[test]
    fn test_rotation_about_center() {
        let m = Matrix3::rotation_about(90.0, Point2D::new(25.0, 25.0));
        let p = m.transform_point(Point2D::new(0.0, 0.0));
        assert!(p.approx_eq(Point2D::new(50.0, 0.0), 1e-6));
        let c = m.transform_point(Point2D::new(25.0, 25.0));
        assert!(c.approx_eq(Point2D::new(25.0, 25.0), 1e-6));
    }

    #[test]
    fn test_shear_and_reflection_2d() {
        let p = Matrix3::shear(2.0, 0.0).transform_point(Point2D::new(1.0, 1.0));
        assert!(p.approx_eq(Point2D::new(3.0, 1.0), EPS));

        let p = Matrix3::reflection(true, false).transform_point(Point2D::new(4.0, 5.0));
        assert!(p.approx_eq(Point2D::new(-4.0, 5.0), EPS));
    }

    #[test]
    fn test_rotation_y_sign_convention() {
        let v = Matrix4::rotation_y(90.0).transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(v.approx_eq(Vec3::new(0.0, 0.0, -1.0), 1e-9));
    }

    #[test]
    fn test_rotation_x_and_z() {
        let v = Matrix4::rotation_x(90.0).transform_point(Vec3::new(0.0, 1.0, 0.0));
        assert!(v.approx_eq(Vec3::new(0.0, 0.0, 1.0), 1e-9));

        let v = Matrix4::rotation_z(90.0).transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(v.approx_eq(Vec3::new(0.0, 1.0, 0.0), 1e-9));
    }

    #[test]
    fn test_translation_and_shear_3d() {
        let v = Matrix4::translation(1.0, 2.0, 3.0).transform_point(Vec3::ZERO);
        assert!(v.approx_eq(Vec3::new(1.0, 2.0, 3.0), EPS));

        let v = Matrix4::shear(1.0, 2.0, 3.0).transform_point(Vec3::new(1.0, 1.0, 1.0));
        assert!(v.approx_eq(Vec3::new(4.0, 4.0, 1.0), EPS));
    }
}
