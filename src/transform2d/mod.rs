//! 2D affine transforms on a polygon
//!
//! - Matrix builders for translate / scale / rotate-about-center / shear / reflect
//! - Shapes are replaced wholesale on every application, so transforms chain
//!   from the current state

mod shape;

pub use shape::*;

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::math::{Matrix3, Point2D};

/// One 2D transform with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transform2D {
    Translate { dx: f64, dy: f64 },
    Scale { sx: f64, sy: f64 },
    /// Counter-clockwise, in degrees
    Rotate { degrees: f64, center: Point2D },
    Shear { shx: f64, shy: f64 },
    Reflect { flip_x: bool, flip_y: bool },
}

impl Transform2D {
    /// Homogeneous matrix for this transform
    pub fn matrix(&self) -> Matrix3 {
        match *self {
            Transform2D::Translate { dx, dy } => Matrix3::translation(dx, dy),
            Transform2D::Scale { sx, sy } => Matrix3::scaling(sx, sy),
            Transform2D::Rotate { degrees, center } => Matrix3::rotation_about(degrees, center),
            Transform2D::Shear { shx, shy } => Matrix3::shear(shx, shy),
            Transform2D::Reflect { flip_x, flip_y } => Matrix3::reflection(flip_x, flip_y),
        }
    }

    /// All parameters finite
    pub fn is_finite(&self) -> bool {
        match *self {
            Transform2D::Translate { dx, dy } => dx.is_finite() && dy.is_finite(),
            Transform2D::Scale { sx, sy } => sx.is_finite() && sy.is_finite(),
            Transform2D::Rotate { degrees, center } => {
                degrees.is_finite() && center.x.is_finite() && center.y.is_finite()
            }
            Transform2D::Shear { shx, shy } => shx.is_finite() && shy.is_finite(),
            Transform2D::Reflect { .. } => true,
        }
    }
}

impl fmt::Display for Transform2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform2D::Translate { dx, dy } => write!(f, "Translation (TX: {}, TY: {})", dx, dy),
            Transform2D::Scale { sx, sy } => write!(f, "Scale (SX: {}, SY: {})", sx, sy),
            Transform2D::Rotate { degrees, center } => {
                write!(f, "Rotation ({}° about ({}, {}))", degrees, center.x, center.y)
            }
            Transform2D::Shear { shx, shy } => write!(f, "Shear (SHX: {}, SHY: {})", shx, shy),
            Transform2D::Reflect { flip_x, flip_y } => match (flip_x, flip_y) {
                (true, true) => write!(f, "Reflection (X and Y)"),
                (true, false) => write!(f, "Reflection (X)"),
                (false, true) => write!(f, "Reflection (Y)"),
                (false, false) => write!(f, "Reflection (none)"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_dispatch() {
        let t = Transform2D::Translate { dx: 1.0, dy: 2.0 };
        assert_eq!(t.matrix(), Matrix3::translation(1.0, 2.0));

        let r = Transform2D::Reflect { flip_x: false, flip_y: true };
        let p = r.matrix().transform_point(Point2D::new(3.0, 4.0));
        assert!(p.approx_eq(Point2D::new(3.0, -4.0), 1e-12));
    }

    #[test]
    fn test_describe() {
        let t = Transform2D::Scale { sx: 2.0, sy: 1.5 };
        assert_eq!(t.to_string(), "Scale (SX: 2, SY: 1.5)");
        let r = Transform2D::Rotate { degrees: 90.0, center: Point2D::new(25.0, 25.0) };
        assert_eq!(r.to_string(), "Rotation (90° about (25, 25))");
    }

    #[test]
    fn test_is_finite() {
        assert!(Transform2D::Shear { shx: 0.5, shy: 0.0 }.is_finite());
        assert!(!Transform2D::Translate { dx: f64::NAN, dy: 0.0 }.is_finite());
    }
}
