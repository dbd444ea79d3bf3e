//! 3D wireframe transforms and projection
//!
//! - 4x4 matrix builders mirroring the 2D engine
//! - Object-space rotation composed as Rz · (Ry · Rx)
//! - Cube / pyramid / triangular prism templates
//! - Isometric and perspective projection

mod object;
mod projection;
mod session;

pub use object::*;
pub use projection::*;
pub use session::*;

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::math::Matrix4;

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn label(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// Reflection plane (the axis normal to it is negated)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Plane {
    XY,
    XZ,
    YZ,
}

impl Plane {
    pub fn label(&self) -> &'static str {
        match self {
            Plane::XY => "XY",
            Plane::XZ => "XZ",
            Plane::YZ => "YZ",
        }
    }
}

/// One 3D transform with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Transform3D {
    Translate { tx: f64, ty: f64, tz: f64 },
    Scale { sx: f64, sy: f64, sz: f64 },
    /// Degrees, right-handed
    Rotate { axis: Axis, degrees: f64 },
    Shear { xy: f64, xz: f64, yz: f64 },
    Reflect(Plane),
}

impl Transform3D {
    /// Homogeneous matrix for this transform
    pub fn matrix(&self) -> Matrix4 {
        match *self {
            Transform3D::Translate { tx, ty, tz } => Matrix4::translation(tx, ty, tz),
            Transform3D::Scale { sx, sy, sz } => Matrix4::scaling(sx, sy, sz),
            Transform3D::Rotate { axis: Axis::X, degrees } => Matrix4::rotation_x(degrees),
            Transform3D::Rotate { axis: Axis::Y, degrees } => Matrix4::rotation_y(degrees),
            Transform3D::Rotate { axis: Axis::Z, degrees } => Matrix4::rotation_z(degrees),
            Transform3D::Shear { xy, xz, yz } => Matrix4::shear(xy, xz, yz),
            Transform3D::Reflect(Plane::XY) => Matrix4::reflection(false, false, true),
            Transform3D::Reflect(Plane::XZ) => Matrix4::reflection(false, true, false),
            Transform3D::Reflect(Plane::YZ) => Matrix4::reflection(true, false, false),
        }
    }

    pub fn is_finite(&self) -> bool {
        match *self {
            Transform3D::Translate { tx, ty, tz } => tx.is_finite() && ty.is_finite() && tz.is_finite(),
            Transform3D::Scale { sx, sy, sz } => sx.is_finite() && sy.is_finite() && sz.is_finite(),
            Transform3D::Rotate { degrees, .. } => degrees.is_finite(),
            Transform3D::Shear { xy, xz, yz } => xy.is_finite() && xz.is_finite() && yz.is_finite(),
            Transform3D::Reflect(_) => true,
        }
    }
}

impl fmt::Display for Transform3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform3D::Translate { tx, ty, tz } => {
                write!(f, "Translation (TX: {}, TY: {}, TZ: {})", tx, ty, tz)
            }
            Transform3D::Scale { sx, sy, sz } => write!(f, "Scale (SX: {}, SY: {}, SZ: {})", sx, sy, sz),
            Transform3D::Rotate { axis, degrees } => {
                write!(f, "Rotation (Axis: {}, Angle: {}°)", axis.label(), degrees)
            }
            Transform3D::Shear { xy, xz, yz } => write!(f, "Shear (XY: {}, XZ: {}, YZ: {})", xy, xz, yz),
            Transform3D::Reflect(plane) => write!(f, "Reflection in plane {}", plane.label()),
        }
    }
}

/// Object-space rotation in degrees, one accumulator per axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Rotation {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn add(&mut self, axis: Axis, degrees: f64) {
        match axis {
            Axis::X => self.x += degrees,
            Axis::Y => self.y += degrees,
            Axis::Z => self.z += degrees,
        }
    }

    pub fn matrix(&self) -> Matrix4 {
        compose_rotation(self.x, self.y, self.z)
    }
}

/// Rz · (Ry · Rx): X is applied first, Z last
pub fn compose_rotation(rx: f64, ry: f64, rz: f64) -> Matrix4 {
    Matrix4::rotation_z(rz) * (Matrix4::rotation_y(ry) * Matrix4::rotation_x(rx))
}
