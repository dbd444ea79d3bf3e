//! 3D to 2D projection onto the canvas

use serde::{Deserialize, Serialize};
use crate::math::{Point2D, Vec3};
use super::Rotation;

/// cos(45°), shared by both isometric axes
const ISO: f64 = 0.7071;

/// Minimum depth in front of the eye plane; anything nearer or behind
/// collapses to the center
const NEAR_EPSILON: f64 = 0.001;

/// How object space lands on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Projection {
    /// Oblique isometric view: X and Z fan out at 45°, Y points up
    #[default]
    Isometric,
    /// Pinhole camera at `distance` in front of the origin, looking down +Z
    Perspective { distance: f64 },
}

impl Projection {
    pub fn label(&self) -> &'static str {
        match self {
            Projection::Isometric => "Isometric",
            Projection::Perspective { .. } => "Perspective",
        }
    }
}

/// Target surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

/// Rotate a vertex by the object rotation, then project it to a device point
/// (row 0 at the top). `zoom` is a percentage: 100 keeps the object size.
pub fn project_vertex(
    vertex: Vec3,
    rotation: Rotation,
    zoom: f64,
    projection: Projection,
    viewport: Viewport,
) -> Point2D {
    let v = rotation.matrix().transform_point(vertex);
    project(v, zoom, projection, viewport)
}

/// Project an already-rotated point
pub fn project(v: Vec3, zoom: f64, projection: Projection, viewport: Viewport) -> Point2D {
    let f = zoom / 100.0;
    let c = viewport.center();

    match projection {
        Projection::Isometric => Point2D::new(
            (v.x - v.z) * f * ISO + c.x,
            (-v.y + (v.x + v.z) * 0.5) * f * ISO + c.y,
        ),
        Projection::Perspective { distance } => {
            let denom = v.z + distance;
            if denom < NEAR_EPSILON {
                return c;
            }
            let k = distance / denom;
            Point2D::new(v.x * k * f + c.x, -v.y * k * f + c.y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport { width: 600, height: 600 };

    #[test]
    fn test_origin_projects_to_center() {
        for projection in [Projection::Isometric, Projection::Perspective { distance: 400.0 }] {
            let p = project_vertex(Vec3::ZERO, Rotation::default(), 100.0, projection, VIEW);
            assert!(p.approx_eq(Point2D::new(300.0, 300.0), 1e-9));
        }
    }

    #[test]
    fn test_isometric_axes() {
        let x = project(Vec3::new(100.0, 0.0, 0.0), 100.0, Projection::Isometric, VIEW);
        assert!(x.approx_eq(Point2D::new(300.0 + 70.71, 300.0 + 35.355), 1e-6));

        // +Y goes up the screen
        let y = project(Vec3::new(0.0, 100.0, 0.0), 100.0, Projection::Isometric, VIEW);
        assert!(y.approx_eq(Point2D::new(300.0, 300.0 - 70.71), 1e-6));

        let z = project(Vec3::new(0.0, 0.0, 100.0), 100.0, Projection::Isometric, VIEW);
        assert!(z.approx_eq(Point2D::new(300.0 - 70.71, 300.0 + 35.355), 1e-6));
    }

    #[test]
    fn test_zoom_scales_about_center() {
        let a = project(Vec3::new(10.0, 20.0, 5.0), 100.0, Projection::Isometric, VIEW);
        let b = project(Vec3::new(10.0, 20.0, 5.0), 200.0, Projection::Isometric, VIEW);
        assert!(((b.x - 300.0) - 2.0 * (a.x - 300.0)).abs() < 1e-9);
        assert!(((b.y - 300.0) - 2.0 * (a.y - 300.0)).abs() < 1e-9);
    }

    #[test]
    fn test_perspective_shrinks_with_depth() {
        let projection = Projection::Perspective { distance: 400.0 };
        let near = project(Vec3::new(50.0, 0.0, 0.0), 100.0, projection, VIEW);
        let far = project(Vec3::new(50.0, 0.0, 400.0), 100.0, projection, VIEW);
        assert!((near.x - 350.0).abs() < 1e-9);
        assert!((far.x - 325.0).abs() < 1e-9);

        let eye = project(Vec3::new(50.0, 50.0, -400.0), 100.0, projection, VIEW);
        assert_eq!(eye, VIEW.center());
    }

    #[test]
    fn test_perspective_behind_eye_collapses_to_center() {
        let projection = Projection::Perspective { distance: 500.0 };
        for z in [-500.0005, -1000.0, -1.0e6] {
            let p = project(Vec3::new(120.0, -80.0, z), 100.0, projection, VIEW);
            assert_eq!(p, VIEW.center(), "z = {}", z);
        }
        // just in front of the eye plane still projects
        let front = project(Vec3::new(1.0, 0.0, -499.0), 100.0, projection, VIEW);
        assert!((front.x - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_applied_before_projection() {
        let rotation = Rotation { x: 0.0, y: 90.0, z: 0.0 };
        let rotated = project_vertex(Vec3::new(100.0, 0.0, 0.0), rotation, 100.0, Projection::Isometric, VIEW);
        let direct = project(Vec3::new(0.0, 0.0, -100.0), 100.0, Projection::Isometric, VIEW);
        assert!(rotated.approx_eq(direct, 1e-6));
    }
}
