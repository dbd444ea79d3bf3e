//! cg-raster: classic computer graphics algorithms on a software canvas
//!
//! - Device / NDC / world coordinate mapping
//! - DDA and midpoint line rasterization
//! - Explicit, trigonometric and midpoint circles
//! - 2D affine transforms on a polygon
//! - 3D wireframe transforms with isometric and perspective projection
//!
//! Everything here is display-agnostic. The `cg-raster` binary is a
//! macroquad viewer on top of it.

pub mod config;
pub mod coords;
pub mod error;
pub mod history;
pub mod math;
pub mod raster;
pub mod transform2d;
pub mod transform3d;

pub use coords::{map_coordinates, CoordinateReadout, WorldWindow};
pub use error::{GraphicsError, Result};
pub use history::TransformHistory;
pub use math::{Matrix3, Matrix4, Point2D, Vec3};
pub use raster::{
    rasterize_circle, rasterize_line, rasterize_segment, Canvas, Centered, Circle, CircleAlgorithm, Color, LineAlgorithm, Pixel,
    PixelSink, Segment,
};
pub use transform2d::{apply_to_shape, Shape2D, ShapeSession, Transform2D};
pub use transform3d::{
    apply_to_object, compose_rotation, project_vertex, Object3D, ObjectKind, ObjectSession, Projection, Rotation,
    Transform3D, Viewport,
};
