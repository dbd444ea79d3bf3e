//! 3D object session: current object, view state and history

use crate::error::{ensure_bounded, ensure_finite, is_bounded, GraphicsError, Result};
use crate::history::TransformHistory;
use crate::math::{Point2D, Vec3};
use crate::raster::{Color, LineAlgorithm, Pixel, PixelSink};
use super::object::{apply_to_object, Object3D, ObjectInfo, ObjectKind};
use super::projection::{project, project_vertex, Projection, Viewport};
use super::{Rotation, Transform3D};

pub const DEFAULT_ZOOM: f64 = 100.0;

/// Length of the fixed axes at 100% zoom
const AXIS_LENGTH: f64 = 100.0;

/// Corner order matches octant numbering (1..8)
const GUIDE_CORNERS: [(f64, f64, f64); 8] = [
    (1.0, 1.0, 1.0),
    (-1.0, 1.0, 1.0),
    (-1.0, -1.0, 1.0),
    (1.0, -1.0, 1.0),
    (1.0, 1.0, -1.0),
    (-1.0, 1.0, -1.0),
    (-1.0, -1.0, -1.0),
    (1.0, -1.0, -1.0),
];

const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// Current object plus the view that projects it
#[derive(Debug, Clone)]
pub struct ObjectSession {
    object: Option<Object3D>,
    rotation: Rotation,
    zoom: f64,
    projection: Projection,
    pub history: TransformHistory,
}

impl Default for ObjectSession {
    fn default() -> Self {
        Self {
            object: None,
            rotation: Rotation::default(),
            zoom: DEFAULT_ZOOM,
            projection: Projection::default(),
            history: TransformHistory::new(),
        }
    }
}

impl ObjectSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&self) -> Option<&Object3D> {
        self.object.as_ref()
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn info(&self) -> Option<ObjectInfo> {
        self.object.as_ref().map(ObjectInfo::of)
    }

    /// Replace the object with a fresh template and reset the rotation
    pub fn generate(&mut self, kind: ObjectKind, size: f64) -> Result<&Object3D> {
        let size = ensure_finite("size", size)?;
        if size <= 0.0 {
            return Err(GraphicsError::InvalidInput(format!("size must be positive, got {}", size)));
        }
        self.rotation = Rotation::default();
        log::info!("generated {} of size {}", kind.label(), size);
        Ok(self.object.insert(kind.build(size)))
    }

    /// Apply a transform. Rotations accumulate into the view rotation;
    /// everything else rewrites the vertex list.
    pub fn apply(&mut self, transform: Transform3D) -> Result<&Object3D> {
        if !transform.is_finite() {
            return Err(GraphicsError::InvalidInput(format!("{} has non-finite parameters", transform)));
        }
        let current = self.object.as_ref().ok_or(GraphicsError::NoShapePresent)?;

        let next = match transform {
            Transform3D::Rotate { axis, degrees } => {
                self.rotation.add(axis, degrees);
                current.clone()
            }
            _ => apply_to_object(&transform.matrix(), current),
        };
        for v in &next.vertices {
            ensure_bounded("x", v.x)?;
            ensure_bounded("y", v.y)?;
            ensure_bounded("z", v.z)?;
        }
        self.history.record(transform.to_string());
        Ok(self.object.insert(next))
    }

    /// Absolute X/Y view angles, Z accumulator untouched
    pub fn set_view_rotation(&mut self, x: f64, y: f64) -> Result<()> {
        self.rotation.x = ensure_finite("rotation x", x)?;
        self.rotation.y = ensure_finite("rotation y", y)?;
        Ok(())
    }

    /// Zoom in percent
    pub fn set_zoom(&mut self, zoom: f64) -> Result<()> {
        let zoom = ensure_finite("zoom", zoom)?;
        if zoom <= 0.0 {
            return Err(GraphicsError::InvalidInput(format!("zoom must be positive, got {}", zoom)));
        }
        self.zoom = zoom;
        Ok(())
    }

    pub fn set_projection(&mut self, projection: Projection) -> Result<()> {
        if let Projection::Perspective { distance } = projection {
            let distance = ensure_finite("distance", distance)?;
            if distance <= 0.0 {
                return Err(GraphicsError::InvalidInput(format!(
                    "perspective distance must be positive, got {}",
                    distance
                )));
            }
        }
        log::debug!("projection: {}", projection.label());
        self.projection = projection;
        Ok(())
    }

    /// Drop the object, history and view state (projection is kept)
    pub fn clear(&mut self) {
        self.object = None;
        self.rotation = Rotation::default();
        self.zoom = DEFAULT_ZOOM;
        self.history.clear();
    }

    /// Device-space vertex positions after rotation and projection
    pub fn projected_vertices(&self, viewport: Viewport) -> Vec<Pixel> {
        self.projected_points(viewport).into_iter().map(Pixel::round).collect()
    }

    fn projected_points(&self, viewport: Viewport) -> Vec<Point2D> {
        self.object
            .iter()
            .flat_map(|o| o.vertices.iter())
            .map(|v| project_vertex(*v, self.rotation, self.zoom, self.projection, viewport))
            .collect()
    }

    /// Draw guides, axes and the object. Guides and axes ignore the object
    /// rotation; the object is optional. Lines and dots that project past
    /// the coordinate limit are skipped.
    pub fn render<S: PixelSink>(&self, sink: &mut S, viewport: Viewport) {
        self.draw_octant_guide(sink, viewport);
        self.draw_axes(sink, viewport);

        let Some(object) = &self.object else {
            return;
        };
        let points = self.projected_points(viewport);
        for &(a, b) in &object.edges {
            if let (Some(&p1), Some(&p2)) = (points.get(a), points.get(b)) {
                draw_edge(sink, p1, p2, Color::INK);
            }
        }
        for p in points.into_iter().filter(|&p| drawable(p)) {
            sink.plot(Pixel::round(p), Color::INK);
        }
    }

    fn fixed(&self, v: Vec3, viewport: Viewport) -> Point2D {
        project(v, self.zoom, self.projection, viewport)
    }

    fn draw_axes<S: PixelSink>(&self, sink: &mut S, viewport: Viewport) {
        let length = AXIS_LENGTH * self.zoom / 100.0;
        let origin = self.fixed(Vec3::ZERO, viewport);
        let axes = [
            (Vec3::new(length, 0.0, 0.0), Color::RED),
            (Vec3::new(0.0, length, 0.0), Color::GREEN),
            (Vec3::new(0.0, 0.0, length), Color::BLUE),
        ];
        for (end, color) in axes {
            draw_edge(sink, origin, self.fixed(end, viewport), color);
        }
    }

    fn draw_octant_guide<S: PixelSink>(&self, sink: &mut S, viewport: Viewport) {
        let sx = viewport.width as f64 / 2.0;
        let sy = viewport.height as f64 / 2.0;
        let sz = sx.min(sy);
        let corners: Vec<Point2D> = GUIDE_CORNERS
            .iter()
            .map(|&(x, y, z)| self.fixed(Vec3::new(x * sx, y * sy, z * sz), viewport))
            .collect();
        for (a, b) in BOX_EDGES {
            draw_edge(sink, corners[a], corners[b], Color::GREY);
        }
    }
}

fn drawable(p: Point2D) -> bool {
    is_bounded(p.x) && is_bounded(p.y)
}

fn draw_edge<S: PixelSink>(sink: &mut S, a: Point2D, b: Point2D, color: Color) {
    if drawable(a) && drawable(b) {
        sink.draw_line(LineAlgorithm::Dda, Pixel::round(a), Pixel::round(b), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Canvas;
    use crate::transform3d::{Axis, Plane};

    const VIEW: Viewport = Viewport { width: 200, height: 200 };

    #[test]
    fn test_apply_without_object_fails() {
        let mut session = ObjectSession::new();
        let result = session.apply(Transform3D::Reflect(Plane::XY));
        assert_eq!(result, Err(GraphicsError::NoShapePresent));
        assert!(session.history.is_empty());
    }

    #[test_log::test]
    fn test_translate_replaces_vertices() {
        let mut session = ObjectSession::new();
        session.generate(ObjectKind::Cube, 50.0).unwrap();
        let moved = session.apply(Transform3D::Translate { tx: 10.0, ty: 0.0, tz: -5.0 }).unwrap();
        assert!(moved.vertices[0].approx_eq(Vec3::new(-15.0, -25.0, -30.0), 1e-12));
        assert_eq!(session.history.entries(), ["Translation (TX: 10, TY: 0, TZ: -5)"]);
    }

    #[test_log::test]
    fn test_rotate_accumulates_without_touching_vertices() {
        let mut session = ObjectSession::new();
        session.generate(ObjectKind::Pyramid, 40.0).unwrap();
        let before = session.object().cloned();

        session.apply(Transform3D::Rotate { axis: Axis::X, degrees: 30.0 }).unwrap();
        session.apply(Transform3D::Rotate { axis: Axis::X, degrees: 30.0 }).unwrap();

        assert_eq!(session.object().cloned(), before);
        assert_eq!(session.rotation(), Rotation::new(60.0, 0.0, 0.0));
        assert_eq!(session.history.len(), 2);

        // regenerating resets the view rotation but keeps the history
        session.generate(ObjectKind::Cube, 40.0).unwrap();
        assert_eq!(session.rotation(), Rotation::default());
        assert_eq!(session.history.len(), 2);
    }

    #[test]
    fn test_view_settings_validated() {
        let mut session = ObjectSession::new();
        assert!(session.set_zoom(0.0).is_err());
        assert!(session.set_zoom(f64::NAN).is_err());
        session.set_zoom(150.0).unwrap();
        assert_eq!(session.zoom(), 150.0);

        assert!(session.set_projection(Projection::Perspective { distance: 0.0 }).is_err());
        session.set_projection(Projection::Perspective { distance: 500.0 }).unwrap();
        assert_eq!(session.projection().label(), "Perspective");

        session.set_view_rotation(15.0, -20.0).unwrap();
        assert_eq!(session.rotation(), Rotation::new(15.0, -20.0, 0.0));

        session.clear();
        assert_eq!(session.zoom(), DEFAULT_ZOOM);
        assert_eq!(session.rotation(), Rotation::default());
        assert!(session.object().is_none());
    }

    #[test]
    fn test_render_axes_colors() {
        let mut canvas = Canvas::new(200, 200);
        ObjectSession::new().render(&mut canvas, VIEW);

        // axis tips at 100% zoom, isometric
        assert_eq!(canvas.get_pixel(171, 135), Color::RED);
        assert_eq!(canvas.get_pixel(100, 29), Color::GREEN);
        assert_eq!(canvas.get_pixel(29, 135), Color::BLUE);
    }

    #[test_log::test]
    fn test_runaway_scaling_is_refused_and_renders() {
        let mut session = ObjectSession::new();
        session.generate(ObjectKind::Cube, 100.0).unwrap();
        let scale = Transform3D::Scale { sx: 1.2, sy: 1.2, sz: 1.2 };

        let applied = (0..130).take_while(|_| session.apply(scale).is_ok()).count();
        assert!(applied > 0 && applied < 130);
        assert_eq!(session.history.len(), applied);
        assert!(matches!(session.apply(scale), Err(GraphicsError::InvalidInput(_))));

        let mut canvas = Canvas::new(200, 200);
        session.render(&mut canvas, VIEW);
        assert_eq!(session.projected_vertices(VIEW).len(), 8);
    }

    #[test]
    fn test_huge_zoom_skips_offscreen_lines() {
        let mut session = ObjectSession::new();
        session.generate(ObjectKind::Cube, 40.0).unwrap();
        session.set_zoom(1.0e9).unwrap();

        let mut sink: Vec<Pixel> = Vec::new();
        session.render(&mut sink, VIEW);
        // only the two vertices on the view axis stay in range
        assert_eq!(sink, vec![Pixel::new(100, 100), Pixel::new(100, 100)]);
    }

    #[test]
    fn test_render_object_on_top() {
        let mut session = ObjectSession::new();
        session.generate(ObjectKind::Cube, 40.0).unwrap();
        let mut canvas = Canvas::new(200, 200);
        session.render(&mut canvas, VIEW);

        // (20, 20, 20) and (-20, -20, -20) both land on the center
        assert_eq!(canvas.get_pixel(100, 100), Color::INK);
        assert_eq!(session.projected_vertices(VIEW).len(), 8);
        assert_eq!(session.info().and_then(|i| i.octant), Some(1));
    }
}
