//! Polygon state and the 2D transform session

use crate::error::{ensure_bounded, ensure_finite, is_bounded, GraphicsError, Result};
use crate::history::TransformHistory;
use crate::math::{Matrix3, Point2D};
use crate::raster::{Color, LineAlgorithm, Pixel, PixelSink, Segment};
use super::Transform2D;

/// Polygon vertices in insertion order; edges join consecutive points and
/// wrap around from the last point to the first
#[derive(Debug, Clone, PartialEq)]
pub struct Shape2D {
    pub points: Vec<Point2D>,
}

impl Shape2D {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    /// Axis-aligned square with its lower-left corner at the origin
    pub fn square(size: f64) -> Self {
        Self::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(size, 0.0),
            Point2D::new(size, size),
            Point2D::new(0.0, size),
        ])
    }

    /// Vertex pairs forming the closed outline
    pub fn edges(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        let n = self.points.len();
        (0..n).filter(move |_| n > 1).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Average of the vertices (a natural rotation center)
    pub fn centroid(&self) -> Point2D {
        if self.points.is_empty() {
            return Point2D::ORIGIN;
        }
        let n = self.points.len() as f64;
        let (sx, sy) = self.points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Point2D::new(sx / n, sy / n)
    }
}

/// Transform every vertex, producing a new shape
pub fn apply_to_shape(matrix: &Matrix3, shape: &Shape2D) -> Shape2D {
    Shape2D::new(shape.points.iter().map(|p| matrix.transform_point(*p)).collect())
}

/// Current shape plus its transform history, owned by the caller
#[derive(Debug, Clone, Default)]
pub struct ShapeSession {
    shape: Option<Shape2D>,
    pub history: TransformHistory,
}

impl ShapeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape(&self) -> Option<&Shape2D> {
        self.shape.as_ref()
    }

    /// Replace the current shape with a square of the given side
    pub fn generate_square(&mut self, size: f64) -> Result<&Shape2D> {
        let size = ensure_finite("size", size)?;
        if size <= 0.0 {
            return Err(GraphicsError::InvalidInput(format!("size must be positive, got {}", size)));
        }
        log::info!("generated {}x{} square", size, size);
        Ok(self.shape.insert(Shape2D::square(size)))
    }

    pub fn set_shape(&mut self, shape: Shape2D) {
        self.shape = Some(shape);
    }

    /// Transform the current shape; the result becomes the new current shape
    pub fn apply(&mut self, transform: Transform2D) -> Result<&Shape2D> {
        if !transform.is_finite() {
            return Err(GraphicsError::InvalidInput(format!("{} has non-finite parameters", transform)));
        }
        let current = self.shape.as_ref().ok_or(GraphicsError::NoShapePresent)?;
        let next = apply_to_shape(&transform.matrix(), current);
        for p in &next.points {
            ensure_bounded("x", p.x)?;
            ensure_bounded("y", p.y)?;
        }
        self.history.record(transform.to_string());
        Ok(self.shape.insert(next))
    }

    /// Drop the shape and its history
    pub fn clear(&mut self) {
        self.shape = None;
        self.history.clear();
    }

    /// Redraw the outline, rounding vertices to pixels. Edges with an
    /// endpoint past the coordinate limit are skipped.
    pub fn render<S: PixelSink>(&self, sink: &mut S, algorithm: LineAlgorithm, color: Color) -> Result<()> {
        let shape = self.shape.as_ref().ok_or(GraphicsError::NoShapePresent)?;
        let drawable = |p: Point2D| is_bounded(p.x) && is_bounded(p.y);
        for (a, b) in shape.edges().filter(|&(a, b)| drawable(a) && drawable(b)) {
            sink.draw_segment(algorithm, Segment::new(Pixel::round(a), Pixel::round(b)), color);
        }
        Ok(())
    }
}
