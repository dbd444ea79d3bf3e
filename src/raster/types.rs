//! Core types for the rasterizers

use serde::{Deserialize, Serialize};
use crate::math::Point2D;

/// Integer device coordinate, the unit every rasterizer emits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
}

impl Pixel {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Round a real-valued point to the nearest pixel (half away from zero)
    pub fn round(p: Point2D) -> Self {
        Self {
            x: p.x.round() as i32,
            y: p.y.round() as i32,
        }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn to_point(self) -> Point2D {
        Point2D::new(self.x as f64, self.y as f64)
    }
}

impl From<(i32, i32)> for Pixel {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Two endpoints of a segment to rasterize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Pixel,
    pub p2: Pixel,
}

impl Segment {
    pub fn new(p1: Pixel, p2: Pixel) -> Self {
        Self { p1, p2 }
    }

    /// Swap endpoints so the major axis increases from p1 to p2
    pub fn normalized(self) -> Self {
        let dx = self.p2.x - self.p1.x;
        let dy = self.p2.y - self.p1.y;
        let backwards = if dy.abs() < dx.abs() { dx < 0 } else { dy < 0 };
        if backwards {
            Self { p1: self.p2, p2: self.p1 }
        } else {
            self
        }
    }

    /// True when the midpoint rasterizer can draw this segment as given:
    /// both coordinates are non-decreasing from p1 to p2
    pub fn is_midpoint_ready(&self) -> bool {
        self.p2.x >= self.p1.x && self.p2.y >= self.p1.y
    }
}

/// Circle with an integer center and radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Pixel,
    pub radius: u32,
}

impl Circle {
    pub fn new(center: Pixel, radius: u32) -> Self {
        Self { center, radius }
    }

    /// Circle centered at `center` passing (to the nearest pixel) through `rim`
    pub fn through(center: Pixel, rim: Pixel) -> Self {
        let radius = center.to_point().distance(rim.to_point()).round() as u32;
        Self { center, radius }
    }
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 160, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };
    pub const GREY: Color = Color { r: 200, g: 200, b: 200, a: 255 };
    pub const INK: Color = Color { r: 17, g: 17, b: 17, a: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert to [u8; 4] for the canvas
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}
