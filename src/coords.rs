//! Coordinate systems: device pixels, NDC, centered NDC and the world window
//!
//! Device input pixels use a bottom-left origin (y grows upward, like the
//! world). [`centered_ndc_to_device`] returns raster rows instead, with row 0
//! at the top of the surface.

use serde::{Deserialize, Serialize};
use crate::error::{ensure_finite, GraphicsError, Result};
use crate::math::Point2D;
use crate::raster::Pixel;

/// User-defined world rectangle mapped onto the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldWindow {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl WorldWindow {
    /// Validated constructor: finite bounds with max > min on both axes
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self> {
        let window = Self { x_min, x_max, y_min, y_max };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_finite("x_min", self.x_min)?;
        ensure_finite("x_max", self.x_max)?;
        ensure_finite("y_min", self.y_min)?;
        ensure_finite("y_max", self.y_max)?;
        if self.x_max <= self.x_min || self.y_max <= self.y_min {
            return Err(GraphicsError::DegenerateWindow);
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Inclusive range test
    pub fn contains(&self, wx: f64, wy: f64) -> bool {
        wx >= self.x_min && wx <= self.x_max && wy >= self.y_min && wy <= self.y_max
    }

    /// Reject points outside the window instead of clamping them
    pub fn check(&self, wx: f64, wy: f64) -> Result<()> {
        ensure_finite("x", wx)?;
        ensure_finite("y", wy)?;
        if self.contains(wx, wy) {
            Ok(())
        } else {
            Err(GraphicsError::OutOfRange { x: wx, y: wy, window: *self })
        }
    }
}

impl Default for WorldWindow {
    fn default() -> Self {
        Self {
            x_min: 10.5,
            x_max: 100.3,
            y_min: 15.2,
            y_max: 100.4,
        }
    }
}

fn check_canvas(width: usize, height: usize) -> Result<()> {
    if width <= 1 || height <= 1 {
        return Err(GraphicsError::DivisionByZero);
    }
    Ok(())
}

/// Device pixel (y up) to NDC in [0, 1]
pub fn device_to_ndc(px: f64, py: f64, width: usize, height: usize) -> Result<Point2D> {
    check_canvas(width, height)?;
    Ok(Point2D::new(px / (width - 1) as f64, py / (height - 1) as f64))
}

/// NDC to world coordinates inside `window`
pub fn ndc_to_world(u: f64, v: f64, window: &WorldWindow) -> Point2D {
    Point2D::new(
        u * window.width() + window.x_min,
        v * window.height() + window.y_min,
    )
}

/// World to NDC centered on the window middle, in [-1, 1]
pub fn world_to_centered_ndc(wx: f64, wy: f64, window: &WorldWindow) -> Result<Point2D> {
    if window.width() == 0.0 || window.height() == 0.0 {
        return Err(GraphicsError::DegenerateWindow);
    }
    Ok(Point2D::new(
        2.0 * (wx - window.x_min) / window.width() - 1.0,
        2.0 * (wy - window.y_min) / window.height() - 1.0,
    ))
}

/// Centered NDC to a raster pixel (row 0 at the top)
pub fn centered_ndc_to_device(cu: f64, cv: f64, width: usize, height: usize) -> Result<Pixel> {
    check_canvas(width, height)?;
    let px = ((cu + 1.0) / 2.0 * (width - 1) as f64).round();
    let py = ((1.0 - cv) / 2.0 * (height - 1) as f64).round();
    Ok(Pixel::new(px as i32, py as i32))
}

/// Validated world point to a device pixel (y up)
pub fn world_to_device(wx: f64, wy: f64, window: &WorldWindow, width: usize, height: usize) -> Result<Pixel> {
    check_canvas(width, height)?;
    window.check(wx, wy)?;
    let u = (wx - window.x_min) / window.width();
    let v = (wy - window.y_min) / window.height();
    Ok(Pixel::new(
        (u * (width - 1) as f64).round() as i32,
        (v * (height - 1) as f64).round() as i32,
    ))
}

/// Convert between y-up device rows and raster rows (the map is its own inverse)
pub fn flip_row(y: i32, height: usize) -> i32 {
    height as i32 - 1 - y
}

/// Every representation of one device pixel, for live readouts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateReadout {
    /// Input pixel, y up
    pub device: Pixel,
    pub ndc: Point2D,
    pub world: Point2D,
    pub centered_ndc: Point2D,
    /// Round-tripped pixel, raster rows
    pub raster: Pixel,
}

/// Run a device pixel through the whole device -> world -> device chain
pub fn map_coordinates(px: i32, py: i32, width: usize, height: usize, window: &WorldWindow) -> Result<CoordinateReadout> {
    let ndc = device_to_ndc(px as f64, py as f64, width, height)?;
    let world = ndc_to_world(ndc.x, ndc.y, window);
    let centered_ndc = world_to_centered_ndc(world.x, world.y, window)?;
    let raster = centered_ndc_to_device(centered_ndc.x, centered_ndc.y, width, height)?;

    Ok(CoordinateReadout {
        device: Pixel::new(px, py),
        ndc,
        world,
        centered_ndc,
        raster,
    })
}

/// Where a cartesian point sits relative to the axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    First,
    Second,
    Third,
    Fourth,
    XAxis,
    YAxis,
    Origin,
}

impl Quadrant {
    pub fn of(x: i32, y: i32) -> Self {
        match (x.signum(), y.signum()) {
            (1, 1) => Quadrant::First,
            (-1, 1) => Quadrant::Second,
            (-1, -1) => Quadrant::Third,
            (1, -1) => Quadrant::Fourth,
            (0, 0) => Quadrant::Origin,
            (0, _) => Quadrant::YAxis,
            _ => Quadrant::XAxis,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::First => "1",
            Quadrant::Second => "2",
            Quadrant::Third => "3",
            Quadrant::Fourth => "4",
            Quadrant::XAxis => "X axis",
            Quadrant::YAxis => "Y axis",
            Quadrant::Origin => "Origin",
        }
    }
}
