//! Error type shared by the mapping, rasterization and transform code
//!
//! Every variant is recoverable: the caller reports it and keeps its state.

use crate::coords::WorldWindow;

/// Errors raised by the graphics core
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicsError {
    /// Non-finite or otherwise unusable numeric input
    InvalidInput(String),
    /// World coordinate outside the current window
    OutOfRange { x: f64, y: f64, window: WorldWindow },
    /// Window collapsed on one axis (max <= min)
    DegenerateWindow,
    /// Canvas dimension too small to normalize against (size <= 1)
    DivisionByZero,
    /// Transform or redraw requested before a shape/object was generated
    NoShapePresent,
}

impl std::fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphicsError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            GraphicsError::OutOfRange { x, y, window } => write!(
                f,
                "Point ({}, {}) is outside the window X: [{}, {}], Y: [{}, {}]",
                x, y, window.x_min, window.x_max, window.y_min, window.y_max
            ),
            GraphicsError::DegenerateWindow => {
                write!(f, "Degenerate window: max must be greater than min on both axes")
            }
            GraphicsError::DivisionByZero => {
                write!(f, "Canvas must be at least 2 pixels wide and tall")
            }
            GraphicsError::NoShapePresent => write!(f, "Generate a shape first"),
        }
    }
}

impl std::error::Error for GraphicsError {}

pub type Result<T> = std::result::Result<T, GraphicsError>;

/// Reject NaN and infinities coming from user-entered fields
pub fn ensure_finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GraphicsError::InvalidInput(format!("{} must be a finite number, got {}", name, value)))
    }
}

/// Largest coordinate magnitude a session keeps or draws
pub const COORD_LIMIT: f64 = 1.0e5;

/// Finite and within [`COORD_LIMIT`]
pub fn is_bounded(value: f64) -> bool {
    value.abs() <= COORD_LIMIT
}

/// Reject coordinates a transform has pushed past [`COORD_LIMIT`]
pub fn ensure_bounded(name: &str, value: f64) -> Result<f64> {
    let value = ensure_finite(name, value)?;
    if is_bounded(value) {
        Ok(value)
    } else {
        Err(GraphicsError::InvalidInput(format!("{} = {} exceeds the limit of {}", name, value, COORD_LIMIT)))
    }
}
