//! Software rasterization of lines and circles
//!
//! Rasterizers are plain iterators over integer [`Pixel`]s. They never touch a
//! display; callers feed them into a [`PixelSink`] such as [`Canvas`].

mod canvas;
mod circle;
mod line;
mod types;

pub use canvas::*;
pub use circle::*;
pub use line::*;
pub use types::*;

/// Default drawing surface of the demos
pub const WIDTH: usize = 500;
pub const HEIGHT: usize = 500;
