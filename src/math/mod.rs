//! Vector and matrix math shared by the 2D and 3D engines

mod matrix;
mod vec;

pub use matrix::*;
pub use vec::*;
