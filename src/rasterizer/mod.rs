//! CPU scanline rasterizer
//!
//! Features:
//! - Row-major 4x4 matrices, left-handed look-at and perspective
//! - Sorted-scanline triangle fill with linear depth interpolation
//! - Per-pixel z-buffer (closer wins, ties keep the first write)
//! - Flat, face-index gradient and Lambertian face shading

mod math;
mod types;
mod render;
mod pipeline;

pub use math::*;
pub use types::*;
pub use render::*;
pub use pipeline::*;

/// Default window size
pub const WIDTH: usize = 960;
pub const HEIGHT: usize = 720;
