//! Soft Engine: CPU scanline rasterizer
//!
//! Projects triangle meshes through row-major world/view/projection
//! matrices, fills them scanline by scanline and resolves visibility with
//! a per-pixel depth buffer. No GPU involved.

pub mod rasterizer;
pub mod scene;
pub mod export;

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
