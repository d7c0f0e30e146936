//! Core types for the rasterizer

use serde::{Serialize, Deserialize};
use super::math::Vec3;

/// RGBA color, floating point channels in 0.0-1.0
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GREEN: Color = Color { r: 0.0, g: 1.0, b: 0.0, a: 1.0 };
    pub const BLUE: Color = Color { r: 0.0, g: 0.0, b: 1.0, a: 1.0 };
    /// What a freshly cleared canvas holds
    pub const TRANSPARENT: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn gray(level: f32) -> Self {
        Self::new(level, level, level)
    }

    /// Scale the color channels by intensity (0.0-1.0), alpha is kept
    pub fn shade(self, intensity: f32) -> Self {
        let i = intensity.clamp(0.0, 1.0);
        Self {
            r: self.r * i,
            g: self.g * i,
            b: self.b * i,
            a: self.a,
        }
    }

    /// 8-bit RGBA: each channel times 255, truncated
    pub fn to_bytes(self) -> [u8; 4] {
        [
            (self.r * 255.0) as u8,
            (self.g * 255.0) as u8,
            (self.b * 255.0) as u8,
            (self.a * 255.0) as u8,
        ]
    }
}

/// A mesh-space vertex, before any transform
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectSpaceVertex {
    pub pos: Vec3,
}

impl ObjectSpaceVertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { pos: Vec3::new(x, y, z) }
    }
}

/// A projected vertex: x is the pixel column, y the pixel row, z the depth
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl ScreenVertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A triangle face (indices into the mesh vertex list)
///
/// Winding only matters for the face normal; faces are never culled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Face {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }
}

/// A named triangle mesh placed in the world
///
/// Vertex and face lists are fixed once built; only `position` and
/// `rotation` change between frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<ObjectSpaceVertex>,
    pub faces: Vec<Face>,
    #[serde(default)]
    pub position: Vec3,
    /// Euler angles in radians: y is yaw, x is pitch, z is roll
    #[serde(default)]
    pub rotation: Vec3,
}

impl Mesh {
    pub fn new(name: &str, vertices: Vec<ObjectSpaceVertex>, faces: Vec<Face>) -> Self {
        Self {
            name: name.to_string(),
            vertices,
            faces,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Look-at camera. The view direction is always `target - position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO)
    }
}

/// Directional light: no attenuation, no color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub direction: Vec3,
}

impl Light {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { direction: Vec3::new(x, y, z) }
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::new(10.0, 10.0, 10.0)
    }
}

/// How each face gets its color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShadingMode {
    /// Every face uses the base color
    Flat,
    /// Gray ramp from 0.25 to 1.0 by face index
    FaceIndexGradient,
    /// Per-face cosine to the light, remapped to 0.0-1.0
    Lambertian,
}

/// Rasterizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub shading: ShadingMode,
    /// Face color for Flat, and the lit color for Lambertian
    pub base_color: Color,
    /// Color the framebuffer is cleared to
    pub clear_color: Color,
    /// Vertical field of view in radians
    pub fov: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            shading: ShadingMode::Lambertian,
            base_color: Color::WHITE,
            clear_color: Color::TRANSPARENT,
            fov: 0.78,
            z_near: 0.01,
            z_far: 1.0,
        }
    }
}
