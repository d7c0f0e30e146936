//! Scene state owned by the driver loop
//!
//! The renderer only reads a `SceneState`; input handling and animation
//! mutate it between frames.

mod animation;
mod loader;
mod orbit;
mod presets;

pub use animation::*;
pub use loader::*;
pub use orbit::*;
pub use presets::*;

use serde::{Deserialize, Serialize};
use crate::rasterizer::{self, Camera, Framebuffer, Light, Mesh, RenderSettings, Vec3};

/// Everything one frame needs besides the framebuffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    #[serde(default)]
    pub camera: Camera,
    #[serde(default)]
    pub light: Light,
    pub meshes: Vec<Mesh>,
    #[serde(default)]
    pub animations: Vec<Animation>,
}

impl SceneState {
    /// Cube and icosahedron, both swinging around two axes
    pub fn default_scene() -> Self {
        let cube = cube().with_position(Vec3::new(1.0, -1.0, 1.0));
        let ico = icosahedron().with_position(Vec3::new(-1.0, 1.0, -1.0));

        Self {
            camera: Camera::new(Vec3::new(10.0, 10.0, 10.0), Vec3::ZERO),
            light: Light::new(10.0, 10.0, 10.0),
            meshes: vec![cube, ico],
            animations: vec![
                Animation::oscillate(0, Axis::X, 4000.0),
                Animation::oscillate(0, Axis::Y, 3000.0),
                Animation::oscillate(1, Axis::Z, 2000.0),
                Animation::oscillate(1, Axis::X, 5000.0),
            ],
        }
    }

    /// Run every animation for the frame at `time_ms`
    pub fn advance(&mut self, time_ms: f64, dt: f32) {
        for anim in &self.animations {
            if let Some(mesh) = self.meshes.get_mut(anim.mesh) {
                anim.apply(mesh, time_ms, dt);
            }
        }
    }

    /// Draw the scene into `fb` (no clear, no present)
    pub fn render(&self, fb: &mut Framebuffer, settings: &RenderSettings) {
        rasterizer::render(fb, &self.camera, &self.meshes, &self.light, settings);
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::default_scene()
    }
}
