//! Time-driven mesh rotation

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use crate::rasterizer::Mesh;

/// Rotation axis (x is pitch, y is yaw, z is roll)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Swing between -PI and PI: `angle = cos(t_ms / period_ms) * PI`
    Oscillate { period_ms: f32 },
    /// Constant angular speed in radians per second
    Spin { rate: f32 },
}

/// Drives one rotation axis of one mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Index into the scene's mesh list
    pub mesh: usize,
    pub axis: Axis,
    pub motion: Motion,
}

impl Animation {
    pub fn oscillate(mesh: usize, axis: Axis, period_ms: f32) -> Self {
        Self { mesh, axis, motion: Motion::Oscillate { period_ms } }
    }

    pub fn spin(mesh: usize, axis: Axis, rate: f32) -> Self {
        Self { mesh, axis, motion: Motion::Spin { rate } }
    }

    /// Update the mesh rotation. `time_ms` is the absolute clock,
    /// `dt` the seconds since the previous frame.
    pub fn apply(&self, mesh: &mut Mesh, time_ms: f64, dt: f32) {
        let angle = match self.axis {
            Axis::X => &mut mesh.rotation.x,
            Axis::Y => &mut mesh.rotation.y,
            Axis::Z => &mut mesh.rotation.z,
        };
        match self.motion {
            Motion::Oscillate { period_ms } => {
                *angle = (time_ms / period_ms as f64).cos() as f32 * PI;
            }
            Motion::Spin { rate } => {
                *angle += rate * dt;
            }
        }
    }
}
