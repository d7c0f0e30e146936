//! Orbit camera: spherical coordinates around a target point

use std::f32::consts::PI;
use crate::rasterizer::{Camera, Vec3};

/// Smallest polar angle, keeps the camera off the up axis
const MIN_PHI: f32 = 0.0001;
const MIN_DISTANCE: f32 = 0.1;
/// Pixels of drag per radian
const ROTATE_DIVISOR: f32 = 200.0;
/// Pixels of drag per world unit of pan, and wheel units per unit of zoom
const PAN_DIVISOR: f32 = 100.0;
const ZOOM_DIVISOR: f32 = 100.0;

/// Orbit state: `distance` from `target`, azimuth `theta` around the up
/// axis and polar angle `phi` down from it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitController {
    pub target: Vec3,
    pub distance: f32,
    pub theta: f32,
    pub phi: f32,
}

impl OrbitController {
    /// Pick up the orbit that reproduces the camera's current position
    pub fn from_camera(camera: &Camera) -> Self {
        let rel = camera.position - camera.target;
        let distance = rel.len().max(MIN_DISTANCE);
        Self {
            target: camera.target,
            distance,
            theta: rel.z.atan2(rel.x),
            phi: (rel.y / distance).clamp(-1.0, 1.0).acos().clamp(MIN_PHI, PI),
        }
    }

    /// Camera position for the current orbit
    pub fn position(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target
            + Vec3::new(
                sin_phi * cos_theta,
                cos_phi,
                sin_phi * sin_theta,
            ) * self.distance
    }

    /// Drag in pixels: rotate around the target
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.theta -= dx / ROTATE_DIVISOR;
        self.phi = (self.phi - dy / ROTATE_DIVISOR).clamp(MIN_PHI, PI);
    }

    /// Drag in pixels: slide the target across the ground plane
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target.x -= cos_theta * dy / PAN_DIVISOR;
        self.target.z -= sin_theta * dy / PAN_DIVISOR;
        self.target.x += sin_theta * dx / PAN_DIVISOR;
        self.target.z -= cos_theta * dx / PAN_DIVISOR;
    }

    /// Wheel delta: positive moves away from the target
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta / ZOOM_DIVISOR).max(MIN_DISTANCE);
    }

    /// Write position and target into `camera`
    pub fn apply(&self, camera: &mut Camera) {
        camera.position = self.position();
        camera.target = self.target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        (a - b).len() < 0.001
    }

    #[test]
    fn test_round_trip_from_camera() {
        let camera = Camera::new(Vec3::new(10.0, 10.0, 10.0), Vec3::new(1.0, 0.0, -2.0));
        let orbit = OrbitController::from_camera(&camera);
        assert!(approx_vec(orbit.position(), camera.position));
    }

    #[test]
    fn test_rotate_keeps_distance_and_clamps() {
        let camera = Camera::new(Vec3::new(0.0, 3.0, 4.0), Vec3::ZERO);
        let mut orbit = OrbitController::from_camera(&camera);
        orbit.rotate(123.0, 0.0);
        assert!((orbit.position().len() - 5.0).abs() < 0.001);

        orbit.rotate(0.0, 10_000.0);
        assert_eq!(orbit.phi, MIN_PHI);
        orbit.rotate(0.0, -10_000.0);
        assert_eq!(orbit.phi, PI);
    }

    #[test]
    fn test_zoom_never_reaches_target() {
        let mut orbit = OrbitController::from_camera(&Camera::default());
        orbit.zoom(-1_000_000.0);
        assert_eq!(orbit.distance, MIN_DISTANCE);
        orbit.zoom(250.0);
        assert!((orbit.distance - (MIN_DISTANCE + 2.5)).abs() < 0.0001);
    }

    #[test]
    fn test_pan_moves_target_and_camera_together() {
        let mut camera = Camera::new(Vec3::new(5.0, 5.0, 5.0), Vec3::ZERO);
        let mut orbit = OrbitController::from_camera(&camera);
        let offset = camera.position - camera.target;

        orbit.pan(40.0, -25.0);
        orbit.apply(&mut camera);
        assert_ne!(camera.target, Vec3::ZERO);
        assert_eq!(camera.target.y, 0.0);
        assert!(approx_vec(camera.position - camera.target, offset));
    }
}
