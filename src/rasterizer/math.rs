//! Vector and matrix math for the rasterizer
//!
//! Matrices are row-major and points are row vectors, so a point is
//! transformed as `p * M` and `world * view * projection` applies the world
//! matrix first.

use std::ops::{Add, Mul, Sub};
use serde::{Serialize, Deserialize};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Normalize in place. A zero-length vector is left untouched.
    pub fn normalize(&mut self) {
        let l = self.len();
        if l == 0.0 {
            return;
        }
        let inv = 1.0 / l;
        self.x *= inv;
        self.y *= inv;
        self.z *= inv;
    }

    /// Normalized copy (same zero-length rule as `normalize`)
    pub fn normalized(self) -> Vec3 {
        let mut v = self;
        v.normalize();
        v
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Transform a point by `m`, including the perspective divide by w.
    ///
    /// A w of zero produces inf/NaN components rather than an error; callers
    /// only project points in front of the camera.
    pub fn transform_coordinates(self, m: &Mat4) -> Vec3 {
        let m = &m.m;
        let x = self.x * m[0] + self.y * m[4] + self.z * m[8] + m[12];
        let y = self.x * m[1] + self.y * m[5] + self.z * m[9] + m[13];
        let z = self.x * m[2] + self.y * m[6] + self.z * m[10] + m[14];
        let w = self.x * m[3] + self.y * m[7] + self.z * m[11] + m[15];
        Vec3 {
            x: x / w,
            y: y / w,
            z: z / w,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

/// Component-wise product
impl Mul for Vec3 {
    type Output = Vec3;
    fn mul(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

/// 4x4 matrix, row-major (`m[row * 4 + col]`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub m: [f32; 16],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub fn from_values(m: [f32; 16]) -> Self {
        Self { m }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn zero() -> Self {
        Self { m: [0.0; 16] }
    }

    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut r = Self::zero();
        r.m[0] = 1.0;
        r.m[15] = 1.0;
        r.m[5] = c;
        r.m[10] = c;
        r.m[9] = -s;
        r.m[6] = s;
        r
    }

    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut r = Self::zero();
        r.m[5] = 1.0;
        r.m[15] = 1.0;
        r.m[0] = c;
        r.m[2] = -s;
        r.m[8] = s;
        r.m[10] = c;
        r
    }

    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut r = Self::zero();
        r.m[10] = 1.0;
        r.m[15] = 1.0;
        r.m[0] = c;
        r.m[1] = s;
        r.m[4] = -s;
        r.m[5] = c;
        r
    }

    /// `Rz(roll) * Rx(pitch) * Ry(yaw)`. The order matters: it decides how
    /// combined Euler rotations look on screen.
    pub fn rotation_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self::rotation_z(roll) * Self::rotation_x(pitch) * Self::rotation_y(yaw)
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut r = Self::identity();
        r.m[12] = x;
        r.m[13] = y;
        r.m[14] = z;
        r
    }

    /// Left-handed view matrix looking from `eye` towards `target`
    pub fn look_at_lh(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let z_axis = (target - eye).normalized();
        let x_axis = up.cross(z_axis).normalized();
        let y_axis = z_axis.cross(x_axis).normalized();

        let ex = -x_axis.dot(eye);
        let ey = -y_axis.dot(eye);
        let ez = -z_axis.dot(eye);

        Self::from_values([
            x_axis.x, y_axis.x, z_axis.x, 0.0,
            x_axis.y, y_axis.y, z_axis.y, 0.0,
            x_axis.z, y_axis.z, z_axis.z, 0.0,
            ex, ey, ez, 1.0,
        ])
    }

    /// Left-handed perspective projection. `fov` is the vertical field of
    /// view in radians; view-space z in `[znear, zfar]` maps to depth `[0, 1]`.
    pub fn perspective_fov_lh(fov: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        let tan = 1.0 / (fov * 0.5).tan();
        let mut r = Self::zero();
        r.m[0] = tan / aspect;
        r.m[5] = tan;
        r.m[10] = -zfar / (znear - zfar);
        r.m[11] = 1.0;
        r.m[14] = (znear * zfar) / (znear - zfar);
        r
    }

    /// Transform a direction by the upper 3x3 block (no translation, no divide)
    pub fn transform_normal(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3 {
            x: v.x * m[0] + v.y * m[4] + v.z * m[8],
            y: v.x * m[1] + v.y * m[5] + v.z * m[9],
            z: v.x * m[2] + v.y * m[6] + v.z * m[10],
        }
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, other: Mat4) -> Mat4 {
        let a = &self.m;
        let b = &other.m;
        let mut out = [0.0f32; 16];
        for row in 0..4 {
            for col in 0..4 {
                out[row * 4 + col] = a[row * 4] * b[col]
                    + a[row * 4 + 1] * b[4 + col]
                    + a[row * 4 + 2] * b[8 + col]
                    + a[row * 4 + 3] * b[12 + col];
            }
        }
        Mat4 { m: out }
    }
}

/// `min + (max - min) * clamp(gradient, 0, 1)`
pub fn interpolate(min: f32, max: f32, gradient: f32) -> f32 {
    min + (max - min) * gradient.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.0001
    }

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
    }

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(b) - 32.0).abs() < 0.001);
    }

    #[test]
    fn test_vec3_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        let c = a.cross(b);
        assert!((c.z - 1.0).abs() < 0.001);
        assert!(approx(c.x, 0.0) && approx(c.y, 0.0));
    }

    #[test]
    fn test_vec3_componentwise() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(2.0, -1.0, 0.5);
        assert_eq!(a + b, Vec3::new(3.0, 1.0, 3.5));
        assert_eq!(a - b, Vec3::new(-1.0, 3.0, 2.5));
        assert_eq!(a * b, Vec3::new(2.0, -2.0, 1.5));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_normalize_zero_is_noop() {
        let mut v = Vec3::ZERO;
        v.normalize();
        assert_eq!(v, Vec3::ZERO);

        let mut w = Vec3::new(3.0, 0.0, 4.0);
        w.normalize();
        assert!(approx(w.len(), 1.0));
        assert!(approx(w.x, 0.6) && approx(w.z, 0.8));
    }

    #[test]
    fn test_interpolate_clamps() {
        let got: Vec<f32> = [-5.0, 0.0, 0.5, 1.0, 5.0]
            .iter()
            .map(|&g| interpolate(10.0, 20.0, g))
            .collect();
        assert_eq!(got, vec![10.0, 10.0, 15.0, 20.0, 20.0]);
    }

    #[test]
    fn test_identity_multiply() {
        let m = Mat4::rotation_yaw_pitch_roll(0.3, -1.2, 2.0) * Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(Mat4::identity() * m, m);
        assert_eq!(m * Mat4::identity(), m);
    }

    #[test]
    fn test_yaw_pitch_roll_zero_is_identity() {
        assert_eq!(Mat4::rotation_yaw_pitch_roll(0.0, 0.0, 0.0), Mat4::identity());
    }

    #[test]
    fn test_yaw_pitch_roll_order() {
        let (yaw, pitch, roll) = (0.4, 0.9, -0.7);
        let composed = Mat4::rotation_z(roll) * Mat4::rotation_x(pitch) * Mat4::rotation_y(yaw);
        assert_eq!(Mat4::rotation_yaw_pitch_roll(yaw, pitch, roll), composed);

        // Swapping the order gives a different rotation
        let swapped = Mat4::rotation_y(yaw) * Mat4::rotation_x(pitch) * Mat4::rotation_z(roll);
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(!approx_vec(p.transform_coordinates(&composed), p.transform_coordinates(&swapped)));
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        // Row-vector convention: +x rotates onto -z for a positive yaw
        let p = Vec3::new(1.0, 0.0, 0.0).transform_coordinates(&Mat4::rotation_y(std::f32::consts::FRAC_PI_2));
        assert!(approx_vec(p, Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_translation_moves_points_not_normals() {
        let t = Mat4::translation(5.0, -2.0, 1.0);
        let p = Vec3::new(1.0, 1.0, 1.0);
        assert!(approx_vec(p.transform_coordinates(&t), Vec3::new(6.0, -1.0, 2.0)));
        assert!(approx_vec(t.transform_normal(p), p));
    }

    #[test]
    fn test_look_at_maps_eye_and_target() {
        let eye = Vec3::new(0.0, 0.0, -10.0);
        let view = Mat4::look_at_lh(eye, Vec3::ZERO, Vec3::UP);
        assert!(approx_vec(eye.transform_coordinates(&view), Vec3::ZERO));
        assert!(approx_vec(Vec3::ZERO.transform_coordinates(&view), Vec3::new(0.0, 0.0, 10.0)));
        // Up stays up
        let up = Vec3::new(0.0, 1.0, 0.0).transform_coordinates(&view);
        assert!(approx(up.y, 1.0));
    }

    #[test]
    fn test_perspective_depth_range() {
        let proj = Mat4::perspective_fov_lh(0.78, 1.0, 0.5, 20.0);
        let near = Vec3::new(0.0, 0.0, 0.5).transform_coordinates(&proj);
        let far = Vec3::new(0.0, 0.0, 20.0).transform_coordinates(&proj);
        assert!(approx(near.z, 0.0));
        assert!(approx(far.z, 1.0));

        // Points at the edge of the vertical fov land on ndc y = 1
        let half = 0.39f32;
        let edge = Vec3::new(0.0, half.tan() * 4.0, 4.0).transform_coordinates(&proj);
        assert!(approx(edge.y, 1.0));
    }

    #[test]
    fn test_transform_with_zero_w_is_not_finite() {
        let proj = Mat4::perspective_fov_lh(0.78, 1.0, 0.01, 1.0);
        let p = Vec3::new(1.0, 1.0, 0.0).transform_coordinates(&proj);
        assert!(!p.x.is_finite());
    }
}
