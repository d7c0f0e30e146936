//! Mesh rendering: world/view/projection transform, per-face shading,
//! triangle submission

use super::math::{Mat4, Vec3};
use super::render::Framebuffer;
use super::types::{Camera, Color, Face, Light, Mesh, RenderSettings, ShadingMode};

/// Rotation part of a mesh's world matrix
pub fn rotation_matrix(mesh: &Mesh) -> Mat4 {
    Mat4::rotation_yaw_pitch_roll(mesh.rotation.y, mesh.rotation.x, mesh.rotation.z)
}

/// Rotation first, then translation
pub fn world_matrix(mesh: &Mesh) -> Mat4 {
    rotation_matrix(mesh)
        * Mat4::translation(mesh.position.x, mesh.position.y, mesh.position.z)
}

pub fn view_matrix(camera: &Camera) -> Mat4 {
    Mat4::look_at_lh(camera.position, camera.target, Vec3::UP)
}

pub fn projection_matrix(fb: &Framebuffer, settings: &RenderSettings) -> Mat4 {
    let aspect = fb.width as f32 / fb.height as f32;
    Mat4::perspective_fov_lh(settings.fov, aspect, settings.z_near, settings.z_far)
}

/// Unnormalized mesh-space face normal, `(a - b) x (a - c)`
pub fn face_normal(mesh: &Mesh, face: &Face) -> Vec3 {
    let a = mesh.vertices[face.a].pos;
    let b = mesh.vertices[face.b].pos;
    let c = mesh.vertices[face.c].pos;
    (a - b).cross(a - c)
}

/// Cosine between normal and light remapped from [-1, 1] to [0, 1].
/// A zero-length input gives the midpoint.
pub fn lambert_shade(normal: Vec3, light_dir: Vec3) -> f32 {
    let denom = normal.len() * light_dir.len();
    if denom == 0.0 {
        return 0.5;
    }
    let cos = normal.dot(light_dir) / denom;
    (cos + 1.0) / 2.0
}

/// Color of one face of `mesh` under `settings.shading`
pub fn face_color(
    mesh: &Mesh,
    face_index: usize,
    rotation: &Mat4,
    light: &Light,
    settings: &RenderSettings,
) -> Color {
    match settings.shading {
        ShadingMode::Flat => settings.base_color,
        ShadingMode::FaceIndexGradient => {
            let count = mesh.faces.len().max(1) as f32;
            Color::gray(0.25 + ((face_index % mesh.faces.len().max(1)) as f32 / count) * 0.75)
        }
        ShadingMode::Lambertian => {
            // Pure rotation: the normal matrix is the rotation itself
            let normal = rotation.transform_normal(face_normal(mesh, &mesh.faces[face_index]));
            settings.base_color.shade(lambert_shade(normal, light.direction))
        }
    }
}

/// Render one mesh with precomputed view and projection matrices
pub fn render_mesh(
    fb: &mut Framebuffer,
    mesh: &Mesh,
    view: &Mat4,
    projection: &Mat4,
    light: &Light,
    settings: &RenderSettings,
) {
    let rotation = rotation_matrix(mesh);
    let transform = world_matrix(mesh) * *view * *projection;

    for (face_index, face) in mesh.faces.iter().enumerate() {
        let pixel_a = fb.project(mesh.vertices[face.a].pos, &transform);
        let pixel_b = fb.project(mesh.vertices[face.b].pos, &transform);
        let pixel_c = fb.project(mesh.vertices[face.c].pos, &transform);

        let color = face_color(mesh, face_index, &rotation, light, settings);
        fb.draw_triangle(pixel_a, pixel_b, pixel_c, color);
    }
}

/// Draw every mesh into `fb`. Call `clear` before and `present` after.
pub fn render(
    fb: &mut Framebuffer,
    camera: &Camera,
    meshes: &[Mesh],
    light: &Light,
    settings: &RenderSettings,
) {
    let view = view_matrix(camera);
    let projection = projection_matrix(fb, settings);

    for mesh in meshes {
        render_mesh(fb, mesh, &view, &projection, light, settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::ObjectSpaceVertex;
    use crate::scene::cube as cube_mesh;

    fn quad_mesh() -> Mesh {
        // Square in the z = 0 plane, facing -z
        Mesh::new(
            "quad",
            vec![
                ObjectSpaceVertex::new(-1.0, 1.0, 0.0),
                ObjectSpaceVertex::new(1.0, 1.0, 0.0),
                ObjectSpaceVertex::new(-1.0, -1.0, 0.0),
                ObjectSpaceVertex::new(1.0, -1.0, 0.0),
            ],
            vec![Face::new(0, 1, 2), Face::new(1, 3, 2)],
        )
    }

    fn covered(fb: &Framebuffer) -> usize {
        fb.zbuffer.iter().filter(|&&z| z < Framebuffer::FAR).count()
    }

    #[test]
    fn test_lambert_shade_extremes() {
        let l = Vec3::new(0.0, 0.0, -2.0);
        assert!((lambert_shade(Vec3::new(0.0, 0.0, -5.0), l) - 1.0).abs() < 0.0001);
        assert!((lambert_shade(Vec3::new(0.0, 0.0, 3.0), l) - 0.0).abs() < 0.0001);
        assert!((lambert_shade(Vec3::new(1.0, 0.0, 0.0), l) - 0.5).abs() < 0.0001);
        assert_eq!(lambert_shade(Vec3::ZERO, l), 0.5);
    }

    #[test]
    fn test_face_normal_winding() {
        let quad = quad_mesh();
        // (a - b) x (a - c) for a=(-1,1), b=(1,1), c=(-1,-1)
        let n = face_normal(&quad, &quad.faces[0]);
        assert_eq!(n, Vec3::new(0.0, 0.0, -4.0));
    }

    #[test]
    fn test_normal_follows_rotation_not_translation() {
        let light = Light::new(0.0, 0.0, -1.0);
        let settings = RenderSettings { shading: ShadingMode::Lambertian, ..Default::default() };

        let quad = quad_mesh().with_position(Vec3::new(100.0, -40.0, 7.0));
        let lit = face_color(&quad, 0, &rotation_matrix(&quad), &light, &settings);
        assert_eq!(lit, Color::WHITE);

        // Half a turn of yaw points the normal away from the light
        let flipped = quad_mesh().with_rotation(Vec3::new(0.0, std::f32::consts::PI, 0.0));
        let dark = face_color(&flipped, 0, &rotation_matrix(&flipped), &light, &settings);
        assert!(dark.r < 0.001);
        assert_eq!(dark.a, 1.0);
    }

    #[test]
    fn test_face_index_gradient() {
        let cube = cube_mesh();
        let settings = RenderSettings { shading: ShadingMode::FaceIndexGradient, ..Default::default() };
        let rot = Mat4::identity();
        let light = Light::default();
        assert_eq!(face_color(&cube, 0, &rot, &light, &settings), Color::gray(0.25));
        assert_eq!(face_color(&cube, 6, &rot, &light, &settings), Color::gray(0.25 + 0.5 * 0.75));
    }

    #[test]
    fn test_flat_uses_base_color() {
        let cube = cube_mesh();
        let settings = RenderSettings {
            shading: ShadingMode::Flat,
            base_color: Color::GREEN,
            ..Default::default()
        };
        for i in 0..cube.faces.len() {
            assert_eq!(face_color(&cube, i, &Mat4::identity(), &Light::default(), &settings), Color::GREEN);
        }
    }

    #[test]
    fn test_render_cube_stays_in_center() {
        let mut fb = Framebuffer::new(100, 100);
        fb.clear(Color::TRANSPARENT);
        let camera = Camera::new(Vec3::new(10.0, 10.0, 10.0), Vec3::ZERO);
        let settings = RenderSettings { shading: ShadingMode::Flat, base_color: Color::RED, ..Default::default() };
        render(&mut fb, &camera, &[cube_mesh()], &Light::default(), &settings);

        assert!(covered(&fb) > 50);
        for (x, y) in [(0, 0), (99, 0), (0, 99), (99, 99)] {
            assert_eq!(fb.pixel(x, y), Some([0, 0, 0, 0]));
        }
        // Everything drawn is red
        for (i, &z) in fb.zbuffer.iter().enumerate() {
            if z < Framebuffer::FAR {
                assert_eq!(&fb.pixels[i * 4..i * 4 + 4], &[255, 0, 0, 255]);
            }
        }
    }

    #[test]
    fn test_nearer_mesh_occludes_farther() {
        // Same quad twice along the view axis. The camera looks down +z from z = -10.
        let camera = Camera::new(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO);
        let settings = RenderSettings { shading: ShadingMode::Flat, ..Default::default() };
        let mut near = quad_mesh().with_position(Vec3::new(0.0, 0.0, -2.0));
        let mut far = quad_mesh().with_position(Vec3::new(0.0, 0.0, 2.0));
        near.name = "near".into();
        far.name = "far".into();

        for order in [[&near, &far], [&far, &near]] {
            let mut fb = Framebuffer::new(80, 80);
            fb.clear(Color::TRANSPARENT);
            let view = view_matrix(&camera);
            let proj = projection_matrix(&fb, &settings);
            for mesh in order {
                let s = RenderSettings {
                    base_color: if mesh.name == "near" { Color::RED } else { Color::BLUE },
                    ..settings.clone()
                };
                render_mesh(&mut fb, mesh, &view, &proj, &Light::default(), &s);
            }
            // Right of the quads' diagonal seam, inside both
            assert_eq!(fb.pixel(55, 40), Some([255, 0, 0, 255]));
        }
    }
}
