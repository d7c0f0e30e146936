//! Built-in meshes

use crate::rasterizer::{Face, Mesh, ObjectSpaceVertex};

fn build(name: &str, vertices: &[(f32, f32, f32)], faces: &[(usize, usize, usize)]) -> Mesh {
    Mesh::new(
        name,
        vertices.iter().map(|&(x, y, z)| ObjectSpaceVertex::new(x, y, z)).collect(),
        faces.iter().map(|&(a, b, c)| Face::new(a, b, c)).collect(),
    )
}

/// 2x2x2 cube centered on the origin, 8 vertices and 12 faces
pub fn cube() -> Mesh {
    build(
        "Cube",
        &[
            (-1.0, 1.0, 1.0),
            (1.0, 1.0, 1.0),
            (-1.0, -1.0, 1.0),
            (1.0, -1.0, 1.0),
            (-1.0, 1.0, -1.0),
            (1.0, 1.0, -1.0),
            (1.0, -1.0, -1.0),
            (-1.0, -1.0, -1.0),
        ],
        &[
            (0, 2, 1),
            (1, 2, 3),
            (1, 3, 6),
            (1, 6, 5),
            (0, 1, 4),
            (1, 5, 4),
            (2, 7, 3),
            (3, 7, 6),
            (0, 7, 2),
            (0, 4, 7),
            (4, 5, 6),
            (4, 6, 7),
        ],
    )
}

/// Regular icosahedron from the three golden rectangles, 12 vertices and 20 faces
pub fn icosahedron() -> Mesh {
    let phi = (1.0 + 5.0f32.sqrt()) / 2.0;
    build(
        "Ico",
        &[
            (1.0, phi, 0.0),
            (-1.0, phi, 0.0),
            (1.0, -phi, 0.0),
            (-1.0, -phi, 0.0),
            (phi, 0.0, 1.0),
            (phi, 0.0, -1.0),
            (-phi, 0.0, 1.0),
            (-phi, 0.0, -1.0),
            (0.0, 1.0, phi),
            (0.0, -1.0, phi),
            (0.0, 1.0, -phi),
            (0.0, -1.0, -phi),
        ],
        &[
            (1, 7, 6),
            (0, 1, 8),
            (0, 10, 1),
            (1, 6, 8),
            (1, 10, 7),
            (4, 0, 8),
            (0, 5, 10),
            (0, 4, 5),
            (4, 8, 9),
            (6, 9, 8),
            (3, 9, 6),
            (3, 6, 7),
            (3, 7, 11),
            (7, 10, 11),
            (5, 11, 10),
            (3, 11, 2),
            (5, 2, 11),
            (2, 9, 3),
            (4, 2, 5),
            (2, 4, 9),
        ],
    )
}
