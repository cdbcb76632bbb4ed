//! Built-in die mesh

use bevy::prelude::*;

/// Cube die with the given edge length, centered on the origin.
pub fn create_die_mesh(edge: f32) -> Mesh {
    Mesh::from(Cuboid::new(edge, edge, edge))
}

/// Faces of the built-in cube die and the value each one shows.
pub fn die_face_normals() -> Vec<(Vec3, u32)> {
    vec![
        (Vec3::Y, 6),
        (Vec3::NEG_Y, 1),
        (Vec3::X, 3),
        (Vec3::NEG_X, 4),
        (Vec3::Z, 2),
        (Vec3::NEG_Z, 5),
    ]
}

/// Value on the face currently pointing up.
pub fn top_face_value(rotation: Quat) -> u32 {
    let mut best_match = 1;
    let mut best_dot = -2.0_f32;

    for (normal, value) in die_face_normals() {
        let dot = (rotation * normal).dot(Vec3::Y);
        if dot > best_dot {
            best_dot = dot;
            best_match = value;
        }
    }

    best_match
}
