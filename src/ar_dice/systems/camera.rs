//! Desktop camera controls
//!
//! On a device the AR camera follows the phone. On desktop the keyboard moves
//! it instead: A/D (or Left/Right) orbit around the focus point and W/S (or
//! Up/Down) move closer or further away.

use bevy::prelude::*;

use crate::ar_dice::types::*;

/// Point the AR camera looks at while orbiting.
pub const CAMERA_FOCUS: Vec3 = Vec3::new(0.0, -0.6, -1.2);

const MIN_DISTANCE: f32 = 0.4;
const MAX_DISTANCE: f32 = 4.0;

pub fn orbit_camera(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let rotation_speed = 1.0;
    let zoom_speed = 1.0;

    for mut transform in camera_query.iter_mut() {
        let mut angle = 0.0;
        if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
            angle += rotation_speed * time.delta_secs();
        }
        if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
            angle -= rotation_speed * time.delta_secs();
        }

        let mut zoom = 0.0;
        if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
            zoom -= zoom_speed * time.delta_secs();
        }
        if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
            zoom += zoom_speed * time.delta_secs();
        }

        if angle == 0.0 && zoom == 0.0 {
            continue;
        }

        let offset = Quat::from_rotation_y(angle) * (transform.translation - CAMERA_FOCUS);
        let distance = (offset.length() + zoom).clamp(MIN_DISTANCE, MAX_DISTANCE);
        transform.translation = CAMERA_FOCUS + offset.normalize_or_zero() * distance;
        *transform = transform.looking_at(CAMERA_FOCUS, Vec3::Y);
    }
}
