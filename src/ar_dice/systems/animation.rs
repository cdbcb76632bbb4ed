//! Timed rotate-by animation
//!
//! Rotating a die is fire-and-forget: inserting [`RotateBy`] schedules the
//! turn and [`animate_rotate_by`] advances it each frame. Inserting a new
//! `RotateBy` on an entity that is still turning replaces the old one; the new
//! turn starts from wherever the die is at that moment.

use bevy::prelude::*;

use crate::ar_dice::meshes::top_face_value;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct RotateBy {
    /// Euler angles (XYZ order, radians) to turn by over the whole animation.
    pub angles: Vec3,
    pub duration: f32,
    pub elapsed: f32,
    /// Orientation when the animation first ran; captured on the first tick.
    pub start: Option<Quat>,
}

impl RotateBy {
    pub fn new(angles: Vec3, duration: f32) -> Self {
        Self {
            angles,
            duration,
            elapsed: 0.0,
            start: None,
        }
    }

    /// Advance by `dt` seconds from `current`. Returns the new rotation and
    /// whether the animation has finished.
    pub fn advance(&mut self, current: Quat, dt: f32) -> (Quat, bool) {
        let start = *self.start.get_or_insert(current);
        self.elapsed += dt;

        let progress = if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        };

        let turned = self.angles * progress;
        let rotation = start * Quat::from_euler(EulerRot::XYZ, turned.x, turned.y, turned.z);
        (rotation, progress >= 1.0)
    }
}

/// System advancing every active rotate-by animation.
pub fn animate_rotate_by(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut RotateBy)>,
) {
    let dt = time.delta_secs();
    for (entity, mut transform, mut rotate) in query.iter_mut() {
        let (rotation, finished) = rotate.advance(transform.rotation, dt);
        transform.rotation = rotation;
        if finished {
            debug!("Die {entity:?} landed showing {}", top_face_value(rotation));
            commands.entity(entity).try_remove::<RotateBy>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_quat_eq(a: Quat, b: Quat) {
        // q and -q are the same rotation.
        assert!(a.dot(b).abs() > 0.9999, "{a:?} != {b:?}");
    }

    #[test]
    fn test_reaches_exact_target() {
        let angles = Vec3::new(FRAC_PI_2 * 15.0, 0.0, FRAC_PI_2 * 10.0);
        let mut rotate = RotateBy::new(angles, 1.0);

        let mut rotation = Quat::IDENTITY;
        let mut finished = false;
        for _ in 0..70 {
            (rotation, finished) = rotate.advance(rotation, 1.0 / 60.0);
            if finished {
                break;
            }
        }

        assert!(finished);
        assert_quat_eq(
            rotation,
            Quat::from_euler(EulerRot::XYZ, angles.x, 0.0, angles.z),
        );
    }

    #[test]
    fn test_halfway() {
        let mut rotate = RotateBy::new(Vec3::new(FRAC_PI_2 * 2.0, 0.0, 0.0), 2.0);
        let (rotation, finished) = rotate.advance(Quat::IDENTITY, 1.0);
        assert!(!finished);
        assert_quat_eq(rotation, Quat::from_rotation_x(FRAC_PI_2));
    }

    #[test]
    fn test_start_captured_on_first_tick_only() {
        let start = Quat::from_rotation_y(0.3);
        let mut rotate = RotateBy::new(Vec3::new(FRAC_PI_2, 0.0, 0.0), 1.0);

        let (mid, _) = rotate.advance(start, 0.5);
        // Later ticks ignore the current rotation passed in.
        let (end, finished) = rotate.advance(Quat::IDENTITY, 0.5);

        assert!(finished);
        assert_eq!(rotate.start, Some(start));
        assert_quat_eq(mid, start * Quat::from_rotation_x(FRAC_PI_2 * 0.5));
        assert_quat_eq(end, start * Quat::from_rotation_x(FRAC_PI_2));
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut rotate = RotateBy::new(Vec3::new(0.0, 0.0, FRAC_PI_2), 0.0);
        let (rotation, finished) = rotate.advance(Quat::IDENTITY, 0.0);
        assert!(finished);
        assert_quat_eq(rotation, Quat::from_rotation_z(FRAC_PI_2));
    }
}
