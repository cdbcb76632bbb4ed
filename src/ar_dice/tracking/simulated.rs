//! Simulated tracking service
//!
//! Stands in for a device tracker on desktop. Each configured plane becomes an
//! anchor once the session has been *running* for its detection delay, and
//! hit-tests intersect the camera ray with the anchors found so far.

use bevy::prelude::*;
use std::time::Duration;

use super::*;

/// A real-world surface the simulated tracker will eventually detect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulatedPlane {
    /// World position of the plane's anchor.
    pub center: Vec3,
    /// Rotation about world Y, in radians.
    pub yaw: f32,
    /// Width (local X) and depth (local Z).
    pub extent: Vec2,
    /// Running time before the plane is reported.
    pub detect_after: Duration,
}

/// Feature points per side of a surface that is still being detected.
const FEATURE_GRID: u32 = 5;

/// Points scattered over a surface, one per lattice cell with a fixed nudge
/// off the cell center.
pub fn surface_feature_points(plane: &SimulatedPlane) -> Vec<Vec3> {
    let rotation = Quat::from_rotation_y(plane.yaw);
    let cells = FEATURE_GRID as f32;
    let mut points = Vec::with_capacity((FEATURE_GRID * FEATURE_GRID) as usize);
    for i in 0..FEATURE_GRID {
        for j in 0..FEATURE_GRID {
            let nudge = ((i * 7 + j * 13) % 5) as f32 / 5.0 - 0.4;
            let u = (i as f32 + 0.5 + nudge * 0.5) / cells - 0.5;
            let v = (j as f32 + 0.5 - nudge * 0.5) / cells - 0.5;
            let local = Vec3::new(u * plane.extent.x, 0.0, v * plane.extent.y);
            points.push(plane.center + rotation * local);
        }
    }
    points
}

#[derive(Default)]
pub struct SimulatedTracking {
    pending: Vec<SimulatedPlane>,
    anchors: Vec<Anchor>,
    queued: Vec<AnchorEvent>,
    running: bool,
    config: SessionConfig,
    tracked_time: Duration,
    next_id: u64,
}

impl SimulatedTracking {
    pub fn new(planes: impl IntoIterator<Item = SimulatedPlane>) -> Self {
        let mut pending: Vec<SimulatedPlane> = planes.into_iter().collect();
        // Later delays are popped off the back first.
        pending.sort_by(|a, b| b.detect_after.cmp(&a.detect_after));
        Self {
            pending,
            ..default()
        }
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Drop a detected anchor, as a tracker does when it loses a surface.
    pub fn remove_anchor(&mut self, id: AnchorId) -> bool {
        let before = self.anchors.len();
        self.anchors.retain(|anchor| anchor.id != id);
        let removed = self.anchors.len() != before;
        if removed {
            self.queued.push(AnchorEvent::Removed(id));
        }
        removed
    }

    fn detect_due_planes(&mut self) {
        while let Some(plane) = self.pending.last().copied() {
            if plane.detect_after > self.tracked_time {
                break;
            }
            self.pending.pop();

            let geometry = PlaneGeometry::horizontal(Vec2::ZERO, plane.extent);
            if !self.config.plane_detection.accepts(geometry.alignment) {
                continue;
            }

            self.next_id += 1;
            let anchor = Anchor {
                id: AnchorId(self.next_id),
                transform: Transform::from_translation(plane.center)
                    .with_rotation(Quat::from_rotation_y(plane.yaw)),
                kind: AnchorKind::Plane(geometry),
            };
            self.anchors.push(anchor);
            self.queued.push(AnchorEvent::Added(anchor));
        }
    }
}

impl TrackingService for SimulatedTracking {
    fn run(&mut self, config: &SessionConfig) {
        self.config = *config;
        self.running = true;
    }

    fn pause(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn update(&mut self, delta: Duration) -> Vec<AnchorEvent> {
        if self.running {
            self.tracked_time += delta;
            self.detect_due_planes();
        }
        std::mem::take(&mut self.queued)
    }

    fn hit_test(&self, ray: Ray3d, types: HitTestType) -> Vec<HitResult> {
        if !self.running {
            return Vec::new();
        }

        let mut hits: Vec<HitResult> = self
            .anchors
            .iter()
            .filter_map(|anchor| intersect_plane_anchor(anchor, ray, types))
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Points on the surfaces not reported yet; detected planes stop showing them.
    fn feature_points(&self) -> Vec<Vec3> {
        if !self.running {
            return Vec::new();
        }
        self.pending.iter().flat_map(surface_feature_points).collect()
    }
}

/// Intersect a world ray with a plane anchor's local `y = 0` surface.
pub fn intersect_plane_anchor(anchor: &Anchor, ray: Ray3d, types: HitTestType) -> Option<HitResult> {
    let plane = anchor.plane()?;

    let to_world = anchor.transform.compute_affine();
    let to_local = to_world.inverse();
    let origin = to_local.transform_point3(ray.origin);
    let direction = to_local.transform_vector3(*ray.direction);

    if direction.y.abs() < 0.0001 {
        return None;
    }
    let t = -origin.y / direction.y;
    if t < 0.0 {
        return None;
    }

    let local_hit = origin + direction * t;
    if types == HitTestType::ExistingPlaneUsingExtent && !plane.contains_local(local_hit) {
        return None;
    }

    let world_hit = to_world.transform_point3(local_hit);
    Some(HitResult {
        anchor: anchor.id,
        distance: world_hit.distance(ray.origin),
        world_transform: Transform::from_translation(world_hit)
            .with_rotation(anchor.transform.rotation),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(center: Vec3, delay_secs: f32) -> SimulatedPlane {
        SimulatedPlane {
            center,
            yaw: 0.0,
            extent: Vec2::new(1.0, 1.0),
            detect_after: Duration::from_secs_f32(delay_secs),
        }
    }

    fn down_at(x: f32, z: f32) -> Ray3d {
        Ray3d::new(Vec3::new(x, 2.0, z), Dir3::NEG_Y)
    }

    fn running(planes: Vec<SimulatedPlane>) -> SimulatedTracking {
        let mut tracking = SimulatedTracking::new(planes);
        tracking.run(&SessionConfig::default());
        tracking
    }

    #[test]
    fn test_plane_added_once_after_delay() {
        let mut tracking = running(vec![table(Vec3::ZERO, 1.0)]);

        assert!(tracking.update(Duration::from_millis(500)).is_empty());
        let events = tracking.update(Duration::from_millis(600));
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], AnchorEvent::Added(_)));

        assert!(tracking.update(Duration::from_secs(5)).is_empty());
        assert_eq!(tracking.anchors().len(), 1);
    }

    #[test]
    fn test_paused_session_makes_no_progress() {
        let mut tracking = SimulatedTracking::new(vec![table(Vec3::ZERO, 0.5)]);

        assert!(tracking.update(Duration::from_secs(10)).is_empty());

        tracking.run(&SessionConfig::default());
        tracking.pause();
        assert!(tracking.update(Duration::from_secs(10)).is_empty());

        tracking.run(&SessionConfig::default());
        assert_eq!(tracking.update(Duration::from_secs(1)).len(), 1);
    }

    #[test]
    fn test_planes_detected_in_delay_order() {
        let mut tracking = running(vec![
            table(Vec3::new(5.0, 0.0, 0.0), 2.0),
            table(Vec3::ZERO, 0.0),
        ]);

        let events = tracking.update(Duration::from_secs(3));
        let centers: Vec<Vec3> = events
            .iter()
            .filter_map(|event| match event {
                AnchorEvent::Added(anchor) => Some(anchor.transform.translation),
                _ => None,
            })
            .collect();
        assert_eq!(centers, vec![Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_vertical_only_session_ignores_horizontal_planes() {
        let mut tracking = SimulatedTracking::new(vec![table(Vec3::ZERO, 0.0)]);
        tracking.run(&SessionConfig {
            plane_detection: PlaneDetection::Vertical,
        });
        assert!(tracking.update(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_hit_test_with_extent() {
        let mut tracking = running(vec![table(Vec3::new(0.0, -0.5, -1.0), 0.0)]);
        tracking.update(Duration::ZERO);

        let hits = tracking.hit_test(down_at(0.3, -0.8), HitTestType::ExistingPlaneUsingExtent);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].world_position().distance(Vec3::new(0.3, -0.5, -0.8)) < 1e-5);
        assert!((hits[0].distance - 2.5).abs() < 1e-5);

        let outside = down_at(2.0, -1.0);
        assert!(tracking
            .hit_test(outside, HitTestType::ExistingPlaneUsingExtent)
            .is_empty());
        assert_eq!(tracking.hit_test(outside, HitTestType::ExistingPlane).len(), 1);
    }

    #[test]
    fn test_hit_test_respects_yaw() {
        let mut tracking = running(vec![SimulatedPlane {
            center: Vec3::ZERO,
            yaw: std::f32::consts::FRAC_PI_2,
            extent: Vec2::new(4.0, 0.5),
            detect_after: Duration::ZERO,
        }]);
        tracking.update(Duration::ZERO);

        // Rotated a quarter turn, the long side runs along world Z.
        assert_eq!(
            tracking
                .hit_test(down_at(0.0, 1.5), HitTestType::ExistingPlaneUsingExtent)
                .len(),
            1
        );
        assert!(tracking
            .hit_test(down_at(1.5, 0.0), HitTestType::ExistingPlaneUsingExtent)
            .is_empty());
    }

    #[test]
    fn test_hit_test_sorted_nearest_first() {
        let mut tracking = running(vec![
            table(Vec3::new(0.0, -1.0, 0.0), 0.0),
            table(Vec3::new(0.0, 0.5, 0.0), 0.0),
        ]);
        tracking.update(Duration::ZERO);

        let hits = tracking.hit_test(down_at(0.0, 0.0), HitTestType::ExistingPlaneUsingExtent);
        assert_eq!(hits.len(), 2);
        assert!(hits[0].distance < hits[1].distance);
        assert!((hits[0].world_position().y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_ray_parallel_or_away_misses() {
        let mut tracking = running(vec![table(Vec3::ZERO, 0.0)]);
        tracking.update(Duration::ZERO);

        let parallel = Ray3d::new(Vec3::new(0.0, 1.0, 0.0), Dir3::X);
        let upward = Ray3d::new(Vec3::new(0.0, 1.0, 0.0), Dir3::Y);
        assert!(tracking.hit_test(parallel, HitTestType::ExistingPlane).is_empty());
        assert!(tracking.hit_test(upward, HitTestType::ExistingPlane).is_empty());
    }

    #[test]
    fn test_paused_session_hit_test_is_empty() {
        let mut tracking = running(vec![table(Vec3::ZERO, 0.0)]);
        tracking.update(Duration::ZERO);
        tracking.pause();
        assert!(tracking
            .hit_test(down_at(0.0, 0.0), HitTestType::ExistingPlaneUsingExtent)
            .is_empty());
    }

    #[test]
    fn test_remove_anchor_emits_removed() {
        let mut tracking = running(vec![table(Vec3::ZERO, 0.0)]);
        let events = tracking.update(Duration::ZERO);
        let AnchorEvent::Added(anchor) = events[0] else {
            panic!("expected an added anchor");
        };

        assert!(tracking.remove_anchor(anchor.id));
        assert!(!tracking.remove_anchor(anchor.id));
        assert_eq!(
            tracking.update(Duration::ZERO),
            vec![AnchorEvent::Removed(anchor.id)]
        );
    }

    #[test]
    fn test_feature_points_lie_on_surface() {
        let plane = SimulatedPlane {
            center: Vec3::new(0.5, -0.6, -1.2),
            yaw: 0.7,
            extent: Vec2::new(1.2, 0.8),
            detect_after: Duration::ZERO,
        };
        let to_local = Quat::from_rotation_y(-plane.yaw);

        let points = surface_feature_points(&plane);
        assert_eq!(points.len(), 25);
        for point in points {
            let local = to_local * (point - plane.center);
            assert!(local.y.abs() < 1e-5);
            assert!(local.x.abs() <= plane.extent.x / 2.0);
            assert!(local.z.abs() <= plane.extent.y / 2.0);
        }
    }

    #[test]
    fn test_feature_points_only_for_undetected_planes_while_running() {
        let mut tracking = SimulatedTracking::new(vec![
            table(Vec3::ZERO, 0.5),
            table(Vec3::new(3.0, 0.0, 0.0), 5.0),
        ]);
        assert!(tracking.feature_points().is_empty());

        tracking.run(&SessionConfig::default());
        assert_eq!(tracking.feature_points().len(), 50);

        tracking.update(Duration::from_secs(1));
        let points = tracking.feature_points();
        assert_eq!(points.len(), 25);
        assert!(points.iter().all(|p| p.x > 2.0));

        tracking.pause();
        assert!(tracking.feature_points().is_empty());
    }
}
