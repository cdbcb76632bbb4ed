//! AR tracking service boundary
//!
//! The tracking service owns camera pose tracking and plane detection. This
//! crate only consumes it: anchors come in as [`AnchorEvent`] messages and
//! taps are resolved through [`TrackingService::hit_test`].
//!
//! - `simulated`: desktop stand-in that "detects" configured planes over time

mod simulated;

pub use simulated::*;

use bevy::prelude::*;
use std::time::Duration;

/// Stable identifier the tracking service assigns to an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(pub u64);

/// Orientation of a detected plane relative to gravity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaneAlignment {
    Horizontal,
    Vertical,
}

/// Geometry of a plane anchor, expressed in the anchor's local space.
///
/// The plane lies in the anchor's local XZ plane (local Y is the plane normal).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneGeometry {
    pub alignment: PlaneAlignment,
    /// Center of the detected extent: `x` is local X, `y` is local Z.
    pub center: Vec2,
    /// Width along local X and depth along local Z.
    pub extent: Vec2,
}

impl PlaneGeometry {
    pub fn horizontal(center: Vec2, extent: Vec2) -> Self {
        Self {
            alignment: PlaneAlignment::Horizontal,
            center,
            extent,
        }
    }

    /// Whether a local-space point on the plane falls inside the detected extent.
    pub fn contains_local(&self, local: Vec3) -> bool {
        let half = self.extent * 0.5;
        (local.x - self.center.x).abs() <= half.x && (local.z - self.center.y).abs() <= half.y
    }
}

/// What kind of real-world feature an anchor stands for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnchorKind {
    Plane(PlaneGeometry),
    /// A bare tracked point with no surface attached.
    Point,
}

/// A tracked position in the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    pub id: AnchorId,
    /// Anchor pose in world space.
    pub transform: Transform,
    pub kind: AnchorKind,
}

impl Anchor {
    pub fn plane(&self) -> Option<&PlaneGeometry> {
        match &self.kind {
            AnchorKind::Plane(geometry) => Some(geometry),
            AnchorKind::Point => None,
        }
    }
}

/// Anchor lifecycle notifications, written once per frame by
/// [`drive_tracking_session`](crate::ar_dice::drive_tracking_session).
#[derive(Message, Clone, Debug, PartialEq)]
pub enum AnchorEvent {
    Added(Anchor),
    Updated(Anchor),
    Removed(AnchorId),
}

/// Which detected features a hit-test may report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTestType {
    /// Planes already detected, restricted to their detected extent.
    ExistingPlaneUsingExtent,
    /// Planes already detected, treated as unbounded.
    ExistingPlane,
}

/// One intersection reported by a hit-test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitResult {
    pub anchor: AnchorId,
    /// Distance along the ray from its origin.
    pub distance: f32,
    /// World-space pose of the hit point.
    pub world_transform: Transform,
}

impl HitResult {
    pub fn world_position(&self) -> Vec3 {
        self.world_transform.translation
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaneDetection {
    #[default]
    Horizontal,
    Vertical,
    Both,
}

impl PlaneDetection {
    pub fn accepts(&self, alignment: PlaneAlignment) -> bool {
        match self {
            PlaneDetection::Horizontal => alignment == PlaneAlignment::Horizontal,
            PlaneDetection::Vertical => alignment == PlaneAlignment::Vertical,
            PlaneDetection::Both => true,
        }
    }
}

/// World-tracking session configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub plane_detection: PlaneDetection,
}

/// Camera tracking and plane detection supplied by the AR engine.
pub trait TrackingService: Send + Sync + 'static {
    /// Start (or resume) world tracking.
    fn run(&mut self, config: &SessionConfig);

    /// Pause tracking. Detected anchors are kept.
    fn pause(&mut self);

    fn is_running(&self) -> bool;

    /// Advance tracking by one frame and collect anchor changes since the last call.
    fn update(&mut self, delta: Duration) -> Vec<AnchorEvent>;

    /// Intersect a camera ray with detected features, nearest first.
    fn hit_test(&self, ray: Ray3d, types: HitTestType) -> Vec<HitResult>;

    /// World-space feature points found in the current frame.
    fn feature_points(&self) -> Vec<Vec3> {
        Vec::new()
    }
}

/// Resource holding the active tracking service.
#[derive(Resource)]
pub struct ArSession {
    pub config: SessionConfig,
    service: Box<dyn TrackingService>,
}

impl ArSession {
    pub fn new(config: SessionConfig, service: impl TrackingService) -> Self {
        Self {
            config,
            service: Box::new(service),
        }
    }

    pub fn start(&mut self) {
        if !self.service.is_running() {
            self.service.run(&self.config);
            info!("AR session started ({:?} plane detection)", self.config.plane_detection);
        }
    }

    pub fn pause(&mut self) {
        if self.service.is_running() {
            self.service.pause();
            info!("AR session paused");
        }
    }

    pub fn is_running(&self) -> bool {
        self.service.is_running()
    }

    pub fn update(&mut self, delta: Duration) -> Vec<AnchorEvent> {
        self.service.update(delta)
    }

    pub fn hit_test(&self, ray: Ray3d, types: HitTestType) -> Vec<HitResult> {
        self.service.hit_test(ray, types)
    }

    pub fn feature_points(&self) -> Vec<Vec3> {
        self.service.feature_points()
    }
}
