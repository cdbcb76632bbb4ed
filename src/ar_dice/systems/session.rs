//! Tracking session lifecycle
//!
//! The world-tracking session runs while the view is on screen and pauses
//! while it is hidden. Each frame the session is advanced and its anchor
//! changes are forwarded as [`AnchorEvent`] messages.

use bevy::math::Isometry3d;
use bevy::prelude::*;
use bevy::window::{AppLifecycle, PrimaryWindow, WindowOccluded};

use crate::ar_dice::tracking::{AnchorEvent, ArSession};

/// Startup system: the view is visible as soon as the app starts.
pub fn start_ar_session(mut session: ResMut<ArSession>) {
    session.start();
}

/// Pause tracking while the app is suspended or its window is hidden.
pub fn sync_session_with_visibility(
    mut session: ResMut<ArSession>,
    mut lifecycle: MessageReader<AppLifecycle>,
    mut occluded: MessageReader<WindowOccluded>,
    primary_window: Query<Entity, With<PrimaryWindow>>,
) {
    for event in lifecycle.read() {
        match event {
            AppLifecycle::WillSuspend | AppLifecycle::Suspended => session.pause(),
            AppLifecycle::WillResume | AppLifecycle::Running => session.start(),
            AppLifecycle::Idle => {}
        }
    }

    let primary = primary_window.single().ok();
    for event in occluded.read() {
        if Some(event.window) != primary {
            continue;
        }
        if event.occluded {
            session.pause();
        } else {
            session.start();
        }
    }
}

/// Advance the tracker by one frame and publish its anchor changes.
pub fn drive_tracking_session(
    time: Res<Time>,
    mut session: ResMut<ArSession>,
    mut anchor_events: MessageWriter<AnchorEvent>,
) {
    for event in session.update(time.delta()) {
        anchor_events.write(event);
    }
}

/// Marks the tracker's feature points, like a device AR view's debug overlay.
pub fn draw_feature_points(session: Res<ArSession>, mut gizmos: Gizmos) {
    let color = Color::srgb(1.0, 0.85, 0.1);
    for point in session.feature_points() {
        gizmos.sphere(Isometry3d::from_translation(point), 0.006, color);
    }
}
