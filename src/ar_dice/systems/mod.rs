//! Systems module for the AR dice demo
//!
//! This module contains all the Bevy systems, organized into submodules by
//! functionality:
//!
//! - `setup`: Scene initialization (camera, light, grid material, die template, controls)
//! - `session`: Tracking session start/pause, anchor forwarding, feature points
//! - `planes`: Grid surfaces for detected planes
//! - `placement`: Tap detection, hit-testing, and die placement
//! - `roll`: Rolling and removing dice
//! - `animation`: Timed rotate-by animation
//! - `controls`: Buttons, keyboard shortcuts, shake gesture, status text
//! - `camera`: Desktop camera orbit

pub mod animation;
mod camera;
mod controls;
pub mod placement;
pub mod planes;
pub mod roll;
mod session;
mod setup;

// Re-export all public systems
pub use animation::{animate_rotate_by, RotateBy};
pub use camera::{orbit_camera, CAMERA_FOCUS};
pub use controls::{
    detect_shake_gesture, handle_control_clicks, handle_keyboard_shortcuts, update_status_text,
    ShakeDetector,
};
pub use placement::{
    detect_taps, die_spawn_position, die_template_ready, place_die_at_hit, place_die_from_ray,
    place_requested_dice, spawn_die,
};
pub use planes::{handle_anchor_events, plane_visual, spawn_plane_anchor, PlaneVisual};
pub use roll::{forget_despawned_dice, handle_dice_actions, roll_all, roll_die};
pub use session::{
    draw_feature_points, drive_tracking_session, start_ar_session, sync_session_with_visibility,
};
pub use setup::{load_die_template, setup};
