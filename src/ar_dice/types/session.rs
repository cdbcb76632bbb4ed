//! Interaction state and user actions

use bevy::prelude::*;

/// Top-level interaction state.
///
/// There is no way back to `Idle`: once a plane has been shown, placement
/// stays enabled.
#[derive(States, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InteractionState {
    /// No plane detected yet.
    #[default]
    Idle,
    /// At least one plane is visible and taps place dice.
    PlanesVisible,
}

/// Actions requested by buttons, keys, or gestures.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceAction {
    RollAll,
    RemoveAll,
}

/// Camera ray of a tap that should place a die.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    pub ray: Ray3d,
}

/// Thresholds for recognizing a shake gesture
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct ShakeConfig {
    /// Direction reversals needed to count as a shake.
    pub reversals: u32,
    /// Reversals older than this are forgotten.
    pub window_secs: f32,
    /// Horizontal pointer speed (logical px/s) below which motion is ignored.
    pub min_speed: f32,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            reversals: 4,
            window_secs: 0.8,
            min_speed: 1200.0,
        }
    }
}
