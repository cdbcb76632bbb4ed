//! UI components and markers

use bevy::prelude::*;

/// Marker for the camera the AR view renders through
#[derive(Component)]
pub struct MainCamera;

/// Marker for the "Roll Again" button
#[derive(Component)]
pub struct RollAgainButton;

/// Marker for the "Remove All Dice" button
#[derive(Component)]
pub struct RemoveAllDiceButton;

/// Component for the status line text
#[derive(Component)]
pub struct StatusText;
