//! Plane anchor components
//!
//! A detected plane is represented by an anchor entity carrying the anchor's
//! world pose, with the grid-textured surface spawned as its child.

use bevy::prelude::*;

use crate::ar_dice::tracking::AnchorId;

/// Scene node that follows a tracked anchor.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorNode {
    pub id: AnchorId,
}

/// Flat grid surface drawn for a detected plane.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PlaneSurface {
    /// Width along anchor-local X, depth along anchor-local Z.
    pub size: Vec2,
}

/// Shared grid material used for every plane surface.
#[derive(Resource, Clone, Debug)]
pub struct PlaneGridMaterial(pub Handle<StandardMaterial>);
