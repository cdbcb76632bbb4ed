//! Plane visualization
//!
//! Each plane anchor the tracker reports gets a scene node at the anchor's
//! pose, with a grid-textured surface as its child.

use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::ar_dice::tracking::{Anchor, AnchorEvent, PlaneGeometry};
use crate::ar_dice::types::*;

/// Size and local placement of a plane surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneVisual {
    /// Rectangle width and height before it is laid flat.
    pub size: Vec2,
    pub transform: Transform,
}

/// Lay a vertical rectangle flat over the detected extent.
///
/// Rectangles are built facing +Z; a -90 degree turn about X puts their face
/// in the anchor's horizontal plane with the height running along local Z.
pub fn plane_visual(geometry: &PlaneGeometry) -> PlaneVisual {
    PlaneVisual {
        size: geometry.extent,
        transform: Transform::from_xyz(geometry.center.x, 0.0, geometry.center.y)
            .with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
    }
}

/// Spawn the anchor node and its grid surface. Returns `None` for anchors
/// that are not planes.
pub fn spawn_plane_anchor(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    grid_material: &PlaneGridMaterial,
    anchor: &Anchor,
) -> Option<Entity> {
    let geometry = anchor.plane()?;
    let visual = plane_visual(geometry);

    let node = commands
        .spawn((
            Name::new(format!("Plane anchor {}", anchor.id.0)),
            AnchorNode { id: anchor.id },
            anchor.transform,
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new("Plane surface"),
                PlaneSurface { size: visual.size },
                Mesh3d(meshes.add(Rectangle::new(visual.size.x, visual.size.y))),
                MeshMaterial3d(grid_material.0.clone()),
                visual.transform,
            ));
        })
        .id();

    Some(node)
}

/// System reacting to anchor lifecycle messages.
pub fn handle_anchor_events(
    mut commands: Commands,
    mut events: MessageReader<AnchorEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    grid_material: Res<PlaneGridMaterial>,
    anchor_nodes: Query<(Entity, &AnchorNode)>,
    state: Res<State<InteractionState>>,
    mut next_state: ResMut<NextState<InteractionState>>,
) {
    for event in events.read() {
        match event {
            AnchorEvent::Added(anchor) => {
                if spawn_plane_anchor(&mut commands, &mut meshes, &grid_material, anchor).is_none()
                {
                    debug!("Ignoring non-plane anchor {}", anchor.id.0);
                    continue;
                }
                info!("Plane detected (anchor {})", anchor.id.0);

                if *state.get() == InteractionState::Idle {
                    next_state.set(InteractionState::PlanesVisible);
                }
            }
            AnchorEvent::Updated(anchor) => {
                debug!("Plane anchor {} updated; keeping its first extent", anchor.id.0);
            }
            AnchorEvent::Removed(id) => {
                for (entity, node) in anchor_nodes.iter() {
                    if node.id == *id {
                        commands.entity(entity).try_despawn();
                        info!("Plane anchor {} removed", id.0);
                    }
                }
            }
        }
    }
}
