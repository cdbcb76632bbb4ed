//! Tap-to-place
//!
//! A tap is unprojected through the AR camera and hit-tested against the
//! planes detected so far. A hit spawns a die resting on the plane and rolls
//! it right away; a miss does nothing.

use bevy::asset::LoadState;
use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::roll::roll_die;
use crate::ar_dice::tracking::{ArSession, HitResult, HitTestType};
use crate::ar_dice::types::*;

/// Center of a die resting on the plane at `hit`: raised by its bounding radius
/// so the plane does not cut through it.
pub fn die_spawn_position(hit: Vec3, bounding_radius: f32) -> Vec3 {
    Vec3::new(hit.x, hit.y + bounding_radius, hit.z)
}

/// Whether the template can be instantiated right now.
pub fn die_template_ready(template: &DieTemplate, asset_server: &AssetServer) -> bool {
    match &template.visual {
        DieVisual::Procedural { .. } => true,
        DieVisual::Scene(handle) => {
            !matches!(asset_server.load_state(handle.id()), LoadState::Failed(_))
        }
    }
}

/// Spawn a die from the template at the given position.
pub fn spawn_die(commands: &mut Commands, template: &DieTemplate, position: Vec3) -> Entity {
    let transform = Transform::from_translation(position);
    match &template.visual {
        DieVisual::Procedural { mesh, material } => commands
            .spawn((
                Name::new("Die"),
                Die,
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                transform,
            ))
            .id(),
        DieVisual::Scene(scene) => commands
            .spawn((Name::new("Die"), Die, SceneRoot(scene.clone()), transform))
            .id(),
    }
}

/// Place, register, and roll a die on a hit-test result.
pub fn place_die_at_hit(
    commands: &mut Commands,
    registry: &mut DieRegistry,
    template: &DieTemplate,
    rng: &mut RollRng,
    roll_config: &RollConfig,
    hit: &HitResult,
) -> Entity {
    let position = die_spawn_position(hit.world_position(), template.bounding_radius);
    let die = spawn_die(commands, template, position);
    registry.register(die);
    roll_die(commands, die, rng, roll_config);
    die
}

/// Hit-test a camera ray against detected plane extents and place a die on
/// the nearest hit.
pub fn place_die_from_ray(
    commands: &mut Commands,
    session: &ArSession,
    registry: &mut DieRegistry,
    template: &DieTemplate,
    rng: &mut RollRng,
    roll_config: &RollConfig,
    ray: Ray3d,
) -> Option<Entity> {
    let hits = session.hit_test(ray, HitTestType::ExistingPlaneUsingExtent);
    let hit = hits.first()?;
    Some(place_die_at_hit(
        commands,
        registry,
        template,
        rng,
        roll_config,
        hit,
    ))
}

/// First new touch this frame, or a fresh left click.
fn tap_position(
    touches: &Touches,
    mouse: &ButtonInput<MouseButton>,
    window: &Window,
) -> Option<Vec2> {
    if let Some(touch) = touches.iter_just_pressed().next() {
        return Some(touch.position());
    }
    if mouse.just_pressed(MouseButton::Left) {
        return window.cursor_position();
    }
    None
}

/// System turning taps on the camera view into placement requests.
pub fn detect_taps(
    touches: Res<Touches>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    interactions: Query<&Interaction>,
    mut requests: MessageWriter<PlacementRequest>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(screen_point) = tap_position(&touches, &mouse, window) else {
        return;
    };

    // Taps on the control buttons are not placements.
    if interactions
        .iter()
        .any(|interaction| *interaction != Interaction::None)
    {
        return;
    }

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, screen_point) else {
        return;
    };
    requests.write(PlacementRequest { ray });
}

/// System placing a die for each tap ray, once a plane has been shown.
///
/// Requests made before then are dropped rather than replayed later.
#[allow(clippy::too_many_arguments)]
pub fn place_requested_dice(
    mut commands: Commands,
    mut requests: MessageReader<PlacementRequest>,
    state: Res<State<InteractionState>>,
    session: Res<ArSession>,
    mut registry: ResMut<DieRegistry>,
    template: Option<Res<DieTemplate>>,
    asset_server: Res<AssetServer>,
    mut rng: ResMut<RollRng>,
    roll_config: Res<RollConfig>,
) {
    if *state.get() != InteractionState::PlanesVisible {
        requests.clear();
        return;
    }

    for request in requests.read() {
        let Some(template) = template.as_deref() else {
            warn!("No die template loaded; skipping placement");
            continue;
        };
        if !die_template_ready(template, &asset_server) {
            warn!("Die asset failed to load; skipping placement");
            continue;
        }

        if let Some(die) = place_die_from_ray(
            &mut commands,
            &session,
            &mut registry,
            template,
            &mut rng,
            &roll_config,
            request.ray,
        ) {
            debug!("Placed die {die:?} ({} total)", registry.len());
        }
    }
}
