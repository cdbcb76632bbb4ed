pub mod grid_texture;
pub mod meshes;
pub mod systems;
pub mod tracking;
pub mod types;

pub use grid_texture::*;
pub use meshes::*;
pub use systems::*;
pub use tracking::*;
pub use types::*;

use bevy::prelude::*;

/// Ordering of the dice systems within `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiceSystems {
    /// Taps, buttons, keys, and gestures turned into messages.
    Input,
    /// Rotate-by animations advance and finished ones are removed.
    Animate,
    /// Placement requests become dice.
    Place,
    /// Roll-all and remove-all requests are applied.
    Act,
}

/// Placement, rolling, and removal of dice, without any rendering or UI.
///
/// Finished animations are removed before new rolls are queued, so a roll
/// landing on the frame an earlier one ends is never dropped. Requires the
/// `ArSession` and `DieTemplate` resources and Bevy's states plugin.
#[derive(Default)]
pub struct DiceCorePlugin {
    pub roll: RollConfig,
    pub seed: Option<u64>,
}

impl Plugin for DiceCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<InteractionState>()
            .add_message::<DiceAction>()
            .add_message::<PlacementRequest>()
            .insert_resource(self.roll.clone())
            .insert_resource(RollRng::new(self.seed))
            .init_resource::<DieRegistry>()
            .configure_sets(
                Update,
                (
                    DiceSystems::Input,
                    DiceSystems::Animate,
                    DiceSystems::Place,
                    DiceSystems::Act,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    animate_rotate_by.in_set(DiceSystems::Animate),
                    place_requested_dice.in_set(DiceSystems::Place),
                    handle_dice_actions.in_set(DiceSystems::Act),
                ),
            )
            .add_systems(PostUpdate, forget_despawned_dice);
    }
}

/// Plane visualization, tap-to-place, and dice rolling.
///
/// Uses the [`ArSession`] already in the world when there is one; otherwise a
/// [`SimulatedTracking`] session is built from the settings.
pub struct ArDicePlugin {
    pub settings: AppSettings,
}

impl Plugin for ArDicePlugin {
    fn build(&self, app: &mut App) {
        let settings = &self.settings;

        if !app.world().contains_resource::<ArSession>() {
            app.insert_resource(ArSession::new(
                settings.session_config(),
                SimulatedTracking::new(settings.simulated_planes()),
            ));
        }

        app.add_plugins(DiceCorePlugin {
            roll: settings.roll.to_runtime(),
            seed: settings.roll.seed,
        })
        .add_message::<AnchorEvent>()
        .insert_resource(ActiveSettings(settings.clone()))
        .insert_resource(settings.shake.to_runtime())
        .init_resource::<ShakeDetector>()
        .add_systems(Startup, (setup, start_ar_session))
        .add_systems(
            Update,
            (
                sync_session_with_visibility,
                drive_tracking_session,
                handle_anchor_events,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                detect_taps,
                handle_control_clicks,
                handle_keyboard_shortcuts,
                detect_shake_gesture,
            )
                .in_set(DiceSystems::Input),
        )
        .add_systems(Update, (orbit_camera, update_status_text));

        if settings.show_feature_points {
            app.add_systems(Update, draw_feature_points);
        }
    }
}
