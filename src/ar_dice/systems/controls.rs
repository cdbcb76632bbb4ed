//! Button, keyboard, and shake controls
//!
//! All controls funnel into [`DiceAction`] messages so rolling and clearing
//! behave the same whichever way they are triggered.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy_material_ui::prelude::ButtonClickEvent;

use crate::ar_dice::types::*;

/// Detects a shake from horizontal pointer motion.
///
/// A shake is a run of fast left/right direction reversals. Reversals older
/// than the configured window are dropped.
#[derive(Resource, Debug, Default)]
pub struct ShakeDetector {
    last_direction: Option<f32>,
    reversals: Vec<f32>,
    clock: f32,
}

impl ShakeDetector {
    /// Feed one frame of horizontal motion. Returns `true` when a shake completes.
    pub fn observe(&mut self, config: &ShakeConfig, delta_x: f32, dt: f32) -> bool {
        self.clock += dt;
        let window_start = self.clock - config.window_secs;
        self.reversals.retain(|t| *t >= window_start);

        if dt <= 0.0 || (delta_x / dt).abs() < config.min_speed {
            return false;
        }

        let direction = delta_x.signum();
        if let Some(last) = self.last_direction {
            if last != direction {
                self.reversals.push(self.clock);
            }
        }
        self.last_direction = Some(direction);

        if self.reversals.len() as u32 >= config.reversals {
            self.reset();
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.last_direction = None;
        self.reversals.clear();
    }
}

/// System mapping the on-screen buttons to dice actions.
pub fn handle_control_clicks(
    mut click_events: MessageReader<ButtonClickEvent>,
    roll_buttons: Query<(), With<RollAgainButton>>,
    remove_buttons: Query<(), With<RemoveAllDiceButton>>,
    mut actions: MessageWriter<DiceAction>,
) {
    for event in click_events.read() {
        if roll_buttons.get(event.entity).is_ok() {
            actions.write(DiceAction::RollAll);
        } else if remove_buttons.get(event.entity).is_ok() {
            actions.write(DiceAction::RemoveAll);
        }
    }
}

/// Space rolls again; Delete or Backspace removes every die.
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut actions: MessageWriter<DiceAction>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        actions.write(DiceAction::RollAll);
    }
    if keyboard.any_just_pressed([KeyCode::Delete, KeyCode::Backspace]) {
        actions.write(DiceAction::RemoveAll);
    }
}

/// Shaking the pointer rolls again, standing in for a device shake.
pub fn detect_shake_gesture(
    time: Res<Time>,
    motion: Res<AccumulatedMouseMotion>,
    config: Res<ShakeConfig>,
    mut detector: ResMut<ShakeDetector>,
    mut actions: MessageWriter<DiceAction>,
) {
    if detector.observe(&config, motion.delta.x, time.delta_secs()) {
        info!("Shake detected");
        actions.write(DiceAction::RollAll);
    }
}

/// Keep the status line in step with detection and placement.
pub fn update_status_text(
    state: Res<State<InteractionState>>,
    registry: Res<DieRegistry>,
    mut text_query: Query<&mut Text, With<StatusText>>,
) {
    if !state.is_changed() && !registry.is_changed() {
        return;
    }

    let status = match state.get() {
        InteractionState::Idle => "Looking for a flat surface...".to_string(),
        InteractionState::PlanesVisible if registry.is_empty() => {
            "Tap a grid to place a die".to_string()
        }
        InteractionState::PlanesVisible => format!(
            "{} {} on the table - shake or press Roll Again",
            registry.len(),
            if registry.len() == 1 { "die" } else { "dice" }
        ),
    };

    for mut text in text_query.iter_mut() {
        text.0 = status.clone();
    }
}
