//! Rolling and clearing dice

use bevy::prelude::*;

use super::animation::RotateBy;
use crate::ar_dice::types::*;

/// Spin one die by a freshly drawn roll.
pub fn roll_die(
    commands: &mut Commands,
    die: Entity,
    rng: &mut RollRng,
    config: &RollConfig,
) -> RollCommand {
    let roll = RollCommand::draw(&mut rng.0, config);
    if let Ok(mut entity) = commands.get_entity(die) {
        entity.try_insert(RotateBy::new(roll.angles(), roll.duration_secs));
    }
    roll
}

/// Roll every registered die, in placement order.
pub fn roll_all(
    commands: &mut Commands,
    registry: &DieRegistry,
    rng: &mut RollRng,
    config: &RollConfig,
) -> Vec<RollCommand> {
    registry
        .iter()
        .map(|die| roll_die(commands, die, rng, config))
        .collect()
}

/// System applying roll / remove requests from buttons, keys, and shakes.
pub fn handle_dice_actions(
    mut commands: Commands,
    mut actions: MessageReader<DiceAction>,
    mut registry: ResMut<DieRegistry>,
    mut rng: ResMut<RollRng>,
    config: Res<RollConfig>,
) {
    for action in actions.read() {
        match action {
            DiceAction::RollAll => {
                let rolled = roll_all(&mut commands, &registry, &mut rng, &config);
                if !rolled.is_empty() {
                    debug!("Rolled {} dice", rolled.len());
                }
            }
            DiceAction::RemoveAll => {
                let removed = registry.clear(&mut commands);
                if removed > 0 {
                    info!("Removed {removed} dice");
                }
            }
        }
    }
}

/// Keep the registry in step with dice despawned outside of `clear`.
pub fn forget_despawned_dice(
    mut removed: RemovedComponents<Die>,
    mut registry: ResMut<DieRegistry>,
) {
    for entity in removed.read() {
        registry.forget(entity);
    }
}
