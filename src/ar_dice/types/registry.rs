//! Registry of placed dice
//!
//! Keeps the dice the user placed, in placement order, so "roll again" and
//! "remove all dice" can act on all of them. Every tracked entity is also in
//! the world; despawning goes through [`DieRegistry::clear`] or is mirrored
//! by [`DieRegistry::forget`].

use bevy::prelude::*;

#[derive(Resource, Default, Debug)]
pub struct DieRegistry {
    dice: Vec<Entity>,
}

impl DieRegistry {
    pub fn register(&mut self, die: Entity) {
        if !self.dice.contains(&die) {
            self.dice.push(die);
        }
    }

    /// Stop tracking a die that left the world some other way.
    pub fn forget(&mut self, die: Entity) -> bool {
        let before = self.dice.len();
        self.dice.retain(|tracked| *tracked != die);
        self.dice.len() != before
    }

    /// Despawn every tracked die and empty the registry.
    ///
    /// The registry ends up empty even when an entity was already gone.
    pub fn clear(&mut self, commands: &mut Commands) -> usize {
        let count = self.dice.len();
        for die in self.dice.drain(..) {
            if let Ok(mut entity) = commands.get_entity(die) {
                entity.try_despawn();
            }
        }
        count
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.dice.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_keeps_insertion_order() {
        let mut world = World::new();
        let ids: Vec<Entity> = (0..3).map(|_| world.spawn_empty().id()).collect();

        let mut registry = DieRegistry::default();
        for id in ids.iter().rev() {
            registry.register(*id);
        }
        registry.register(ids[1]);

        let tracked: Vec<Entity> = registry.iter().collect();
        assert_eq!(tracked, vec![ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn test_forget() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();

        let mut registry = DieRegistry::default();
        registry.register(a);
        registry.register(b);

        assert!(registry.forget(a));
        assert!(!registry.forget(a));
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn test_default_is_empty() {
        let registry = DieRegistry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }
}
