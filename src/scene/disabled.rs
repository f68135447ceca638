use bevy_ecs::prelude::*;

/// Marks a scene object as inactive.
///
/// Pooled instances carry this marker while they sit in their pool and
/// lose it when they are spawned again. Game systems are expected to
/// filter with `Without<Disabled>`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Disabled;

/// Returns `true` if `entity` exists and is not [`Disabled`].
pub fn is_active(world: &World, entity: Entity) -> bool {
    world.entities().contains(entity) && world.get::<Disabled>(entity).is_none()
}

/// Marks `entity` inactive. Does nothing for despawned entities.
pub fn deactivate(world: &mut World, entity: Entity) {
    if world.entities().contains(entity) {
        world.entity_mut(entity).insert(Disabled);
    }
}

/// Marks `entity` active. Does nothing for despawned entities.
pub fn activate(world: &mut World, entity: Entity) {
    if world.entities().contains(entity) {
        world.entity_mut(entity).remove::<Disabled>();
    }
}
