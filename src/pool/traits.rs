//! Pool abstraction traits
//!
//! [`Reusable`] is implemented by every concrete pooled type, [`ObjectPool`]
//! by every pool. The registry only ever sees pools through `ObjectPool`.

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};

use super::{PoolId, PoolResult};

/// A component type whose entities can be recycled by a [`Pool`](super::Pool).
///
/// The pool clones its template value for every new instance. The hooks
/// run on the instance's own component, after the pool has placed it.
///
/// An instance can hand itself back with [`pool::disable`](super::disable),
/// which finds the pool through the [`PoolRegistry`](super::PoolRegistry)
/// resource. Instances of a pool kept outside the registry must be returned
/// with [`Pool::recycle`](super::Pool::recycle) instead.
pub trait Reusable: Component + Clone {
    /// Runs once, the first time the instance is spawned, before
    /// [`on_respawn`](Self::on_respawn).
    fn first_start(&mut self);

    /// Runs on every spawn, including the first one.
    ///
    /// The entity already has its new placement and is active. Whatever
    /// state the previous use left behind must be reset here.
    fn on_respawn(&mut self);

    /// Runs right after [`on_respawn`](Self::on_respawn) with access to the
    /// whole entity, for resetting sibling components.
    fn on_respawn_entity(_entity: &mut EntityWorldMut) {}
}

/// Type-erased pool surface.
pub trait ObjectPool: Send + Sync {
    /// The id stored in the [`Pooled`](super::Pooled) component of every instance.
    fn id(&self) -> PoolId;

    /// Label used in log lines and error messages.
    fn name(&self) -> &str;

    /// Get or create an instance and activate it at the given placement.
    fn spawn(&mut self, world: &mut World, position: Vec3, rotation: Quat) -> Entity;

    /// Put `entity` back into the pool.
    ///
    /// This does not deactivate the entity; prefer
    /// [`pool::disable`](super::disable) which does both.
    fn disable(&mut self, world: &mut World, entity: Entity) -> PoolResult<()>;

    /// Despawn every instance this pool ever created.
    fn teardown(&mut self, world: &mut World);

    /// Number of instances waiting to be spawned.
    fn available_count(&self) -> usize;

    /// Number of instances currently spawned.
    fn in_use_count(&self) -> usize;
}
