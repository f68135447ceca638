//! Per-instance pool state and the handle operations built on it.
//!
//! A pooled instance is a plain [`Entity`] carrying a [`Pooled`] component
//! next to its [`Reusable`] component. The component links the entity to
//! its pool by [`PoolId`] only; the pool owns the entity's lifetime, and the
//! link is resolved through the [`PoolRegistry`] resource when the entity
//! asks to be returned.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};

use super::{PoolError, PoolRegistry, PoolResult, Reusable};
use crate::scene::{self, Transform};

/// Process-unique identifier of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolId(u64);

impl PoolId {
    /// Allocates a fresh id. Ids are never reused.
    pub fn allocate() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pool#{}", self.0)
    }
}

/// Pool membership of an entity.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pooled {
    parent: Option<PoolId>,
    started: bool,
}

impl Pooled {
    /// An instance that belongs to no pool yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn owned_by(pool: PoolId) -> Self {
        Self {
            parent: Some(pool),
            started: false,
        }
    }

    /// The pool this instance belongs to, if it was registered.
    pub fn parent_pool(&self) -> Option<PoolId> {
        self.parent
    }

    /// Whether the instance went through its first activation.
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Links the instance to `pool`. The link can only be set once.
    pub fn set_parent_pool(&mut self, entity: Entity, pool: PoolId) -> PoolResult<()> {
        if let Some(current) = self.parent {
            return Err(PoolError::AlreadyRegistered {
                entity,
                pool: current,
            });
        }
        self.parent = Some(pool);
        Ok(())
    }

    /// Flags the first activation. Returns `true` only the first time.
    pub(crate) fn mark_started(&mut self) -> bool {
        !std::mem::replace(&mut self.started, true)
    }
}

/// Sets the pool `entity` belongs to and deactivates it.
///
/// A [`Pooled`] component is added if the entity has none.
pub fn init_parent_pool(world: &mut World, entity: Entity, pool: PoolId) -> PoolResult<()> {
    if !world.entities().contains(entity) {
        return Err(PoolError::missing_entity(entity));
    }

    let mut pooled = world.get::<Pooled>(entity).copied().unwrap_or_default();
    pooled.set_parent_pool(entity, pool)?;
    world.entity_mut(entity).insert((pooled, scene::Disabled));
    Ok(())
}

/// Reactivates `entity` at the given placement.
///
/// [`Reusable::first_start`] runs on the very first call for the entity,
/// then [`Reusable::on_respawn`] runs on every call.
pub fn respawn_at<T: Reusable>(
    world: &mut World,
    entity: Entity,
    position: Vec3,
    rotation: Quat,
) -> PoolResult<()> {
    if !world.entities().contains(entity) {
        return Err(PoolError::missing_entity(entity));
    }
    if world.get::<T>(entity).is_none() {
        let pool = world
            .get::<Pooled>(entity)
            .and_then(Pooled::parent_pool)
            .map_or_else(|| "an unpooled respawn".to_string(), |id| id.to_string());
        return Err(PoolError::TypeMismatch {
            pool,
            expected: std::any::type_name::<T>(),
            entity,
        });
    }

    activate_instance::<T>(world, entity, position, rotation);
    Ok(())
}

/// Hands `entity` back to its pool and deactivates it.
///
/// The pool is looked up in the [`PoolRegistry`] resource, so this only
/// works for registered pools; use [`Pool::recycle`](super::Pool::recycle)
/// for a pool held directly. An entity that was never registered with a pool
/// is a caller error. On any error the entity is left untouched.
pub fn disable(world: &mut World, entity: Entity) -> PoolResult<()> {
    if !world.entities().contains(entity) {
        return Err(PoolError::missing_entity(entity));
    }
    let Some(pooled) = world.get::<Pooled>(entity) else {
        return Err(PoolError::InvalidArgument(format!(
            "{entity} is not a pooled instance"
        )));
    };
    let Some(pool_id) = pooled.parent_pool() else {
        return Err(PoolError::InvalidArgument(format!(
            "{entity} has no parent pool, register it before disabling it"
        )));
    };

    let registered = world
        .get_resource::<PoolRegistry>()
        .is_some_and(|registry| registry.contains(pool_id));
    if !registered {
        return Err(PoolError::PoolMissing(pool_id));
    }

    world.resource_scope(|world, mut registry: Mut<PoolRegistry>| {
        let pool = registry
            .pool_mut(pool_id)
            .ok_or(PoolError::PoolMissing(pool_id))?;
        pool.disable(world, entity)?;
        scene::deactivate(world, entity);
        Ok(())
    })
}

/// Activation without argument checks. Callers guarantee `entity` is alive
/// and carries `T`.
pub(crate) fn activate_instance<T: Reusable>(
    world: &mut World,
    entity: Entity,
    position: Vec3,
    rotation: Quat,
) {
    let mut pooled = world.get::<Pooled>(entity).copied().unwrap_or_default();
    let first_activation = pooled.mark_started();
    world.entity_mut(entity).insert(pooled);

    if first_activation {
        if let Some(mut instance) = world.get_mut::<T>(entity) {
            instance.first_start();
        }
    }

    let transform = match world.get::<Transform>(entity) {
        Some(current) => {
            let mut placed = *current;
            placed.place(position, rotation);
            placed
        }
        None => Transform::from_position_rotation(position, rotation),
    };
    world.entity_mut(entity).insert(transform);

    scene::activate(world, entity);

    if let Some(mut instance) = world.get_mut::<T>(entity) {
        instance.on_respawn();
    }
    T::on_respawn_entity(&mut world.entity_mut(entity));
}
