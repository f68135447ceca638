//! World-level lookup of pools by id.

use std::collections::HashMap;

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};

use super::{ObjectPool, PoolError, PoolId, PoolResult};

/// Resource mapping [`PoolId`]s to the pools they name.
///
/// Pooled entities only store the id of their pool, so returning an entity
/// with [`disable`](super::disable) requires its pool to be registered here.
#[derive(Resource, Default)]
pub struct PoolRegistry {
    pools: HashMap<PoolId, Box<dyn ObjectPool>>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `pool` and returns its id.
    ///
    /// Registering an id twice drops the previously registered pool.
    pub fn insert<P: ObjectPool + 'static>(&mut self, pool: P) -> PoolId {
        let id = pool.id();
        if self.pools.insert(id, Box::new(pool)).is_some() {
            log::warn!("{id} was registered twice, the previous pool was dropped");
        }
        id
    }

    /// The registered pool `id`, if any.
    pub fn pool(&self, id: PoolId) -> Option<&(dyn ObjectPool + 'static)> {
        self.pools.get(&id).map(|pool| &**pool)
    }

    /// Mutable access to the registered pool `id`, if any.
    pub fn pool_mut(&mut self, id: PoolId) -> Option<&mut (dyn ObjectPool + 'static)> {
        self.pools.get_mut(&id).map(|pool| &mut **pool)
    }

    /// Removes the pool without tearing it down.
    pub fn remove(&mut self, id: PoolId) -> Option<Box<dyn ObjectPool>> {
        self.pools.remove(&id)
    }

    /// Whether a pool is registered under `id`.
    pub fn contains(&self, id: PoolId) -> bool {
        self.pools.contains_key(&id)
    }

    /// Ids of all registered pools, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = PoolId> + '_ {
        self.pools.keys().copied()
    }

    /// Number of registered pools.
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Whether no pool is registered.
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

/// Spawns an instance from the registered pool `id`.
pub fn spawn_from(
    world: &mut World,
    id: PoolId,
    position: Vec3,
    rotation: Quat,
) -> PoolResult<Entity> {
    if !world.contains_resource::<PoolRegistry>() {
        return Err(PoolError::PoolMissing(id));
    }
    world.resource_scope(|world, mut registry: Mut<PoolRegistry>| {
        let pool = registry.pool_mut(id).ok_or(PoolError::PoolMissing(id))?;
        Ok(pool.spawn(world, position, rotation))
    })
}

/// Unregisters the pool `id` and despawns all of its instances.
pub fn destroy_pool(world: &mut World, id: PoolId) -> PoolResult<()> {
    let mut pool = world
        .get_resource_mut::<PoolRegistry>()
        .and_then(|mut registry| registry.remove(id))
        .ok_or(PoolError::PoolMissing(id))?;
    pool.teardown(world);
    Ok(())
}

/// Unregisters and tears down every pool. Returns how many were destroyed.
pub fn destroy_all_pools(world: &mut World) -> usize {
    let Some(mut registry) = world.get_resource_mut::<PoolRegistry>() else {
        return 0;
    };
    let pools: Vec<Box<dyn ObjectPool>> = registry.pools.drain().map(|(_, pool)| pool).collect();

    let count = pools.len();
    for mut pool in pools {
        pool.teardown(world);
    }
    count
}
