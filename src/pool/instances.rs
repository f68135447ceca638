//! The typed instance pool.

use std::collections::{HashSet, VecDeque};

use bevy_ecs::prelude::*;
use glam::{Quat, Vec3};

use super::pooled::{activate_instance, Pooled};
use super::{ObjectPool, PoolConfig, PoolError, PoolId, PoolResult, Reusable};
use crate::scene::{self, Disabled, Transform};

/// Recycles entities built from a template `T` plus an extra bundle `B`.
///
/// Every instance is spawned with a clone of `T` and of `B`. `B` carries the
/// rest of the prefab, e.g. a scaled [`Transform`] or sibling components. It
/// must not contain `T`, [`Pooled`] or [`Disabled`]. Instances whose bundle
/// has no `Transform` get a default one.
///
/// Instances sit in a FIFO queue while available and in a set while spawned.
/// An instance is always in exactly one of the two. Entities are created on
/// demand when the queue runs dry, so the pool has no upper bound.
///
/// The pool owns its instances: call [`teardown`](Self::teardown) to despawn
/// them before dropping it.
pub struct Pool<T: Reusable, B: Bundle + Clone = ()> {
    id: PoolId,
    config: PoolConfig,
    template: T,
    extras: B,
    available: VecDeque<Entity>,
    /// Mirror of `available` for O(1) membership checks.
    parked: HashSet<Entity>,
    in_use: HashSet<Entity>,
    started: bool,
}

impl<T: Reusable> Pool<T> {
    /// Creates an empty pool of bare `T` instances. No entity is spawned
    /// before [`start`](Self::start).
    pub fn new(template: T, config: PoolConfig) -> Self {
        Self::with_extras(template, (), config)
    }

    /// Creates the pool and immediately fills it with `config.initial_size`
    /// instances.
    pub fn start_new(world: &mut World, template: T, config: PoolConfig) -> Self {
        let mut pool = Self::new(template, config);
        pool.start(world);
        pool
    }
}

impl<T: Reusable, B: Bundle + Clone> Pool<T, B> {
    /// Creates an empty pool whose instances also get a clone of `extras`.
    pub fn with_extras(template: T, extras: B, config: PoolConfig) -> Self {
        Self {
            id: PoolId::allocate(),
            config,
            template,
            extras,
            available: VecDeque::new(),
            parked: HashSet::new(),
            in_use: HashSet::new(),
            started: false,
        }
    }

    /// Spawns the initial instances. They start inactive.
    pub fn start(&mut self, world: &mut World) {
        if self.started {
            log::warn!("{} was started twice, ignoring", self.label());
            return;
        }
        self.started = true;

        for _ in 0..self.config.initial_size {
            let entity = self.instantiate(world);
            self.park(entity);
        }

        log::info!(
            "{} started with {} instances",
            self.label(),
            self.available.len()
        );
    }

    /// The id stored in the [`Pooled`] component of every instance.
    pub fn id(&self) -> PoolId {
        self.id
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// The value every instance's `T` is cloned from.
    pub fn template(&self) -> &T {
        &self.template
    }

    /// The bundle cloned next to the template on every new instance.
    pub fn extras(&self) -> &B {
        &self.extras
    }

    /// Number of instances waiting to be spawned.
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    /// Number of instances currently spawned.
    pub fn in_use_count(&self) -> usize {
        self.in_use.len()
    }

    /// Whether `entity` is currently spawned from this pool.
    pub fn is_in_use(&self, entity: Entity) -> bool {
        self.in_use.contains(&entity)
    }

    /// Whether `entity` is waiting in this pool.
    pub fn is_available(&self, entity: Entity) -> bool {
        self.parked.contains(&entity)
    }

    /// Get or create an instance, then activate it at the given placement.
    pub fn spawn(&mut self, world: &mut World, position: Vec3, rotation: Quat) -> Entity {
        let entity = match self.take_available(world) {
            Some(entity) => entity,
            None => self.instantiate(world),
        };

        self.in_use.insert(entity);
        activate_instance::<T>(world, entity, position, rotation);

        log::trace!("{} spawned {entity}", self.label());
        entity
    }

    /// Put `entity` back into the pool.
    ///
    /// The entity is not deactivated here. [`recycle`](Self::recycle) and
    /// [`pool::disable`](super::disable) call this and deactivate the entity
    /// once it succeeds.
    ///
    /// An entity despawned while spawned is forgotten by the pool and
    /// reported as [`PoolError::InvalidArgument`].
    pub fn disable(&mut self, world: &World, entity: Entity) -> PoolResult<()> {
        if !world.entities().contains(entity) {
            if self.in_use.remove(&entity) {
                log::warn!(
                    "{} forgot {entity}: it was despawned while in use",
                    self.label()
                );
            }
            return Err(PoolError::missing_entity(entity));
        }

        if world.get::<T>(entity).is_none() {
            return Err(PoolError::TypeMismatch {
                pool: self.label(),
                expected: std::any::type_name::<T>(),
                entity,
            });
        }

        if !self.in_use.remove(&entity) {
            if self.parked.contains(&entity) {
                return Err(PoolError::AlreadyReleased {
                    pool: self.label(),
                    entity,
                });
            }
            return Err(PoolError::NotFound {
                pool: self.label(),
                entity,
            });
        }

        self.park(entity);
        log::trace!("{} took back {entity}", self.label());
        Ok(())
    }

    /// Put `entity` back into the pool and deactivate it.
    ///
    /// This is the handle-side disable for pools that are not in the
    /// [`PoolRegistry`](super::PoolRegistry). On error the entity is left
    /// untouched.
    pub fn recycle(&mut self, world: &mut World, entity: Entity) -> PoolResult<()> {
        self.disable(world, entity)?;
        scene::deactivate(world, entity);
        Ok(())
    }

    /// Despawns every instance, spawned or not.
    ///
    /// Instances that were despawned by someone else are skipped.
    pub fn teardown(&mut self, world: &mut World) {
        let mut despawned = 0;
        for entity in self.available.drain(..).chain(self.in_use.drain()) {
            if world.entities().contains(entity) && world.despawn(entity) {
                despawned += 1;
            }
        }
        self.parked.clear();

        log::debug!("{} torn down, {despawned} instances despawned", self.label());
    }

    fn label(&self) -> String {
        format!("{} ({})", self.config.name, self.id)
    }

    fn instantiate(&self, world: &mut World) -> Entity {
        let mut instance =
            world.spawn((self.template.clone(), Pooled::owned_by(self.id), Disabled));
        instance.insert(self.extras.clone());
        if !instance.contains::<Transform>() {
            instance.insert(Transform::default());
        }
        let entity = instance.id();
        log::debug!("{} created {entity}", self.label());
        entity
    }

    fn park(&mut self, entity: Entity) {
        self.parked.insert(entity);
        self.available.push_back(entity);
    }

    /// Pops the oldest available instance, dropping any that were despawned
    /// or stripped of `T` while parked.
    fn take_available(&mut self, world: &World) -> Option<Entity> {
        while let Some(entity) = self.available.pop_front() {
            self.parked.remove(&entity);
            if world.entities().contains(entity) && world.get::<T>(entity).is_some() {
                return Some(entity);
            }
            log::warn!(
                "{} dropped {entity}: it was despawned or lost its {} while parked",
                self.label(),
                std::any::type_name::<T>()
            );
        }
        None
    }
}

impl<T: Reusable, B: Bundle + Clone> ObjectPool for Pool<T, B> {
    fn id(&self) -> PoolId {
        self.id
    }

    fn name(&self) -> &str {
        &self.config.name
    }

    fn spawn(&mut self, world: &mut World, position: Vec3, rotation: Quat) -> Entity {
        Pool::spawn(self, world, position, rotation)
    }

    fn disable(&mut self, world: &mut World, entity: Entity) -> PoolResult<()> {
        Pool::disable(self, world, entity)
    }

    fn teardown(&mut self, world: &mut World) {
        Pool::teardown(self, world)
    }

    fn available_count(&self) -> usize {
        self.available.len()
    }

    fn in_use_count(&self) -> usize {
        self.in_use.len()
    }
}

impl<T: Reusable, B: Bundle + Clone> Drop for Pool<T, B> {
    fn drop(&mut self) {
        let live = self.available.len() + self.in_use.len();
        if live > 0 {
            log::warn!(
                "{} dropped while holding {live} instances; call teardown() first",
                self.label()
            );
        }
    }
}
