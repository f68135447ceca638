//! RedLilium Pool - Reuse of expensive scene entities
//!
//! Instead of spawning and despawning short-lived objects (bullets, sparks,
//! enemies) every frame, a pool keeps them around inactive and hands them
//! out again.
//!
//! # Features
//! - Typed pools over any [`Reusable`](pool::Reusable) component
//! - FIFO reuse with on-demand growth
//! - One-time first start and per-reuse reset hooks
//! - Checked release: double release, foreign and mistyped instances are rejected
//! - Type-erased pools and a world resource registry for handle-driven release
//!
//! Pools operate on a Bevy ECS [`World`]; all operations are single-threaded
//! and take the world by `&mut`.

pub mod pool;
pub mod scene;

// Re-export Bevy ECS prelude for users
pub use bevy_ecs::prelude::*;
pub use glam::{Quat, Vec3};

pub use pool::{
    ObjectPool, Pool, PoolConfig, PoolError, PoolId, PoolRegistry, PoolResult, Pooled, Reusable,
};
pub use scene::{Disabled, Transform};
