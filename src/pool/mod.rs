//! Instance pooling
//!
//! Handles the reuse of scene entities that are expensive to create:
//! - [`Pool`] owns the instances built from one template
//! - [`Pooled`] tracks an instance's pool and first activation
//! - [`PoolRegistry`] lets an instance find its pool again by [`PoolId`]

mod config;
mod error;
mod instances;
mod pooled;
mod registry;
mod traits;

pub use config::*;
pub use error::*;
pub use instances::*;
pub use pooled::{disable, init_parent_pool, respawn_at, PoolId, Pooled};
pub use registry::*;
pub use traits::*;
