use bevy_ecs::entity::Entity;
use thiserror::Error;

use super::PoolId;

/// Pool error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{pool} handles {expected} objects, and cannot handle {entity}")]
    TypeMismatch {
        pool: String,
        expected: &'static str,
        entity: Entity,
    },
    #[error("Unknown instance {entity}: it was not registered in {pool} beforehand")]
    NotFound { pool: String, entity: Entity },
    #[error(
        "Instance {entity} is already disabled in {pool}. \
         Was it released twice during the same frame?"
    )]
    AlreadyReleased { pool: String, entity: Entity },
    #[error("{entity} already has a parent pool ({pool})")]
    AlreadyRegistered { entity: Entity, pool: PoolId },
    #[error("{0} does not exist or has been destroyed")]
    PoolMissing(PoolId),
}

impl PoolError {
    pub(crate) fn missing_entity(entity: Entity) -> Self {
        Self::InvalidArgument(format!("instance {entity} is null or has been despawned"))
    }
}

pub type PoolResult<T> = Result<T, PoolError>;
