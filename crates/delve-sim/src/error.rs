use crate::entity::EntityId;
use delve_core::error::ConfigError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("entity {0} already exists")]
    DuplicateEntity(EntityId),

    #[error("invalid simulation config: {0}")]
    Config(#[from] ConfigError),
}
