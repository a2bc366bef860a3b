use crate::types::EntityId;
use thiserror::Error;

/// Every failure an operation can surface to the caller.
/// All variants are recoverable: a failed operation returns the error
/// and leaves the aggregate exactly as it was.
#[derive(Error, Debug)]
pub enum CaseError {
    #[error("{0}")]
    Validation(String),

    #[error("rarity '{0}' not found")]
    RarityNotFound(EntityId),

    #[error("item '{0}' not found")]
    ItemNotFound(EntityId),

    #[error("cannot delete rarity '{0}' while items still reference it")]
    RarityInUse(EntityId),

    #[error("rarity '{0}' does not exist")]
    UnknownRarity(EntityId),

    #[error("not enough of item '{0}' in inventory")]
    InsufficientQuantity(EntityId),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CaseResult<T> = Result<T, CaseError>;
