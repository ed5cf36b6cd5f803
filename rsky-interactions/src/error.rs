use std::time::Duration;
use thiserror::Error;

/// Failures of the storage engine. Any of these means the write was not
/// applied.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("Database pool setup error: {0}")]
    CreatePool(#[from] deadpool_postgres::CreatePoolError),

    #[error("Storage call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Storage error: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("Missing required fields: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl InteractionError {
    pub fn is_validation(&self) -> bool {
        matches!(self, InteractionError::Validation(_))
    }
}
