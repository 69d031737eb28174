//! Catalog error types.

use finoffice_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Object code and level errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Object code not found.
    #[error("Object code not found: {0}")]
    ObjectCodeNotFound(Uuid),

    /// Level not found.
    #[error("Object code level not found: {0}")]
    LevelNotFound(Uuid),

    /// Code already in use.
    #[error("Code already exists: {0}")]
    DuplicateCode(String),

    /// Referenced level missing or inactive.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Level still has active dependents.
    #[error("Level is still in use: {active_children} active child level(s), {active_codes} active object code(s)")]
    LevelInUse {
        /// Active child levels.
        active_children: u64,
        /// Active object codes assigned to the level.
        active_codes: u64,
    },

    /// Missing or malformed field.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::ObjectCodeNotFound(_) | CatalogError::LevelNotFound(_) => {
                Self::NotFound(message)
            }
            CatalogError::DuplicateCode(_) | CatalogError::LevelInUse { .. } => {
                Self::Conflict(message)
            }
            CatalogError::InvalidReference(_) => Self::InvalidReference(message),
            CatalogError::Validation(_) => Self::Validation(message),
            CatalogError::Database(_) => Self::Database(message),
        }
    }
}
