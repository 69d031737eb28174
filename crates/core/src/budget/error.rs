//! Budget error types.

use finoffice_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// Budget entry not found.
    #[error("Budget entry not found: {0}")]
    NotFound(Uuid),

    /// An entry already exists for this object code and fiscal year.
    #[error("Budget entry already exists for object code {object_code_id} in fiscal year {fiscal_year_id}")]
    DuplicateEntry {
        /// Object code ID.
        object_code_id: Uuid,
        /// Fiscal year ID.
        fiscal_year_id: Uuid,
    },

    /// Category tag is not one of AAA, DEV, PLA, UHI.
    #[error("Invalid category '{0}', expected one of AAA, DEV, PLA, UHI")]
    InvalidCategory(String),

    /// Object code or fiscal year missing or inactive.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Missing or malformed field.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entry was changed by someone else since it was read.
    #[error("Budget entry {0} was modified concurrently")]
    VersionConflict(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        let message = err.to_string();
        match err {
            BudgetError::NotFound(_) => Self::NotFound(message),
            BudgetError::DuplicateEntry { .. } | BudgetError::VersionConflict(_) => {
                Self::Conflict(message)
            }
            BudgetError::InvalidCategory(_) => Self::InvalidCategory(message),
            BudgetError::InvalidReference(_) => Self::InvalidReference(message),
            BudgetError::Validation(_) => Self::Validation(message),
            BudgetError::Database(_) => Self::Database(message),
        }
    }
}
