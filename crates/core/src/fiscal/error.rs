//! Fiscal year error types.

use chrono::NaiveDate;
use finoffice_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Fiscal year errors.
#[derive(Debug, Error)]
pub enum FiscalError {
    /// Fiscal year not found.
    #[error("Fiscal year not found: {0}")]
    NotFound(Uuid),

    /// Name already used by another fiscal year.
    #[error("Fiscal year name already exists: {0}")]
    DuplicateName(String),

    /// End date is not after the start date.
    #[error("Fiscal year must end after it starts ({start} .. {end})")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Fiscal year is inactive.
    #[error("Fiscal year is inactive: {0}")]
    Inactive(Uuid),

    /// Another request made a different year current at the same time.
    #[error("Fiscal year {0} could not be made current: another year was switched concurrently")]
    CurrentConflict(Uuid),

    /// Missing or malformed field.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl From<FiscalError> for AppError {
    fn from(err: FiscalError) -> Self {
        let message = err.to_string();
        match err {
            FiscalError::NotFound(_) => Self::NotFound(message),
            FiscalError::DuplicateName(_) | FiscalError::CurrentConflict(_) => {
                Self::Conflict(message)
            }
            FiscalError::InvalidDateRange { .. } | FiscalError::Validation(_) => {
                Self::Validation(message)
            }
            FiscalError::Inactive(_) => Self::InvalidReference(message),
            FiscalError::Database(_) => Self::Database(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concurrent_switch_is_conflict() {
        let err: AppError = FiscalError::CurrentConflict(Uuid::new_v4()).into();
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "CONFLICT");
    }
}
