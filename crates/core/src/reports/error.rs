//! Report error types.

use finoffice_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Fiscal year not found.
    #[error("Fiscal year not found: {0}")]
    FiscalYearNotFound(Uuid),

    /// No fiscal year given and none is current.
    #[error("No current fiscal year is set")]
    NoCurrentFiscalYear,

    /// Output could not be written.
    #[error("Failed to render report: {0}")]
    Render(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        let message = err.to_string();
        match err {
            ReportError::FiscalYearNotFound(_) | ReportError::NoCurrentFiscalYear => {
                Self::NotFound(message)
            }
            ReportError::Render(_) => Self::Internal(message),
            ReportError::Database(_) => Self::Database(message),
        }
    }
}
