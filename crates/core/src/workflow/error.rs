//! Workflow error types for bill, schedule and cheque sign-off.

use finoffice_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A stage was acted on before the stage in front of it.
    #[error("Stage {got} cannot act yet, waiting for {expected}")]
    OutOfOrder {
        /// The stage that must act next.
        expected: String,
        /// The stage that tried to act.
        got: String,
    },

    /// The stage has already approved.
    #[error("Stage {0} has already approved")]
    AlreadyApproved(String),

    /// The chain was closed by a disallowance or is fully approved.
    #[error("Approval chain is closed")]
    Closed,

    /// Disallowing requires remarks.
    #[error("A disallowance reason is required")]
    DisallowanceReasonRequired,

    /// The bill is still a draft.
    #[error("Bill has not been submitted")]
    NotSubmitted,

    /// The bill was already submitted.
    #[error("Bill has already been submitted")]
    AlreadySubmitted,

    /// Only drafts can be changed.
    #[error("Bill is no longer a draft and cannot be modified")]
    NotEditable,

    /// Cheque needs every stage approved before forwarding.
    #[error("Cheque is not fully approved")]
    NotFullyApproved,

    /// Cheque was already forwarded to the bank.
    #[error("Cheque has already been forwarded to the bank")]
    AlreadyForwarded,

    /// Caller's role may not act on the stage.
    #[error("Role '{actual}' cannot act on stage '{required}'")]
    InsufficientRole {
        /// Role the stage requires.
        required: String,
        /// Role the caller holds.
        actual: String,
    },

    /// Stage name is not part of the chain.
    #[error("Unknown approval stage: {0}")]
    UnknownStage(String),

    /// Missing or malformed field.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Document not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Document kind.
        kind: &'static str,
        /// Document ID.
        id: Uuid,
    },

    /// Referenced object code or fiscal year missing or inactive.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Document changed since it was read.
    #[error("{kind} {id} was modified concurrently")]
    VersionConflict {
        /// Document kind.
        kind: &'static str,
        /// Document ID.
        id: Uuid,
    },

    /// Bill number already taken.
    #[error("Bill number already exists: {0}")]
    DuplicateBillNumber(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        let message = err.to_string();
        match err {
            WorkflowError::OutOfOrder { .. }
            | WorkflowError::AlreadyApproved(_)
            | WorkflowError::Closed
            | WorkflowError::NotSubmitted
            | WorkflowError::AlreadySubmitted
            | WorkflowError::NotEditable
            | WorkflowError::NotFullyApproved
            | WorkflowError::AlreadyForwarded => Self::BusinessRule(message),
            WorkflowError::DisallowanceReasonRequired
            | WorkflowError::UnknownStage(_)
            | WorkflowError::Validation(_) => Self::Validation(message),
            WorkflowError::InsufficientRole { .. } => Self::Forbidden(message),
            WorkflowError::NotFound { .. } => Self::NotFound(message),
            WorkflowError::InvalidReference(_) => Self::InvalidReference(message),
            WorkflowError::VersionConflict { .. } | WorkflowError::DuplicateBillNumber(_) => {
                Self::Conflict(message)
            }
            WorkflowError::Database(_) => Self::Database(message),
        }
    }
}
