//! Bill approval workflow.
//!
//! Contingent bills, their schedule-of-payment lines and the cheques issued
//! against those lines each pass through a fixed chain of officer
//! sign-offs.
//!
//! # Modules
//!
//! - `stage` - Ordered stage tables per document kind
//! - `types` - Trails, bill status and payment amounts
//! - `approval` - Officer roles and stage authorisation
//! - `service` - Sign-off transitions
//! - `error` - Workflow-specific error types

pub mod approval;
pub mod error;
pub mod service;
pub mod stage;
pub mod types;

#[cfg(test)]
mod approval_props;
#[cfg(test)]
mod service_props;

pub use approval::{OfficerRole, authorize};
pub use error::WorkflowError;
pub use service::{MAX_NAME_LEN, MAX_NUMBER_LEN, MAX_REFERENCE_LEN, WorkflowService};
pub use stage::{ApprovalStage, BillStage, ChequeStage, ScheduleStage};
pub use types::{
    ApprovalTrail, BankForwarding, BillInput, BillStatus, BillWorkflow, ChequeInput, Decision,
    PaymentDeductions, ScheduleInput, StageRecord, TrailProgress,
};
