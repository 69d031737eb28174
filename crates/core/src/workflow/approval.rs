//! Officer roles and stage authorisation.

use serde::{Deserialize, Serialize};

use crate::workflow::error::WorkflowError;
use crate::workflow::stage::ApprovalStage;

/// Officer role carried in the caller's token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfficerRole {
    /// Account Officer (first bill reviewer).
    AccountOfficer,
    /// Accountant.
    Accountant,
    /// Audit Officer.
    AuditOfficer,
    /// Senior Budget Officer.
    SeniorBudgetOfficer,
    /// Budget Officer (schedule lines).
    BudgetOfficer,
    /// Accounts Officer (schedule lines).
    AccountsOfficer,
    /// Director Finance.
    DirectorFinance,
    /// Executive Director.
    ExecutiveDirector,
    /// May act on any stage.
    Admin,
}

impl OfficerRole {
    /// Parse a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "account_officer" => Some(Self::AccountOfficer),
            "accountant" => Some(Self::Accountant),
            "audit_officer" => Some(Self::AuditOfficer),
            "senior_budget_officer" => Some(Self::SeniorBudgetOfficer),
            "budget_officer" => Some(Self::BudgetOfficer),
            "accounts_officer" => Some(Self::AccountsOfficer),
            "director_finance" => Some(Self::DirectorFinance),
            "executive_director" => Some(Self::ExecutiveDirector),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AccountOfficer => "account_officer",
            Self::Accountant => "accountant",
            Self::AuditOfficer => "audit_officer",
            Self::SeniorBudgetOfficer => "senior_budget_officer",
            Self::BudgetOfficer => "budget_officer",
            Self::AccountsOfficer => "accounts_officer",
            Self::DirectorFinance => "director_finance",
            Self::ExecutiveDirector => "executive_director",
            Self::Admin => "admin",
        }
    }

    /// True if this role may sign off `required`.
    #[must_use]
    pub fn can_act_as(&self, required: Self) -> bool {
        *self == Self::Admin || *self == required
    }
}

/// Checks that a caller role string may act on `stage`.
///
/// Unknown role strings are treated as having no officer role.
///
/// # Errors
///
/// Returns `InsufficientRole` when the caller may not act.
pub fn authorize<S: ApprovalStage>(caller_role: &str, stage: S) -> Result<(), WorkflowError> {
    let required = stage.role();
    match OfficerRole::parse(caller_role) {
        Some(role) if role.can_act_as(required) => Ok(()),
        _ => Err(WorkflowError::InsufficientRole {
            required: required.as_str().to_string(),
            actual: caller_role.to_string(),
        }),
    }
}
