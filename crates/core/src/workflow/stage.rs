//! Ordered approval stage tables.
//!
//! Each document kind has a fixed chain of sign-offs. The order of
//! [`ApprovalStage::ORDER`] is the only order in which stages may be approved.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::workflow::approval::OfficerRole;

/// A named step in an approval chain.
pub trait ApprovalStage: Copy + Eq + Debug + Send + Sync + 'static {
    /// All stages in sign-off order.
    const ORDER: &'static [Self];

    /// Stable identifier used in URLs and column prefixes.
    fn as_str(&self) -> &'static str;

    /// Human-readable stage name.
    fn label(&self) -> &'static str;

    /// Officer role allowed to sign off this stage.
    fn role(&self) -> OfficerRole;

    /// Position in [`Self::ORDER`].
    fn index(&self) -> usize {
        Self::ORDER.iter().position(|s| s == self).unwrap_or(0)
    }

    /// Parses a stage from its identifier.
    fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ORDER.iter().copied().find(|stage| stage.as_str() == wanted)
    }
}

/// Contingent bill sign-off chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillStage {
    /// Account Officer.
    AccountOfficer,
    /// Accountant.
    Accountant,
    /// Audit Officer.
    AuditOfficer,
    /// Senior Budget Officer.
    SeniorBudgetOfficer,
    /// Director Finance.
    DirectorFinance,
    /// Executive Director.
    ExecutiveDirector,
}

impl ApprovalStage for BillStage {
    const ORDER: &'static [Self] = &[
        Self::AccountOfficer,
        Self::Accountant,
        Self::AuditOfficer,
        Self::SeniorBudgetOfficer,
        Self::DirectorFinance,
        Self::ExecutiveDirector,
    ];

    fn as_str(&self) -> &'static str {
        self.role().as_str()
    }

    fn label(&self) -> &'static str {
        match self {
            Self::AccountOfficer => "Account Officer",
            Self::Accountant => "Accountant",
            Self::AuditOfficer => "Audit Officer",
            Self::SeniorBudgetOfficer => "Senior Budget Officer",
            Self::DirectorFinance => "Director Finance",
            Self::ExecutiveDirector => "Executive Director",
        }
    }

    fn role(&self) -> OfficerRole {
        match self {
            Self::AccountOfficer => OfficerRole::AccountOfficer,
            Self::Accountant => OfficerRole::Accountant,
            Self::AuditOfficer => OfficerRole::AuditOfficer,
            Self::SeniorBudgetOfficer => OfficerRole::SeniorBudgetOfficer,
            Self::DirectorFinance => OfficerRole::DirectorFinance,
            Self::ExecutiveDirector => OfficerRole::ExecutiveDirector,
        }
    }
}

/// Schedule-of-payment line sign-off chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStage {
    /// Accountant.
    Accountant,
    /// Budget Officer.
    BudgetOfficer,
    /// Audit Officer.
    AuditOfficer,
    /// Accounts Officer.
    AccountsOfficer,
    /// Director Finance.
    DirectorFinance,
    /// Executive Director.
    ExecutiveDirector,
}

impl ApprovalStage for ScheduleStage {
    const ORDER: &'static [Self] = &[
        Self::Accountant,
        Self::BudgetOfficer,
        Self::AuditOfficer,
        Self::AccountsOfficer,
        Self::DirectorFinance,
        Self::ExecutiveDirector,
    ];

    fn as_str(&self) -> &'static str {
        self.role().as_str()
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Accountant => "Accountant",
            Self::BudgetOfficer => "Budget Officer",
            Self::AuditOfficer => "Audit Officer",
            Self::AccountsOfficer => "Accounts Officer",
            Self::DirectorFinance => "Director Finance",
            Self::ExecutiveDirector => "Executive Director",
        }
    }

    fn role(&self) -> OfficerRole {
        match self {
            Self::Accountant => OfficerRole::Accountant,
            Self::BudgetOfficer => OfficerRole::BudgetOfficer,
            Self::AuditOfficer => OfficerRole::AuditOfficer,
            Self::AccountsOfficer => OfficerRole::AccountsOfficer,
            Self::DirectorFinance => OfficerRole::DirectorFinance,
            Self::ExecutiveDirector => OfficerRole::ExecutiveDirector,
        }
    }
}

/// Cheque sign-off chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChequeStage {
    /// Director Finance.
    DirectorFinance,
    /// Executive Director.
    ExecutiveDirector,
}

impl ApprovalStage for ChequeStage {
    const ORDER: &'static [Self] = &[Self::DirectorFinance, Self::ExecutiveDirector];

    fn as_str(&self) -> &'static str {
        self.role().as_str()
    }

    fn label(&self) -> &'static str {
        match self {
            Self::DirectorFinance => "Director Finance",
            Self::ExecutiveDirector => "Executive Director",
        }
    }

    fn role(&self) -> OfficerRole {
        match self {
            Self::DirectorFinance => OfficerRole::DirectorFinance,
            Self::ExecutiveDirector => OfficerRole::ExecutiveDirector,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_lengths() {
        assert_eq!(BillStage::ORDER.len(), 6);
        assert_eq!(ScheduleStage::ORDER.len(), 6);
        assert_eq!(ChequeStage::ORDER.len(), 2);
    }

    #[test]
    fn test_index_follows_order() {
        for (i, stage) in BillStage::ORDER.iter().enumerate() {
            assert_eq!(stage.index(), i);
        }
        assert_eq!(ScheduleStage::AccountsOfficer.index(), 3);
    }

    #[test]
    fn test_parse_stage() {
        assert_eq!(BillStage::parse("audit_officer"), Some(BillStage::AuditOfficer));
        assert_eq!(BillStage::parse("Director_Finance"), Some(BillStage::DirectorFinance));
        assert_eq!(BillStage::parse("budget_officer"), None);
        assert_eq!(ScheduleStage::parse("budget_officer"), Some(ScheduleStage::BudgetOfficer));
        assert_eq!(ChequeStage::parse("accountant"), None);
    }
}
