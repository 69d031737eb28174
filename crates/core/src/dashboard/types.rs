//! Dashboard data types.

use finoffice_shared::types::BudgetEntryId;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::budget::BudgetEntry;

/// A budget entry joined with its object code, as read for the dashboard.
#[derive(Debug, Clone)]
pub struct BudgetLine {
    /// Object code.
    pub object_code: String,
    /// Head of account.
    pub head_of_account: String,
    /// Name of the object code's level.
    pub level_name: Option<String>,
    /// The entry itself.
    pub entry: BudgetEntry,
}

/// Totals for one category or for the consolidated figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    /// Category tag, or `CONSOLIDATED`.
    pub category: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Sum of category budgets.
    pub total_budget: Decimal,
    /// Sum of category expenditure.
    pub total_expenditure: Decimal,
    /// Sum of category remainders.
    pub remaining: Decimal,
    /// Expenditure as a percentage of budget.
    pub utilization_percent: Decimal,
}

/// One row of the top expenditure list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopExpenditure {
    /// Entry ID.
    pub budget_entry_id: BudgetEntryId,
    /// Object code.
    pub object_code: String,
    /// Head of account.
    pub head_of_account: String,
    /// Consolidated budget.
    pub total_budget: Decimal,
    /// Consolidated expenditure.
    pub total_expenditure: Decimal,
    /// Consolidated remaining.
    pub remaining: Decimal,
    /// Expenditure as a percentage of budget.
    pub utilization_percent: Decimal,
}

/// Consolidated figures for one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentSummary {
    /// Level name, or `Unassigned`.
    pub name: String,
    /// Number of entries in the group.
    pub entry_count: usize,
    /// Consolidated budget.
    pub total_budget: Decimal,
    /// Consolidated expenditure.
    pub total_expenditure: Decimal,
    /// Expenditure as a percentage of budget.
    pub utilization_percent: Decimal,
}

/// Dashboard response for one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// AAA, DEV, PLA and UHI, in that order.
    pub categories: Vec<CategorySummary>,
    /// Consolidated figures.
    pub consolidated: CategorySummary,
    /// Largest consolidated expenditures.
    pub top_expenditures: Vec<TopExpenditure>,
    /// Figures grouped by level.
    pub departments: Vec<DepartmentSummary>,
    /// Number of entries.
    pub entry_count: usize,
    /// Entries whose consolidated remaining is negative.
    pub over_spent_count: usize,
}
