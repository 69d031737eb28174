//! Budget entry data types.

use chrono::{DateTime, NaiveDate, Utc};
use finoffice_shared::types::{
    BudgetEntryId, ExpenseHistoryId, FiscalYearId, ObjectCodeId, UserId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::BudgetError;

/// Funding stream an expense is charged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    /// Non-development (AAA) budget.
    #[serde(rename = "AAA")]
    Aaa,
    /// Development budget.
    #[serde(rename = "DEV")]
    Dev,
    /// PLA special account.
    #[serde(rename = "PLA")]
    Pla,
    /// UHI special account.
    #[serde(rename = "UHI")]
    Uhi,
}

impl ExpenseCategory {
    /// All categories in report order.
    pub const ALL: [Self; 4] = [Self::Aaa, Self::Dev, Self::Pla, Self::Uhi];

    /// Returns the stored tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Aaa => "AAA",
            Self::Dev => "DEV",
            Self::Pla => "PLA",
            Self::Uhi => "UHI",
        }
    }

    /// Human-readable label used on the dashboard.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Aaa => "Non-Development (AAA)",
            Self::Dev => "Development",
            Self::Pla => "PLA",
            Self::Uhi => "UHI",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AAA" => Ok(Self::Aaa),
            "DEV" => Ok(Self::Dev),
            "PLA" => Ok(Self::Pla),
            "UHI" => Ok(Self::Uhi),
            _ => Err(BudgetError::InvalidCategory(s.to_string())),
        }
    }
}

/// Raw entered fields of a budget entry.
///
/// Every field defaults to zero. The AAA total allocation, additional
/// surrender and excess reallocation are recorded for reporting only and do
/// not enter any derived total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetInputs {
    /// AAA total allocation.
    pub aaa_total_allocation: Decimal,
    /// First release tranche.
    pub first_release: Decimal,
    /// Second release tranche.
    pub second_release: Decimal,
    /// Third release tranche.
    pub third_release: Decimal,
    /// Fourth release tranche.
    pub fourth_release: Decimal,
    /// Supplementary budget.
    pub supplementary_budget: Decimal,
    /// Additional surrender.
    pub additional_surrender: Decimal,
    /// Excess reallocation.
    pub excess_reallocation: Decimal,
    /// AAA re-appropriation.
    pub aaa_re_app: Decimal,
    /// Budget withheld or lapsed.
    pub budget_withheld_lapse: Decimal,
    /// AAA expenditure.
    pub aaa_expenditure: Decimal,
    /// Development allocation.
    pub development_allocated: Decimal,
    /// Development re-appropriation.
    pub development_re_app: Decimal,
    /// Development expenditure.
    pub development_expenditure: Decimal,
    /// PLA allocation.
    pub pla_allocated: Decimal,
    /// PLA re-appropriation.
    pub pla_re_app: Decimal,
    /// PLA expenditure.
    pub pla_expenditure: Decimal,
    /// UHI allocation.
    pub uhi_allocated: Decimal,
    /// UHI re-appropriation.
    pub uhi_re_app: Decimal,
    /// UHI expenditure.
    pub uhi_expenditure: Decimal,
}

impl BudgetInputs {
    /// Expenditure recorded against a category.
    #[must_use]
    pub const fn expenditure(&self, category: ExpenseCategory) -> Decimal {
        match category {
            ExpenseCategory::Aaa => self.aaa_expenditure,
            ExpenseCategory::Dev => self.development_expenditure,
            ExpenseCategory::Pla => self.pla_expenditure,
            ExpenseCategory::Uhi => self.uhi_expenditure,
        }
    }

    /// Every input paired with its field name.
    #[must_use]
    pub const fn amounts(&self) -> [(&'static str, Decimal); 20] {
        [
            ("aaa_total_allocation", self.aaa_total_allocation),
            ("first_release", self.first_release),
            ("second_release", self.second_release),
            ("third_release", self.third_release),
            ("fourth_release", self.fourth_release),
            ("supplementary_budget", self.supplementary_budget),
            ("additional_surrender", self.additional_surrender),
            ("excess_reallocation", self.excess_reallocation),
            ("aaa_re_app", self.aaa_re_app),
            ("budget_withheld_lapse", self.budget_withheld_lapse),
            ("aaa_expenditure", self.aaa_expenditure),
            ("development_allocated", self.development_allocated),
            ("development_re_app", self.development_re_app),
            ("development_expenditure", self.development_expenditure),
            ("pla_allocated", self.pla_allocated),
            ("pla_re_app", self.pla_re_app),
            ("pla_expenditure", self.pla_expenditure),
            ("uhi_allocated", self.uhi_allocated),
            ("uhi_re_app", self.uhi_re_app),
            ("uhi_expenditure", self.uhi_expenditure),
        ]
    }

    /// Mutable expenditure field of a category.
    pub fn expenditure_mut(&mut self, category: ExpenseCategory) -> &mut Decimal {
        match category {
            ExpenseCategory::Aaa => &mut self.aaa_expenditure,
            ExpenseCategory::Dev => &mut self.development_expenditure,
            ExpenseCategory::Pla => &mut self.pla_expenditure,
            ExpenseCategory::Uhi => &mut self.uhi_expenditure,
        }
    }
}

/// Fields derived from [`BudgetInputs`]. Never edited directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetTotals {
    /// Four tranches plus supplementary.
    pub sum_of_released: Decimal,
    /// Released plus AAA re-appropriation.
    pub total_aaa_budget: Decimal,
    /// AAA total less withheld and expenditure.
    pub aaa_remaining: Decimal,
    /// Development allocation plus re-appropriation.
    pub development_total: Decimal,
    /// Development total less expenditure.
    pub development_remaining: Decimal,
    /// PLA allocation plus re-appropriation.
    pub pla_total: Decimal,
    /// PLA total less expenditure.
    pub pla_remaining: Decimal,
    /// UHI allocation plus re-appropriation.
    pub uhi_total: Decimal,
    /// UHI total less expenditure.
    pub uhi_remaining: Decimal,
    /// Sum of the four category totals.
    pub consolidated_total_budget: Decimal,
    /// Sum of the four category expenditures.
    pub consolidated_total_expenditure: Decimal,
    /// Sum of the four category remainders.
    pub consolidated_remaining: Decimal,
}

impl BudgetTotals {
    /// Budget total of a category.
    #[must_use]
    pub const fn total(&self, category: ExpenseCategory) -> Decimal {
        match category {
            ExpenseCategory::Aaa => self.total_aaa_budget,
            ExpenseCategory::Dev => self.development_total,
            ExpenseCategory::Pla => self.pla_total,
            ExpenseCategory::Uhi => self.uhi_total,
        }
    }

    /// Every derived field paired with its field name.
    #[must_use]
    pub const fn amounts(&self) -> [(&'static str, Decimal); 12] {
        [
            ("sum_of_released", self.sum_of_released),
            ("total_aaa_budget", self.total_aaa_budget),
            ("aaa_remaining", self.aaa_remaining),
            ("development_total", self.development_total),
            ("development_remaining", self.development_remaining),
            ("pla_total", self.pla_total),
            ("pla_remaining", self.pla_remaining),
            ("uhi_total", self.uhi_total),
            ("uhi_remaining", self.uhi_remaining),
            ("consolidated_total_budget", self.consolidated_total_budget),
            ("consolidated_total_expenditure", self.consolidated_total_expenditure),
            ("consolidated_remaining", self.consolidated_remaining),
        ]
    }

    /// Remaining balance of a category.
    #[must_use]
    pub const fn remaining(&self, category: ExpenseCategory) -> Decimal {
        match category {
            ExpenseCategory::Aaa => self.aaa_remaining,
            ExpenseCategory::Dev => self.development_remaining,
            ExpenseCategory::Pla => self.pla_remaining,
            ExpenseCategory::Uhi => self.uhi_remaining,
        }
    }
}

/// One budget row per (object code, fiscal year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetEntry {
    /// Entry ID.
    pub id: BudgetEntryId,
    /// Object code this entry budgets.
    pub object_code_id: ObjectCodeId,
    /// Fiscal year of the entry.
    pub fiscal_year_id: FiscalYearId,
    /// Entered fields.
    #[serde(flatten)]
    pub inputs: BudgetInputs,
    /// Derived fields.
    #[serde(flatten)]
    pub totals: BudgetTotals,
    /// Optimistic concurrency token, bumped on every write.
    pub version: i32,
    /// User who created the entry.
    pub created_by: Option<UserId>,
    /// User who last changed the entry.
    pub updated_by: Option<UserId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a budget entry.
#[derive(Debug, Clone)]
pub struct CreateBudgetEntryInput {
    /// Object code ID.
    pub object_code_id: ObjectCodeId,
    /// Fiscal year ID.
    pub fiscal_year_id: FiscalYearId,
    /// Initial inputs; omitted fields are zero.
    pub inputs: BudgetInputs,
    /// User creating the entry.
    pub created_by: Option<UserId>,
}

/// Partial update of any input field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateBudgetEntryInput {
    /// New AAA total allocation.
    pub aaa_total_allocation: Option<Decimal>,
    /// New first release tranche.
    pub first_release: Option<Decimal>,
    /// New second release tranche.
    pub second_release: Option<Decimal>,
    /// New third release tranche.
    pub third_release: Option<Decimal>,
    /// New fourth release tranche.
    pub fourth_release: Option<Decimal>,
    /// New supplementary budget.
    pub supplementary_budget: Option<Decimal>,
    /// New additional surrender.
    pub additional_surrender: Option<Decimal>,
    /// New excess reallocation.
    pub excess_reallocation: Option<Decimal>,
    /// New AAA re-appropriation.
    pub aaa_re_app: Option<Decimal>,
    /// New budget withheld or lapsed.
    pub budget_withheld_lapse: Option<Decimal>,
    /// New AAA expenditure.
    pub aaa_expenditure: Option<Decimal>,
    /// New development allocation.
    pub development_allocated: Option<Decimal>,
    /// New development re-appropriation.
    pub development_re_app: Option<Decimal>,
    /// New development expenditure.
    pub development_expenditure: Option<Decimal>,
    /// New PLA allocation.
    pub pla_allocated: Option<Decimal>,
    /// New PLA re-appropriation.
    pub pla_re_app: Option<Decimal>,
    /// New PLA expenditure.
    pub pla_expenditure: Option<Decimal>,
    /// New UHI allocation.
    pub uhi_allocated: Option<Decimal>,
    /// New UHI re-appropriation.
    pub uhi_re_app: Option<Decimal>,
    /// New UHI expenditure.
    pub uhi_expenditure: Option<Decimal>,
}

/// Partial update of the release tranches.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateReleasesInput {
    /// New first release tranche.
    pub first_release: Option<Decimal>,
    /// New second release tranche.
    pub second_release: Option<Decimal>,
    /// New third release tranche.
    pub third_release: Option<Decimal>,
    /// New fourth release tranche.
    pub fourth_release: Option<Decimal>,
    /// New supplementary budget.
    pub supplementary_budget: Option<Decimal>,
}

/// Input for posting an expense against an entry.
#[derive(Debug, Clone)]
pub struct ExpenseInput {
    /// Short name of the expense.
    pub name: String,
    /// Amount charged. Sign is not restricted.
    pub amount: Decimal,
    /// Category tag as supplied by the caller.
    pub category: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Expense date; defaults to the posting day.
    pub expense_date: Option<NaiveDate>,
    /// User posting the expense.
    pub created_by: Option<UserId>,
}

/// Immutable expense history record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Record ID.
    pub id: ExpenseHistoryId,
    /// Owning budget entry.
    pub budget_entry_id: BudgetEntryId,
    /// Short name of the expense.
    pub name: String,
    /// Amount charged.
    pub amount: Decimal,
    /// Category charged.
    pub category: ExpenseCategory,
    /// Optional description.
    pub description: Option<String>,
    /// Expense date.
    pub expense_date: NaiveDate,
    /// User who posted the expense.
    pub created_by: Option<UserId>,
    /// Posting timestamp.
    pub created_at: DateTime<Utc>,
}
