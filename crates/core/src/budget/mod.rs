//! Budget ledger: per object code and fiscal year.
//!
//! Holds the entered release, allocation and expenditure fields of an entry,
//! derives its totals and posts expenses against one of four categories.

pub mod calculator;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use calculator::recompute;
pub use error::BudgetError;
pub use service::{BudgetService, MAX_EXPENSE_NAME_LEN};
pub use types::{
    BudgetEntry, BudgetInputs, BudgetTotals, CreateBudgetEntryInput, ExpenseCategory,
    ExpenseInput, ExpenseRecord, UpdateBudgetEntryInput, UpdateReleasesInput,
};
