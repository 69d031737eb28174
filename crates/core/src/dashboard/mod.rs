//! Dashboard aggregation.
//!
//! Category summaries, top expenditures and per-level groupings for one
//! fiscal year's budget entries.

pub mod service;
pub mod types;

pub use service::{DEFAULT_TOP_N, DashboardService, MAX_TOP_N, UNASSIGNED};
pub use types::{
    BudgetLine, CategorySummary, DashboardSummary, DepartmentSummary, TopExpenditure,
};
