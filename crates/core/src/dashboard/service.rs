//! Dashboard aggregation over a fiscal year's entries.

use std::collections::BTreeMap;

use finoffice_shared::types::percentage;
use rust_decimal::Decimal;

use super::types::{
    BudgetLine, CategorySummary, DashboardSummary, DepartmentSummary, TopExpenditure,
};
use crate::budget::ExpenseCategory;

/// Default length of the top expenditure list.
pub const DEFAULT_TOP_N: usize = 10;
/// Upper bound on the top expenditure list.
pub const MAX_TOP_N: usize = 100;
/// Group name for entries whose object code has no level.
pub const UNASSIGNED: &str = "Unassigned";

/// Dashboard aggregation.
pub struct DashboardService;

impl DashboardService {
    /// Summarises entries given in storage order.
    ///
    /// `top_n` is capped at [`MAX_TOP_N`].
    #[must_use]
    pub fn summarize(lines: &[BudgetLine], top_n: usize) -> DashboardSummary {
        let categories = ExpenseCategory::ALL
            .iter()
            .map(|c| Self::category_summary(lines, *c))
            .collect();

        DashboardSummary {
            categories,
            consolidated: Self::consolidated_summary(lines),
            top_expenditures: Self::top_expenditures(lines, top_n),
            departments: Self::departments(lines),
            entry_count: lines.len(),
            over_spent_count: lines
                .iter()
                .filter(|l| l.entry.totals.consolidated_remaining < Decimal::ZERO)
                .count(),
        }
    }

    fn category_summary(lines: &[BudgetLine], category: ExpenseCategory) -> CategorySummary {
        let mut total_budget = Decimal::ZERO;
        let mut total_expenditure = Decimal::ZERO;
        let mut remaining = Decimal::ZERO;
        for line in lines {
            total_budget += line.entry.totals.total(category);
            total_expenditure += line.entry.inputs.expenditure(category);
            remaining += line.entry.totals.remaining(category);
        }
        CategorySummary {
            category: category.as_str(),
            label: category.label(),
            total_budget,
            total_expenditure,
            remaining,
            utilization_percent: percentage(total_expenditure, total_budget),
        }
    }

    fn consolidated_summary(lines: &[BudgetLine]) -> CategorySummary {
        let mut total_budget = Decimal::ZERO;
        let mut total_expenditure = Decimal::ZERO;
        let mut remaining = Decimal::ZERO;
        for line in lines {
            let t = &line.entry.totals;
            total_budget += t.consolidated_total_budget;
            total_expenditure += t.consolidated_total_expenditure;
            remaining += t.consolidated_remaining;
        }
        CategorySummary {
            category: "CONSOLIDATED",
            label: "Consolidated",
            total_budget,
            total_expenditure,
            remaining,
            utilization_percent: percentage(total_expenditure, total_budget),
        }
    }

    /// Largest consolidated expenditures first; ties keep input order.
    #[must_use]
    pub fn top_expenditures(lines: &[BudgetLine], top_n: usize) -> Vec<TopExpenditure> {
        let mut sorted: Vec<&BudgetLine> = lines.iter().collect();
        sorted.sort_by(|a, b| {
            b.entry
                .totals
                .consolidated_total_expenditure
                .cmp(&a.entry.totals.consolidated_total_expenditure)
        });

        sorted
            .into_iter()
            .take(top_n.min(MAX_TOP_N))
            .map(|line| {
                let t = &line.entry.totals;
                TopExpenditure {
                    budget_entry_id: line.entry.id,
                    object_code: line.object_code.clone(),
                    head_of_account: line.head_of_account.clone(),
                    total_budget: t.consolidated_total_budget,
                    total_expenditure: t.consolidated_total_expenditure,
                    remaining: t.consolidated_remaining,
                    utilization_percent: percentage(
                        t.consolidated_total_expenditure,
                        t.consolidated_total_budget,
                    ),
                }
            })
            .collect()
    }

    /// Groups by level name; biggest spenders first, ties by name.
    #[must_use]
    pub fn departments(lines: &[BudgetLine]) -> Vec<DepartmentSummary> {
        let mut groups: BTreeMap<&str, (usize, Decimal, Decimal)> = BTreeMap::new();
        for line in lines {
            let name = line.level_name.as_deref().unwrap_or(UNASSIGNED);
            let group = groups.entry(name).or_insert((0, Decimal::ZERO, Decimal::ZERO));
            group.0 += 1;
            group.1 += line.entry.totals.consolidated_total_budget;
            group.2 += line.entry.totals.consolidated_total_expenditure;
        }

        let mut departments: Vec<DepartmentSummary> = groups
            .into_iter()
            .map(|(name, (entry_count, total_budget, total_expenditure))| DepartmentSummary {
                name: name.to_string(),
                entry_count,
                total_budget,
                total_expenditure,
                utilization_percent: percentage(total_expenditure, total_budget),
            })
            .collect();

        departments.sort_by(|a, b| {
            b.total_expenditure
                .cmp(&a.total_expenditure)
                .then_with(|| a.name.cmp(&b.name))
        });
        departments
    }
}
