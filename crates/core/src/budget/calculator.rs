//! Derived budget fields.
//!
//! Every write path recomputes the totals before persisting, so stored totals
//! always match the stored inputs.

use super::types::{BudgetEntry, BudgetInputs, BudgetTotals};

impl BudgetTotals {
    /// Computes all derived fields from the entered inputs.
    ///
    /// The AAA total allocation, additional surrender and excess reallocation
    /// are not part of any formula.
    #[must_use]
    pub fn from_inputs(inputs: &BudgetInputs) -> Self {
        let sum_of_released = inputs.first_release
            + inputs.second_release
            + inputs.third_release
            + inputs.fourth_release
            + inputs.supplementary_budget;
        let total_aaa_budget = sum_of_released + inputs.aaa_re_app;
        let aaa_remaining =
            total_aaa_budget - inputs.budget_withheld_lapse - inputs.aaa_expenditure;

        let development_total = inputs.development_allocated + inputs.development_re_app;
        let development_remaining = development_total - inputs.development_expenditure;

        let pla_total = inputs.pla_allocated + inputs.pla_re_app;
        let pla_remaining = pla_total - inputs.pla_expenditure;

        let uhi_total = inputs.uhi_allocated + inputs.uhi_re_app;
        let uhi_remaining = uhi_total - inputs.uhi_expenditure;

        let consolidated_total_budget =
            total_aaa_budget + development_total + pla_total + uhi_total;
        let consolidated_total_expenditure = inputs.aaa_expenditure
            + inputs.development_expenditure
            + inputs.pla_expenditure
            + inputs.uhi_expenditure;
        let consolidated_remaining =
            aaa_remaining + development_remaining + pla_remaining + uhi_remaining;

        Self {
            sum_of_released,
            total_aaa_budget,
            aaa_remaining,
            development_total,
            development_remaining,
            pla_total,
            pla_remaining,
            uhi_total,
            uhi_remaining,
            consolidated_total_budget,
            consolidated_total_expenditure,
            consolidated_remaining,
        }
    }
}

/// Recomputes the derived fields of an entry. Idempotent.
#[must_use]
pub fn recompute(mut entry: BudgetEntry) -> BudgetEntry {
    entry.totals = BudgetTotals::from_inputs(&entry.inputs);
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_worked_example() {
        let inputs = BudgetInputs {
            first_release: dec!(100),
            second_release: dec!(50),
            supplementary_budget: dec!(25),
            aaa_re_app: dec!(10),
            budget_withheld_lapse: dec!(5),
            aaa_expenditure: dec!(60),
            ..BudgetInputs::default()
        };

        let totals = BudgetTotals::from_inputs(&inputs);

        assert_eq!(totals.sum_of_released, dec!(175));
        assert_eq!(totals.total_aaa_budget, dec!(185));
        assert_eq!(totals.aaa_remaining, dec!(120));
        assert_eq!(totals.consolidated_total_budget, dec!(185));
        assert_eq!(totals.consolidated_total_expenditure, dec!(60));
        assert_eq!(totals.consolidated_remaining, dec!(120));
    }

    #[test]
    fn test_reporting_only_fields_ignored() {
        let inputs = BudgetInputs {
            aaa_total_allocation: dec!(1_000_000),
            additional_surrender: dec!(300),
            excess_reallocation: dec!(200),
            ..BudgetInputs::default()
        };

        assert_eq!(BudgetTotals::from_inputs(&inputs), BudgetTotals::default());
    }

    #[test]
    fn test_special_accounts() {
        let inputs = BudgetInputs {
            development_allocated: dec!(1000),
            development_re_app: dec!(-100),
            development_expenditure: dec!(250.50),
            pla_allocated: dec!(400),
            pla_re_app: dec!(100),
            pla_expenditure: dec!(600),
            uhi_allocated: dec!(80),
            uhi_expenditure: dec!(20),
            ..BudgetInputs::default()
        };

        let totals = BudgetTotals::from_inputs(&inputs);

        assert_eq!(totals.development_total, dec!(900));
        assert_eq!(totals.development_remaining, dec!(649.50));
        assert_eq!(totals.pla_total, dec!(500));
        // overspending goes negative, never clamped
        assert_eq!(totals.pla_remaining, dec!(-100));
        assert_eq!(totals.uhi_total, dec!(80));
        assert_eq!(totals.uhi_remaining, dec!(60));
        assert_eq!(totals.consolidated_total_budget, dec!(1480));
        assert_eq!(totals.consolidated_total_expenditure, dec!(870.50));
        assert_eq!(totals.consolidated_remaining, dec!(609.50));
    }
}
