//! Budget service: entry creation, edits and expense posting.

use chrono::{DateTime, Utc};
use finoffice_shared::types::{BudgetEntryId, ExpenseHistoryId, UserId, check_amount, percentage};
use rust_decimal::Decimal;

use super::error::BudgetError;
use super::types::{
    BudgetEntry, BudgetInputs, BudgetTotals, CreateBudgetEntryInput, ExpenseCategory,
    ExpenseInput, ExpenseRecord, UpdateBudgetEntryInput, UpdateReleasesInput,
};

/// Maximum length of an expense name.
pub const MAX_EXPENSE_NAME_LEN: usize = 255;

/// Budget service for business logic.
///
/// All functions are pure; the repository persists what they return inside a
/// single transaction together with the version check.
pub struct BudgetService;

impl BudgetService {
    /// Builds a new entry with derived totals filled in.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if an input or a derived total does not fit a
    /// stored amount.
    pub fn create_entry(
        input: CreateBudgetEntryInput,
        now: DateTime<Utc>,
    ) -> Result<BudgetEntry, BudgetError> {
        let totals = checked_totals(&input.inputs)?;
        Ok(BudgetEntry {
            id: BudgetEntryId::new(),
            object_code_id: input.object_code_id,
            fiscal_year_id: input.fiscal_year_id,
            inputs: input.inputs,
            totals,
            version: 1,
            created_by: input.created_by,
            updated_by: input.created_by,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update of input fields and recomputes.
    ///
    /// # Errors
    ///
    /// Returns `Validation` as [`Self::create_entry`] does.
    pub fn apply_update(
        entry: BudgetEntry,
        update: &UpdateBudgetEntryInput,
        actor: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Result<BudgetEntry, BudgetError> {
        let mut entry = entry;
        let i: &mut BudgetInputs = &mut entry.inputs;

        set_if(&mut i.aaa_total_allocation, update.aaa_total_allocation);
        set_if(&mut i.first_release, update.first_release);
        set_if(&mut i.second_release, update.second_release);
        set_if(&mut i.third_release, update.third_release);
        set_if(&mut i.fourth_release, update.fourth_release);
        set_if(&mut i.supplementary_budget, update.supplementary_budget);
        set_if(&mut i.additional_surrender, update.additional_surrender);
        set_if(&mut i.excess_reallocation, update.excess_reallocation);
        set_if(&mut i.aaa_re_app, update.aaa_re_app);
        set_if(&mut i.budget_withheld_lapse, update.budget_withheld_lapse);
        set_if(&mut i.aaa_expenditure, update.aaa_expenditure);
        set_if(&mut i.development_allocated, update.development_allocated);
        set_if(&mut i.development_re_app, update.development_re_app);
        set_if(&mut i.development_expenditure, update.development_expenditure);
        set_if(&mut i.pla_allocated, update.pla_allocated);
        set_if(&mut i.pla_re_app, update.pla_re_app);
        set_if(&mut i.pla_expenditure, update.pla_expenditure);
        set_if(&mut i.uhi_allocated, update.uhi_allocated);
        set_if(&mut i.uhi_re_app, update.uhi_re_app);
        set_if(&mut i.uhi_expenditure, update.uhi_expenditure);

        Ok(touch(checked_recompute(entry)?, actor, now))
    }

    /// Updates the release tranches only and recomputes.
    ///
    /// # Errors
    ///
    /// Returns `Validation` as [`Self::create_entry`] does.
    pub fn apply_releases(
        entry: BudgetEntry,
        releases: &UpdateReleasesInput,
        actor: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Result<BudgetEntry, BudgetError> {
        let mut entry = entry;
        let i = &mut entry.inputs;

        set_if(&mut i.first_release, releases.first_release);
        set_if(&mut i.second_release, releases.second_release);
        set_if(&mut i.third_release, releases.third_release);
        set_if(&mut i.fourth_release, releases.fourth_release);
        set_if(&mut i.supplementary_budget, releases.supplementary_budget);

        Ok(touch(checked_recompute(entry)?, actor, now))
    }

    /// Posts an expense: bumps the category expenditure, recomputes and
    /// returns the history record to insert alongside the entry update.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCategory` for an unknown tag and `Validation` for a
    /// blank or overlong name, an unstorable amount, or an expenditure that
    /// would grow past the largest stored amount.
    pub fn post_expense(
        entry: BudgetEntry,
        input: ExpenseInput,
        now: DateTime<Utc>,
    ) -> Result<(BudgetEntry, ExpenseRecord), BudgetError> {
        let category: ExpenseCategory = input.category.parse()?;
        let name = Self::validate_expense_name(&input.name)?;
        validate_amounts([("amount", input.amount)])?;

        let mut entry = entry;
        *entry.inputs.expenditure_mut(category) += input.amount;
        let entry = touch(checked_recompute(entry)?, input.created_by, now);

        let record = ExpenseRecord {
            id: ExpenseHistoryId::new(),
            budget_entry_id: entry.id,
            name,
            amount: input.amount,
            category,
            description: input
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            expense_date: input.expense_date.unwrap_or_else(|| now.date_naive()),
            created_by: input.created_by,
            created_at: now,
        };

        Ok((entry, record))
    }

    /// Trims and checks an expense name.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the name is blank or too long.
    pub fn validate_expense_name(name: &str) -> Result<String, BudgetError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BudgetError::Validation("expense name is required".into()));
        }
        if name.chars().count() > MAX_EXPENSE_NAME_LEN {
            return Err(BudgetError::Validation(format!(
                "expense name exceeds {MAX_EXPENSE_NAME_LEN} characters"
            )));
        }
        Ok(name.to_string())
    }

    /// Utilization percentage; zero when nothing is budgeted.
    #[must_use]
    pub fn utilization(expenditure: Decimal, budget: Decimal) -> Decimal {
        percentage(expenditure, budget)
    }

    /// True when the category has spent more than its budget.
    #[must_use]
    pub fn is_over_spent(entry: &BudgetEntry, category: ExpenseCategory) -> bool {
        entry.totals.remaining(category) < Decimal::ZERO
    }
}

fn validate_amounts<const N: usize>(
    amounts: [(&'static str, Decimal); N],
) -> Result<(), BudgetError> {
    for (field, value) in amounts {
        check_amount(value).map_err(|e| BudgetError::Validation(format!("{field} {e}")))?;
    }
    Ok(())
}

/// Inputs are checked before summing so the totals cannot overflow.
fn checked_totals(inputs: &BudgetInputs) -> Result<BudgetTotals, BudgetError> {
    validate_amounts(inputs.amounts())?;
    let totals = BudgetTotals::from_inputs(inputs);
    validate_amounts(totals.amounts())?;
    Ok(totals)
}

fn checked_recompute(mut entry: BudgetEntry) -> Result<BudgetEntry, BudgetError> {
    entry.totals = checked_totals(&entry.inputs)?;
    Ok(entry)
}

fn set_if(field: &mut Decimal, value: Option<Decimal>) {
    if let Some(v) = value {
        *field = v;
    }
}

fn touch(mut entry: BudgetEntry, actor: Option<UserId>, now: DateTime<Utc>) -> BudgetEntry {
    entry.updated_by = actor.or(entry.updated_by);
    entry.updated_at = now;
    entry
}
