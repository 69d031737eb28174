//! Tests for the budget module.

use chrono::{NaiveDate, TimeZone, Utc};
use finoffice_shared::types::{FiscalYearId, ObjectCodeId, UserId};
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::calculator::recompute;
use super::error::BudgetError;
use super::service::BudgetService;
use super::types::{
    BudgetEntry, BudgetInputs, BudgetTotals, CreateBudgetEntryInput, ExpenseCategory,
    ExpenseInput, UpdateBudgetEntryInput, UpdateReleasesInput,
};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap()
}

fn entry_with(inputs: BudgetInputs) -> BudgetEntry {
    BudgetService::create_entry(
        CreateBudgetEntryInput {
            object_code_id: ObjectCodeId::new(),
            fiscal_year_id: FiscalYearId::new(),
            inputs,
            created_by: None,
        },
        now(),
    )
    .unwrap()
}

fn create(inputs: BudgetInputs) -> Result<BudgetEntry, BudgetError> {
    BudgetService::create_entry(
        CreateBudgetEntryInput {
            object_code_id: ObjectCodeId::new(),
            fiscal_year_id: FiscalYearId::new(),
            inputs,
            created_by: None,
        },
        now(),
    )
}

fn worked_example() -> BudgetEntry {
    entry_with(BudgetInputs {
        first_release: dec!(100),
        second_release: dec!(50),
        supplementary_budget: dec!(25),
        aaa_re_app: dec!(10),
        budget_withheld_lapse: dec!(5),
        aaa_expenditure: dec!(60),
        ..BudgetInputs::default()
    })
}

fn expense(category: &str, amount: Decimal) -> ExpenseInput {
    ExpenseInput {
        name: "Stationery".to_string(),
        amount,
        category: category.to_string(),
        description: None,
        expense_date: None,
        created_by: None,
    }
}

#[test]
fn test_create_entry_computes_totals() {
    let entry = worked_example();
    assert_eq!(entry.version, 1);
    assert_eq!(entry.totals.sum_of_released, dec!(175));
    assert_eq!(entry.totals.total_aaa_budget, dec!(185));
    assert_eq!(entry.totals.aaa_remaining, dec!(120));
}

#[test]
fn test_create_entry_all_zero() {
    let entry = entry_with(BudgetInputs::default());
    assert_eq!(entry.totals, BudgetTotals::default());
}

#[test]
fn test_post_aaa_expense() {
    let (entry, record) =
        BudgetService::post_expense(worked_example(), expense("AAA", dec!(20)), now()).unwrap();

    assert_eq!(entry.inputs.aaa_expenditure, dec!(80));
    assert_eq!(entry.totals.aaa_remaining, dec!(100));
    assert_eq!(entry.totals.consolidated_total_expenditure, dec!(80));
    assert_eq!(record.amount, dec!(20));
    assert_eq!(record.category, ExpenseCategory::Aaa);
    assert_eq!(record.budget_entry_id, entry.id);
    assert_eq!(record.expense_date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
}

#[rstest]
#[case("AAA", ExpenseCategory::Aaa)]
#[case("dev", ExpenseCategory::Dev)]
#[case(" Pla ", ExpenseCategory::Pla)]
#[case("uhi", ExpenseCategory::Uhi)]
fn test_category_parse(#[case] tag: &str, #[case] expected: ExpenseCategory) {
    assert_eq!(tag.parse::<ExpenseCategory>().unwrap(), expected);
}

#[test]
fn test_post_expense_invalid_category() {
    let original = worked_example();
    let result = BudgetService::post_expense(original, expense("XYZ", dec!(10)), now());
    assert!(matches!(result, Err(BudgetError::InvalidCategory(tag)) if tag == "XYZ"));
}

#[test]
fn test_post_dev_expense_overspends() {
    let entry = entry_with(BudgetInputs {
        development_allocated: dec!(50),
        ..BudgetInputs::default()
    });

    let (entry, _) =
        BudgetService::post_expense(entry, expense("DEV", dec!(75.25)), now()).unwrap();

    assert_eq!(entry.totals.development_remaining, dec!(-25.25));
    assert!(BudgetService::is_over_spent(&entry, ExpenseCategory::Dev));
    assert!(!BudgetService::is_over_spent(&entry, ExpenseCategory::Aaa));
}

#[test]
fn test_post_negative_expense_accepted() {
    let (entry, record) =
        BudgetService::post_expense(worked_example(), expense("aaa", dec!(-10)), now()).unwrap();
    assert_eq!(entry.inputs.aaa_expenditure, dec!(50));
    assert_eq!(record.amount, dec!(-10));
}

#[rstest]
#[case("")]
#[case("   ")]
fn test_post_expense_blank_name(#[case] name: &str) {
    let mut input = expense("PLA", dec!(1));
    input.name = name.to_string();
    let result = BudgetService::post_expense(worked_example(), input, now());
    assert!(matches!(result, Err(BudgetError::Validation(_))));
}

#[test]
fn test_post_expense_name_too_long() {
    let mut input = expense("PLA", dec!(1));
    input.name = "x".repeat(256);
    let result = BudgetService::post_expense(worked_example(), input, now());
    assert!(matches!(result, Err(BudgetError::Validation(_))));
}

#[test]
fn test_apply_releases_only_touches_tranches() {
    let actor = UserId::new();
    let entry = BudgetService::apply_releases(
        worked_example(),
        &UpdateReleasesInput {
            third_release: Some(dec!(40)),
            ..UpdateReleasesInput::default()
        },
        Some(actor),
        now(),
    )
    .unwrap();

    assert_eq!(entry.inputs.first_release, dec!(100));
    assert_eq!(entry.inputs.third_release, dec!(40));
    assert_eq!(entry.totals.sum_of_released, dec!(215));
    assert_eq!(entry.totals.aaa_remaining, dec!(160));
    assert_eq!(entry.updated_by, Some(actor));
}

#[test]
fn test_apply_update_partial() {
    let entry = BudgetService::apply_update(
        worked_example(),
        &UpdateBudgetEntryInput {
            uhi_allocated: Some(dec!(300)),
            aaa_expenditure: Some(dec!(0)),
            ..UpdateBudgetEntryInput::default()
        },
        None,
        now(),
    )
    .unwrap();

    assert_eq!(entry.inputs.second_release, dec!(50));
    assert_eq!(entry.totals.aaa_remaining, dec!(180));
    assert_eq!(entry.totals.uhi_remaining, dec!(300));
    assert_eq!(entry.totals.consolidated_total_budget, dec!(485));
}

#[test]
fn test_create_entry_rejects_overflowing_body() {
    let body = r#"{"first_release":"79228162514264337593543950335","second_release":"1"}"#;
    let inputs: BudgetInputs = serde_json::from_str(body).unwrap();

    let result = create(inputs);
    assert!(matches!(result, Err(BudgetError::Validation(msg)) if msg.starts_with("first_release")));
}

#[rstest]
#[case::largest(dec!(9999999999999999.99), true)]
#[case::largest_negative(dec!(-9999999999999999.99), true)]
#[case::one_cent_over(dec!(10000000000000000.00), false)]
#[case::decimal_max(Decimal::MAX, false)]
fn test_create_entry_amount_bound(#[case] amount: Decimal, #[case] accepted: bool) {
    let result = create(BudgetInputs {
        pla_allocated: amount,
        ..BudgetInputs::default()
    });
    assert_eq!(result.is_ok(), accepted);
}

#[test]
fn test_create_entry_rejects_total_past_bound() {
    let result = create(BudgetInputs {
        first_release: dec!(9999999999999999.99),
        second_release: dec!(0.01),
        ..BudgetInputs::default()
    });
    assert!(
        matches!(result, Err(BudgetError::Validation(msg)) if msg.starts_with("sum_of_released"))
    );
}

#[rstest]
#[case(dec!(0.005))]
#[case(dec!(12.345))]
#[case(dec!(-0.001))]
fn test_create_entry_rejects_sub_cent_amounts(#[case] amount: Decimal) {
    let result = create(BudgetInputs {
        first_release: amount,
        second_release: amount,
        ..BudgetInputs::default()
    });
    assert!(matches!(result, Err(BudgetError::Validation(_))));
}

#[test]
fn test_trailing_zeros_are_not_sub_cent() {
    let entry = entry_with(BudgetInputs {
        first_release: dec!(10.500),
        ..BudgetInputs::default()
    });
    assert_eq!(entry.totals.sum_of_released, dec!(10.5));
}

#[test]
fn test_apply_update_rejects_sub_cent_amount() {
    let result = BudgetService::apply_update(
        worked_example(),
        &UpdateBudgetEntryInput {
            uhi_re_app: Some(dec!(1.999)),
            ..UpdateBudgetEntryInput::default()
        },
        None,
        now(),
    );
    assert!(matches!(result, Err(BudgetError::Validation(msg)) if msg.starts_with("uhi_re_app")));
}

#[test]
fn test_apply_releases_rejects_out_of_range() {
    let result = BudgetService::apply_releases(
        worked_example(),
        &UpdateReleasesInput {
            fourth_release: Some(Decimal::MAX),
            ..UpdateReleasesInput::default()
        },
        None,
        now(),
    );
    assert!(matches!(result, Err(BudgetError::Validation(_))));
}

#[rstest]
#[case::sub_cent(dec!(0.005))]
#[case::huge(Decimal::MAX)]
fn test_post_expense_rejects_unstorable_amount(#[case] amount: Decimal) {
    let result = BudgetService::post_expense(worked_example(), expense("AAA", amount), now());
    assert!(matches!(result, Err(BudgetError::Validation(msg)) if msg.starts_with("amount")));
}

#[test]
fn test_post_expense_rejects_expenditure_past_bound() {
    let entry = entry_with(BudgetInputs {
        uhi_expenditure: dec!(9999999999999999.00),
        ..BudgetInputs::default()
    });
    let result = BudgetService::post_expense(entry, expense("UHI", dec!(1)), now());
    assert!(
        matches!(result, Err(BudgetError::Validation(msg)) if msg.starts_with("uhi_expenditure"))
    );
}

#[rstest]
#[case(dec!(50), dec!(200), dec!(25.00))]
#[case(dec!(10), dec!(0), dec!(0))]
#[case(dec!(300), dec!(200), dec!(150.00))]
fn test_utilization(#[case] spent: Decimal, #[case] budget: Decimal, #[case] expected: Decimal) {
    assert_eq!(BudgetService::utilization(spent, budget), expected);
}

fn money() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn inputs_strategy() -> impl Strategy<Value = BudgetInputs> {
    (
        proptest::collection::vec(money(), 11),
        proptest::collection::vec(money(), 9),
    )
        .prop_map(|(a, b)| BudgetInputs {
            aaa_total_allocation: a[0],
            first_release: a[1],
            second_release: a[2],
            third_release: a[3],
            fourth_release: a[4],
            supplementary_budget: a[5],
            additional_surrender: a[6],
            excess_reallocation: a[7],
            aaa_re_app: a[8],
            budget_withheld_lapse: a[9],
            aaa_expenditure: a[10],
            development_allocated: b[0],
            development_re_app: b[1],
            development_expenditure: b[2],
            pla_allocated: b[3],
            pla_re_app: b[4],
            pla_expenditure: b[5],
            uhi_allocated: b[6],
            uhi_re_app: b[7],
            uhi_expenditure: b[8],
        })
}

proptest! {
    /// Recompute is idempotent.
    #[test]
    fn prop_recompute_idempotent(inputs in inputs_strategy()) {
        let once = recompute(entry_with(inputs));
        let twice = recompute(once.clone());
        prop_assert_eq!(once, twice);
    }

    /// Consolidated remaining equals total budget less total expenditure
    /// less the withheld amount.
    #[test]
    fn prop_consolidated_balances(inputs in inputs_strategy()) {
        let withheld = inputs.budget_withheld_lapse;
        let t = BudgetTotals::from_inputs(&inputs);
        prop_assert_eq!(
            t.consolidated_remaining,
            t.consolidated_total_budget - t.consolidated_total_expenditure - withheld
        );
        for category in ExpenseCategory::ALL {
            let withheld_part = if category == ExpenseCategory::Aaa { withheld } else { Decimal::ZERO };
            prop_assert_eq!(
                t.remaining(category),
                t.total(category) - inputs.expenditure(category) - withheld_part
            );
        }
    }

    /// Posting moves only the chosen category by exactly the amount.
    #[test]
    fn prop_post_expense_moves_one_category(
        inputs in inputs_strategy(),
        amount in money(),
        idx in 0usize..4,
    ) {
        let category = ExpenseCategory::ALL[idx];
        let before = entry_with(inputs);
        let (after, _) = BudgetService::post_expense(
            before.clone(),
            expense(category.as_str(), amount),
            now(),
        ).unwrap();

        for other in ExpenseCategory::ALL {
            let delta = if other == category { amount } else { Decimal::ZERO };
            prop_assert_eq!(after.inputs.expenditure(other), before.inputs.expenditure(other) + delta);
            prop_assert_eq!(after.totals.remaining(other), before.totals.remaining(other) - delta);
        }
        prop_assert_eq!(
            after.totals.consolidated_total_expenditure,
            before.totals.consolidated_total_expenditure + amount
        );
    }
}
