//! Integration tests for the dashboard and report repositories.

mod common;

use rust_decimal_macros::dec;

use finoffice_core::budget::{BudgetInputs, CreateBudgetEntryInput};
use finoffice_core::reports::{Cell, PLACEHOLDER};
use finoffice_db::{BudgetRepository, DashboardRepository, ReportRepository};

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_statement_marks_codes_without_entry() {
    let db = common::setup().await;
    let with_entry = common::object_code(&db).await;
    let without_entry = common::object_code(&db).await;
    let year = common::fiscal_year(&db).await;

    BudgetRepository::new(db.clone())
        .create(CreateBudgetEntryInput {
            object_code_id: with_entry.id,
            fiscal_year_id: year.id,
            inputs: BudgetInputs {
                first_release: dec!(100),
                ..BudgetInputs::default()
            },
            created_by: None,
        })
        .await
        .unwrap();

    let (_, sheet) = ReportRepository::new(db)
        .budget_statement("Finance Office", Some(year.id))
        .await
        .unwrap();

    let row = sheet
        .rows
        .iter()
        .find(|r| r[1] == Cell::Text(without_entry.code.clone()))
        .unwrap();
    let dashes = row
        .iter()
        .filter(|c| c.render(false) == PLACEHOLDER)
        .count();
    assert_eq!(dashes, 32);

    let row = sheet
        .rows
        .iter()
        .find(|r| r[1] == Cell::Text(with_entry.code.clone()))
        .unwrap();
    assert!(row.iter().all(|c| c.render(false) != PLACEHOLDER));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_dashboard_for_year() {
    let db = common::setup().await;
    let code = common::object_code(&db).await;
    let year = common::fiscal_year(&db).await;

    BudgetRepository::new(db.clone())
        .create(CreateBudgetEntryInput {
            object_code_id: code.id,
            fiscal_year_id: year.id,
            inputs: BudgetInputs {
                pla_allocated: dec!(200),
                pla_expenditure: dec!(50),
                ..BudgetInputs::default()
            },
            created_by: None,
        })
        .await
        .unwrap();

    let view = DashboardRepository::new(db)
        .summary(Some(year.id), 10)
        .await
        .unwrap();

    assert_eq!(view.summary.entry_count, 1);
    assert_eq!(view.summary.consolidated.total_budget, dec!(200));
    assert_eq!(view.summary.consolidated.utilization_percent, dec!(25));
    assert_eq!(view.summary.departments[0].name, "Unassigned");
}
