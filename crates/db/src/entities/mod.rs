//! `SeaORM` entity definitions.

pub mod asaan_cheques;
pub mod budget_entries;
pub mod contingent_bills;
pub mod expense_histories;
pub mod fiscal_years;
pub mod object_code_levels;
pub mod object_codes;
pub mod schedule_of_payments;

pub mod prelude {
    //! Entity re-exports.
    pub use super::asaan_cheques::Entity as AsaanCheques;
    pub use super::budget_entries::Entity as BudgetEntries;
    pub use super::contingent_bills::Entity as ContingentBills;
    pub use super::expense_histories::Entity as ExpenseHistories;
    pub use super::fiscal_years::Entity as FiscalYears;
    pub use super::object_code_levels::Entity as ObjectCodeLevels;
    pub use super::object_codes::Entity as ObjectCodes;
    pub use super::schedule_of_payments::Entity as ScheduleOfPayments;
}

/// Reads the four approval columns of one stage into a `StageRecord`.
macro_rules! read_stage {
    ($model:expr, $approved:ident, $at:ident, $remarks:ident, $by:ident) => {
        finoffice_core::workflow::StageRecord {
            approved: $model.$approved,
            acted_at: $model.$at.map(|t| t.with_timezone(&chrono::Utc)),
            remarks: $model.$remarks.clone(),
            acted_by: $model.$by.map(finoffice_shared::types::UserId::from),
        }
    };
}

/// Writes a `StageRecord` into the four approval columns of one stage.
macro_rules! write_stage {
    ($active:expr, $record:expr, $approved:ident, $at:ident, $remarks:ident, $by:ident) => {{
        let record = $record;
        $active.$approved = sea_orm::Set(record.approved);
        $active.$at = sea_orm::Set(record.acted_at.map(Into::into));
        $active.$remarks = sea_orm::Set(record.remarks.clone());
        $active.$by = sea_orm::Set(record.acted_by.map(Into::into));
    }};
}

pub(crate) use read_stage;
pub(crate) use write_stage;
