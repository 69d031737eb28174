//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every read-modify-write runs inside one transaction.

pub mod bill;
pub mod budget;
pub mod catalog;
pub mod dashboard;
pub mod fiscal;
pub mod report;

pub use bill::{BillDetail, BillRepository, BillView, ChequeView, ScheduleView};
pub use budget::{BudgetEntryView, BudgetRepository};
pub use catalog::{CatalogRepository, ImportOutcome};
pub use dashboard::{DashboardRepository, DashboardView};
pub use fiscal::FiscalRepository;
pub use report::ReportRepository;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, SqlErr,
};
use uuid::Uuid;

/// True when `err` is a unique constraint violation.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Writes the set columns of `model` to the row `id` if its version is still
/// `read_version`. Returns false when no row matched.
pub(crate) async fn update_versioned<E, A, C>(
    db: &C,
    model: A,
    id_column: E::Column,
    id: Uuid,
    version_column: E::Column,
    read_version: i32,
) -> Result<bool, DbErr>
where
    E: EntityTrait,
    A: ActiveModelTrait<Entity = E>,
    C: ConnectionTrait,
{
    let result = E::update_many()
        .set(model)
        .filter(id_column.eq(id))
        .filter(version_column.eq(read_version))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
