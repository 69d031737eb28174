//! Report repository: loads the rows behind the budget statement.

use std::collections::HashMap;

use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::debug;
use uuid::Uuid;

use finoffice_core::budget::BudgetEntry;
use finoffice_core::fiscal::FiscalYear;
use finoffice_core::reports::{ReportError, ReportService, ReportSheet, StatementSource};
use finoffice_shared::types::FiscalYearId;

use crate::entities::{budget_entries, fiscal_years, object_codes};

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the budget statement for a fiscal year, or the current one.
    ///
    /// # Errors
    ///
    /// `FiscalYearNotFound` for an unknown year, `NoCurrentFiscalYear` when
    /// none is given and none is current.
    pub async fn budget_statement(
        &self,
        office_name: &str,
        fiscal_year_id: Option<FiscalYearId>,
    ) -> Result<(FiscalYear, ReportSheet), ReportError> {
        let year = resolve_fiscal_year(&self.db, fiscal_year_id).await?;
        let sources = self.statement_sources(year.id).await?;

        debug!(fiscal_year = %year.name, rows = sources.len(), "Building budget statement");
        let sheet = ReportService::budget_statement(office_name, &year.name, &sources);
        Ok((year, sheet))
    }

    /// Active object codes in code order, each with its entry for the year.
    pub async fn statement_sources(
        &self,
        fiscal_year_id: FiscalYearId,
    ) -> Result<Vec<StatementSource>, ReportError> {
        let codes = object_codes::Entity::find()
            .filter(object_codes::Column::IsActive.eq(true))
            .order_by_asc(object_codes::Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| ReportError::Database(e.to_string()))?;

        let mut entries: HashMap<Uuid, BudgetEntry> = budget_entries::Entity::find()
            .filter(budget_entries::Column::FiscalYearId.eq(fiscal_year_id.into_inner()))
            .all(&self.db)
            .await
            .map_err(|e| ReportError::Database(e.to_string()))?
            .into_iter()
            .map(|m| (m.object_code_id, m.into()))
            .collect();

        Ok(codes
            .into_iter()
            .map(|code| StatementSource {
                entry: entries.remove(&code.id),
                object_code: code.code,
                head_of_account: code.head_of_account,
            })
            .collect())
    }
}

/// Loads the given fiscal year, or the current one when `id` is `None`.
pub(crate) async fn resolve_fiscal_year<C: ConnectionTrait>(
    db: &C,
    id: Option<FiscalYearId>,
) -> Result<FiscalYear, ReportError> {
    let year = match id {
        Some(id) => fiscal_years::Entity::find_by_id(id.into_inner())
            .one(db)
            .await
            .map_err(|e| ReportError::Database(e.to_string()))?
            .ok_or(ReportError::FiscalYearNotFound(id.into_inner()))?,
        None => fiscal_years::Entity::find()
            .filter(fiscal_years::Column::IsCurrent.eq(true))
            .filter(fiscal_years::Column::IsActive.eq(true))
            .one(db)
            .await
            .map_err(|e| ReportError::Database(e.to_string()))?
            .ok_or(ReportError::NoCurrentFiscalYear)?,
    };
    Ok(year.into())
}
