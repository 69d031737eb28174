//! Dashboard repository.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;

use finoffice_core::dashboard::{BudgetLine, DashboardService, DashboardSummary};
use finoffice_core::fiscal::FiscalYear;
use finoffice_core::reports::ReportError;
use finoffice_shared::types::FiscalYearId;

use super::report::resolve_fiscal_year;
use crate::entities::{budget_entries, object_code_levels, object_codes};

/// Dashboard summary for one fiscal year.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// The summarised year.
    pub fiscal_year: FiscalYear,
    /// Aggregated figures.
    #[serde(flatten)]
    pub summary: DashboardSummary,
}

/// Dashboard repository.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Summarises a fiscal year, or the current one when `fiscal_year_id`
    /// is `None`.
    pub async fn summary(
        &self,
        fiscal_year_id: Option<FiscalYearId>,
        top_n: usize,
    ) -> Result<DashboardView, ReportError> {
        let fiscal_year = resolve_fiscal_year(&self.db, fiscal_year_id).await?;
        let lines = self.lines(fiscal_year.id).await?;

        Ok(DashboardView {
            summary: DashboardService::summarize(&lines, top_n),
            fiscal_year,
        })
    }

    /// Entries of a year in storage order, joined with code and level name.
    pub async fn lines(&self, fiscal_year_id: FiscalYearId) -> Result<Vec<BudgetLine>, ReportError> {
        let rows = budget_entries::Entity::find()
            .find_also_related(object_codes::Entity)
            .filter(budget_entries::Column::FiscalYearId.eq(fiscal_year_id.into_inner()))
            .order_by_asc(budget_entries::Column::CreatedAt)
            .order_by_asc(budget_entries::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ReportError::Database(e.to_string()))?;

        let levels = object_code_levels::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| ReportError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(entry, code)| {
                let level_name = code
                    .as_ref()
                    .and_then(|c| c.level_id)
                    .and_then(|id| levels.iter().find(|l| l.id == id))
                    .map(|l| l.name.clone());
                let (object_code, head_of_account) =
                    code.map(|c| (c.code, c.head_of_account)).unwrap_or_default();
                BudgetLine {
                    object_code,
                    head_of_account,
                    level_name,
                    entry: entry.into(),
                }
            })
            .collect())
    }
}
