//! Fiscal year repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{info, warn};

use finoffice_core::fiscal::{CreateFiscalYearInput, FiscalError, FiscalService, FiscalYear};
use finoffice_shared::types::FiscalYearId;

use super::is_unique_violation;
use crate::entities::fiscal_years;

/// Fiscal year repository.
#[derive(Debug, Clone)]
pub struct FiscalRepository {
    db: DatabaseConnection,
}

impl FiscalRepository {
    /// Creates a new fiscal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists fiscal years, newest first.
    pub async fn list(&self, include_inactive: bool) -> Result<Vec<FiscalYear>, FiscalError> {
        let mut query = fiscal_years::Entity::find();
        if !include_inactive {
            query = query.filter(fiscal_years::Column::IsActive.eq(true));
        }

        let years = query
            .order_by_desc(fiscal_years::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| FiscalError::Database(e.to_string()))?;

        Ok(years.into_iter().map(Into::into).collect())
    }

    /// Finds a fiscal year by ID.
    pub async fn get(&self, id: FiscalYearId) -> Result<FiscalYear, FiscalError> {
        fiscal_years::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| FiscalError::Database(e.to_string()))?
            .map(Into::into)
            .ok_or(FiscalError::NotFound(id.into_inner()))
    }

    /// The current fiscal year, if one is set.
    pub async fn current(&self) -> Result<Option<FiscalYear>, FiscalError> {
        let year = fiscal_years::Entity::find()
            .filter(fiscal_years::Column::IsCurrent.eq(true))
            .filter(fiscal_years::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| FiscalError::Database(e.to_string()))?;

        Ok(year.map(Into::into))
    }

    /// Creates a fiscal year. New years are active and not current.
    ///
    /// # Errors
    ///
    /// * `Validation` or `InvalidDateRange` for a bad payload
    /// * `DuplicateName` if the name is taken
    pub async fn create(&self, input: CreateFiscalYearInput) -> Result<FiscalYear, FiscalError> {
        let input = FiscalService::validate_create(input)?;

        let now = Utc::now().into();
        let model = fiscal_years::ActiveModel {
            id: Set(FiscalYearId::new().into_inner()),
            name: Set(input.name.clone()),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            is_active: Set(true),
            is_current: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let year = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                FiscalError::DuplicateName(input.name.clone())
            } else {
                FiscalError::Database(e.to_string())
            }
        })?;

        info!(fiscal_year_id = %year.id, name = %year.name, "Fiscal year created");
        Ok(year.into())
    }

    /// Makes `id` the only current fiscal year.
    ///
    /// The previous current year is cleared in the same transaction.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown year, `Inactive` for a deactivated one,
    /// `CurrentConflict` when a concurrent switch committed first.
    pub async fn set_current(&self, id: FiscalYearId) -> Result<FiscalYear, FiscalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| FiscalError::Database(e.to_string()))?;

        let years: Vec<FiscalYear> = fiscal_years::Entity::find()
            .all(&txn)
            .await
            .map_err(|e| FiscalError::Database(e.to_string()))?
            .into_iter()
            .map(Into::into)
            .collect();

        let switch = FiscalService::plan_current_switch(&years, id)?;
        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();

        // clear before set so the partial unique index never sees two rows
        if !switch.clear.is_empty() {
            fiscal_years::Entity::update_many()
                .col_expr(fiscal_years::Column::IsCurrent, false.into())
                .col_expr(fiscal_years::Column::UpdatedAt, now.into())
                .filter(
                    fiscal_years::Column::Id
                        .is_in(switch.clear.iter().map(|y| y.into_inner())),
                )
                .exec(&txn)
                .await
                .map_err(|e| FiscalError::Database(e.to_string()))?;
        }

        let model = fiscal_years::ActiveModel {
            id: Set(switch.set.into_inner()),
            is_current: Set(true),
            updated_at: Set(now),
            ..Default::default()
        };
        // a racing switch that committed first trips the one-current index
        let conflict = |e: sea_orm::DbErr| {
            if is_unique_violation(&e) {
                warn!(fiscal_year_id = %id, "Concurrent current fiscal year switch");
                FiscalError::CurrentConflict(id.into_inner())
            } else {
                FiscalError::Database(e.to_string())
            }
        };
        let year = model.update(&txn).await.map_err(conflict)?;
        txn.commit().await.map_err(conflict)?;

        info!(
            fiscal_year_id = %year.id,
            cleared = switch.clear.len(),
            "Current fiscal year switched"
        );
        Ok(year.into())
    }

    /// Soft-deletes a fiscal year, clearing its current flag.
    pub async fn deactivate(&self, id: FiscalYearId) -> Result<FiscalYear, FiscalError> {
        let year = FiscalService::deactivate(self.get(id).await?);

        let model = fiscal_years::ActiveModel {
            id: Set(year.id.into_inner()),
            is_active: Set(year.is_active),
            is_current: Set(year.is_current),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let year = model
            .update(&self.db)
            .await
            .map_err(|e| FiscalError::Database(e.to_string()))?;

        info!(fiscal_year_id = %year.id, "Fiscal year deactivated");
        Ok(year.into())
    }
}
