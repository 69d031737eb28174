//! Budget entry repository.
//!
//! Entries are recomputed by `finoffice_core::budget` before every write and
//! saved with an optimistic version check.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::{info, warn};

use finoffice_core::budget::{
    BudgetEntry, BudgetError, BudgetService, CreateBudgetEntryInput, ExpenseInput, ExpenseRecord,
    UpdateBudgetEntryInput, UpdateReleasesInput,
};
use finoffice_shared::types::{BudgetEntryId, FiscalYearId, UserId};

use super::{is_unique_violation, update_versioned};
use crate::entities::{budget_entries, expense_histories, fiscal_years, object_codes};

/// A budget entry with its object code and fiscal year names.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetEntryView {
    /// The entry.
    #[serde(flatten)]
    pub entry: BudgetEntry,
    /// Object code.
    pub object_code: String,
    /// Head of account.
    pub head_of_account: String,
    /// Fiscal year name.
    pub fiscal_year_name: String,
}

/// Budget entry repository.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an entry for an object code and fiscal year.
    ///
    /// # Errors
    ///
    /// * `InvalidReference` if the object code or fiscal year is missing or
    ///   inactive
    /// * `DuplicateEntry` if the pair already has an entry
    /// * `Validation` if an amount cannot be stored
    pub async fn create(
        &self,
        input: CreateBudgetEntryInput,
    ) -> Result<BudgetEntryView, BudgetError> {
        let entry = BudgetService::create_entry(input, Utc::now())?;

        let object_code = object_codes::Entity::find_by_id(entry.object_code_id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?
            .filter(|c| c.is_active)
            .ok_or_else(|| {
                BudgetError::InvalidReference(format!("object code {}", entry.object_code_id))
            })?;

        let fiscal_year = fiscal_years::Entity::find_by_id(entry.fiscal_year_id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?
            .filter(|y| y.is_active)
            .ok_or_else(|| {
                BudgetError::InvalidReference(format!("fiscal year {}", entry.fiscal_year_id))
            })?;

        let duplicate = BudgetError::DuplicateEntry {
            object_code_id: entry.object_code_id.into_inner(),
            fiscal_year_id: entry.fiscal_year_id.into_inner(),
        };

        let existing = budget_entries::Entity::find()
            .filter(budget_entries::Column::ObjectCodeId.eq(entry.object_code_id.into_inner()))
            .filter(budget_entries::Column::FiscalYearId.eq(entry.fiscal_year_id.into_inner()))
            .one(&self.db)
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?;
        if existing.is_some() {
            return Err(duplicate);
        }

        let mut model = budget_entries::ActiveModel::from_entry(&entry);
        model.id = Set(entry.id.into_inner());

        let saved = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                duplicate
            } else {
                BudgetError::Database(e.to_string())
            }
        })?;

        info!(
            entry_id = %saved.id,
            object_code = %object_code.code,
            fiscal_year = %fiscal_year.name,
            "Budget entry created"
        );

        Ok(BudgetEntryView {
            entry: saved.into(),
            object_code: object_code.code,
            head_of_account: object_code.head_of_account,
            fiscal_year_name: fiscal_year.name,
        })
    }

    /// Finds an entry by ID.
    pub async fn get(&self, id: BudgetEntryId) -> Result<BudgetEntryView, BudgetError> {
        let entry = find_entry(&self.db, id).await?;
        self.view(entry).await
    }

    /// Lists entries ordered by object code, optionally for one fiscal year.
    pub async fn list(
        &self,
        fiscal_year_id: Option<FiscalYearId>,
    ) -> Result<Vec<BudgetEntryView>, BudgetError> {
        let mut query = budget_entries::Entity::find()
            .find_also_related(object_codes::Entity)
            .order_by_asc(object_codes::Column::Code);
        if let Some(fy) = fiscal_year_id {
            query = query.filter(budget_entries::Column::FiscalYearId.eq(fy.into_inner()));
        }

        let rows = query
            .all(&self.db)
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?;

        let years = fiscal_years::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(entry, code)| {
                let fiscal_year_name = years
                    .iter()
                    .find(|y| y.id == entry.fiscal_year_id)
                    .map(|y| y.name.clone())
                    .unwrap_or_default();
                let (object_code, head_of_account) =
                    code.map(|c| (c.code, c.head_of_account)).unwrap_or_default();
                BudgetEntryView {
                    entry: entry.into(),
                    object_code,
                    head_of_account,
                    fiscal_year_name,
                }
            })
            .collect())
    }

    /// Applies a partial update of input fields.
    ///
    /// `expected_version`, when given, must match the stored version.
    ///
    /// # Errors
    ///
    /// `NotFound`, or `VersionConflict` when the entry changed underneath.
    pub async fn update(
        &self,
        id: BudgetEntryId,
        update: &UpdateBudgetEntryInput,
        expected_version: Option<i32>,
        actor: Option<UserId>,
    ) -> Result<BudgetEntryView, BudgetError> {
        let entry = self
            .modify(id, expected_version, |entry| {
                BudgetService::apply_update(entry, update, actor, Utc::now())
            })
            .await?;
        info!(entry_id = %id, version = entry.version, "Budget entry updated");
        self.view(entry).await
    }

    /// Updates the release tranches.
    pub async fn update_releases(
        &self,
        id: BudgetEntryId,
        releases: &UpdateReleasesInput,
        expected_version: Option<i32>,
        actor: Option<UserId>,
    ) -> Result<BudgetEntryView, BudgetError> {
        let entry = self
            .modify(id, expected_version, |entry| {
                BudgetService::apply_releases(entry, releases, actor, Utc::now())
            })
            .await?;
        info!(entry_id = %id, version = entry.version, "Budget releases updated");
        self.view(entry).await
    }

    /// Posts an expense: bumps the category's expenditure and appends one
    /// history record, atomically.
    ///
    /// # Errors
    ///
    /// `InvalidCategory` or `Validation` for a bad payload, otherwise as
    /// [`Self::update`].
    pub async fn post_expense(
        &self,
        id: BudgetEntryId,
        input: ExpenseInput,
        expected_version: Option<i32>,
    ) -> Result<(BudgetEntryView, ExpenseRecord), BudgetError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?;

        let entry = find_entry(&txn, id).await?;
        check_version(&entry, expected_version)?;

        let (entry, record) = BudgetService::post_expense(entry, input, Utc::now())?;
        let entry = save_versioned(&txn, entry).await?;

        expense_histories::ActiveModel::from(&record)
            .insert(&txn)
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?;

        info!(
            entry_id = %id,
            category = %record.category,
            amount = %record.amount,
            "Expense posted"
        );

        Ok((self.view(entry).await?, record))
    }

    /// Deletes an entry and its expense history.
    pub async fn delete(&self, id: BudgetEntryId) -> Result<(), BudgetError> {
        let result = budget_entries::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(BudgetError::NotFound(id.into_inner()));
        }

        info!(entry_id = %id, "Budget entry deleted");
        Ok(())
    }

    /// Expense history of an entry, newest first.
    pub async fn list_expenses(&self, id: BudgetEntryId) -> Result<Vec<ExpenseRecord>, BudgetError> {
        find_entry(&self.db, id).await?;

        expense_histories::Entity::find()
            .filter(expense_histories::Column::BudgetEntryId.eq(id.into_inner()))
            .order_by_desc(expense_histories::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?
            .into_iter()
            .map(expense_histories::Model::into_record)
            .collect()
    }

    async fn modify<F>(
        &self,
        id: BudgetEntryId,
        expected_version: Option<i32>,
        change: F,
    ) -> Result<BudgetEntry, BudgetError>
    where
        F: FnOnce(BudgetEntry) -> Result<BudgetEntry, BudgetError>,
    {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?;

        let entry = find_entry(&txn, id).await?;
        check_version(&entry, expected_version)?;
        let entry = save_versioned(&txn, change(entry)?).await?;

        txn.commit()
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?;

        Ok(entry)
    }

    async fn view(&self, entry: BudgetEntry) -> Result<BudgetEntryView, BudgetError> {
        let code = object_codes::Entity::find_by_id(entry.object_code_id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?;
        let year = fiscal_years::Entity::find_by_id(entry.fiscal_year_id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| BudgetError::Database(e.to_string()))?;

        let (object_code, head_of_account) =
            code.map(|c| (c.code, c.head_of_account)).unwrap_or_default();

        Ok(BudgetEntryView {
            entry,
            object_code,
            head_of_account,
            fiscal_year_name: year.map(|y| y.name).unwrap_or_default(),
        })
    }
}

async fn find_entry<C: ConnectionTrait>(
    db: &C,
    id: BudgetEntryId,
) -> Result<BudgetEntry, BudgetError> {
    budget_entries::Entity::find_by_id(id.into_inner())
        .one(db)
        .await
        .map_err(|e| BudgetError::Database(e.to_string()))?
        .map(Into::into)
        .ok_or(BudgetError::NotFound(id.into_inner()))
}

fn check_version(entry: &BudgetEntry, expected: Option<i32>) -> Result<(), BudgetError> {
    match expected {
        Some(v) if v != entry.version => {
            warn!(entry_id = %entry.id, expected = v, actual = entry.version, "Stale budget entry version");
            Err(BudgetError::VersionConflict(entry.id.into_inner()))
        }
        _ => Ok(()),
    }
}

/// Writes every column of `entry` where the stored version still matches,
/// and returns the entry with its version bumped.
async fn save_versioned<C: ConnectionTrait>(
    db: &C,
    mut entry: BudgetEntry,
) -> Result<BudgetEntry, BudgetError> {
    let read_version = entry.version;
    entry.version += 1;

    let mut model = budget_entries::ActiveModel::from_entry(&entry);
    model.created_at = sea_orm::NotSet;
    model.created_by = sea_orm::NotSet;

    let matched = update_versioned(
        db,
        model,
        budget_entries::Column::Id,
        entry.id.into_inner(),
        budget_entries::Column::Version,
        read_version,
    )
    .await
    .map_err(|e| BudgetError::Database(e.to_string()))?;

    if !matched {
        warn!(entry_id = %entry.id, "Budget entry modified concurrently");
        return Err(BudgetError::VersionConflict(entry.id.into_inner()));
    }

    Ok(entry)
}
