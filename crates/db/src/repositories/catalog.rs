//! Object code and level repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use finoffice_core::catalog::{
    CatalogError, CatalogService, ImportIssue, ImportReport, LevelInput, ObjectCode, ObjectCodeInput,
    ObjectCodeLevel,
};
use finoffice_shared::types::{ObjectCodeId, ObjectCodeLevelId};

use super::is_unique_violation;
use crate::entities::{object_code_levels, object_codes};

/// Result of applying parsed import rows.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportOutcome {
    /// Object codes created.
    pub created: Vec<ObjectCode>,
    /// Codes skipped because they already exist.
    pub existing: Vec<String>,
    /// Parsed rows that failed validation.
    pub rejected: Vec<ImportIssue>,
}

/// Repository for the object code catalog.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    db: DatabaseConnection,
}

impl CatalogRepository {
    /// Creates a new catalog repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Levels
    // ========================================================================

    /// Lists levels ordered by code.
    pub async fn list_levels(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<ObjectCodeLevel>, CatalogError> {
        let mut query = object_code_levels::Entity::find();
        if !include_inactive {
            query = query.filter(object_code_levels::Column::IsActive.eq(true));
        }

        let levels = query
            .order_by_asc(object_code_levels::Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(levels.into_iter().map(Into::into).collect())
    }

    /// Creates a level.
    ///
    /// # Errors
    ///
    /// * `Validation` for a bad payload
    /// * `InvalidReference` for a missing or inactive parent
    /// * `DuplicateCode` if the code is taken
    pub async fn create_level(&self, input: LevelInput) -> Result<ObjectCodeLevel, CatalogError> {
        let input = CatalogService::validate_level(input)?;
        if let Some(parent_id) = input.parent_id {
            let levels = self.list_levels(true).await?;
            CatalogService::check_parent(None, parent_id, &levels)?;
        }

        let now = Utc::now().into();
        let model = object_code_levels::ActiveModel {
            id: Set(ObjectCodeLevelId::new().into_inner()),
            code: Set(input.code.clone()),
            name: Set(input.name),
            parent_id: Set(input.parent_id.map(Into::into)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let level = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                CatalogError::DuplicateCode(input.code.clone())
            } else {
                CatalogError::Database(e.to_string())
            }
        })?;

        info!(level_id = %level.id, code = %level.code, "Object code level created");
        Ok(level.into())
    }

    /// Replaces a level's code, name and parent.
    ///
    /// # Errors
    ///
    /// As [`Self::create_level`], plus `LevelNotFound`; a parent that is the
    /// level itself or one of its descendants is an `InvalidReference`.
    pub async fn update_level(
        &self,
        id: ObjectCodeLevelId,
        input: LevelInput,
    ) -> Result<ObjectCodeLevel, CatalogError> {
        let input = CatalogService::validate_level(input)?;
        let levels = self.list_levels(true).await?;
        if !levels.iter().any(|l| l.id == id) {
            return Err(CatalogError::LevelNotFound(id.into_inner()));
        }
        if let Some(parent_id) = input.parent_id {
            CatalogService::check_parent(Some(id), parent_id, &levels)?;
        }

        let model = object_code_levels::ActiveModel {
            id: Set(id.into_inner()),
            code: Set(input.code.clone()),
            name: Set(input.name),
            parent_id: Set(input.parent_id.map(Into::into)),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let level = model.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                CatalogError::DuplicateCode(input.code.clone())
            } else {
                CatalogError::Database(e.to_string())
            }
        })?;

        Ok(level.into())
    }

    /// Soft-deletes a level.
    ///
    /// # Errors
    ///
    /// Returns `LevelInUse` while active child levels or active object codes
    /// reference it; nothing is changed in that case.
    pub async fn deactivate_level(&self, id: ObjectCodeLevelId) -> Result<(), CatalogError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let level_id: Uuid = id.into();
        object_code_levels::Entity::find_by_id(level_id)
            .filter(object_code_levels::Column::IsActive.eq(true))
            .one(&txn)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?
            .ok_or(CatalogError::LevelNotFound(level_id))?;

        let active_children = object_code_levels::Entity::find()
            .filter(object_code_levels::Column::ParentId.eq(level_id))
            .filter(object_code_levels::Column::IsActive.eq(true))
            .count(&txn)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let active_codes = object_codes::Entity::find()
            .filter(object_codes::Column::LevelId.eq(level_id))
            .filter(object_codes::Column::IsActive.eq(true))
            .count(&txn)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        if let Err(e) = CatalogService::ensure_level_deletable(active_children, active_codes) {
            warn!(%level_id, active_children, active_codes, "Level still in use");
            return Err(e);
        }

        let model = object_code_levels::ActiveModel {
            id: Set(level_id),
            is_active: Set(false),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        model
            .update(&txn)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        info!(%level_id, "Object code level deactivated");
        Ok(())
    }

    // ========================================================================
    // Object codes
    // ========================================================================

    /// Lists object codes ordered by code.
    pub async fn list_object_codes(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<ObjectCode>, CatalogError> {
        let mut query = object_codes::Entity::find();
        if !include_inactive {
            query = query.filter(object_codes::Column::IsActive.eq(true));
        }

        let codes = query
            .order_by_asc(object_codes::Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        Ok(codes.into_iter().map(Into::into).collect())
    }

    /// Finds an object code by ID.
    pub async fn get_object_code(&self, id: ObjectCodeId) -> Result<ObjectCode, CatalogError> {
        object_codes::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?
            .map(Into::into)
            .ok_or(CatalogError::ObjectCodeNotFound(id.into_inner()))
    }

    /// Creates an object code.
    ///
    /// # Errors
    ///
    /// * `Validation` for a bad payload
    /// * `InvalidReference` for a missing or inactive level
    /// * `DuplicateCode` if the code is taken
    pub async fn create_object_code(
        &self,
        input: ObjectCodeInput,
    ) -> Result<ObjectCode, CatalogError> {
        let input = CatalogService::validate_object_code(input)?;
        self.check_level(input.level_id).await?;

        let now = Utc::now().into();
        let model = object_codes::ActiveModel {
            id: Set(ObjectCodeId::new().into_inner()),
            code: Set(input.code.clone()),
            head_of_account: Set(input.head_of_account),
            level_id: Set(input.level_id.map(Into::into)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let code = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                CatalogError::DuplicateCode(input.code.clone())
            } else {
                CatalogError::Database(e.to_string())
            }
        })?;

        info!(object_code_id = %code.id, code = %code.code, "Object code created");
        Ok(code.into())
    }

    /// Replaces an object code's fields.
    pub async fn update_object_code(
        &self,
        id: ObjectCodeId,
        input: ObjectCodeInput,
    ) -> Result<ObjectCode, CatalogError> {
        let input = CatalogService::validate_object_code(input)?;
        self.get_object_code(id).await?;
        self.check_level(input.level_id).await?;

        let model = object_codes::ActiveModel {
            id: Set(id.into_inner()),
            code: Set(input.code.clone()),
            head_of_account: Set(input.head_of_account),
            level_id: Set(input.level_id.map(Into::into)),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let code = model.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                CatalogError::DuplicateCode(input.code.clone())
            } else {
                CatalogError::Database(e.to_string())
            }
        })?;

        Ok(code.into())
    }

    /// Soft-deletes an object code. Its budget entries are kept.
    pub async fn deactivate_object_code(&self, id: ObjectCodeId) -> Result<(), CatalogError> {
        let result = object_codes::Entity::update_many()
            .col_expr(object_codes::Column::IsActive, false.into())
            .col_expr(
                object_codes::Column::UpdatedAt,
                sea_orm::sea_query::Expr::current_timestamp().into(),
            )
            .filter(object_codes::Column::Id.eq(id.into_inner()))
            .filter(object_codes::Column::IsActive.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(CatalogError::ObjectCodeNotFound(id.into_inner()));
        }

        info!(object_code_id = %id, "Object code deactivated");
        Ok(())
    }

    /// Inserts parsed import rows under one level.
    ///
    /// Codes that already exist (active or not) are skipped and reported,
    /// as are rows that fail validation. All inserts share one transaction.
    pub async fn import_object_codes(
        &self,
        report: &ImportReport,
        level_id: Option<ObjectCodeLevelId>,
    ) -> Result<ImportOutcome, CatalogError> {
        self.check_level(level_id).await?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        let codes: Vec<String> = report.rows.iter().map(|r| r.code.clone()).collect();
        let taken: Vec<String> = object_codes::Entity::find()
            .filter(object_codes::Column::Code.is_in(codes))
            .all(&txn)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?
            .into_iter()
            .map(|m| m.code)
            .collect();

        let now = Utc::now().into();
        let mut outcome = ImportOutcome::default();
        for row in &report.rows {
            if taken.iter().any(|c| c.eq_ignore_ascii_case(&row.code)) {
                outcome.existing.push(row.code.clone());
                continue;
            }

            let input = match CatalogService::validate_object_code(ObjectCodeInput {
                code: row.code.clone(),
                head_of_account: row.head_of_account.clone(),
                level_id,
            }) {
                Ok(input) => input,
                Err(e) => {
                    outcome.rejected.push(ImportIssue {
                        line: row.line,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let model = object_codes::ActiveModel {
                id: Set(ObjectCodeId::new().into_inner()),
                code: Set(input.code),
                head_of_account: Set(input.head_of_account),
                level_id: Set(level_id.map(Into::into)),
                is_active: Set(true),
                created_at: Set(now),
                updated_at: Set(now),
            };
            let created = model
                .insert(&txn)
                .await
                .map_err(|e| CatalogError::Database(e.to_string()))?;
            outcome.created.push(created.into());
        }

        txn.commit()
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        info!(
            created = outcome.created.len(),
            existing = outcome.existing.len(),
            rejected = outcome.rejected.len(),
            issues = report.issues.len(),
            "Object codes imported"
        );
        Ok(outcome)
    }

    async fn check_level(&self, level_id: Option<ObjectCodeLevelId>) -> Result<(), CatalogError> {
        let Some(level_id) = level_id else {
            return Ok(());
        };

        let level = object_code_levels::Entity::find_by_id(level_id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| CatalogError::Database(e.to_string()))?;

        match level {
            Some(l) if l.is_active => Ok(()),
            Some(_) => Err(CatalogError::InvalidReference(format!(
                "level {level_id} is inactive"
            ))),
            None => Err(CatalogError::InvalidReference(format!("level {level_id}"))),
        }
    }
}
