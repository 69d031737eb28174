//! `SeaORM` Entity for expense_histories table.

use finoffice_core::budget::{ExpenseCategory, ExpenseRecord};
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "expense_histories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub budget_entry_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub expense_date: Date,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::budget_entries::Entity",
        from = "Column::BudgetEntryId",
        to = "super::budget_entries::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    BudgetEntries,
}

impl Related<super::budget_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Converts to the domain record.
    ///
    /// # Errors
    ///
    /// Fails if the stored category tag is not recognised.
    pub fn into_record(self) -> Result<ExpenseRecord, finoffice_core::budget::BudgetError> {
        Ok(ExpenseRecord {
            id: self.id.into(),
            budget_entry_id: self.budget_entry_id.into(),
            name: self.name,
            amount: self.amount,
            category: self.category.parse::<ExpenseCategory>()?,
            description: self.description,
            expense_date: self.expense_date,
            created_by: self.created_by.map(Into::into),
            created_at: self.created_at.into(),
        })
    }
}

impl From<&ExpenseRecord> for ActiveModel {
    fn from(r: &ExpenseRecord) -> Self {
        Self {
            id: Set(r.id.into()),
            budget_entry_id: Set(r.budget_entry_id.into()),
            name: Set(r.name.clone()),
            amount: Set(r.amount),
            category: Set(r.category.as_str().to_string()),
            description: Set(r.description.clone()),
            expense_date: Set(r.expense_date),
            created_by: Set(r.created_by.map(Into::into)),
            created_at: Set(r.created_at.into()),
        }
    }
}
