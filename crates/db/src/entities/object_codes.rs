//! `SeaORM` Entity for object_codes table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "object_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub head_of_account: String,
    pub level_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::object_code_levels::Entity",
        from = "Column::LevelId",
        to = "super::object_code_levels::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    ObjectCodeLevels,
    #[sea_orm(has_many = "super::budget_entries::Entity")]
    BudgetEntries,
}

impl Related<super::object_code_levels::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ObjectCodeLevels.def()
    }
}

impl Related<super::budget_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for finoffice_core::catalog::ObjectCode {
    fn from(m: Model) -> Self {
        Self {
            id: m.id.into(),
            code: m.code,
            head_of_account: m.head_of_account,
            level_id: m.level_id.map(Into::into),
            is_active: m.is_active,
            created_at: m.created_at.into(),
            updated_at: m.updated_at.into(),
        }
    }
}
