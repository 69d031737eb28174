//! `SeaORM` Entity for object_code_levels table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "object_code_levels")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    SelfRef,
    #[sea_orm(has_many = "super::object_codes::Entity")]
    ObjectCodes,
}

impl Related<super::object_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ObjectCodes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for finoffice_core::catalog::ObjectCodeLevel {
    fn from(m: Model) -> Self {
        Self {
            id: m.id.into(),
            code: m.code,
            name: m.name,
            parent_id: m.parent_id.map(Into::into),
            is_active: m.is_active,
            created_at: m.created_at.into(),
            updated_at: m.updated_at.into(),
        }
    }
}
