//! `SeaORM` Entity for budget_entries table.

use finoffice_core::budget::{BudgetEntry, BudgetInputs, BudgetTotals};
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub object_code_id: Uuid,
    pub fiscal_year_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub aaa_total_allocation: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub first_release: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub second_release: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub third_release: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub fourth_release: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub supplementary_budget: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub additional_surrender: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub excess_reallocation: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub aaa_re_app: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub budget_withheld_lapse: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub aaa_expenditure: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub development_allocated: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub development_re_app: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub development_expenditure: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub pla_allocated: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub pla_re_app: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub pla_expenditure: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub uhi_allocated: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub uhi_re_app: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub uhi_expenditure: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub sum_of_released: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub total_aaa_budget: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub aaa_remaining: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub development_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub development_remaining: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub pla_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub pla_remaining: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub uhi_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub uhi_remaining: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub consolidated_total_budget: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub consolidated_total_expenditure: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub consolidated_remaining: Decimal,
    pub version: i32,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::object_codes::Entity",
        from = "Column::ObjectCodeId",
        to = "super::object_codes::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    ObjectCodes,
    #[sea_orm(
        belongs_to = "super::fiscal_years::Entity",
        from = "Column::FiscalYearId",
        to = "super::fiscal_years::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    FiscalYears,
    #[sea_orm(has_many = "super::expense_histories::Entity")]
    ExpenseHistories,
}

impl Related<super::object_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ObjectCodes.def()
    }
}

impl Related<super::fiscal_years::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FiscalYears.def()
    }
}

impl Related<super::expense_histories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseHistories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for BudgetEntry {
    fn from(m: Model) -> Self {
        Self {
            id: m.id.into(),
            object_code_id: m.object_code_id.into(),
            fiscal_year_id: m.fiscal_year_id.into(),
            inputs: BudgetInputs {
                aaa_total_allocation: m.aaa_total_allocation,
                first_release: m.first_release,
                second_release: m.second_release,
                third_release: m.third_release,
                fourth_release: m.fourth_release,
                supplementary_budget: m.supplementary_budget,
                additional_surrender: m.additional_surrender,
                excess_reallocation: m.excess_reallocation,
                aaa_re_app: m.aaa_re_app,
                budget_withheld_lapse: m.budget_withheld_lapse,
                aaa_expenditure: m.aaa_expenditure,
                development_allocated: m.development_allocated,
                development_re_app: m.development_re_app,
                development_expenditure: m.development_expenditure,
                pla_allocated: m.pla_allocated,
                pla_re_app: m.pla_re_app,
                pla_expenditure: m.pla_expenditure,
                uhi_allocated: m.uhi_allocated,
                uhi_re_app: m.uhi_re_app,
                uhi_expenditure: m.uhi_expenditure,
            },
            totals: BudgetTotals {
                sum_of_released: m.sum_of_released,
                total_aaa_budget: m.total_aaa_budget,
                aaa_remaining: m.aaa_remaining,
                development_total: m.development_total,
                development_remaining: m.development_remaining,
                pla_total: m.pla_total,
                pla_remaining: m.pla_remaining,
                uhi_total: m.uhi_total,
                uhi_remaining: m.uhi_remaining,
                consolidated_total_budget: m.consolidated_total_budget,
                consolidated_total_expenditure: m.consolidated_total_expenditure,
                consolidated_remaining: m.consolidated_remaining,
            },
            version: m.version,
            created_by: m.created_by.map(Into::into),
            updated_by: m.updated_by.map(Into::into),
            created_at: m.created_at.into(),
            updated_at: m.updated_at.into(),
        }
    }
}

impl ActiveModel {
    /// Active model carrying every column of `entry` except the primary key.
    ///
    /// The version is written as given; callers bump it.
    #[must_use]
    pub fn from_entry(entry: &BudgetEntry) -> Self {
        let i = &entry.inputs;
        let t = &entry.totals;
        Self {
            id: sea_orm::NotSet,
            object_code_id: Set(entry.object_code_id.into()),
            fiscal_year_id: Set(entry.fiscal_year_id.into()),
            aaa_total_allocation: Set(i.aaa_total_allocation),
            first_release: Set(i.first_release),
            second_release: Set(i.second_release),
            third_release: Set(i.third_release),
            fourth_release: Set(i.fourth_release),
            supplementary_budget: Set(i.supplementary_budget),
            additional_surrender: Set(i.additional_surrender),
            excess_reallocation: Set(i.excess_reallocation),
            aaa_re_app: Set(i.aaa_re_app),
            budget_withheld_lapse: Set(i.budget_withheld_lapse),
            aaa_expenditure: Set(i.aaa_expenditure),
            development_allocated: Set(i.development_allocated),
            development_re_app: Set(i.development_re_app),
            development_expenditure: Set(i.development_expenditure),
            pla_allocated: Set(i.pla_allocated),
            pla_re_app: Set(i.pla_re_app),
            pla_expenditure: Set(i.pla_expenditure),
            uhi_allocated: Set(i.uhi_allocated),
            uhi_re_app: Set(i.uhi_re_app),
            uhi_expenditure: Set(i.uhi_expenditure),
            sum_of_released: Set(t.sum_of_released),
            total_aaa_budget: Set(t.total_aaa_budget),
            aaa_remaining: Set(t.aaa_remaining),
            development_total: Set(t.development_total),
            development_remaining: Set(t.development_remaining),
            pla_total: Set(t.pla_total),
            pla_remaining: Set(t.pla_remaining),
            uhi_total: Set(t.uhi_total),
            uhi_remaining: Set(t.uhi_remaining),
            consolidated_total_budget: Set(t.consolidated_total_budget),
            consolidated_total_expenditure: Set(t.consolidated_total_expenditure),
            consolidated_remaining: Set(t.consolidated_remaining),
            version: Set(entry.version),
            created_by: Set(entry.created_by.map(Into::into)),
            updated_by: Set(entry.updated_by.map(Into::into)),
            created_at: Set(entry.created_at.into()),
            updated_at: Set(entry.updated_at.into()),
        }
    }
}
