//! `SeaORM` Entity for schedule_of_payments table.

use finoffice_core::workflow::{ApprovalTrail, PaymentDeductions, ScheduleStage};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{read_stage, write_stage};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "schedule_of_payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contingent_bill_id: Uuid,
    pub payee_name: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub gross_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub stamp_duty: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub income_tax: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub gst: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub pst: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub net_amount: Decimal,
    pub status: Option<String>,
    pub accountant_approved: bool,
    pub accountant_approved_at: Option<DateTimeWithTimeZone>,
    pub accountant_remarks: Option<String>,
    pub accountant_approved_by: Option<Uuid>,
    pub budget_officer_approved: bool,
    pub budget_officer_approved_at: Option<DateTimeWithTimeZone>,
    pub budget_officer_remarks: Option<String>,
    pub budget_officer_approved_by: Option<Uuid>,
    pub audit_officer_approved: bool,
    pub audit_officer_approved_at: Option<DateTimeWithTimeZone>,
    pub audit_officer_remarks: Option<String>,
    pub audit_officer_approved_by: Option<Uuid>,
    pub accounts_officer_approved: bool,
    pub accounts_officer_approved_at: Option<DateTimeWithTimeZone>,
    pub accounts_officer_remarks: Option<String>,
    pub accounts_officer_approved_by: Option<Uuid>,
    pub director_finance_approved: bool,
    pub director_finance_approved_at: Option<DateTimeWithTimeZone>,
    pub director_finance_remarks: Option<String>,
    pub director_finance_approved_by: Option<Uuid>,
    pub executive_director_approved: bool,
    pub executive_director_approved_at: Option<DateTimeWithTimeZone>,
    pub executive_director_remarks: Option<String>,
    pub executive_director_approved_by: Option<Uuid>,
    pub version: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contingent_bills::Entity",
        from = "Column::ContingentBillId",
        to = "super::contingent_bills::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ContingentBills,
    #[sea_orm(has_many = "super::asaan_cheques::Entity")]
    AsaanCheques,
}

impl Related<super::contingent_bills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContingentBills.def()
    }
}

impl Related<super::asaan_cheques::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AsaanCheques.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Sign-off trail of the line.
    #[must_use]
    pub fn trail(&self) -> ApprovalTrail<ScheduleStage> {
        ApprovalTrail::from_records(vec![
            read_stage!(self, accountant_approved, accountant_approved_at, accountant_remarks, accountant_approved_by),
            read_stage!(self, budget_officer_approved, budget_officer_approved_at, budget_officer_remarks, budget_officer_approved_by),
            read_stage!(self, audit_officer_approved, audit_officer_approved_at, audit_officer_remarks, audit_officer_approved_by),
            read_stage!(self, accounts_officer_approved, accounts_officer_approved_at, accounts_officer_remarks, accounts_officer_approved_by),
            read_stage!(self, director_finance_approved, director_finance_approved_at, director_finance_remarks, director_finance_approved_by),
            read_stage!(self, executive_director_approved, executive_director_approved_at, executive_director_remarks, executive_director_approved_by),
        ])
    }

    /// Gross amount and deductions.
    #[must_use]
    pub const fn amounts(&self) -> PaymentDeductions {
        PaymentDeductions {
            gross_amount: self.gross_amount,
            stamp_duty: self.stamp_duty,
            income_tax: self.income_tax,
            gst: self.gst,
            pst: self.pst,
        }
    }
}

impl ActiveModel {
    /// Writes the sign-off trail.
    pub fn set_trail(&mut self, trail: &ApprovalTrail<ScheduleStage>) {
        write_stage!(self, trail.record(ScheduleStage::Accountant), accountant_approved, accountant_approved_at, accountant_remarks, accountant_approved_by);
        write_stage!(self, trail.record(ScheduleStage::BudgetOfficer), budget_officer_approved, budget_officer_approved_at, budget_officer_remarks, budget_officer_approved_by);
        write_stage!(self, trail.record(ScheduleStage::AuditOfficer), audit_officer_approved, audit_officer_approved_at, audit_officer_remarks, audit_officer_approved_by);
        write_stage!(self, trail.record(ScheduleStage::AccountsOfficer), accounts_officer_approved, accounts_officer_approved_at, accounts_officer_remarks, accounts_officer_approved_by);
        write_stage!(self, trail.record(ScheduleStage::DirectorFinance), director_finance_approved, director_finance_approved_at, director_finance_remarks, director_finance_approved_by);
        write_stage!(self, trail.record(ScheduleStage::ExecutiveDirector), executive_director_approved, executive_director_approved_at, executive_director_remarks, executive_director_approved_by);
    }

    /// Writes the amounts and the derived net amount.
    pub fn set_amounts(&mut self, amounts: &PaymentDeductions) {
        self.gross_amount = sea_orm::Set(amounts.gross_amount);
        self.stamp_duty = sea_orm::Set(amounts.stamp_duty);
        self.income_tax = sea_orm::Set(amounts.income_tax);
        self.gst = sea_orm::Set(amounts.gst);
        self.pst = sea_orm::Set(amounts.pst);
        self.net_amount = sea_orm::Set(amounts.net_amount());
    }
}
