//! `SeaORM` Entity for contingent_bills table.

use finoffice_core::workflow::{ApprovalTrail, BillStage, BillWorkflow};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{read_stage, write_stage};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "contingent_bills")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub bill_number: String,
    pub supplier_name: String,
    pub tender_reference: Option<String>,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub bill_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub taxes_duties: Decimal,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub net_payment: Decimal,
    pub status: Option<String>,
    pub workflow_status: String,
    pub is_draft: bool,
    pub disallowance_reason: Option<String>,
    pub account_officer_approved: bool,
    pub account_officer_approved_at: Option<DateTimeWithTimeZone>,
    pub account_officer_remarks: Option<String>,
    pub account_officer_approved_by: Option<Uuid>,
    pub accountant_approved: bool,
    pub accountant_approved_at: Option<DateTimeWithTimeZone>,
    pub accountant_remarks: Option<String>,
    pub accountant_approved_by: Option<Uuid>,
    pub audit_officer_approved: bool,
    pub audit_officer_approved_at: Option<DateTimeWithTimeZone>,
    pub audit_officer_remarks: Option<String>,
    pub audit_officer_approved_by: Option<Uuid>,
    pub senior_budget_officer_approved: bool,
    pub senior_budget_officer_approved_at: Option<DateTimeWithTimeZone>,
    pub senior_budget_officer_remarks: Option<String>,
    pub senior_budget_officer_approved_by: Option<Uuid>,
    pub director_finance_approved: bool,
    pub director_finance_approved_at: Option<DateTimeWithTimeZone>,
    pub director_finance_remarks: Option<String>,
    pub director_finance_approved_by: Option<Uuid>,
    pub executive_director_approved: bool,
    pub executive_director_approved_at: Option<DateTimeWithTimeZone>,
    pub executive_director_remarks: Option<String>,
    pub executive_director_approved_by: Option<Uuid>,
    pub object_code_id: Option<Uuid>,
    pub fiscal_year_id: Option<Uuid>,
    pub version: i32,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::schedule_of_payments::Entity")]
    ScheduleOfPayments,
    #[sea_orm(
        belongs_to = "super::object_codes::Entity",
        from = "Column::ObjectCodeId",
        to = "super::object_codes::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    ObjectCodes,
    #[sea_orm(
        belongs_to = "super::fiscal_years::Entity",
        from = "Column::FiscalYearId",
        to = "super::fiscal_years::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    FiscalYears,
}

impl Related<super::schedule_of_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduleOfPayments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Sign-off state of the bill.
    #[must_use]
    pub fn workflow(&self) -> BillWorkflow {
        let records = vec![
            read_stage!(self, account_officer_approved, account_officer_approved_at, account_officer_remarks, account_officer_approved_by),
            read_stage!(self, accountant_approved, accountant_approved_at, accountant_remarks, accountant_approved_by),
            read_stage!(self, audit_officer_approved, audit_officer_approved_at, audit_officer_remarks, audit_officer_approved_by),
            read_stage!(self, senior_budget_officer_approved, senior_budget_officer_approved_at, senior_budget_officer_remarks, senior_budget_officer_approved_by),
            read_stage!(self, director_finance_approved, director_finance_approved_at, director_finance_remarks, director_finance_approved_by),
            read_stage!(self, executive_director_approved, executive_director_approved_at, executive_director_remarks, executive_director_approved_by),
        ];
        BillWorkflow {
            is_draft: self.is_draft,
            trail: ApprovalTrail::from_records(records),
            disallowance_reason: self.disallowance_reason.clone(),
        }
    }
}

impl ActiveModel {
    /// Writes the bill's sign-off state, including the derived status label.
    pub fn set_workflow(&mut self, workflow: &BillWorkflow) {
        let t = &workflow.trail;
        write_stage!(self, t.record(BillStage::AccountOfficer), account_officer_approved, account_officer_approved_at, account_officer_remarks, account_officer_approved_by);
        write_stage!(self, t.record(BillStage::Accountant), accountant_approved, accountant_approved_at, accountant_remarks, accountant_approved_by);
        write_stage!(self, t.record(BillStage::AuditOfficer), audit_officer_approved, audit_officer_approved_at, audit_officer_remarks, audit_officer_approved_by);
        write_stage!(self, t.record(BillStage::SeniorBudgetOfficer), senior_budget_officer_approved, senior_budget_officer_approved_at, senior_budget_officer_remarks, senior_budget_officer_approved_by);
        write_stage!(self, t.record(BillStage::DirectorFinance), director_finance_approved, director_finance_approved_at, director_finance_remarks, director_finance_approved_by);
        write_stage!(self, t.record(BillStage::ExecutiveDirector), executive_director_approved, executive_director_approved_at, executive_director_remarks, executive_director_approved_by);
        self.is_draft = sea_orm::Set(workflow.is_draft);
        self.disallowance_reason = sea_orm::Set(workflow.disallowance_reason.clone());
        self.workflow_status = sea_orm::Set(workflow.status().as_str().to_string());
    }
}
