//! `SeaORM` Entity for asaan_cheques table.

use finoffice_core::workflow::{ApprovalTrail, BankForwarding, ChequeStage};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{read_stage, write_stage};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "asaan_cheques")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub schedule_of_payment_id: Uuid,
    pub cheque_number: String,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub amount: Decimal,
    pub cheque_date: Date,
    pub status: Option<String>,
    pub director_finance_approved: bool,
    pub director_finance_approved_at: Option<DateTimeWithTimeZone>,
    pub director_finance_remarks: Option<String>,
    pub director_finance_approved_by: Option<Uuid>,
    pub executive_director_approved: bool,
    pub executive_director_approved_at: Option<DateTimeWithTimeZone>,
    pub executive_director_remarks: Option<String>,
    pub executive_director_approved_by: Option<Uuid>,
    pub bank_reference_number: Option<String>,
    pub forwarded_on: Option<Date>,
    pub version: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::schedule_of_payments::Entity",
        from = "Column::ScheduleOfPaymentId",
        to = "super::schedule_of_payments::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ScheduleOfPayments,
}

impl Related<super::schedule_of_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ScheduleOfPayments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Sign-off trail of the cheque.
    #[must_use]
    pub fn trail(&self) -> ApprovalTrail<ChequeStage> {
        ApprovalTrail::from_records(vec![
            read_stage!(self, director_finance_approved, director_finance_approved_at, director_finance_remarks, director_finance_approved_by),
            read_stage!(self, executive_director_approved, executive_director_approved_at, executive_director_remarks, executive_director_approved_by),
        ])
    }

    /// Bank forwarding, once recorded.
    #[must_use]
    pub fn forwarding(&self) -> Option<BankForwarding> {
        match (&self.bank_reference_number, self.forwarded_on) {
            (Some(reference_number), Some(forwarded_on)) => Some(BankForwarding {
                reference_number: reference_number.clone(),
                forwarded_on,
            }),
            _ => None,
        }
    }
}

impl ActiveModel {
    /// Writes the sign-off trail.
    pub fn set_trail(&mut self, trail: &ApprovalTrail<ChequeStage>) {
        write_stage!(self, trail.record(ChequeStage::DirectorFinance), director_finance_approved, director_finance_approved_at, director_finance_remarks, director_finance_approved_by);
        write_stage!(self, trail.record(ChequeStage::ExecutiveDirector), executive_director_approved, executive_director_approved_at, executive_director_remarks, executive_director_approved_by);
    }
}
