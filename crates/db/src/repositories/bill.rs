//! Contingent bill repository: bills, schedule-of-payment lines and cheques.
//!
//! Each sign-off is read, checked by `WorkflowService` and written back in
//! one transaction with a version check.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use finoffice_core::workflow::{
    ApprovalStage, ApprovalTrail, BankForwarding, BillInput, BillStage, BillWorkflow, ChequeInput,
    ChequeStage, Decision, PaymentDeductions, ScheduleInput, ScheduleStage, WorkflowError,
    WorkflowService,
};
use finoffice_shared::types::{
    AsaanChequeId, ContingentBillId, ScheduleOfPaymentId, UserId,
};

use super::{is_unique_violation, update_versioned};
use crate::entities::{
    asaan_cheques, contingent_bills, fiscal_years, object_codes, schedule_of_payments,
};

const BILL: &str = "Contingent bill";
const SCHEDULE: &str = "Schedule of payment";
const CHEQUE: &str = "Cheque";

/// Sign-off state of one stage, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct StageView {
    /// Stage identifier, also the officer role.
    pub stage: &'static str,
    /// Display name.
    pub label: &'static str,
    /// Approval flag.
    pub approved: bool,
    /// True if this stage disallowed.
    pub disallowed: bool,
    /// When the officer acted.
    pub acted_at: Option<DateTime<Utc>>,
    /// Officer remarks.
    pub remarks: Option<String>,
    /// Officer who acted.
    pub acted_by: Option<UserId>,
}

fn stage_views<S: ApprovalStage>(trail: &ApprovalTrail<S>) -> Vec<StageView> {
    trail
        .iter()
        .map(|(stage, record)| StageView {
            stage: stage.as_str(),
            label: stage.label(),
            approved: record.approved,
            disallowed: record.is_disallowed(),
            acted_at: record.acted_at,
            remarks: record.remarks.clone(),
            acted_by: record.acted_by,
        })
        .collect()
}

/// A contingent bill.
#[derive(Debug, Clone, Serialize)]
pub struct BillView {
    /// Bill ID.
    pub id: ContingentBillId,
    /// Bill number.
    pub bill_number: String,
    /// Supplier name.
    pub supplier_name: String,
    /// Tender reference.
    pub tender_reference: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Bill amount.
    pub bill_amount: Decimal,
    /// Taxes and duties.
    pub taxes_duties: Decimal,
    /// Bill amount less taxes and duties.
    pub net_payment: Decimal,
    /// Caller-maintained status text.
    pub status: Option<String>,
    /// Derived workflow status label.
    pub workflow_status: String,
    /// Draft flag.
    pub is_draft: bool,
    /// Reason given on disallowance.
    pub disallowance_reason: Option<String>,
    /// Sign-offs in order.
    pub approvals: Vec<StageView>,
    /// Object code for budget context.
    pub object_code_id: Option<Uuid>,
    /// Fiscal year for budget context.
    pub fiscal_year_id: Option<Uuid>,
    /// Concurrency token.
    pub version: i32,
    /// Creator.
    pub created_by: Option<UserId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<contingent_bills::Model> for BillView {
    fn from(m: contingent_bills::Model) -> Self {
        let workflow = m.workflow();
        Self {
            id: m.id.into(),
            approvals: stage_views(&workflow.trail),
            workflow_status: workflow.status().as_str().to_string(),
            bill_number: m.bill_number,
            supplier_name: m.supplier_name,
            tender_reference: m.tender_reference,
            description: m.description,
            bill_amount: m.bill_amount,
            taxes_duties: m.taxes_duties,
            net_payment: m.net_payment,
            status: m.status,
            is_draft: m.is_draft,
            disallowance_reason: m.disallowance_reason,
            object_code_id: m.object_code_id,
            fiscal_year_id: m.fiscal_year_id,
            version: m.version,
            created_by: m.created_by.map(Into::into),
            created_at: m.created_at.into(),
            updated_at: m.updated_at.into(),
        }
    }
}

/// A schedule-of-payment line.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleView {
    /// Line ID.
    pub id: ScheduleOfPaymentId,
    /// Owning bill.
    pub contingent_bill_id: ContingentBillId,
    /// Payee.
    pub payee_name: String,
    /// Description.
    pub description: Option<String>,
    /// Gross amount and deductions.
    #[serde(flatten)]
    pub amounts: PaymentDeductions,
    /// Gross less deductions.
    pub net_amount: Decimal,
    /// Caller-maintained status text.
    pub status: Option<String>,
    /// Sign-offs in order.
    pub approvals: Vec<StageView>,
    /// True once every stage approved.
    pub fully_approved: bool,
    /// Concurrency token.
    pub version: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<schedule_of_payments::Model> for ScheduleView {
    fn from(m: schedule_of_payments::Model) -> Self {
        let trail = m.trail();
        Self {
            id: m.id.into(),
            contingent_bill_id: m.contingent_bill_id.into(),
            amounts: m.amounts(),
            approvals: stage_views(&trail),
            fully_approved: trail.is_complete(),
            payee_name: m.payee_name,
            description: m.description,
            net_amount: m.net_amount,
            status: m.status,
            version: m.version,
            created_at: m.created_at.into(),
            updated_at: m.updated_at.into(),
        }
    }
}

/// An Asaan cheque.
#[derive(Debug, Clone, Serialize)]
pub struct ChequeView {
    /// Cheque ID.
    pub id: AsaanChequeId,
    /// Owning schedule line.
    pub schedule_of_payment_id: ScheduleOfPaymentId,
    /// Cheque number.
    pub cheque_number: String,
    /// Amount.
    pub amount: Decimal,
    /// Cheque date.
    pub cheque_date: NaiveDate,
    /// Caller-maintained status text.
    pub status: Option<String>,
    /// Sign-offs in order.
    pub approvals: Vec<StageView>,
    /// Bank forwarding, once recorded.
    pub forwarding: Option<BankForwarding>,
    /// Concurrency token.
    pub version: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<asaan_cheques::Model> for ChequeView {
    fn from(m: asaan_cheques::Model) -> Self {
        Self {
            id: m.id.into(),
            schedule_of_payment_id: m.schedule_of_payment_id.into(),
            approvals: stage_views(&m.trail()),
            forwarding: m.forwarding(),
            cheque_number: m.cheque_number,
            amount: m.amount,
            cheque_date: m.cheque_date,
            status: m.status,
            version: m.version,
            created_at: m.created_at.into(),
            updated_at: m.updated_at.into(),
        }
    }
}

/// A bill with its schedule lines and their cheques.
#[derive(Debug, Clone, Serialize)]
pub struct BillDetail {
    /// The bill.
    #[serde(flatten)]
    pub bill: BillView,
    /// Schedule lines, oldest first.
    pub schedules: Vec<ScheduleView>,
    /// Cheques of all lines, oldest first.
    pub cheques: Vec<ChequeView>,
}

/// Repository for the bill workflow.
#[derive(Debug, Clone)]
pub struct BillRepository {
    db: DatabaseConnection,
}

impl BillRepository {
    /// Creates a new bill repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Bills
    // ========================================================================

    /// Lists bills, newest first, optionally by workflow status label.
    pub async fn list(&self, workflow_status: Option<&str>) -> Result<Vec<BillView>, WorkflowError> {
        let mut query = contingent_bills::Entity::find();
        if let Some(status) = workflow_status {
            query = query.filter(contingent_bills::Column::WorkflowStatus.eq(status));
        }

        let bills = query
            .order_by_desc(contingent_bills::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;

        Ok(bills.into_iter().map(Into::into).collect())
    }

    /// Loads a bill with its schedule lines and cheques.
    pub async fn get(&self, id: ContingentBillId) -> Result<BillDetail, WorkflowError> {
        let bill = find_bill(&self.db, id.into_inner()).await?;

        let schedules = schedule_of_payments::Entity::find()
            .filter(schedule_of_payments::Column::ContingentBillId.eq(bill.id))
            .order_by_asc(schedule_of_payments::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;

        let cheques = asaan_cheques::Entity::find()
            .filter(
                asaan_cheques::Column::ScheduleOfPaymentId
                    .is_in(schedules.iter().map(|s| s.id).collect::<Vec<_>>()),
            )
            .order_by_asc(asaan_cheques::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;

        Ok(BillDetail {
            bill: bill.into(),
            schedules: schedules.into_iter().map(Into::into).collect(),
            cheques: cheques.into_iter().map(Into::into).collect(),
        })
    }

    /// Creates a draft bill.
    ///
    /// # Errors
    ///
    /// * `Validation` for a bad payload
    /// * `InvalidReference` for an unknown object code or fiscal year
    /// * `DuplicateBillNumber` if the number is taken
    pub async fn create(
        &self,
        input: BillInput,
        actor: Option<UserId>,
    ) -> Result<BillView, WorkflowError> {
        let input = WorkflowService::validate_bill(input)?;
        self.check_references(&input).await?;

        let now = Utc::now().into();
        let mut model = contingent_bills::ActiveModel {
            id: Set(ContingentBillId::new().into_inner()),
            created_by: Set(actor.map(Into::into)),
            version: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        set_bill_fields(&mut model, &input);
        model.set_workflow(&BillWorkflow::draft());

        let bill = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                WorkflowError::DuplicateBillNumber(input.bill_number.clone())
            } else {
                WorkflowError::Database(e.to_string())
            }
        })?;

        info!(bill_id = %bill.id, bill_number = %bill.bill_number, "Contingent bill created");
        Ok(bill.into())
    }

    /// Replaces a draft bill's fields.
    ///
    /// # Errors
    ///
    /// `NotEditable` once submitted, otherwise as [`Self::create`] plus
    /// `NotFound` and `VersionConflict`.
    pub async fn update(
        &self,
        id: ContingentBillId,
        input: BillInput,
        expected_version: Option<i32>,
    ) -> Result<BillView, WorkflowError> {
        let input = WorkflowService::validate_bill(input)?;
        self.check_references(&input).await?;

        let taken = contingent_bills::Entity::find()
            .filter(contingent_bills::Column::BillNumber.eq(input.bill_number.as_str()))
            .filter(contingent_bills::Column::Id.ne(id.into_inner()))
            .one(&self.db)
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;
        if taken.is_some() {
            return Err(WorkflowError::DuplicateBillNumber(input.bill_number));
        }

        self.modify_bill(id, expected_version, |model, active| {
            WorkflowService::ensure_editable(&model.workflow())?;
            set_bill_fields(active, &input);
            Ok(())
        })
        .await
    }

    /// Deletes a bill with its schedule lines and cheques.
    pub async fn delete(&self, id: ContingentBillId) -> Result<(), WorkflowError> {
        let result = contingent_bills::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(WorkflowError::NotFound {
                kind: BILL,
                id: id.into_inner(),
            });
        }

        info!(bill_id = %id, "Contingent bill deleted");
        Ok(())
    }

    /// Submits a draft bill for sign-off.
    pub async fn submit(
        &self,
        id: ContingentBillId,
        expected_version: Option<i32>,
    ) -> Result<BillView, WorkflowError> {
        let bill = self
            .modify_bill(id, expected_version, |model, active| {
                let mut workflow = model.workflow();
                WorkflowService::submit(&mut workflow)?;
                active.set_workflow(&workflow);
                Ok(())
            })
            .await?;

        info!(bill_id = %id, "Contingent bill submitted");
        Ok(bill)
    }

    /// Records an officer's decision on a bill stage.
    pub async fn decide(
        &self,
        id: ContingentBillId,
        stage: BillStage,
        decision: &Decision,
        actor: Option<UserId>,
        expected_version: Option<i32>,
    ) -> Result<BillView, WorkflowError> {
        let bill = self
            .modify_bill(id, expected_version, |model, active| {
                let mut workflow = model.workflow();
                WorkflowService::decide_bill(&mut workflow, stage, decision, actor, Utc::now())?;
                active.set_workflow(&workflow);
                Ok(())
            })
            .await?;

        info!(
            bill_id = %id,
            stage = stage.as_str(),
            approve = decision.approve,
            workflow_status = %bill.workflow_status,
            "Bill decision recorded"
        );
        Ok(bill)
    }

    // ========================================================================
    // Schedule of payments
    // ========================================================================

    /// Adds a schedule line to a bill.
    pub async fn add_schedule(
        &self,
        bill_id: ContingentBillId,
        input: ScheduleInput,
    ) -> Result<ScheduleView, WorkflowError> {
        let input = WorkflowService::validate_schedule(input)?;
        find_bill(&self.db, bill_id.into_inner()).await?;

        let now = Utc::now().into();
        let mut model = schedule_of_payments::ActiveModel {
            id: Set(ScheduleOfPaymentId::new().into_inner()),
            contingent_bill_id: Set(bill_id.into_inner()),
            payee_name: Set(input.payee_name),
            description: Set(input.description),
            status: Set(input.status),
            version: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        model.set_amounts(&input.amounts);
        model.set_trail(&ApprovalTrail::new());

        let line = model
            .insert(&self.db)
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;

        info!(schedule_id = %line.id, %bill_id, net_amount = %line.net_amount, "Schedule line added");
        Ok(line.into())
    }

    /// Replaces a schedule line's payee, amounts and status text.
    pub async fn update_schedule(
        &self,
        id: ScheduleOfPaymentId,
        input: ScheduleInput,
        expected_version: Option<i32>,
    ) -> Result<ScheduleView, WorkflowError> {
        let input = WorkflowService::validate_schedule(input)?;
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;

        let line = find_schedule(&txn, id.into_inner()).await?;
        check_version(SCHEDULE, line.id, line.version, expected_version)?;

        let read_version = line.version;
        let mut active = line.into_active_model();
        active.payee_name = Set(input.payee_name);
        active.description = Set(input.description);
        active.status = Set(input.status);
        active.set_amounts(&input.amounts);
        active.version = Set(read_version + 1);
        active.updated_at = Set(Utc::now().into());

        save(&txn, active, SCHEDULE, id.into_inner(), read_version).await?;
        let line = find_schedule(&txn, id.into_inner()).await?;
        commit(txn).await?;

        Ok(line.into())
    }

    /// Records an officer's decision on a schedule line stage.
    pub async fn decide_schedule(
        &self,
        id: ScheduleOfPaymentId,
        stage: ScheduleStage,
        decision: &Decision,
        actor: Option<UserId>,
        expected_version: Option<i32>,
    ) -> Result<ScheduleView, WorkflowError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;

        let line = find_schedule(&txn, id.into_inner()).await?;
        check_version(SCHEDULE, line.id, line.version, expected_version)?;

        let mut trail = line.trail();
        WorkflowService::advance(&mut trail, stage, decision, actor, Utc::now())?;

        let read_version = line.version;
        let mut active = line.into_active_model();
        active.set_trail(&trail);
        active.version = Set(read_version + 1);
        active.updated_at = Set(Utc::now().into());

        save(&txn, active, SCHEDULE, id.into_inner(), read_version).await?;
        let line = find_schedule(&txn, id.into_inner()).await?;
        commit(txn).await?;

        info!(schedule_id = %id, stage = stage.as_str(), approve = decision.approve, "Schedule decision recorded");
        Ok(line.into())
    }

    // ========================================================================
    // Cheques
    // ========================================================================

    /// Adds a cheque to a schedule line.
    pub async fn add_cheque(
        &self,
        schedule_id: ScheduleOfPaymentId,
        input: ChequeInput,
    ) -> Result<ChequeView, WorkflowError> {
        let input = WorkflowService::validate_cheque(input)?;
        find_schedule(&self.db, schedule_id.into_inner()).await?;

        let now = Utc::now().into();
        let mut model = asaan_cheques::ActiveModel {
            id: Set(AsaanChequeId::new().into_inner()),
            schedule_of_payment_id: Set(schedule_id.into_inner()),
            cheque_number: Set(input.cheque_number),
            amount: Set(input.amount),
            cheque_date: Set(input.cheque_date),
            status: Set(input.status),
            bank_reference_number: Set(None),
            forwarded_on: Set(None),
            version: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        model.set_trail(&ApprovalTrail::new());

        let cheque = model
            .insert(&self.db)
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;

        info!(cheque_id = %cheque.id, %schedule_id, "Cheque added");
        Ok(cheque.into())
    }

    /// Records an officer's decision on a cheque stage.
    pub async fn decide_cheque(
        &self,
        id: AsaanChequeId,
        stage: ChequeStage,
        decision: &Decision,
        actor: Option<UserId>,
        expected_version: Option<i32>,
    ) -> Result<ChequeView, WorkflowError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;

        let cheque = find_cheque(&txn, id.into_inner()).await?;
        check_version(CHEQUE, cheque.id, cheque.version, expected_version)?;

        let mut trail = cheque.trail();
        WorkflowService::advance(&mut trail, stage, decision, actor, Utc::now())?;

        let read_version = cheque.version;
        let mut active = cheque.into_active_model();
        active.set_trail(&trail);
        active.version = Set(read_version + 1);
        active.updated_at = Set(Utc::now().into());

        save(&txn, active, CHEQUE, id.into_inner(), read_version).await?;
        let cheque = find_cheque(&txn, id.into_inner()).await?;
        commit(txn).await?;

        info!(cheque_id = %id, stage = stage.as_str(), approve = decision.approve, "Cheque decision recorded");
        Ok(cheque.into())
    }

    /// Records that a fully approved cheque was forwarded to the bank.
    pub async fn forward_cheque(
        &self,
        id: AsaanChequeId,
        reference_number: &str,
        forwarded_on: Option<NaiveDate>,
        expected_version: Option<i32>,
    ) -> Result<ChequeView, WorkflowError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;

        let cheque = find_cheque(&txn, id.into_inner()).await?;
        check_version(CHEQUE, cheque.id, cheque.version, expected_version)?;

        let forwarding = WorkflowService::forward_cheque(
            &cheque.trail(),
            cheque.forwarding().as_ref(),
            reference_number,
            forwarded_on.unwrap_or_else(|| Utc::now().date_naive()),
        )?;

        let read_version = cheque.version;
        let mut active = cheque.into_active_model();
        active.bank_reference_number = Set(Some(forwarding.reference_number.clone()));
        active.forwarded_on = Set(Some(forwarding.forwarded_on));
        active.version = Set(read_version + 1);
        active.updated_at = Set(Utc::now().into());

        save(&txn, active, CHEQUE, id.into_inner(), read_version).await?;
        let cheque = find_cheque(&txn, id.into_inner()).await?;
        commit(txn).await?;

        info!(
            cheque_id = %id,
            reference_number = %forwarding.reference_number,
            "Cheque forwarded to bank"
        );
        Ok(cheque.into())
    }

    async fn modify_bill<F>(
        &self,
        id: ContingentBillId,
        expected_version: Option<i32>,
        change: F,
    ) -> Result<BillView, WorkflowError>
    where
        F: FnOnce(&contingent_bills::Model, &mut contingent_bills::ActiveModel) -> Result<(), WorkflowError>,
    {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;

        let bill = find_bill(&txn, id.into_inner()).await?;
        check_version(BILL, bill.id, bill.version, expected_version)?;

        let read_version = bill.version;
        let mut active = bill.clone().into_active_model();
        change(&bill, &mut active)?;
        active.version = Set(read_version + 1);
        active.updated_at = Set(Utc::now().into());

        save(&txn, active, BILL, id.into_inner(), read_version).await?;
        let bill = find_bill(&txn, id.into_inner()).await?;
        commit(txn).await?;

        Ok(bill.into())
    }

    async fn check_references(&self, input: &BillInput) -> Result<(), WorkflowError> {
        if let Some(id) = input.object_code_id {
            let found = object_codes::Entity::find_by_id(id.into_inner())
                .one(&self.db)
                .await
                .map_err(|e| WorkflowError::Database(e.to_string()))?;
            if found.is_none() {
                return Err(WorkflowError::InvalidReference(format!("object code {id}")));
            }
        }
        if let Some(id) = input.fiscal_year_id {
            let found = fiscal_years::Entity::find_by_id(id.into_inner())
                .one(&self.db)
                .await
                .map_err(|e| WorkflowError::Database(e.to_string()))?;
            if found.is_none() {
                return Err(WorkflowError::InvalidReference(format!("fiscal year {id}")));
            }
        }
        Ok(())
    }
}

fn set_bill_fields(active: &mut contingent_bills::ActiveModel, input: &BillInput) {
    active.bill_number = Set(input.bill_number.clone());
    active.supplier_name = Set(input.supplier_name.clone());
    active.tender_reference = Set(input.tender_reference.clone());
    active.description = Set(input.description.clone());
    active.bill_amount = Set(input.bill_amount);
    active.taxes_duties = Set(input.taxes_duties);
    active.net_payment = Set(input.net_payment());
    active.status = Set(input.status.clone());
    active.object_code_id = Set(input.object_code_id.map(Into::into));
    active.fiscal_year_id = Set(input.fiscal_year_id.map(Into::into));
}

fn check_version(
    kind: &'static str,
    id: Uuid,
    actual: i32,
    expected: Option<i32>,
) -> Result<(), WorkflowError> {
    match expected {
        Some(v) if v != actual => {
            warn!(%id, expected = v, actual, "Stale {kind} version");
            Err(WorkflowError::VersionConflict { kind, id })
        }
        _ => Ok(()),
    }
}

async fn save<A, C>(
    db: &C,
    active: A,
    kind: &'static str,
    id: Uuid,
    read_version: i32,
) -> Result<(), WorkflowError>
where
    A: ActiveModelTrait,
    A::Entity: VersionedEntity,
    C: ConnectionTrait,
{
    let matched = update_versioned(
        db,
        active,
        <A::Entity as VersionedEntity>::id_column(),
        id,
        <A::Entity as VersionedEntity>::version_column(),
        read_version,
    )
    .await
    .map_err(|e| WorkflowError::Database(e.to_string()))?;

    if !matched {
        warn!(%id, "{kind} modified concurrently");
        return Err(WorkflowError::VersionConflict { kind, id });
    }
    Ok(())
}

/// Entities carrying `id` and `version` columns.
trait VersionedEntity: EntityTrait {
    fn id_column() -> Self::Column;
    fn version_column() -> Self::Column;
}

impl VersionedEntity for contingent_bills::Entity {
    fn id_column() -> Self::Column {
        contingent_bills::Column::Id
    }
    fn version_column() -> Self::Column {
        contingent_bills::Column::Version
    }
}

impl VersionedEntity for schedule_of_payments::Entity {
    fn id_column() -> Self::Column {
        schedule_of_payments::Column::Id
    }
    fn version_column() -> Self::Column {
        schedule_of_payments::Column::Version
    }
}

impl VersionedEntity for asaan_cheques::Entity {
    fn id_column() -> Self::Column {
        asaan_cheques::Column::Id
    }
    fn version_column() -> Self::Column {
        asaan_cheques::Column::Version
    }
}

async fn commit(txn: sea_orm::DatabaseTransaction) -> Result<(), WorkflowError> {
    txn.commit()
        .await
        .map_err(|e| WorkflowError::Database(e.to_string()))
}

async fn find_bill<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<contingent_bills::Model, WorkflowError> {
    contingent_bills::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| WorkflowError::Database(e.to_string()))?
        .ok_or(WorkflowError::NotFound { kind: BILL, id })
}

async fn find_schedule<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<schedule_of_payments::Model, WorkflowError> {
    schedule_of_payments::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| WorkflowError::Database(e.to_string()))?
        .ok_or(WorkflowError::NotFound { kind: SCHEDULE, id })
}

async fn find_cheque<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<asaan_cheques::Model, WorkflowError> {
    asaan_cheques::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| WorkflowError::Database(e.to_string()))?
        .ok_or(WorkflowError::NotFound { kind: CHEQUE, id })
}
