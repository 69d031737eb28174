//! Workflow domain types for bill, schedule and cheque sign-off.

use chrono::{DateTime, NaiveDate, Utc};
use finoffice_shared::types::UserId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflow::stage::{ApprovalStage, BillStage};

/// Sign-off state of one stage.
///
/// `acted_at` is set both on approval and on disallowance, so a record with
/// `acted_at` and `approved == false` is a disallowance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRecord {
    /// Approval flag.
    pub approved: bool,
    /// When the officer acted.
    pub acted_at: Option<DateTime<Utc>>,
    /// Officer remarks.
    pub remarks: Option<String>,
    /// Officer who acted.
    pub acted_by: Option<UserId>,
}

impl StageRecord {
    /// True if the officer disallowed at this stage.
    #[must_use]
    pub const fn is_disallowed(&self) -> bool {
        !self.approved && self.acted_at.is_some()
    }
}

/// An officer's decision on a stage.
#[derive(Debug, Clone, Deserialize)]
pub struct Decision {
    /// `true` to approve, `false` to disallow.
    pub approve: bool,
    /// Remarks; required when disallowing.
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Where an approval chain currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailProgress<S: ApprovalStage> {
    /// Waiting for this stage.
    Pending(S),
    /// Every stage approved.
    Complete,
    /// Closed by a disallowance at this stage.
    Disallowed(S),
}

/// Per-stage records of one document, indexed by [`ApprovalStage::ORDER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalTrail<S: ApprovalStage> {
    records: Vec<StageRecord>,
    _stage: std::marker::PhantomData<S>,
}

impl<S: ApprovalStage> Default for ApprovalTrail<S> {
    fn default() -> Self {
        Self {
            records: vec![StageRecord::default(); S::ORDER.len()],
            _stage: std::marker::PhantomData,
        }
    }
}

impl<S: ApprovalStage> ApprovalTrail<S> {
    /// Creates an empty trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a trail from stored records; missing stages are blank and
    /// extra records are dropped.
    #[must_use]
    pub fn from_records(mut records: Vec<StageRecord>) -> Self {
        records.resize(S::ORDER.len(), StageRecord::default());
        Self {
            records,
            _stage: std::marker::PhantomData,
        }
    }

    /// Record of one stage.
    #[must_use]
    pub fn record(&self, stage: S) -> &StageRecord {
        &self.records[stage.index()]
    }

    pub(crate) fn record_mut(&mut self, stage: S) -> &mut StageRecord {
        &mut self.records[stage.index()]
    }

    /// Stage records paired with their stage, in sign-off order.
    pub fn iter(&self) -> impl Iterator<Item = (S, &StageRecord)> {
        S::ORDER.iter().copied().zip(self.records.iter())
    }

    /// Current progress of the chain.
    #[must_use]
    pub fn progress(&self) -> TrailProgress<S> {
        for (stage, record) in self.iter() {
            if record.is_disallowed() {
                return TrailProgress::Disallowed(stage);
            }
            if !record.approved {
                return TrailProgress::Pending(stage);
            }
        }
        TrailProgress::Complete
    }

    /// True once every stage is approved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress() == TrailProgress::Complete
    }
}

/// Overall state of a contingent bill.
///
/// `Submitted` is the Account Officer review; each later review state names
/// the stage being waited on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillStatus {
    /// Being prepared; editable.
    Draft,
    /// Submitted; waiting for the Account Officer.
    Submitted,
    /// Waiting for a later stage.
    InReview(BillStage),
    /// Every stage approved.
    Approved,
    /// Closed by a disallowance.
    Disallowed,
}

impl BillStatus {
    /// Derives the status from the draft flag and the trail.
    #[must_use]
    pub fn derive(is_draft: bool, trail: &ApprovalTrail<BillStage>) -> Self {
        if is_draft {
            return Self::Draft;
        }
        match trail.progress() {
            TrailProgress::Pending(BillStage::AccountOfficer) => Self::Submitted,
            TrailProgress::Pending(stage) => Self::InReview(stage),
            TrailProgress::Complete => Self::Approved,
            TrailProgress::Disallowed(_) => Self::Disallowed,
        }
    }

    /// Stored `workflow_status` label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::InReview(BillStage::AccountOfficer) => "Account Officer Review",
            Self::InReview(BillStage::Accountant) => "Accountant Review",
            Self::InReview(BillStage::AuditOfficer) => "Audit Officer Review",
            Self::InReview(BillStage::SeniorBudgetOfficer) => "Senior Budget Officer Review",
            Self::InReview(BillStage::DirectorFinance) => "Director Finance Review",
            Self::InReview(BillStage::ExecutiveDirector) => "Executive Director Review",
            Self::Approved => "Approved",
            Self::Disallowed => "Disallowed",
        }
    }

    /// Returns true if bill fields can still be changed.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if no further sign-off is possible.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Approved | Self::Disallowed)
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Workflow-relevant state of a contingent bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillWorkflow {
    /// Draft flag.
    pub is_draft: bool,
    /// Sign-off records.
    pub trail: ApprovalTrail<BillStage>,
    /// Reason stored on disallowance.
    pub disallowance_reason: Option<String>,
}

impl BillWorkflow {
    /// A fresh draft bill.
    #[must_use]
    pub fn draft() -> Self {
        Self {
            is_draft: true,
            trail: ApprovalTrail::new(),
            disallowance_reason: None,
        }
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> BillStatus {
        BillStatus::derive(self.is_draft, &self.trail)
    }
}

/// Amounts of a schedule-of-payment line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDeductions {
    /// Gross amount payable.
    pub gross_amount: Decimal,
    /// Stamp duty.
    #[serde(default)]
    pub stamp_duty: Decimal,
    /// Income tax withheld.
    #[serde(default)]
    pub income_tax: Decimal,
    /// General sales tax withheld.
    #[serde(default)]
    pub gst: Decimal,
    /// Provincial sales tax withheld.
    #[serde(default)]
    pub pst: Decimal,
}

impl PaymentDeductions {
    /// Net amount after all deductions.
    #[must_use]
    pub fn net_amount(&self) -> Decimal {
        self.gross_amount - self.stamp_duty - self.income_tax - self.gst - self.pst
    }
}

/// Bank forwarding details of a cheque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankForwarding {
    /// Bank reference number.
    pub reference_number: String,
    /// Date forwarded.
    pub forwarded_on: NaiveDate,
}

/// Create or replace payload for a contingent bill.
#[derive(Debug, Clone, Deserialize)]
pub struct BillInput {
    /// Unique bill number.
    pub bill_number: String,
    /// Supplier name.
    pub supplier_name: String,
    /// Tender or purchase order reference.
    #[serde(default)]
    pub tender_reference: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Bill amount.
    pub bill_amount: Decimal,
    /// Taxes and duties withheld.
    #[serde(default)]
    pub taxes_duties: Decimal,
    /// Caller-maintained status text.
    #[serde(default)]
    pub status: Option<String>,
    /// Object code for budget context.
    #[serde(default)]
    pub object_code_id: Option<finoffice_shared::types::ObjectCodeId>,
    /// Fiscal year for budget context.
    #[serde(default)]
    pub fiscal_year_id: Option<finoffice_shared::types::FiscalYearId>,
}

impl BillInput {
    /// Net payment after taxes and duties.
    #[must_use]
    pub fn net_payment(&self) -> Decimal {
        self.bill_amount - self.taxes_duties
    }
}

/// Create or replace payload for a schedule-of-payment line.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleInput {
    /// Payee name.
    pub payee_name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Gross amount and deductions.
    #[serde(flatten)]
    pub amounts: PaymentDeductions,
    /// Caller-maintained status text.
    #[serde(default)]
    pub status: Option<String>,
}

/// Create payload for a cheque.
#[derive(Debug, Clone, Deserialize)]
pub struct ChequeInput {
    /// Cheque number.
    pub cheque_number: String,
    /// Cheque amount.
    pub amount: Decimal,
    /// Date written on the cheque.
    pub cheque_date: NaiveDate,
    /// Caller-maintained status text.
    #[serde(default)]
    pub status: Option<String>,
}
