//! Workflow service for sign-off transitions.
//!
//! All methods validate first and only then mutate, so a returned error
//! leaves the document untouched.

use chrono::{DateTime, NaiveDate, Utc};
use finoffice_shared::types::{UserId, check_amount};
use rust_decimal::Decimal;

use crate::workflow::error::WorkflowError;
use crate::workflow::stage::{ApprovalStage, BillStage, ChequeStage};
use crate::workflow::types::{
    ApprovalTrail, BankForwarding, BillInput, BillStatus, BillWorkflow, ChequeInput, Decision,
    ScheduleInput, TrailProgress,
};

/// Maximum length of a bank reference number.
pub const MAX_REFERENCE_LEN: usize = 100;
/// Maximum length of bill and cheque numbers.
pub const MAX_NUMBER_LEN: usize = 50;
/// Maximum length of supplier and payee names.
pub const MAX_NAME_LEN: usize = 255;

/// Stateless service for approval chain transitions.
pub struct WorkflowService;

impl WorkflowService {
    /// Records a decision for `stage` on a trail.
    ///
    /// Stages must act in table order. Approval sets the flag, timestamp,
    /// remarks and actor. Disallowance needs remarks and closes the chain.
    ///
    /// # Errors
    ///
    /// * `Closed` if the chain was disallowed or is complete
    /// * `AlreadyApproved` if `stage` has already approved
    /// * `OutOfOrder` if an earlier stage is still pending
    /// * `DisallowanceReasonRequired` when disallowing without remarks
    pub fn advance<S: ApprovalStage>(
        trail: &mut ApprovalTrail<S>,
        stage: S,
        decision: &Decision,
        actor: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Result<TrailProgress<S>, WorkflowError> {
        if trail.record(stage).approved {
            return Err(WorkflowError::AlreadyApproved(stage.label().to_string()));
        }

        match trail.progress() {
            TrailProgress::Disallowed(_) | TrailProgress::Complete => {
                return Err(WorkflowError::Closed);
            }
            TrailProgress::Pending(expected) if expected != stage => {
                return Err(WorkflowError::OutOfOrder {
                    expected: expected.label().to_string(),
                    got: stage.label().to_string(),
                });
            }
            TrailProgress::Pending(_) => {}
        }

        let remarks = decision
            .remarks
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);

        if !decision.approve && remarks.is_none() {
            return Err(WorkflowError::DisallowanceReasonRequired);
        }

        let record = trail.record_mut(stage);
        record.approved = decision.approve;
        record.acted_at = Some(now);
        record.remarks = remarks;
        record.acted_by = actor;

        Ok(trail.progress())
    }

    /// Submit a draft bill for sign-off.
    ///
    /// # Errors
    ///
    /// Returns `AlreadySubmitted` if the bill is not a draft.
    pub fn submit(bill: &mut BillWorkflow) -> Result<BillStatus, WorkflowError> {
        if !bill.is_draft {
            return Err(WorkflowError::AlreadySubmitted);
        }
        bill.is_draft = false;
        Ok(bill.status())
    }

    /// Records a decision on a submitted bill.
    ///
    /// A disallowance also stores the remarks as the bill's disallowance
    /// reason.
    ///
    /// # Errors
    ///
    /// Returns `NotSubmitted` for drafts, otherwise as [`Self::advance`].
    pub fn decide_bill(
        bill: &mut BillWorkflow,
        stage: BillStage,
        decision: &Decision,
        actor: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Result<BillStatus, WorkflowError> {
        if bill.is_draft {
            return Err(WorkflowError::NotSubmitted);
        }

        let progress = Self::advance(&mut bill.trail, stage, decision, actor, now)?;
        if let TrailProgress::Disallowed(stage) = progress {
            bill.disallowance_reason = bill.trail.record(stage).remarks.clone();
        }

        Ok(bill.status())
    }

    /// Checks that bill fields may still be changed.
    ///
    /// # Errors
    ///
    /// Returns `NotEditable` once the bill has been submitted.
    pub fn ensure_editable(bill: &BillWorkflow) -> Result<(), WorkflowError> {
        if bill.status().is_editable() {
            Ok(())
        } else {
            Err(WorkflowError::NotEditable)
        }
    }

    /// Forwards a fully approved cheque to the bank.
    ///
    /// # Errors
    ///
    /// * `NotFullyApproved` unless both cheque stages approved
    /// * `AlreadyForwarded` if a forwarding is already recorded
    /// * `Validation` for a blank or overlong reference number
    pub fn forward_cheque(
        trail: &ApprovalTrail<ChequeStage>,
        existing: Option<&BankForwarding>,
        reference_number: &str,
        forwarded_on: NaiveDate,
    ) -> Result<BankForwarding, WorkflowError> {
        if !trail.is_complete() {
            return Err(WorkflowError::NotFullyApproved);
        }
        if existing.is_some() {
            return Err(WorkflowError::AlreadyForwarded);
        }

        let reference_number = reference_number.trim();
        if reference_number.is_empty() {
            return Err(WorkflowError::Validation(
                "bank reference number is required".into(),
            ));
        }
        if reference_number.chars().count() > MAX_REFERENCE_LEN {
            return Err(WorkflowError::Validation(format!(
                "bank reference number exceeds {MAX_REFERENCE_LEN} characters"
            )));
        }

        Ok(BankForwarding {
            reference_number: reference_number.to_string(),
            forwarded_on,
        })
    }

    /// Validates and trims a bill payload.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for blank or overlong text fields and for amounts,
    /// net payment included, that cannot be stored.
    pub fn validate_bill(input: BillInput) -> Result<BillInput, WorkflowError> {
        amount(input.bill_amount, "bill amount")?;
        amount(input.taxes_duties, "taxes and duties")?;
        amount(input.net_payment(), "net payment")?;
        Ok(BillInput {
            bill_number: required(&input.bill_number, "bill number", MAX_NUMBER_LEN)?,
            supplier_name: required(&input.supplier_name, "supplier name", MAX_NAME_LEN)?,
            tender_reference: optional(input.tender_reference),
            description: optional(input.description),
            status: optional(input.status),
            ..input
        })
    }

    /// Validates and trims a schedule line payload.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank or overlong payee and for amounts,
    /// net amount included, that cannot be stored.
    pub fn validate_schedule(input: ScheduleInput) -> Result<ScheduleInput, WorkflowError> {
        let a = &input.amounts;
        amount(a.gross_amount, "gross amount")?;
        amount(a.stamp_duty, "stamp duty")?;
        amount(a.income_tax, "income tax")?;
        amount(a.gst, "GST")?;
        amount(a.pst, "PST")?;
        amount(a.net_amount(), "net amount")?;
        Ok(ScheduleInput {
            payee_name: required(&input.payee_name, "payee name", MAX_NAME_LEN)?,
            description: optional(input.description),
            status: optional(input.status),
            ..input
        })
    }

    /// Validates and trims a cheque payload.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank or overlong cheque number or an
    /// amount that cannot be stored.
    pub fn validate_cheque(input: ChequeInput) -> Result<ChequeInput, WorkflowError> {
        amount(input.amount, "cheque amount")?;
        Ok(ChequeInput {
            cheque_number: required(&input.cheque_number, "cheque number", MAX_NUMBER_LEN)?,
            status: optional(input.status),
            ..input
        })
    }

    /// Parses a stage from a URL segment.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStage` if the segment names no stage of `S`.
    pub fn parse_stage<S: ApprovalStage>(segment: &str) -> Result<S, WorkflowError> {
        S::parse(segment).ok_or_else(|| WorkflowError::UnknownStage(segment.to_string()))
    }
}

fn amount(value: Decimal, field: &str) -> Result<(), WorkflowError> {
    check_amount(value).map_err(|e| WorkflowError::Validation(format!("{field} {e}")))?;
    Ok(())
}

fn required(value: &str, field: &str, max: usize) -> Result<String, WorkflowError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(WorkflowError::Validation(format!("{field} is required")));
    }
    if value.chars().count() > max {
        return Err(WorkflowError::Validation(format!(
            "{field} exceeds {max} characters"
        )));
    }
    Ok(value.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::stage::ScheduleStage;
    use crate::workflow::types::PaymentDeductions;
    use chrono::TimeZone;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 11, 0, 0).unwrap()
    }

    fn approve() -> Decision {
        Decision {
            approve: true,
            remarks: None,
        }
    }

    fn disallow(reason: &str) -> Decision {
        Decision {
            approve: false,
            remarks: Some(reason.to_string()),
        }
    }

    fn submitted_bill() -> BillWorkflow {
        let mut bill = BillWorkflow::draft();
        WorkflowService::submit(&mut bill).unwrap();
        bill
    }

    #[test]
    fn test_submit_draft() {
        let mut bill = BillWorkflow::draft();
        assert_eq!(bill.status(), BillStatus::Draft);
        assert!(WorkflowService::ensure_editable(&bill).is_ok());

        let status = WorkflowService::submit(&mut bill).unwrap();
        assert_eq!(status, BillStatus::Submitted);
        assert!(!bill.is_draft);
        assert!(matches!(
            WorkflowService::ensure_editable(&bill),
            Err(WorkflowError::NotEditable)
        ));
        assert!(matches!(
            WorkflowService::submit(&mut bill),
            Err(WorkflowError::AlreadySubmitted)
        ));
    }

    #[test]
    fn test_decide_on_draft_fails() {
        let mut bill = BillWorkflow::draft();
        let result =
            WorkflowService::decide_bill(&mut bill, BillStage::AccountOfficer, &approve(), None, now());
        assert!(matches!(result, Err(WorkflowError::NotSubmitted)));
    }

    #[test]
    fn test_full_bill_chain() {
        let mut bill = submitted_bill();
        let actor = UserId::new();

        let expected = [
            BillStatus::InReview(BillStage::Accountant),
            BillStatus::InReview(BillStage::AuditOfficer),
            BillStatus::InReview(BillStage::SeniorBudgetOfficer),
            BillStatus::InReview(BillStage::DirectorFinance),
            BillStatus::InReview(BillStage::ExecutiveDirector),
            BillStatus::Approved,
        ];

        for (stage, want) in BillStage::ORDER.iter().zip(expected) {
            let status =
                WorkflowService::decide_bill(&mut bill, *stage, &approve(), Some(actor), now())
                    .unwrap();
            assert_eq!(status, want);
        }

        assert_eq!(bill.status().as_str(), "Approved");
        let record = bill.trail.record(BillStage::SeniorBudgetOfficer);
        assert!(record.approved);
        assert_eq!(record.acted_at, Some(now()));
        assert_eq!(record.acted_by, Some(actor));

        let again =
            WorkflowService::decide_bill(&mut bill, BillStage::ExecutiveDirector, &approve(), None, now());
        assert!(matches!(again, Err(WorkflowError::AlreadyApproved(_))));
    }

    #[test]
    fn test_out_of_order_rejected() {
        let mut bill = submitted_bill();
        let before = bill.clone();

        let result =
            WorkflowService::decide_bill(&mut bill, BillStage::AuditOfficer, &approve(), None, now());

        match result {
            Err(WorkflowError::OutOfOrder { expected, got }) => {
                assert_eq!(expected, "Account Officer");
                assert_eq!(got, "Audit Officer");
            }
            other => panic!("expected OutOfOrder, got {other:?}"),
        }
        assert_eq!(bill, before);
    }

    #[test]
    fn test_disallowance_closes_chain() {
        let mut bill = submitted_bill();
        WorkflowService::decide_bill(&mut bill, BillStage::AccountOfficer, &approve(), None, now())
            .unwrap();

        let status = WorkflowService::decide_bill(
            &mut bill,
            BillStage::Accountant,
            &disallow("  Missing invoice  "),
            None,
            now(),
        )
        .unwrap();

        assert_eq!(status, BillStatus::Disallowed);
        assert_eq!(bill.disallowance_reason.as_deref(), Some("Missing invoice"));
        assert!(bill.status().is_closed());

        let retry =
            WorkflowService::decide_bill(&mut bill, BillStage::Accountant, &approve(), None, now());
        assert!(matches!(retry, Err(WorkflowError::Closed)));
        let next =
            WorkflowService::decide_bill(&mut bill, BillStage::AuditOfficer, &approve(), None, now());
        assert!(matches!(next, Err(WorkflowError::Closed)));
    }

    #[test]
    fn test_disallow_requires_reason() {
        let mut bill = submitted_bill();
        let result = WorkflowService::decide_bill(
            &mut bill,
            BillStage::AccountOfficer,
            &disallow("   "),
            None,
            now(),
        );
        assert!(matches!(result, Err(WorkflowError::DisallowanceReasonRequired)));
        assert_eq!(bill.status(), BillStatus::Submitted);
    }

    #[test]
    fn test_schedule_trail() {
        let mut trail = ApprovalTrail::<ScheduleStage>::new();
        let progress = WorkflowService::advance(
            &mut trail,
            ScheduleStage::Accountant,
            &approve(),
            None,
            now(),
        )
        .unwrap();
        assert_eq!(progress, TrailProgress::Pending(ScheduleStage::BudgetOfficer));
    }

    #[test]
    fn test_forward_cheque() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        let mut trail = ApprovalTrail::<ChequeStage>::new();

        let early = WorkflowService::forward_cheque(&trail, None, "REF-1", date);
        assert!(matches!(early, Err(WorkflowError::NotFullyApproved)));

        WorkflowService::advance(&mut trail, ChequeStage::DirectorFinance, &approve(), None, now())
            .unwrap();
        let half = WorkflowService::forward_cheque(&trail, None, "REF-1", date);
        assert!(matches!(half, Err(WorkflowError::NotFullyApproved)));

        WorkflowService::advance(&mut trail, ChequeStage::ExecutiveDirector, &approve(), None, now())
            .unwrap();
        let blank = WorkflowService::forward_cheque(&trail, None, " ", date);
        assert!(matches!(blank, Err(WorkflowError::Validation(_))));

        let forwarding = WorkflowService::forward_cheque(&trail, None, " REF-1 ", date).unwrap();
        assert_eq!(forwarding.reference_number, "REF-1");
        assert_eq!(forwarding.forwarded_on, date);

        let twice = WorkflowService::forward_cheque(&trail, Some(&forwarding), "REF-2", date);
        assert!(matches!(twice, Err(WorkflowError::AlreadyForwarded)));
    }

    #[test]
    fn test_net_amount() {
        let d = PaymentDeductions {
            gross_amount: dec!(100000),
            stamp_duty: dec!(250),
            income_tax: dec!(4500),
            gst: dec!(1700.50),
            pst: dec!(800),
        };
        assert_eq!(d.net_amount(), dec!(92749.50));
    }

    #[test]
    fn test_validate_bill() {
        let input = BillInput {
            bill_number: " CB-2025-001 ".into(),
            supplier_name: "Acme Traders".into(),
            tender_reference: Some("  ".into()),
            description: None,
            bill_amount: dec!(1000),
            taxes_duties: dec!(65.5),
            status: None,
            object_code_id: None,
            fiscal_year_id: None,
        };
        let bill = WorkflowService::validate_bill(input.clone()).unwrap();
        assert_eq!(bill.bill_number, "CB-2025-001");
        assert_eq!(bill.tender_reference, None);
        assert_eq!(bill.net_payment(), dec!(934.5));

        let blank = BillInput {
            supplier_name: String::new(),
            ..input
        };
        assert!(matches!(
            WorkflowService::validate_bill(blank),
            Err(WorkflowError::Validation(_))
        ));
    }

    fn bill(amount: Decimal, taxes: Decimal) -> BillInput {
        BillInput {
            bill_number: "CB-2025-002".into(),
            supplier_name: "Acme Traders".into(),
            tender_reference: None,
            description: None,
            bill_amount: amount,
            taxes_duties: taxes,
            status: None,
            object_code_id: None,
            fiscal_year_id: None,
        }
    }

    #[rstest]
    #[case::largest(dec!(9999999999999999.99), dec!(0), true)]
    #[case::past_limit(dec!(10000000000000000), dec!(0), false)]
    #[case::decimal_max(Decimal::MAX, dec!(1), false)]
    #[case::sub_cent(dec!(100.005), dec!(0), false)]
    #[case::sub_cent_tax(dec!(100), dec!(0.001), false)]
    #[case::net_past_limit(dec!(-9999999999999999.99), dec!(1), false)]
    fn test_validate_bill_amounts(
        #[case] amount: Decimal,
        #[case] taxes: Decimal,
        #[case] accepted: bool,
    ) {
        let result = WorkflowService::validate_bill(bill(amount, taxes));
        if accepted {
            assert!(result.is_ok());
        } else {
            assert!(matches!(result, Err(WorkflowError::Validation(_))));
        }
    }

    #[rstest]
    #[case::clean(dec!(1000), dec!(25), true)]
    #[case::gross_past_limit(dec!(10000000000000000), dec!(0), false)]
    #[case::huge_deduction(dec!(0), Decimal::MAX, false)]
    #[case::sub_cent_deduction(dec!(1000), dec!(0.125), false)]
    #[case::net_past_limit(dec!(-9999999999999999.99), dec!(5), false)]
    fn test_validate_schedule_amounts(
        #[case] gross: Decimal,
        #[case] stamp: Decimal,
        #[case] accepted: bool,
    ) {
        let input = ScheduleInput {
            payee_name: "Acme Traders".into(),
            description: None,
            amounts: PaymentDeductions {
                gross_amount: gross,
                stamp_duty: stamp,
                ..PaymentDeductions::default()
            },
            status: None,
        };
        assert_eq!(WorkflowService::validate_schedule(input).is_ok(), accepted);
    }

    #[rstest]
    #[case(dec!(5000.50), true)]
    #[case(dec!(5000.505), false)]
    #[case(Decimal::MAX, false)]
    fn test_validate_cheque_amount(#[case] amount: Decimal, #[case] accepted: bool) {
        let input = ChequeInput {
            cheque_number: "CHQ-0001".into(),
            amount,
            cheque_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            status: None,
        };
        assert_eq!(WorkflowService::validate_cheque(input).is_ok(), accepted);
    }

    #[test]
    fn test_parse_stage() {
        assert_eq!(
            WorkflowService::parse_stage::<BillStage>("executive_director").unwrap(),
            BillStage::ExecutiveDirector
        );
        assert!(matches!(
            WorkflowService::parse_stage::<ChequeStage>("audit_officer"),
            Err(WorkflowError::UnknownStage(_))
        ));
    }
}
