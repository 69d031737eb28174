//! Property-based tests for WorkflowService.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;
use crate::workflow::stage::{ApprovalStage, BillStage, ScheduleStage};
use crate::workflow::types::{
    ApprovalTrail, BillStatus, BillWorkflow, Decision, PaymentDeductions, TrailProgress,
};

fn approve() -> Decision {
    Decision {
        approve: true,
        remarks: None,
    }
}

fn arb_bill_stage() -> impl Strategy<Value = BillStage> {
    proptest::sample::select(BillStage::ORDER.to_vec())
}

fn arb_money() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for generating non-empty remarks.
fn arb_remarks() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 ]{0,60}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// After approving the first `k` stages only stage `k` may act next.
    #[test]
    fn prop_only_next_stage_may_act(k in 0usize..6, stage in arb_bill_stage()) {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut bill = BillWorkflow::draft();
        WorkflowService::submit(&mut bill).unwrap();
        for s in &BillStage::ORDER[..k] {
            WorkflowService::decide_bill(&mut bill, *s, &approve(), None, now).unwrap();
        }
        let before = bill.clone();

        let result = WorkflowService::decide_bill(&mut bill, stage, &approve(), None, now);

        match stage.index().cmp(&k) {
            std::cmp::Ordering::Less => {
                let already = matches!(result, Err(WorkflowError::AlreadyApproved(_)));
                prop_assert!(already);
                prop_assert_eq!(bill, before);
            }
            std::cmp::Ordering::Greater => {
                let out_of_order = matches!(result, Err(WorkflowError::OutOfOrder { .. }));
                prop_assert!(out_of_order);
                prop_assert_eq!(bill, before);
            }
            std::cmp::Ordering::Equal => {
                prop_assert!(result.is_ok());
                prop_assert!(bill.trail.record(stage).approved);
            }
        }
    }

    /// A disallowance at any stage closes the chain for every stage.
    #[test]
    fn prop_disallowance_closes(k in 0usize..6, reason in arb_remarks(), stage in arb_bill_stage()) {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut bill = BillWorkflow::draft();
        WorkflowService::submit(&mut bill).unwrap();
        for s in &BillStage::ORDER[..k] {
            WorkflowService::decide_bill(&mut bill, *s, &approve(), None, now).unwrap();
        }
        let decision = Decision { approve: false, remarks: Some(reason.clone()) };
        let status = WorkflowService::decide_bill(&mut bill, BillStage::ORDER[k], &decision, None, now).unwrap();

        prop_assert_eq!(status, BillStatus::Disallowed);
        prop_assert_eq!(bill.disallowance_reason.as_deref(), Some(reason.trim()));
        prop_assert!(WorkflowService::decide_bill(&mut bill, stage, &approve(), None, now).is_err());
        prop_assert_eq!(bill.status(), BillStatus::Disallowed);
    }

    /// Approving every schedule stage in order completes the trail.
    #[test]
    fn prop_schedule_completes(remarks in proptest::option::of(arb_remarks())) {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut trail = ApprovalTrail::<ScheduleStage>::new();
        let decision = Decision { approve: true, remarks };
        let mut last = trail.progress();
        for s in ScheduleStage::ORDER {
            last = WorkflowService::advance(&mut trail, *s, &decision, None, now).unwrap();
        }
        prop_assert_eq!(last, TrailProgress::Complete);
    }

    /// net = gross - stamp duty - income tax - GST - PST
    #[test]
    fn prop_net_amount_identity(
        gross in arb_money(),
        stamp in arb_money(),
        income_tax in arb_money(),
        gst in arb_money(),
        pst in arb_money(),
    ) {
        let d = PaymentDeductions { gross_amount: gross, stamp_duty: stamp, income_tax, gst, pst };
        prop_assert_eq!(d.net_amount() + stamp + income_tax + gst + pst, gross);
    }
}
