//! Integration tests for the bill workflow repository.

mod common;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use finoffice_core::workflow::{
    ApprovalStage, BillInput, BillStage, ChequeInput, ChequeStage, Decision, PaymentDeductions,
    ScheduleInput, WorkflowError,
};
use finoffice_db::BillRepository;
use finoffice_shared::types::ContingentBillId;

fn bill_input() -> BillInput {
    BillInput {
        bill_number: common::unique("CB-"),
        supplier_name: "Acme Traders".to_string(),
        tender_reference: None,
        description: None,
        bill_amount: dec!(1000),
        taxes_duties: dec!(75),
        status: None,
        object_code_id: None,
        fiscal_year_id: None,
    }
}

fn approve() -> Decision {
    Decision {
        approve: true,
        remarks: None,
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_bill_full_approval() {
    let db = common::setup().await;
    let repo = BillRepository::new(db);

    let bill = repo.create(bill_input(), None).await.unwrap();
    assert_eq!(bill.workflow_status, "Draft");
    assert_eq!(bill.net_payment, dec!(925));

    let bill = repo.submit(bill.id, Some(1)).await.unwrap();
    assert_eq!(bill.workflow_status, "Submitted");

    let mut last = bill;
    for stage in BillStage::ORDER {
        last = repo.decide(last.id, *stage, &approve(), None, None).await.unwrap();
    }
    assert_eq!(last.workflow_status, "Approved");
    assert!(last.approvals.iter().all(|a| a.approved));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_out_of_order_approval_rejected() {
    let db = common::setup().await;
    let repo = BillRepository::new(db);

    let bill = repo.create(bill_input(), None).await.unwrap();
    repo.submit(bill.id, None).await.unwrap();

    let result = repo
        .decide(bill.id, BillStage::AuditOfficer, &approve(), None, None)
        .await;
    assert!(matches!(result, Err(WorkflowError::OutOfOrder { .. })));

    let detail = repo.get(bill.id).await.unwrap();
    assert_eq!(detail.bill.version, 2);
    assert!(detail.bill.approvals.iter().all(|a| !a.approved));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_disallowance_closes_bill() {
    let db = common::setup().await;
    let repo = BillRepository::new(db);

    let bill = repo.create(bill_input(), None).await.unwrap();
    repo.submit(bill.id, None).await.unwrap();

    let disallow = Decision {
        approve: false,
        remarks: Some("Missing invoice".to_string()),
    };
    let bill = repo
        .decide(bill.id, BillStage::AccountOfficer, &disallow, None, None)
        .await
        .unwrap();
    assert_eq!(bill.workflow_status, "Disallowed");
    assert_eq!(bill.disallowance_reason.as_deref(), Some("Missing invoice"));

    let result = repo
        .decide(bill.id, BillStage::Accountant, &approve(), None, None)
        .await;
    assert!(matches!(result, Err(WorkflowError::Closed)));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_submitted_bill_not_editable() {
    let db = common::setup().await;
    let repo = BillRepository::new(db);

    let bill = repo.create(bill_input(), None).await.unwrap();
    repo.submit(bill.id, None).await.unwrap();

    let result = repo.update(bill.id, bill_input(), None).await;
    assert!(matches!(result, Err(WorkflowError::NotEditable)));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_cheque_forwarding_needs_both_approvals() {
    let db = common::setup().await;
    let repo = BillRepository::new(db);

    let bill = repo.create(bill_input(), None).await.unwrap();
    let line = repo
        .add_schedule(
            bill.id,
            ScheduleInput {
                payee_name: "Acme Traders".to_string(),
                description: None,
                amounts: PaymentDeductions {
                    gross_amount: dec!(1000),
                    stamp_duty: dec!(10),
                    income_tax: dec!(45),
                    gst: dec!(20),
                    pst: dec!(5),
                },
                status: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(line.net_amount, dec!(920));

    let cheque = repo
        .add_cheque(
            line.id,
            ChequeInput {
                cheque_number: "000123".to_string(),
                amount: dec!(920),
                cheque_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
                status: None,
            },
        )
        .await
        .unwrap();

    let early = repo.forward_cheque(cheque.id, "BR-1", None, None).await;
    assert!(matches!(early, Err(WorkflowError::NotFullyApproved)));

    for stage in ChequeStage::ORDER {
        repo.decide_cheque(cheque.id, *stage, &approve(), None, None)
            .await
            .unwrap();
    }

    let date = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
    let forwarded = repo
        .forward_cheque(cheque.id, "BR-1", Some(date), None)
        .await
        .unwrap();
    let forwarding = forwarded.forwarding.unwrap();
    assert_eq!(forwarding.reference_number, "BR-1");
    assert_eq!(forwarding.forwarded_on, date);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_delete_missing_bill() {
    let db = common::setup().await;
    let repo = BillRepository::new(db);

    let result = repo.delete(ContingentBillId::new()).await;
    assert!(matches!(result, Err(WorkflowError::NotFound { .. })));
}
