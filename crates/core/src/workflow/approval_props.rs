//! Property-based tests for stage authorisation.

use proptest::prelude::*;
use rstest::rstest;

use crate::workflow::approval::{OfficerRole, authorize};
use crate::workflow::error::WorkflowError;
use crate::workflow::stage::{ApprovalStage, BillStage, ChequeStage, ScheduleStage};

const ALL_ROLES: [OfficerRole; 9] = [
    OfficerRole::AccountOfficer,
    OfficerRole::Accountant,
    OfficerRole::AuditOfficer,
    OfficerRole::SeniorBudgetOfficer,
    OfficerRole::BudgetOfficer,
    OfficerRole::AccountsOfficer,
    OfficerRole::DirectorFinance,
    OfficerRole::ExecutiveDirector,
    OfficerRole::Admin,
];

fn arb_role() -> impl Strategy<Value = OfficerRole> {
    proptest::sample::select(ALL_ROLES.to_vec())
}

fn arb_bill_stage() -> impl Strategy<Value = BillStage> {
    proptest::sample::select(BillStage::ORDER.to_vec())
}

#[rstest]
#[case("director_finance", Some(OfficerRole::DirectorFinance))]
#[case("Executive_Director", Some(OfficerRole::ExecutiveDirector))]
#[case(" admin ", Some(OfficerRole::Admin))]
#[case("viewer", None)]
#[case("", None)]
fn test_role_parse(#[case] input: &str, #[case] expected: Option<OfficerRole>) {
    assert_eq!(OfficerRole::parse(input), expected);
}

#[test]
fn test_schedule_and_cheque_stage_roles() {
    assert!(authorize("accounts_officer", ScheduleStage::AccountsOfficer).is_ok());
    assert!(authorize("account_officer", ScheduleStage::AccountsOfficer).is_err());
    assert!(authorize("executive_director", ChequeStage::ExecutiveDirector).is_ok());
    assert!(authorize("admin", ChequeStage::DirectorFinance).is_ok());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Role strings round-trip through parse.
    #[test]
    fn prop_role_roundtrip(role in arb_role()) {
        prop_assert_eq!(OfficerRole::parse(role.as_str()), Some(role));
    }

    /// A caller may act on a stage only with the stage's own role or admin.
    #[test]
    fn prop_authorize_matches_stage_role(role in arb_role(), stage in arb_bill_stage()) {
        let result = authorize(role.as_str(), stage);
        if role == OfficerRole::Admin || role == stage.role() {
            prop_assert!(result.is_ok());
        } else {
            let is_insufficient = matches!(result, Err(WorkflowError::InsufficientRole { .. }));
            prop_assert!(is_insufficient);
        }
    }

    /// Unknown role strings never authorise.
    #[test]
    fn prop_unknown_role_rejected(raw in "[a-z]{1,12}x", stage in arb_bill_stage()) {
        prop_assume!(OfficerRole::parse(&raw).is_none());
        prop_assert!(authorize(&raw, stage).is_err());
    }
}
