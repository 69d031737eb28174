//! Contingent bill, schedule of payment and cheque routes.
//!
//! Approval routes take the stage's role segment (`/approvals/accountant`).
//! The segment is checked against the document's chain and the caller's
//! role before anything is read from the store.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::NaiveDate;
use serde::Deserialize;

use finoffice_core::workflow::{
    BillInput, BillStage, ChequeInput, ChequeStage, Decision, ScheduleInput, ScheduleStage,
    WorkflowService, authorize,
};
use finoffice_db::BillRepository;
use finoffice_shared::types::{AsaanChequeId, ContingentBillId, ScheduleOfPaymentId};

use crate::{
    AppState,
    error::ApiResult,
    middleware::AuthUser,
    routes::VersionQuery,
};

/// Creates the bill routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bills", get(list_bills).post(create_bill))
        .route(
            "/bills/{id}",
            get(get_bill).put(update_bill).delete(delete_bill),
        )
        .route("/bills/{id}/submit", post(submit_bill))
        .route("/bills/{id}/approvals/{role}", post(decide_bill))
        .route("/bills/{id}/schedules", post(add_schedule))
        .route("/schedules/{id}", put(update_schedule))
        .route("/schedules/{id}/approvals/{role}", post(decide_schedule))
        .route("/schedules/{id}/cheques", post(add_cheque))
        .route("/cheques/{id}/approvals/{role}", post(decide_cheque))
        .route("/cheques/{id}/forward", post(forward_cheque))
}

/// Filter for listing bills.
#[derive(Debug, Default, Deserialize)]
pub struct ListBillsQuery {
    /// Exact `workflow_status` label, e.g. `Accountant Review`.
    pub workflow_status: Option<String>,
}

/// Request body for forwarding a cheque to the bank.
#[derive(Debug, Deserialize)]
pub struct ForwardChequeRequest {
    /// Bank reference number.
    pub reference_number: String,
    /// Date forwarded; defaults to today.
    #[serde(default)]
    pub forwarded_on: Option<NaiveDate>,
}

fn repo(state: &AppState) -> BillRepository {
    BillRepository::new((*state.db).clone())
}

// ============================================================================
// Bills
// ============================================================================

async fn list_bills(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListBillsQuery>,
) -> ApiResult<impl IntoResponse> {
    let bills = repo(&state).list(query.workflow_status.as_deref()).await?;
    Ok(Json(bills))
}

/// POST `/bills` - Create a draft bill.
async fn create_bill(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<BillInput>,
) -> ApiResult<impl IntoResponse> {
    let bill = repo(&state).create(payload, Some(auth.user_id())).await?;
    Ok((StatusCode::CREATED, Json(bill)))
}

/// GET `/bills/{id}` - Bill with its schedule lines and cheques.
async fn get_bill(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<ContingentBillId>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(repo(&state).get(id).await?))
}

/// PUT `/bills/{id}` - Replace bill fields; drafts only.
async fn update_bill(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<ContingentBillId>,
    Query(version): Query<VersionQuery>,
    Json(payload): Json<BillInput>,
) -> ApiResult<impl IntoResponse> {
    let bill = repo(&state)
        .update(id, payload, version.expected_version)
        .await?;
    Ok(Json(bill))
}

/// DELETE `/bills/{id}` - Removes the bill, its schedule lines and cheques.
async fn delete_bill(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<ContingentBillId>,
) -> ApiResult<impl IntoResponse> {
    repo(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn submit_bill(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<ContingentBillId>,
    Query(version): Query<VersionQuery>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(repo(&state).submit(id, version.expected_version).await?))
}

/// POST `/bills/{id}/approvals/{role}` - Approve or disallow one stage.
async fn decide_bill(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, role)): Path<(ContingentBillId, String)>,
    Query(version): Query<VersionQuery>,
    Json(decision): Json<Decision>,
) -> ApiResult<impl IntoResponse> {
    let stage: BillStage = WorkflowService::parse_stage(&role)?;
    authorize(auth.role(), stage)?;

    let bill = repo(&state)
        .decide(id, stage, &decision, Some(auth.user_id()), version.expected_version)
        .await?;
    Ok(Json(bill))
}

// ============================================================================
// Schedule of payments
// ============================================================================

async fn add_schedule(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<ContingentBillId>,
    Json(payload): Json<ScheduleInput>,
) -> ApiResult<impl IntoResponse> {
    let line = repo(&state).add_schedule(id, payload).await?;
    Ok((StatusCode::CREATED, Json(line)))
}

/// PUT `/schedules/{id}` - Replace payee and amounts; net is recomputed.
async fn update_schedule(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<ScheduleOfPaymentId>,
    Query(version): Query<VersionQuery>,
    Json(payload): Json<ScheduleInput>,
) -> ApiResult<impl IntoResponse> {
    let line = repo(&state)
        .update_schedule(id, payload, version.expected_version)
        .await?;
    Ok(Json(line))
}

async fn decide_schedule(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, role)): Path<(ScheduleOfPaymentId, String)>,
    Query(version): Query<VersionQuery>,
    Json(decision): Json<Decision>,
) -> ApiResult<impl IntoResponse> {
    let stage: ScheduleStage = WorkflowService::parse_stage(&role)?;
    authorize(auth.role(), stage)?;

    let line = repo(&state)
        .decide_schedule(id, stage, &decision, Some(auth.user_id()), version.expected_version)
        .await?;
    Ok(Json(line))
}

// ============================================================================
// Cheques
// ============================================================================

async fn add_cheque(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<ScheduleOfPaymentId>,
    Json(payload): Json<ChequeInput>,
) -> ApiResult<impl IntoResponse> {
    let cheque = repo(&state).add_cheque(id, payload).await?;
    Ok((StatusCode::CREATED, Json(cheque)))
}

async fn decide_cheque(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, role)): Path<(AsaanChequeId, String)>,
    Query(version): Query<VersionQuery>,
    Json(decision): Json<Decision>,
) -> ApiResult<impl IntoResponse> {
    let stage: ChequeStage = WorkflowService::parse_stage(&role)?;
    authorize(auth.role(), stage)?;

    let cheque = repo(&state)
        .decide_cheque(id, stage, &decision, Some(auth.user_id()), version.expected_version)
        .await?;
    Ok(Json(cheque))
}

/// POST `/cheques/{id}/forward` - Record bank forwarding of an approved cheque.
async fn forward_cheque(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<AsaanChequeId>,
    Query(version): Query<VersionQuery>,
    Json(payload): Json<ForwardChequeRequest>,
) -> ApiResult<impl IntoResponse> {
    let cheque = repo(&state)
        .forward_cheque(
            id,
            &payload.reference_number,
            payload.forwarded_on,
            version.expected_version,
        )
        .await?;
    Ok(Json(cheque))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rstest::rstest;
    use uuid::Uuid;

    use crate::routes::test_support::{body_json, offline_state, send, token};

    const APPROVE: &str = r#"{"approve":true,"remarks":"ok"}"#;

    async fn approve(uri: &str, role: &str) -> axum::response::Response {
        let state = offline_state();
        let token = token(&state, role);
        send(state, "POST", uri, Some(&token), Some(APPROVE)).await
    }

    #[rstest]
    #[case::not_a_stage("/api/v1/bills/{id}/approvals/cashier")]
    #[case::schedule_stage_on_bill("/api/v1/bills/{id}/approvals/budget_officer")]
    #[case::bill_stage_on_cheque("/api/v1/cheques/{id}/approvals/accountant")]
    #[tokio::test]
    async fn test_unknown_stage_is_400(#[case] uri: &str) {
        let uri = uri.replace("{id}", &Uuid::new_v4().to_string());
        let response = approve(&uri, "admin").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[rstest]
    #[case("/api/v1/bills/{id}/approvals/director_finance", "accountant")]
    #[case("/api/v1/schedules/{id}/approvals/budget_officer", "audit_officer")]
    #[case("/api/v1/cheques/{id}/approvals/executive_director", "director_finance")]
    #[case("/api/v1/bills/{id}/approvals/accountant", "")]
    #[tokio::test]
    async fn test_wrong_role_is_403(#[case] uri: &str, #[case] role: &str) {
        let uri = uri.replace("{id}", &Uuid::new_v4().to_string());
        let response = approve(&uri, role).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = body_json(response).await;
        assert_eq!(body["error"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_approval_requires_token() {
        let uri = format!("/api/v1/bills/{}/approvals/accountant", Uuid::new_v4());
        let response = send(offline_state(), "POST", &uri, None, Some(APPROVE)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
