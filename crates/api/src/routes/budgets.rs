//! Budget entry routes.
//!
//! Entries carry entered fields and derived totals; every write recomputes
//! the totals and bumps `version`.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use finoffice_core::budget::{
    BudgetInputs, CreateBudgetEntryInput, ExpenseCategory, ExpenseInput, ExpenseRecord,
    UpdateBudgetEntryInput, UpdateReleasesInput,
};
use finoffice_db::{BudgetEntryView, BudgetRepository};
use finoffice_shared::types::{BudgetEntryId, FiscalYearId, ObjectCodeId};

use crate::{
    AppState,
    error::ApiResult,
    middleware::AuthUser,
    routes::VersionQuery,
};

/// Creates the budget routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budget-entries", get(list_entries).post(create_entry))
        .route(
            "/budget-entries/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .route("/budget-entries/{id}/releases", put(update_releases))
        .route(
            "/budget-entries/{id}/expenses",
            post(post_expense).get(list_expenses),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Filter for listing entries.
#[derive(Debug, Default, Deserialize)]
pub struct ListEntriesQuery {
    /// Only entries of this fiscal year.
    pub fiscal_year_id: Option<FiscalYearId>,
}

/// Request body for creating an entry. Omitted amounts are zero.
#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    /// Object code ID.
    pub object_code_id: ObjectCodeId,
    /// Fiscal year ID.
    pub fiscal_year_id: FiscalYearId,
    /// Entered amounts.
    #[serde(flatten)]
    pub inputs: BudgetInputs,
}

/// Request body for posting an expense.
#[derive(Debug, Deserialize)]
pub struct ExpenseRequest {
    /// Expense name.
    pub name: String,
    /// Amount charged.
    pub amount: Decimal,
    /// One of `AAA`, `DEV`, `PLA`, `UHI`.
    pub category: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Expense date; defaults to today.
    #[serde(default)]
    pub expense_date: Option<NaiveDate>,
}

/// Response for a posted expense.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    /// Entry after the posting.
    pub entry: BudgetEntryView,
    /// History record written.
    pub expense: ExpenseRecord,
}

fn repo(state: &AppState) -> BudgetRepository {
    BudgetRepository::new((*state.db).clone())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET `/budget-entries?fiscal_year_id=` - Entries in object code order.
async fn list_entries(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListEntriesQuery>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(repo(&state).list(query.fiscal_year_id).await?))
}

/// POST `/budget-entries` - One entry per object code and fiscal year.
async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateEntryRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = CreateBudgetEntryInput {
        object_code_id: payload.object_code_id,
        fiscal_year_id: payload.fiscal_year_id,
        inputs: payload.inputs,
        created_by: Some(auth.user_id()),
    };
    let entry = repo(&state).create(input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn get_entry(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<BudgetEntryId>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(repo(&state).get(id).await?))
}

/// PUT `/budget-entries/{id}` - Partial update of entered fields.
async fn update_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<BudgetEntryId>,
    Query(version): Query<VersionQuery>,
    Json(payload): Json<UpdateBudgetEntryInput>,
) -> ApiResult<impl IntoResponse> {
    let entry = repo(&state)
        .update(id, &payload, version.expected_version, Some(auth.user_id()))
        .await?;
    Ok(Json(entry))
}

/// PUT `/budget-entries/{id}/releases` - Update release tranches only.
async fn update_releases(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<BudgetEntryId>,
    Query(version): Query<VersionQuery>,
    Json(payload): Json<UpdateReleasesInput>,
) -> ApiResult<impl IntoResponse> {
    let entry = repo(&state)
        .update_releases(id, &payload, version.expected_version, Some(auth.user_id()))
        .await?;
    Ok(Json(entry))
}

/// DELETE `/budget-entries/{id}` - Removes the entry and its expense history.
async fn delete_entry(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<BudgetEntryId>,
) -> ApiResult<impl IntoResponse> {
    repo(&state).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `/budget-entries/{id}/expenses` - Post an expense.
///
/// The category is checked before the store is touched.
async fn post_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<BudgetEntryId>,
    Query(version): Query<VersionQuery>,
    Json(payload): Json<ExpenseRequest>,
) -> ApiResult<impl IntoResponse> {
    let category: ExpenseCategory = payload.category.parse()?;
    debug!(entry_id = %id, %category, amount = %payload.amount, "Posting expense");

    let input = ExpenseInput {
        name: payload.name,
        amount: payload.amount,
        category: category.as_str().to_string(),
        description: payload.description,
        expense_date: payload.expense_date,
        created_by: Some(auth.user_id()),
    };

    let (entry, expense) = repo(&state)
        .post_expense(id, input, version.expected_version)
        .await?;
    Ok((StatusCode::CREATED, Json(ExpenseResponse { entry, expense })))
}

/// GET `/budget-entries/{id}/expenses` - History, newest first.
async fn list_expenses(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<BudgetEntryId>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(repo(&state).list_expenses(id).await?))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rstest::rstest;
    use uuid::Uuid;

    use crate::routes::test_support::{body_json, offline_state, send, token};

    #[rstest]
    #[case("XYZ")]
    #[case("")]
    #[case("development")]
    #[tokio::test]
    async fn test_unknown_category_rejected_before_store(#[case] category: &str) {
        let state = offline_state();
        let token = token(&state, "accountant");
        let body = format!(r#"{{"name":"Stationery","amount":"20.00","category":"{category}"}}"#);

        let response = send(
            state,
            "POST",
            &format!("/api/v1/budget-entries/{}/expenses", Uuid::new_v4()),
            Some(&token),
            Some(&body),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "INVALID_CATEGORY");
    }

    #[rstest]
    #[case::past_column_limit(r#""first_release":"10000000000000000""#)]
    #[case::past_decimal_sum(r#""first_release":"79228162514264337593543950335","second_release":"1""#)]
    #[case::sub_cent(r#""first_release":"0.005","second_release":"0.005""#)]
    #[tokio::test]
    async fn test_unstorable_amounts_rejected_before_store(#[case] amounts: &str) {
        let state = offline_state();
        let token = token(&state, "senior_budget_officer");
        let body = format!(
            r#"{{"object_code_id":"{}","fiscal_year_id":"{}",{amounts}}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );

        let response = send(
            state,
            "POST",
            "/api/v1/budget-entries",
            Some(&token),
            Some(&body),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_expenses_require_token() {
        let response = send(
            offline_state(),
            "GET",
            &format!("/api/v1/budget-entries/{}/expenses", Uuid::new_v4()),
            None,
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
