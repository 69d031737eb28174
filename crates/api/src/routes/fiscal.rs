//! Fiscal year routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};

use finoffice_core::fiscal::CreateFiscalYearInput;
use finoffice_db::FiscalRepository;
use finoffice_shared::{AppError, types::FiscalYearId};

use crate::{
    AppState,
    error::ApiResult,
    middleware::AuthUser,
    routes::ListQuery,
};

/// Creates the fiscal routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/fiscal-years", get(list_fiscal_years).post(create_fiscal_year))
        .route("/fiscal-years/current", get(get_current_fiscal_year))
        .route("/fiscal-years/{id}", delete(deactivate_fiscal_year))
        .route("/fiscal-years/{id}/current", post(set_current_fiscal_year))
}

fn repo(state: &AppState) -> FiscalRepository {
    FiscalRepository::new((*state.db).clone())
}

/// GET `/fiscal-years` - Years ordered by start date.
async fn list_fiscal_years(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(repo(&state).list(query.include_inactive).await?))
}

/// POST `/fiscal-years` - Create a year; it starts active and not current.
async fn create_fiscal_year(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<CreateFiscalYearInput>,
) -> ApiResult<impl IntoResponse> {
    let year = repo(&state).create(payload).await?;
    Ok((StatusCode::CREATED, Json(year)))
}

async fn get_current_fiscal_year(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let year = repo(&state)
        .current()
        .await?
        .ok_or_else(|| AppError::NotFound("no current fiscal year".into()))?;
    Ok(Json(year))
}

/// POST `/fiscal-years/{id}/current` - Make this the only current year.
async fn set_current_fiscal_year(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<FiscalYearId>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(repo(&state).set_current(id).await?))
}

/// DELETE `/fiscal-years/{id}` - Soft delete.
async fn deactivate_fiscal_year(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<FiscalYearId>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(repo(&state).deactivate(id).await?))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{offline_state, send, token};

    #[tokio::test]
    async fn test_create_rejects_malformed_body() {
        let state = offline_state();
        let token = token(&state, "admin");

        let response = send(
            state,
            "POST",
            "/api/v1/fiscal-years",
            Some(&token),
            Some(r#"{"name":"2025-26","start_date":"not-a-date","end_date":"2026-06-30"}"#),
        )
        .await;
        assert!(response.status().is_client_error());
        assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bad_id_in_path() {
        let state = offline_state();
        let token = token(&state, "admin");

        let response = send(
            state,
            "POST",
            "/api/v1/fiscal-years/not-a-uuid/current",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
