//! Object code and level catalog routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};

use finoffice_core::catalog::{
    ImportIssue, ImportRow, LevelInput, ObjectCode, ObjectCodeInput, parse_import,
};
use finoffice_db::CatalogRepository;
use finoffice_shared::types::{ObjectCodeId, ObjectCodeLevelId};

use crate::{
    AppState,
    error::ApiResult,
    middleware::AuthUser,
    routes::ListQuery,
};

/// Creates the catalog routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/object-code-levels", get(list_levels).post(create_level))
        .route(
            "/object-code-levels/{id}",
            put(update_level).delete(delete_level),
        )
        .route("/object-codes", get(list_object_codes).post(create_object_code))
        .route("/object-codes/import", post(import_object_codes))
        .route(
            "/object-codes/{id}",
            get(get_object_code)
                .put(update_object_code)
                .delete(delete_object_code),
        )
}

/// Query for bulk import.
#[derive(Debug, Default, Deserialize)]
pub struct ImportQuery {
    /// Parse only; nothing is written.
    #[serde(default)]
    pub dry_run: bool,
    /// Level assigned to every imported code.
    pub level_id: Option<ObjectCodeLevelId>,
}

/// Bulk import result.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    /// True when nothing was written.
    pub dry_run: bool,
    /// Rows that parsed cleanly.
    pub rows: Vec<ImportRow>,
    /// Lines skipped by the parser.
    pub issues: Vec<ImportIssue>,
    /// Codes created.
    pub created: Vec<ObjectCode>,
    /// Codes skipped because they already exist.
    pub existing: Vec<String>,
    /// Rows that parsed but failed validation.
    pub rejected: Vec<ImportIssue>,
}

fn repo(state: &AppState) -> CatalogRepository {
    CatalogRepository::new((*state.db).clone())
}

async fn list_levels(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let levels = repo(&state).list_levels(query.include_inactive).await?;
    Ok(Json(levels))
}

async fn create_level(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<LevelInput>,
) -> ApiResult<impl IntoResponse> {
    let level = repo(&state).create_level(payload).await?;
    Ok((StatusCode::CREATED, Json(level)))
}

async fn update_level(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<ObjectCodeLevelId>,
    Json(payload): Json<LevelInput>,
) -> ApiResult<impl IntoResponse> {
    let level = repo(&state).update_level(id, payload).await?;
    Ok(Json(level))
}

/// DELETE `/object-code-levels/{id}` - Soft delete; refused while in use.
async fn delete_level(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<ObjectCodeLevelId>,
) -> ApiResult<impl IntoResponse> {
    repo(&state).deactivate_level(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_object_codes(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let codes = repo(&state).list_object_codes(query.include_inactive).await?;
    Ok(Json(codes))
}

async fn get_object_code(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<ObjectCodeId>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(repo(&state).get_object_code(id).await?))
}

async fn create_object_code(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<ObjectCodeInput>,
) -> ApiResult<impl IntoResponse> {
    let code = repo(&state).create_object_code(payload).await?;
    Ok((StatusCode::CREATED, Json(code)))
}

async fn update_object_code(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<ObjectCodeId>,
    Json(payload): Json<ObjectCodeInput>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(repo(&state).update_object_code(id, payload).await?))
}

async fn delete_object_code(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<ObjectCodeId>,
) -> ApiResult<impl IntoResponse> {
    repo(&state).deactivate_object_code(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `/object-codes/import` - Bulk import from pasted text.
///
/// One code and head of account per line. With `dry_run` the parse result
/// is returned and nothing is written.
async fn import_object_codes(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ImportQuery>,
    body: String,
) -> ApiResult<impl IntoResponse> {
    let report = parse_import(&body);

    if query.dry_run {
        return Ok(Json(ImportResponse {
            dry_run: true,
            rows: report.rows,
            issues: report.issues,
            created: Vec::new(),
            existing: Vec::new(),
            rejected: Vec::new(),
        }));
    }

    let outcome = repo(&state)
        .import_object_codes(&report, query.level_id)
        .await?;

    Ok(Json(ImportResponse {
        dry_run: false,
        rows: report.rows,
        issues: report.issues,
        created: outcome.created,
        existing: outcome.existing,
        rejected: outcome.rejected,
    }))
}
