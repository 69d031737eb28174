//! Dashboard routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

use finoffice_core::dashboard::MAX_TOP_N;
use finoffice_db::DashboardRepository;
use finoffice_shared::types::FiscalYearId;

use crate::{AppState, error::ApiResult, middleware::AuthUser};

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

/// Query parameters for the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Fiscal year; defaults to the current one.
    pub fiscal_year_id: Option<FiscalYearId>,
    /// Length of the top expenditure list.
    pub top: Option<usize>,
}

/// Resolves the top-N length: the caller's value or the configured default,
/// capped at [`MAX_TOP_N`].
fn top_n(requested: Option<usize>, default: usize) -> usize {
    requested.unwrap_or(default).min(MAX_TOP_N)
}

/// GET `/dashboard?fiscal_year_id=&top=` - Category, consolidated and
/// department summaries plus the largest expenditures.
async fn get_dashboard(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<impl IntoResponse> {
    let top = top_n(query.top, state.report.dashboard_top_n);
    let view = DashboardRepository::new((*state.db).clone())
        .summary(query.fiscal_year_id, top)
        .await?;
    Ok(Json(view))
}
