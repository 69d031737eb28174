//! HTTP API layer for the finance office backend.
//!
//! Every route lives under `/api/v1`. All routes except `/health` require a
//! bearer token whose claims carry the caller's id and officer role.

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use finoffice_shared::{JwtService, config::ReportConfig};

pub mod error;
pub mod middleware;
pub mod routes;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Bearer token validation.
    pub jwt_service: Arc<JwtService>,
    /// Report title and dashboard defaults.
    pub report: Arc<ReportConfig>,
}

/// Creates the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
