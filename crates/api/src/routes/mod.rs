//! API route definitions.

use axum::{Router, middleware};
use serde::Deserialize;

use crate::{AppState, middleware::auth::auth_middleware};

pub mod bills;
pub mod budgets;
pub mod dashboard;
pub mod fiscal;
pub mod health;
pub mod object_codes;
pub mod reports;

/// Creates the public and protected routes.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(object_codes::routes())
        .merge(fiscal::routes())
        .merge(budgets::routes())
        .merge(dashboard::routes())
        .merge(reports::routes())
        .merge(bills::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}

/// `?expected_version=` on mutating requests.
///
/// When present the write is rejected with 409 unless the stored version
/// still matches.
#[derive(Debug, Default, Deserialize)]
pub struct VersionQuery {
    /// Version the caller last read.
    pub expected_version: Option<i32>,
}

/// `?include_inactive=` on list requests.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Include soft-deleted rows.
    #[serde(default)]
    pub include_inactive: bool,
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, header::AUTHORIZATION},
        response::Response,
    };
    use http_body_util::BodyExt;
    use sea_orm::DatabaseConnection;
    use tower::ServiceExt;
    use uuid::Uuid;

    use finoffice_shared::{JwtConfig, JwtService, config::ReportConfig};

    use crate::{AppState, create_router};

    /// State whose database is never reached.
    pub fn offline_state() -> AppState {
        AppState {
            db: Arc::new(DatabaseConnection::Disconnected),
            jwt_service: Arc::new(JwtService::new(JwtConfig::default())),
            report: Arc::new(ReportConfig::default()),
        }
    }

    pub fn token(state: &AppState, role: &str) -> String {
        state
            .jwt_service
            .generate_access_token(Uuid::new_v4(), "Test Officer", role)
            .expect("should generate token")
    }

    pub async fn send(
        state: AppState,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        create_router(state)
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    pub async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }
}
