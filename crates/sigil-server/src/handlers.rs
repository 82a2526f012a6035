//! HTTP handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::json;
use sigil_auth::BearerAuth;
use sigil_db_postgres::pool;

use crate::server::AppState;

/// Liveness/readiness probe. Degrades (503) when the database is
/// unreachable so load balancers stop routing before requests fail.
pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    match pool::ping(&state.pool).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(err) => {
            tracing::warn!(error = %err, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded" })),
            )
        }
    }
}

/// Identity of the authenticated caller.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// Subject claim of the presented token.
    pub subject: Option<String>,
    /// Expiry of the presented token (Unix timestamp).
    pub expires_at: Option<i64>,
}

/// Returns the identity established by the bearer token.
///
/// Reaching this handler at all means verification succeeded; the
/// extractor rejects everything else with a uniform 401.
pub async fn me(BearerAuth(claims): BearerAuth) -> Json<MeResponse> {
    Json(MeResponse {
        subject: claims.sub.clone(),
        expires_at: claims.exp,
    })
}
