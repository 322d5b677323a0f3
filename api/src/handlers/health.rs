use axum::{response::IntoResponse, Json};

/// Liveness probe; carries no information beyond process reachability.
#[tracing::instrument]
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
