use crate::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub storage: String,
    pub ocr: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health status", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let storage_status = if state.storage.is_ready().await {
        "ready"
    } else {
        "unavailable"
    };

    let ocr_status = if state.ocr.health_check().await {
        format!("{} available", state.ocr.name())
    } else {
        format!("{} unavailable", state.ocr.name())
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        storage: storage_status.to_string(),
        ocr: ocr_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
