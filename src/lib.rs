pub mod api;
pub mod client;
pub mod config;
pub mod services;
pub mod utils;

use crate::config::ProcessingConfig;
use crate::services::ocr::OcrEngine;
use crate::services::processor::ProcessorService;
use crate::services::storage::LocalStorage;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::files::upload_pdf,
        api::handlers::files::download_pdf,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::files::UploadResponse,
            api::handlers::files::PdfUploadForm,
            api::handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "files", description = "PDF upload and download endpoints"),
        (name = "system", description = "Service status endpoints")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<LocalStorage>,
    pub ocr: Arc<dyn OcrEngine>,
    pub processor: Arc<ProcessorService>,
    pub config: ProcessingConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route("/upload", post(api::handlers::files::upload_pdf))
        .route(
            "/download/:filename",
            get(api::handlers::files::download_pdf),
        )
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
