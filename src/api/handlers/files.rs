use crate::AppState;
use crate::api::error::AppError;
use crate::services::processor::ProcessError;
use crate::utils::validation::{ValidationError, sanitize_filename, validate_pdf_upload};
use axum::{
    Json,
    body::Body,
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::Serialize;
use tokio_util::io::ReaderStream;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub file_url: String,
    pub text: String,
}

/// Multipart shape of the upload request, for the OpenAPI document only.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct PdfUploadForm {
    #[schema(value_type = String, format = Binary)]
    file: String,
}

#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = PdfUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File processed successfully", body = UploadResponse),
        (status = 400, description = "Missing or invalid file"),
        (status = 413, description = "File exceeds the size limit"),
        (status = 500, description = "OCR processing failed")
    ),
    tag = "files"
)]
pub async fn upload_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(AppError::BadRequest("No selected file".to_string()));
        }
        let content_type = field.content_type().map(|s| s.to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let header_len = data.len().min(1024);
        let sanitized = validate_pdf_upload(
            &filename,
            content_type.as_deref(),
            data.len(),
            &data[..header_len],
            state.config.max_file_size,
        )
        .map_err(|e| match e {
            ValidationError::FileTooLarge { .. } => AppError::PayloadTooLarge(e.to_string()),
            other => AppError::BadRequest(other.to_string()),
        })?;

        upload = Some((sanitized, data));
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::BadRequest("No file part".to_string()))?;

    let doc = state
        .processor
        .process_upload(&filename, &data)
        .await
        .map_err(|e| match e {
            ProcessError::Ocr(source) => {
                tracing::error!("OCR failed for {}: {:?}", filename, source);
                AppError::Processing("OCR processing failed".to_string())
            }
            ProcessError::Extract(source) => {
                tracing::error!("Text extraction failed for {}: {}", filename, source);
                AppError::Processing("OCR processing failed".to_string())
            }
            ProcessError::Storage(source) => AppError::Internal(source.to_string()),
        })?;

    Ok(Json(UploadResponse {
        message: "File processed successfully".to_string(),
        file_url: doc.file_url,
        text: doc.text,
    }))
}

#[utoipa::path(
    get,
    path = "/download/{filename}",
    params(
        ("filename" = String, Path, description = "Name of a processed file")
    ),
    responses(
        (status = 200, description = "Processed PDF stream"),
        (status = 404, description = "File not found")
    ),
    tag = "files"
)]
pub async fn download_pdf(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    // Anything that does not survive sanitization untouched is a name we
    // never handed out.
    let safe_name =
        sanitize_filename(&filename).map_err(|_| AppError::NotFound("File not found".to_string()))?;
    if safe_name != filename {
        return Err(AppError::NotFound("File not found".to_string()));
    }

    let file = state
        .storage
        .open_processed(&safe_name)
        .await
        .map_err(|_| AppError::NotFound("File not found".to_string()))?;

    let body = Body::from_stream(ReaderStream::new(file));

    let headers = [
        (
            header::CONTENT_TYPE,
            mime::APPLICATION_PDF.as_ref().to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", safe_name),
        ),
    ];

    Ok((headers, body).into_response())
}
