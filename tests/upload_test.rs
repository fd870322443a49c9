mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use pdf_process::create_app;
use serde_json::Value;
use tower::ServiceExt;

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", common::BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_upload_processes_pdf_and_returns_text() {
    let (state, _dir) = common::test_state().await;
    let app = create_app(state);

    let pdf = common::sample_pdf();
    let body = common::multipart_file_body("report.pdf", "application/pdf", &pdf);

    let response = app.oneshot(upload_request(body)).await.unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    if status != StatusCode::OK {
        panic!(
            "Upload failed with status {}: {:?}",
            status,
            String::from_utf8_lossy(&body)
        );
    }

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["message"], "File processed successfully");
    assert_eq!(json["file_url"], "/download/report_ocr.pdf");
    assert!(json["text"].as_str().unwrap().contains("Hello World"));
}

#[tokio::test]
async fn test_upload_without_file_field_is_rejected() {
    let (state, _dir) = common::test_state().await;
    let app = create_app(state);

    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"comment\"\r\n\r\nhello\r\n--{b}--\r\n",
        b = common::BOUNDARY
    );

    let response = app.oneshot(upload_request(body.into_bytes())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "No file part");
}

#[tokio::test]
async fn test_upload_with_empty_filename_is_rejected() {
    let (state, _dir) = common::test_state().await;
    let app = create_app(state);

    let body = common::multipart_file_body("", "application/pdf", b"%PDF-1.5");
    let response = app.oneshot(upload_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "No selected file");
}

#[tokio::test]
async fn test_upload_rejects_non_pdf_extension() {
    let (state, _dir) = common::test_state().await;
    let app = create_app(state);

    let body = common::multipart_file_body("notes.txt", "text/plain", b"hello");
    let response = app.oneshot(upload_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Invalid file type. Only PDF files are allowed");
}

#[tokio::test]
async fn test_upload_rejects_pdf_named_garbage() {
    let (state, _dir) = common::test_state().await;
    let app = create_app(state);

    let body = common::multipart_file_body("fake.pdf", "application/pdf", b"not a pdf at all");
    let response = app.oneshot(upload_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "File content does not look like a PDF");
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let (mut state, _dir) = common::test_state().await;
    state.config.max_file_size = 16;
    let app = create_app(state);

    let body = common::multipart_file_body("report.pdf", "application/pdf", &common::sample_pdf());
    let response = app.oneshot(upload_request(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_health_reports_component_status() {
    let (state, _dir) = common::test_state().await;
    let app = create_app(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["storage"], "ready");
    assert_eq!(json["ocr"], "passthrough available");
}
