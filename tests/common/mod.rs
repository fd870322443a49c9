//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use pdf_process::AppState;
use pdf_process::config::ProcessingConfig;
use pdf_process::services::ocr;
use pdf_process::services::processor::ProcessorService;
use pdf_process::services::storage::LocalStorage;
use std::sync::Arc;
use tempfile::TempDir;

/// One-page PDF containing "Hello World!", built with lopdf so the
/// extraction path has real content to chew on.
pub fn sample_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 48.into()]),
            Operation::new("Td", vec![100.into(), 600.into()]),
            Operation::new("Tj", vec![Object::string_literal("Hello World!")]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encoding content stream"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serializing sample PDF");
    bytes
}

/// App state over temp directories with OCR stubbed out
pub async fn test_state() -> (AppState, TempDir) {
    let dir = tempfile::tempdir().expect("creating temp dir");
    let config = ProcessingConfig {
        upload_dir: dir.path().join("uploads"),
        processed_dir: dir.path().join("processed"),
        ..ProcessingConfig::development()
    };

    let storage = Arc::new(
        LocalStorage::new(&config.upload_dir, &config.processed_dir)
            .await
            .expect("creating storage dirs"),
    );
    let engine = ocr::create_engine(&config);
    let processor = Arc::new(ProcessorService::new(storage.clone(), engine.clone()));

    (
        AppState {
            storage,
            ocr: engine,
            processor,
            config,
        },
        dir,
    )
}

pub const BOUNDARY: &str = "---------------------------123456789012345678901234567";

/// Hand-built multipart body with a single `file` field
pub fn multipart_file_body(filename: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}
