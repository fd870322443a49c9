use crate::services::extract::{self, ExtractError};
use crate::services::ocr::OcrEngine;
use crate::services::storage::LocalStorage;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("OCR failed: {0}")]
    Ocr(#[source] anyhow::Error),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[source] anyhow::Error),
}

/// Outcome of a successful upload: where the processed file lives and
/// what text came out of it.
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub filename: String,
    pub file_url: String,
    pub text: String,
}

/// Runs the upload pipeline: persist the original, OCR it into the
/// processed directory, extract its text.
pub struct ProcessorService {
    storage: Arc<LocalStorage>,
    ocr: Arc<dyn OcrEngine>,
}

impl ProcessorService {
    pub fn new(storage: Arc<LocalStorage>, ocr: Arc<dyn OcrEngine>) -> Self {
        Self { storage, ocr }
    }

    pub async fn process_upload(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<ProcessedDocument, ProcessError> {
        let input_path = self
            .storage
            .save_upload(filename, bytes)
            .await
            .map_err(ProcessError::Storage)?;

        let output_name = processed_name(filename);
        let output_path = self.storage.processed_path(&output_name);

        if let Err(e) = self.ocr.process(&input_path, &output_path).await {
            let _ = self.storage.delete_upload(filename).await;
            return Err(ProcessError::Ocr(e));
        }

        let processed = tokio::fs::read(&output_path)
            .await
            .map_err(|e| ProcessError::Storage(e.into()))?;

        let text = match extract::extract_text(&processed) {
            Ok(text) => text,
            Err(e) => {
                // A processed file we cannot read back must not stay
                // downloadable.
                let _ = tokio::fs::remove_file(&output_path).await;
                let _ = self.storage.delete_upload(filename).await;
                return Err(ProcessError::Extract(e));
            }
        };

        info!(
            "Processed {} -> {} ({} chars of text)",
            filename,
            output_name,
            text.len()
        );

        Ok(ProcessedDocument {
            file_url: format!("/download/{}", output_name),
            filename: output_name,
            text,
        })
    }
}

/// `report.pdf` becomes `report_ocr.pdf`, the name the download endpoint
/// hands out.
fn processed_name(filename: &str) -> String {
    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("upload");

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_ocr.{}", stem, ext),
        None => format!("{}_ocr", stem),
    }
}
