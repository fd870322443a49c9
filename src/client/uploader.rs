use crate::utils::validation::has_pdf_extension;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use url::Url;

/// Upload endpoint of the hosted service; tests and the CLI can point
/// elsewhere.
pub const DEFAULT_ENDPOINT: &str = "https://pdf-process-backend-6.onrender.com/upload";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid endpoint URL: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("Only PDF files are accepted: {0}")]
    NotAPdf(String),

    #[error("Could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Upload failed: {0}")]
    Status(reqwest::StatusCode),

    #[error("Nothing has been uploaded yet")]
    NoResult,

    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// The user's chosen file: name plus raw content. Replaced wholesale on
/// each new selection.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Response payload of the processing service
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResult {
    pub file_url: String,
    pub text: String,
}

/// Transient presentation flags
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Client-side counterpart of the upload form: holds the selected file,
/// performs the upload, and keeps the flags a front end renders from.
pub struct PdfUploader {
    endpoint: Url,
    http: reqwest::Client,
    selected: Option<SelectedFile>,
    result: Option<UploadResult>,
    state: UiState,
}

impl PdfUploader {
    /// `endpoint` is the full upload URL, e.g. `http://127.0.0.1:5000/upload`
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        Ok(Self {
            endpoint: Url::parse(endpoint)?,
            http: reqwest::Client::new(),
            selected: None,
            result: None,
            state: UiState::default(),
        })
    }

    /// Accept a chosen file and clear any prior error. Mirrors the drop
    /// zone filter: only the `.pdf` extension is checked here, content is
    /// left to the service.
    pub async fn select_file(&mut self, path: &Path) -> Result<(), ClientError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        if !has_pdf_extension(&name) {
            return Err(ClientError::NotAPdf(name));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::Read {
                path: path.display().to_string(),
                source,
            })?;

        self.selected = Some(SelectedFile { name, bytes });
        self.state.error = None;
        Ok(())
    }

    /// Whether the submit control should be enabled: a file is selected
    /// and no upload is in flight
    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.state.is_loading
    }

    /// Submit the selected file. Failures land in `error()`, success in
    /// `result()`; the loading flag is cleared on every path.
    pub async fn upload(&mut self) {
        let Some(file) = self.selected.clone() else {
            self.state.error = Some("Please select a file first!".to_string());
            return;
        };

        self.state.is_loading = true;
        self.state.error = None;

        match self.send(file).await {
            Ok(result) => self.result = Some(result),
            Err(e) => {
                tracing::error!("Error uploading file: {}", e);
                self.state.error = Some(format!("Error uploading file: {}", e));
            }
        }

        self.state.is_loading = false;
    }

    async fn send(&self, file: SelectedFile) -> Result<UploadResult, ClientError> {
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(mime::APPLICATION_PDF.as_ref())?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        Ok(response.json::<UploadResult>().await?)
    }

    /// Absolute link to the processed file: endpoint origin plus the
    /// path the service returned
    pub fn download_url(&self) -> Option<String> {
        self.result.as_ref().map(|r| {
            format!(
                "{}{}",
                self.endpoint.origin().ascii_serialization(),
                r.file_url
            )
        })
    }

    /// Fetch the processed file behind `download_url()`
    pub async fn download_processed(&self) -> Result<bytes::Bytes, ClientError> {
        let url = self.download_url().ok_or(ClientError::NoResult)?;

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        Ok(response.bytes().await?)
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn result(&self) -> Option<&UploadResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }
}
