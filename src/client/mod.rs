pub mod uploader;

pub use uploader::{ClientError, DEFAULT_ENDPOINT, PdfUploader, SelectedFile, UiState, UploadResult};
