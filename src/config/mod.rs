use std::env;
use std::path::PathBuf;

/// Runtime configuration for the processing service
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    /// Maximum file size in bytes (default: 50 MB)
    pub max_file_size: usize,

    /// Directory where raw uploads are stored (default: "uploads")
    pub upload_dir: PathBuf,

    /// Directory where OCRed copies are stored (default: "processed")
    pub processed_dir: PathBuf,

    /// OCR engine: "ocrmypdf" or "passthrough" (default: "ocrmypdf")
    pub ocr_engine: String,

    /// Path to the ocrmypdf binary (default: "ocrmypdf")
    pub ocrmypdf_path: String,

    /// Timeout for a single OCR run in seconds (default: 300)
    pub ocr_timeout_secs: u64,

    /// Listen address (default: "127.0.0.1:5000")
    pub bind_addr: String,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024, // 50 MB
            upload_dir: PathBuf::from("uploads"),
            processed_dir: PathBuf::from("processed"),
            ocr_engine: "ocrmypdf".to_string(),
            ocrmypdf_path: "ocrmypdf".to_string(),
            ocr_timeout_secs: 300,
            bind_addr: "127.0.0.1:5000".to_string(),
        }
    }
}

impl ProcessingConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            max_file_size: env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_file_size),

            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.upload_dir),

            processed_dir: env::var("PROCESSED_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.processed_dir),

            ocr_engine: env::var("OCR_ENGINE").unwrap_or(default.ocr_engine),

            ocrmypdf_path: env::var("OCRMYPDF_PATH").unwrap_or(default.ocrmypdf_path),

            ocr_timeout_secs: env::var("OCR_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.ocr_timeout_secs),

            bind_addr: env::var("BIND_ADDR").unwrap_or(default.bind_addr),
        }
    }

    /// Create config for development (no real OCR, relaxed limits)
    pub fn development() -> Self {
        Self {
            ocr_engine: "passthrough".to_string(),
            ..Self::default()
        }
    }
}
