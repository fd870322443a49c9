use crate::config::ProcessingConfig;
use anyhow::{Result, anyhow};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;

/// Trait for OCR engine implementations
#[async_trait::async_trait]
pub trait OcrEngine: Send + Sync {
    /// Produce an OCR-layered copy of `input` at `output`
    async fn process(&self, input: &Path, output: &Path) -> Result<()>;

    /// Check if the engine is available/healthy
    async fn health_check(&self) -> bool;

    fn name(&self) -> &'static str;
}

/// OCR engine shelling out to the `ocrmypdf` CLI.
///
/// `--force-ocr` rasterizes every page and lays a fresh text layer over
/// it, so scanned documents come out searchable even when they already
/// carry a broken one.
pub struct OcrmypdfEngine {
    binary: String,
    timeout: Duration,
}

impl OcrmypdfEngine {
    pub fn new(binary: String, timeout: Duration) -> Self {
        Self { binary, timeout }
    }
}

#[async_trait::async_trait]
impl OcrEngine for OcrmypdfEngine {
    async fn process(&self, input: &Path, output: &Path) -> Result<()> {
        let run = Command::new(&self.binary)
            .arg("--force-ocr")
            .arg(input)
            .arg(output)
            .output();

        let output_res = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| anyhow!("ocrmypdf timed out after {:?}", self.timeout))?
            .map_err(|e| anyhow!("failed to run {}: {}", self.binary, e))?;

        if !output_res.status.success() {
            let stderr = String::from_utf8_lossy(&output_res.stderr);
            return Err(anyhow!(
                "ocrmypdf exited with {}: {}",
                output_res.status,
                stderr.trim()
            ));
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .output()
            .await
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "ocrmypdf"
    }
}

/// Copies the input untouched. For development and tests.
pub struct PassthroughEngine;

#[async_trait::async_trait]
impl OcrEngine for PassthroughEngine {
    async fn process(&self, input: &Path, output: &Path) -> Result<()> {
        tracing::warn!("PassthroughEngine: skipping OCR (development mode)");
        tokio::fs::copy(input, output).await?;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}

/// Factory function to create the appropriate engine based on config
pub fn create_engine(config: &ProcessingConfig) -> Arc<dyn OcrEngine> {
    match config.ocr_engine.to_lowercase().as_str() {
        "ocrmypdf" => Arc::new(OcrmypdfEngine::new(
            config.ocrmypdf_path.clone(),
            Duration::from_secs(config.ocr_timeout_secs),
        )),
        "passthrough" | "none" | "disabled" => Arc::new(PassthroughEngine),
        other => {
            tracing::warn!("Unknown OCR engine '{}', using PassthroughEngine", other);
            Arc::new(PassthroughEngine)
        }
    }
}
