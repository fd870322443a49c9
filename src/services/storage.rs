use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use uuid::Uuid;

/// Local-disk storage with separate roots for raw uploads and processed
/// output.
pub struct LocalStorage {
    upload_dir: PathBuf,
    processed_dir: PathBuf,
}

impl LocalStorage {
    /// Open the storage roots, creating them if missing.
    pub async fn new(upload_dir: &Path, processed_dir: &Path) -> Result<Self> {
        fs::create_dir_all(upload_dir)
            .await
            .with_context(|| format!("creating upload dir {}", upload_dir.display()))?;
        fs::create_dir_all(processed_dir)
            .await
            .with_context(|| format!("creating processed dir {}", processed_dir.display()))?;

        Ok(Self {
            upload_dir: upload_dir.to_path_buf(),
            processed_dir: processed_dir.to_path_buf(),
        })
    }

    /// Write an upload under a staging name, then promote it to its final
    /// filename. Readers never observe a partially written file.
    pub async fn save_upload(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let staging = self.upload_dir.join(format!(".staging-{}", Uuid::new_v4()));
        fs::write(&staging, bytes)
            .await
            .with_context(|| format!("writing staged upload {}", staging.display()))?;

        let target = self.upload_dir.join(filename);
        fs::rename(&staging, &target)
            .await
            .with_context(|| format!("promoting staged upload to {}", target.display()))?;

        Ok(target)
    }

    pub fn processed_path(&self, filename: &str) -> PathBuf {
        self.processed_dir.join(filename)
    }

    pub async fn processed_exists(&self, filename: &str) -> bool {
        fs::metadata(self.processed_path(filename)).await.is_ok()
    }

    pub async fn open_processed(&self, filename: &str) -> Result<File> {
        let path = self.processed_path(filename);
        File::open(&path)
            .await
            .with_context(|| format!("opening processed file {}", path.display()))
    }

    pub async fn delete_upload(&self, filename: &str) -> Result<()> {
        let path = self.upload_dir.join(filename);
        fs::remove_file(&path)
            .await
            .with_context(|| format!("deleting upload {}", path.display()))?;
        Ok(())
    }

    /// Both roots still present and reachable.
    pub async fn is_ready(&self) -> bool {
        fs::metadata(&self.upload_dir).await.is_ok() && fs::metadata(&self.processed_dir).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_storage() -> (LocalStorage, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(&dir.path().join("uploads"), &dir.path().join("processed"))
            .await
            .unwrap();
        (storage, dir)
    }

    #[tokio::test]
    async fn save_upload_writes_content_under_final_name() {
        let (storage, dir) = temp_storage().await;

        let path = storage.save_upload("test.pdf", b"%PDF-1.5 content").await.unwrap();
        assert_eq!(path, dir.path().join("uploads").join("test.pdf"));
        assert_eq!(fs::read(&path).await.unwrap(), b"%PDF-1.5 content");

        // No staging leftovers
        let mut entries = fs::read_dir(dir.path().join("uploads")).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name());
        }
        assert_eq!(names, vec!["test.pdf"]);
    }

    #[tokio::test]
    async fn processed_roundtrip() {
        let (storage, _dir) = temp_storage().await;

        assert!(!storage.processed_exists("out.pdf").await);
        fs::write(storage.processed_path("out.pdf"), b"done").await.unwrap();
        assert!(storage.processed_exists("out.pdf").await);

        let mut file = storage.open_processed("out.pdf").await.unwrap();
        let mut content = Vec::new();
        tokio::io::AsyncReadExt::read_to_end(&mut file, &mut content).await.unwrap();
        assert_eq!(content, b"done");
    }

    #[tokio::test]
    async fn delete_upload_removes_file() {
        let (storage, _dir) = temp_storage().await;

        storage.save_upload("gone.pdf", b"x").await.unwrap();
        storage.delete_upload("gone.pdf").await.unwrap();
        assert!(storage.delete_upload("gone.pdf").await.is_err());
    }

    #[tokio::test]
    async fn is_ready_after_setup() {
        let (storage, _dir) = temp_storage().await;
        assert!(storage.is_ready().await);
    }
}
