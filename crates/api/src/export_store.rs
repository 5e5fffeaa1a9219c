//! Durable blob store for export documents.
//!
//! Export documents are written here before being streamed back to the
//! requester and are deleted as soon as the response body is built -- the
//! store is a pass-through, not an archive.

use std::path::{Path, PathBuf};

/// Filesystem-backed blob store rooted at a base directory.
#[derive(Debug, Clone)]
pub struct ExportStore {
    base_dir: PathBuf,
}

impl ExportStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Absolute-ish locator for a stored document.
    pub fn path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    /// Write a document, creating the base directory on first use.
    pub async fn put(&self, filename: &str, bytes: &[u8]) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.base_dir).await?;
        tokio::fs::write(self.path(filename), bytes).await
    }

    /// Remove a stored document. Missing files are not an error: the store
    /// only ever holds in-flight exports.
    pub async fn delete(&self, filename: &str) -> std::io::Result<()> {
        match tokio::fs::remove_file(self.path(filename)).await {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_path_delete_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = ExportStore::new(dir.path());

        store.put("corpus.json", b"[]").await.unwrap();
        let path = store.path("corpus.json");
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"[]");

        store.delete("corpus.json").await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = ExportStore::new(dir.path());
        assert!(store.delete("never-written.json").await.is_ok());
    }
}
