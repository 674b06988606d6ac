//! File system object store
//!
//! Keeps uploaded document bytes as plain files under a base directory, for
//! offline use of the document service.
//!
//! Object paths are relative to the base directory. Paths with a `..` segment
//! are rejected and resolved paths must stay inside the base directory. Dots
//! inside a file name such as `report..final.csv` are fine.

use super::{FileStore, StorageError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Object store rooted at a local directory
pub struct FileSystemFileStore {
    base_path: PathBuf,
}

impl FileSystemFileStore {
    /// Create a store rooted at `base_path`
    ///
    /// # Example
    ///
    /// ```rust
    /// use stock_pail::storage::filesystem::FileSystemFileStore;
    ///
    /// let store = FileSystemFileStore::new("/var/lib/stock-pail/documents");
    /// assert!(store.base_path().ends_with("documents"));
    /// ```
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn base_canonical(&self) -> PathBuf {
        self.base_path
            .canonicalize()
            .unwrap_or_else(|_| self.base_path.clone())
    }

    /// Map an object path to a file path inside the base directory
    fn resolve_path(&self, path: &str) -> Result<PathBuf, StorageError> {
        let normalized = path.trim_start_matches('/');
        if normalized.is_empty() {
            return Err(StorageError::PermissionDenied(
                "Empty object path".to_string(),
            ));
        }
        if normalized.split(['/', '\\']).any(|segment| segment == "..") {
            return Err(StorageError::PermissionDenied(
                "Path traversal (..) not allowed".to_string(),
            ));
        }

        let full = self.base_path.join(normalized);
        if full
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(StorageError::PermissionDenied(
                "Path traversal not allowed".to_string(),
            ));
        }

        // Symlinks may still point outside; check whatever already exists.
        let existing = if full.exists() {
            Some(full.as_path())
        } else {
            full.parent().filter(|p| p.exists())
        };
        if let Some(existing) = existing {
            let canonical = existing
                .canonicalize()
                .map_err(|e| StorageError::IoError(format!("Failed to resolve path: {}", e)))?;
            if !canonical.starts_with(self.base_canonical()) {
                return Err(StorageError::PermissionDenied(
                    "Path escapes base directory".to_string(),
                ));
            }
        }

        Ok(full)
    }
}

#[async_trait(?Send)]
impl FileStore for FileSystemFileStore {
    async fn upload(&self, path: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let full_path = self.resolve_path(path)?;
        if fs::try_exists(&full_path).await.unwrap_or(false) {
            return Err(StorageError::BackendError(format!(
                "Object already exists: {}",
                path
            )));
        }

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::IoError(format!("Failed to create directory for {}: {}", path, e))
            })?;
        }

        fs::write(&full_path, bytes)
            .await
            .map_err(|e| StorageError::IoError(format!("Failed to write object {}: {}", path, e)))?;
        debug!(path, size = bytes.len(), "Stored object");
        Ok(())
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let full_path = self.resolve_path(path)?;
        fs::read(&full_path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::FileNotFound(path.to_string())
            } else {
                StorageError::IoError(format!("Failed to read object {}: {}", path, e))
            }
        })
    }

    async fn remove(&self, paths: &[String]) -> Result<(), StorageError> {
        for path in paths {
            let full_path = self.resolve_path(path)?;
            match fs::remove_file(&full_path).await {
                Ok(()) => debug!(path = %path, "Removed object"),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    warn!(path = %path, "Object already absent")
                }
                Err(e) => {
                    return Err(StorageError::IoError(format!(
                        "Failed to remove object {}: {}",
                        path, e
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_traversal_blocked() {
        let temp = TempDir::new().unwrap();
        let store = FileSystemFileStore::new(temp.path());

        let result = store.resolve_path("../etc/passwd");
        assert!(matches!(result, Err(StorageError::PermissionDenied(_))));

        let result = store.resolve_path("/docs/../../../etc/passwd");
        assert!(matches!(result, Err(StorageError::PermissionDenied(_))));

        let result = store.resolve_path("/");
        assert!(matches!(result, Err(StorageError::PermissionDenied(_))));

        assert!(store.resolve_path("1700000000000-report.pdf").is_ok());
        assert!(store.resolve_path("/nested/sheet.xlsx").is_ok());
    }

    #[tokio::test]
    async fn test_dotted_file_name_allowed() {
        let temp = TempDir::new().unwrap();
        let store = FileSystemFileStore::new(temp.path());

        store
            .upload("1700000000000-report..final.csv", b"a,b")
            .await
            .unwrap();
        assert_eq!(
            store.download("1700000000000-report..final.csv").await.unwrap(),
            b"a,b"
        );
        assert!(matches!(
            store.resolve_path("docs/../secret"),
            Err(StorageError::PermissionDenied(_))
        ));
        assert!(matches!(
            store.resolve_path(".."),
            Err(StorageError::PermissionDenied(_))
        ));
    }

    #[tokio::test]
    async fn test_upload_download_remove() {
        let temp = TempDir::new().unwrap();
        let store = FileSystemFileStore::new(temp.path());

        store.upload("a/1-notes.csv", b"x,y\n1,2").await.unwrap();
        assert!(temp.path().join("a/1-notes.csv").exists());
        assert!(store.upload("a/1-notes.csv", b"dup").await.is_err());
        assert_eq!(store.download("a/1-notes.csv").await.unwrap(), b"x,y\n1,2");

        store
            .remove(&["a/1-notes.csv".to_string(), "missing".to_string()])
            .await
            .unwrap();
        assert!(matches!(
            store.download("a/1-notes.csv").await,
            Err(StorageError::FileNotFound(_))
        ));
    }
}
