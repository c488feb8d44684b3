use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

use super::{sanitize_folder, ObjectStore, StoredObject};
use crate::error::ActionError;

/// Filesystem-backed store; objects are served back under `base_url`.
pub struct LocalObjectStore {
    root: PathBuf,
    base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a storage path below the root, rejecting anything that could escape it.
    fn resolve(&self, path: &str) -> Result<PathBuf, ActionError> {
        let relative = Path::new(path);
        let clean = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if path.is_empty() || !clean {
            return Err(ActionError::Validation(format!("Invalid storage path: {}", path)));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(&self, folder: &str, filename: &str, bytes: Vec<u8>) -> Result<StoredObject, ActionError> {
        let folder = sanitize_folder(folder)?;
        let path = format!("{}/{}", folder, filename);
        let full_path = self.resolve(&path)?;

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ActionError::Storage(format!("Failed to create {}: {}", folder, e)))?;
        }
        tokio::fs::write(&full_path, &bytes)
            .await
            .map_err(|e| ActionError::Storage(format!("Failed to write {}: {}", path, e)))?;

        log::info!("[STORAGE] Stored {} ({} bytes)", path, bytes.len());
        Ok(StoredObject {
            url: format!("{}/{}", self.base_url, path),
            path,
        })
    }

    async fn delete(&self, path: &str) -> Result<(), ActionError> {
        let full_path = self.resolve(path)?;
        tokio::fs::remove_file(&full_path)
            .await
            .map_err(|e| ActionError::Storage(format!("Failed to delete {}: {}", path, e)))
    }

    fn path_from_url(&self, url: &str) -> Option<String> {
        let rest = url
            .strip_prefix(&self.base_url)
            .or_else(|| url.strip_prefix("/media"))?;
        let path = rest.strip_prefix('/')?;
        // Drop cache-busting query strings
        let path = path.split(['?', '#']).next().unwrap_or(path);
        if path.is_empty() {
            None
        } else {
            Some(path.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_put_then_delete_via_url() {
        let dir = TempDir::new().unwrap();
        let store = LocalObjectStore::new(dir.path(), "http://localhost:8080/media/");

        let stored = store.put("news-images", "abc.png", vec![1, 2, 3]).await.unwrap();
        assert_eq!(stored.path, "news-images/abc.png");
        assert_eq!(stored.url, "http://localhost:8080/media/news-images/abc.png");
        assert!(dir.path().join("news-images/abc.png").exists());

        let path = store.path_from_url(&stored.url).unwrap();
        assert_eq!(path, stored.path);
        assert_eq!(
            store.path_from_url("/media/news-images/abc.png?v=2").as_deref(),
            Some("news-images/abc.png")
        );
        assert!(store.path_from_url("https://elsewhere.example.com/a.png").is_none());

        store.delete(&path).await.unwrap();
        assert!(!dir.path().join("news-images/abc.png").exists());
        assert!(store.delete(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let store = LocalObjectStore::new(dir.path(), "/media");
        assert!(store.delete("../secrets.txt").await.unwrap_err().is_validation());
        assert!(store.put("..", "x.png", vec![]).await.is_err());
    }
}
