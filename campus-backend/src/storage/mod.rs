//! Object storage for uploaded media.

mod local;

pub use local::LocalObjectStore;

use async_trait::async_trait;

use crate::error::ActionError;

/// Where an uploaded object ended up.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StoredObject {
    /// Storage path, `{folder}/{filename}`.
    pub path: String,
    /// Public URL that database documents reference.
    pub url: String,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, folder: &str, filename: &str, bytes: Vec<u8>) -> Result<StoredObject, ActionError>;

    async fn delete(&self, path: &str) -> Result<(), ActionError>;

    /// Storage path for a URL this store handed out, `None` for anything else.
    fn path_from_url(&self, url: &str) -> Option<String>;
}

/// Best-effort removal of a file a record no longer references.
///
/// Failures are logged and swallowed: the record change has already happened
/// and is what the caller reports on.
pub async fn remove_orphaned_file(store: &dyn ObjectStore, url: Option<&str>) {
    let Some(url) = url else {
        return;
    };
    let Some(path) = store.path_from_url(url) else {
        log::debug!("[STORAGE] Not deleting {}: not a stored object", url);
        return;
    };
    match store.delete(&path).await {
        Ok(()) => log::info!("[STORAGE] Deleted orphaned file {}", path),
        Err(e) => log::warn!("[STORAGE] Failed to delete orphaned file {}: {}", path, e),
    }
}

/// Normalise a caller-supplied folder name (`news-images`, `images/campus`).
pub fn sanitize_folder(folder: &str) -> Result<String, ActionError> {
    let trimmed = folder.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Err(ActionError::Validation("Folder must not be empty".to_string()));
    }
    let valid = trimmed.split('/').all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    });
    if !valid {
        return Err(ActionError::Validation(format!("Invalid folder name: {}", folder)));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// In-memory store that records deletes and can be told to fail them.
    pub struct RecordingStore {
        pub fail_deletes: bool,
        pub deleted: Mutex<Vec<String>>,
    }

    impl RecordingStore {
        pub fn new(fail_deletes: bool) -> Self {
            Self {
                fail_deletes,
                deleted: Mutex::new(Vec::new()),
            }
        }

        pub fn deleted(&self) -> Vec<String> {
            self.deleted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ObjectStore for RecordingStore {
        async fn put(&self, folder: &str, filename: &str, _bytes: Vec<u8>) -> Result<StoredObject, ActionError> {
            let path = format!("{}/{}", folder, filename);
            Ok(StoredObject {
                url: format!("/media/{}", path),
                path,
            })
        }

        async fn delete(&self, path: &str) -> Result<(), ActionError> {
            self.deleted.lock().unwrap().push(path.to_string());
            if self.fail_deletes {
                Err(ActionError::Storage("simulated storage outage".to_string()))
            } else {
                Ok(())
            }
        }

        fn path_from_url(&self, url: &str) -> Option<String> {
            url.strip_prefix("/media/").map(|p| p.to_string())
        }
    }
}
