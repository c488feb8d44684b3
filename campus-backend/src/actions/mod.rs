//! Content actions: validate, write, clean up, revalidate.
//!
//! Every admin mutation and public form submission goes through an action so
//! the HTTP layer only deals with extraction and status codes. Actions return
//! `Result<_, ActionError>`; `ActionError::is_validation` separates the
//! caller's mistakes from infrastructure failures.

mod academics;
mod alumni;
mod careers;
mod news;
mod sections;
mod site_content;
mod submissions;

pub use site_content::content_page_path;

use std::sync::Arc;
use validator::Validate;

use crate::cache::PageCache;
use crate::db::Database;
use crate::error::ActionError;
use crate::mail::Mailer;
use crate::storage::{remove_orphaned_file, ObjectStore};

/// Everything an action needs to touch.
#[derive(Clone)]
pub struct Actions {
    pub db: Arc<Database>,
    pub store: Arc<dyn ObjectStore>,
    pub mailer: Arc<dyn Mailer>,
    pub cache: PageCache,
    /// Inbox that receives submission notifications.
    pub notify_to: String,
}

impl Actions {
    pub fn new(
        db: Arc<Database>,
        store: Arc<dyn ObjectStore>,
        mailer: Arc<dyn Mailer>,
        cache: PageCache,
        notify_to: String,
    ) -> Self {
        Self { db, store, mailer, cache, notify_to }
    }

    /// Delete the previously referenced image when a write replaced or
    /// dropped it. Never fails.
    async fn cleanup_replaced_image(&self, old: Option<&str>, new: Option<&str>) {
        if old.is_some() && old != new {
            remove_orphaned_file(self.store.as_ref(), old).await;
        }
    }

    fn revalidate<I, S>(&self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for path in paths {
            let path = path.into();
            if !unique.contains(&path) {
                unique.push(path);
            }
        }
        self.cache.revalidate(&unique);
    }
}

/// Run the derive-generated validators, mapping failures to `ActionError::Validation`.
fn validated<T: Validate>(input: T) -> Result<T, ActionError> {
    input.validate()?;
    Ok(input)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::db::sqlite::test_support::temp_db;
    use crate::mail::test_support::FakeMailer;
    use crate::storage::test_support::RecordingStore;
    use std::time::Duration;
    use tempfile::TempDir;

    pub struct Harness {
        pub _dir: TempDir,
        pub actions: Actions,
        pub store: Arc<RecordingStore>,
        pub mailer: Arc<FakeMailer>,
    }

    pub fn harness_with(store: RecordingStore, mailer: FakeMailer) -> Harness {
        let (dir, db) = temp_db();
        let store = Arc::new(store);
        let mailer = Arc::new(mailer);
        let actions = Actions::new(
            Arc::new(db),
            store.clone(),
            mailer.clone(),
            PageCache::new(Duration::from_secs(60), None),
            "office@college.edu".to_string(),
        );
        Harness { _dir: dir, actions, store, mailer }
    }

    pub fn harness() -> Harness {
        harness_with(RecordingStore::new(false), FakeMailer::ok())
    }
}
