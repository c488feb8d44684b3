pub mod sqlite;
pub mod tables;

pub use sqlite::Database;

/// Row state on either side of an update, so callers can clean up what the
/// new version no longer references.
#[derive(Debug, Clone)]
pub struct Replaced<T> {
    pub before: T,
    pub after: T,
}

/// Current time as stored in every `created_at` / `updated_at` column.
pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Fresh document id.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
