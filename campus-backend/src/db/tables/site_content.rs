//! Free-form `siteContent/{key}` documents

use rusqlite::OptionalExtension;
use serde_json::Value;

use super::super::{now_rfc3339, Database};
use crate::error::ActionError;

impl Database {
    pub fn get_site_content(&self, key: &str) -> Result<Option<Value>, ActionError> {
        let conn = self.conn()?;
        let raw: Option<String> = conn
            .query_row("SELECT document FROM site_content WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Replace the whole document stored under `key`.
    pub fn put_site_content(&self, key: &str, document: &Value) -> Result<(), ActionError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO site_content (key, document, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET document = excluded.document, updated_at = excluded.updated_at",
            rusqlite::params![key, serde_json::to_string(document)?, now_rfc3339()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::db::sqlite::test_support::temp_db;
    use serde_json::json;

    #[test]
    fn test_put_replaces_document() {
        let (_dir, db) = temp_db();
        assert!(db.get_site_content("homepage").unwrap().is_none());
        db.put_site_content("homepage", &json!({ "heroTitle": "Welcome" })).unwrap();
        db.put_site_content("homepage", &json!({ "heroTitle": "Apply now" })).unwrap();
        assert_eq!(
            db.get_site_content("homepage").unwrap(),
            Some(json!({ "heroTitle": "Apply now" }))
        );
    }
}
