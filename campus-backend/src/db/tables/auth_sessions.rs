//! Admin session database operations

use chrono::{DateTime, Duration, Utc};
use rusqlite::OptionalExtension;
use uuid::Uuid;

use super::super::Database;
use crate::error::ActionError;
use crate::models::Session;

const SESSION_HOURS: i64 = 24;

impl Database {
    /// Create a new admin session after a successful login. Expired sessions
    /// are pruned on the way.
    pub fn create_session(&self) -> Result<Session, ActionError> {
        let conn = self.conn()?;
        let token = Uuid::new_v4().to_string();
        let created_at = Utc::now();
        let expires_at = created_at + Duration::hours(SESSION_HOURS);

        let pruned = conn.execute(
            "DELETE FROM auth_sessions WHERE expires_at <= ?1",
            [&created_at.to_rfc3339()],
        )?;
        if pruned > 0 {
            log::debug!("[AUTH] Pruned {} expired session(s)", pruned);
        }

        conn.execute(
            "INSERT INTO auth_sessions (token, created_at, expires_at) VALUES (?1, ?2, ?3)",
            [&token, &created_at.to_rfc3339(), &expires_at.to_rfc3339()],
        )?;

        Ok(Session {
            id: conn.last_insert_rowid(),
            token,
            created_at,
            expires_at,
        })
    }

    /// Validate a session token and extend its expiry if valid
    pub fn validate_session(&self, token: &str) -> Result<Option<Session>, ActionError> {
        let conn = self.conn()?;
        let now = Utc::now();

        let row: Option<(i64, String, String, String)> = conn
            .query_row(
                "SELECT id, token, created_at, expires_at FROM auth_sessions WHERE token = ?1 AND expires_at > ?2",
                rusqlite::params![token, now.to_rfc3339()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .optional()?;

        let Some((id, token, created_at, _)) = row else {
            return Ok(None);
        };

        // Keep active sessions alive
        let expires_at = now + Duration::hours(SESSION_HOURS);
        conn.execute(
            "UPDATE auth_sessions SET expires_at = ?1 WHERE id = ?2",
            rusqlite::params![expires_at.to_rfc3339(), id],
        )?;

        Ok(Some(Session {
            id,
            token,
            created_at: parse_timestamp(&created_at).unwrap_or(now),
            expires_at,
        }))
    }

    /// Delete a session (logout)
    pub fn delete_session(&self, token: &str) -> Result<bool, ActionError> {
        let conn = self.conn()?;
        let rows_affected = conn.execute("DELETE FROM auth_sessions WHERE token = ?1", [token])?;
        Ok(rows_affected > 0)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use crate::db::sqlite::test_support::temp_db;

    #[test]
    fn test_session_lifecycle() {
        let (_dir, db) = temp_db();
        let session = db.create_session().unwrap();
        assert!(db.validate_session(&session.token).unwrap().is_some());
        assert!(db.validate_session("not-a-token").unwrap().is_none());
        assert!(db.delete_session(&session.token).unwrap());
        assert!(db.validate_session(&session.token).unwrap().is_none());
    }

    #[test]
    fn test_login_prunes_expired_sessions() {
        let (_dir, db) = temp_db();
        let live = db.create_session().unwrap();
        db.conn()
            .unwrap()
            .execute(
                "INSERT INTO auth_sessions (token, created_at, expires_at) VALUES ('stale', ?1, ?2)",
                ["2024-01-01T00:00:00+00:00", "2024-01-02T00:00:00+00:00"],
            )
            .unwrap();

        db.create_session().unwrap();

        let tokens: Vec<String> = {
            let conn = db.conn().unwrap();
            let mut stmt = conn.prepare("SELECT token FROM auth_sessions").unwrap();
            let tokens = stmt.query_map([], |row| row.get(0)).unwrap().map(|t| t.unwrap()).collect();
            tokens
        };
        assert_eq!(tokens.len(), 2);
        assert!(!tokens.contains(&"stale".to_string()));
        assert!(tokens.contains(&live.token));
    }
}
