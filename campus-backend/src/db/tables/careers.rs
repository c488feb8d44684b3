//! Job posting database operations

use rusqlite::{OptionalExtension, Row, TransactionBehavior};

use super::super::{new_id, now_rfc3339, Database, Replaced};
use super::ordering::rewrite_order;
use crate::error::ActionError;
use crate::models::{JobPosting, JobPostingInput};

const CAREER_COLUMNS: &str =
    "id, title, date, description, image_url, sort_order, created_at, updated_at";

impl Database {
    pub fn list_careers(&self) -> Result<Vec<JobPosting>, ActionError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM careers ORDER BY sort_order ASC, created_at ASC",
            CAREER_COLUMNS
        ))?;
        let rows = stmt.query_map([], Self::row_to_career)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Append a posting at the end of the current order.
    pub fn insert_career(&self, input: &JobPostingInput) -> Result<JobPosting, ActionError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let order: i64 = tx.query_row(
            "SELECT COALESCE(MAX(sort_order), -1) + 1 FROM careers",
            [],
            |row| row.get(0),
        )?;
        let id = new_id();
        let now = now_rfc3339();
        tx.execute(
            "INSERT INTO careers (id, title, date, description, image_url, sort_order, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            rusqlite::params![
                &id,
                &input.title,
                &input.date,
                &input.description,
                &input.image_url,
                order,
                &now,
            ],
        )?;
        tx.commit()?;

        Ok(JobPosting {
            id,
            title: input.title.clone(),
            date: input.date.clone(),
            description: input.description.clone(),
            image_url: input.image_url.clone(),
            order,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Overwrite a posting's fields; its position is left alone.
    pub fn update_career(
        &self,
        id: &str,
        input: &JobPostingInput,
    ) -> Result<Option<Replaced<JobPosting>>, ActionError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let before = match tx
            .query_row(
                &format!("SELECT {} FROM careers WHERE id = ?1", CAREER_COLUMNS),
                [id],
                Self::row_to_career,
            )
            .optional()?
        {
            Some(posting) => posting,
            None => return Ok(None),
        };

        let now = now_rfc3339();
        tx.execute(
            "UPDATE careers SET title = ?1, date = ?2, description = ?3, image_url = ?4, updated_at = ?5 WHERE id = ?6",
            rusqlite::params![&input.title, &input.date, &input.description, &input.image_url, &now, id],
        )?;
        tx.commit()?;

        let after = JobPosting {
            id: id.to_string(),
            title: input.title.clone(),
            date: input.date.clone(),
            description: input.description.clone(),
            image_url: input.image_url.clone(),
            order: before.order,
            created_at: before.created_at.clone(),
            updated_at: now,
        };
        Ok(Some(Replaced { before, after }))
    }

    pub fn delete_career(&self, id: &str) -> Result<Option<JobPosting>, ActionError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let existing = tx
            .query_row(
                &format!("SELECT {} FROM careers WHERE id = ?1", CAREER_COLUMNS),
                [id],
                Self::row_to_career,
            )
            .optional()?;
        if existing.is_some() {
            tx.execute("DELETE FROM careers WHERE id = ?1", [id])?;
        }
        tx.commit()?;
        Ok(existing)
    }

    /// Persist a new sequence: the posting at `ids[i]` gets order `i`.
    /// All-or-nothing.
    pub fn reorder_careers(&self, ids: &[String]) -> Result<(), ActionError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        rewrite_order(&tx, "careers", "", &[], ids, "Job posting")?;
        tx.commit()?;
        Ok(())
    }

    fn row_to_career(row: &Row) -> rusqlite::Result<JobPosting> {
        Ok(JobPosting {
            id: row.get(0)?,
            title: row.get(1)?,
            date: row.get(2)?,
            description: row.get(3)?,
            image_url: row.get(4)?,
            order: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::db::sqlite::test_support::temp_db;
    use crate::error::ActionError;
    use crate::models::JobPostingInput;

    fn posting(title: &str) -> JobPostingInput {
        JobPostingInput {
            title: title.to_string(),
            date: "2025-02-01".to_string(),
            description: String::new(),
            image_url: None,
        }
    }

    #[test]
    fn test_insert_appends_to_order() {
        let (_dir, db) = temp_db();
        let a = db.insert_career(&posting("Registrar")).unwrap();
        let b = db.insert_career(&posting("Librarian")).unwrap();
        assert_eq!(a.order, 0);
        assert_eq!(b.order, 1);
    }

    #[test]
    fn test_reorder_with_unknown_id_writes_nothing() {
        let (_dir, db) = temp_db();
        db.insert_career(&posting("A")).unwrap();
        let b = db.insert_career(&posting("B")).unwrap();

        let err = db
            .reorder_careers(&[b.id.clone(), "ghost".to_string()])
            .unwrap_err();
        assert!(matches!(err, ActionError::NotFound(_)));

        let titles: Vec<_> = db.list_careers().unwrap().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_reorder_rejects_partial_and_duplicate_lists() {
        let (_dir, db) = temp_db();
        let a = db.insert_career(&posting("A")).unwrap();
        db.insert_career(&posting("B")).unwrap();

        assert!(db.reorder_careers(&[a.id.clone()]).unwrap_err().is_validation());
        assert!(db.reorder_careers(&[a.id.clone(), a.id.clone()]).unwrap_err().is_validation());
    }
}
