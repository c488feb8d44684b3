//! Alumni stories and alumni update submissions

use rusqlite::{OptionalExtension, Row};

use super::super::{new_id, now_rfc3339, Database, Replaced};
use crate::error::ActionError;
use crate::models::{AlumniStory, AlumniStoryInput, AlumniUpdate, AlumniUpdateInput};

const STORY_COLUMNS: &str =
    "id, name, graduation_year, headline, story, image_url, created_at, updated_at";

impl Database {
    pub fn list_alumni_stories(&self) -> Result<Vec<AlumniStory>, ActionError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM alumni_stories ORDER BY created_at DESC",
            STORY_COLUMNS
        ))?;
        let rows = stmt.query_map([], Self::row_to_story)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn insert_alumni_story(&self, input: &AlumniStoryInput) -> Result<AlumniStory, ActionError> {
        let conn = self.conn()?;
        let id = new_id();
        let now = now_rfc3339();
        conn.execute(
            "INSERT INTO alumni_stories (id, name, graduation_year, headline, story, image_url, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            rusqlite::params![
                &id,
                &input.name,
                input.graduation_year,
                &input.headline,
                &input.story,
                &input.image_url,
                &now,
            ],
        )?;
        Ok(AlumniStory {
            id,
            name: input.name.clone(),
            graduation_year: input.graduation_year,
            headline: input.headline.clone(),
            story: input.story.clone(),
            image_url: input.image_url.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub fn update_alumni_story(
        &self,
        id: &str,
        input: &AlumniStoryInput,
    ) -> Result<Option<Replaced<AlumniStory>>, ActionError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let before = match tx
            .query_row(
                &format!("SELECT {} FROM alumni_stories WHERE id = ?1", STORY_COLUMNS),
                [id],
                Self::row_to_story,
            )
            .optional()?
        {
            Some(story) => story,
            None => return Ok(None),
        };

        let now = now_rfc3339();
        tx.execute(
            "UPDATE alumni_stories SET name = ?1, graduation_year = ?2, headline = ?3, story = ?4,
             image_url = ?5, updated_at = ?6 WHERE id = ?7",
            rusqlite::params![
                &input.name,
                input.graduation_year,
                &input.headline,
                &input.story,
                &input.image_url,
                &now,
                id,
            ],
        )?;
        tx.commit()?;

        let after = AlumniStory {
            id: id.to_string(),
            name: input.name.clone(),
            graduation_year: input.graduation_year,
            headline: input.headline.clone(),
            story: input.story.clone(),
            image_url: input.image_url.clone(),
            created_at: before.created_at.clone(),
            updated_at: now,
        };
        Ok(Some(Replaced { before, after }))
    }

    pub fn delete_alumni_story(&self, id: &str) -> Result<Option<AlumniStory>, ActionError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let existing = tx
            .query_row(
                &format!("SELECT {} FROM alumni_stories WHERE id = ?1", STORY_COLUMNS),
                [id],
                Self::row_to_story,
            )
            .optional()?;
        if existing.is_some() {
            tx.execute("DELETE FROM alumni_stories WHERE id = ?1", [id])?;
        }
        tx.commit()?;
        Ok(existing)
    }

    pub fn insert_alumni_update(&self, input: &AlumniUpdateInput) -> Result<AlumniUpdate, ActionError> {
        let conn = self.conn()?;
        let id = new_id();
        let now = now_rfc3339();
        conn.execute(
            "INSERT INTO alumni_updates (id, name, email, graduation_year, message, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![&id, &input.name, &input.email, input.graduation_year, &input.message, &now],
        )?;
        Ok(AlumniUpdate {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            graduation_year: input.graduation_year,
            message: input.message.clone(),
            created_at: now,
        })
    }

    pub fn list_alumni_updates(&self) -> Result<Vec<AlumniUpdate>, ActionError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, email, graduation_year, message, created_at
             FROM alumni_updates ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(AlumniUpdate {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                graduation_year: row.get(3)?,
                message: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn row_to_story(row: &Row) -> rusqlite::Result<AlumniStory> {
        Ok(AlumniStory {
            id: row.get(0)?,
            name: row.get(1)?,
            graduation_year: row.get(2)?,
            headline: row.get(3)?,
            story: row.get(4)?,
            image_url: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }
}
