//! Academic program database operations

use rusqlite::{OptionalExtension, Row, Transaction, TransactionBehavior};

use super::super::{new_id, now_rfc3339, Database, Replaced};
use crate::error::ActionError;
use crate::models::{AcademicProgram, AcademicProgramInput};

const PROGRAM_COLUMNS: &str =
    "id, school_name, slug, description, mission, courses, faculty, image_url, created_at, updated_at";

impl Database {
    pub fn list_academic_programs(&self) -> Result<Vec<AcademicProgram>, ActionError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM academics ORDER BY school_name COLLATE NOCASE",
            PROGRAM_COLUMNS
        ))?;
        let rows = stmt.query_map([], Self::row_to_program)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn get_academic_program_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<AcademicProgram>, ActionError> {
        let conn = self.conn()?;
        let program = conn
            .query_row(
                &format!("SELECT {} FROM academics WHERE slug = ?1", PROGRAM_COLUMNS),
                [slug],
                Self::row_to_program,
            )
            .optional()?;
        Ok(program)
    }

    pub fn insert_academic_program(
        &self,
        input: &AcademicProgramInput,
    ) -> Result<AcademicProgram, ActionError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let slug = input.slug_or(None);
        ensure_program_slug_free(&tx, &slug, None)?;

        let id = new_id();
        let now = now_rfc3339();
        tx.execute(
            "INSERT INTO academics (id, school_name, slug, description, mission, courses, faculty, image_url, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
            rusqlite::params![
                &id,
                &input.school_name,
                &slug,
                &input.description,
                &input.mission,
                serde_json::to_string(&input.courses)?,
                serde_json::to_string(&input.faculty)?,
                &input.image_url,
                &now,
            ],
        )?;
        tx.commit()?;

        Ok(AcademicProgram {
            id,
            school_name: input.school_name.clone(),
            slug,
            description: input.description.clone(),
            mission: input.mission.clone(),
            courses: input.courses.clone(),
            faculty: input.faculty.clone(),
            image_url: input.image_url.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub fn update_academic_program(
        &self,
        id: &str,
        input: &AcademicProgramInput,
    ) -> Result<Option<Replaced<AcademicProgram>>, ActionError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let before = match tx
            .query_row(
                &format!("SELECT {} FROM academics WHERE id = ?1", PROGRAM_COLUMNS),
                [id],
                Self::row_to_program,
            )
            .optional()?
        {
            Some(program) => program,
            None => return Ok(None),
        };

        let slug = input.slug_or(Some(&before.slug));
        ensure_program_slug_free(&tx, &slug, Some(id))?;

        let now = now_rfc3339();
        tx.execute(
            "UPDATE academics SET school_name = ?1, slug = ?2, description = ?3, mission = ?4,
             courses = ?5, faculty = ?6, image_url = ?7, updated_at = ?8 WHERE id = ?9",
            rusqlite::params![
                &input.school_name,
                &slug,
                &input.description,
                &input.mission,
                serde_json::to_string(&input.courses)?,
                serde_json::to_string(&input.faculty)?,
                &input.image_url,
                &now,
                id,
            ],
        )?;
        tx.commit()?;

        let after = AcademicProgram {
            id: id.to_string(),
            school_name: input.school_name.clone(),
            slug,
            description: input.description.clone(),
            mission: input.mission.clone(),
            courses: input.courses.clone(),
            faculty: input.faculty.clone(),
            image_url: input.image_url.clone(),
            created_at: before.created_at.clone(),
            updated_at: now,
        };
        Ok(Some(Replaced { before, after }))
    }

    pub fn delete_academic_program(&self, id: &str) -> Result<Option<AcademicProgram>, ActionError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let existing = tx
            .query_row(
                &format!("SELECT {} FROM academics WHERE id = ?1", PROGRAM_COLUMNS),
                [id],
                Self::row_to_program,
            )
            .optional()?;
        if existing.is_some() {
            tx.execute("DELETE FROM academics WHERE id = ?1", [id])?;
        }
        tx.commit()?;
        Ok(existing)
    }

    fn row_to_program(row: &Row) -> rusqlite::Result<AcademicProgram> {
        let courses: String = row.get(5)?;
        let faculty: String = row.get(6)?;
        Ok(AcademicProgram {
            id: row.get(0)?,
            school_name: row.get(1)?,
            slug: row.get(2)?,
            description: row.get(3)?,
            mission: row.get(4)?,
            courses: parse_json_column(5, &courses)?,
            faculty: parse_json_column(6, &faculty)?,
            image_url: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }
}

fn parse_json_column<T: serde::de::DeserializeOwned>(index: usize, raw: &str) -> rusqlite::Result<T> {
    serde_json::from_str(raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn ensure_program_slug_free(
    tx: &Transaction,
    slug: &str,
    own_id: Option<&str>,
) -> Result<(), ActionError> {
    let holder: Option<String> = tx
        .query_row("SELECT id FROM academics WHERE slug = ?1", [slug], |row| row.get(0))
        .optional()?;
    match holder {
        Some(holder) if Some(holder.as_str()) != own_id => Err(ActionError::Validation(format!(
            "A program with slug '{}' already exists",
            slug
        ))),
        _ => Ok(()),
    }
}
