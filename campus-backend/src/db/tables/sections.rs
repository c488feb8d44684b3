//! Ordered site sections (homepage channel tiles, student life blocks)

use rusqlite::{OptionalExtension, Row, TransactionBehavior};
use std::str::FromStr;

use super::super::{new_id, now_rfc3339, Database, Replaced};
use super::ordering::rewrite_order;
use crate::error::ActionError;
use crate::models::{SectionKind, SiteSection, SiteSectionInput};

const SECTION_COLUMNS: &str =
    "id, kind, title, description, image_url, sort_order, created_at, updated_at";

impl Database {
    pub fn list_sections(&self, kind: SectionKind) -> Result<Vec<SiteSection>, ActionError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM site_sections WHERE kind = ?1 ORDER BY sort_order ASC, created_at ASC",
            SECTION_COLUMNS
        ))?;
        let rows = stmt.query_map([kind.as_ref()], Self::row_to_section)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn insert_section(
        &self,
        kind: SectionKind,
        input: &SiteSectionInput,
    ) -> Result<SiteSection, ActionError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let order: i64 = tx.query_row(
            "SELECT COALESCE(MAX(sort_order), -1) + 1 FROM site_sections WHERE kind = ?1",
            [kind.as_ref()],
            |row| row.get(0),
        )?;
        let id = new_id();
        let now = now_rfc3339();
        tx.execute(
            "INSERT INTO site_sections (id, kind, title, description, image_url, sort_order, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            rusqlite::params![
                &id,
                kind.as_ref(),
                &input.title,
                &input.description,
                &input.image_url,
                order,
                &now,
            ],
        )?;
        tx.commit()?;

        Ok(SiteSection {
            id,
            kind,
            title: input.title.clone(),
            description: input.description.clone(),
            image_url: input.image_url.clone(),
            order,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub fn update_section(
        &self,
        kind: SectionKind,
        id: &str,
        input: &SiteSectionInput,
    ) -> Result<Option<Replaced<SiteSection>>, ActionError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let before = match tx
            .query_row(
                &format!("SELECT {} FROM site_sections WHERE id = ?1 AND kind = ?2", SECTION_COLUMNS),
                [id, kind.as_ref()],
                Self::row_to_section,
            )
            .optional()?
        {
            Some(section) => section,
            None => return Ok(None),
        };

        let now = now_rfc3339();
        tx.execute(
            "UPDATE site_sections SET title = ?1, description = ?2, image_url = ?3, updated_at = ?4 WHERE id = ?5",
            rusqlite::params![&input.title, &input.description, &input.image_url, &now, id],
        )?;
        tx.commit()?;

        let after = SiteSection {
            id: id.to_string(),
            kind,
            title: input.title.clone(),
            description: input.description.clone(),
            image_url: input.image_url.clone(),
            order: before.order,
            created_at: before.created_at.clone(),
            updated_at: now,
        };
        Ok(Some(Replaced { before, after }))
    }

    pub fn delete_section(
        &self,
        kind: SectionKind,
        id: &str,
    ) -> Result<Option<SiteSection>, ActionError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let existing = tx
            .query_row(
                &format!("SELECT {} FROM site_sections WHERE id = ?1 AND kind = ?2", SECTION_COLUMNS),
                [id, kind.as_ref()],
                Self::row_to_section,
            )
            .optional()?;
        if existing.is_some() {
            tx.execute("DELETE FROM site_sections WHERE id = ?1", [id])?;
        }
        tx.commit()?;
        Ok(existing)
    }

    /// Rewrite `sort_order` for every section of `kind` to match `ids`.
    pub fn reorder_sections(&self, kind: SectionKind, ids: &[String]) -> Result<(), ActionError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        rewrite_order(&tx, "site_sections", "kind = ?1", &[kind.as_ref()], ids, "Section")?;
        tx.commit()?;
        Ok(())
    }

    fn row_to_section(row: &Row) -> rusqlite::Result<SiteSection> {
        let kind_str: String = row.get(1)?;
        let kind = SectionKind::from_str(&kind_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
        })?;
        Ok(SiteSection {
            id: row.get(0)?,
            kind,
            title: row.get(2)?,
            description: row.get(3)?,
            image_url: row.get(4)?,
            order: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }
}
