//! News article database operations

use rusqlite::{OptionalExtension, Row, Transaction, TransactionBehavior};

use super::super::{new_id, now_rfc3339, Database, Replaced};
use crate::error::ActionError;
use crate::models::{NewsInput, NewsItem};

/// Slugs that collide with fixed routes under `/api/news`.
const RESERVED_SLUGS: &[&str] = &["featured"];

const NEWS_COLUMNS: &str =
    "id, title, slug, date, category, description, content, image_url, is_featured, created_at, updated_at";

impl Database {
    /// All articles, newest first, optionally limited to one category.
    pub fn list_news(&self, category: Option<&str>) -> Result<Vec<NewsItem>, ActionError> {
        let conn = self.conn()?;
        let items = match category {
            Some(category) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM news WHERE category = ?1 ORDER BY date DESC, created_at DESC",
                    NEWS_COLUMNS
                ))?;
                let rows = stmt.query_map([category], Self::row_to_news)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM news ORDER BY date DESC, created_at DESC",
                    NEWS_COLUMNS
                ))?;
                let rows = stmt.query_map([], Self::row_to_news)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(items)
    }

    pub fn get_news(&self, id: &str) -> Result<Option<NewsItem>, ActionError> {
        let conn = self.conn()?;
        let item = conn
            .query_row(
                &format!("SELECT {} FROM news WHERE id = ?1", NEWS_COLUMNS),
                [id],
                Self::row_to_news,
            )
            .optional()?;
        Ok(item)
    }

    pub fn get_news_by_slug(&self, slug: &str) -> Result<Option<NewsItem>, ActionError> {
        let conn = self.conn()?;
        let item = conn
            .query_row(
                &format!("SELECT {} FROM news WHERE slug = ?1", NEWS_COLUMNS),
                [slug],
                Self::row_to_news,
            )
            .optional()?;
        Ok(item)
    }

    /// The featured article, if any (at most one exists).
    pub fn get_featured_news(&self) -> Result<Option<NewsItem>, ActionError> {
        let conn = self.conn()?;
        let item = conn
            .query_row(
                &format!(
                    "SELECT {} FROM news WHERE is_featured = 1 ORDER BY updated_at DESC LIMIT 1",
                    NEWS_COLUMNS
                ),
                [],
                Self::row_to_news,
            )
            .optional()?;
        Ok(item)
    }

    /// Insert an article. A featured article un-features every other one in the
    /// same transaction.
    pub fn insert_news(&self, input: &NewsInput) -> Result<NewsItem, ActionError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let id = new_id();
        let slug = input.slug_or(None);
        ensure_slug_free(&tx, &slug, None)?;
        if input.is_featured {
            let cleared = clear_featured(&tx, &id)?;
            if cleared > 0 {
                log::info!("[NEWS] Unset featured flag on {} article(s)", cleared);
            }
        }

        let now = now_rfc3339();
        tx.execute(
            "INSERT INTO news (id, title, slug, date, category, description, content, image_url, is_featured, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
            rusqlite::params![
                &id,
                &input.title,
                &slug,
                &input.date,
                &input.category,
                &input.description,
                &input.content,
                &input.image_url,
                input.is_featured,
                &now,
            ],
        )?;
        tx.commit()?;

        Ok(NewsItem {
            id,
            title: input.title.clone(),
            slug,
            date: input.date.clone(),
            category: input.category.clone(),
            description: input.description.clone(),
            content: input.content.clone(),
            image_url: input.image_url.clone(),
            is_featured: input.is_featured,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Overwrite an article. Returns `None` when no article has this id.
    pub fn update_news(
        &self,
        id: &str,
        input: &NewsInput,
    ) -> Result<Option<Replaced<NewsItem>>, ActionError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let before = match tx
            .query_row(
                &format!("SELECT {} FROM news WHERE id = ?1", NEWS_COLUMNS),
                [id],
                Self::row_to_news,
            )
            .optional()?
        {
            Some(item) => item,
            None => return Ok(None),
        };

        let slug = input.slug_or(Some(&before.slug));
        ensure_slug_free(&tx, &slug, Some(id))?;
        if input.is_featured {
            let cleared = clear_featured(&tx, id)?;
            if cleared > 0 {
                log::info!("[NEWS] Unset featured flag on {} article(s)", cleared);
            }
        }

        let now = now_rfc3339();
        tx.execute(
            "UPDATE news SET title = ?1, slug = ?2, date = ?3, category = ?4, description = ?5,
             content = ?6, image_url = ?7, is_featured = ?8, updated_at = ?9 WHERE id = ?10",
            rusqlite::params![
                &input.title,
                &slug,
                &input.date,
                &input.category,
                &input.description,
                &input.content,
                &input.image_url,
                input.is_featured,
                &now,
                id,
            ],
        )?;
        tx.commit()?;

        let after = NewsItem {
            id: id.to_string(),
            title: input.title.clone(),
            slug,
            date: input.date.clone(),
            category: input.category.clone(),
            description: input.description.clone(),
            content: input.content.clone(),
            image_url: input.image_url.clone(),
            is_featured: input.is_featured,
            created_at: before.created_at.clone(),
            updated_at: now,
        };
        Ok(Some(Replaced { before, after }))
    }

    /// Delete an article, returning the removed row.
    pub fn delete_news(&self, id: &str) -> Result<Option<NewsItem>, ActionError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let existing = tx
            .query_row(
                &format!("SELECT {} FROM news WHERE id = ?1", NEWS_COLUMNS),
                [id],
                Self::row_to_news,
            )
            .optional()?;
        if existing.is_some() {
            tx.execute("DELETE FROM news WHERE id = ?1", [id])?;
        }
        tx.commit()?;
        Ok(existing)
    }

    #[cfg(test)]
    pub fn count_featured_news(&self) -> Result<i64, ActionError> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM news WHERE is_featured = 1", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }

    fn row_to_news(row: &Row) -> rusqlite::Result<NewsItem> {
        Ok(NewsItem {
            id: row.get(0)?,
            title: row.get(1)?,
            slug: row.get(2)?,
            date: row.get(3)?,
            category: row.get(4)?,
            description: row.get(5)?,
            content: row.get(6)?,
            image_url: row.get(7)?,
            is_featured: row.get::<_, i64>(8)? != 0,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }
}

/// Unset `is_featured` on every article other than `keep_id`.
fn clear_featured(tx: &Transaction, keep_id: &str) -> Result<usize, ActionError> {
    let now = now_rfc3339();
    let cleared = tx.execute(
        "UPDATE news SET is_featured = 0, updated_at = ?1 WHERE is_featured = 1 AND id != ?2",
        rusqlite::params![&now, keep_id],
    )?;
    Ok(cleared)
}

fn ensure_slug_free(tx: &Transaction, slug: &str, own_id: Option<&str>) -> Result<(), ActionError> {
    if RESERVED_SLUGS.contains(&slug) {
        return Err(ActionError::Validation(format!(
            "slug: '{}' is reserved, choose a different slug",
            slug
        )));
    }
    let holder: Option<String> = tx
        .query_row("SELECT id FROM news WHERE slug = ?1", [slug], |row| row.get(0))
        .optional()?;
    match holder {
        Some(holder) if Some(holder.as_str()) != own_id => Err(ActionError::Validation(format!(
            "An article with slug '{}' already exists",
            slug
        ))),
        _ => Ok(()),
    }
}
