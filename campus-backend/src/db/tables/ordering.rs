//! Shared order-index rewrite for the ordered lists (careers, site sections).

use rusqlite::{params_from_iter, Transaction};
use std::collections::HashSet;

use crate::error::ActionError;

/// Set `sort_order = position` for every id in `ids`, inside `tx`.
///
/// `ids` must be a permutation of the rows selected by `scope_sql` (a WHERE
/// clause fragment, may be empty) so no two rows end up sharing an index.
pub(super) fn rewrite_order(
    tx: &Transaction,
    table: &str,
    scope_sql: &str,
    scope_params: &[&str],
    ids: &[String],
    label: &str,
) -> Result<(), ActionError> {
    let mut seen = HashSet::new();
    if let Some(dup) = ids.iter().find(|id| !seen.insert(id.as_str())) {
        return Err(ActionError::Validation(format!(
            "{} {} appears more than once in the new order",
            label, dup
        )));
    }

    let where_clause = if scope_sql.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", scope_sql)
    };
    let existing: HashSet<String> = {
        let mut stmt = tx.prepare(&format!("SELECT id FROM {}{}", table, where_clause))?;
        let rows = stmt.query_map(params_from_iter(scope_params.iter()), |row| row.get::<_, String>(0))?;
        rows.collect::<Result<_, _>>()?
    };

    if let Some(unknown) = ids.iter().find(|id| !existing.contains(id.as_str())) {
        return Err(ActionError::NotFound(format!("{} {}", label, unknown)));
    }
    if ids.len() != existing.len() {
        return Err(ActionError::Validation(format!(
            "New order lists {} of {} items; every item must be included",
            ids.len(),
            existing.len()
        )));
    }

    let now = super::super::now_rfc3339();
    let mut stmt = tx.prepare(&format!(
        "UPDATE {} SET sort_order = ?1, updated_at = ?2 WHERE id = ?3",
        table
    ))?;
    for (position, id) in ids.iter().enumerate() {
        stmt.execute(rusqlite::params![position as i64, &now, id])?;
    }

    Ok(())
}
