//! Read queries used for browsing and for foreign-key hints.

use mini_world_catalog::{Catalog, ForeignKey};
use rusqlite::Connection;

use crate::operations::DbError;
use crate::value::{Row, Value};

/// `SELECT * FROM table`, every row, in engine order.
pub fn fetch_all(conn: &Connection, catalog: &Catalog, table: &str) -> Result<Vec<Row>, DbError> {
    catalog.table(table)?;
    let mut stmt = conn.prepare(&format!("SELECT * FROM {}", table))?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let rows = stmt.query_map([], |row| {
        let mut out = Row::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            out.insert(name.clone(), row.get::<_, Value>(idx)?);
        }
        Ok(out)
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Candidate `(id, display)` pairs for a foreign-key column.
pub fn reference_values(
    conn: &Connection,
    fk: &ForeignKey,
) -> Result<Vec<(Value, Value)>, DbError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {}, {} FROM {}",
        fk.id_column, fk.display_column, fk.table
    ))?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
