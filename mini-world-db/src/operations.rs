//! Catalog-driven INSERT, UPDATE, and DELETE.
//!
//! Statements are planned first and executed second. Table and column
//! identifiers come from the catalog and are formatted into the SQL text;
//! every value is bound as a parameter.

use mini_world_catalog::{Catalog, CatalogError};
use rusqlite::{params_from_iter, Connection};
use thiserror::Error;

use crate::value::{ColumnValues, Value};

#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("{0}")]
    Validation(String),
}

impl DbError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// A planned statement: SQL text plus positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
    /// The WHERE clause text, for UPDATE and DELETE.
    pub where_clause: Option<String>,
}

// ── Planning ────────────────────────────────────────────────────────────────

/// Plan `INSERT INTO table (cols…) VALUES (?…)`.
///
/// Every non-auto-increment column must be present and non-blank (`Null` is
/// accepted). Auto-increment columns may be supplied to override the engine.
pub fn plan_insert(
    catalog: &Catalog,
    table: &str,
    values: &ColumnValues,
) -> Result<Statement, DbError> {
    let descriptor = catalog.table(table)?;
    for column in values.keys() {
        catalog.check_column(table, column)?;
    }

    for column in descriptor.required_columns() {
        match values.get(column) {
            None => {
                return Err(DbError::validation(format!(
                    "Missing value for {} (use 'null' for NULL values)",
                    column
                )));
            }
            Some(v) if v.is_blank() => {
                return Err(DbError::validation(format!(
                    "Value for {} cannot be empty (use 'null' for NULL values)",
                    column
                )));
            }
            Some(_) => {}
        }
    }

    if values.is_empty() {
        return Err(DbError::validation("No values to insert"));
    }

    let columns: Vec<&str> = values.keys().map(String::as_str).collect();
    let placeholders = vec!["?"; columns.len()].join(", ");
    Ok(Statement {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            placeholders
        ),
        params: values.values().cloned().collect(),
        where_clause: None,
    })
}

/// Plan `UPDATE table SET col = ?, … WHERE col = ? AND …`.
///
/// Parameters are the SET values followed by the WHERE values.
pub fn plan_update(
    catalog: &Catalog,
    table: &str,
    set: &ColumnValues,
    filter: &ColumnValues,
) -> Result<Statement, DbError> {
    catalog.table(table)?;
    if filter.is_empty() {
        return Err(DbError::validation("At least one WHERE condition is required!"));
    }
    if set.is_empty() {
        return Err(DbError::validation(
            "At least one column to update is required!",
        ));
    }
    for column in set.keys() {
        catalog.check_column(table, column)?;
    }

    let set_clause = equality_list(set.keys(), ", ");
    let where_clause = where_clause(catalog, table, filter)?;

    let mut params: Vec<Value> = set.values().cloned().collect();
    params.extend(filter.values().cloned());

    Ok(Statement {
        sql: format!("UPDATE {} SET {} WHERE {}", table, set_clause, where_clause),
        params,
        where_clause: Some(where_clause),
    })
}

/// Plan `DELETE FROM table WHERE col = ? AND …`.
///
/// The caller is expected to show [`Statement::where_clause`] and get the
/// operator's confirmation before executing.
pub fn plan_delete(
    catalog: &Catalog,
    table: &str,
    filter: &ColumnValues,
) -> Result<Statement, DbError> {
    catalog.table(table)?;
    if filter.is_empty() {
        return Err(DbError::validation(
            "At least one WHERE condition is required for DELETE!",
        ));
    }
    let where_clause = where_clause(catalog, table, filter)?;
    Ok(Statement {
        sql: format!("DELETE FROM {} WHERE {}", table, where_clause),
        params: filter.values().cloned().collect(),
        where_clause: Some(where_clause),
    })
}

/// Build the equality-only WHERE text (`a = ? AND b = ?`) for a filter.
pub fn where_clause(
    catalog: &Catalog,
    table: &str,
    filter: &ColumnValues,
) -> Result<String, DbError> {
    if filter.is_empty() {
        return Err(DbError::validation("At least one WHERE condition is required!"));
    }
    for column in filter.keys() {
        catalog.check_column(table, column)?;
    }
    Ok(equality_list(filter.keys(), " AND "))
}

fn equality_list<'a>(columns: impl Iterator<Item = &'a String>, sep: &str) -> String {
    columns
        .map(|c| format!("{} = ?", c))
        .collect::<Vec<_>>()
        .join(sep)
}

// ── Execution ───────────────────────────────────────────────────────────────

/// Run a planned mutation in its own transaction.
///
/// Commits on success. If the statement fails the transaction is dropped
/// uncommitted, which rolls it back. Returns the affected-row count.
pub fn execute(conn: &Connection, stmt: &Statement) -> Result<usize, DbError> {
    log::debug!("{} [{} param(s)]", stmt.sql, stmt.params.len());
    let tx = conn.unchecked_transaction()?;
    let changed = tx.execute(&stmt.sql, params_from_iter(stmt.params.iter()))?;
    tx.commit()?;
    Ok(changed)
}

/// Plan and run an insert. Generated keys are not returned.
pub fn insert_row(
    conn: &Connection,
    catalog: &Catalog,
    table: &str,
    values: &ColumnValues,
) -> Result<(), DbError> {
    let stmt = plan_insert(catalog, table, values)?;
    execute(conn, &stmt)?;
    Ok(())
}

/// Plan and run an update. Zero matched rows is `Ok(0)`, not an error.
pub fn update_rows(
    conn: &Connection,
    catalog: &Catalog,
    table: &str,
    set: &ColumnValues,
    filter: &ColumnValues,
) -> Result<usize, DbError> {
    let stmt = plan_update(catalog, table, set, filter)?;
    execute(conn, &stmt)
}

/// Plan and run a delete. Zero matched rows is `Ok(0)`, not an error.
pub fn delete_rows(
    conn: &Connection,
    catalog: &Catalog,
    table: &str,
    filter: &ColumnValues,
) -> Result<usize, DbError> {
    let stmt = plan_delete(catalog, table, filter)?;
    execute(conn, &stmt)
}
