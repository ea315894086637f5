//! Data model types for the schema catalog.
//!
//! A [`Catalog`] describes every table the console can touch: its ordered
//! columns, which of them the engine generates, and the advisory foreign-key
//! hints used to show candidate values before prompting.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Unknown table: {0}")]
    UnknownTable(String),
    #[error("Unknown column '{column}' in table {table}")]
    UnknownColumn { table: String, column: String },
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

// ── Table ───────────────────────────────────────────────────────────────────

/// A single table: name, ordered columns, and engine-generated columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub name: String,
    pub columns: Vec<String>,
    /// Columns populated by the engine when omitted (AUTOINCREMENT keys).
    #[serde(default)]
    pub auto_increment: Vec<String>,
}

impl TableDescriptor {
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn is_auto_increment(&self, column: &str) -> bool {
        self.auto_increment.iter().any(|c| c == column)
    }

    /// Columns an operator must supply on insert, in table order.
    pub fn required_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|c| !self.is_auto_increment(c))
            .map(String::as_str)
    }
}

// ── Foreign keys ────────────────────────────────────────────────────────────

/// Where to look up candidate values for a foreign-key column.
///
/// Purely a display hint. Nothing checks a submitted value against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub table: String,
    pub id_column: String,
    pub display_column: String,
}

// ── Catalog ─────────────────────────────────────────────────────────────────

/// On-disk shape of a catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub tables: Vec<TableDescriptor>,
    #[serde(default)]
    pub foreign_keys: BTreeMap<String, ForeignKey>,
}

/// Validated, read-only schema catalog.
///
/// Built once at startup and passed around by reference.
#[derive(Debug, Clone)]
pub struct Catalog {
    tables: Vec<TableDescriptor>,
    foreign_keys: BTreeMap<String, ForeignKey>,
}

impl Catalog {
    /// Validate a parsed document and turn it into a catalog.
    ///
    /// Rejects duplicate or empty tables, auto-increment columns that are not
    /// table columns, and foreign keys pointing at unknown tables or columns.
    pub fn from_document(doc: CatalogDocument) -> Result<Self, CatalogError> {
        if doc.tables.is_empty() {
            return Err(CatalogError::Invalid("no tables defined".to_string()));
        }

        let mut seen = HashSet::new();
        for table in &doc.tables {
            if !seen.insert(table.name.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "table {} is defined more than once",
                    table.name
                )));
            }
            if table.columns.is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "table {} has no columns",
                    table.name
                )));
            }
            if let Some(col) = table.auto_increment.iter().find(|c| !table.has_column(c)) {
                return Err(CatalogError::Invalid(format!(
                    "auto-increment column {} is not a column of {}",
                    col, table.name
                )));
            }
        }

        let catalog = Self {
            tables: doc.tables,
            foreign_keys: doc.foreign_keys,
        };

        for (column, fk) in &catalog.foreign_keys {
            let target = catalog.table(&fk.table).map_err(|_| {
                CatalogError::Invalid(format!(
                    "foreign key {} references unknown table {}",
                    column, fk.table
                ))
            })?;
            for col in [&fk.id_column, &fk.display_column] {
                if !target.has_column(col) {
                    return Err(CatalogError::Invalid(format!(
                        "foreign key {} references unknown column {}.{}",
                        column, fk.table, col
                    )));
                }
            }
        }

        Ok(catalog)
    }

    /// Table names in catalog order.
    pub fn tables(&self) -> impl ExactSizeIterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    pub fn table(&self, name: &str) -> Result<&TableDescriptor, CatalogError> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| CatalogError::UnknownTable(name.to_string()))
    }

    /// Ordered column names of a table.
    pub fn columns(&self, table: &str) -> Result<&[String], CatalogError> {
        self.table(table).map(|t| t.columns.as_slice())
    }

    /// Engine-generated columns of a table (possibly empty).
    pub fn auto_increment_columns(&self, table: &str) -> Result<&[String], CatalogError> {
        self.table(table).map(|t| t.auto_increment.as_slice())
    }

    /// Foreign-key hint for a column name, shared across all tables.
    pub fn foreign_key_for(&self, column: &str) -> Option<&ForeignKey> {
        self.foreign_keys.get(column)
    }

    /// Fail with [`CatalogError::UnknownColumn`] unless `column` belongs to `table`.
    pub fn check_column(&self, table: &str, column: &str) -> Result<(), CatalogError> {
        if self.table(table)?.has_column(column) {
            Ok(())
        } else {
            Err(CatalogError::UnknownColumn {
                table: table.to_string(),
                column: column.to_string(),
            })
        }
    }
}
