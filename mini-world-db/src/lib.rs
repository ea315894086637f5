//! SQLite persistence layer for the mini-world console.
//!
//! Provides schema bootstrap, catalog-driven CRUD, and the fixed
//! analytical reports, backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod reports;
pub mod schema;
pub mod value;

pub use operations::{
    delete_rows, execute, insert_row, plan_delete, plan_insert, plan_update, update_rows,
    where_clause, DbError, Statement,
};
pub use queries::{fetch_all, reference_values};
pub use reports::{Report, ReportParameter};
pub use schema::{open_database, open_memory, SchemaError};
pub use value::{ColumnValues, Row, Value};
