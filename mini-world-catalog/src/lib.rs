//! Schema catalog for the mini-world console.
//!
//! This crate describes tables, columns, auto-increment columns, and
//! foreign-key display hints without any database dependency. The
//! `mini-world-db` crate consumes a [`Catalog`] to plan statements.

pub mod types;
pub mod yaml;

pub use types::*;
pub use yaml::{builtin_catalog, load_catalog, parse_catalog, BUILTIN_CATALOG_YAML};
