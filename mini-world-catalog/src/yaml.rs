//! YAML loading for the schema catalog.
//!
//! The built-in document ships inside the binary; an operator can point at a
//! replacement file with the same layout.

use std::path::Path;

use crate::types::{Catalog, CatalogDocument, CatalogError};

/// The catalog for the mini-world schema, compiled into the crate.
pub const BUILTIN_CATALOG_YAML: &str = include_str!("../data/mini_world.yaml");

/// Parse and validate the built-in catalog.
pub fn builtin_catalog() -> Result<Catalog, CatalogError> {
    parse_catalog(BUILTIN_CATALOG_YAML, "<builtin>")
}

/// Load and validate a catalog from a YAML file.
///
/// Expected layout:
/// ```text
/// tables:
///   - name: ISLAND_REGIONS
///     columns: [Region_Id, Region_Name, Threat_To_Intruders]
///     auto_increment: [Region_Id]
/// foreign_keys:
///   Region_Id: { table: ISLAND_REGIONS, id_column: Region_Id, display_column: Region_Name }
/// ```
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_catalog(&contents, &path.display().to_string())
}

/// Parse a catalog document; `origin` names the source in error messages.
pub fn parse_catalog(contents: &str, origin: &str) -> Result<Catalog, CatalogError> {
    let doc: CatalogDocument = serde_yml::from_str(contents).map_err(|e| CatalogError::Parse {
        path: origin.to_string(),
        source: e,
    })?;
    Catalog::from_document(doc)
}
