use mini_world_catalog::{load_catalog, parse_catalog, CatalogError};
use std::fs;
use tempfile::TempDir;

const SMALL: &str = r#"
tables:
  - name: ISLAND_REGIONS
    columns: [Region_Id, Region_Name, Threat_To_Intruders]
    auto_increment: [Region_Id]
  - name: LIVECORP_COLONY
    columns: [Colony_Id, Region_Id]
    auto_increment: [Colony_Id]
foreign_keys:
  Region_Id: { table: ISLAND_REGIONS, id_column: Region_Id, display_column: Region_Name }
"#;

#[test]
fn load_catalog_from_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("catalog.yaml");
    fs::write(&path, SMALL).unwrap();

    let catalog = load_catalog(&path).unwrap();
    assert_eq!(catalog.tables().len(), 2);
    assert_eq!(catalog.columns("LIVECORP_COLONY").unwrap(), ["Colony_Id", "Region_Id"]);
    assert_eq!(
        catalog.foreign_key_for("Region_Id").unwrap().display_column,
        "Region_Name"
    );
}

#[test]
fn auto_increment_defaults_to_empty() {
    let catalog = parse_catalog(
        "tables:\n  - name: ANIMAL\n    columns: [Name, Species_Id]\n",
        "test",
    )
    .unwrap();
    assert!(catalog.auto_increment_columns("ANIMAL").unwrap().is_empty());
    assert!(catalog.foreign_key_for("Species_Id").is_none());
}

#[test]
fn missing_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let result = load_catalog(&tmp.path().join("nope.yaml"));
    assert!(matches!(result, Err(CatalogError::Io { .. })));
}

#[test]
fn malformed_yaml_is_parse_error() {
    let result = parse_catalog("tables: [[[", "broken");
    match result {
        Err(CatalogError::Parse { path, .. }) => assert_eq!(path, "broken"),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn rejects_duplicate_tables() {
    let yaml = r#"
tables:
  - name: ANIMAL
    columns: [Name]
  - name: ANIMAL
    columns: [Name]
"#;
    assert!(matches!(parse_catalog(yaml, "t"), Err(CatalogError::Invalid(_))));
}

#[test]
fn rejects_auto_increment_outside_columns() {
    let yaml = r#"
tables:
  - name: MODERATORS
    columns: [Name]
    auto_increment: [Moderator_Id]
"#;
    assert!(matches!(parse_catalog(yaml, "t"), Err(CatalogError::Invalid(_))));
}

#[test]
fn rejects_foreign_key_to_unknown_column() {
    let yaml = r#"
tables:
  - name: ISLAND_REGIONS
    columns: [Region_Id, Region_Name]
foreign_keys:
  Region_Id: { table: ISLAND_REGIONS, id_column: Region_Id, display_column: Threat }
"#;
    let err = parse_catalog(yaml, "t").unwrap_err();
    assert!(err.to_string().contains("ISLAND_REGIONS.Threat"));
}

#[test]
fn rejects_empty_catalog() {
    assert!(matches!(parse_catalog("tables: []", "t"), Err(CatalogError::Invalid(_))));
}
