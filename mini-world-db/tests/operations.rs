use mini_world_catalog::{builtin_catalog, Catalog, CatalogError};
use mini_world_db::*;
use rusqlite::Connection;

fn cols(pairs: &[(&str, Value)]) -> ColumnValues {
    pairs
        .iter()
        .map(|(c, v)| (c.to_string(), v.clone()))
        .collect()
}

fn setup() -> (Connection, Catalog) {
    let conn = open_memory().unwrap();
    let catalog = builtin_catalog().unwrap();
    insert_row(
        &conn,
        &catalog,
        "ISLAND_REGIONS",
        &cols(&[
            ("Region_Name", "Cheese Caves".into()),
            ("Threat_To_Intruders", Value::Real(7.5)),
        ]),
    )
    .unwrap();
    (conn, catalog)
}

fn row_count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
        .unwrap()
}

// ── Planning ────────────────────────────────────────────────────────────────

#[test]
fn plan_insert_binds_values_as_parameters() {
    let catalog = builtin_catalog().unwrap();
    let stmt = plan_insert(
        &catalog,
        "MODERATORS",
        &cols(&[("Name", "Robert'); DROP TABLE MODERATORS;--".into())]),
    )
    .unwrap();
    assert_eq!(stmt.sql, "INSERT INTO MODERATORS (Name) VALUES (?)");
    assert_eq!(stmt.params.len(), 1);
    assert!(stmt.where_clause.is_none());
}

#[test]
fn plan_insert_requires_non_auto_columns() {
    let catalog = builtin_catalog().unwrap();
    let err = plan_insert(
        &catalog,
        "ISLAND_REGIONS",
        &cols(&[("Region_Name", "Jelly Marsh".into())]),
    )
    .unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));
    assert!(err.to_string().contains("Threat_To_Intruders"));
}

#[test]
fn plan_insert_rejects_blank_but_accepts_null() {
    let catalog = builtin_catalog().unwrap();
    let blank = plan_insert(&catalog, "MODERATORS", &cols(&[("Name", "  ".into())]));
    assert!(matches!(blank, Err(DbError::Validation(_))));

    let null = plan_insert(&catalog, "MODERATORS", &cols(&[("Name", Value::Null)])).unwrap();
    assert_eq!(null.params, vec![Value::Null]);
}

#[test]
fn plan_insert_allows_auto_increment_override() {
    let catalog = builtin_catalog().unwrap();
    let stmt = plan_insert(
        &catalog,
        "MODERATORS",
        &cols(&[("Moderator_Id", Value::Integer(42)), ("Name", "Ada".into())]),
    )
    .unwrap();
    assert_eq!(
        stmt.sql,
        "INSERT INTO MODERATORS (Moderator_Id, Name) VALUES (?, ?)"
    );
}

#[test]
fn plan_rejects_unknown_table_and_column() {
    let catalog = builtin_catalog().unwrap();
    let err = plan_insert(&catalog, "DRAGONS", &cols(&[("Name", "x".into())])).unwrap_err();
    assert!(matches!(err, DbError::Catalog(CatalogError::UnknownTable(_))));

    let err = plan_delete(&catalog, "ANIMAL", &cols(&[("Colour", "red".into())])).unwrap_err();
    assert!(matches!(
        err,
        DbError::Catalog(CatalogError::UnknownColumn { .. })
    ));
}

#[test]
fn plan_update_orders_set_then_where_params() {
    let catalog = builtin_catalog().unwrap();
    let stmt = plan_update(
        &catalog,
        "INTRUDERS",
        &cols(&[("Name", "Bea".into()), ("Height", Value::Null)]),
        &cols(&[("User_Id", "3".into()), ("Gender", "F".into())]),
    )
    .unwrap();
    assert_eq!(
        stmt.sql,
        "UPDATE INTRUDERS SET Name = ?, Height = ? WHERE User_Id = ? AND Gender = ?"
    );
    assert_eq!(
        stmt.params,
        vec![
            Value::Text("Bea".into()),
            Value::Null,
            Value::Text("3".into()),
            Value::Text("F".into()),
        ]
    );
    assert_eq!(
        stmt.where_clause.as_deref(),
        Some("User_Id = ? AND Gender = ?")
    );
}

#[test]
fn plan_delete_exposes_where_clause() {
    let catalog = builtin_catalog().unwrap();
    let stmt = plan_delete(
        &catalog,
        "FOOD_ITEM",
        &cols(&[("Name", "Cake".into()), ("Species_Id", "1".into())]),
    )
    .unwrap();
    assert_eq!(stmt.where_clause.as_deref(), Some("Name = ? AND Species_Id = ?"));
    assert_eq!(stmt.sql, "DELETE FROM FOOD_ITEM WHERE Name = ? AND Species_Id = ?");
}

// ── Execution ───────────────────────────────────────────────────────────────

#[test]
fn insert_then_fetch_round_trips() {
    let (conn, catalog) = setup();
    insert_row(
        &conn,
        &catalog,
        "INTRUDERS",
        &cols(&[
            ("Name", "Pip".into()),
            ("Gender", "M".into()),
            ("Height", Value::Real(170.0)),
            ("Weight", Value::Real(60.0)),
            ("Intelligence", Value::Integer(5)),
            ("Time_Of_Entry", "2024-05-01 10:00:00".into()),
            ("Location_Id", Value::Integer(1)),
        ]),
    )
    .unwrap();

    let rows = fetch_all(&conn, &catalog, "INTRUDERS").unwrap();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    let keys: Vec<&str> = row.keys().map(String::as_str).collect();
    assert_eq!(keys, catalog.columns("INTRUDERS").unwrap());
    assert_eq!(row["User_Id"], Value::Integer(1));
    assert_eq!(row["Name"], Value::Text("Pip".into()));
    assert_eq!(row["Height"], Value::Real(170.0));
    assert_eq!(row["Intelligence"], Value::Integer(5));
    assert_eq!(row["Location_Id"], Value::Integer(1));
}

#[test]
fn text_input_is_converted_by_column_affinity() {
    let (conn, catalog) = setup();
    insert_row(
        &conn,
        &catalog,
        "LIVECORP_COLONY",
        &cols(&[("Region_Id", Value::from_input("1"))]),
    )
    .unwrap();
    let rows = fetch_all(&conn, &catalog, "LIVECORP_COLONY").unwrap();
    assert_eq!(rows[0]["Region_Id"], Value::Integer(1));
    assert_eq!(rows[0]["Colony_Id"], Value::Integer(1));
}

#[test]
fn mistyped_value_is_a_query_error_and_stores_nothing() {
    let (conn, catalog) = setup();
    let err = insert_row(
        &conn,
        &catalog,
        "INTRUDERS",
        &cols(&[
            ("Name", "Pip".into()),
            ("Gender", "M".into()),
            ("Height", Value::from_input("tall")),
            ("Weight", Value::from_input("60")),
            ("Intelligence", Value::from_input("5.5")),
            ("Time_Of_Entry", "2024-05-01 10:00:00".into()),
            ("Location_Id", Value::from_input("1")),
        ]),
    )
    .unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
    assert_eq!(row_count(&conn, "INTRUDERS"), 0);

    // Reports over the table keep working.
    assert!(mini_world_db::reports::intruder_threat_assessment(&conn)
        .unwrap()
        .is_empty());
}

#[test]
fn mistyped_update_leaves_row_unchanged() {
    let (conn, catalog) = setup();
    let err = update_rows(
        &conn,
        &catalog,
        "ISLAND_REGIONS",
        &cols(&[("Threat_To_Intruders", Value::from_input("very"))]),
        &cols(&[("Region_Id", Value::Integer(1))]),
    )
    .unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
    let rows = fetch_all(&conn, &catalog, "ISLAND_REGIONS").unwrap();
    assert_eq!(rows[0]["Threat_To_Intruders"], Value::Real(7.5));
}

#[test]
fn null_token_stores_sql_null() {
    let (conn, catalog) = setup();
    insert_row(
        &conn,
        &catalog,
        "ISLAND_REGIONS",
        &cols(&[
            ("Region_Name", "Gravy Flats".into()),
            ("Threat_To_Intruders", Value::from_input("NULL")),
        ]),
    )
    .unwrap();
    let rows = fetch_all(&conn, &catalog, "ISLAND_REGIONS").unwrap();
    assert_eq!(rows[1]["Threat_To_Intruders"], Value::Null);
}

#[test]
fn update_without_where_fails_before_touching_the_database() {
    let (conn, catalog) = setup();
    let err = update_rows(
        &conn,
        &catalog,
        "ISLAND_REGIONS",
        &cols(&[("Region_Name", "Renamed".into())]),
        &ColumnValues::new(),
    )
    .unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));
    let rows = fetch_all(&conn, &catalog, "ISLAND_REGIONS").unwrap();
    assert_eq!(rows[0]["Region_Name"], Value::Text("Cheese Caves".into()));
}

#[test]
fn update_without_set_pairs_fails() {
    let (conn, catalog) = setup();
    let err = update_rows(
        &conn,
        &catalog,
        "ISLAND_REGIONS",
        &ColumnValues::new(),
        &cols(&[("Region_Id", Value::Integer(1))]),
    )
    .unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));
}

#[test]
fn update_reports_affected_rows() {
    let (conn, catalog) = setup();
    let changed = update_rows(
        &conn,
        &catalog,
        "ISLAND_REGIONS",
        &cols(&[("Threat_To_Intruders", Value::from_input("9.25"))]),
        &cols(&[("Region_Name", "Cheese Caves".into())]),
    )
    .unwrap();
    assert_eq!(changed, 1);
    let rows = fetch_all(&conn, &catalog, "ISLAND_REGIONS").unwrap();
    assert_eq!(rows[0]["Threat_To_Intruders"], Value::Real(9.25));
}

#[test]
fn update_matching_nothing_is_zero_not_error() {
    let (conn, catalog) = setup();
    let changed = update_rows(
        &conn,
        &catalog,
        "ISLAND_REGIONS",
        &cols(&[("Region_Name", "Nowhere".into())]),
        &cols(&[("Region_Id", Value::Integer(999))]),
    )
    .unwrap();
    assert_eq!(changed, 0);
}

#[test]
fn delete_requires_where() {
    let (conn, catalog) = setup();
    let err = delete_rows(&conn, &catalog, "ISLAND_REGIONS", &ColumnValues::new()).unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));
    assert_eq!(row_count(&conn, "ISLAND_REGIONS"), 1);
}

#[test]
fn delete_missing_key_is_zero() {
    let (conn, catalog) = setup();
    let removed = delete_rows(
        &conn,
        &catalog,
        "ISLAND_REGIONS",
        &cols(&[("Region_Id", Value::Integer(42))]),
    )
    .unwrap();
    assert_eq!(removed, 0);
    assert_eq!(row_count(&conn, "ISLAND_REGIONS"), 1);
}

#[test]
fn delete_removes_matching_rows() {
    let (conn, catalog) = setup();
    let removed = delete_rows(
        &conn,
        &catalog,
        "ISLAND_REGIONS",
        &cols(&[("Region_Id", Value::from_input("1"))]),
    )
    .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(row_count(&conn, "ISLAND_REGIONS"), 0);
}

#[test]
fn constraint_violation_rolls_back() {
    let (conn, catalog) = setup();
    insert_row(
        &conn,
        &catalog,
        "LIVECORP_COLONY",
        &cols(&[("Region_Id", Value::Integer(1))]),
    )
    .unwrap();

    // The colony still references region 1.
    let err = delete_rows(
        &conn,
        &catalog,
        "ISLAND_REGIONS",
        &cols(&[("Region_Id", Value::Integer(1))]),
    )
    .unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
    assert_eq!(row_count(&conn, "ISLAND_REGIONS"), 1);

    // The connection is usable again after the rollback.
    assert!(conn.is_autocommit());
    insert_row(
        &conn,
        &catalog,
        "MODERATORS",
        &cols(&[("Name", "Ada".into())]),
    )
    .unwrap();
    assert_eq!(row_count(&conn, "MODERATORS"), 1);
}

#[test]
fn unknown_foreign_key_value_is_a_query_error() {
    let (conn, catalog) = setup();
    let err = insert_row(
        &conn,
        &catalog,
        "LIVECORP_COLONY",
        &cols(&[("Region_Id", Value::Integer(77))]),
    )
    .unwrap_err();
    assert!(matches!(err, DbError::Sqlite(_)));
    assert_eq!(row_count(&conn, "LIVECORP_COLONY"), 0);
}

#[test]
fn reference_values_lists_id_and_display() {
    let (conn, catalog) = setup();
    let fk = catalog.foreign_key_for("Location_Id").unwrap();
    let values = reference_values(&conn, fk).unwrap();
    assert_eq!(
        values,
        vec![(Value::Integer(1), Value::Text("Cheese Caves".into()))]
    );
}

#[test]
fn fetch_unknown_table_fails() {
    let (conn, catalog) = setup();
    assert!(matches!(
        fetch_all(&conn, &catalog, "sqlite_master"),
        Err(DbError::Catalog(_))
    ));
}
