//! Insert, update, and delete flows.

use mini_world_db::{ColumnValues, Value};

use super::browse::display_table_data;
use super::{collect_pairs, select_table, show_reference_data};
use crate::error::CliError;
use crate::logger::{log_header, log_success};
use crate::session::Session;

/// Entry point for "Insert data".
pub(crate) fn run_insert(session: &mut Session) -> Result<(), CliError> {
    let table = select_table(session)?;
    log_header(&format!("INSERT DATA INTO {}", table));

    let descriptor = session.catalog.table(&table)?.clone();
    let mut values = ColumnValues::new();

    for column in &descriptor.columns {
        if descriptor.is_auto_increment(column) {
            let input = session.console.read_line(&format!(
                "{} (AUTO_INCREMENT - press Enter to skip): ",
                column
            ))?;
            if !input.is_empty() {
                values.insert(column.clone(), Value::from_input(&input));
            }
            continue;
        }

        show_reference_data(session, column);
        loop {
            let input = session.console.read_line(&format!("Enter {}: ", column))?;
            if input.is_empty() {
                log::error!("Value cannot be empty (use 'null' for NULL values)");
                continue;
            }
            values.insert(column.clone(), Value::from_input(&input));
            break;
        }
    }

    match mini_world_db::insert_row(&session.conn, &session.catalog, &table, &values) {
        Ok(()) => {
            crate::logger::log_blank();
            log_success(&format!("Data inserted successfully into {}!", table));
        }
        Err(e) => log::error!("Error inserting data: {}", e),
    }
    Ok(())
}

/// Entry point for "Update data".
pub(crate) fn run_update(session: &mut Session) -> Result<(), CliError> {
    let table = select_table(session)?;
    display_table_data(session, &table);
    log_header(&format!("UPDATE DATA IN {}", table));

    crate::logger::log_blank();
    log::info!("Specify WHERE condition:");
    let filter = collect_pairs(session, &table, "for WHERE condition", "Enter value for")?;
    // Fail before asking for SET columns.
    mini_world_db::where_clause(&session.catalog, &table, &filter)?;

    crate::logger::log_blank();
    log::info!("Specify columns to UPDATE:");
    let set = collect_pairs(session, &table, "to update", "Enter new value for")?;

    let stmt = mini_world_db::plan_update(&session.catalog, &table, &set, &filter)?;
    match mini_world_db::execute(&session.conn, &stmt) {
        Ok(0) => log::warn!("No rows matched the WHERE condition."),
        Ok(n) => log_success(&format!("{} row(s) updated successfully in {}!", n, table)),
        Err(e) => log::error!("Error updating data: {}", e),
    }
    Ok(())
}

/// Entry point for "Delete data".
pub(crate) fn run_delete(session: &mut Session) -> Result<(), CliError> {
    let table = select_table(session)?;
    display_table_data(session, &table);
    log_header(&format!("DELETE DATA FROM {}", table));

    crate::logger::log_blank();
    log::info!("Specify WHERE condition:");
    let filter = collect_pairs(session, &table, "for WHERE condition", "Enter value for")?;
    let stmt = mini_world_db::plan_delete(&session.catalog, &table, &filter)?;
    let where_clause = stmt.where_clause.as_deref().unwrap_or_default();

    let confirmed = session.console.confirm(&format!(
        "\n\u{26A0} Are you sure you want to delete from {} WHERE {}? (yes/no): ",
        table, where_clause
    ))?;
    if !confirmed {
        log::warn!("Delete operation cancelled.");
        return Ok(());
    }

    match mini_world_db::execute(&session.conn, &stmt) {
        Ok(0) => log::warn!("No rows matched the WHERE condition."),
        Ok(n) => log_success(&format!("{} row(s) deleted successfully from {}!", n, table)),
        Err(e) => log::error!("Error deleting data: {}", e),
    }
    Ok(())
}
