use crate::error::CliError;
use crate::logger::{log_header, rule};
use crate::session::Session;
use crate::table::log_table;

/// Entry point for "View tables".
pub(crate) fn run_view(session: &mut Session) -> Result<(), CliError> {
    let table = super::select_table(session)?;
    display_table_data(session, &table);
    Ok(())
}

/// Print every row of a table. Used on its own and as the preview before
/// update and delete.
pub(crate) fn display_table_data(session: &Session, table: &str) {
    let rows = match mini_world_db::fetch_all(&session.conn, &session.catalog, table) {
        Ok(rows) => rows,
        Err(e) => {
            log::error!("Error fetching data: {}", e);
            return;
        }
    };

    let Some(first) = rows.first() else {
        log::warn!("No data found in {}", table);
        return;
    };

    log_header(&format!("DATA IN {}", table));
    let headers: Vec<String> = first.keys().cloned().collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.values().map(ToString::to_string).collect())
        .collect();
    log_table(&headers, &cells);
    log::info!("{}", rule());
}
