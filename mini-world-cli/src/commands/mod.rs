pub(crate) mod browse;
pub(crate) mod modify;
pub(crate) mod reports;

use mini_world_db::{ColumnValues, Value};

use crate::error::CliError;
use crate::logger::{log_blank, log_header, rule};
use crate::session::Session;

/// List catalog tables and read the operator's pick.
pub(crate) fn select_table(session: &mut Session) -> Result<String, CliError> {
    let tables: Vec<String> = session.catalog.tables().map(String::from).collect();

    log_header("AVAILABLE TABLES");
    for (idx, table) in tables.iter().enumerate() {
        log::info!("{}. {}", idx + 1, table);
    }
    log::info!("{}", rule());

    let idx = session
        .console
        .read_choice("\nEnter table number: ", tables.len())?;
    Ok(tables[idx].clone())
}

/// Show candidate values for a foreign-key column, if it is one.
///
/// Lookup failures are reported and otherwise ignored.
pub(crate) fn show_reference_data(session: &Session, column: &str) {
    let Some(fk) = session.catalog.foreign_key_for(column) else {
        return;
    };

    match mini_world_db::reference_values(&session.conn, fk) {
        Ok(values) if values.is_empty() => {}
        Ok(values) => {
            log_blank();
            log::info!("  Available {} values from {}:", column, fk.table);
            log::info!("  {}", "-".repeat(50));
            for (id, display) in values {
                log::info!(
                    "  {}: {} -> {}: {}",
                    fk.id_column,
                    id,
                    fk.display_column,
                    display
                );
            }
            log::info!("  {}", "-".repeat(50));
        }
        Err(e) => log::warn!("  (Could not fetch reference data: {})", e),
    }
}

/// Collect `column = value` pairs by numbered column choice until 0.
///
/// `purpose` is shown in the column prompt, e.g. "for WHERE condition".
pub(crate) fn collect_pairs(
    session: &mut Session,
    table: &str,
    purpose: &str,
    value_prompt: &str,
) -> Result<ColumnValues, CliError> {
    let columns = session.catalog.columns(table)?.to_vec();
    let mut pairs = ColumnValues::new();

    loop {
        log_blank();
        log::info!("Available columns:");
        for (idx, col) in columns.iter().enumerate() {
            log::info!("{}. {}", idx + 1, col);
        }

        let prompt = format!("\nSelect column {} (0 to finish): ", purpose);
        let idx = match session.console.read_choice_or_done(&prompt, columns.len()) {
            Ok(Some(idx)) => idx,
            Ok(None) => break,
            Err(CliError::Validation(msg)) => {
                log::error!("{}", msg);
                continue;
            }
            Err(e) => return Err(e),
        };

        let column = &columns[idx];
        show_reference_data(session, column);
        let input = session
            .console
            .read_line(&format!("{} {}: ", value_prompt, column))?;
        pairs.insert(column.clone(), Value::from_input(&input));
    }

    Ok(pairs)
}
