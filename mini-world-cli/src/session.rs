//! The main menu loop and the state it owns for the process lifetime.

use mini_world_catalog::Catalog;
use rusqlite::Connection;

use crate::commands;
use crate::console::{parse_choice, Console};
use crate::error::CliError;
use crate::logger::{log_header, log_success, rule};

/// Main menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuChoice {
    Insert,
    Update,
    Delete,
    View,
    Reports,
    Exit,
}

impl MenuChoice {
    const ALL: [MenuChoice; 6] = [
        MenuChoice::Insert,
        MenuChoice::Update,
        MenuChoice::Delete,
        MenuChoice::View,
        MenuChoice::Reports,
        MenuChoice::Exit,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Insert => "Insert data",
            Self::Update => "Update data",
            Self::Delete => "Delete data",
            Self::View => "View tables",
            Self::Reports => "Run reports",
            Self::Exit => "Exit",
        }
    }

    pub(crate) fn parse(input: &str) -> Result<Self, CliError> {
        parse_choice(input, Self::ALL.len()).map(|idx| Self::ALL[idx])
    }
}

/// Connection, catalog, and console, held from connect until exit.
pub(crate) struct Session {
    pub(crate) conn: Connection,
    pub(crate) catalog: Catalog,
    pub(crate) console: Console,
}

impl Session {
    pub(crate) fn new(conn: Connection, catalog: Catalog, console: Console) -> Self {
        Self {
            conn,
            catalog,
            console,
        }
    }

    /// Run the menu until the operator exits or interrupts, then close the
    /// connection.
    pub(crate) fn run(mut self) {
        loop {
            display_menu();
            let prompt = format!("\nEnter your choice (1-{}): ", MenuChoice::ALL.len());
            let input = match self.console.read_line(&prompt) {
                Ok(input) => input,
                Err(CliError::Interrupted) => {
                    crate::logger::log_blank();
                    log_success("Interrupted by user. Closing connection...");
                    break;
                }
                Err(e) => {
                    log::error!("{}", e);
                    break;
                }
            };

            let choice = match MenuChoice::parse(&input) {
                Ok(choice) => choice,
                Err(e) => {
                    log::error!("{}", e);
                    continue;
                }
            };

            let result = match choice {
                MenuChoice::Insert => commands::modify::run_insert(&mut self),
                MenuChoice::Update => commands::modify::run_update(&mut self),
                MenuChoice::Delete => commands::modify::run_delete(&mut self),
                MenuChoice::View => commands::browse::run_view(&mut self),
                MenuChoice::Reports => commands::reports::run_reports(&mut self),
                MenuChoice::Exit => {
                    crate::logger::log_blank();
                    log_success("Closing database connection...");
                    break;
                }
            };

            match result {
                Ok(()) => {}
                Err(CliError::Interrupted) => {
                    crate::logger::log_blank();
                    log_success("Interrupted by user. Closing connection...");
                    break;
                }
                Err(e) => log::error!("{}", e),
            }
        }

        self.close();
    }

    fn close(self) {
        match self.conn.close() {
            Ok(()) => log_success("Thank you for using Mini World Database CLI!"),
            Err((_, e)) => log::error!("Error closing database connection: {}", e),
        }
    }
}

fn display_menu() {
    log_header("MINI WORLD DATABASE CLI");
    for (idx, choice) in MenuChoice::ALL.iter().enumerate() {
        log::info!("{}. {}", idx + 1, choice.label());
    }
    log::info!("{}", rule());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choices_parse_in_order() {
        assert_eq!(MenuChoice::parse("1").unwrap(), MenuChoice::Insert);
        assert_eq!(MenuChoice::parse("5").unwrap(), MenuChoice::Reports);
        assert_eq!(MenuChoice::parse("6").unwrap(), MenuChoice::Exit);
    }

    #[test]
    fn bad_menu_input_is_validation() {
        assert!(matches!(MenuChoice::parse("7"), Err(CliError::Validation(_))));
        assert!(matches!(MenuChoice::parse("exit"), Err(CliError::Validation(_))));
    }
}
