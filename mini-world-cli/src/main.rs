//! mini-world CLI
//!
//! Interactive console for browsing, editing, and reporting on the
//! mini-world intruders vs. foodimals database.

mod cli_types;
mod commands;
mod console;
mod error;
mod logger;
mod session;
mod table;

use std::path::PathBuf;

use clap::Parser;
use mini_world_catalog::Catalog;
use rusqlite::Connection;

use crate::cli_types::Cli;
use crate::console::Console;
use crate::error::CliError;
use crate::logger::{log_header, log_success};
use crate::session::Session;

const DEFAULT_DATABASE: &str = "mini_world.db";

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Error opening log file: {}", e);
        std::process::exit(1);
    }

    log_header("WELCOME TO MINI WORLD DATABASE CLI");

    let catalog = match load_catalog(cli.catalog.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut console = match Console::new() {
        Ok(console) => console,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let conn = match connect(&mut console, cli.database) {
        Ok(conn) => conn,
        Err(CliError::Interrupted) => {
            logger::log_blank();
            log_success("Interrupted by user. Goodbye!");
            return;
        }
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    Session::new(conn, catalog, console).run();
}

fn load_catalog(path: Option<&std::path::Path>) -> Result<Catalog, CliError> {
    let catalog = match path {
        Some(path) => {
            log::debug!("Loading catalog from {}", path.display());
            mini_world_catalog::load_catalog(path)?
        }
        None => mini_world_catalog::builtin_catalog()?,
    };
    log::debug!("Catalog has {} tables", catalog.tables().len());
    Ok(catalog)
}

/// Resolve the database path, prompting when it was not given, and open it.
fn connect(console: &mut Console, database: Option<PathBuf>) -> Result<Connection, CliError> {
    let path = match database {
        Some(path) => path,
        None => {
            log_header("DATABASE CONNECTION");
            PathBuf::from(console.read_with_default("Enter database path", DEFAULT_DATABASE)?)
        }
    };

    log::debug!("Opening {}", path.display());
    let conn = mini_world_db::open_database(&path)?;
    log_success("Successfully connected to the database!");
    Ok(conn)
}
