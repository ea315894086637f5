//! Console logger: every user-facing line goes through the `log` macros.
//!
//! Info and debug records print to stdout, warnings and errors to stderr.
//! An optional log file receives the same lines with ANSI codes stripped.
//!
//! Menus, prompts and tables are the console itself and always print.
//! `--quiet` drops status lines, which are logged under [`STATUS_TARGET`].

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::OwoColorize;
use owo_colors::Stream::{Stderr, Stdout};

/// Target for success and progress lines that `--quiet` suppresses.
pub(crate) const STATUS_TARGET: &str = "mini_world::status";

struct CliLogger {
    verbose: bool,
    quiet: bool,
    file: Option<Mutex<File>>,
}

impl CliLogger {
    /// Whether a record from `target` at `level` should be written.
    fn accepts(&self, level: Level, target: &str) -> bool {
        if level > log::max_level() {
            return false;
        }
        // Dependencies only get a say in verbose mode.
        if !self.verbose && !target.starts_with("mini_world") {
            return false;
        }
        !(self.quiet && level >= Level::Info && target == STATUS_TARGET)
    }

    fn prefix(&self, level: Level) -> String {
        if self.verbose {
            format!(
                "[{} {:<5}] ",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                level
            )
        } else {
            String::new()
        }
    }
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.accepts(metadata.level(), metadata.target())
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let prefix = self.prefix(record.level());
        let line = match record.level() {
            Level::Error => {
                let line = format!(
                    "{}{} {}",
                    prefix,
                    "\u{2717}".if_supports_color(Stderr, |t| t.red()),
                    record.args()
                );
                eprintln!("{}", line);
                line
            }
            Level::Warn => {
                let line = format!(
                    "{}{} {}",
                    prefix,
                    "\u{26A0}".if_supports_color(Stderr, |t| t.yellow()),
                    record.args()
                );
                eprintln!("{}", line);
                line
            }
            Level::Info => {
                let line = format!("{}{}", prefix, record.args());
                println!("{}", line);
                line
            }
            Level::Debug | Level::Trace => {
                let line = format!("{}{}", prefix, record.args());
                println!("{}", line.if_supports_color(Stdout, |t| t.dimmed()));
                line
            }
        };

        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = writeln!(f, "{}", strip_ansi_escapes::strip_str(&line));
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = f.flush();
            }
        }
    }
}

/// Install the logger. Call once, before anything logs.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> std::io::Result<()> {
    let file = match logfile {
        Some(path) => Some(Mutex::new(
            OpenOptions::new().create(true).append(true).open(path)?,
        )),
        None => None,
    };

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let logger = CliLogger {
        verbose,
        quiet,
        file,
    };
    // A second call keeps the first logger; nothing else to do.
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
    Ok(())
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}

/// Log a success line with a green check mark.
pub(crate) fn log_success(msg: &str) {
    log::info!(
        target: STATUS_TARGET,
        "{} {}",
        "\u{2713}".if_supports_color(Stdout, |t| t.green()),
        msg
    );
}

/// A full-width rule, as used around section headers.
pub(crate) fn rule() -> String {
    "=".repeat(60)
}

/// Log a section header framed by rules.
pub(crate) fn log_header(title: &str) {
    log_blank();
    log::info!("{}", rule());
    log::info!("{}", title.if_supports_color(Stdout, |t| t.bold()));
    log::info!("{}", rule());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logger(quiet: bool, verbose: bool) -> CliLogger {
        log::set_max_level(LevelFilter::Debug);
        CliLogger {
            verbose,
            quiet,
            file: None,
        }
    }

    #[test]
    fn quiet_keeps_console_output_and_drops_status() {
        let l = logger(true, false);
        assert!(l.accepts(Level::Info, "mini_world_cli::commands::reports"));
        assert!(!l.accepts(Level::Info, STATUS_TARGET));
        assert!(l.accepts(Level::Warn, STATUS_TARGET));
        assert!(l.accepts(Level::Error, "mini_world_cli::session"));
    }

    #[test]
    fn dependencies_need_verbose() {
        assert!(!logger(false, false).accepts(Level::Info, "rustyline"));
        assert!(logger(false, true).accepts(Level::Info, "rustyline"));
    }
}
