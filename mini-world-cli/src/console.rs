//! Line input and the pure parsing behind each prompt.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::error::CliError;

/// Interactive line reader. Ctrl-C and end of input both surface as
/// [`CliError::Interrupted`].
pub(crate) struct Console {
    editor: DefaultEditor,
}

impl Console {
    pub(crate) fn new() -> Result<Self, CliError> {
        let editor = DefaultEditor::new().map_err(|e| CliError::readline(e.to_string()))?;
        Ok(Self { editor })
    }

    /// Read one line, trimmed.
    pub(crate) fn read_line(&mut self, prompt: &str) -> Result<String, CliError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim().to_string();
                if !trimmed.is_empty() {
                    let _ = self.editor.add_history_entry(trimmed.as_str());
                }
                Ok(trimmed)
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Err(CliError::Interrupted),
            Err(e) => Err(CliError::readline(e.to_string())),
        }
    }

    /// Read a line, substituting `default` when the operator just presses Enter.
    pub(crate) fn read_with_default(
        &mut self,
        prompt: &str,
        default: &str,
    ) -> Result<String, CliError> {
        let input = self.read_line(&format!("{} (default: {}): ", prompt, default))?;
        Ok(if input.is_empty() {
            default.to_string()
        } else {
            input
        })
    }

    /// Read a 1-based choice from a list of `count` entries.
    pub(crate) fn read_choice(&mut self, prompt: &str, count: usize) -> Result<usize, CliError> {
        let input = self.read_line(prompt)?;
        parse_choice(&input, count)
    }

    /// Read a choice where 0 means "done". Returns `None` for 0.
    pub(crate) fn read_choice_or_done(
        &mut self,
        prompt: &str,
        count: usize,
    ) -> Result<Option<usize>, CliError> {
        let input = self.read_line(prompt)?;
        let n = parse_number(&input)?;
        if n == 0 {
            Ok(None)
        } else {
            parse_choice(&input, count).map(Some)
        }
    }

    /// Ask a yes/no question; only the literal answer `yes` confirms.
    pub(crate) fn confirm(&mut self, prompt: &str) -> Result<bool, CliError> {
        let input = self.read_line(prompt)?;
        Ok(is_confirmation(&input))
    }
}

fn parse_number(input: &str) -> Result<usize, CliError> {
    input
        .trim()
        .parse::<usize>()
        .map_err(|_| CliError::validation("Please enter a valid number!"))
}

/// Parse a 1-based menu choice into a 0-based index.
pub(crate) fn parse_choice(input: &str, count: usize) -> Result<usize, CliError> {
    let n = parse_number(input)?;
    if (1..=count).contains(&n) {
        Ok(n - 1)
    } else {
        Err(CliError::validation(format!(
            "Invalid choice! Please enter a number between 1 and {}.",
            count
        )))
    }
}

pub(crate) fn is_confirmation(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("yes")
}

/// Parse a report threshold such as `150` or `194.5`.
pub(crate) fn parse_threshold(input: &str) -> Result<f64, CliError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CliError::validation(format!("'{}' is not a number", input.trim())))
}

/// Parse a row identifier such as a colony id.
pub(crate) fn parse_id(input: &str) -> Result<i64, CliError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| CliError::validation(format!("'{}' is not a valid id", input.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_is_one_based() {
        assert_eq!(parse_choice("1", 17).unwrap(), 0);
        assert_eq!(parse_choice(" 17 ", 17).unwrap(), 16);
    }

    #[test]
    fn choice_out_of_range_or_garbage() {
        assert!(matches!(parse_choice("0", 5), Err(CliError::Validation(_))));
        assert!(matches!(parse_choice("6", 5), Err(CliError::Validation(_))));
        assert!(matches!(parse_choice("two", 5), Err(CliError::Validation(_))));
        assert!(matches!(parse_choice("-1", 5), Err(CliError::Validation(_))));
    }

    #[test]
    fn only_yes_confirms() {
        assert!(is_confirmation("yes"));
        assert!(is_confirmation(" YES "));
        assert!(!is_confirmation("y"));
        assert!(!is_confirmation("no"));
        assert!(!is_confirmation(""));
    }

    #[test]
    fn threshold_parsing() {
        assert_eq!(parse_threshold("150").unwrap(), 150.0);
        assert_eq!(parse_threshold(" 194.5 ").unwrap(), 194.5);
        assert!(parse_threshold("high").is_err());
        assert!(parse_threshold("NaN").is_err());
    }

    #[test]
    fn id_parsing() {
        assert_eq!(parse_id("3").unwrap(), 3);
        assert!(parse_id("3.5").is_err());
        assert!(parse_id("").is_err());
    }
}
