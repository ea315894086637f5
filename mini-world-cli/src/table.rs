//! Fixed-width text tables.

/// Widest a column may get, padding included.
const MAX_COLUMN_WIDTH: usize = 30;

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

/// Render a table as lines: separator, centred header, separator, rows,
/// separator. Cells wider than their column are truncated.
pub(crate) fn render_table(headers: &[String], rows: &[Vec<String>]) -> Vec<String> {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let longest = rows
                .iter()
                .filter_map(|r| r.get(idx))
                .map(|cell| cell.chars().count())
                .fold(header.chars().count(), usize::max);
            (longest + 2).min(MAX_COLUMN_WIDTH)
        })
        .collect();

    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("+");
    let header = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:^width$}", truncate_str(h, *w), width = *w))
        .collect::<Vec<_>>()
        .join("|");

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(separator.clone());
    lines.push(header);
    lines.push(separator.clone());
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(idx, w)| {
                let cell = row.get(idx).map(String::as_str).unwrap_or("");
                format!("{:<width$}", truncate_str(cell, *w), width = *w)
            })
            .collect::<Vec<_>>()
            .join("|");
        lines.push(line);
    }
    lines.push(separator);
    lines
}

/// Log a rendered table followed by a row count.
pub(crate) fn log_table(headers: &[String], rows: &[Vec<String>]) {
    for line in render_table(headers, rows) {
        log::info!("{}", line);
    }
    crate::logger::log_blank();
    log::info!("Total rows: {}", rows.len());
}

/// Format an optional float for display, `NULL` when absent.
pub(crate) fn fmt_opt_f64(v: Option<f64>, decimals: usize) -> String {
    v.map_or_else(|| "NULL".to_string(), |v| format!("{:.*}", decimals, v))
}

/// Format an optional displayable value, `NULL` when absent.
pub(crate) fn fmt_opt<T: std::fmt::Display>(v: Option<T>) -> String {
    v.map_or_else(|| "NULL".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn widths_pad_by_two_and_centre_headers() {
        let lines = render_table(
            &strings(&["Id", "Name"]),
            &[strings(&["1", "Cheese Caves"]), strings(&["2", "NULL"])],
        );
        assert_eq!(lines[0], "----+--------------");
        assert_eq!(lines[1], " Id |     Name     ");
        assert_eq!(lines[3], "1   |Cheese Caves  ");
        assert_eq!(lines[4], "2   |NULL          ");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn wide_cells_are_capped_and_truncated() {
        let long = "x".repeat(50);
        let lines = render_table(&strings(&["Description"]), &[vec![long]]);
        assert_eq!(lines[0].len(), 30);
        assert!(lines[3].ends_with("..."));
        assert_eq!(lines[3].chars().count(), 30);
    }

    #[test]
    fn empty_table_still_has_frame() {
        let lines = render_table(&strings(&["A"]), &[]);
        assert_eq!(lines, ["---", " A ", "---", "---"]);
    }

    #[test]
    fn truncate_handles_multibyte() {
        assert_eq!(truncate_str("crème brûlée", 8), "crème...");
        assert_eq!(truncate_str("abc", 2), "ab");
        assert_eq!(truncate_str("short", 10), "short");
    }

    #[test]
    fn optional_formatting() {
        assert_eq!(fmt_opt_f64(Some(194.64705), 3), "194.647");
        assert_eq!(fmt_opt_f64(None, 2), "NULL");
        assert_eq!(fmt_opt(Some(5)), "5");
        assert_eq!(fmt_opt::<i64>(None), "NULL");
    }
}
