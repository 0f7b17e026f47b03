use serde::Serialize;
use std::fmt::Write as _;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    /// Counts and limits, so the digits line up.
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub align: Align,
}

impl Column {
    pub const fn left(header: &'static str) -> Self {
        Self { header, align: Align::Left }
    }

    pub const fn right(header: &'static str) -> Self {
        Self { header, align: Align::Right }
    }
}

/// A record that can be shown as one line of a plain-text table.
pub trait Row {
    const COLUMNS: &'static [Column];

    /// One cell per entry in [`Row::COLUMNS`].
    fn cells(&self) -> Vec<String>;
}

/// Lay `rows` out under a header and a dashed rule, two spaces between
/// columns. Trailing padding is dropped from every line.
pub fn render_rows<R: Row>(rows: &[R]) -> String {
    let cells: Vec<Vec<String>> = rows.iter().map(R::cells).collect();
    let widths: Vec<usize> = R::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, col)| {
            cells
                .iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .fold(col.header.len(), usize::max)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<&str> = R::COLUMNS.iter().map(|c| c.header).collect();
    push_line(&mut out, R::COLUMNS, &widths, &header);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_line(&mut out, R::COLUMNS, &widths, &rule);
    for row in &cells {
        let row: Vec<&str> = row.iter().map(String::as_str).collect();
        push_line(&mut out, R::COLUMNS, &widths, &row);
    }
    out
}

pub fn print_rows<R: Row>(rows: &[R]) {
    print!("{}", render_rows(rows));
}

fn push_line(out: &mut String, columns: &[Column], widths: &[usize], cells: &[&str]) {
    let mut line = String::new();
    for (i, (col, width)) in columns.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let cell = cells.get(i).copied().unwrap_or("");
        let _ = match col.align {
            Align::Left => write!(line, "{cell:<width$}"),
            Align::Right => write!(line, "{cell:>width$}"),
        };
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample(&'static str, usize);

    impl Row for Sample {
        const COLUMNS: &'static [Column] = &[Column::left("PATH"), Column::right("LINES")];

        fn cells(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    #[test]
    fn numeric_columns_are_right_aligned() {
        let out = render_rows(&[Sample("a.py", 7), Sample("src/long.ts", 1024)]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "PATH         LINES");
        assert_eq!(lines[1], "-----------  -----");
        assert_eq!(lines[2], "a.py             7");
        assert_eq!(lines[3], "src/long.ts   1024");
    }

    #[test]
    fn empty_table_still_has_header() {
        let out = render_rows::<Sample>(&[]);
        assert_eq!(out, "PATH  LINES\n----  -----\n");
    }
}
