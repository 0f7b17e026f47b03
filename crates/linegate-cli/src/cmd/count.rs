use crate::output::{print_json, print_rows, Column, Row};
use anyhow::Context;
use linegate_core::config::Config;
use linegate_core::lines::line_count_bytes;
use linegate_core::threshold::ThresholdTable;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct FileCount {
    pub path: PathBuf,
    pub lines: usize,
    pub threshold: Option<usize>,
    pub over: bool,
}

pub fn run(root: &Path, paths: &[PathBuf], strict: bool, json: bool) -> anyhow::Result<()> {
    let config = Config::load_effective(root)
        .context("failed to load config")?
        .0;
    let table = config.threshold_table();

    let counts = paths
        .iter()
        .map(|p| measure(p, &table))
        .collect::<anyhow::Result<Vec<_>>>()?;

    if json {
        print_json(&counts)?;
    } else {
        print_rows(&counts);
    }

    let over = counts.iter().filter(|c| c.over).count();
    if strict && over > 0 {
        anyhow::bail!("{over} file(s) over their line limit");
    }
    Ok(())
}

fn measure(path: &Path, table: &ThresholdTable) -> anyhow::Result<FileCount> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let lines = line_count_bytes(&bytes);
    let threshold = table.lookup(path).map(|(_, limit)| limit);
    Ok(FileCount {
        path: path.to_path_buf(),
        lines,
        threshold,
        over: threshold.is_some_and(|t| lines > t),
    })
}

impl Row for FileCount {
    const COLUMNS: &'static [Column] = &[
        Column::left("PATH"),
        Column::right("LINES"),
        Column::right("LIMIT"),
        Column::left("STATUS"),
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.path.display().to_string(),
            self.lines.to_string(),
            self.threshold.map_or_else(|| "-".into(), |t| t.to_string()),
            status(self).to_string(),
        ]
    }
}

fn status(c: &FileCount) -> &'static str {
    match (c.threshold, c.over) {
        (None, _) => "ungated",
        (Some(_), true) => "over",
        (Some(_), false) => "ok",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn measure_flags_oversized_files() {
        let dir = TempDir::new().unwrap();
        let big = dir.path().join("big.css");
        let small = dir.path().join("small.css");
        let data = dir.path().join("data.json");
        std::fs::write(&big, "a{}\n".repeat(513)).unwrap();
        std::fs::write(&small, "a{}").unwrap();
        std::fs::write(&data, "1\n".repeat(9000)).unwrap();

        let table = ThresholdTable::builtin();
        let b = measure(&big, table).unwrap();
        assert_eq!(b.lines, 513);
        assert!(b.over);
        assert_eq!(status(&b), "over");

        let s = measure(&small, table).unwrap();
        assert_eq!(s.lines, 1);
        assert_eq!(status(&s), "ok");

        let d = measure(&data, table).unwrap();
        assert_eq!(d.threshold, None);
        assert!(!d.over);
        assert_eq!(status(&d), "ungated");
    }

    #[test]
    fn ungated_row_shows_dash_for_limit() {
        let c = FileCount {
            path: "data.json".into(),
            lines: 12,
            threshold: None,
            over: false,
        };
        assert_eq!(c.cells(), vec!["data.json", "12", "-", "ungated"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(measure(&dir.path().join("nope.py"), ThresholdTable::builtin()).is_err());
    }
}
