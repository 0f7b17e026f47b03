use crate::output::{print_json, print_rows, Column, Row};
use anyhow::Context;
use linegate_core::config::{Config, ConfigSource};
use linegate_core::threshold::ThresholdEntry;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let (config, source) = Config::load_effective(root).context("failed to load config")?;
    let table = config.threshold_table();

    if json {
        let value = serde_json::json!({
            "enabled": config.enabled,
            "config": source,
            "thresholds": table.entries(),
        });
        return print_json(&value);
    }

    print_rows(&table.entries());

    println!();
    match source {
        ConfigSource::Project(p) | ConfigSource::User(p) => println!("config: {}", p.display()),
        ConfigSource::Builtin => println!("config: built-in defaults"),
    }
    if !config.enabled {
        println!("gate is disabled");
    }
    Ok(())
}

impl Row for ThresholdEntry {
    const COLUMNS: &'static [Column] = &[
        Column::left("EXTENSION"),
        Column::right("LIMIT"),
        Column::left("CLASS"),
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            format!(".{}", self.extension),
            self.limit.to_string(),
            self.class.map_or_else(|| "custom".into(), |c| c.to_string()),
        ]
    }
}
