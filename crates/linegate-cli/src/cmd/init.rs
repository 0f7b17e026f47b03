use crate::output::print_json;
use anyhow::Context;
use linegate_core::{io, paths, settings};
use std::path::Path;

const STARTER_CONFIG: &str = "\
# Line limits enforced before Write/Edit/MultiEdit tool calls.
# Built-in: py el sh src ts tsx js jsx css = 512, html htm = 1024.
version: 1
enabled: true
thresholds: {}
#  rs: 800
";

pub fn run(root: &Path, no_hook: bool, command: &str, json: bool) -> anyhow::Result<()> {
    let config_path = paths::config_path(root);
    let config_written = io::create_exclusive(&config_path, STARTER_CONFIG.as_bytes())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    if config_written {
        tracing::info!(path = %config_path.display(), "wrote starter config");
    }

    let hook_registered = if no_hook {
        false
    } else {
        settings::register_hook(root, command).context("failed to register hook")?
    };
    if hook_registered {
        tracing::info!(command, "registered PreToolUse hook");
    }

    if json {
        let value = serde_json::json!({
            "config": config_path,
            "config_written": config_written,
            "hook_registered": hook_registered,
        });
        return print_json(&value);
    }

    if config_written {
        println!("Created {}", config_path.display());
    } else {
        println!("Kept existing {}", config_path.display());
    }
    if no_hook {
        println!("Skipped hook registration");
    } else if hook_registered {
        println!(
            "Registered '{command}' in {}",
            paths::settings_path(root).display()
        );
    } else {
        println!("Hook '{command}' already registered");
    }
    Ok(())
}
