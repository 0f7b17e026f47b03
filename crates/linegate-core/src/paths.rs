use crate::error::{GateError, Result};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const CLAUDE_DIR: &str = ".claude";
pub const CONFIG_FILE: &str = ".claude/linegate.yaml";
pub const SETTINGS_FILE: &str = ".claude/settings.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn claude_dir(root: &Path) -> PathBuf {
    root.join(CLAUDE_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn settings_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE)
}

/// `~/.claude/linegate.yaml`, consulted when a project has no config of its own.
pub fn user_config_path() -> Result<PathBuf> {
    let home = home::home_dir().ok_or(GateError::HomeNotFound)?;
    Ok(config_path(&home))
}
