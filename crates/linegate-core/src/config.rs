use crate::error::Result;
use crate::paths;
use crate::threshold::{FileClass, ThresholdTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const CURRENT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ConfigSource
// ---------------------------------------------------------------------------

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "path", rename_all = "snake_case")]
pub enum ConfigSource {
    Project(PathBuf),
    User(PathBuf),
    Builtin,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    /// `false` turns the gate into a pass-through.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Per-extension limits replacing or extending the built-in table.
    #[serde(default)]
    pub thresholds: BTreeMap<String, usize>,
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

fn default_enabled() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            enabled: true,
            thresholds: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load the project config, or defaults when the project has none.
    pub fn load(root: &Path) -> Result<Self> {
        Ok(Self::read_optional(&paths::config_path(root))?.unwrap_or_default())
    }

    /// Project config, else user config, else built-in defaults.
    pub fn load_effective(root: &Path) -> Result<(Self, ConfigSource)> {
        let user = paths::user_config_path().ok();
        Self::load_layered(&paths::config_path(root), user.as_deref())
    }

    fn load_layered(project: &Path, user: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(cfg) = Self::read_optional(project)? {
            return Ok((cfg, ConfigSource::Project(project.to_path_buf())));
        }
        if let Some(user) = user {
            if let Some(cfg) = Self::read_optional(user)? {
                return Ok((cfg, ConfigSource::User(user.to_path_buf())));
            }
        }
        Ok((Self::default(), ConfigSource::Builtin))
    }

    fn read_optional(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(path)?;
        // An empty file is a valid "all defaults" config.
        if data.trim().is_empty() {
            return Ok(Some(Self::default()));
        }
        Ok(Some(serde_yaml::from_str(&data)?))
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::replace_file(&paths::config_path(root), data.as_bytes())
    }

    /// Effective table: built-in defaults with this config's overrides applied.
    pub fn threshold_table(&self) -> ThresholdTable {
        if self.thresholds.is_empty() {
            ThresholdTable::builtin().clone()
        } else {
            ThresholdTable::with_overrides(&self.thresholds)
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.version != CURRENT_VERSION {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "unknown config version {} (expected {CURRENT_VERSION})",
                    self.version
                ),
            });
        }

        for (ext, limit) in &self.thresholds {
            if ext.is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: "empty extension in thresholds".to_string(),
                });
                continue;
            }
            if ext.starts_with('.') {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!(
                        "extension '{ext}' has a leading dot; write '{}'",
                        ext.trim_start_matches('.')
                    ),
                });
            }
            if ext.contains('/') || ext.contains('\\') {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("extension '{ext}' contains a path separator"),
                });
            }
            if ext.chars().any(|c| c.is_uppercase()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "extension '{ext}' has uppercase letters; lookup is case-sensitive"
                    ),
                });
            }
            if *limit == 0 {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("threshold for '{ext}' is 0; every edit would be blocked"),
                });
            }
            if let Some(class) = FileClass::for_extension(ext) {
                if *limit == class.default_limit() {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!(
                            "threshold for '{ext}' repeats the built-in {class} limit of {limit}"
                        ),
                    });
                }
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
