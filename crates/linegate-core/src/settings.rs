use crate::error::{GateError, Result};
use crate::paths;
use serde_json::{json, Map, Value};
use std::path::Path;

pub const HOOK_EVENT: &str = "PreToolUse";
pub const HOOK_MATCHER: &str = "Write|Edit|MultiEdit";
pub const DEFAULT_HOOK_COMMAND: &str = "linegate check";

/// Register `command` as a PreToolUse hook in `<root>/.claude/settings.json`.
///
/// Creates the file if needed and leaves every unrelated key untouched.
/// Returns `false` when a hook with the same command is already present.
pub fn register_hook(root: &Path, command: &str) -> Result<bool> {
    let path = paths::settings_path(root);
    let mut settings = read_settings(&path)?;

    if hook_present(&settings, command) {
        return Ok(false);
    }

    let invalid = |reason: &str| GateError::InvalidSettings {
        path: path.display().to_string(),
        reason: reason.to_string(),
    };

    let root_obj = settings
        .as_object_mut()
        .ok_or_else(|| invalid("top level is not an object"))?;
    let hooks = root_obj
        .entry("hooks")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| invalid("'hooks' is not an object"))?;
    let event = hooks
        .entry(HOOK_EVENT)
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| invalid("'hooks.PreToolUse' is not an array"))?;

    event.push(json!({
        "matcher": HOOK_MATCHER,
        "hooks": [{ "type": "command", "command": command }],
    }));

    let mut data = serde_json::to_string_pretty(&settings)?;
    data.push('\n');
    crate::io::replace_file(&path, data.as_bytes())?;
    Ok(true)
}

/// Whether `command` is already registered for PreToolUse in `root`.
pub fn is_registered(root: &Path, command: &str) -> Result<bool> {
    let settings = read_settings(&paths::settings_path(root))?;
    Ok(hook_present(&settings, command))
}

fn read_settings(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Ok(Value::Object(Map::new()));
    }
    let data = std::fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    Ok(serde_json::from_str(&data)?)
}

fn hook_present(settings: &Value, command: &str) -> bool {
    settings
        .pointer("/hooks/PreToolUse")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.get("hooks").and_then(Value::as_array))
        .flatten()
        .any(|hook| hook.get("command").and_then(Value::as_str) == Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_settings_file() {
        let dir = TempDir::new().unwrap();
        assert!(register_hook(dir.path(), DEFAULT_HOOK_COMMAND).unwrap());

        let data = std::fs::read_to_string(paths::settings_path(dir.path())).unwrap();
        let v: Value = serde_json::from_str(&data).unwrap();
        assert_eq!(v["hooks"]["PreToolUse"][0]["matcher"], HOOK_MATCHER);
        assert_eq!(
            v["hooks"]["PreToolUse"][0]["hooks"][0]["command"],
            DEFAULT_HOOK_COMMAND
        );
        assert!(is_registered(dir.path(), DEFAULT_HOOK_COMMAND).unwrap());
    }

    #[test]
    fn registration_is_idempotent() {
        let dir = TempDir::new().unwrap();
        assert!(register_hook(dir.path(), DEFAULT_HOOK_COMMAND).unwrap());
        assert!(!register_hook(dir.path(), DEFAULT_HOOK_COMMAND).unwrap());

        let data = std::fs::read_to_string(paths::settings_path(dir.path())).unwrap();
        let v: Value = serde_json::from_str(&data).unwrap();
        assert_eq!(v["hooks"]["PreToolUse"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn preserves_existing_keys_and_hooks() {
        let dir = TempDir::new().unwrap();
        let path = paths::settings_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"{
  "permissions": {"allow": ["Bash(ls:*)"]},
  "hooks": {
    "PostToolUse": [{"matcher": "Write", "hooks": [{"type": "command", "command": "fmt.sh"}]}],
    "PreToolUse": [{"matcher": "Bash", "hooks": [{"type": "command", "command": "guard.sh"}]}]
  }
}"#,
        )
        .unwrap();

        assert!(register_hook(dir.path(), DEFAULT_HOOK_COMMAND).unwrap());
        let v: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(v["permissions"]["allow"][0], "Bash(ls:*)");
        assert_eq!(v["hooks"]["PostToolUse"][0]["hooks"][0]["command"], "fmt.sh");
        let pre = v["hooks"]["PreToolUse"].as_array().unwrap();
        assert_eq!(pre.len(), 2);
        assert_eq!(pre[0]["hooks"][0]["command"], "guard.sh");
    }

    #[test]
    fn non_object_hooks_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = paths::settings_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"hooks": []}"#).unwrap();
        let err = register_hook(dir.path(), DEFAULT_HOOK_COMMAND).unwrap_err();
        assert!(matches!(err, GateError::InvalidSettings { .. }));
    }
}
