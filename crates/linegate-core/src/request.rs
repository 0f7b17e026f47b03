use crate::error::{GateError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Hook input (wire format)
// ---------------------------------------------------------------------------

/// PreToolUse payload as written to the hook's standard input.
///
/// Only the fields the gate reads are modelled; everything else is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_input: Option<ToolInput>,
    /// Some harness versions put the path at the top level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_string: Option<String>,
    #[serde(default)]
    pub replace_all: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edits: Option<Vec<FileEdit>>,
}

/// One element of a multi-edit `edits` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEdit {
    #[serde(default)]
    pub old_string: String,
    #[serde(default)]
    pub new_string: String,
    #[serde(default)]
    pub replace_all: bool,
}

impl HookInput {
    /// Parse raw standard input. Anything but a JSON object is rejected.
    pub fn parse(raw: &str) -> Result<HookInput> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(GateError::InvalidInput(
                "expected a JSON object".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Target path as given, before resolution against `cwd`.
    pub fn raw_target(&self) -> Option<&str> {
        self.tool_input
            .as_ref()
            .and_then(|t| t.file_path.as_deref())
            .or(self.file_path.as_deref())
            .filter(|p| !p.trim().is_empty())
    }

    pub fn into_request(self) -> Result<EditRequest> {
        let raw = self.raw_target().ok_or(GateError::MissingTargetPath)?;
        let target_path = resolve_target(self.cwd.as_deref(), raw);
        let mode = self
            .tool_input
            .map(EditMode::from_tool_input)
            .unwrap_or(EditMode::Untouched);
        Ok(EditRequest { target_path, mode })
    }
}

fn resolve_target(cwd: Option<&Path>, raw: &str) -> PathBuf {
    let path = PathBuf::from(raw);
    match cwd {
        Some(cwd) if path.is_relative() => cwd.join(path),
        _ => path,
    }
}

// ---------------------------------------------------------------------------
// EditRequest
// ---------------------------------------------------------------------------

/// A single substring replacement within the current file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub old: String,
    pub new: String,
    pub replace_all: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EditMode {
    /// The file is replaced wholesale by `content`.
    Full { content: String },
    /// Ordered fragment replacements applied to the current file.
    Partial { replacements: Vec<Replacement> },
    /// No content signal; sizing treats it as a no-op.
    Untouched,
}

impl EditMode {
    /// Pick the mode from whichever content fields are present.
    ///
    /// `content` wins, then a single `old_string`/`new_string` pair (a missing
    /// side is empty), then a non-empty `edits` array.
    pub fn from_tool_input(input: ToolInput) -> EditMode {
        if let Some(content) = input.content {
            return EditMode::Full { content };
        }
        if input.old_string.is_some() || input.new_string.is_some() {
            return EditMode::Partial {
                replacements: vec![Replacement {
                    old: input.old_string.unwrap_or_default(),
                    new: input.new_string.unwrap_or_default(),
                    replace_all: input.replace_all,
                }],
            };
        }
        match input.edits {
            Some(edits) if !edits.is_empty() => EditMode::Partial {
                replacements: edits
                    .into_iter()
                    .map(|e| Replacement {
                        old: e.old_string,
                        new: e.new_string,
                        replace_all: e.replace_all,
                    })
                    .collect(),
            },
            _ => EditMode::Untouched,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditRequest {
    pub target_path: PathBuf,
    #[serde(flatten)]
    pub mode: EditMode,
}

impl EditRequest {
    pub fn full(target_path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
            mode: EditMode::Full {
                content: content.into(),
            },
        }
    }

    pub fn partial(
        target_path: impl Into<PathBuf>,
        old: impl Into<String>,
        new: impl Into<String>,
    ) -> Self {
        Self {
            target_path: target_path.into(),
            mode: EditMode::Partial {
                replacements: vec![Replacement {
                    old: old.into(),
                    new: new.into(),
                    replace_all: false,
                }],
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_payload_is_full() {
        let raw = r#"{
            "session_id": "abc",
            "hook_event_name": "PreToolUse",
            "cwd": "/proj",
            "tool_name": "Write",
            "tool_input": {"file_path": "/proj/a.py", "content": "x\ny\n"}
        }"#;
        let req = HookInput::parse(raw).unwrap().into_request().unwrap();
        assert_eq!(req.target_path, PathBuf::from("/proj/a.py"));
        assert_eq!(
            req.mode,
            EditMode::Full {
                content: "x\ny\n".to_string()
            }
        );
    }

    #[test]
    fn edit_payload_is_partial() {
        let raw = r#"{"tool_name":"Edit","tool_input":{"file_path":"/a.ts","old_string":"a\n","new_string":"b\nc\n","replace_all":true}}"#;
        let req = HookInput::parse(raw).unwrap().into_request().unwrap();
        let EditMode::Partial { replacements } = req.mode else {
            panic!("expected partial mode");
        };
        assert_eq!(replacements.len(), 1);
        assert_eq!(replacements[0].old, "a\n");
        assert_eq!(replacements[0].new, "b\nc\n");
        assert!(replacements[0].replace_all);
    }

    #[test]
    fn missing_side_of_pair_is_empty() {
        let raw = r#"{"tool_input":{"file_path":"/a.ts","old_string":"gone\n"}}"#;
        let req = HookInput::parse(raw).unwrap().into_request().unwrap();
        assert_eq!(req, EditRequest::partial("/a.ts", "gone\n", ""));
    }

    #[test]
    fn multi_edit_payload_keeps_order() {
        let raw = r#"{"tool_name":"MultiEdit","tool_input":{"file_path":"/a.css","edits":[
            {"old_string":"1","new_string":"2"},
            {"old_string":"3","new_string":"4\n5","replace_all":true}
        ]}}"#;
        let req = HookInput::parse(raw).unwrap().into_request().unwrap();
        let EditMode::Partial { replacements } = req.mode else {
            panic!("expected partial mode");
        };
        assert_eq!(replacements.len(), 2);
        assert_eq!(replacements[0].old, "1");
        assert!(replacements[1].replace_all);
    }

    #[test]
    fn no_content_fields_is_untouched() {
        let raw = r#"{"tool_name":"NotebookEdit","tool_input":{"file_path":"/a.py","edits":[]}}"#;
        let req = HookInput::parse(raw).unwrap().into_request().unwrap();
        assert_eq!(req.mode, EditMode::Untouched);
    }

    #[test]
    fn relative_path_resolves_against_cwd() {
        let raw = r#"{"cwd":"/work","tool_input":{"file_path":"src/x.py","content":""}}"#;
        let req = HookInput::parse(raw).unwrap().into_request().unwrap();
        assert_eq!(req.target_path, PathBuf::from("/work/src/x.py"));
    }

    #[test]
    fn top_level_file_path_fallback() {
        let raw = r#"{"file_path":"/x.sh"}"#;
        let req = HookInput::parse(raw).unwrap().into_request().unwrap();
        assert_eq!(req.target_path, PathBuf::from("/x.sh"));
        assert_eq!(req.mode, EditMode::Untouched);
    }

    #[test]
    fn missing_path_is_an_error() {
        let raw = r#"{"tool_name":"Write","tool_input":{"content":"x"}}"#;
        let err = HookInput::parse(raw).unwrap().into_request().unwrap_err();
        assert!(matches!(err, GateError::MissingTargetPath));

        let blank = r#"{"tool_input":{"file_path":"  "}}"#;
        assert!(HookInput::parse(blank).unwrap().into_request().is_err());
    }

    #[test]
    fn non_object_input_is_rejected() {
        assert!(HookInput::parse("[1,2]").is_err());
        assert!(HookInput::parse("not json").is_err());
        assert!(HookInput::parse("").is_err());
    }

    #[test]
    fn wrong_field_types_are_rejected() {
        assert!(HookInput::parse(r#"{"tool_input":{"file_path":42}}"#).is_err());
    }
}
