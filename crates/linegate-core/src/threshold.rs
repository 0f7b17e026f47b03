use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// FileClass
// ---------------------------------------------------------------------------

/// Extension classes that share a line limit in the built-in table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileClass {
    Script,
    WebScript,
    Stylesheet,
    Markup,
}

impl FileClass {
    pub fn all() -> &'static [FileClass] {
        &[
            FileClass::Script,
            FileClass::WebScript,
            FileClass::Stylesheet,
            FileClass::Markup,
        ]
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            FileClass::Script => &["py", "el", "sh", "src"],
            FileClass::WebScript => &["ts", "tsx", "js", "jsx"],
            FileClass::Stylesheet => &["css"],
            FileClass::Markup => &["html", "htm"],
        }
    }

    pub fn default_limit(self) -> usize {
        match self {
            FileClass::Markup => 1024,
            _ => 512,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileClass::Script => "script",
            FileClass::WebScript => "web_script",
            FileClass::Stylesheet => "stylesheet",
            FileClass::Markup => "markup",
        }
    }

    pub fn for_extension(ext: &str) -> Option<FileClass> {
        FileClass::all()
            .iter()
            .copied()
            .find(|c| c.extensions().contains(&ext))
    }
}

impl fmt::Display for FileClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ThresholdTable
// ---------------------------------------------------------------------------

/// One row of the effective table, as shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThresholdEntry {
    pub extension: String,
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<FileClass>,
}

/// Read-only mapping from file extension to maximum line count.
///
/// Built once from [`FileClass`] defaults plus any configured overrides and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdTable {
    limits: BTreeMap<String, usize>,
}

impl ThresholdTable {
    /// The built-in table, shared by every caller in the process.
    pub fn builtin() -> &'static ThresholdTable {
        static BUILTIN: OnceLock<ThresholdTable> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let limits = FileClass::all()
                .iter()
                .flat_map(|class| {
                    class
                        .extensions()
                        .iter()
                        .map(move |ext| (ext.to_string(), class.default_limit()))
                })
                .collect();
            ThresholdTable { limits }
        })
    }

    /// Built-in table with `overrides` replacing or adding entries.
    pub fn with_overrides(overrides: &BTreeMap<String, usize>) -> ThresholdTable {
        let mut limits = Self::builtin().limits.clone();
        for (ext, limit) in overrides {
            limits.insert(ext.clone(), *limit);
        }
        ThresholdTable { limits }
    }

    pub fn limit_for_extension(&self, ext: &str) -> Option<usize> {
        self.limits.get(ext).copied()
    }

    /// Resolve the extension and limit that apply to `path`, if any.
    pub fn lookup(&self, path: &Path) -> Option<(String, usize)> {
        let ext = extension_of(path)?;
        let limit = self.limit_for_extension(ext)?;
        Some((ext.to_string(), limit))
    }

    pub fn entries(&self) -> Vec<ThresholdEntry> {
        self.limits
            .iter()
            .map(|(ext, limit)| ThresholdEntry {
                extension: ext.clone(),
                limit: *limit,
                class: FileClass::for_extension(ext),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}

/// Everything after the final `.` in the file name.
///
/// A leading dot counts, so `.sh` yields `sh`. A name without a dot, or
/// ending in one, has no extension.
pub fn extension_of(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_limits() {
        let t = ThresholdTable::builtin();
        for ext in ["py", "el", "sh", "src", "ts", "tsx", "js", "jsx", "css"] {
            assert_eq!(t.limit_for_extension(ext), Some(512), "{ext}");
        }
        assert_eq!(t.limit_for_extension("html"), Some(1024));
        assert_eq!(t.limit_for_extension("htm"), Some(1024));
        assert_eq!(t.limit_for_extension("json"), None);
        assert_eq!(t.len(), 11);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let t = ThresholdTable::builtin();
        assert!(t.lookup(Path::new("a/B.PY")).is_none());
        assert_eq!(t.lookup(Path::new("a/b.py")), Some(("py".to_string(), 512)));
    }

    #[test]
    fn extension_uses_final_dot_of_file_name() {
        assert_eq!(extension_of(Path::new("src/app.test.tsx")), Some("tsx"));
        assert_eq!(extension_of(Path::new("/tmp/.sh")), Some("sh"));
        assert_eq!(extension_of(Path::new("dir.v2/Makefile")), None);
        assert_eq!(extension_of(Path::new("trailing.")), None);
    }

    #[test]
    fn overrides_replace_and_extend() {
        let mut o = BTreeMap::new();
        o.insert("rs".to_string(), 800);
        o.insert("html".to_string(), 2000);
        let t = ThresholdTable::with_overrides(&o);
        assert_eq!(t.limit_for_extension("rs"), Some(800));
        assert_eq!(t.limit_for_extension("html"), Some(2000));
        assert_eq!(t.limit_for_extension("py"), Some(512));
        // builtin stays untouched
        assert_eq!(ThresholdTable::builtin().limit_for_extension("rs"), None);
    }

    #[test]
    fn entries_carry_class() {
        let entries = ThresholdTable::builtin().entries();
        let css = entries.iter().find(|e| e.extension == "css").unwrap();
        assert_eq!(css.class, Some(FileClass::Stylesheet));
        assert_eq!(css.limit, 512);
    }
}
