use std::path::{Path, PathBuf};

/// Resolve the project root whose `.claude/linegate.yaml` applies.
///
/// Priority:
/// 1. `--root` flag / `LINEGATE_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `start` looking for `.claude/`
/// 3. Walk upward from `start` looking for `.git/`
/// 4. Fall back to `start`
///
/// `start` defaults to the process cwd; the `check` command passes the
/// hook input's `cwd` instead.
pub fn resolve_root(explicit: Option<&Path>, start: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let start = match start {
        Some(s) => s.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    find_upward(&start, ".claude")
        .or_else(|| find_upward(&start, ".git"))
        .unwrap_or(start)
}

fn find_upward(start: &Path, marker: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_dir())
        .map(Path::to_path_buf)
}
