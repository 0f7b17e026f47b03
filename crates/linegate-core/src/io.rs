use crate::error::Result;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `data` through a sibling tempfile and a rename.
///
/// `settings.json` is shared with the harness, so a concurrent reader sees
/// either the old or the new document. An existing file keeps its permission
/// bits; a new one gets the tempfile defaults.
pub fn replace_file(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(data)?;
    staged.as_file().sync_all()?;

    match fs::metadata(path) {
        Ok(meta) => fs::set_permissions(staged.path(), meta.permissions())?,
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Create `path` with `data` unless something already exists there.
///
/// Returns `false` without touching the file when it exists. The existence
/// check and the create are one `O_EXCL` open.
pub fn create_exclusive(path: &Path, data: &[u8]) -> Result<bool> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(e.into()),
    };
    file.write_all(data)?;
    Ok(true)
}
