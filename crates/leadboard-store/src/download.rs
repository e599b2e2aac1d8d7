use crate::error::{Result, StoreError};
use crate::paths;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Writes an export into `dir` under `file_name`, replacing an older file of the same name.
/// `file_name` must be a bare name; the final path is returned canonicalized.
pub fn write_download(dir: &Path, file_name: &str, contents: &[u8]) -> Result<PathBuf> {
    if !is_plain_file_name(file_name) {
        return Err(StoreError::InvalidExportPath(dir.join(file_name)));
    }
    let target = dir.join(file_name);
    paths::ensure_parent_dir(&target)?;
    let target = canonicalize_path(&target)?;
    if target.is_dir() || is_symlink(&target) {
        return Err(StoreError::InvalidExportPath(target));
    }
    fs::write(&target, contents)?;
    Ok(target)
}

fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn canonicalize_path(path: &Path) -> Result<PathBuf> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let parent = fs::canonicalize(parent)?;
    let file_name = path
        .file_name()
        .ok_or_else(|| StoreError::InvalidExportPath(path.to_path_buf()))?;
    Ok(parent.join(file_name))
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false)
}
