//! Backups of original mesh files before destructive writes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::util::{Error, Result};

/// Default suffix inserted before the file extension.
pub const DEFAULT_SUFFIX: &str = "_origin";

/// How to treat a backup left over from an earlier session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExistingBackup {
    /// Leave it in place; it already holds the original.
    #[default]
    Keep,
    /// Replace it with the current file.
    Overwrite,
    /// Refuse to back up, blocking the write.
    Fail,
}

/// Backup path for `path`: the suffix goes before `extension` when the file
/// name ends with it, otherwise before the last extension. With
/// `.mesh.json`, `Body.001.mesh.json` becomes `Body.001_origin.mesh.json`.
pub fn backup_path(path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let backup_name = match file_name.strip_suffix(extension).filter(|_| !extension.is_empty()) {
        Some(stem) => format!("{stem}{suffix}{extension}"),
        None => match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => format!("{stem}{suffix}.{ext}"),
            _ => format!("{file_name}{suffix}"),
        },
    };
    path.with_file_name(backup_name)
}

/// Copy `path` to `target`.
///
/// Returns `Ok(false)` when `target` already exists and `existing` is
/// [`ExistingBackup::Fail`].
pub fn backup_file(path: &Path, target: &Path, existing: ExistingBackup) -> Result<bool> {
    if !path.is_file() {
        return Err(Error::BackupFailed {
            path: path.to_path_buf(),
            reason: "source file does not exist".into(),
        });
    }

    if target.exists() {
        match existing {
            ExistingBackup::Keep => {
                tracing::debug!(backup = %target.display(), "keeping existing backup");
                return Ok(true);
            }
            ExistingBackup::Fail => {
                tracing::warn!(backup = %target.display(), "backup already exists");
                return Ok(false);
            }
            ExistingBackup::Overwrite => {}
        }
    }

    fs::copy(path, target).map_err(|e| Error::BackupFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    tracing::info!(backup = %target.display(), "backed up original");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_backup_path() {
        assert_eq!(
            backup_path(Path::new("models/Body.fbx"), "_origin", ".fbx"),
            PathBuf::from("models/Body_origin.fbx")
        );
        assert_eq!(
            backup_path(Path::new("Body.mesh.json"), "_origin", ".mesh.json"),
            PathBuf::from("Body_origin.mesh.json")
        );
        assert_eq!(
            backup_path(Path::new("Body.001.mesh.json"), "_origin", ".mesh.json"),
            PathBuf::from("Body.001_origin.mesh.json")
        );
        assert_eq!(
            backup_path(Path::new("Body.001.fbx"), "_origin", ""),
            PathBuf::from("Body.001_origin.fbx")
        );
        assert_eq!(backup_path(Path::new("Body"), "_bak", ""), PathBuf::from("Body_bak"));
    }

    #[test]
    fn test_backup_file_policies() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("Body.fbx");
        let bak = backup_path(&src, DEFAULT_SUFFIX, ".fbx");
        fs::write(&src, b"v1").unwrap();

        assert!(backup_file(&src, &bak, ExistingBackup::Keep).unwrap());
        assert_eq!(bak, dir.path().join("Body_origin.fbx"));
        assert_eq!(fs::read(&bak).unwrap(), b"v1");

        fs::write(&src, b"v2").unwrap();
        assert!(backup_file(&src, &bak, ExistingBackup::Keep).unwrap());
        assert_eq!(fs::read(&bak).unwrap(), b"v1");

        assert!(!backup_file(&src, &bak, ExistingBackup::Fail).unwrap());

        assert!(backup_file(&src, &bak, ExistingBackup::Overwrite).unwrap());
        assert_eq!(fs::read(&bak).unwrap(), b"v2");
    }

    #[test]
    fn test_missing_source() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("nope.fbx");
        let err = backup_file(&src, &dir.path().join("nope_origin.fbx"), ExistingBackup::Keep).unwrap_err();
        assert!(matches!(err, Error::BackupFailed { .. }));
    }
}
