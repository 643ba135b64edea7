//! Downloads directory resolution and idempotent directory creation.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable overriding the downloads directory.
pub const DOWNLOAD_DIR_ENV: &str = "APPDECK_DOWNLOAD_DIR";

/// Errors that can occur during path resolution and directory operations.
#[derive(Debug, Error)]
pub enum PathError {
    /// Could not determine the user's home directory.
    #[error("Cannot determine home directory")]
    NoHomeDir,

    /// A path was expected to be a directory but was not.
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    /// Failed to create a directory.
    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },
}

/// Resolve the platform downloads directory.
///
/// Resolution order:
/// 1. `APPDECK_DOWNLOAD_DIR` environment variable
/// 2. The platform downloads directory (e.g. `~/Downloads`)
/// 3. `~/Download` as a last resort (mirrors the Android external
///    storage layout the manifest artifacts target)
pub fn downloads_dir() -> Result<PathBuf, PathError> {
    if let Ok(dir) = std::env::var(DOWNLOAD_DIR_ENV) {
        if !dir.is_empty() {
            tracing::debug!(%dir, "using downloads dir from environment override");
            return Ok(PathBuf::from(dir));
        }
    }
    if let Some(dir) = dirs::download_dir() {
        return Ok(dir);
    }
    dirs::home_dir()
        .map(|home| home.join("Download"))
        .ok_or(PathError::NoHomeDir)
}

/// Deterministic artifact path for a package under `dir`.
#[must_use]
pub fn artifact_path(dir: &Path, package_name: &str) -> PathBuf {
    dir.join(format!("{package_name}.apk"))
}

/// Ensure `path` exists and is a directory.
///
/// Idempotent: an already-existing directory is not an error. A path
/// that exists but is not a directory is.
pub fn ensure_directory(path: &Path) -> Result<(), PathError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_path_uses_package_name() {
        let path = artifact_path(Path::new("/tmp/Download"), "com.x.y");
        assert_eq!(path, PathBuf::from("/tmp/Download/com.x.y.apk"));
    }

    #[test]
    fn test_ensure_directory_creates_and_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("nested/Download");

        ensure_directory(&target).unwrap();
        assert!(target.is_dir());

        // Second call with the directory present is not an error
        ensure_directory(&target).unwrap();
    }

    #[test]
    fn test_ensure_directory_rejects_files() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("occupied");
        std::fs::write(&file, b"x").unwrap();

        let err = ensure_directory(&file).unwrap_err();
        assert!(matches!(err, PathError::NotADirectory(_)));
    }
}
