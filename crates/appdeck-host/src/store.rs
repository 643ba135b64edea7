//! Downloads-directory artifact store.

use std::path::PathBuf;

use async_trait::async_trait;

use appdeck_core::{artifact_path, ensure_directory, ArtifactStorePort, CatalogError};

/// Writes artifacts under a fixed downloads directory.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    dir: PathBuf,
}

impl FsArtifactStore {
    /// Store rooted at `dir`. The directory is created lazily on the
    /// first write.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The downloads directory this store writes into.
    #[must_use]
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

#[async_trait]
impl ArtifactStorePort for FsArtifactStore {
    async fn write_artifact(
        &self,
        package_name: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, CatalogError> {
        ensure_directory(&self.dir).map_err(|e| CatalogError::other(e.to_string()))?;

        let path = artifact_path(&self.dir, package_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| CatalogError::from_io_error(&e))?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "artifact written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_directory_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(tmp.path().join("Download"));

        let path = store.write_artifact("com.x.y", b"apk-bytes").await.unwrap();
        assert_eq!(path, tmp.path().join("Download/com.x.y.apk"));
        assert_eq!(std::fs::read(&path).unwrap(), b"apk-bytes");
    }

    #[tokio::test]
    async fn test_rewrite_overwrites_previous_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(tmp.path().to_path_buf());

        store.write_artifact("com.x.y", b"v1").await.unwrap();
        let path = store.write_artifact("com.x.y", b"version-2").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"version-2");
    }

    #[tokio::test]
    async fn test_blocked_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocked = tmp.path().join("Download");
        std::fs::write(&blocked, b"a file, not a directory").unwrap();

        let store = FsArtifactStore::new(blocked);
        let err = store.write_artifact("com.x.y", b"apk").await.unwrap_err();
        assert!(matches!(err, CatalogError::Other { .. }));
    }
}
