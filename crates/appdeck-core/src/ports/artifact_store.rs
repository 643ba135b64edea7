//! Artifact store port.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::errors::CatalogError;

/// Port for persisting a downloaded artifact to the platform downloads
/// location.
///
/// Writing uses a deterministic filename derived from the package
/// identifier (`{package}.apk`). Directory creation is idempotent:
/// "already exists" from a prior run is not an error. Other I/O errors
/// are fatal for that install attempt.
#[async_trait]
pub trait ArtifactStorePort: Send + Sync {
    /// Write `bytes` as the artifact for `package_name`.
    ///
    /// Returns the absolute path of the written file so it can be
    /// handed to the opener capability.
    async fn write_artifact(
        &self,
        package_name: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, CatalogError>;
}
