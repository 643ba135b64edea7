//! Manifest fetcher: remote-first with a local fallback.

use std::path::PathBuf;
use std::sync::Arc;

use url::Url;

use appdeck_core::{AppDescriptor, CatalogError, CatalogResult, Manifest, Notice, NoticeEmitter};

use crate::http::ManifestTransport;

/// Where the fallback manifest comes from when the remote source fails.
#[derive(Debug, Clone)]
pub enum FallbackManifest {
    /// A JSON file on disk.
    File(PathBuf),
    /// A manifest document bundled into the binary.
    Inline(&'static str),
}

/// Fetches the app catalog from a remote URL, falling back to a local
/// resource when the remote is unreachable.
///
/// Stateless and read-only: every invocation re-fetches, nothing is
/// cached. Fails only if both sources fail.
pub struct ManifestFetcher {
    transport: Arc<dyn ManifestTransport>,
    primary_url: Url,
    fallback: FallbackManifest,
    notices: Arc<dyn NoticeEmitter>,
}

impl ManifestFetcher {
    /// Create a fetcher for the given sources.
    pub fn new(
        transport: Arc<dyn ManifestTransport>,
        primary_url: Url,
        fallback: FallbackManifest,
        notices: Arc<dyn NoticeEmitter>,
    ) -> Self {
        Self {
            transport,
            primary_url,
            fallback,
            notices,
        }
    }

    /// Fetch the catalog.
    ///
    /// Remote first; any remote failure (network error, non-2xx,
    /// unparseable body) triggers the fallback. A manifest without an
    /// `apps` field yields an empty list, not an error.
    pub async fn fetch(&self) -> CatalogResult<Vec<AppDescriptor>> {
        match self.fetch_remote().await {
            Ok(apps) => {
                tracing::debug!(count = apps.len(), "loaded apps from remote manifest");
                Ok(apps)
            }
            Err(remote_err) => {
                tracing::warn!(%remote_err, url = %self.primary_url, "remote manifest failed, trying fallback");
                match self.fetch_fallback().await {
                    Ok(apps) => {
                        self.notices.emit(Notice::info(
                            "Offline mode",
                            "Using the bundled app list",
                        ));
                        Ok(apps)
                    }
                    Err(fallback_err) => {
                        tracing::warn!(%fallback_err, "fallback manifest failed too");
                        Err(CatalogError::other(format!(
                            "app list unavailable: remote failed ({}), fallback failed ({})",
                            remote_err.user_message(),
                            fallback_err.user_message()
                        )))
                    }
                }
            }
        }
    }

    async fn fetch_remote(&self) -> CatalogResult<Vec<AppDescriptor>> {
        let value = self.transport.get_json(&self.primary_url).await?;
        let manifest: Manifest =
            serde_json::from_value(value).map_err(|e| CatalogError::manifest(e.to_string()))?;
        Ok(manifest.apps)
    }

    async fn fetch_fallback(&self) -> CatalogResult<Vec<AppDescriptor>> {
        let manifest: Manifest = match &self.fallback {
            FallbackManifest::File(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|e| CatalogError::from_io_error(&e))?;
                serde_json::from_slice(&bytes).map_err(|e| CatalogError::manifest(e.to_string()))?
            }
            FallbackManifest::Inline(body) => {
                serde_json::from_str(body).map_err(|e| CatalogError::manifest(e.to_string()))?
            }
        };
        Ok(manifest.apps)
    }
}
