//! CLI bootstrap, the composition root.
//!
//! The only place where adapters are wired together: host capability
//! detection, HTTP transports, the downloads-directory store and the
//! system opener all meet the catalog view-model here. Command handlers
//! receive the composed [`CliContext`] and delegate to it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use url::Url;

use appdeck_core::{downloads_dir, NoticeEmitter, StubInstallChecker};
use appdeck_host::{FsArtifactStore, HostCapabilities, PmInstallChecker, SystemOpener};
use appdeck_store::{
    CatalogDeps, CatalogViewModel, FallbackManifest, ProgressFn, ReqwestArtifactDownloader,
    ReqwestTransport,
};

/// Default remote manifest location.
pub const DEFAULT_MANIFEST_URL: &str =
    "https://raw.githubusercontent.com/pmpp-smcis/apoio/refs/heads/main/apps.json";

/// Manifest document compiled into the binary, used when the remote
/// source is unreachable.
const BUNDLED_MANIFEST: &str = include_str!("../assets/apps-example.json");

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Remote manifest URL.
    pub manifest_url: Url,
    /// Where downloaded artifacts are written.
    pub downloads_dir: PathBuf,
}

impl CliConfig {
    /// Config with default sources, honoring the manifest override.
    pub fn with_defaults(manifest_url: Option<&str>) -> Result<Self> {
        let manifest_url = Url::parse(manifest_url.unwrap_or(DEFAULT_MANIFEST_URL))
            .context("invalid manifest URL")?;
        let downloads_dir = downloads_dir().context("cannot resolve downloads directory")?;
        Ok(Self {
            manifest_url,
            downloads_dir,
        })
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The catalog view-model all commands drive.
    pub catalog: CatalogViewModel,
    /// Detected host capabilities.
    pub capabilities: HostCapabilities,
    /// Where artifacts are written.
    pub downloads_dir: PathBuf,
}

/// Compose the CLI application.
///
/// Detects host capabilities once: with a package manager present the
/// flow gets the real checker and native installs; without one it gets
/// the stub checker and browser-style installs (URLs opened externally).
pub fn bootstrap(
    config: CliConfig,
    notices: Arc<dyn NoticeEmitter>,
    progress: Option<Arc<ProgressFn>>,
) -> CliContext {
    let capabilities = HostCapabilities::detect();

    let checker: Arc<dyn appdeck_core::InstallCheckerPort> = match &capabilities.pm {
        Some(pm) => Arc::new(PmInstallChecker::new(pm.clone())),
        None => Arc::new(StubInstallChecker::new()),
    };

    let catalog = CatalogViewModel::new(CatalogDeps {
        transport: Arc::new(ReqwestTransport::default()),
        downloader: Arc::new(ReqwestArtifactDownloader::default()),
        checker,
        store: Arc::new(FsArtifactStore::new(config.downloads_dir.clone())),
        opener: Arc::new(SystemOpener::new()),
        notices,
        primary_url: config.manifest_url,
        fallback: FallbackManifest::Inline(BUNDLED_MANIFEST),
        native: capabilities.is_native(),
        progress,
    });

    CliContext {
        catalog,
        capabilities,
        downloads_dir: config.downloads_dir,
    }
}
