//! Artifact/URL opener port.

use std::path::Path;

use async_trait::async_trait;

use super::CapabilityError;

/// MIME type hint passed to the host installer for Android packages.
pub const APK_CONTENT_TYPE: &str = "application/vnd.android.package-archive";

/// Port for handing files and URLs to the host OS.
///
/// Installation itself is always deferred to the host: this flow never
/// installs anything without user-visible OS-level confirmation.
#[async_trait]
pub trait OpenerPort: Send + Sync {
    /// Hand a written artifact to the OS installer/viewer.
    ///
    /// `content_type` is a hint; hosts that cannot use one may ignore it.
    async fn open_file(&self, path: &Path, content_type: &str) -> Result<(), CapabilityError>;

    /// Open a URL in an external viewer/browser context.
    async fn open_url(&self, url: &str) -> Result<(), CapabilityError>;
}
