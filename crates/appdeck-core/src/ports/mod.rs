//! Capability ports.
//!
//! These traits are the narrow interfaces through which the catalog
//! flow reaches host-OS facilities: the package registry, the downloads
//! directory and the system opener. Adapters live in `appdeck-host`;
//! stubs for incapable hosts live here so every consumer can depend on
//! a working (if inert) implementation.

mod artifact_store;
mod install_checker;
mod opener;

pub use artifact_store::ArtifactStorePort;
pub use install_checker::{InstallCheckerPort, StubInstallChecker};
pub use opener::{OpenerPort, APK_CONTENT_TYPE};

use thiserror::Error;

/// Errors surfaced by host capability adapters.
///
/// Callers are expected to degrade gracefully: probe failures become an
/// all-false result, opener failures become user-visible notices.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// The capability does not exist on this host.
    #[error("capability unavailable: {0}")]
    Unavailable(String),

    /// A host command was found but failed to run or exited non-zero.
    #[error("host command failed: {0}")]
    CommandFailed(String),

    /// The host denied the operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),
}
