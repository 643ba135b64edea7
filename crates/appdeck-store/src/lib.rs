#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod catalog;
pub mod fetch;
pub mod http;
pub mod install;
pub mod probe;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::{CatalogDeps, CatalogViewModel, SharedCatalogState};
pub use fetch::{FallbackManifest, ManifestFetcher};
pub use http::{
    ArtifactDownloader, ManifestTransport, ProgressFn, ReqwestArtifactDownloader,
    ReqwestTransport, ARTIFACT_TIMEOUT, MANIFEST_TIMEOUT,
};
pub use install::{InstallDeps, InstallOrchestrator, InstallOutcome, InstallPhase, RECHECK_DELAY};
pub use probe::{InstalledStateProber, ProbeOutcome};
