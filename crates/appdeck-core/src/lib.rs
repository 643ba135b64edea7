#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod errors;
pub mod notices;
pub mod paths;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    AppDescriptor, CatalogState, FocusDirection, InstalledState, Manifest, ITEM_WIDTH,
};
pub use errors::{CatalogError, CatalogResult};
pub use notices::{Notice, NoticeEmitter, NoticeLevel, NoopNotices};
pub use paths::{artifact_path, downloads_dir, ensure_directory, PathError};
pub use ports::{
    ArtifactStorePort, CapabilityError, InstallCheckerPort, OpenerPort, StubInstallChecker,
    APK_CONTENT_TYPE,
};
