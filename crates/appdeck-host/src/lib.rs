#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod checker;
pub mod detect;
pub mod opener;
pub mod store;

pub use checker::PmInstallChecker;
pub use detect::{HostCapabilities, PM_ENV};
pub use opener::SystemOpener;
pub use store::FsArtifactStore;
