//! Shared fakes for crate-internal tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use appdeck_core::{
    ArtifactStorePort, CapabilityError, CatalogError, InstallCheckerPort, Notice, NoticeEmitter,
    NoticeLevel, OpenerPort,
};

/// Notice emitter that records everything it is given.
#[derive(Default)]
pub struct CapturedNotices {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl CapturedNotices {
    pub fn titles(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.title.clone())
            .collect()
    }

    pub fn with_level(&self, level: NoticeLevel) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.level == level)
            .cloned()
            .collect()
    }
}

impl NoticeEmitter for CapturedNotices {
    fn emit(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }

    fn clone_box(&self) -> Box<dyn NoticeEmitter> {
        Box::new(Self {
            notices: self.notices.clone(),
        })
    }
}

/// In-memory artifact store recording written artifacts.
#[derive(Default)]
pub struct MemoryArtifactStore {
    pub written: Mutex<Vec<(String, usize)>>,
    pub root: PathBuf,
}

impl MemoryArtifactStore {
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            written: Mutex::new(Vec::new()),
            root: root.into(),
        }
    }
}

#[async_trait]
impl ArtifactStorePort for MemoryArtifactStore {
    async fn write_artifact(
        &self,
        package_name: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, CatalogError> {
        self.written
            .lock()
            .unwrap()
            .push((package_name.to_string(), bytes.len()));
        Ok(appdeck_core::artifact_path(&self.root, package_name))
    }
}

/// Opener that records what it was asked to open.
#[derive(Default)]
pub struct RecordingOpener {
    pub files: Mutex<Vec<(PathBuf, String)>>,
    pub urls: Mutex<Vec<String>>,
    pub fail: bool,
}

impl RecordingOpener {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl OpenerPort for RecordingOpener {
    async fn open_file(
        &self,
        path: &std::path::Path,
        content_type: &str,
    ) -> Result<(), CapabilityError> {
        if self.fail {
            return Err(CapabilityError::CommandFailed("opener failed".to_string()));
        }
        self.files
            .lock()
            .unwrap()
            .push((path.to_path_buf(), content_type.to_string()));
        Ok(())
    }

    async fn open_url(&self, url: &str) -> Result<(), CapabilityError> {
        if self.fail {
            return Err(CapabilityError::CommandFailed("opener failed".to_string()));
        }
        self.urls.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Checker answering from a fixed set of installed packages.
#[derive(Default)]
pub struct FixedChecker {
    installed: Mutex<Vec<String>>,
}

impl FixedChecker {
    pub fn with_installed(packages: &[&str]) -> Self {
        Self {
            installed: Mutex::new(packages.iter().map(ToString::to_string).collect()),
        }
    }

    /// Mark a package as installed after construction (simulates the OS
    /// installer finishing).
    pub fn mark_installed(&self, package: &str) {
        self.installed.lock().unwrap().push(package.to_string());
    }
}

#[async_trait]
impl InstallCheckerPort for FixedChecker {
    async fn is_installed(&self, package_name: &str) -> Result<bool, CapabilityError> {
        Ok(self
            .installed
            .lock()
            .unwrap()
            .iter()
            .any(|p| p == package_name))
    }

    async fn check_many(
        &self,
        package_names: &[String],
    ) -> Result<HashMap<String, bool>, CapabilityError> {
        let installed = self.installed.lock().unwrap();
        Ok(package_names
            .iter()
            .map(|name| (name.clone(), installed.contains(name)))
            .collect())
    }

    async fn list_installed(&self) -> Result<Vec<String>, CapabilityError> {
        Ok(self.installed.lock().unwrap().clone())
    }
}
