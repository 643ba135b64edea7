//! Installed-app query port.

use std::collections::HashMap;

use async_trait::async_trait;

use super::CapabilityError;

/// Port for querying the host OS package registry.
///
/// The full implementation asks the OS which packages are installed;
/// the stub (browser-like hosts) deterministically answers "no" for
/// everything and never errors.
#[async_trait]
pub trait InstallCheckerPort: Send + Sync {
    /// Whether a single package is installed.
    async fn is_installed(&self, package_name: &str) -> Result<bool, CapabilityError>;

    /// Check several packages at once.
    ///
    /// The result contains exactly one entry per requested identifier.
    /// Duplicates in the request are harmless.
    async fn check_many(
        &self,
        package_names: &[String],
    ) -> Result<HashMap<String, bool>, CapabilityError>;

    /// List every installed package identifier. Can be heavy.
    async fn list_installed(&self) -> Result<Vec<String>, CapabilityError>;
}

/// Deterministic stub for hosts without a package registry.
///
/// Always reports "not installed" and an empty package list, never an
/// error — degradation is signalled by the prober, not by this type.
#[derive(Debug, Clone, Default)]
pub struct StubInstallChecker;

impl StubInstallChecker {
    /// Create a new stub checker.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InstallCheckerPort for StubInstallChecker {
    async fn is_installed(&self, package_name: &str) -> Result<bool, CapabilityError> {
        tracing::debug!(package_name, "stub checker: reporting not installed");
        Ok(false)
    }

    async fn check_many(
        &self,
        package_names: &[String],
    ) -> Result<HashMap<String, bool>, CapabilityError> {
        Ok(package_names
            .iter()
            .map(|name| (name.clone(), false))
            .collect())
    }

    async fn list_installed(&self) -> Result<Vec<String>, CapabilityError> {
        Ok(Vec::new())
    }
}
