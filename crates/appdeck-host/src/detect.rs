//! Host capability detection.

use std::path::PathBuf;

/// Environment variable overriding the package-manager binary.
pub const PM_ENV: &str = "APPDECK_PM";

/// What this host can do for the catalog flow.
///
/// Detected once at startup; the flow treats the answer as fixed for
/// the process lifetime.
#[derive(Debug, Clone)]
pub struct HostCapabilities {
    /// Package-manager binary, when one was found.
    pub pm: Option<PathBuf>,
}

impl HostCapabilities {
    /// Probe the host.
    ///
    /// `APPDECK_PM` wins when set and non-empty; otherwise the `pm`
    /// binary is looked up on `PATH` (present on Android-like hosts).
    #[must_use]
    pub fn detect() -> Self {
        let pm = Self::pm_from_env().or_else(|| which::which("pm").ok());
        match &pm {
            Some(path) => tracing::info!(pm = %path.display(), "package manager found"),
            None => tracing::info!("no package manager on this host, running in browser mode"),
        }
        Self { pm }
    }

    fn pm_from_env() -> Option<PathBuf> {
        let value = std::env::var(PM_ENV).ok()?;
        if value.is_empty() {
            return None;
        }
        Some(PathBuf::from(value))
    }

    /// Whether the host can query the package registry and hand
    /// artifacts to a native installer.
    #[must_use]
    pub const fn is_native(&self) -> bool {
        self.pm.is_some()
    }
}
