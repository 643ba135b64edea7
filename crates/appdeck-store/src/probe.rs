//! Installed-state prober.

use std::collections::HashMap;
use std::sync::Arc;

use appdeck_core::{InstallCheckerPort, Notice, NoticeEmitter};

/// Result of one probe pass.
///
/// The key set of `installed` is exactly the set of requested package
/// identifiers. `degraded` is true when the capability collaborator
/// failed and every answer defaulted to false.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    /// Package identifier → installed flag.
    pub installed: HashMap<String, bool>,
    /// Whether the answers are a degraded default rather than a real probe.
    pub degraded: bool,
}

/// Asks the host which of the listed packages are installed.
///
/// Never returns an error: capability failures (plugin absent,
/// permission denied, not implemented) become an all-false map plus a
/// user-visible warning, not an exception.
#[derive(Clone)]
pub struct InstalledStateProber {
    checker: Arc<dyn InstallCheckerPort>,
    notices: Arc<dyn NoticeEmitter>,
}

impl InstalledStateProber {
    /// Create a prober over the given capability collaborator.
    pub fn new(checker: Arc<dyn InstallCheckerPort>, notices: Arc<dyn NoticeEmitter>) -> Self {
        Self { checker, notices }
    }

    /// Probe the given package identifiers.
    ///
    /// Idempotent: the same input against unchanged host state gives
    /// the same answer. Duplicate identifiers are harmless.
    pub async fn probe(&self, package_ids: &[String]) -> ProbeOutcome {
        match self.checker.check_many(package_ids).await {
            Ok(result) => {
                // Key set must match the request exactly, whatever the
                // collaborator returned.
                let installed: HashMap<String, bool> = package_ids
                    .iter()
                    .map(|id| (id.clone(), result.get(id).copied().unwrap_or(false)))
                    .collect();

                let count = installed.values().filter(|v| **v).count();
                tracing::debug!(requested = installed.len(), installed = count, "probe complete");
                if count > 0 {
                    self.notices.emit(Notice::success(
                        "Apps checked",
                        format!("{count} app(s) already installed"),
                    ));
                }
                ProbeOutcome {
                    installed,
                    degraded: false,
                }
            }
            Err(err) => {
                tracing::warn!(%err, "installed-state probe failed, defaulting to not installed");
                self.notices.emit(Notice::warning(
                    "Could not check installed apps",
                    "Install state is unknown on this device",
                ));
                ProbeOutcome {
                    installed: package_ids
                        .iter()
                        .map(|id| (id.clone(), false))
                        .collect(),
                    degraded: true,
                }
            }
        }
    }
}
