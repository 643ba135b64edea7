//! Install orchestrator.
//!
//! One invocation walks the phases
//! `Idle → Downloading → WritingArtifact → Launching → AwaitingRecheck → Idle`,
//! with any phase able to drop to `Failed` (terminal for that
//! invocation only). Installation itself is always the host OS's job:
//! on a capable host the orchestrator downloads the artifact, writes it
//! under the downloads directory and hands the path to the system
//! installer; on an incapable host its sole action is opening the
//! artifact URL externally.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use url::Url;

use appdeck_core::{
    AppDescriptor, ArtifactStorePort, CatalogError, CatalogResult, Notice, NoticeEmitter,
    OpenerPort, APK_CONTENT_TYPE,
};

use crate::catalog::SharedCatalogState;
use crate::http::{ArtifactDownloader, ProgressFn};
use crate::probe::InstalledStateProber;

/// Delay before the post-install re-probe.
///
/// The OS installation UI runs asynchronously and outside this system's
/// control, so the orchestrator polls once, optimistically, after a
/// fixed delay rather than blocking on a completion signal.
pub const RECHECK_DELAY: Duration = Duration::from_secs(5);

/// Phases of one install invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPhase {
    /// No install running.
    Idle,
    /// Fetching the artifact.
    Downloading,
    /// Persisting the artifact to the downloads directory.
    WritingArtifact,
    /// Handing the artifact to the host installer.
    Launching,
    /// Handed off; deferred re-probe scheduled.
    AwaitingRecheck,
    /// The invocation failed.
    Failed,
}

/// Terminal result of one install invocation.
#[derive(Debug)]
pub enum InstallOutcome {
    /// Artifact written and handed to the host installer.
    InstallerLaunched {
        /// Where the artifact was written.
        artifact: PathBuf,
    },
    /// Incapable host: the artifact URL was opened externally.
    OpenedExternally,
    /// Rejected before starting (an install for this package is in flight).
    Rejected(CatalogError),
    /// Started but failed; reported to the user, never thrown.
    Failed(CatalogError),
}

/// Dependencies for the install orchestrator.
pub struct InstallDeps {
    /// Artifact transport.
    pub downloader: Arc<dyn ArtifactDownloader>,
    /// Downloads-directory store.
    pub store: Arc<dyn ArtifactStorePort>,
    /// System opener capability.
    pub opener: Arc<dyn OpenerPort>,
    /// Prober for the deferred recheck.
    pub prober: InstalledStateProber,
    /// User-facing status sink.
    pub notices: Arc<dyn NoticeEmitter>,
    /// Catalog state mutated by the deferred recheck.
    pub state: SharedCatalogState,
    /// Whether the host has native install capabilities.
    pub native: bool,
    /// Optional download progress callback.
    pub progress: Option<Arc<ProgressFn>>,
    /// Cancellation for pending rechecks; cancelled on teardown.
    pub cancel: CancellationToken,
}

/// Orchestrates a single app's download-and-install handoff.
pub struct InstallOrchestrator {
    downloader: Arc<dyn ArtifactDownloader>,
    store: Arc<dyn ArtifactStorePort>,
    opener: Arc<dyn OpenerPort>,
    prober: InstalledStateProber,
    notices: Arc<dyn NoticeEmitter>,
    state: SharedCatalogState,
    native: bool,
    progress: Option<Arc<ProgressFn>>,
    in_flight: Arc<Mutex<HashSet<String>>>,
    cancel: CancellationToken,
}

/// Removes the package from the in-flight set when the invocation ends.
struct InFlightGuard {
    set: Arc<Mutex<HashSet<String>>>,
    package: String,
}

impl InFlightGuard {
    fn try_acquire(set: &Arc<Mutex<HashSet<String>>>, package: &str) -> Option<Self> {
        let mut in_flight = set.lock().unwrap();
        if !in_flight.insert(package.to_string()) {
            return None;
        }
        Some(Self {
            set: set.clone(),
            package: package.to_string(),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set.lock().unwrap().remove(&self.package);
    }
}

fn enter_phase(app: &AppDescriptor, phase: InstallPhase) {
    tracing::debug!(app = %app.package_name, ?phase, "install phase");
}

impl InstallOrchestrator {
    /// Create an orchestrator from its dependencies.
    pub fn new(deps: InstallDeps) -> Self {
        Self {
            downloader: deps.downloader,
            store: deps.store,
            opener: deps.opener,
            prober: deps.prober,
            notices: deps.notices,
            state: deps.state,
            native: deps.native,
            progress: deps.progress,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            cancel: deps.cancel,
        }
    }

    /// Run one install invocation for `app`.
    ///
    /// Best-effort: every failure is converted into a notice and an
    /// `InstallOutcome`, never an escaping error. Concurrent requests
    /// for the same package identifier are rejected while one is in
    /// flight.
    pub async fn install(&self, app: &AppDescriptor) -> InstallOutcome {
        if !self.native {
            return self.open_externally(app).await;
        }

        let Some(_guard) = InFlightGuard::try_acquire(&self.in_flight, &app.package_name) else {
            let err = CatalogError::already_installing(&app.package_name);
            self.notices
                .emit(Notice::warning("Install in progress", err.user_message()));
            return InstallOutcome::Rejected(err);
        };

        match self.run_native(app).await {
            Ok(artifact) => {
                enter_phase(app, InstallPhase::AwaitingRecheck);
                self.schedule_recheck();
                enter_phase(app, InstallPhase::Idle);
                InstallOutcome::InstallerLaunched { artifact }
            }
            Err(err) => {
                enter_phase(app, InstallPhase::Failed);
                self.notices
                    .emit(Notice::error("Install failed", err.user_message()));
                InstallOutcome::Failed(err)
            }
        }
    }

    /// Incapable-host path: open the artifact URL in an external viewer.
    async fn open_externally(&self, app: &AppDescriptor) -> InstallOutcome {
        self.notices.emit(Notice::info(
            "Opening in browser",
            format!("Download {} from your browser", app.name),
        ));
        match self.opener.open_url(&app.apk_url).await {
            Ok(()) => InstallOutcome::OpenedExternally,
            Err(e) => {
                let err = CatalogError::capability(e.to_string());
                self.notices
                    .emit(Notice::error("Could not open link", err.user_message()));
                InstallOutcome::Failed(err)
            }
        }
    }

    async fn run_native(&self, app: &AppDescriptor) -> CatalogResult<PathBuf> {
        enter_phase(app, InstallPhase::Downloading);
        self.notices.emit(Notice::info(
            "Downloading...",
            format!("Starting download of {}", app.name),
        ));

        let url = Url::parse(&app.apk_url).map_err(|e| {
            CatalogError::manifest(format!("bad artifact URL '{}': {e}", app.apk_url))
        })?;
        let bytes = self.downloader.download(&url, self.progress.as_deref()).await?;

        enter_phase(app, InstallPhase::WritingArtifact);
        let artifact = self.store.write_artifact(&app.package_name, &bytes).await?;

        enter_phase(app, InstallPhase::Launching);
        self.notices
            .emit(Notice::success("Download complete", "Opening installer..."));
        self.opener
            .open_file(&artifact, APK_CONTENT_TYPE)
            .await
            .map_err(|e| CatalogError::capability(e.to_string()))?;

        self.notices.emit(Notice::success(
            "Installer opened",
            format!("Complete the installation of {}", app.name),
        ));
        Ok(artifact)
    }

    /// Schedule the deferred re-probe.
    ///
    /// The timer is owned by the orchestrator's cancellation token:
    /// tearing down the view-model before it fires cancels the task, so
    /// nothing mutates catalog state after disposal.
    fn schedule_recheck(&self) {
        let prober = self.prober.clone();
        let state = self.state.clone();
        let cancel = self.cancel.child_token();

        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::debug!("install recheck cancelled by teardown");
                }
                () = tokio::time::sleep(RECHECK_DELAY) => {
                    let ids = { state.lock().unwrap().package_ids() };
                    if ids.is_empty() {
                        return;
                    }
                    let outcome = prober.probe(&ids).await;
                    let mut st = state.lock().unwrap();
                    st.installed.replace(outcome.installed);
                }
            }
        });
    }
}
