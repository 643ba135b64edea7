//! Catalog view-model.
//!
//! Owns the single [`CatalogState`] the UI renders from and exposes the
//! operations behind it: refresh (fetch plus auto-probe), an explicit
//! probe, install, and focus movement. All mutation happens through
//! this type; callers read via [`CatalogViewModel::snapshot`].

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;
use url::Url;

use appdeck_core::{
    ArtifactStorePort, CatalogState, FocusDirection, InstallCheckerPort, Notice, NoticeEmitter,
    OpenerPort, ITEM_WIDTH,
};

use crate::fetch::{FallbackManifest, ManifestFetcher};
use crate::http::{ArtifactDownloader, ManifestTransport, ProgressFn};
use crate::install::{InstallDeps, InstallOrchestrator, InstallOutcome};
use crate::probe::InstalledStateProber;

/// Catalog state shared between the view-model and deferred tasks.
pub type SharedCatalogState = Arc<Mutex<CatalogState>>;

/// Everything the view-model needs from the outside world.
pub struct CatalogDeps {
    /// Manifest transport.
    pub transport: Arc<dyn ManifestTransport>,
    /// Artifact transport.
    pub downloader: Arc<dyn ArtifactDownloader>,
    /// Installed-state capability.
    pub checker: Arc<dyn InstallCheckerPort>,
    /// Downloads-directory store.
    pub store: Arc<dyn ArtifactStorePort>,
    /// System opener capability.
    pub opener: Arc<dyn OpenerPort>,
    /// User-facing status sink.
    pub notices: Arc<dyn NoticeEmitter>,
    /// Remote manifest location.
    pub primary_url: Url,
    /// Local manifest used when the remote fails.
    pub fallback: FallbackManifest,
    /// Whether the host can install packages natively.
    pub native: bool,
    /// Optional download progress callback.
    pub progress: Option<Arc<ProgressFn>>,
}

/// View-model for the app catalog screen.
pub struct CatalogViewModel {
    state: SharedCatalogState,
    fetcher: ManifestFetcher,
    prober: InstalledStateProber,
    orchestrator: InstallOrchestrator,
    notices: Arc<dyn NoticeEmitter>,
    refresh_seq: AtomicU64,
    probe_queued: AtomicBool,
    shutdown: CancellationToken,
}

impl CatalogViewModel {
    /// Wire up a view-model from its collaborators.
    pub fn new(deps: CatalogDeps) -> Self {
        let state: SharedCatalogState = Arc::new(Mutex::new(CatalogState::new()));
        let shutdown = CancellationToken::new();
        let prober = InstalledStateProber::new(deps.checker, deps.notices.clone());

        let orchestrator = InstallOrchestrator::new(InstallDeps {
            downloader: deps.downloader,
            store: deps.store,
            opener: deps.opener,
            prober: prober.clone(),
            notices: deps.notices.clone(),
            state: state.clone(),
            native: deps.native,
            progress: deps.progress,
            cancel: shutdown.child_token(),
        });

        let fetcher = ManifestFetcher::new(
            deps.transport,
            deps.primary_url,
            deps.fallback,
            deps.notices.clone(),
        );

        Self {
            state,
            fetcher,
            prober,
            orchestrator,
            notices: deps.notices,
            refresh_seq: AtomicU64::new(0),
            probe_queued: AtomicBool::new(false),
            shutdown,
        }
    }

    /// Re-fetch the catalog and replace the app list wholesale.
    ///
    /// On success the new list goes in atomically (focus reset, stale
    /// installed entries pruned) and a probe for the new identifiers is
    /// kicked off. On failure the previous list is kept untouched and
    /// the error is surfaced in state and as a notice. If another
    /// refresh started while this one was in flight, this one's result
    /// is dropped.
    pub async fn refresh(&self) {
        let seq = self.refresh_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let result = self.fetcher.fetch().await;
        if self.refresh_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "refresh superseded, dropping result");
            return;
        }

        match result {
            Ok(apps) => {
                let ids = {
                    let mut st = self.state.lock().unwrap();
                    st.replace_apps(apps);
                    st.package_ids()
                };
                if !ids.is_empty() {
                    self.probe().await;
                }
            }
            Err(err) => {
                self.state.lock().unwrap().last_error = Some(err.user_message());
                self.notices
                    .emit(Notice::error("Could not load apps", err.user_message()));
            }
        }
    }

    /// Probe installed state for every app currently in the catalog.
    ///
    /// Guarded by the probing flag: a call while a probe is running is
    /// not executed concurrently, but queues at most one follow-up pass
    /// so a refresh landing mid-probe still gets its identifiers
    /// checked. An empty catalog is a no-op.
    pub async fn probe(&self) {
        loop {
            let ids = {
                let mut st = self.state.lock().unwrap();
                if st.apps.is_empty() {
                    return;
                }
                if st.probing {
                    self.probe_queued.store(true, Ordering::SeqCst);
                    return;
                }
                st.probing = true;
                st.package_ids()
            };

            let outcome = self.prober.probe(&ids).await;

            {
                let mut st = self.state.lock().unwrap();
                st.installed.replace(outcome.installed);
                st.probing = false;
            }

            if !self.probe_queued.swap(false, Ordering::SeqCst) {
                return;
            }
        }
    }

    /// Install the app at `index`, returning the outcome.
    ///
    /// Out-of-range indices return `None`. The app's identifier sits in
    /// the installing set for the duration, letting the UI disable its
    /// action.
    pub async fn install(&self, index: usize) -> Option<InstallOutcome> {
        let app = {
            let st = self.state.lock().unwrap();
            st.apps.get(index).cloned()
        }?;

        self.state
            .lock()
            .unwrap()
            .installing
            .insert(app.package_name.clone());

        let outcome = self.orchestrator.install(&app).await;

        // A rejected duplicate never owned the marker; the invocation
        // that acquired the in-flight slot clears it when it ends.
        if !matches!(outcome, InstallOutcome::Rejected(_)) {
            self.state
                .lock()
                .unwrap()
                .installing
                .remove(&app.package_name);
        }

        Some(outcome)
    }

    /// Move focus one step in `direction` for a viewport of the given
    /// width, deriving the column count from the fixed item width.
    pub fn move_focus(&self, direction: FocusDirection, viewport_width: u16) {
        let columns = usize::from(viewport_width / ITEM_WIDTH);
        self.state.lock().unwrap().move_focus(direction, columns);
    }

    /// A point-in-time copy of the catalog state.
    #[must_use]
    pub fn snapshot(&self) -> CatalogState {
        self.state.lock().unwrap().clone()
    }

    /// Cancel deferred work (pending install rechecks).
    ///
    /// Idempotent; also runs on drop.
    pub fn teardown(&self) {
        self.shutdown.cancel();
    }
}

impl Drop for CatalogViewModel {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
