//! User-facing status notices.
//!
//! Components report progress and failures through an injected
//! `NoticeEmitter` collaborator rather than a global singleton.
//! Implementations handle delivery (console, toast bridge, test
//! capture); emitting must never block.

use chrono::{DateTime, Utc};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational status ("Downloading...").
    Info,
    /// A step completed ("Download complete").
    Success,
    /// Degraded but non-fatal condition ("could not check installed apps").
    Warning,
    /// A user-visible failure.
    Error,
}

/// A single user-facing status message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Short headline.
    pub title: String,
    /// Optional longer detail line.
    pub detail: Option<String>,
    /// When the notice was created.
    pub at: DateTime<Utc>,
}

impl Notice {
    fn new(level: NoticeLevel, title: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            level,
            title: title.into(),
            detail,
            at: Utc::now(),
        }
    }

    /// Create an informational notice.
    pub fn info(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, Some(detail.into()))
    }

    /// Create a success notice.
    pub fn success(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title, Some(detail.into()))
    }

    /// Create a warning notice.
    pub fn warning(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title, Some(detail.into()))
    }

    /// Create an error notice.
    pub fn error(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, Some(detail.into()))
    }

    /// Create a title-only notice.
    pub fn hint(title: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, None)
    }
}

/// Trait for delivering notices to the user.
pub trait NoticeEmitter: Send + Sync {
    /// Deliver a notice. Must not block.
    fn emit(&self, notice: Notice);

    /// Clone this emitter into a boxed trait object.
    fn clone_box(&self) -> Box<dyn NoticeEmitter>;
}

/// A no-op emitter for tests and quiet contexts.
#[derive(Debug, Clone, Default)]
pub struct NoopNotices;

impl NoopNotices {
    /// Create a new no-op emitter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl NoticeEmitter for NoopNotices {
    fn emit(&self, _notice: Notice) {
        // Intentionally do nothing
    }

    fn clone_box(&self) -> Box<dyn NoticeEmitter> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_notice_constructors() {
        let n = Notice::info("Downloading...", "Starting download of Example");
        assert_eq!(n.level, NoticeLevel::Info);
        assert_eq!(n.title, "Downloading...");
        assert!(n.detail.is_some());

        let hint = Notice::hint("Press again to exit");
        assert!(hint.detail.is_none());
    }

    #[test]
    fn test_noop_emitter() {
        let notices: Arc<dyn NoticeEmitter> = Arc::new(NoopNotices::new());
        notices.emit(Notice::error("Error", "detail"));
        let _boxed: Box<dyn NoticeEmitter> = notices.clone_box();
    }
}
