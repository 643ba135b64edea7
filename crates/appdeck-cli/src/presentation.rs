//! Shared CLI presentation utilities.
//!
//! Format-only helpers: tables, separators, notice output and the
//! download progress bar. Domain transforms stay in `appdeck-store`.

use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};

use appdeck_core::{AppDescriptor, CatalogState, Notice, NoticeEmitter, NoticeLevel};
use appdeck_store::ProgressFn;

/// Notice emitter that prints to the terminal.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotices;

impl NoticeEmitter for ConsoleNotices {
    fn emit(&self, notice: Notice) {
        let prefix = match notice.level {
            NoticeLevel::Info => "•",
            NoticeLevel::Success => "✓",
            NoticeLevel::Warning => "!",
            NoticeLevel::Error => "✗",
        };
        match &notice.detail {
            Some(detail) => println!("{prefix} {}: {detail}", notice.title),
            None => println!("{prefix} {}", notice.title),
        }
    }

    fn clone_box(&self) -> Box<dyn NoticeEmitter> {
        Box::new(Self)
    }
}

/// Print a separator line of the given width.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Truncate a string to `max_len`, ellipsizing when needed.
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{truncated}...")
}

/// Print the catalog as a table, marking installed apps.
pub fn print_catalog(state: &CatalogState) {
    println!(
        "{:<3} {:<20} {:<10} {:<28} {:<10} Description",
        "#", "Name", "Version", "Package", "Installed"
    );
    print_separator(100);

    for (index, app) in state.apps.iter().enumerate() {
        println!(
            "{:<3} {:<20} {:<10} {:<28} {:<10} {}",
            index,
            truncate_string(&app.name, 19),
            truncate_string(&app.version, 9),
            truncate_string(&app.package_name, 27),
            if state.installed.is_installed(&app.package_name) {
                "yes"
            } else {
                "no"
            },
            truncate_string(&app.description, 30),
        );
    }
}

/// One-line label for an app in the interactive grid.
#[must_use]
pub fn grid_label(app: &AppDescriptor, installed: bool, width: usize) -> String {
    let marker = if installed { "✓" } else { " " };
    format!("{marker} {}", truncate_string(&app.name, width.saturating_sub(2)))
}

/// Progress callback driving an indicatif bar.
///
/// The bar length is set lazily from the first report that carries a
/// server-provided total; downloads without one show a plain spinner
/// count.
#[must_use]
pub fn download_progress() -> Arc<ProgressFn> {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{bar:30} {bytes}/{total_bytes} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    Arc::new(move |done: u64, total: Option<u64>| {
        if let Some(total) = total {
            if bar.length() != Some(total) {
                bar.set_length(total);
            }
        }
        bar.set_position(done);
        if Some(done) == total {
            bar.finish_and_clear();
        }
    })
}
