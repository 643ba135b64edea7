//! Interactive catalog browser.
//!
//! A small alternate-screen grid driven by the catalog view-model:
//! arrow keys move focus, Enter installs the focused app, `r`
//! refreshes. Quitting takes two presses of `q`/Esc within a short
//! window, so a stray keypress does not drop the user out.

use std::io::Write as _;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use crossterm::{cursor, execute, terminal};
use futures_util::StreamExt;

use appdeck_core::{FocusDirection, ITEM_WIDTH};

use crate::bootstrap::CliContext;
use crate::presentation::grid_label;

/// Window within which a second quit press exits.
pub const EXIT_WINDOW: Duration = Duration::from_secs(2);

/// Tracks the double-press exit gesture.
#[derive(Debug, Default)]
struct ExitGuard {
    last_press: Option<Instant>,
}

impl ExitGuard {
    /// Register a quit press; true means actually exit.
    fn request_exit(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_press {
            if now.duration_since(last) <= EXIT_WINDOW {
                return true;
            }
        }
        self.last_press = Some(now);
        false
    }
}

/// Restores the terminal when the browser loop ends, however it ends.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            std::io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            std::io::stdout(),
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Run the interactive browser until the user exits.
pub async fn run(ctx: &CliContext) -> Result<()> {
    ctx.catalog.refresh().await;

    let _guard = TerminalGuard::enter()?;
    let mut events = EventStream::new();
    let mut exit_guard = ExitGuard::default();
    let mut status_line = String::from("arrows: move | enter: install | r: refresh | q: quit");

    loop {
        let width = terminal::size().map_or(80, |(w, _)| w);
        draw(ctx, width, &status_line)?;

        let Some(event) = events.next().await else {
            break;
        };
        let Event::Key(key) = event? else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Left => ctx.catalog.move_focus(FocusDirection::Left, width),
            KeyCode::Right => ctx.catalog.move_focus(FocusDirection::Right, width),
            KeyCode::Up => ctx.catalog.move_focus(FocusDirection::Up, width),
            KeyCode::Down => ctx.catalog.move_focus(FocusDirection::Down, width),
            KeyCode::Char('r') => {
                ctx.catalog.refresh().await;
                status_line = summarize(ctx);
            }
            KeyCode::Enter => {
                let focused = ctx.catalog.snapshot().focused;
                status_line = "Installing...".to_string();
                draw(ctx, width, &status_line)?;
                if ctx.catalog.install(focused).await.is_some() {
                    status_line = summarize(ctx);
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                if exit_guard.request_exit(Instant::now()) {
                    break;
                }
                status_line = "Press again to exit".to_string();
            }
            _ => {}
        }
    }

    ctx.catalog.teardown();
    Ok(())
}

fn summarize(ctx: &CliContext) -> String {
    let state = ctx.catalog.snapshot();
    match &state.last_error {
        Some(error) => format!("Error: {error}"),
        None => format!(
            "{} app(s), {} installed",
            state.apps.len(),
            state.installed.installed_count()
        ),
    }
}

fn draw(ctx: &CliContext, width: u16, status_line: &str) -> Result<()> {
    let state = ctx.catalog.snapshot();
    let columns = usize::from((width / ITEM_WIDTH).max(1));
    let cell = usize::from(ITEM_WIDTH);

    let mut out = std::io::stdout();
    execute!(
        out,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::All)
    )?;

    write!(out, "appdeck\r\n\r\n")?;
    if state.apps.is_empty() {
        write!(out, "The catalog is empty.\r\n")?;
    }

    for (row_index, row) in state.apps.chunks(columns).enumerate() {
        for (col_index, app) in row.iter().enumerate() {
            let index = row_index * columns + col_index;
            let installed = state.installed.is_installed(&app.package_name);
            let label = grid_label(app, installed, cell.saturating_sub(4));
            if index == state.focused {
                write!(out, "[{label:<width$}]", width = cell.saturating_sub(2))?;
            } else {
                write!(out, " {label:<width$} ", width = cell.saturating_sub(2))?;
            }
        }
        write!(out, "\r\n")?;
    }

    write!(out, "\r\n{status_line}\r\n")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_guard_needs_two_presses() {
        let mut guard = ExitGuard::default();
        let start = Instant::now();
        assert!(!guard.request_exit(start));
        assert!(guard.request_exit(start + Duration::from_millis(500)));
    }

    #[test]
    fn test_exit_guard_window_expires() {
        let mut guard = ExitGuard::default();
        let start = Instant::now();
        assert!(!guard.request_exit(start));
        // Too late: this press re-arms instead of exiting
        assert!(!guard.request_exit(start + Duration::from_secs(3)));
        assert!(guard.request_exit(start + Duration::from_secs(4)));
    }
}
