//! Aggregate runtime state for the catalog view.

use std::collections::{HashMap, HashSet};

use super::AppDescriptor;

/// Presentation cells occupied by one catalog card.
///
/// The view-model derives the row width for 2-D keyboard navigation from
/// the available viewport width divided by this constant.
pub const ITEM_WIDTH: u16 = 32;

/// Direction for keyboard focus movement over the catalog grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    /// Previous item.
    Left,
    /// Next item.
    Right,
    /// Up one row (retreat by the row width).
    Up,
    /// Down one row (advance by the row width).
    Down,
}

/// Package identifier → "is installed" mapping.
///
/// Keys exist only for identifiers that were part of the most recent
/// probe; lookups for unknown keys default to "not installed", which is
/// how stale entries for removed apps are implicitly dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledState {
    entries: HashMap<String, bool>,
}

impl InstalledState {
    /// Replace the whole map with the result of a probe.
    pub fn replace(&mut self, entries: HashMap<String, bool>) {
        self.entries = entries;
    }

    /// Whether the given package is known to be installed.
    ///
    /// Unknown packages are reported as not installed.
    #[must_use]
    pub fn is_installed(&self, package_name: &str) -> bool {
        self.entries.get(package_name).copied().unwrap_or(false)
    }

    /// Number of packages currently reported as installed.
    #[must_use]
    pub fn installed_count(&self) -> usize {
        self.entries.values().filter(|v| **v).count()
    }

    /// Package identifiers present in the most recent probe result.
    pub fn package_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no probe result is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Aggregate runtime state: app list, installed-state map, probe flag,
/// focused index and the last surfaced error.
///
/// Created empty at startup, populated by fetch, mutated by probe and
/// install flows, torn down when the view unmounts. Not persisted.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    /// Ordered apps, order taken from the manifest.
    pub apps: Vec<AppDescriptor>,
    /// Most recent probe result.
    pub installed: InstalledState,
    /// Guard flag preventing re-entrant probes.
    pub probing: bool,
    /// Focused index; valid whenever `apps` is non-empty.
    pub focused: usize,
    /// Packages with an install currently in flight.
    pub installing: HashSet<String>,
    /// Last error surfaced to the user, if any.
    pub last_error: Option<String>,
}

impl CatalogState {
    /// Create empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replace the app list with a fresh manifest result.
    ///
    /// This is a replace-all, never a merge: focus resets to 0 and the
    /// last error is cleared. The installed-state map is left alone; it
    /// is refreshed by the next probe and unknown keys read as false.
    pub fn replace_apps(&mut self, apps: Vec<AppDescriptor>) {
        self.apps = apps;
        self.focused = 0;
        self.last_error = None;
    }

    /// Package identifiers of the current app list, in manifest order.
    #[must_use]
    pub fn package_ids(&self) -> Vec<String> {
        self.apps.iter().map(|a| a.package_name.clone()).collect()
    }

    /// The currently focused app, if the list is non-empty.
    #[must_use]
    pub fn focused_app(&self) -> Option<&AppDescriptor> {
        self.apps.get(self.focused)
    }

    /// Move focus one step in `direction` over a grid `columns` wide.
    ///
    /// The result is always clamped to `[0, len - 1]`. With an empty
    /// list no focus is defined and this is a no-op.
    pub fn move_focus(&mut self, direction: FocusDirection, columns: usize) {
        if self.apps.is_empty() {
            return;
        }
        let last = self.apps.len() - 1;
        let row = columns.max(1);
        self.focused = match direction {
            FocusDirection::Right => (self.focused + 1).min(last),
            FocusDirection::Left => self.focused.saturating_sub(1),
            FocusDirection::Down => (self.focused + row).min(last),
            FocusDirection::Up => self.focused.saturating_sub(row),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(id: &str, package: &str) -> AppDescriptor {
        AppDescriptor {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: String::new(),
            version: "1.0".to_string(),
            icon: String::new(),
            package_name: package.to_string(),
            apk_url: format!("https://h/{id}.apk"),
        }
    }

    fn populated(n: usize) -> CatalogState {
        let mut state = CatalogState::new();
        state.replace_apps(
            (0..n)
                .map(|i| app(&format!("a{i}"), &format!("com.x.a{i}")))
                .collect(),
        );
        state
    }

    #[test]
    fn test_installed_state_defaults_to_false() {
        let state = InstalledState::default();
        assert!(!state.is_installed("com.unknown"));
    }

    #[test]
    fn test_installed_state_replace_is_wholesale() {
        let mut state = InstalledState::default();
        state.replace(HashMap::from([("com.a".to_string(), true)]));
        assert!(state.is_installed("com.a"));

        state.replace(HashMap::from([("com.b".to_string(), false)]));
        // Entry for com.a was dropped, not merged
        assert!(!state.is_installed("com.a"));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_replace_apps_resets_focus_and_error() {
        let mut state = populated(3);
        state.focused = 2;
        state.last_error = Some("boom".to_string());

        state.replace_apps(vec![app("b0", "com.y.b0")]);
        assert_eq!(state.focused, 0);
        assert!(state.last_error.is_none());
        assert_eq!(state.apps.len(), 1);
    }

    #[test]
    fn test_move_focus_right_clamps_at_end() {
        let mut state = populated(3);
        state.focused = 2;
        state.move_focus(FocusDirection::Right, 4);
        assert_eq!(state.focused, 2);
    }

    #[test]
    fn test_move_focus_left_clamps_at_start() {
        let mut state = populated(3);
        state.move_focus(FocusDirection::Left, 4);
        assert_eq!(state.focused, 0);
    }

    #[test]
    fn test_move_focus_down_advances_by_row_width() {
        let mut state = populated(10);
        state.move_focus(FocusDirection::Down, 4);
        assert_eq!(state.focused, 4);
        state.move_focus(FocusDirection::Down, 4);
        assert_eq!(state.focused, 8);
        // Next row would overshoot; clamp to the last index
        state.move_focus(FocusDirection::Down, 4);
        assert_eq!(state.focused, 9);
    }

    #[test]
    fn test_move_focus_up_saturates_at_zero() {
        let mut state = populated(10);
        state.focused = 3;
        state.move_focus(FocusDirection::Up, 4);
        assert_eq!(state.focused, 0);
    }

    #[test]
    fn test_move_focus_on_empty_list_is_noop() {
        let mut state = CatalogState::new();
        state.move_focus(FocusDirection::Right, 4);
        assert_eq!(state.focused, 0);
        assert!(state.focused_app().is_none());
    }

    #[test]
    fn test_zero_columns_treated_as_one() {
        let mut state = populated(5);
        state.move_focus(FocusDirection::Down, 0);
        assert_eq!(state.focused, 1);
    }
}
