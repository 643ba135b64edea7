//! Catalog domain types.
//!
//! These types represent the app catalog in memory, independent of any
//! infrastructure concerns (HTTP, filesystem, host OS).

mod app;
mod state;

pub use app::{AppDescriptor, Manifest};
pub use state::{CatalogState, FocusDirection, InstalledState, ITEM_WIDTH};
