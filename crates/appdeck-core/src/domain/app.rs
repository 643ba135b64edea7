//! App descriptor and manifest wire types.

use serde::{Deserialize, Serialize};

/// One installable application, as listed by the manifest.
///
/// Descriptors are immutable once loaded; a refresh replaces the whole
/// list rather than patching individual entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDescriptor {
    /// Stable identifier within the manifest.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description shown under the name.
    #[serde(default)]
    pub description: String,
    /// Semantic version string (e.g. "1.4.2").
    #[serde(default)]
    pub version: String,
    /// Icon URI. May be unreachable; presentation falls back to a placeholder.
    #[serde(default)]
    pub icon: String,
    /// Host package identifier (reverse-domain style, e.g. "com.example.app").
    pub package_name: String,
    /// URI of the installable artifact.
    pub apk_url: String,
}

/// The manifest document: `{ "apps": [...] }`.
///
/// A manifest without an `apps` field deserializes to an empty list —
/// "reachable but empty" is not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Ordered list of installable apps. Order is presentation-relevant.
    #[serde(default)]
    pub apps: Vec<AppDescriptor>,
}

impl AppDescriptor {
    /// Deterministic artifact filename for this app.
    #[must_use]
    pub fn artifact_filename(&self) -> String {
        format!("{}.apk", self.package_name)
    }
}
