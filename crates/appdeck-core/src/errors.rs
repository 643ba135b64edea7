//! Catalog error taxonomy.
//!
//! These errors are designed to be serializable and not depend on
//! external error types like `std::io::Error` or HTTP client errors.
//! Adapter crates convert their failures at the component boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for catalog, probe and install operations.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum CatalogError {
    /// Network failure while fetching the manifest or an artifact.
    ///
    /// A non-2xx response is treated identically to a transport error
    /// for fallback purposes.
    #[error("Network error: {message}")]
    Network {
        /// Detailed error message.
        message: String,
        /// HTTP status code if available.
        #[serde(skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
    },

    /// The host lacks a native capability (probe, install, open).
    #[error("Capability unavailable: {message}")]
    CapabilityUnavailable {
        /// What was unavailable and why.
        message: String,
    },

    /// I/O error while writing an artifact.
    #[error("I/O error ({kind}): {message}")]
    Io {
        /// The kind of I/O error (e.g. "PermissionDenied").
        kind: String,
        /// Detailed error message.
        message: String,
    },

    /// The manifest body could not be parsed.
    #[error("Invalid manifest: {message}")]
    Manifest {
        /// Parse error detail.
        message: String,
    },

    /// An install for this package is already in flight.
    #[error("Install already in progress: {package}")]
    AlreadyInstalling {
        /// The package identifier being installed.
        package: String,
    },

    /// General/uncategorized error.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl CatalogError {
    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a network error with HTTP status code.
    pub fn network_with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self::Network {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create a capability-unavailable error.
    pub fn capability(message: impl Into<String>) -> Self {
        Self::CapabilityUnavailable {
            message: message.into(),
        }
    }

    /// Create an I/O error from a `std::io::Error`.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        let kind = err.kind();
        Self::Io {
            kind: format!("{kind:?}"),
            message: err.to_string(),
        }
    }

    /// Create a manifest parse error.
    pub fn manifest(message: impl Into<String>) -> Self {
        Self::Manifest {
            message: message.into(),
        }
    }

    /// Create an already-installing error.
    pub fn already_installing(package: impl Into<String>) -> Self {
        Self::AlreadyInstalling {
            package: package.into(),
        }
    }

    /// Create a generic error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable by retrying or falling back.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Io { .. })
    }

    /// Convert to a user-friendly message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network {
                message,
                status_code: Some(code),
            } => format!("Network error (HTTP {code}): {message}"),
            Self::Network { message, .. } => format!("Network error: {message}"),
            Self::CapabilityUnavailable { message } => {
                format!("This device cannot do that: {message}")
            }
            Self::Io { message, .. } => format!("File operation failed: {message}"),
            Self::Manifest { message } => format!("The app list could not be read: {message}"),
            Self::AlreadyInstalling { package } => {
                format!("An install for '{package}' is already running.")
            }
            Self::Other { message } => message.clone(),
        }
    }
}

/// Convenience result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CatalogError::from_io_error(&io_err);

        match err {
            CatalogError::Io { kind, message } => {
                assert_eq!(kind, "PermissionDenied");
                assert!(message.contains("denied"));
            }
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_serialization() {
        let err = CatalogError::network_with_status("timeout", 503);
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("503"));

        let parsed: CatalogError = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, err);
    }

    #[test]
    fn test_is_recoverable() {
        assert!(CatalogError::network("timeout").is_recoverable());
        assert!(!CatalogError::capability("no probe").is_recoverable());
        assert!(!CatalogError::already_installing("com.x").is_recoverable());
    }

    #[test]
    fn test_user_messages() {
        let err = CatalogError::network_with_status("bad gateway", 502);
        assert!(err.user_message().contains("502"));

        let err = CatalogError::already_installing("com.x.y");
        assert!(err.user_message().contains("com.x.y"));
    }
}
