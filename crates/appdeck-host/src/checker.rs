//! Package registry adapter backed by the host `pm` binary.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;

use appdeck_core::{CapabilityError, InstallCheckerPort};

/// Queries installed packages via `pm list packages`.
///
/// Output lines look like `package:com.example.app`; anything else is
/// ignored. A missing binary or a non-zero exit maps to a capability
/// error, which the prober downstream degrades to "nothing installed".
#[derive(Debug, Clone)]
pub struct PmInstallChecker {
    pm: PathBuf,
}

impl PmInstallChecker {
    /// Create a checker around the given package-manager binary.
    #[must_use]
    pub const fn new(pm: PathBuf) -> Self {
        Self { pm }
    }

    async fn installed_set(&self) -> Result<HashSet<String>, CapabilityError> {
        let output = Command::new(&self.pm)
            .args(["list", "packages"])
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CapabilityError::Unavailable(format!("{} not found", self.pm.display()))
                } else if e.kind() == std::io::ErrorKind::PermissionDenied {
                    CapabilityError::PermissionDenied(e.to_string())
                } else {
                    CapabilityError::CommandFailed(e.to_string())
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CapabilityError::CommandFailed(format!(
                "{} list packages exited with {}: {}",
                self.pm.display(),
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_package_lines(&stdout))
    }
}

/// Extract package identifiers from `pm list packages` output.
fn parse_package_lines(stdout: &str) -> HashSet<String> {
    stdout
        .lines()
        .filter_map(|line| line.trim().strip_prefix("package:"))
        .filter(|pkg| !pkg.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[async_trait]
impl InstallCheckerPort for PmInstallChecker {
    async fn is_installed(&self, package_name: &str) -> Result<bool, CapabilityError> {
        Ok(self.installed_set().await?.contains(package_name))
    }

    async fn check_many(
        &self,
        package_names: &[String],
    ) -> Result<HashMap<String, bool>, CapabilityError> {
        // One registry listing answers the whole batch.
        let installed = self.installed_set().await?;
        Ok(package_names
            .iter()
            .map(|name| (name.clone(), installed.contains(name)))
            .collect())
    }

    async fn list_installed(&self) -> Result<Vec<String>, CapabilityError> {
        let mut packages: Vec<String> = self.installed_set().await?.into_iter().collect();
        packages.sort();
        Ok(packages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_package_lines() {
        let stdout = "package:com.a\npackage:com.b\nWarning: something\npackage:\n";
        let set = parse_package_lines(stdout);
        assert_eq!(set.len(), 2);
        assert!(set.contains("com.a"));
        assert!(set.contains("com.b"));
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        let set = parse_package_lines("  package:com.a  \r\npackage:com.b");
        assert!(set.contains("com.a"));
        assert!(set.contains("com.b"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_unavailable() {
        let checker = PmInstallChecker::new(PathBuf::from("/nonexistent/pm-binary"));
        let err = checker.is_installed("com.a").await.unwrap_err();
        assert!(matches!(err, CapabilityError::Unavailable(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_check_many_against_scripted_pm() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let script = tmp.path().join("pm");
        std::fs::write(
            &script,
            "#!/bin/sh\necho package:com.a\necho package:com.b\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let checker = PmInstallChecker::new(script);
        let ids = vec!["com.a".to_string(), "com.missing".to_string()];
        let result = checker.check_many(&ids).await.unwrap();

        assert_eq!(result.len(), 2);
        assert!(result["com.a"]);
        assert!(!result["com.missing"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_command_failed() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let script = tmp.path().join("pm");
        std::fs::write(&script, "#!/bin/sh\necho broken >&2\nexit 1\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let checker = PmInstallChecker::new(script);
        let err = checker.list_installed().await.unwrap_err();
        assert!(matches!(err, CapabilityError::CommandFailed(_)));
    }
}
