//! System opener adapter.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use appdeck_core::{CapabilityError, OpenerPort};

/// Hands files and URLs to the platform opener.
///
/// On Linux this is `xdg-open`, on macOS `open`, on Windows
/// `cmd /C start`. The content-type hint is unused here; desktop
/// openers pick the handler from the file itself.
#[derive(Debug, Clone, Default)]
pub struct SystemOpener;

impl SystemOpener {
    /// Create a new system opener.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn open(&self, target: &str) -> Result<(), CapabilityError> {
        let status = open_command(target)
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CapabilityError::Unavailable("no system opener on this host".to_string())
                } else {
                    CapabilityError::CommandFailed(e.to_string())
                }
            })?;

        if !status.success() {
            return Err(CapabilityError::CommandFailed(format!(
                "opener exited with {status} for {target}"
            )));
        }
        tracing::debug!(target, "handed to system opener");
        Ok(())
    }
}

#[cfg(target_os = "linux")]
fn open_command(target: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(target);
    cmd
}

#[cfg(target_os = "macos")]
fn open_command(target: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(target);
    cmd
}

#[cfg(target_os = "windows")]
fn open_command(target: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "", target]);
    cmd
}

#[async_trait]
impl OpenerPort for SystemOpener {
    async fn open_file(&self, path: &Path, _content_type: &str) -> Result<(), CapabilityError> {
        self.open(&path.display().to_string()).await
    }

    async fn open_url(&self, url: &str) -> Result<(), CapabilityError> {
        self.open(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_os = "linux")]
    #[test]
    fn test_open_command_uses_xdg_open() {
        let cmd = open_command("https://example.org");
        assert_eq!(cmd.as_std().get_program(), "xdg-open");
        let args: Vec<_> = cmd.as_std().get_args().collect();
        assert_eq!(args, ["https://example.org"]);
    }
}
