//! Handing URLs to the operating system.

use std::process::{Command, Stdio};

use spotifriend_common::PlatformError;
use tracing::debug;

/// Opens a URL or custom-scheme URI with whatever the host has registered.
pub trait LinkOpener: Send + Sync {
    fn open(&self, target: &str) -> Result<(), PlatformError>;
}

/// Opener backed by `open` (macOS), `xdg-open` (Linux) or `start` (Windows).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl SystemOpener {
    fn command(target: &str) -> Command {
        #[cfg(target_os = "macos")]
        {
            let mut cmd = Command::new("open");
            cmd.arg(target);
            cmd
        }
        #[cfg(target_os = "windows")]
        {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", target]);
            cmd
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(target);
            cmd
        }
    }
}

impl LinkOpener for SystemOpener {
    fn open(&self, target: &str) -> Result<(), PlatformError> {
        debug!(target, "opening link");
        let status = Self::command(target)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| PlatformError::OpenError(format!("failed to launch opener: {e}")))?;
        if status.success() {
            Ok(())
        } else {
            Err(PlatformError::OpenError(format!(
                "no handler accepted {target} ({status})"
            )))
        }
    }
}
