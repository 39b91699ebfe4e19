//! [`Launcher`] implementation that hands targets to the platform opener.
//!
//! The opener is spawned and the call returns at once; a background thread
//! waits on the child so it does not linger as a zombie.

use crate::traits::Launcher;
use log::{debug, warn};
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::JoinHandle;

/// Opens paths and URLs with `xdg-open` (Linux/BSD), `open` (macOS) or
/// `cmd /C start` (Windows).
#[derive(Debug, Default, Clone)]
pub struct SystemLauncher {
    /// Replaces the platform opener when set.
    program: Option<OsString>,
}

/// The opener process could not be spawned.
#[derive(Debug, thiserror::Error)]
#[error("failed to open {target}: {source}")]
pub struct LauncherError {
    target: String,
    #[source]
    source: std::io::Error,
}

impl SystemLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open targets with `program <target>` instead of the platform opener.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    fn command(&self) -> Command {
        match &self.program {
            Some(program) => Command::new(program),
            None => opener_command(),
        }
    }

    /// Spawn the opener for `target` and hand the child to a reaper thread.
    ///
    /// The returned handle yields the opener's exit status once it has been
    /// collected.
    fn spawn(&self, target: &OsStr) -> Result<JoinHandle<Option<ExitStatus>>, LauncherError> {
        let mut cmd = self.command();
        cmd.arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        debug!("spawning {:?}", cmd);
        let mut child = cmd.spawn().map_err(|source| LauncherError {
            target: target.to_string_lossy().into_owned(),
            source,
        })?;
        let target = target.to_string_lossy().into_owned();
        Ok(std::thread::spawn(move || match child.wait() {
            Ok(status) => {
                if !status.success() {
                    warn!("opener for {} exited with {}", target, status);
                }
                Some(status)
            }
            Err(e) => {
                warn!("failed to wait for opener of {}: {}", target, e);
                None
            }
        }))
    }
}

#[cfg(target_os = "macos")]
fn opener_command() -> Command {
    Command::new("open")
}

#[cfg(target_os = "windows")]
fn opener_command() -> Command {
    let mut cmd = Command::new("cmd");
    // `start` treats its first quoted argument as a window title.
    cmd.args(["/C", "start", ""]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command() -> Command {
    Command::new("xdg-open")
}

impl Launcher for SystemLauncher {
    type Error = LauncherError;

    fn open_path(&self, path: &Path) -> Result<(), LauncherError> {
        self.spawn(path.as_os_str()).map(|_| ())
    }

    fn open_url(&self, url: &str) -> Result<(), LauncherError> {
        self.spawn(OsStr::new(url)).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opener_command_has_a_program() {
        let cmd = SystemLauncher::new().command();
        assert!(!cmd.get_program().is_empty());
    }

    #[test]
    fn custom_program_replaces_opener() {
        let cmd = SystemLauncher::with_program("my-opener").command();
        assert_eq!(cmd.get_program(), OsStr::new("my-opener"));
    }

    #[cfg(unix)]
    #[test]
    fn spawned_opener_is_reaped() {
        let launcher = SystemLauncher::with_program("true");
        let reaper = launcher.spawn(OsStr::new("/tmp")).unwrap();
        let status = reaper.join().unwrap();
        assert!(status.is_some_and(|s| s.success()));
    }

    #[cfg(unix)]
    #[test]
    fn failing_opener_still_reaped() {
        let launcher = SystemLauncher::with_program("false");
        let status = launcher.spawn(OsStr::new("x")).unwrap().join().unwrap();
        assert!(status.is_some_and(|s| !s.success()));
    }

    #[cfg(unix)]
    #[test]
    fn open_url_returns_without_waiting() {
        let launcher = SystemLauncher::with_program("true");
        assert!(launcher.open_url("https://example.org").is_ok());
        assert!(launcher.open_path(Path::new("/tmp")).is_ok());
    }

    #[test]
    fn missing_program_is_error() {
        let launcher = SystemLauncher::with_program("/definitely/not/an/opener");
        let err = launcher.open_path(Path::new("/tmp")).unwrap_err();
        assert!(err.to_string().contains("/tmp"));
    }
}
