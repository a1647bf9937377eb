//! The shell capability: OS-family specific path expansion and copy/link
//! command rendering.
//!
//! One trait, two implementations, selected once at startup. The
//! implementations differ only in command syntax and variable syntax; the
//! transfer preconditions (parent creation, destructive pre-clean, symlink
//! skip) live in the executor, not here.

mod posix;
mod wsl;

pub use posix::PosixShell;
pub use wsl::WslShell;

use anyhow::Result;
use std::path::Path;

use crate::exec::ShellCommand;
use crate::platform::Platform;

/// Platform-specific path expansion and transfer command rendering.
pub trait Shell: std::fmt::Debug {
    /// Expand home-directory shorthand and environment variables in
    /// `pattern` using the target platform's syntax.
    ///
    /// # Errors
    ///
    /// Returns an error when expansion requires an external lookup that
    /// fails (e.g. the WSL interop bridge is unavailable).
    fn expand_env(&self, pattern: &str) -> Result<String>;

    /// Render the command that copies or links `source` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns an error when the command cannot be rendered, e.g. a path
    /// cannot be translated for the target platform.
    fn copy_command(
        &self,
        source: &Path,
        destination: &Path,
        symlink: bool,
    ) -> Result<ShellCommand>;
}

/// Select the shell implementation for `platform`, once per run.
///
/// Everything except WSL uses the POSIX shell; WSL routes through the
/// path-translating variant.
///
/// # Errors
///
/// Returns an error when the WSL interop tools are missing.
pub fn select(platform: Platform) -> Result<Box<dyn Shell>> {
    if platform.is_wsl() {
        Ok(Box::new(WslShell::new()?))
    } else {
        Ok(Box::new(PosixShell))
    }
}

/// Test double with a configurable fake home directory.
///
/// Expansion replaces `~` with the configured home and leaves everything
/// else untouched; rendered commands are inert.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MockShell {
    pub home: Option<String>,
}

#[cfg(test)]
impl Shell for MockShell {
    fn expand_env(&self, pattern: &str) -> Result<String> {
        Ok(self.home.as_ref().map_or_else(
            || pattern.to_string(),
            |home| pattern.replace('~', home),
        ))
    }

    fn copy_command(
        &self,
        _source: &Path,
        _destination: &Path,
        _symlink: bool,
    ) -> Result<ShellCommand> {
        Ok(ShellCommand::new("true"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_posix_for_non_wsl_platforms() {
        for platform in [Platform::Linux, Platform::Macos, Platform::Windows] {
            let shell = select(platform).expect("posix shell is always available");
            assert!(format!("{shell:?}").contains("PosixShell"));
        }
    }

    #[test]
    fn mock_shell_expands_tilde() {
        let shell = MockShell {
            home: Some("/home/u".to_string()),
        };
        assert_eq!(shell.expand_env("~/cfg/").expect("expand"), "/home/u/cfg/");
    }
}
