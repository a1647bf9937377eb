//! POSIX shell: `cp` / `ln -s` with `~` and `$VAR` expansion.
use anyhow::Result;
use std::path::Path;

use super::Shell;
use crate::exec::ShellCommand;

/// Shell for Unix-like targets (and native Windows runs, which deploy with
/// the same command syntax).
#[derive(Debug, Default, Clone, Copy)]
pub struct PosixShell;

impl Shell for PosixShell {
    fn expand_env(&self, pattern: &str) -> Result<String> {
        // Undefined variables are left unsubstituted rather than failing the
        // whole pattern.
        let home = || dirs::home_dir().map(|p| p.to_string_lossy().into_owned());
        let context = |var: &str| Ok::<_, std::env::VarError>(std::env::var(var).ok());
        let expanded = shellexpand::full_with_context(pattern, home, context)
            .map_err(|e| anyhow::anyhow!("expanding '{pattern}': {e}"))?;
        Ok(expanded.into_owned())
    }

    fn copy_command(
        &self,
        source: &Path,
        destination: &Path,
        symlink: bool,
    ) -> Result<ShellCommand> {
        let src = source.to_string_lossy().into_owned();
        let dst = destination.to_string_lossy().into_owned();
        let cmd = if symlink {
            ShellCommand::new("ln").arg("-s").arg(src).arg(dst)
        } else if source.is_dir() {
            ShellCommand::new("cp").arg("-r").arg(src).arg(dst)
        } else {
            ShellCommand::new("cp").arg(src).arg(dst)
        };
        Ok(cmd)
    }
}
