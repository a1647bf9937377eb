//! Path-translating shell for WSL runs deploying into the Windows
//! filesystem.
//!
//! Variable syntax is Windows-style (`%userprofile%`, `%appdata%`); values
//! are resolved on the Windows side with `wslvar` and translated back into
//! WSL paths with `wslpath`. Links are created with `cmd.exe /C mklink`,
//! which needs Windows-style backslashed paths and a working directory the
//! Windows side can see.

use anyhow::{Context as _, Result};
use std::path::Path;

use super::Shell;
use crate::exec::{self, ShellCommand};

/// Shell for WSL runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct WslShell;

impl WslShell {
    /// Construct the shell, verifying the WSL interop tools are reachable.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing tool when `wslpath`,
    /// `wslvar`, or `cmd.exe` cannot be found on `PATH`.
    pub fn new() -> Result<Self> {
        for tool in ["wslpath", "wslvar", "cmd.exe"] {
            which::which(tool).with_context(|| {
                format!("'{tool}' not found; WSL interop is required for --wsl runs")
            })?;
        }
        Ok(Self)
    }
}

impl Shell for WslShell {
    fn expand_env(&self, pattern: &str) -> Result<String> {
        let replaced = pattern.replace('~', "%userprofile%");
        expand_tokens(&replaced, wsl_var)
    }

    fn copy_command(
        &self,
        source: &Path,
        destination: &Path,
        symlink: bool,
    ) -> Result<ShellCommand> {
        if symlink {
            let win_source = win_path(source)?;
            let parent = destination.parent().unwrap_or_else(|| Path::new("/"));
            // wslpath only translates paths that exist; the destination was
            // just cleaned away, so translate its parent and re-attach the
            // final component.
            let name = destination
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    anyhow::anyhow!("destination '{}' has no file name", destination.display())
                })?;
            let win_destination =
                format!("{}\\{name}", win_path(parent)?.trim_end_matches('\\'));

            let mut cmd = ShellCommand::new("cmd.exe").arg("/C").arg("mklink");
            if source.is_dir() {
                cmd = cmd.arg("/D");
            }
            Ok(cmd.arg(win_destination).arg(win_source).current_dir(parent))
        } else {
            // Plain copies go through the WSL side; /mnt/<drive> paths are
            // writable directly.
            let src = source.to_string_lossy().into_owned();
            let dst = destination.to_string_lossy().into_owned();
            let cmd = if source.is_dir() {
                ShellCommand::new("cp").arg("-r").arg(src).arg(dst)
            } else {
                ShellCommand::new("cp").arg(src).arg(dst)
            };
            Ok(cmd)
        }
    }
}

/// Translate an existing WSL path into its Windows form.
fn win_path(path: &Path) -> Result<String> {
    let out = exec::run(
        &ShellCommand::new("wslpath")
            .arg("-w")
            .arg(path.to_string_lossy().into_owned()),
    )?;
    Ok(out.stdout.trim().to_string())
}

/// Resolve a Windows environment variable and translate its value into a
/// WSL path.
fn wsl_var(name: &str) -> Result<String> {
    let value = exec::run(&ShellCommand::new("wslvar").arg(name))?;
    let translated = exec::run(&ShellCommand::new("wslpath").arg(value.stdout.trim()))?;
    Ok(translated.stdout.trim().to_string())
}

/// Replace every `%NAME%` token via `resolve`. Percent signs that do not
/// open a well-formed token are kept literally.
fn expand_tokens(
    input: &str,
    mut resolve: impl FnMut(&str) -> Result<String>,
) -> Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('%') {
        let (before, tail) = rest.split_at(start);
        out.push_str(before);
        let after = tail.strip_prefix('%').unwrap_or(tail);
        if let Some(end) = after.find('%') {
            let (name, closing) = after.split_at(end);
            if !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                out.push_str(&resolve(name)?);
                rest = closing.strip_prefix('%').unwrap_or(closing);
                continue;
            }
        }
        out.push('%');
        rest = after;
    }
    out.push_str(rest);
    Ok(out)
}
