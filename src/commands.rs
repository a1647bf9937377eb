//! Top-level orchestration of a single run.
use anyhow::Result;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::executor::{Executor, RunSummary};
use crate::logging::Logger;
use crate::manifest::Manifest;
use crate::session::{Session, Verb};
use crate::shell;

/// Default packages directory under the user's home.
pub const PACKAGES_DIR: &str = ".dotfiles";

/// Run the verb selected on the command line against one package.
///
/// Fatal configuration errors (missing id, unknown verb, unreadable or
/// malformed manifest, unsupported platform, bad source patterns) come back
/// as `Err`; per-transfer command failures are logged and do not affect the
/// result.
///
/// # Errors
///
/// Returns an error for every fatal condition above; `main` maps it to
/// exit code 1.
pub fn run(cli: &Cli, log: &Logger) -> Result<RunSummary> {
    let session = Session::from_cli(cli)?;
    let packages_root = resolve_packages_root(cli)?;
    let package_root = packages_root.join(&session.package_id);
    // Normalized so sources glob to absolute paths (and display without the
    // \\?\ prefix on Windows); a missing package surfaces as a manifest
    // read error below.
    let package_root = dunce::canonicalize(&package_root).unwrap_or(package_root);

    log.debug(&format!("platform: {}", session.platform));
    log.debug(&format!("package: {}", package_root.display()));

    let manifest = Manifest::load(&package_root)?;
    let shell = shell::select(session.platform)?;
    if session.verb != Verb::Lint {
        log.stage(&format!("{} '{}'", session.verb, session.package_id));
    }
    let executor = Executor::new(&session, shell.as_ref(), &package_root, log);
    executor.run(&manifest)
}

/// Resolve the packages root: `--root`, then `DPM_ROOT`, then
/// `~/.dotfiles`.
///
/// # Errors
///
/// Returns an error when no override is given and the home directory
/// cannot be determined.
pub fn resolve_packages_root(cli: &Cli) -> Result<PathBuf> {
    if let Some(root) = &cli.root {
        return Ok(root.clone());
    }
    if let Ok(root) = std::env::var("DPM_ROOT") {
        return Ok(PathBuf::from(root));
    }
    dirs::home_dir()
        .map(|home| home.join(PACKAGES_DIR))
        .ok_or_else(|| {
            anyhow::anyhow!("cannot determine home directory; use --root or set DPM_ROOT")
        })
}
