//! Command-line interface definition: argument parsing and subcommands.

use clap::Parser;
use std::path::PathBuf;

use crate::error::SessionError;
use crate::platform::Platform;

/// Top-level CLI entry point for the dotfiles package manager.
///
/// The two positionals emulate the `[verb] id` pattern: a lone positional is
/// the package id and the verb defaults to `load`, so `dpm vim` and
/// `dpm load vim` are the same invocation.
#[derive(Parser, Debug)]
#[command(
    name = "dpm",
    about = "Dotfiles package manager",
    version = crate::VERSION
)]
pub struct Cli {
    /// The package operation (load, pack, lint)
    #[arg(value_name = "VERB")]
    pub verb: Option<String>,

    /// The id of the package under the packages root
    #[arg(value_name = "ID")]
    pub id: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the commands that would run without executing them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Deploy against the 'windows' destination set
    #[arg(long, group = "platform")]
    pub windows: bool,

    /// Deploy against the 'macos' destination set
    #[arg(long, group = "platform")]
    pub macos: bool,

    /// Deploy against the 'linux' destination set
    #[arg(long, group = "platform")]
    pub linux: bool,

    /// Deploy into the Windows filesystem through the WSL bridge
    #[arg(long, group = "platform")]
    pub wsl: bool,

    /// Force all contents to be installed as symlinks
    #[arg(short = 's', long)]
    pub force_symlinks: bool,

    /// Force all contents to be installed as plain copies
    #[arg(long)]
    pub force_no_symlinks: bool,

    /// Override the packages root directory
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl Cli {
    /// Resolve the positionals into a `(verb, id)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingPackageId`] if no positional was given.
    pub fn positionals(&self) -> Result<(String, String), SessionError> {
        match (&self.verb, &self.id) {
            (Some(verb), Some(id)) => Ok((verb.clone(), id.clone())),
            (Some(lone), None) => Ok(("load".to_string(), lone.clone())),
            (None, _) => Err(SessionError::MissingPackageId),
        }
    }

    /// The platform selected by an override flag, if any.
    #[must_use]
    pub const fn platform_override(&self) -> Option<Platform> {
        if self.windows {
            Some(Platform::Windows)
        } else if self.macos {
            Some(Platform::Macos)
        } else if self.linux {
            Some(Platform::Linux)
        } else if self.wsl {
            Some(Platform::Wsl)
        } else {
            None
        }
    }
}
