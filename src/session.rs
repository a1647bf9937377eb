//! Immutable per-invocation configuration.
use std::fmt;
use std::str::FromStr;

use crate::cli::Cli;
use crate::error::SessionError;
use crate::platform::Platform;

/// The operation mode for a run. Selected once; there are no transitions
/// between verbs within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Install the package into its destinations.
    Load,
    /// Collect live files back into the package.
    Pack,
    /// Preview resolved transfers without touching the filesystem.
    Lint,
}

impl FromStr for Verb {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "load" => Ok(Self::Load),
            "pack" => Ok(Self::Pack),
            "lint" => Ok(Self::Lint),
            other => Err(SessionError::UnknownVerb(other.to_string())),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => write!(f, "load"),
            Self::Pack => write!(f, "pack"),
            Self::Lint => write!(f, "lint"),
        }
    }
}

/// Immutable session configuration, constructed once from the CLI and passed
/// by reference into every resolver and executor call.
#[derive(Debug, Clone)]
pub struct Session {
    /// The operation for this run.
    pub verb: Verb,
    /// Package identifier under the packages root.
    pub package_id: String,
    /// Active platform (override flag, or host detection).
    pub platform: Platform,
    /// Verbose logging requested.
    pub verbose: bool,
    /// Report-only mode; no filesystem mutation.
    pub dry_run: bool,
    /// Install every transfer as a symlink.
    pub force_symlinks: bool,
    /// Install every transfer as a plain copy (unless overridden).
    pub force_no_symlinks: bool,
}

impl Session {
    /// Build the session from parsed CLI arguments.
    ///
    /// # Errors
    ///
    /// Fails when no package id was given or the verb is unrecognized; both
    /// are fatal configuration errors.
    pub fn from_cli(cli: &Cli) -> Result<Self, SessionError> {
        let (verb, package_id) = cli.positionals()?;
        Ok(Self {
            verb: verb.parse()?,
            package_id,
            platform: cli.platform_override().unwrap_or_else(Platform::detect),
            verbose: cli.verbose,
            dry_run: cli.dry_run,
            force_symlinks: cli.force_symlinks,
            force_no_symlinks: cli.force_no_symlinks,
        })
    }

    /// Resolve the effective symlink flag for one transfer.
    ///
    /// `force_symlinks` has final veto power over `force_no_symlinks`; the
    /// asymmetry is deliberate and relied upon.
    #[must_use]
    pub const fn resolve_symlink(&self, rule_symlink: bool) -> bool {
        (rule_symlink && !self.force_no_symlinks) || self.force_symlinks
    }
}
