//! Domain-specific error types for the package manager.
//!
//! Internal modules return typed errors via [`thiserror`]; command handlers
//! at the CLI boundary convert them to [`anyhow::Error`] with the standard
//! `?` operator, and only `main` decides the process exit code.

use thiserror::Error;

/// Errors that arise from loading the package manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("cannot read manifest {path}: {source}")]
    Io {
        /// Path to the manifest that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The manifest file is not valid YAML or does not match the schema.
    #[error("malformed manifest {path}: {message}")]
    Parse {
        /// Path to the manifest that failed to parse.
        path: String,
        /// Parser diagnostic.
        message: String,
    },
}

/// Errors that arise from destination resolution for a platform.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The manifest has neither a platform-specific nor a global destination.
    #[error("platform '{platform}' is not supported by this package")]
    UnsupportedPlatform {
        /// Name of the platform that has no usable destination entry.
        platform: String,
    },
}

/// Errors that arise while expanding include-rule patterns.
#[derive(Error, Debug)]
pub enum ExpandError {
    /// A literal source path named by an include rule does not exist.
    #[error("source '{pattern}' does not exist")]
    SourceNotFound {
        /// The pattern, after environment expansion.
        pattern: String,
    },

    /// A pattern could not be compiled as a glob.
    #[error("invalid pattern '{pattern}': {message}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Glob compiler diagnostic.
        message: String,
    },
}

/// Errors that arise while building the session from CLI arguments.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The verb positional is not one of the recognized operations.
    #[error("invalid verb '{0}': must be one of load, pack, lint")]
    UnknownVerb(String),

    /// No package id was given on the command line.
    #[error("missing package id")]
    MissingPackageId,
}
