//! The manifest-driven transfer resolution engine.
//!
//! Include rules flow through three stages: destination resolution for the
//! active platform ([`destinations`]), glob expansion of sources and
//! destination candidates ([`expand`]), and final path composition
//! ([`compose`]). Composition reads live filesystem state, so it runs per
//! transfer immediately before execution rather than as a batch.

pub mod compose;
pub mod destinations;
pub mod expand;

use std::path::PathBuf;

/// A single resolved operation.
///
/// Ephemeral: constructed and consumed within one iteration of the
/// resolution loop, never persisted or cached across runs. Many transfers
/// may come from one include rule (source glob × destination glob).
#[derive(Debug, Clone)]
pub struct Transfer {
    /// Absolute path inside the package.
    pub source: PathBuf,
    /// Absolute path at the deployment site.
    pub destination: PathBuf,
    /// The include rule's symlink preference (before session overrides).
    pub symlink: bool,
}
