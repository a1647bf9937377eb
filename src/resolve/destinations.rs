//! Destination resolution for the active platform.
use anyhow::Result;

use crate::error::PlatformError;
use crate::manifest::Manifest;
use crate::platform::Platform;
use crate::shell::Shell;

/// Resolve the ordered destination-root patterns for `platform`.
///
/// The platform-specific entry wins; otherwise the `global` entry is used.
/// Every pattern is environment-expanded through the shell before being
/// returned.
///
/// # Errors
///
/// Returns [`PlatformError::UnsupportedPlatform`] when the manifest has
/// neither entry, or an expansion error from the shell.
pub fn resolve(
    manifest: &Manifest,
    platform: Platform,
    shell: &dyn Shell,
) -> Result<Vec<String>> {
    let patterns = manifest
        .destinations
        .entry(platform)
        .or_else(|| manifest.destinations.global.as_deref())
        .ok_or_else(|| PlatformError::UnsupportedPlatform {
            platform: platform.to_string(),
        })?;

    patterns.iter().map(|p| shell.expand_env(p)).collect()
}

/// Lazily resolved destination roots for one run.
///
/// Rules whose destination override is absolute (after expansion) bypass
/// the table entirely, so a package whose rules all do so never consults
/// the table and never fails on it. The first rule that needs it resolves
/// it once; the result is cached for the rest of the run.
#[derive(Debug)]
pub struct DestinationRoots<'a> {
    manifest: &'a Manifest,
    platform: Platform,
    resolved: Option<Vec<String>>,
}

impl<'a> DestinationRoots<'a> {
    /// Create an unresolved holder.
    #[must_use]
    pub const fn new(manifest: &'a Manifest, platform: Platform) -> Self {
        Self {
            manifest,
            platform,
            resolved: None,
        }
    }

    /// The expanded destination roots, resolving them on first use.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::UnsupportedPlatform`] (or an expansion
    /// error) the first time a rule actually needs the table and it cannot
    /// be resolved.
    pub fn get(&mut self, shell: &dyn Shell) -> Result<&[String]> {
        if self.resolved.is_none() {
            self.resolved = Some(resolve(self.manifest, self.platform, shell)?);
        }
        Ok(self.resolved.as_deref().unwrap_or_default())
    }
}
