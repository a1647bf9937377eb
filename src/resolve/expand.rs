//! Glob expansion of source patterns and destination-root candidates.
//!
//! Sources and destinations expand differently on a miss: a source pattern
//! that names a non-existent literal path is an error (a typo would
//! otherwise surface much later, inside the shell), while a destination
//! pattern that matches nothing yields itself, since destinations are
//! created on demand.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::destinations::DestinationRoots;
use crate::error::ExpandError;
use crate::manifest::IncludeRule;
use crate::shell::Shell;

/// Expand an include rule's source pattern into concrete paths.
///
/// The pattern is joined onto the package root and environment-expanded
/// before globbing. An empty pattern, or a metacharacter pattern matching
/// nothing, expands to nothing (the rule becomes a silent no-op).
///
/// # Errors
///
/// Fails when the pattern cannot be compiled, or names a literal path that
/// does not exist.
pub fn expand_sources(
    rule: &IncludeRule,
    package_root: &Path,
    shell: &dyn Shell,
) -> Result<Vec<PathBuf>> {
    if rule.path.is_empty() {
        return Ok(Vec::new());
    }
    let joined = package_root.join(&rule.path);
    let pattern = shell.expand_env(&joined.to_string_lossy())?;

    let matches = glob_paths(&pattern)?;
    if !matches.is_empty() {
        return Ok(matches);
    }
    let literal = Path::new(&pattern);
    if literal.exists() {
        return Ok(vec![literal.to_path_buf()]);
    }
    if has_glob_meta(&pattern) {
        return Ok(Vec::new());
    }
    Err(ExpandError::SourceNotFound { pattern }.into())
}

/// Expand the destination-root candidates for one include rule.
///
/// The override is environment-expanded first, then classified: an
/// absolute override bypasses the destination table entirely (the table is
/// never even resolved for it, so `~/cfg/` works in a package with no
/// table at all); a relative override is joined onto every resolved root.
/// Every candidate pattern is then glob-expanded with the literal
/// fallback.
///
/// # Errors
///
/// Fails when a pattern cannot be compiled, an override fails to expand,
/// or the rule needs the destination table and the platform has no entry.
pub fn destination_candidates(
    rule: &IncludeRule,
    roots: &mut DestinationRoots<'_>,
    shell: &dyn Shell,
) -> Result<Vec<String>> {
    let patterns: Vec<String> = if let Some(dest) = &rule.destination {
        let expanded = shell.expand_env(dest)?;
        if Path::new(&expanded).is_absolute() {
            vec![expanded]
        } else {
            roots
                .get(shell)?
                .iter()
                .map(|root| join_pattern(root, &expanded))
                .collect()
        }
    } else {
        roots.get(shell)?.to_vec()
    };

    let mut candidates = Vec::new();
    for pattern in &patterns {
        candidates.extend(expand_destination(pattern)?);
    }
    Ok(candidates)
}

/// Expand one destination-root pattern. A pattern matching nothing yields
/// itself, preserving any trailing separator for the composer.
fn expand_destination(pattern: &str) -> Result<Vec<String>> {
    let matches = glob_paths(pattern)?;
    if matches.is_empty() {
        return Ok(vec![pattern.to_string()]);
    }
    Ok(matches
        .into_iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect())
}

fn glob_paths(pattern: &str) -> Result<Vec<PathBuf>, ExpandError> {
    let paths = glob::glob(pattern).map_err(|e| ExpandError::Pattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;
    // Entries the process cannot stat are dropped rather than failing the rule.
    Ok(paths.filter_map(Result::ok).collect())
}

fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn join_pattern(root: &str, relative: &str) -> String {
    Path::new(root).join(relative).to_string_lossy().into_owned()
}
