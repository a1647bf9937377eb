//! Transfer execution: verb dispatch and filesystem preconditions.
//!
//! The executor owns the loop that walks include rules in manifest order,
//! expands them, composes each destination against live filesystem state,
//! and applies the selected verb, one transfer at a time, strictly
//! sequentially. Per-transfer failures are reported and the run continues;
//! nothing is rolled back.

use anyhow::{Context as _, Result};
use std::path::Path;

use crate::exec;
use crate::logging::Logger;
use crate::manifest::{IncludeRule, Manifest};
use crate::resolve::{Transfer, compose, destinations, expand};
use crate::session::{Session, Verb};
use crate::shell::Shell;

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Transfers completed (or, in dry-run mode, previewed as commands).
    pub completed: u32,
    /// Transfers skipped because the source side is a symbolic link.
    pub skipped: u32,
    /// Transfers whose command failed or could not be rendered.
    pub failed: u32,
}

/// Outcome of a single transfer attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Done,
    DryRun,
    Skipped,
    Failed,
}

/// Drives every include rule of a manifest through expansion, composition,
/// and the selected verb.
#[derive(Debug)]
pub struct Executor<'a> {
    session: &'a Session,
    shell: &'a dyn Shell,
    package_root: &'a Path,
    log: &'a Logger,
}

impl<'a> Executor<'a> {
    /// Create an executor for one run.
    #[must_use]
    pub const fn new(
        session: &'a Session,
        shell: &'a dyn Shell,
        package_root: &'a Path,
        log: &'a Logger,
    ) -> Self {
        Self {
            session,
            shell,
            package_root,
            log,
        }
    }

    /// Execute the whole manifest under the session's verb.
    ///
    /// # Errors
    ///
    /// Fails on fatal resolution errors (unsupported platform, invalid or
    /// missing source patterns). Per-transfer command failures are counted,
    /// not raised.
    pub fn run(&self, manifest: &Manifest) -> Result<RunSummary> {
        // Resolved on first use: a package whose rules all carry absolute
        // overrides never consults the destination table.
        let mut roots = destinations::DestinationRoots::new(manifest, self.session.platform);
        let mut summary = RunSummary::default();

        for rule in &manifest.include {
            let sources = expand::expand_sources(rule, self.package_root, self.shell)?;
            if sources.is_empty() {
                self.log
                    .debug(&format!("'{}' matched nothing, skipping rule", rule.path));
                continue;
            }
            let candidates = expand::destination_candidates(rule, &mut roots, self.shell)?;

            if self.session.verb == Verb::Lint {
                print_rule_header(rule);
            }
            for source in &sources {
                for candidate in &candidates {
                    // Composed against live state: a directory created by an
                    // earlier transfer changes the outcome of a later one.
                    let destination = compose::compose(source, candidate, self.package_root);
                    let transfer = Transfer {
                        source: source.clone(),
                        destination,
                        symlink: rule.symlink,
                    };
                    self.dispatch(&transfer, &mut summary);
                }
            }
        }

        self.report(summary);
        Ok(summary)
    }

    fn dispatch(&self, transfer: &Transfer, summary: &mut RunSummary) {
        let outcome = match self.session.verb {
            Verb::Load => {
                let symlink = self.session.resolve_symlink(transfer.symlink);
                let outcome = self.transfer(&transfer.source, &transfer.destination, symlink);
                if outcome == Outcome::Done {
                    self.log.info(&format!(
                        "loaded '{}' -> '{}'",
                        self.relative(&transfer.source).display(),
                        transfer.destination.display()
                    ));
                }
                outcome
            }
            // Collection is always a plain copy back into the package,
            // never a link, regardless of the rule's preference.
            Verb::Pack => {
                let outcome = self.transfer(&transfer.destination, &transfer.source, false);
                if outcome == Outcome::Done {
                    self.log.info(&format!(
                        "packed '{}' -> '{}'",
                        transfer.destination.display(),
                        self.relative(&transfer.source).display()
                    ));
                }
                outcome
            }
            Verb::Lint => {
                self.preview(transfer);
                Outcome::Done
            }
        };

        match outcome {
            Outcome::Done | Outcome::DryRun => summary.completed += 1,
            Outcome::Skipped => summary.skipped += 1,
            Outcome::Failed => summary.failed += 1,
        }
    }

    /// Run one copy/link operation with its preconditions.
    ///
    /// The preconditions live here, not in the shell: skip (and report) a
    /// symlink source, create the destination's parent, and remove an
    /// existing destination (overwrite, not merge).
    fn transfer(&self, source: &Path, destination: &Path, symlink: bool) -> Outcome {
        if is_symlink(source) {
            self.log.info(&format!(
                "source '{}' is a link, skipping",
                source.display()
            ));
            return Outcome::Skipped;
        }

        if self.session.dry_run {
            return match self.shell.copy_command(source, destination, symlink) {
                Ok(command) => {
                    self.log.dry_run(&command.to_string());
                    Outcome::DryRun
                }
                Err(e) => {
                    self.log.warn(&format!("cannot render transfer: {e:#}"));
                    Outcome::Failed
                }
            };
        }

        if let Err(e) = prepare_destination(destination) {
            self.log.warn(&format!("{e:#}"));
            return Outcome::Failed;
        }
        let command = match self.shell.copy_command(source, destination, symlink) {
            Ok(command) => command,
            Err(e) => {
                self.log.warn(&format!("cannot render transfer: {e:#}"));
                return Outcome::Failed;
            }
        };
        match exec::run_unchecked(&command) {
            Ok(result) if result.success => Outcome::Done,
            Ok(result) => {
                self.log
                    .warn(&format!("{command} failed: {}", result.stderr.trim()));
                Outcome::Failed
            }
            Err(e) => {
                self.log.warn(&format!("{e:#}"));
                Outcome::Failed
            }
        }
    }

    /// Print one resolved transfer for `lint`.
    #[allow(clippy::print_stdout)]
    fn preview(&self, transfer: &Transfer) {
        let suffix = if transfer.source.is_dir() { "/" } else { "" };
        let symlink = self.session.resolve_symlink(transfer.symlink);
        println!("- source: {}{suffix}", transfer.source.display());
        println!("    dest: {}{suffix}", transfer.destination.display());
        println!(" symlink: {symlink}");
    }

    fn report(&self, summary: RunSummary) {
        if self.session.verb == Verb::Lint {
            return;
        }
        let verbed = if self.session.dry_run {
            "would transfer"
        } else {
            "transferred"
        };
        self.log.info(&format!(
            "{} {verbed}, {} skipped, {} failed",
            summary.completed, summary.skipped, summary.failed
        ));
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(self.package_root).unwrap_or(path)
    }
}

/// Header line grouping `lint` output by include rule.
#[allow(clippy::print_stdout)]
fn print_rule_header(rule: &IncludeRule) {
    println!("include: {}", rule.path);
}

fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata().is_ok_and(|m| m.is_symlink())
}

/// Create the destination's parent and clear anything already there.
fn prepare_destination(destination: &Path) -> Result<()> {
    ensure_parent_dir(destination)?;
    remove_existing(destination)?;
    Ok(())
}

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Remove an existing file, directory tree, or symlink at `path` (including
/// broken symlinks). Does nothing if `path` does not exist.
fn remove_existing(path: &Path) -> Result<()> {
    let Ok(meta) = path.symlink_metadata() else {
        return Ok(());
    };
    if meta.is_dir() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("remove existing: {}", path.display()))?;
    } else {
        std::fs::remove_file(path)
            .with_context(|| format!("remove existing: {}", path.display()))?;
    }
    Ok(())
}
