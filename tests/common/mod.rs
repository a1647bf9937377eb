// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed packages root with one package and a
// scratch destination area, so each integration test can set up an isolated
// environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code, clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use clap::Parser as _;
use dpm::cli::Cli;
use dpm::executor::RunSummary;
use dpm::logging::Logger;

/// An isolated packages root containing one package, plus a scratch
/// destination area, all inside one [`tempfile::TempDir`].
///
/// The directory is deleted automatically when the fixture is dropped.
pub struct PackageFixture {
    /// Backing temporary directory.
    pub tmp: tempfile::TempDir,
    /// Package id under the packages root.
    pub id: String,
}

impl PackageFixture {
    /// Create a fixture with an empty package named `id`.
    pub fn new(id: &str) -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(tmp.path().join("packages").join(id))
            .expect("create package dir");
        std::fs::create_dir_all(tmp.path().join("dest")).expect("create dest dir");
        Self {
            tmp,
            id: id.to_string(),
        }
    }

    /// The packages root passed to `--root`.
    pub fn packages_root(&self) -> PathBuf {
        self.tmp.path().join("packages")
    }

    /// The package directory holding `package.yml` and its files.
    pub fn package_dir(&self) -> PathBuf {
        self.packages_root().join(&self.id)
    }

    /// The scratch destination area (exists as a directory).
    pub fn dest(&self) -> PathBuf {
        self.tmp.path().join("dest")
    }

    /// A destination-root string under the scratch area with a trailing
    /// separator, e.g. `/tmp/.../dest/cfg/`.
    pub fn dest_root(&self, name: &str) -> String {
        format!("{}/{name}/", self.dest().display())
    }

    /// Write the package manifest.
    pub fn write_manifest(&self, text: &str) {
        std::fs::write(self.package_dir().join("package.yml"), text)
            .expect("write package.yml");
    }

    /// Write a file (creating parents) inside the package.
    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.package_dir().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create file parents");
        }
        std::fs::write(path, content).expect("write package file");
    }

    /// Run `dpm` in-process with `--root` pointing at this fixture.
    pub fn run(&self, args: &[&str]) -> anyhow::Result<RunSummary> {
        let root = self.packages_root().display().to_string();
        let mut argv = vec!["dpm", "--root", root.as_str()];
        argv.extend_from_slice(args);
        let cli = Cli::parse_from(argv);
        let log = Logger::new(false);
        dpm::commands::run(&cli, &log)
    }
}

/// Sorted snapshot of every file under `dir`: relative path plus content.
/// Used to assert that a tree is byte-identical across a dry run.
pub fn tree_snapshot(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut entries = Vec::new();
    collect_files(dir, dir, &mut entries);
    entries.sort();
    entries
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<(String, Vec<u8>)>) {
    let Ok(read_dir) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in read_dir.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else {
            let relative = path
                .strip_prefix(root)
                .expect("entry under root")
                .display()
                .to_string();
            let content = std::fs::read(&path).unwrap_or_default();
            out.push((relative, content));
        }
    }
}
