//! Final destination path composition.
use std::path::{Path, PathBuf};

/// Compose the final destination path for one transfer.
///
/// A candidate with a trailing path separator, or one that already exists
/// as a directory, receives the source's path relative to the package root
/// (subdirectory structure under the matched source is preserved). Any
/// other candidate is the final file path verbatim (rename-on-copy).
///
/// The directory check reads live filesystem state and is order-sensitive:
/// a directory created by an earlier transfer in the same run changes the
/// outcome for a later one. Callers invoke this immediately before
/// executing each transfer.
#[must_use]
pub fn compose(source: &Path, candidate: &str, package_root: &Path) -> PathBuf {
    let root = Path::new(candidate);
    let trailing_separator = candidate.ends_with('/') || candidate.ends_with('\\');
    if trailing_separator || root.is_dir() {
        let relative = source.strip_prefix(package_root).map_or_else(
            // Sources sit under the package root by construction; an env
            // expansion that escaped it degrades to the bare file name.
            |_| PathBuf::from(source.file_name().unwrap_or(source.as_os_str())),
            Path::to_path_buf,
        );
        root.join(relative)
    } else {
        root.to_path_buf()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn trailing_separator_appends_relative_source() {
        let dest = compose(
            Path::new("/pkg/a/b.conf"),
            "/etc/",
            Path::new("/pkg/a"),
        );
        assert_eq!(dest, PathBuf::from("/etc/b.conf"));
    }

    #[test]
    fn no_separator_and_no_directory_is_verbatim() {
        let dest = compose(
            Path::new("/pkg/a/b.conf"),
            "/etc/app.conf",
            Path::new("/pkg/a"),
        );
        assert_eq!(dest, PathBuf::from("/etc/app.conf"));
    }

    #[test]
    fn existing_directory_appends_relative_source() {
        let dir = tempfile::tempdir().unwrap();
        let candidate = dir.path().display().to_string();
        assert!(!candidate.ends_with('/'));

        let dest = compose(Path::new("/pkg/x.conf"), &candidate, Path::new("/pkg"));
        assert_eq!(dest, dir.path().join("x.conf"));
    }

    #[test]
    fn subdirectory_structure_is_preserved() {
        let dest = compose(
            Path::new("/pkg/colors/dark.vim"),
            "/home/u/.vim/",
            Path::new("/pkg"),
        );
        assert_eq!(dest, PathBuf::from("/home/u/.vim/colors/dark.vim"));
    }

    #[test]
    fn directory_created_mid_run_changes_composition() {
        let dir = tempfile::tempdir().unwrap();
        let candidate = dir.path().join("out").display().to_string();

        let before = compose(Path::new("/pkg/x"), &candidate, Path::new("/pkg"));
        assert_eq!(before, PathBuf::from(&candidate), "no dir yet: verbatim");

        std::fs::create_dir(dir.path().join("out")).unwrap();
        let after = compose(Path::new("/pkg/x"), &candidate, Path::new("/pkg"));
        assert_eq!(after, dir.path().join("out").join("x"), "dir exists: join");
    }

    #[test]
    fn backslash_separator_also_counts() {
        let dest = compose(
            Path::new("/pkg/x.conf"),
            "C:\\Users\\u\\cfg\\",
            Path::new("/pkg"),
        );
        assert!(dest.to_string_lossy().ends_with("x.conf"));
    }

    #[test]
    fn source_outside_package_root_degrades_to_file_name() {
        let dest = compose(
            Path::new("/elsewhere/token.txt"),
            "/etc/",
            Path::new("/pkg"),
        );
        assert_eq!(dest, PathBuf::from("/etc/token.txt"));
    }
}
