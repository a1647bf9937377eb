//! Target platform detection and representation.

use std::fmt;

/// Target platform for a run.
///
/// Selected once per invocation, either from an explicit CLI override or by
/// host detection. WSL is never auto-detected: the kernel reports itself as
/// Linux there, so `--wsl` is an explicit opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Linux and other Unix-like hosts.
    Linux,
    /// macOS hosts.
    Macos,
    /// Native Windows hosts.
    Windows,
    /// Windows Subsystem for Linux, deploying into the Windows filesystem.
    Wsl,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Macos => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
            Self::Wsl => write!(f, "wsl"),
        }
    }
}

impl Platform {
    /// Detect the host platform.
    #[must_use]
    pub fn detect() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Macos
        } else {
            // Other Unix-like systems deploy like Linux.
            Self::Linux
        }
    }

    /// The destination-table key this platform resolves against.
    ///
    /// A WSL run deploys into the Windows-side filesystem, so it uses the
    /// `windows` destination entry.
    #[must_use]
    pub const fn destination_key(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Macos => "macos",
            Self::Windows | Self::Wsl => "windows",
        }
    }

    /// Whether this run goes through the WSL interop bridge.
    #[must_use]
    pub const fn is_wsl(self) -> bool {
        matches!(self, Self::Wsl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_never_reports_wsl() {
        let p = Platform::detect();
        assert_ne!(p, Platform::Wsl, "WSL must never be auto-detected");
    }

    #[test]
    fn display_names() {
        assert_eq!(Platform::Linux.to_string(), "linux");
        assert_eq!(Platform::Macos.to_string(), "macos");
        assert_eq!(Platform::Windows.to_string(), "windows");
        assert_eq!(Platform::Wsl.to_string(), "wsl");
    }

    #[test]
    fn wsl_resolves_windows_destinations() {
        assert_eq!(Platform::Wsl.destination_key(), "windows");
        assert_eq!(Platform::Windows.destination_key(), "windows");
    }

    #[test]
    fn posix_platforms_resolve_their_own_key() {
        assert_eq!(Platform::Linux.destination_key(), "linux");
        assert_eq!(Platform::Macos.destination_key(), "macos");
    }

    #[test]
    fn is_wsl() {
        assert!(Platform::Wsl.is_wsl());
        assert!(!Platform::Windows.is_wsl());
    }
}
