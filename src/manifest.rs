//! Package manifest model and loading.
//!
//! A package declares its contents in a `package.yml` at the package root:
//!
//! ```yaml
//! include:
//!   - path: "*.conf"
//!     destination: "~/cfg/"
//!     symlink: true
//! destination: "~/"         # global fallback
//! linux: { destination: "~/.config/" }
//! windows: { destination: ["%appdata%/", "%userprofile%/"] }
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::error::ManifestError;
use crate::platform::Platform;

/// Manifest file name inside a package directory.
pub const MANIFEST_FILE: &str = "package.yml";

/// One manifest entry: a source pattern, an optional destination override,
/// and a symlink preference. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct IncludeRule {
    /// Glob pattern relative to the package root.
    pub path: String,
    /// Destination override: absolute (bypasses the destination list) or
    /// relative (joined onto every resolved destination root).
    pub destination: Option<String>,
    /// Whether this entry prefers to be linked rather than copied.
    pub symlink: bool,
}

/// Platform-keyed destination-root patterns with a global fallback.
#[derive(Debug, Clone, Default)]
pub struct DestinationTable {
    /// Fallback used when the active platform has no entry of its own.
    pub global: Option<Vec<String>>,
    /// Destination roots for `windows` (and WSL) runs.
    pub windows: Option<Vec<String>>,
    /// Destination roots for `linux` runs.
    pub linux: Option<Vec<String>>,
    /// Destination roots for `macos` runs.
    pub macos: Option<Vec<String>>,
}

impl DestinationTable {
    /// The platform-specific entry, without the global fallback.
    #[must_use]
    pub fn entry(&self, platform: Platform) -> Option<&[String]> {
        let entry = match platform {
            Platform::Windows | Platform::Wsl => &self.windows,
            Platform::Linux => &self.linux,
            Platform::Macos => &self.macos,
        };
        entry.as_deref()
    }
}

/// A loaded package manifest: include rules plus the destination table.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Include rules in declaration order.
    pub include: Vec<IncludeRule>,
    /// Platform-keyed destination roots.
    pub destinations: DestinationTable,
}

/// A destination value in YAML: a single pattern or an ordered list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Vec<String> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(single) => vec![single],
            OneOrMany::Many(list) => list,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawInclude {
    path: String,
    destination: Option<String>,
    #[serde(default)]
    symlink: bool,
}

#[derive(Debug, Deserialize)]
struct PlatformSection {
    destination: OneOrMany,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    include: Vec<RawInclude>,
    destination: Option<OneOrMany>,
    windows: Option<PlatformSection>,
    linux: Option<PlatformSection>,
    macos: Option<PlatformSection>,
}

impl Manifest {
    /// Load the manifest from `<package_root>/package.yml`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Io`] if the file cannot be read and
    /// [`ManifestError::Parse`] if it is not valid YAML for the schema.
    pub fn load(package_root: &Path) -> Result<Self, ManifestError> {
        let path = package_root.join(MANIFEST_FILE);
        let text = std::fs::read_to_string(&path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    /// Parse manifest text. `label` names the source in parse diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Parse`] when the text does not deserialize.
    pub fn parse(text: &str, label: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest =
            serde_yaml::from_str(text).map_err(|e| ManifestError::Parse {
                path: label.to_string(),
                message: e.to_string(),
            })?;

        let include = raw
            .include
            .into_iter()
            .map(|r| IncludeRule {
                path: r.path,
                destination: r.destination,
                symlink: r.symlink,
            })
            .collect();

        Ok(Self {
            include,
            destinations: DestinationTable {
                global: raw.destination.map(Into::into),
                windows: raw.windows.map(|s| s.destination.into()),
                linux: raw.linux.map(|s| s.destination.into()),
                macos: raw.macos.map(|s| s.destination.into()),
            },
        })
    }
}
