// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Installed package discovery from `cutlist-package.toml` metadata.
//!
//! A package root holds one directory per installed package. A directory
//! is a package when it contains `cutlist-package.toml`:
//!
//! ```toml
//! [package]
//! name = "cutlist-mockplugin"
//! version = "0.1.0"
//!
//! [entry-points."cutlist.plugins"]
//! mock_plugin = "cutlist_mockplugin"
//! ```
//!
//! Each entry in the configured group names a module directory inside the
//! package, optionally followed by `:callable`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cutlist_core::CutlistError;
use serde::Deserialize;
use tracing::debug;

/// Metadata file marking a directory as an installed package.
pub const PACKAGE_METADATA_FILE: &str = "cutlist-package.toml";

/// Static manifest looked up inside a module directory.
pub const STATIC_MANIFEST_FILE: &str = "plugin_manifest.json";

/// A package found under one of the package roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub name: String,
    pub version: Option<String>,
    /// Absolute directory the package is installed in.
    pub location: PathBuf,
    /// Entry points of the requested group, sorted by name.
    pub entry_points: Vec<EntryPoint>,
}

/// One `name = "module[:callable]"` line of package metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub name: String,
    pub module: String,
    pub callable: Option<String>,
}

impl EntryPoint {
    /// Parses the right-hand side of an entry point declaration.
    pub fn parse(name: &str, value: &str) -> Result<Self, String> {
        let (module, callable) = match value.split_once(':') {
            Some((module, callable)) => (module.trim(), Some(callable.trim())),
            None => (value.trim(), None),
        };

        if module.is_empty() || !module.split('.').all(is_identifier) {
            return Err(format!(
                "entry point `{name}` has invalid module `{module}`"
            ));
        }
        if let Some(callable) = callable {
            if !is_identifier(callable) {
                return Err(format!(
                    "entry point `{name}` has invalid callable `{callable}`"
                ));
            }
        }

        Ok(Self {
            name: name.to_string(),
            module: module.to_string(),
            callable: callable.map(str::to_string),
        })
    }

    /// Generator lookup key: `module` or `module:callable`.
    pub fn target(&self) -> String {
        match &self.callable {
            Some(callable) => format!("{}:{callable}", self.module),
            None => self.module.clone(),
        }
    }

    /// Directory of the module inside the package (`a.b` -> `<package>/a/b`).
    pub fn module_dir(&self, package_location: &Path) -> PathBuf {
        self.module
            .split('.')
            .fold(package_location.to_path_buf(), |dir, part| dir.join(part))
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

// --- TOML intermediate structs ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct PackageMetadataFile {
    package: PackageSection,
    #[serde(default)]
    entry_points: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct PackageSection {
    name: String,
    #[serde(default)]
    version: Option<String>,
}

// --- Public API ---

/// Parses package metadata content for the given entry point group.
pub fn parse_package_metadata(
    toml_content: &str,
    location: &Path,
    group: &str,
) -> Result<InstalledPackage, CutlistError> {
    let label = location.display().to_string();
    let file: PackageMetadataFile = toml::from_str(toml_content).map_err(|e| CutlistError::Plugin {
        package: label.clone(),
        message: format!("invalid {PACKAGE_METADATA_FILE}: {e}"),
        source: Some(Box::new(e)),
    })?;

    let name = file.package.name.trim().to_string();
    if name.is_empty() {
        return Err(CutlistError::plugin(label, "package name must not be empty"));
    }

    let entry_points = file
        .entry_points
        .get(group)
        .into_iter()
        .flatten()
        .map(|(entry, value)| EntryPoint::parse(entry, value))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|message| CutlistError::plugin(&name, message))?;

    Ok(InstalledPackage {
        name,
        version: file.package.version,
        location: location.to_path_buf(),
        entry_points,
    })
}

/// Reads a package directory, returning `None` when it holds no metadata file.
pub fn read_package(dir: &Path, group: &str) -> Result<Option<InstalledPackage>, CutlistError> {
    let metadata_path = dir.join(PACKAGE_METADATA_FILE);
    if !metadata_path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&metadata_path).map_err(|e| CutlistError::Plugin {
        package: dir.display().to_string(),
        message: format!("cannot read {}: {e}", metadata_path.display()),
        source: Some(Box::new(e)),
    })?;
    parse_package_metadata(&content, dir, group).map(Some)
}

/// Scans package roots in order, and each root's directories by name.
///
/// Roots that do not exist are skipped; discovery is best-effort at the
/// directory level. Broken metadata in a directory that is a package is an
/// error.
pub fn discover_packages(
    roots: &[PathBuf],
    group: &str,
) -> Result<Vec<InstalledPackage>, CutlistError> {
    let mut packages = Vec::new();

    for root in roots {
        let entries = match std::fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(root = %root.display(), error = %e, "skipping package root");
                continue;
            }
        };

        let mut dirs: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        for dir in dirs {
            let location = crate::path_set::absolute_normalized(&dir);
            match read_package(&location, group)? {
                Some(package) => {
                    debug!(
                        package = %package.name,
                        location = %package.location.display(),
                        entry_points = package.entry_points.len(),
                        "found installed package"
                    );
                    packages.push(package);
                }
                None => debug!(dir = %dir.display(), "not a package, skipping"),
            }
        }
    }

    Ok(packages)
}
