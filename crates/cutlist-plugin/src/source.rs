// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manifest sources and their resolution into parsed manifests.

use std::fmt;
use std::path::{Path, PathBuf};

use cutlist_core::{CutlistError, SourceOrigin};
use serde::Serialize;
use tracing::debug;

use crate::builtin::builtin_manifest;
use crate::generators::GeneratorTable;
use crate::manifest::{Manifest, parse_manifest_value, read_manifest_file};

/// Where one manifest comes from.
///
/// Paths held here are absolute and normalized. A source never changes
/// after enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ManifestSource {
    /// The embedded manifest, or the file configured to replace it.
    Builtin { path: Option<PathBuf> },

    /// A manifest file named by configuration or the environment.
    File { path: PathBuf, origin: SourceOrigin },

    /// A package entry point backed by a registered generator.
    Generator {
        package: String,
        entry_point: String,
        target: String,
        module_dir: PathBuf,
    },

    /// A package entry point backed by `plugin_manifest.json` in its module directory.
    StaticFile {
        package: String,
        entry_point: String,
        path: PathBuf,
    },
}

impl ManifestSource {
    pub fn origin(&self) -> SourceOrigin {
        match self {
            ManifestSource::Builtin { .. } => SourceOrigin::BuiltIn,
            ManifestSource::File { origin, .. } => *origin,
            ManifestSource::Generator { .. } | ManifestSource::StaticFile { .. } => {
                SourceOrigin::EntryPoint
            }
        }
    }

    /// The manifest file behind this source, if it is file-backed.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ManifestSource::Builtin { path } => path.as_deref(),
            ManifestSource::File { path, .. } | ManifestSource::StaticFile { path, .. } => {
                Some(path.as_path())
            }
            ManifestSource::Generator { .. } => None,
        }
    }

    /// The contributing package, for entry point sources.
    pub fn package(&self) -> Option<&str> {
        match self {
            ManifestSource::Generator { package, .. }
            | ManifestSource::StaticFile { package, .. } => Some(package.as_str()),
            _ => None,
        }
    }

    /// Loads and parses the manifest this source points at.
    ///
    /// File-backed sources fail with [`CutlistError::Parse`]; package
    /// sources fail with [`CutlistError::Plugin`] naming the package.
    pub fn resolve(&self, generators: &GeneratorTable) -> Result<Manifest, CutlistError> {
        debug!(source = %self, "resolving manifest source");
        match self {
            ManifestSource::Builtin { path: None } => builtin_manifest(),
            ManifestSource::Builtin { path: Some(path) } | ManifestSource::File { path, .. } => {
                read_manifest_file(path, self.clone())
            }
            ManifestSource::StaticFile { package, path, .. } => {
                read_manifest_file(path, self.clone()).map_err(|e| e.into_plugin(package))
            }
            ManifestSource::Generator {
                package,
                target,
                module_dir,
                ..
            } => {
                let generator = generators.get(target).ok_or_else(|| {
                    CutlistError::plugin(
                        package,
                        format!("declares callable `{target}` but no generator is registered"),
                    )
                })?;
                let value = generator
                    .plugin_manifest()
                    .map_err(|e| CutlistError::Plugin {
                        package: package.clone(),
                        message: format!("generator `{target}` failed: {e}"),
                        source: Some(e),
                    })?;
                parse_manifest_value(value, Some(module_dir), self.clone()).map_err(|e| {
                    CutlistError::Plugin {
                        package: package.clone(),
                        message: format!("generator `{target}` returned a malformed manifest: {e}"),
                        source: Some(Box::new(e)),
                    }
                })
            }
        }
    }
}

impl fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestSource::Builtin { path: None } => write!(f, "built-in manifest"),
            ManifestSource::Builtin { path: Some(path) } => {
                write!(f, "built-in manifest {}", path.display())
            }
            ManifestSource::File { path, origin } => write!(f, "{origin} {}", path.display()),
            ManifestSource::Generator {
                package, target, ..
            } => write!(f, "package `{package}` generator `{target}`"),
            ManifestSource::StaticFile { package, path, .. } => {
                write!(f, "package `{package}` manifest {}", path.display())
            }
        }
    }
}
