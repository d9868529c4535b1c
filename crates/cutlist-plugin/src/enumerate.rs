// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Enumeration of every manifest source for one load cycle.
//!
//! Sources come out in ascending precedence:
//! 1. the built-in manifest
//! 2. files from `plugins.manifests`
//! 3. files from `CUTLIST_PLUGIN_MANIFEST_PATH`
//! 4. installed package entry points, unless package discovery is disabled
//!
//! Steps 2 and 3 and the static manifests of step 4 share one [`PathSet`],
//! so a file is enumerated at most once, at its first position.

use cutlist_config::PluginSettings;
use cutlist_core::{CutlistError, SourceOrigin};
use tracing::debug;

use crate::generators::GeneratorTable;
use crate::package::{EntryPoint, InstalledPackage, STATIC_MANIFEST_FILE, discover_packages};
use crate::path_set::{PathSet, absolute_normalized};
use crate::source::ManifestSource;

/// Produces the ordered source list from settings read for this load.
pub struct SourceEnumerator<'a> {
    settings: &'a PluginSettings,
    generators: &'a GeneratorTable,
}

impl<'a> SourceEnumerator<'a> {
    pub fn new(settings: &'a PluginSettings, generators: &'a GeneratorTable) -> Self {
        Self {
            settings,
            generators,
        }
    }

    pub fn enumerate(&self) -> Result<Vec<ManifestSource>, CutlistError> {
        let mut sources = Vec::new();
        let mut seen = PathSet::new();

        let builtin_path = self.settings.builtin_manifest.as_deref().map(|path| {
            seen.insert(path);
            absolute_normalized(path)
        });
        sources.push(ManifestSource::Builtin { path: builtin_path });

        for path in &self.settings.manifests {
            if let Some(path) = seen.insert(path) {
                sources.push(ManifestSource::File {
                    path,
                    origin: SourceOrigin::ExplicitFile,
                });
            }
        }

        if let Some(list) = &self.settings.manifest_path {
            for path in seen.extend_from_path_list(list) {
                sources.push(ManifestSource::File {
                    path,
                    origin: SourceOrigin::Environment,
                });
            }
        }

        if self.settings.disable_package_plugins {
            debug!("installed package discovery disabled");
        } else {
            let roots = self.settings.package_roots();
            let packages = discover_packages(&roots, &self.settings.entry_point_group)?;
            for package in &packages {
                for entry_point in &package.entry_points {
                    if let Some(source) = self.entry_point_source(package, entry_point, &mut seen)? {
                        sources.push(source);
                    }
                }
            }
        }

        debug!(count = sources.len(), "enumerated manifest sources");
        Ok(sources)
    }

    /// Decides how an entry point supplies its manifest.
    ///
    /// `module:callable` requires a registered generator. A bare `module`
    /// uses a generator registered under the module name if there is one,
    /// and otherwise the module's `plugin_manifest.json`. Returns `None`
    /// when the static file was already enumerated.
    fn entry_point_source(
        &self,
        package: &InstalledPackage,
        entry_point: &EntryPoint,
        seen: &mut PathSet,
    ) -> Result<Option<ManifestSource>, CutlistError> {
        let target = entry_point.target();
        let module_dir = entry_point.module_dir(&package.location);

        if entry_point.callable.is_some() || self.generators.contains(&target) {
            if !self.generators.contains(&target) {
                return Err(CutlistError::plugin(
                    &package.name,
                    format!(
                        "entry point `{}` declares callable `{target}` but no generator is registered",
                        entry_point.name
                    ),
                ));
            }
            return Ok(Some(ManifestSource::Generator {
                package: package.name.clone(),
                entry_point: entry_point.name.clone(),
                target,
                module_dir,
            }));
        }

        let path = module_dir.join(STATIC_MANIFEST_FILE);
        if !path.is_file() {
            return Err(CutlistError::plugin(
                &package.name,
                format!(
                    "entry point `{}` exposes neither a registered generator `{target}` nor {}",
                    entry_point.name,
                    path.display()
                ),
            ));
        }

        match seen.insert(&path) {
            Some(path) => Ok(Some(ManifestSource::StaticFile {
                package: package.name.clone(),
                entry_point: entry_point.name.clone(),
                path,
            })),
            None => {
                debug!(
                    package = %package.name,
                    path = %path.display(),
                    "static manifest already enumerated, skipping"
                );
                Ok(None)
            }
        }
    }
}
