// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builder for installed package directories.

use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

/// One package directory under a package root.
///
/// Entry points are written to `cutlist-package.toml` in insertion order;
/// static manifests land at `<module path>/plugin_manifest.json`.
#[derive(Debug, Clone)]
pub struct PackageFixture {
    dir_name: String,
    name: String,
    version: Option<String>,
    group: String,
    entry_points: Vec<(String, String)>,
    static_manifests: Vec<(String, Value)>,
    raw_metadata: Option<String>,
}

impl PackageFixture {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            dir_name: name.replace('-', "_"),
            name,
            version: Some("0.1.0".to_string()),
            group: "cutlist.plugins".to_string(),
            entry_points: Vec::new(),
            static_manifests: Vec::new(),
            raw_metadata: None,
        }
    }

    /// Directory name under the package root (defaults to the package name
    /// with `-` replaced by `_`).
    pub fn dir_name(mut self, dir_name: impl Into<String>) -> Self {
        self.dir_name = dir_name.into();
        self
    }

    pub fn version(mut self, version: Option<&str>) -> Self {
        self.version = version.map(str::to_string);
        self
    }

    /// Entry point group the entries are written under.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Adds an entry point whose value is `module` or `module:callable`.
    pub fn entry_point(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.entry_points.push((name.into(), value.into()));
        self
    }

    /// Bundles a static `plugin_manifest.json` for a dotted module path.
    pub fn static_manifest(mut self, module: impl Into<String>, manifest: Value) -> Self {
        self.static_manifests.push((module.into(), manifest));
        self
    }

    /// Writes this text as the metadata file instead of generating it.
    pub fn raw_metadata(mut self, content: impl Into<String>) -> Self {
        self.raw_metadata = Some(content.into());
        self
    }

    /// Creates the package under `root` and returns its directory.
    pub fn write_to(&self, root: &Path) -> io::Result<PathBuf> {
        let location = root.join(&self.dir_name);
        std::fs::create_dir_all(&location)?;
        std::fs::write(location.join("cutlist-package.toml"), self.metadata())?;

        for (module, manifest) in &self.static_manifests {
            let module_dir = module
                .split('.')
                .fold(location.clone(), |dir, segment| dir.join(segment));
            std::fs::create_dir_all(&module_dir)?;
            let content = serde_json::to_string_pretty(manifest).map_err(io::Error::other)?;
            std::fs::write(module_dir.join("plugin_manifest.json"), content)?;
        }

        tracing::debug!(package = %self.name, location = %location.display(), "wrote package fixture");
        Ok(location)
    }

    fn metadata(&self) -> String {
        if let Some(raw) = &self.raw_metadata {
            return raw.clone();
        }

        let mut toml = format!("[package]\nname = \"{}\"\n", self.name);
        if let Some(version) = &self.version {
            toml.push_str(&format!("version = \"{version}\"\n"));
        }
        if !self.entry_points.is_empty() {
            toml.push_str(&format!("\n[entry-points.\"{}\"]\n", self.group));
            for (name, value) in &self.entry_points {
                toml.push_str(&format!("{name} = \"{value}\"\n"));
            }
        }
        toml
    }
}
