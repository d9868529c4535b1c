// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporary plugin environment for end-to-end discovery tests.

use std::io;
use std::path::{Path, PathBuf};

use cutlist_config::PluginSettings;
use serde_json::Value;
use tempfile::TempDir;

use crate::package::PackageFixture;

/// A temporary directory with a `manifests/` folder and a `packages/` root.
///
/// Everything is removed when the fixture is dropped.
pub struct PluginFixture {
    dir: TempDir,
}

impl PluginFixture {
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        std::fs::create_dir_all(dir.path().join("manifests"))?;
        std::fs::create_dir_all(dir.path().join("packages"))?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn manifests_dir(&self) -> PathBuf {
        self.dir.path().join("manifests")
    }

    /// The package root that installed packages are written under.
    pub fn package_root(&self) -> PathBuf {
        self.dir.path().join("packages")
    }

    /// Writes `manifests/<file_name>` and returns its absolute path.
    pub fn write_manifest(&self, file_name: &str, manifest: &Value) -> io::Result<PathBuf> {
        let content = serde_json::to_string_pretty(manifest).map_err(io::Error::other)?;
        self.write_manifest_raw(file_name, &content)
    }

    /// Writes `manifests/<file_name>` with arbitrary content.
    pub fn write_manifest_raw(&self, file_name: &str, content: &str) -> io::Result<PathBuf> {
        let path = self.manifests_dir().join(file_name);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Installs a package under the package root.
    pub fn install(&self, package: &PackageFixture) -> io::Result<PathBuf> {
        package.write_to(&self.package_root())
    }

    /// Settings that scan only this fixture's package root.
    pub fn settings(&self) -> PluginSettings {
        PluginSettings {
            package_path: Some(self.package_root().display().to_string()),
            ..PluginSettings::default()
        }
    }

    /// Settings with `CUTLIST_PLUGIN_MANIFEST_PATH`-style entries.
    pub fn settings_with_manifests(&self, paths: &[&Path]) -> PluginSettings {
        let joined = std::env::join_paths(paths)
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        PluginSettings {
            manifest_path: Some(joined),
            ..self.settings()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_lays_out_directories() {
        let fixture = PluginFixture::new().unwrap();
        assert!(fixture.manifests_dir().is_dir());
        assert!(fixture.package_root().is_dir());

        let path = fixture
            .write_manifest("a.json", &crate::adapters_manifest(&["a"]))
            .unwrap();
        assert!(path.is_absolute());
        assert!(path.is_file());
    }

    #[test]
    fn settings_point_at_fixture() {
        let fixture = PluginFixture::new().unwrap();
        let settings = fixture.settings();
        assert_eq!(settings.package_roots(), vec![fixture.package_root()]);
        assert!(!settings.disable_package_plugins);
    }
}
