// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported instead of silently ignored.

use std::fmt;
use std::path::PathBuf;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// Default entry point group scanned in installed package metadata.
pub const DEFAULT_ENTRY_POINT_GROUP: &str = "cutlist.plugins";

/// Top-level Cutlist configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CutlistConfig {
    /// Plugin manifest discovery settings.
    #[serde(default)]
    pub plugins: PluginSettings,

    /// Logging settings for the CLI.
    #[serde(default)]
    pub log: LogConfig,
}

/// Settings read by the manifest pipeline on every load.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginSettings {
    /// Manifest files listed explicitly in a config file.
    #[serde(default)]
    pub manifests: Vec<PathBuf>,

    /// Path-list string of extra manifest files
    /// (`CUTLIST_PLUGIN_MANIFEST_PATH`).
    #[serde(default, deserialize_with = "path_list")]
    pub manifest_path: Option<String>,

    /// Skip installed-package discovery entirely
    /// (`CUTLIST_DISABLE_PACKAGE_PLUGINS`).
    #[serde(default, deserialize_with = "truthy")]
    pub disable_package_plugins: bool,

    /// Path-list string of directories holding installed packages
    /// (`CUTLIST_PACKAGE_PATH`). Unset means the per-user data directory.
    #[serde(default, deserialize_with = "path_list")]
    pub package_path: Option<String>,

    /// Manifest file used instead of the embedded built-in manifest.
    #[serde(default)]
    pub builtin_manifest: Option<PathBuf>,

    /// Entry point group read from package metadata.
    #[serde(default = "default_entry_point_group")]
    pub entry_point_group: String,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            manifests: Vec::new(),
            manifest_path: None,
            disable_package_plugins: false,
            package_path: None,
            builtin_manifest: None,
            entry_point_group: default_entry_point_group(),
        }
    }
}

impl PluginSettings {
    /// Directories scanned for installed packages.
    ///
    /// An explicit `package_path` replaces the default location rather than
    /// extending it.
    pub fn package_roots(&self) -> Vec<PathBuf> {
        match &self.package_path {
            Some(list) => std::env::split_paths(list)
                .filter(|p| !p.as_os_str().is_empty())
                .collect(),
            None => default_package_root().into_iter().collect(),
        }
    }
}

/// Default directory for installed packages: `<data dir>/cutlist/packages`.
pub fn default_package_root() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("cutlist").join("packages"))
}

fn default_entry_point_group() -> String {
    DEFAULT_ENTRY_POINT_GROUP.to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Interprets booleans, integers, and the usual truthy/falsy words.
///
/// Environment variables arrive as strings or numbers, so `1`, `yes` and
/// `on` count as true, while an empty string, `0`, `no` and `off` count as
/// false.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct TruthyVisitor;

    impl Visitor<'_> for TruthyVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean, 0/1, or one of true/false/yes/no/on/off")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            match v.trim().to_ascii_lowercase().as_str() {
                "" | "0" | "false" | "no" | "off" => Ok(false),
                "1" | "true" | "yes" | "on" => Ok(true),
                other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
            }
        }
    }

    deserializer.deserialize_any(TruthyVisitor)
}

/// Reads a path-list value back into its raw text.
///
/// Environment values are typed before deserialization, so a path list such
/// as `2024` or `true` arrives as a number or boolean.
fn path_list<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PathListVisitor;

    impl<'de> Visitor<'de> for PathListVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a path list string")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, inner: D2) -> Result<Self::Value, D2::Error> {
            inner.deserialize_any(self)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_char<E: de::Error>(self, v: char) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }
    }

    deserializer.deserialize_option(PathListVisitor)
}
