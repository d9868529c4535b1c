// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the hierarchy `./cutlist.toml` > `~/.config/cutlist/cutlist.toml`
//! > `/etc/cutlist/cutlist.toml`, with environment variable overrides.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CutlistConfig;

/// Path-list variable naming extra manifest files.
pub const MANIFEST_PATH_ENV: &str = "CUTLIST_PLUGIN_MANIFEST_PATH";

/// Flag variable that disables installed-package discovery when truthy.
pub const DISABLE_PACKAGE_PLUGINS_ENV: &str = "CUTLIST_DISABLE_PACKAGE_PLUGINS";

/// Path-list variable naming installed package roots.
pub const PACKAGE_PATH_ENV: &str = "CUTLIST_PACKAGE_PATH";

/// Log level override for the CLI.
pub const LOG_LEVEL_ENV: &str = "CUTLIST_LOG_LEVEL";

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/cutlist/cutlist.toml";

/// Config file looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "cutlist.toml";

/// Per-user config file: `<config dir>/cutlist/cutlist.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cutlist").join("cutlist.toml"))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/cutlist/cutlist.toml` (system-wide)
/// 3. `~/.config/cutlist/cutlist.toml` (user config)
/// 4. `./cutlist.toml` (local directory)
/// 5. `CUTLIST_*` environment variables
pub fn load_config() -> Result<CutlistConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<CutlistConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CutlistConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CutlistConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CutlistConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Load configuration from compiled defaults and environment variables only.
///
/// Hosts that never read config files (and tests) use this so that a stray
/// `cutlist.toml` cannot change discovery.
pub fn load_config_from_env() -> Result<CutlistConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CutlistConfig::default()))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(CutlistConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider.
///
/// Only the known variables are read, and each is mapped explicitly to its
/// dotted key: `CUTLIST_PLUGIN_MANIFEST_PATH` becomes
/// `plugins.manifest_path`, not `plugin.manifest.path`.
fn env_provider() -> Env {
    Env::prefixed("CUTLIST_")
        .only(&[
            "plugin_manifest_path",
            "disable_package_plugins",
            "package_path",
            "log_level",
        ])
        .map(|key| {
            // `key` keeps the variable's original case; figment lowercases later.
            match key.as_str().to_ascii_lowercase().as_str() {
                "plugin_manifest_path" => "plugins.manifest_path".into(),
                "disable_package_plugins" => "plugins.disable_package_plugins".into(),
                "package_path" => "plugins.package_path".into(),
                "log_level" => "log.level".into(),
                other => other.to_string().into(),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn each_variable_maps_to_its_field() {
        Jail::expect_with(|jail| {
            jail.set_env(MANIFEST_PATH_ENV, "/srv/a.json");
            jail.set_env(DISABLE_PACKAGE_PLUGINS_ENV, "true");
            jail.set_env(PACKAGE_PATH_ENV, "/srv/packages");
            jail.set_env(LOG_LEVEL_ENV, "debug");

            let config = load_config_from_env()?;
            assert_eq!(config.plugins.manifest_path.as_deref(), Some("/srv/a.json"));
            assert!(config.plugins.disable_package_plugins);
            assert_eq!(config.plugins.package_path.as_deref(), Some("/srv/packages"));
            assert_eq!(config.log.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn package_path_alone_is_accepted() {
        Jail::expect_with(|jail| {
            jail.set_env(PACKAGE_PATH_ENV, "/srv/packages");
            let config = load_config_from_env()?;
            assert_eq!(config.plugins.package_path.as_deref(), Some("/srv/packages"));
            assert!(config.plugins.manifest_path.is_none());
            Ok(())
        });
    }

    #[test]
    fn numeric_looking_path_stays_a_string() {
        Jail::expect_with(|jail| {
            jail.set_env(MANIFEST_PATH_ENV, "2024");
            jail.set_env(PACKAGE_PATH_ENV, "true");
            let config = load_config_from_env()?;
            assert_eq!(config.plugins.manifest_path.as_deref(), Some("2024"));
            assert_eq!(config.plugins.package_path.as_deref(), Some("true"));
            Ok(())
        });
    }
}
