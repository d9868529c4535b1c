// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for Cutlist plugin discovery.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), a system/user/local file hierarchy,
//! `CUTLIST_*` environment variable overrides, and miette diagnostics
//! with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use cutlist_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("entry point group: {}", config.plugins.entry_point_group);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use cutlist_core::CutlistError;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{
    DISABLE_PACKAGE_PLUGINS_ENV, MANIFEST_PATH_ENV, PACKAGE_PATH_ENV, load_config,
    load_config_from_env, load_config_from_path, load_config_from_str,
};
pub use model::{CutlistConfig, LogConfig, PluginSettings};

/// Load configuration from the file hierarchy and validate it.
///
/// On a Figment error the TOML sources are re-read so unknown keys can be
/// pointed at in the rendered diagnostic.
pub fn load_and_validate() -> Result<CutlistConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &collect_toml_sources(),
        )),
    }
}

/// Load configuration from a specific TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<CutlistConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Plugin settings from the full hierarchy, as the manifest registry reads them.
pub fn load_plugin_settings() -> Result<PluginSettings, CutlistError> {
    settings_from(loader::load_config())
}

/// Plugin settings from defaults and `CUTLIST_*` variables only.
pub fn load_plugin_settings_from_env() -> Result<PluginSettings, CutlistError> {
    settings_from(loader::load_config_from_env())
}

fn settings_from(
    loaded: Result<CutlistConfig, figment::Error>,
) -> Result<PluginSettings, CutlistError> {
    let config = loaded.map_err(|e| CutlistError::Config(e.to_string()))?;
    validation::validate_config(&config).map_err(|errors| {
        let joined = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        CutlistError::Config(joined)
    })?;
    Ok(config.plugins)
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut candidates = vec![std::path::PathBuf::from(loader::SYSTEM_CONFIG_PATH)];
    candidates.extend(loader::user_config_path());
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(loader::LOCAL_CONFIG_FILE));
    }

    candidates
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            Some((path.display().to_string(), content))
        })
        .collect()
}
