// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::CutlistConfig;

/// Log levels accepted by `log.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &CutlistConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.plugins.entry_point_group.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "plugins.entry_point_group must not be empty".to_string(),
        });
    }

    for (index, path) in config.plugins.manifests.iter().enumerate() {
        if path.as_os_str().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("plugins.manifests[{index}] must not be empty"),
            });
        }
    }

    if let Some(builtin) = &config.plugins.builtin_manifest {
        if builtin.as_os_str().is_empty() {
            errors.push(ConfigError::Validation {
                message: "plugins.builtin_manifest must not be empty when set".to_string(),
            });
        }
    }

    let level = config.log.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of: {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
