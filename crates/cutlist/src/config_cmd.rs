// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `cutlist config check` and `cutlist config show`.
//!
//! Configuration has already been loaded and validated by the time these
//! run; a broken configuration is rendered as diagnostics in `main` and
//! never reaches here.

use cutlist_config::CutlistConfig;
use cutlist_core::CutlistError;

/// Run `cutlist config check`.
pub fn run_check(config: &CutlistConfig, use_color: bool) -> Result<(), CutlistError> {
    if use_color {
        use colored::Colorize;
        println!("{} configuration is valid", "✓".green());
    } else {
        println!("[OK] configuration is valid");
    }
    print!("{}", summarize(config));
    Ok(())
}

/// Run `cutlist config show`.
pub fn run_show(config: &CutlistConfig) -> Result<(), CutlistError> {
    let out = toml::to_string_pretty(config)
        .map_err(|e| CutlistError::Internal(format!("failed to encode TOML: {e}")))?;
    print!("{out}");
    Ok(())
}

fn summarize(config: &CutlistConfig) -> String {
    let plugins = &config.plugins;
    let roots = plugins
        .package_roots()
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>();
    let packages = if plugins.disable_package_plugins {
        "disabled".to_string()
    } else if roots.is_empty() {
        "no package roots".to_string()
    } else {
        roots.join(", ")
    };

    format!(
        "    explicit manifests: {}\n    manifest path:      {}\n    packages:           {packages}\n    entry point group:  {}\n    log level:          {}\n",
        plugins.manifests.len(),
        plugins.manifest_path.as_deref().unwrap_or("(unset)"),
        plugins.entry_point_group,
        config.log.level,
    )
}
