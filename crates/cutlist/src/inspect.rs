// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `cutlist list`, `cutlist sources` and `cutlist which`.
//!
//! All three read the process-wide manifest registry, so discovery runs
//! once per invocation.

use std::fmt::Write as _;
use std::path::Path;

use cutlist_core::{CutlistError, ExecutionScope, PluginKind, SourceOrigin};
use cutlist_plugin::{AggregateManifest, load_manifest};
use serde::Serialize;

/// One row of `cutlist list --json`.
#[derive(Debug, Serialize)]
pub struct PluginRow {
    pub kind: PluginKind,
    pub name: String,
    pub execution_scope: ExecutionScope,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suffixes: Vec<String>,
    pub origin: SourceOrigin,
    pub source: String,
}

/// Flattens adapters then media linkers into display rows.
pub fn plugin_rows(manifest: &AggregateManifest) -> Vec<PluginRow> {
    let adapters = manifest.adapters.iter().map(|a| PluginRow {
        kind: PluginKind::Adapter,
        name: a.name.clone(),
        execution_scope: a.execution_scope,
        suffixes: a.suffixes.clone(),
        origin: a.source.origin(),
        source: a.source.to_string(),
    });
    let linkers = manifest.media_linkers.iter().map(|l| PluginRow {
        kind: PluginKind::MediaLinker,
        name: l.name.clone(),
        execution_scope: l.execution_scope,
        suffixes: Vec::new(),
        origin: l.source.origin(),
        source: l.source.to_string(),
    });
    adapters.chain(linkers).collect()
}

/// Run `cutlist list`.
pub fn run_list(json: bool, use_color: bool) -> Result<(), CutlistError> {
    let manifest = load_manifest()?;
    let rows = plugin_rows(&manifest);

    if json {
        let out = serde_json::to_string_pretty(&rows)
            .map_err(|e| CutlistError::Internal(format!("failed to encode JSON: {e}")))?;
        println!("{out}");
    } else {
        print!("{}", render_list(&rows, use_color));
    }
    Ok(())
}

fn render_list(rows: &[PluginRow], use_color: bool) -> String {
    let mut out = String::new();
    for kind in [PluginKind::Adapter, PluginKind::MediaLinker] {
        let section: Vec<&PluginRow> = rows.iter().filter(|r| r.kind == kind).collect();
        let title = match kind {
            PluginKind::Adapter => "Adapters",
            PluginKind::MediaLinker => "Media linkers",
        };

        let _ = writeln!(out);
        if use_color {
            use colored::Colorize;
            let _ = writeln!(out, "  {} ({})", title.bold(), section.len());
        } else {
            let _ = writeln!(out, "  {title} ({})", section.len());
        }
        let _ = writeln!(out, "  {}", "-".repeat(35));

        if section.is_empty() {
            let _ = writeln!(out, "    (none)");
        }
        let width = section.iter().map(|r| r.name.len()).max().unwrap_or(0);
        for row in section {
            let suffixes = if row.suffixes.is_empty() {
                String::new()
            } else {
                format!(" [{}]", row.suffixes.join(", "))
            };
            let origin = if use_color {
                use colored::Colorize;
                row.origin.to_string().dimmed().to_string()
            } else {
                row.origin.to_string()
            };
            let _ = writeln!(out, "    {:<width$}  {origin}{suffixes}", row.name);
        }
    }
    let _ = writeln!(out);
    out
}

/// Run `cutlist sources`.
pub fn run_sources() -> Result<(), CutlistError> {
    let manifest = load_manifest()?;
    print!("{}", render_sources(&manifest));
    Ok(())
}

fn render_sources(manifest: &AggregateManifest) -> String {
    let mut out = String::new();
    for path in &manifest.source_files {
        let _ = writeln!(out, "{}", path.display());
    }
    out
}

/// Run `cutlist which <target>`.
///
/// Returns `false` when no adapter handles `target`; that is a lookup miss,
/// not an error in discovery.
pub fn run_which(target: &str, use_color: bool) -> Result<bool, CutlistError> {
    let manifest = load_manifest()?;
    match find_adapter(&manifest, target) {
        Some(line) => {
            if use_color {
                use colored::Colorize;
                println!("{}", line.green());
            } else {
                println!("{line}");
            }
            Ok(true)
        }
        None => {
            eprintln!("cutlist: no adapter registered for `{target}`");
            Ok(false)
        }
    }
}

/// Resolves a bare suffix or a file name to `name (source)`.
fn find_adapter(manifest: &AggregateManifest, target: &str) -> Option<String> {
    let adapter = if target.contains('.') && !target.starts_with('.') {
        manifest.adapter_for_path(Path::new(target))
    } else {
        manifest.adapter_for_suffix(target)
    }?;
    Some(format!("{} ({})", adapter.name, adapter.source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutlist_config::PluginSettings;
    use cutlist_plugin::{GeneratorTable, build_aggregate};

    fn builtin_only() -> AggregateManifest {
        let settings = PluginSettings {
            disable_package_plugins: true,
            ..PluginSettings::default()
        };
        build_aggregate(&settings, &GeneratorTable::new()).unwrap()
    }

    #[test]
    fn rows_list_adapters_before_linkers() {
        let manifest = builtin_only();
        let rows = plugin_rows(&manifest);
        assert_eq!(rows.len(), manifest.adapters.len() + manifest.media_linkers.len());
        assert_eq!(rows[0].name, "cutlist_json");
        assert!(rows.iter().all(|r| r.origin == SourceOrigin::BuiltIn));
    }

    #[test]
    fn rows_serialize_with_kind_and_origin() {
        let rows = plugin_rows(&builtin_only());
        let value = serde_json::to_value(&rows).unwrap();
        assert_eq!(value[0]["kind"], "adapter");
        assert_eq!(value[0]["origin"], "built-in");
        assert_eq!(value[0]["execution_scope"], "in process");
    }

    #[test]
    fn plain_list_has_no_escape_codes() {
        let rows = plugin_rows(&builtin_only());
        let out = render_list(&rows, false);
        assert!(out.contains("Adapters (4)"));
        assert!(out.contains("Media linkers (0)"));
        assert!(out.contains("(none)"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn builtin_only_has_no_source_files() {
        assert_eq!(render_sources(&builtin_only()), "");
    }

    #[test]
    fn which_accepts_suffix_or_file_name() {
        let manifest = builtin_only();
        let by_suffix = find_adapter(&manifest, "edl").unwrap();
        assert!(by_suffix.starts_with("cmx_3600 "));
        assert_eq!(find_adapter(&manifest, ".EDL"), Some(by_suffix.clone()));
        assert_eq!(find_adapter(&manifest, "reel1.edl"), Some(by_suffix));
        assert!(find_adapter(&manifest, "nothing").is_none());
    }
}
