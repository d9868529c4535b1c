// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The built-in manifest compiled into the binary.
//!
//! It registers the adapters that ship with Cutlist and declares the
//! standard hook triggers so that hook scripts from other manifests merge
//! into known lists.

use std::path::Path;

use cutlist_core::CutlistError;

use crate::manifest::{Manifest, parse_error, parse_manifest_str};
use crate::source::ManifestSource;

/// Raw JSON of the built-in manifest.
pub const BUILTIN_MANIFEST_JSON: &str = include_str!("builtin.plugin_manifest.json");

/// Placeholder path used in errors about the embedded manifest.
pub const BUILTIN_MANIFEST_LABEL: &str = "<builtin>";

/// Parses the embedded built-in manifest.
///
/// It is not backed by a file, so it contributes no source files.
pub fn builtin_manifest() -> Result<Manifest, CutlistError> {
    parse_manifest_str(
        BUILTIN_MANIFEST_JSON,
        None,
        ManifestSource::Builtin { path: None },
    )
    .map_err(|e| parse_error(Path::new(BUILTIN_MANIFEST_LABEL), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_manifest_parses() {
        let manifest = builtin_manifest().unwrap();
        let names: Vec<&str> = manifest.adapters.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["cutlist_json", "cutlist_bundle", "cmx_3600", "fcp_xml"]);
        assert!(manifest.media_linkers.is_empty());
        assert!(manifest.source_files.is_empty());
    }

    #[test]
    fn builtin_declares_hook_triggers() {
        let manifest = builtin_manifest().unwrap();
        let hooks = manifest.extensions["hooks"].as_object().unwrap();
        assert!(hooks.contains_key("post_adapter_read"));
        assert!(hooks.contains_key("pre_adapter_write"));
    }

    #[test]
    fn builtin_filepaths_stay_relative() {
        let manifest = builtin_manifest().unwrap();
        assert!(
            manifest
                .adapters
                .iter()
                .all(|a| a.filepath.as_ref().is_some_and(|p| p.is_relative()))
        );
    }
}
