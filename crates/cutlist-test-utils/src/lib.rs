// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Cutlist integration tests.
//!
//! Builds throwaway manifest files and installed packages on disk so the
//! discovery pipeline can be exercised without touching the real
//! configuration or data directories.
//!
//! # Components
//!
//! - [`PluginFixture`] - temporary directory holding manifests and package roots
//! - [`PackageFixture`] - builder for one installed package
//! - [`mock_manifest`] - manifest JSON with one adapter and one media linker

pub mod fixture;
pub mod package;

pub use fixture::PluginFixture;
pub use package::PackageFixture;

use serde_json::{Value, json};

/// A manifest declaring one adapter and one media linker.
pub fn mock_manifest(adapter: &str, media_linker: &str) -> Value {
    json!({
        "adapters": [
            {
                "name": adapter,
                "execution_scope": "in process",
                "filepath": format!("{adapter}.rs"),
                "suffixes": ["mock"]
            }
        ],
        "media_linkers": [
            {
                "name": media_linker,
                "execution_scope": "in process",
                "filepath": format!("{media_linker}.rs")
            }
        ]
    })
}

/// A manifest declaring only adapters with the given names.
pub fn adapters_manifest(names: &[&str]) -> Value {
    let adapters: Vec<Value> = names.iter().map(|name| json!({ "name": name })).collect();
    json!({ "adapters": adapters })
}
