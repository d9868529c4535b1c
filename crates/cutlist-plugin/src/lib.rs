// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest discovery, parsing, merging, and caching.
//!
//! Adapters and media linkers are registered by plugin manifests. A load
//! cycle enumerates every manifest source (the built-in manifest, files
//! named by configuration or `CUTLIST_PLUGIN_MANIFEST_PATH`, and installed
//! package entry points), parses each one, and folds them into a single
//! [`AggregateManifest`] where later sources override earlier ones by name.
//! [`ManifestRegistry`] caches that aggregate until it is reloaded.

pub mod builtin;
pub mod enumerate;
pub mod generators;
pub mod manifest;
pub mod merge;
pub mod package;
pub mod path_set;
pub mod registry;
pub mod source;

pub use enumerate::SourceEnumerator;
pub use generators::GeneratorTable;
pub use manifest::{
    Adapter, Manifest, MediaLinker, NamedPlugin, ShapeError, parse_manifest_str,
    read_manifest_file,
};
pub use merge::{AggregateManifest, merge_manifests};
pub use package::{EntryPoint, InstalledPackage, discover_packages};
pub use path_set::PathSet;
pub use registry::{
    ManifestRegistry, build_aggregate, global_registry, load_manifest, reload_manifest,
};
pub use source::ManifestSource;
