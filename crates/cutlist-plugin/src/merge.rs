// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Folding per-source manifests into one aggregate.
//!
//! Manifests are folded in enumeration order and a later record replaces
//! an earlier one with the same name, keeping the earlier record's
//! position. This lets an environment or package manifest override a
//! built-in adapter without reordering the list.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use cutlist_core::PluginKind;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::manifest::{Adapter, Manifest, MediaLinker, NamedPlugin};
use crate::source::ManifestSource;

/// The merged result of one load cycle. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateManifest {
    pub adapters: Vec<Adapter>,
    pub media_linkers: Vec<MediaLinker>,
    /// Every contributing file, in order, each listed once.
    pub source_files: Vec<PathBuf>,
    /// Merged extension categories (`hooks`, `hook_scripts`, `schemadefs`, ...).
    pub extensions: BTreeMap<String, Value>,
}

impl AggregateManifest {
    pub fn adapter(&self, name: &str) -> Option<&Adapter> {
        self.adapters.iter().find(|a| a.name == name)
    }

    pub fn media_linker(&self, name: &str) -> Option<&MediaLinker> {
        self.media_linkers.iter().find(|l| l.name == name)
    }

    /// First adapter (in merged order) declaring `suffix`, compared case-insensitively.
    ///
    /// A leading dot on `suffix` is ignored.
    pub fn adapter_for_suffix(&self, suffix: &str) -> Option<&Adapter> {
        let suffix = suffix.trim_start_matches('.');
        self.adapters
            .iter()
            .find(|a| a.suffixes.iter().any(|s| s.eq_ignore_ascii_case(suffix)))
    }

    /// Adapter for a file path, chosen by its extension.
    pub fn adapter_for_path(&self, path: &Path) -> Option<&Adapter> {
        let extension = path.extension()?.to_str()?;
        self.adapter_for_suffix(extension)
    }

    pub fn adapter_names(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn media_linker_names(&self) -> Vec<&str> {
        self.media_linkers.iter().map(|l| l.name.as_str()).collect()
    }

    /// Raw content of an extension category.
    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }

    /// The source that contributed the winning record for `name`.
    pub fn provenance(&self, kind: PluginKind, name: &str) -> Option<&ManifestSource> {
        match kind {
            PluginKind::Adapter => self.adapter(name).map(|a| &a.source),
            PluginKind::MediaLinker => self.media_linker(name).map(|l| &l.source),
        }
    }
}

/// Merges manifests given in enumeration order. Pure and deterministic.
pub fn merge_manifests<'a, I>(manifests: I) -> AggregateManifest
where
    I: IntoIterator<Item = &'a Manifest>,
{
    let mut adapters = NamedList::default();
    let mut media_linkers = NamedList::default();
    let mut source_files = Vec::new();
    let mut seen_files = HashSet::new();
    let mut extensions = BTreeMap::new();

    for manifest in manifests {
        adapters.extend(&manifest.adapters);
        media_linkers.extend(&manifest.media_linkers);

        for path in &manifest.source_files {
            if seen_files.insert(path.clone()) {
                source_files.push(path.clone());
            }
        }

        for (key, value) in &manifest.extensions {
            match extensions.get_mut(key) {
                Some(existing) => merge_extension(existing, value),
                None => {
                    extensions.insert(key.clone(), value.clone());
                }
            }
        }
    }

    AggregateManifest {
        adapters: adapters.items,
        media_linkers: media_linkers.items,
        source_files,
        extensions,
    }
}

/// Records kept unique by name; a repeated name overwrites in place.
struct NamedList<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for NamedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: NamedPlugin + Clone> NamedList<T> {
    fn extend(&mut self, incoming: &[T]) {
        for record in incoming {
            match self.index.get(record.name()) {
                Some(&slot) => {
                    let kind = T::KIND;
                    debug!(
                        %kind,
                        name = record.name(),
                        replaced = %self.items[slot].source(),
                        by = %record.source(),
                        "plugin overridden by later source"
                    );
                    self.items[slot] = record.clone();
                }
                None => {
                    self.index.insert(record.name().to_string(), self.items.len());
                    self.items.push(record.clone());
                }
            }
        }
    }
}

/// Arrays concatenate, objects merge per key, anything else is replaced.
fn merge_extension(existing: &mut Value, incoming: &Value) {
    match (existing, incoming) {
        (Value::Array(into), Value::Array(from)) => into.extend(from.iter().cloned()),
        (Value::Object(into), Value::Object(from)) => {
            for (key, value) in from {
                match into.get_mut(key) {
                    Some(slot) => merge_extension(slot, value),
                    None => {
                        into.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}
