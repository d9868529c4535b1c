// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Table of manifest generators keyed by entry point target.
//!
//! A package entry point `cutlist_mockplugin` is satisfied by a generator
//! registered under `cutlist_mockplugin`; an entry point
//! `cutlist_mockplugin:plugin_manifest` needs one registered under exactly
//! that string.

use std::collections::HashMap;
use std::sync::Arc;

use cutlist_core::{BoxError, ManifestGenerator};

#[derive(Clone, Default)]
pub struct GeneratorTable {
    entries: HashMap<String, Arc<dyn ManifestGenerator>>,
}

impl GeneratorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a generator, replacing any previous one under `target`.
    pub fn register(&mut self, target: impl Into<String>, generator: Arc<dyn ManifestGenerator>) {
        self.entries.insert(target.into(), generator);
    }

    /// Registers a closure as a generator.
    pub fn register_fn<F>(&mut self, target: impl Into<String>, generator: F)
    where
        F: Fn() -> Result<serde_json::Value, BoxError> + Send + Sync + 'static,
    {
        self.register(target, Arc::new(generator));
    }

    pub fn get(&self, target: &str) -> Option<Arc<dyn ManifestGenerator>> {
        self.entries.get(target).cloned()
    }

    pub fn contains(&self, target: &str) -> bool {
        self.entries.contains_key(target)
    }

    /// Registered targets, sorted.
    pub fn targets(&self) -> Vec<&str> {
        let mut targets: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        targets.sort_unstable();
        targets
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for GeneratorTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorTable")
            .field("targets", &self.targets())
            .finish()
    }
}
