// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cached manifest registry.
//!
//! The registry runs the discovery pipeline (enumerate, resolve, merge) at
//! most once until it is reloaded or reset. Readers get an
//! `Arc<AggregateManifest>`; a reload swaps the pointer so existing readers
//! keep the aggregate they already hold.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex, RwLock};

use arc_swap::ArcSwapOption;
use cutlist_config::PluginSettings;
use cutlist_core::{BoxError, CutlistError, ManifestGenerator, SourceOrigin};
use tracing::{debug, info};

use crate::enumerate::SourceEnumerator;
use crate::generators::GeneratorTable;
use crate::merge::{AggregateManifest, merge_manifests};

type SettingsLoader = Box<dyn Fn() -> Result<PluginSettings, CutlistError> + Send + Sync>;

/// Process-wide registry behind [`load_manifest`] and [`reload_manifest`].
static GLOBAL: LazyLock<ManifestRegistry> = LazyLock::new(ManifestRegistry::new);

/// Returns the process-wide aggregate, building it on first use.
pub fn load_manifest() -> Result<Arc<AggregateManifest>, CutlistError> {
    GLOBAL.load()
}

/// Rebuilds the process-wide aggregate from fresh configuration.
pub fn reload_manifest() -> Result<Arc<AggregateManifest>, CutlistError> {
    GLOBAL.reload()
}

/// The process-wide registry, for registering generators before first load.
pub fn global_registry() -> &'static ManifestRegistry {
    &GLOBAL
}

/// Lazily built, explicitly reloadable holder of the merged manifest.
pub struct ManifestRegistry {
    settings: SettingsLoader,
    generators: RwLock<GeneratorTable>,
    current: ArcSwapOption<AggregateManifest>,
    // Serializes pipeline runs; readers never take it on the fast path.
    rebuild: Mutex<()>,
    builds: AtomicUsize,
}

impl ManifestRegistry {
    /// Registry reading settings from the full configuration hierarchy.
    pub fn new() -> Self {
        Self::with_settings(cutlist_config::load_plugin_settings)
    }

    /// Registry reading settings from `loader` on every pipeline run.
    pub fn with_settings<F>(loader: F) -> Self
    where
        F: Fn() -> Result<PluginSettings, CutlistError> + Send + Sync + 'static,
    {
        Self {
            settings: Box::new(loader),
            generators: RwLock::new(GeneratorTable::new()),
            current: ArcSwapOption::const_empty(),
            rebuild: Mutex::new(()),
            builds: AtomicUsize::new(0),
        }
    }

    /// Replaces the generator table.
    pub fn with_generators(self, generators: GeneratorTable) -> Self {
        match self.generators.write() {
            Ok(mut table) => *table = generators,
            Err(poisoned) => *poisoned.into_inner() = generators,
        }
        self
    }

    /// Registers a generator for an entry point target.
    ///
    /// Takes effect on the next pipeline run; a loaded aggregate is not
    /// rebuilt.
    pub fn register(&self, target: impl Into<String>, generator: Arc<dyn ManifestGenerator>) {
        let target = target.into();
        debug!(target = %target, "registering manifest generator");
        match self.generators.write() {
            Ok(mut table) => table.register(target, generator),
            Err(poisoned) => poisoned.into_inner().register(target, generator),
        }
    }

    /// Registers a closure as a generator.
    pub fn register_generator<F>(&self, target: impl Into<String>, generator: F)
    where
        F: Fn() -> Result<serde_json::Value, BoxError> + Send + Sync + 'static,
    {
        self.register(target, Arc::new(generator));
    }

    /// Returns the cached aggregate, running the pipeline if unloaded.
    pub fn load(&self) -> Result<Arc<AggregateManifest>, CutlistError> {
        if let Some(current) = self.current.load_full() {
            return Ok(current);
        }

        let _guard = self.lock_rebuild();
        // Another caller may have finished a build while we waited.
        if let Some(current) = self.current.load_full() {
            return Ok(current);
        }
        self.rebuild_locked()
    }

    /// Re-runs the pipeline and replaces the cache.
    ///
    /// On failure the previous aggregate (or the unloaded state) is kept.
    pub fn reload(&self) -> Result<Arc<AggregateManifest>, CutlistError> {
        let _guard = self.lock_rebuild();
        self.rebuild_locked()
    }

    /// The cached aggregate, without triggering a load.
    pub fn current(&self) -> Option<Arc<AggregateManifest>> {
        self.current.load_full()
    }

    /// Drops the cached aggregate.
    pub fn reset(&self) {
        let _guard = self.lock_rebuild();
        self.current.store(None);
    }

    pub fn is_loaded(&self) -> bool {
        self.current.load().is_some()
    }

    /// Number of completed pipeline runs.
    pub fn load_count(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    fn lock_rebuild(&self) -> std::sync::MutexGuard<'_, ()> {
        match self.rebuild.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn rebuild_locked(&self) -> Result<Arc<AggregateManifest>, CutlistError> {
        let settings = (self.settings)()?;
        let generators = match self.generators.read() {
            Ok(table) => table.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };

        let aggregate = Arc::new(build_aggregate(&settings, &generators)?);
        self.current.store(Some(Arc::clone(&aggregate)));
        self.builds.fetch_add(1, Ordering::SeqCst);
        Ok(aggregate)
    }
}

impl Default for ManifestRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ManifestRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestRegistry")
            .field("loaded", &self.is_loaded())
            .field("load_count", &self.load_count())
            .finish()
    }
}

/// Runs enumerate, resolve and merge once, without caching.
pub fn build_aggregate(
    settings: &PluginSettings,
    generators: &GeneratorTable,
) -> Result<AggregateManifest, CutlistError> {
    let sources = SourceEnumerator::new(settings, generators).enumerate()?;
    let manifests = sources
        .iter()
        .map(|source| source.resolve(generators))
        .collect::<Result<Vec<_>, _>>()?;

    let aggregate = merge_manifests(&manifests);
    let packages = sources
        .iter()
        .filter(|s| s.origin() == SourceOrigin::EntryPoint)
        .count();
    info!(
        sources = sources.len(),
        entry_points = packages,
        adapters = aggregate.adapters.len(),
        media_linkers = aggregate.media_linkers.len(),
        source_files = aggregate.source_files.len(),
        "plugin manifests loaded"
    );
    Ok(aggregate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::AtomicBool;

    fn settings() -> PluginSettings {
        PluginSettings {
            disable_package_plugins: true,
            ..PluginSettings::default()
        }
    }

    #[test]
    fn load_is_lazy_and_cached() {
        let registry = ManifestRegistry::with_settings(|| Ok(settings()));
        assert!(!registry.is_loaded());
        assert!(registry.current().is_none());

        let first = registry.load().unwrap();
        let second = registry.load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.load_count(), 1);
        assert!(registry.is_loaded());
    }

    #[test]
    fn reload_rebuilds() {
        let registry = ManifestRegistry::with_settings(|| Ok(settings()));
        let first = registry.load().unwrap();
        let second = registry.reload().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
        assert_eq!(registry.load_count(), 2);
    }

    #[test]
    fn failed_reload_keeps_previous_cache() {
        let fail = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fail);
        let registry = ManifestRegistry::with_settings(move || {
            if flag.load(Ordering::SeqCst) {
                Err(CutlistError::Config("broken".into()))
            } else {
                Ok(settings())
            }
        });

        let before = registry.load().unwrap();
        fail.store(true, Ordering::SeqCst);
        assert!(registry.reload().is_err());
        let after = registry.load().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(registry.load_count(), 1);
    }

    #[test]
    fn failed_first_load_stays_unloaded() {
        let registry =
            ManifestRegistry::with_settings(|| Err(CutlistError::Config("broken".into())));
        assert!(registry.load().is_err());
        assert!(!registry.is_loaded());
        assert_eq!(registry.load_count(), 0);
    }

    #[test]
    fn reset_returns_to_unloaded() {
        let registry = ManifestRegistry::with_settings(|| Ok(settings()));
        let first = registry.load().unwrap();
        registry.reset();
        assert!(!registry.is_loaded());
        let second = registry.load().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(registry.load_count(), 2);
    }

    #[test]
    fn register_generator_adds_to_injected_table() {
        let mut table = GeneratorTable::new();
        table.register_fn("cutlist_mock", || Ok(json!({"adapters": []})));
        let registry = ManifestRegistry::with_settings(|| Ok(settings())).with_generators(table);
        registry.register_generator("cutlist_other", || Ok(json!({"media_linkers": []})));

        let table = registry.generators.read().unwrap();
        assert_eq!(table.targets(), vec!["cutlist_mock", "cutlist_other"]);
    }

    #[test]
    fn concurrent_loads_build_once() {
        let registry = Arc::new(ManifestRegistry::with_settings(|| Ok(settings())));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.load().unwrap())
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(registry.load_count(), 1);
    }

    #[test]
    fn build_aggregate_contains_builtin_adapters() {
        let aggregate = build_aggregate(&settings(), &GeneratorTable::new()).unwrap();
        assert!(aggregate.adapter("cutlist_json").is_some());
        assert!(aggregate.source_files.is_empty());
    }
}
