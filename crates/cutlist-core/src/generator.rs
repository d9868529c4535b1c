// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manifest generators: callables a package exposes instead of a static file.

use crate::error::BoxError;

/// A callable that produces manifest content in memory.
///
/// The returned value must have the same shape as a parsed
/// `plugin_manifest.json` document.
pub trait ManifestGenerator: Send + Sync {
    fn plugin_manifest(&self) -> Result<serde_json::Value, BoxError>;
}

impl<F> ManifestGenerator for F
where
    F: Fn() -> Result<serde_json::Value, BoxError> + Send + Sync,
{
    fn plugin_manifest(&self) -> Result<serde_json::Value, BoxError> {
        self()
    }
}
