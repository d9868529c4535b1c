// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Cutlist plugin system.
//!
//! Holds the error type, the enums shared between the config, plugin and
//! CLI crates, and the [`ManifestGenerator`] trait packages implement to
//! contribute manifests from code.

pub mod error;
pub mod generator;
pub mod types;

pub use error::{BoxError, CutlistError, Result};
pub use generator::ManifestGenerator;
pub use types::{ExecutionScope, PluginKind, SourceOrigin};
