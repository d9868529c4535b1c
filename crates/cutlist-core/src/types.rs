// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common enums shared by the config, plugin, and CLI crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Where a manifest source was enumerated from.
///
/// Variants are declared in ascending precedence: when two sources
/// contribute a plugin with the same name, the later origin wins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SourceOrigin {
    /// The manifest compiled into (or configured as) the built-in default.
    BuiltIn,
    /// A file listed under `plugins.manifests` in a config file.
    ExplicitFile,
    /// A file listed in the manifest path environment variable.
    Environment,
    /// A contribution declared by an installed package's entry points.
    EntryPoint,
}

/// How an adapter or media linker expects to be executed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum ExecutionScope {
    #[default]
    #[strum(to_string = "in process")]
    #[serde(rename = "in process")]
    InProcess,
    #[strum(to_string = "out of process")]
    #[serde(rename = "out of process")]
    OutOfProcess,
}

/// The named plugin categories a manifest can register.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PluginKind {
    Adapter,
    MediaLinker,
}

impl PluginKind {
    /// The top-level manifest key holding records of this kind.
    pub fn manifest_key(self) -> &'static str {
        match self {
            PluginKind::Adapter => "adapters",
            PluginKind::MediaLinker => "media_linkers",
        }
    }
}
