// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest parsing from `plugin_manifest.json` documents.
//!
//! A manifest is a JSON object whose `adapters` and `media_linkers` arrays
//! hold named plugin records. Any other top-level key (`hooks`,
//! `hook_scripts`, `schemadefs`, ...) is kept verbatim as an extension
//! category and merged structurally later.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use cutlist_core::{CutlistError, ExecutionScope, PluginKind};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::path_set::absolute_normalized;
use crate::source::ManifestSource;

/// A named adapter registered by a manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adapter {
    pub name: String,
    pub execution_scope: ExecutionScope,
    /// Entry point of the adapter implementation, absolute when the
    /// manifest came from a directory on disk.
    pub filepath: Option<PathBuf>,
    /// File suffixes the adapter reads or writes, without the dot.
    pub suffixes: Vec<String>,
    /// Where this record was declared.
    pub source: ManifestSource,
}

/// A named media linker registered by a manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaLinker {
    pub name: String,
    pub execution_scope: ExecutionScope,
    pub filepath: Option<PathBuf>,
    pub source: ManifestSource,
}

/// Common view over adapters and media linkers used by the merger.
pub trait NamedPlugin {
    const KIND: PluginKind;

    fn name(&self) -> &str;

    fn source(&self) -> &ManifestSource;
}

impl NamedPlugin for Adapter {
    const KIND: PluginKind = PluginKind::Adapter;

    fn name(&self) -> &str {
        &self.name
    }

    fn source(&self) -> &ManifestSource {
        &self.source
    }
}

impl NamedPlugin for MediaLinker {
    const KIND: PluginKind = PluginKind::MediaLinker;

    fn name(&self) -> &str {
        &self.name
    }

    fn source(&self) -> &ManifestSource {
        &self.source
    }
}

/// The parsed contribution of one manifest source.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub source: ManifestSource,
    pub adapters: Vec<Adapter>,
    pub media_linkers: Vec<MediaLinker>,
    /// Absolute paths of the files this manifest was read from.
    pub source_files: Vec<PathBuf>,
    /// Top-level categories other than adapters and media linkers.
    pub extensions: BTreeMap<String, Value>,
}

/// A structural problem in manifest content.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("top level must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("missing required key: expected `adapters` and/or `media_linkers`")]
    MissingCategories,

    #[error("`{0}` must be an array")]
    CategoryNotArray(&'static str),

    #[error("{key}[{index}]: {message}")]
    BadRecord {
        key: &'static str,
        index: usize,
        message: String,
    },
}

// --- JSON intermediate structs ---

#[derive(Debug, Deserialize)]
struct AdapterRecord {
    name: String,
    #[serde(default)]
    execution_scope: ExecutionScope,
    #[serde(default)]
    filepath: Option<String>,
    #[serde(default)]
    suffixes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct MediaLinkerRecord {
    name: String,
    #[serde(default)]
    execution_scope: ExecutionScope,
    #[serde(default)]
    filepath: Option<String>,
}

// --- Public API ---

/// Reads and parses a manifest file.
///
/// A missing or unreadable file and malformed content are all
/// [`CutlistError::Parse`] errors naming the file. Relative `filepath`
/// values resolve against the file's directory.
pub fn read_manifest_file(path: &Path, source: ManifestSource) -> Result<Manifest, CutlistError> {
    let path = absolute_normalized(path);
    let content = std::fs::read_to_string(&path).map_err(|e| {
        let message = match e.kind() {
            io::ErrorKind::NotFound => "file does not exist".to_string(),
            _ => format!("file is unreadable: {e}"),
        };
        CutlistError::Parse {
            path: path.clone(),
            message,
            source: Some(Box::new(e)),
        }
    })?;

    let mut manifest = parse_manifest_str(&content, path.parent(), source)
        .map_err(|e| parse_error(&path, e))?;
    manifest.source_files.push(path);
    Ok(manifest)
}

/// Parses manifest content held in memory.
///
/// The result records no source files; callers that read from disk add
/// the path themselves.
pub fn parse_manifest_str(
    content: &str,
    base_dir: Option<&Path>,
    source: ManifestSource,
) -> Result<Manifest, ShapeError> {
    let value: Value = serde_json::from_str(content)?;
    parse_manifest_value(value, base_dir, source)
}

/// Interprets an already-decoded JSON value as a manifest.
pub fn parse_manifest_value(
    value: Value,
    base_dir: Option<&Path>,
    source: ManifestSource,
) -> Result<Manifest, ShapeError> {
    let mut document = match value {
        Value::Object(map) => map,
        other => return Err(ShapeError::NotAnObject(json_type_name(&other))),
    };

    let adapter_key = PluginKind::Adapter.manifest_key();
    let linker_key = PluginKind::MediaLinker.manifest_key();
    if !document.contains_key(adapter_key) && !document.contains_key(linker_key) {
        return Err(ShapeError::MissingCategories);
    }

    let adapters = take_records::<AdapterRecord>(&mut document, adapter_key)?
        .into_iter()
        .map(|r| Adapter {
            name: r.name,
            execution_scope: r.execution_scope,
            filepath: resolve_filepath(r.filepath, base_dir),
            suffixes: r.suffixes,
            source: source.clone(),
        })
        .collect();

    let media_linkers = take_records::<MediaLinkerRecord>(&mut document, linker_key)?
        .into_iter()
        .map(|r| MediaLinker {
            name: r.name,
            execution_scope: r.execution_scope,
            filepath: resolve_filepath(r.filepath, base_dir),
            source: source.clone(),
        })
        .collect();

    Ok(Manifest {
        source,
        adapters,
        media_linkers,
        source_files: Vec::new(),
        extensions: document.into_iter().collect(),
    })
}

/// Wraps a [`ShapeError`] as a parse error for `path`.
pub(crate) fn parse_error(path: &Path, err: ShapeError) -> CutlistError {
    CutlistError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
        source: Some(Box::new(err)),
    }
}

/// Removes `key` from the document and decodes each element of its array.
///
/// Every record must carry a non-empty string `name`.
fn take_records<T: DeserializeOwned>(
    document: &mut Map<String, Value>,
    key: &'static str,
) -> Result<Vec<T>, ShapeError> {
    let items = match document.remove(key) {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ShapeError::CategoryNotArray(key)),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let bad = |message: String| ShapeError::BadRecord {
                key,
                index,
                message,
            };
            let Value::Object(fields) = &item else {
                return Err(bad(format!(
                    "record must be an object, found {}",
                    json_type_name(&item)
                )));
            };
            match fields.get("name") {
                Some(Value::String(name)) if !name.trim().is_empty() => {}
                Some(Value::String(_)) => return Err(bad("name must not be empty".to_string())),
                Some(_) => return Err(bad("name must be a string".to_string())),
                None => return Err(bad("missing required field `name`".to_string())),
            }
            serde_json::from_value(item).map_err(|e| bad(e.to_string()))
        })
        .collect()
}

fn resolve_filepath(filepath: Option<String>, base_dir: Option<&Path>) -> Option<PathBuf> {
    let filepath = PathBuf::from(filepath?);
    match base_dir {
        Some(dir) if filepath.is_relative() => Some(absolute_normalized(&dir.join(filepath))),
        _ => Some(filepath),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutlist_core::SourceOrigin;

    fn env_source(path: &str) -> ManifestSource {
        ManifestSource::File {
            path: PathBuf::from(path),
            origin: SourceOrigin::Environment,
        }
    }

    #[test]
    fn parse_full_manifest() {
        let json = r#"{
            "adapters": [
                {
                    "name": "mock_adapter",
                    "execution_scope": "in process",
                    "filepath": "mock_adapter.py",
                    "suffixes": ["mock"]
                }
            ],
            "media_linkers": [
                { "name": "mock_linker", "execution_scope": "out of process", "filepath": "linker" }
            ],
            "hooks": { "post_adapter_read": ["tag_clips"] },
            "schemadefs": []
        }"#;
        let manifest =
            parse_manifest_str(json, Some(Path::new("/plugins/mock")), env_source("/m.json"))
                .unwrap();

        assert_eq!(manifest.adapters.len(), 1);
        let adapter = &manifest.adapters[0];
        assert_eq!(adapter.name, "mock_adapter");
        assert_eq!(adapter.suffixes, vec!["mock"]);
        assert_eq!(
            adapter.filepath.as_deref(),
            Some(Path::new("/plugins/mock/mock_adapter.py"))
        );
        assert_eq!(adapter.source, env_source("/m.json"));

        let linker = &manifest.media_linkers[0];
        assert_eq!(linker.name, "mock_linker");
        assert_eq!(linker.execution_scope, ExecutionScope::OutOfProcess);

        assert!(manifest.extensions.contains_key("hooks"));
        assert!(manifest.extensions.contains_key("schemadefs"));
        assert!(!manifest.extensions.contains_key("adapters"));
        assert!(manifest.source_files.is_empty());
    }

    #[test]
    fn only_one_category_is_required() {
        let manifest =
            parse_manifest_str(r#"{"media_linkers": []}"#, None, env_source("/m.json")).unwrap();
        assert!(manifest.adapters.is_empty());
        assert!(manifest.media_linkers.is_empty());
    }

    #[test]
    fn defaults_for_optional_fields() {
        let manifest =
            parse_manifest_str(r#"{"adapters": [{"name": "bare"}]}"#, None, env_source("/m.json"))
                .unwrap();
        let adapter = &manifest.adapters[0];
        assert_eq!(adapter.execution_scope, ExecutionScope::InProcess);
        assert!(adapter.filepath.is_none());
        assert!(adapter.suffixes.is_empty());
    }

    #[test]
    fn absolute_filepath_is_kept() {
        let json = r#"{"adapters": [{"name": "a", "filepath": "/opt/a/impl"}]}"#;
        let manifest =
            parse_manifest_str(json, Some(Path::new("/plugins")), env_source("/m.json")).unwrap();
        assert_eq!(
            manifest.adapters[0].filepath.as_deref(),
            Some(Path::new("/opt/a/impl"))
        );
    }

    #[test]
    fn rejects_malformed_content() {
        let cases = [
            ("not json", "invalid JSON"),
            ("[1, 2]", "must be a JSON object"),
            (r#"{"hooks": {}}"#, "missing required key"),
            (r#"{"adapters": {}}"#, "`adapters` must be an array"),
            (r#"{"adapters": [3]}"#, "adapters[0]: record must be an object"),
            (r#"{"adapters": [{"suffixes": []}]}"#, "missing required field `name`"),
            (r#"{"media_linkers": [{"name": ""}]}"#, "media_linkers[0]: name must not be empty"),
            (r#"{"adapters": [{"name": 5}]}"#, "name must be a string"),
            (
                r#"{"adapters": [{"name": "a", "execution_scope": "sideways"}]}"#,
                "adapters[0]",
            ),
        ];
        for (json, expected) in cases {
            let err = parse_manifest_str(json, None, env_source("/m.json")).unwrap_err();
            assert!(
                err.to_string().contains(expected),
                "{json}: expected `{expected}` in `{err}`"
            );
        }
    }

    #[test]
    fn read_missing_file_is_parse_error() {
        let err = read_manifest_file(
            Path::new("/definitely/not/here.plugin_manifest.json"),
            env_source("/definitely/not/here.plugin_manifest.json"),
        )
        .unwrap_err();
        match err {
            CutlistError::Parse { path, message, .. } => {
                assert_eq!(path, PathBuf::from("/definitely/not/here.plugin_manifest.json"));
                assert!(message.contains("does not exist"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn read_file_records_absolute_source_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugin_manifest.json");
        std::fs::write(&path, r#"{"adapters": [{"name": "a", "filepath": "a_impl"}]}"#).unwrap();

        let manifest = read_manifest_file(&path, env_source("/ignored")).unwrap();
        assert_eq!(manifest.source_files, vec![path.clone()]);
        assert_eq!(manifest.adapters[0].filepath, Some(dir.path().join("a_impl")));
    }
}
