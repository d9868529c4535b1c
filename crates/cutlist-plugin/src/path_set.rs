// SPDX-FileCopyrightText: 2026 Cutlist Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered, deduplicated sets of manifest paths.
//!
//! Entries are keyed by their absolute, lexically normalized form, so
//! `./plugins/a.json`, `plugins/../plugins/a.json` and `$PWD/plugins/a.json`
//! are one entry. Only the absolute form is ever stored. Nothing here
//! touches the filesystem beyond reading the current directory; a path
//! that does not exist is still accepted.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Insertion-ordered set of absolute paths.
#[derive(Debug, Clone, Default)]
pub struct PathSet {
    paths: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl PathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a platform path-list string (`:` on Unix, `;` on Windows).
    pub fn from_path_list(list: &str) -> Self {
        let mut set = Self::new();
        set.extend_from_path_list(list);
        set
    }

    /// Inserts every entry of a platform path-list string, keeping first occurrences.
    pub fn extend_from_path_list(&mut self, list: &str) -> Vec<PathBuf> {
        std::env::split_paths(list)
            .filter_map(|entry| self.insert(entry))
            .collect()
    }

    /// Inserts a path, returning its absolute form if it was not already present.
    ///
    /// Empty and whitespace-only entries are ignored.
    pub fn insert(&mut self, path: impl AsRef<Path>) -> Option<PathBuf> {
        let path = path.as_ref();
        if path.to_string_lossy().trim().is_empty() {
            return None;
        }
        let key = absolute_normalized(path);
        if !self.seen.insert(key.clone()) {
            return None;
        }
        self.paths.push(key.clone());
        Some(key)
    }

    /// Whether `path` (in any spelling) is already in the set.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.seen.contains(&absolute_normalized(path.as_ref()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn into_vec(self) -> Vec<PathBuf> {
        self.paths
    }
}

/// Resolves `path` against the current directory and removes `.`/`..` lexically.
///
/// Symlinks are not resolved. If the current directory cannot be read the
/// path is only normalized.
pub fn absolute_normalized(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };
    normalize_lexically(&absolute)
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
