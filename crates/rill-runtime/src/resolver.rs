// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Rill Project Developers

//! Module path resolution.

use crate::error::{Result, RuntimeError};
use std::path::{Path, PathBuf};

/// File extension for rill module sources.
pub const SOURCE_EXTENSION: &str = "rl";

/// An ordered list of directories consulted when resolving a module name.
///
/// Built once at host startup and never reordered afterwards.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Environment variable holding the search path, in the platform's
    /// path-list syntax (colon-separated on Unix).
    pub const ENV_VAR: &'static str = "RILL_PATH";

    /// Creates a search path from an explicit list of directories.
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Builds the search path from the `RILL_PATH` environment variable.
    pub fn from_env() -> Self {
        let dirs = match std::env::var_os(Self::ENV_VAR) {
            Some(value) => std::env::split_paths(&value)
                .filter(|p| !p.as_os_str().is_empty())
                .collect(),
            None => Vec::new(),
        };
        Self { dirs }
    }

    /// Inserts a directory at the front, giving it highest priority.
    pub fn prepend(&mut self, dir: PathBuf) {
        self.dirs.insert(0, dir);
    }

    /// The directories in resolution order.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Returns true if no directories are configured.
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

/// Resolves module names to source file paths.
///
/// Searches the base directory (the working directory, or the running
/// script's directory) first, then each search path entry in order.
/// First match wins. Resolution has no side effects.
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    base_dir: PathBuf,
    search_path: SearchPath,
}

impl ModuleResolver {
    /// Creates a resolver with the given base directory and search path.
    pub fn new(base_dir: PathBuf, search_path: SearchPath) -> Self {
        Self {
            base_dir,
            search_path,
        }
    }

    /// Creates a resolver rooted at the current working directory with
    /// the search path taken from `RILL_PATH`.
    pub fn from_env() -> Self {
        let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(base_dir, SearchPath::from_env())
    }

    /// Changes the base directory (used when running a script file, so
    /// that sibling modules resolve relative to the script).
    pub fn set_base_dir(&mut self, dir: impl Into<PathBuf>) {
        self.base_dir = dir.into();
    }

    /// The configured search path.
    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    /// Resolves a module name to the first matching `<name>.rl` file.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        if !is_valid_module_name(name) {
            return Err(RuntimeError::InvalidName(name.to_string()));
        }

        let file_name = format!("{}.{}", name, SOURCE_EXTENSION);

        let candidates =
            std::iter::once(&self.base_dir).chain(self.search_path.dirs().iter());
        for dir in candidates {
            let candidate = dir.join(&file_name);
            if candidate.is_file() {
                tracing::debug!(module = name, path = %candidate.display(), "resolved module");
                return Ok(candidate);
            }
        }

        Err(RuntimeError::ModuleNotFound(name.to_string()))
    }
}

/// Returns true if `name` is a plain identifier usable as a module name.
fn is_valid_module_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(ch) if ch == '_' || ch.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|ch| ch == '_' || ch.is_alphanumeric())
}
