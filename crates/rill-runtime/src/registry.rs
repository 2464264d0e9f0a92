// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Rill Project Developers

//! The process-wide module registry.

use crate::signature::Signature;
use dashmap::DashMap;
use rill_script::Namespace;
use std::path::PathBuf;
use std::sync::Arc;

/// A registered module.
#[derive(Debug, Clone)]
pub struct ModuleEntry {
    /// The module's namespace handle (stable across reloads)
    pub namespace: Arc<Namespace>,
    /// The resolved source file path
    pub path: PathBuf,
    /// The signature recorded at the last successful (re)load
    pub signature: Signature,
}

/// Mapping from module name to namespace and source location.
///
/// Owned by the host and passed explicitly, never a global singleton, so
/// tests can instantiate isolated registries. Entries are added on first
/// import and mutated on reload; they are never removed during normal
/// operation.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: DashMap<String, ModuleEntry>,
}

impl ModuleRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            modules: DashMap::new(),
        }
    }

    /// Gets a registered module by name.
    pub fn get(&self, name: &str) -> Option<ModuleEntry> {
        self.modules.get(name).map(|entry| entry.clone())
    }

    /// Checks if a module is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Registers a module.
    pub fn insert(&self, name: impl Into<String>, entry: ModuleEntry) {
        self.modules.insert(name.into(), entry);
    }

    /// Records a new signature for an already-registered module.
    pub fn update_signature(&self, name: &str, signature: Signature) {
        if let Some(mut entry) = self.modules.get_mut(name) {
            entry.signature = signature;
        }
    }

    /// The registered module names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.modules.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// The number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns true if no modules are registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str) -> ModuleEntry {
        ModuleEntry {
            namespace: Arc::new(Namespace::new("m")),
            path: PathBuf::from(path),
            signature: Signature::of_source("let x = 1;"),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let registry = ModuleRegistry::new();
        assert!(registry.is_empty());

        registry.insert("m", entry("/tmp/m.rl"));
        assert!(registry.contains("m"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("m").unwrap().path, PathBuf::from("/tmp/m.rl"));
        assert!(registry.get("other").is_none());
    }

    #[test]
    fn test_update_signature() {
        let registry = ModuleRegistry::new();
        registry.insert("m", entry("/tmp/m.rl"));

        let updated = Signature::of_source("let x = 2;");
        registry.update_signature("m", updated);
        assert_eq!(registry.get("m").unwrap().signature, updated);
    }

    #[test]
    fn test_names_sorted() {
        let registry = ModuleRegistry::new();
        registry.insert("zeta", entry("/tmp/zeta.rl"));
        registry.insert("alpha", entry("/tmp/alpha.rl"));
        assert_eq!(registry.names(), vec!["alpha".to_string(), "zeta".to_string()]);
    }

    #[test]
    fn test_namespace_handle_is_shared() {
        let registry = ModuleRegistry::new();
        let e = entry("/tmp/m.rl");
        let handle = Arc::clone(&e.namespace);
        registry.insert("m", e);

        assert!(Arc::ptr_eq(&registry.get("m").unwrap().namespace, &handle));
    }
}
