// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Rill Project Developers

//! Module loader - reads, parses, and executes module sources.

use crate::error::{Result, RuntimeError};
use rill_script::{Interpreter, Namespace};
use std::path::Path;
use std::sync::Arc;

/// Loads module source files into namespaces.
///
/// Loading is atomic with respect to the target namespace: if parsing or
/// execution fails, the namespace's previous contents are restored and
/// the error is reported, so a broken edit never leaves a half-populated
/// module behind.
pub struct ModuleLoader {
    interpreter: Interpreter,
}

impl ModuleLoader {
    /// Creates a new module loader.
    pub fn new() -> Self {
        Self {
            interpreter: Interpreter::new(),
        }
    }

    /// Executes the file at `path` into `namespace`, replacing its
    /// contents on success and restoring them on failure.
    pub fn load_into(
        &mut self,
        name: &str,
        path: &Path,
        namespace: &Arc<Namespace>,
    ) -> Result<()> {
        tracing::debug!(module = name, path = %path.display(), "loading module");

        let source = std::fs::read_to_string(path)?;
        let program =
            rill_script::parse(&source).map_err(|e| RuntimeError::load(name, e))?;

        // Start from an empty namespace so bindings deleted from the
        // source disappear; keep a snapshot to restore on failure.
        let previous = namespace.snapshot();
        namespace.clear();

        match self.interpreter.eval_program(&program, namespace) {
            Ok(_) => {
                tracing::debug!(module = name, bindings = namespace.len(), "module loaded");
                Ok(())
            }
            Err(e) => {
                namespace.replace_all(previous);
                Err(RuntimeError::load(name, e))
            }
        }
    }

    /// The loader's interpreter, shared with interactive evaluation so
    /// call depth accounting stays consistent.
    pub fn interpreter(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }
}

impl Default for ModuleLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rill_script::Value;
    use std::fs;

    #[test]
    fn test_load_populates_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.rl");
        fs::write(&path, "let answer = 42;\nfn id(x) { return x; }\n").unwrap();

        let namespace = Arc::new(Namespace::new("m"));
        ModuleLoader::new().load_into("m", &path, &namespace).unwrap();

        assert_eq!(namespace.get("answer"), Some(Value::Number(42.0)));
        assert!(namespace.get("id").is_some_and(|v| v.is_callable()));
    }

    #[test]
    fn test_syntax_error_restores_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.rl");
        fs::write(&path, "let x = 1;").unwrap();

        let namespace = Arc::new(Namespace::new("m"));
        let mut loader = ModuleLoader::new();
        loader.load_into("m", &path, &namespace).unwrap();

        fs::write(&path, "let x = ;").unwrap();
        let err = loader.load_into("m", &path, &namespace).unwrap_err();
        assert!(matches!(err, RuntimeError::Load { .. }));

        // The old binding survives the failed load.
        assert_eq!(namespace.get("x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn test_runtime_error_during_load_restores_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.rl");
        fs::write(&path, "let x = 1;").unwrap();

        let namespace = Arc::new(Namespace::new("m"));
        let mut loader = ModuleLoader::new();
        loader.load_into("m", &path, &namespace).unwrap();

        // Parses fine, fails at execution.
        fs::write(&path, "let y = undefined_name;").unwrap();
        let err = loader.load_into("m", &path, &namespace).unwrap_err();
        assert!(matches!(err, RuntimeError::Load { .. }));

        assert_eq!(namespace.get("x"), Some(Value::Number(1.0)));
        assert_eq!(namespace.get("y"), None);
    }

    #[test]
    fn test_reload_drops_removed_bindings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.rl");
        fs::write(&path, "let a = 1; let b = 2;").unwrap();

        let namespace = Arc::new(Namespace::new("m"));
        let mut loader = ModuleLoader::new();
        loader.load_into("m", &path, &namespace).unwrap();

        fs::write(&path, "let a = 1;").unwrap();
        loader.load_into("m", &path, &namespace).unwrap();

        assert_eq!(namespace.get("a"), Some(Value::Number(1.0)));
        assert_eq!(namespace.get("b"), None);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let namespace = Arc::new(Namespace::new("m"));
        let err = ModuleLoader::new()
            .load_into("m", &dir.path().join("m.rl"), &namespace)
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Fs(_)));
    }
}
