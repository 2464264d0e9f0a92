// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Rill Project Developers

//! An interactive session: registry, resolver, loader, and the REPL scope.

use crate::error::Result;
use crate::loader::ModuleLoader;
use crate::registry::{ModuleEntry, ModuleRegistry};
use crate::reload::{self, ReloadReport};
use crate::resolver::ModuleResolver;
use crate::signature::Signature;
use rill_script::ast::{Program, Statement};
use rill_script::{Namespace, Value};
use std::path::Path;
use std::sync::Arc;

/// A long-lived interactive session.
///
/// Owns the module registry, the resolver, the loader, and an interactive
/// scope (itself a [`Namespace`]) that `import` statements bind module
/// handles into. The embedding host is expected to call
/// [`Session::check_and_reload_all`] before each unit of work and surface
/// the report without aborting the session.
pub struct Session {
    resolver: ModuleResolver,
    registry: ModuleRegistry,
    loader: ModuleLoader,
    scope: Arc<Namespace>,
}

impl Session {
    /// Creates a session with the given resolver.
    pub fn new(resolver: ModuleResolver) -> Self {
        Self {
            resolver,
            registry: ModuleRegistry::new(),
            loader: ModuleLoader::new(),
            scope: Arc::new(Namespace::new("repl")),
        }
    }

    /// Creates a session resolving from the current directory and
    /// `RILL_PATH`.
    pub fn from_env() -> Self {
        Self::new(ModuleResolver::from_env())
    }

    /// Imports a module by name and binds its handle into the
    /// interactive scope.
    ///
    /// A module that is already registered is rebound as-is: no reload,
    /// no signature update. A failed first load registers nothing.
    pub fn import(&mut self, name: &str) -> Result<Arc<Namespace>> {
        if let Some(entry) = self.registry.get(name) {
            self.scope
                .define(name, Value::Module(Arc::clone(&entry.namespace)));
            return Ok(entry.namespace);
        }

        let path = self.resolver.resolve(name)?;
        let signature = Signature::of_file(&path)?;
        let namespace = Arc::new(Namespace::new(name));

        self.loader.load_into(name, &path, &namespace)?;

        self.registry.insert(
            name,
            ModuleEntry {
                namespace: Arc::clone(&namespace),
                path,
                signature,
            },
        );
        self.scope.define(name, Value::Module(Arc::clone(&namespace)));
        tracing::debug!(module = name, "module imported");

        Ok(namespace)
    }

    /// Evaluates one unit of interactive input against the session scope.
    ///
    /// Top-level `import` statements are executed first; the remaining
    /// statements run through the interpreter. Returns the value of the
    /// final expression statement, or nil.
    pub fn eval(&mut self, source: &str) -> Result<Value> {
        let program = rill_script::parse(source)?;

        let mut rest = Vec::with_capacity(program.body.len());
        for statement in program.body {
            if let Statement::Import(id) = statement {
                self.import(&id.name)?;
            } else {
                rest.push(statement);
            }
        }

        let program = Program { body: rest };
        let value = self
            .loader
            .interpreter()
            .eval_program(&program, &self.scope)?;
        Ok(value)
    }

    /// Runs a reload sweep over every registered module.
    pub fn check_and_reload_all(&mut self) -> ReloadReport {
        reload::check_and_reload_all(&self.registry, &mut self.loader)
    }

    /// Evaluates a script file. Sibling modules resolve relative to the
    /// script's directory.
    pub fn run_file(&mut self, path: &Path) -> Result<Value> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            self.resolver.set_base_dir(dir);
        }
        let source = std::fs::read_to_string(path)?;
        self.eval(&source)
    }

    /// The module registry.
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// The interactive scope.
    pub fn scope(&self) -> &Arc<Namespace> {
        &self.scope
    }
}
