// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Rill Project Developers

//! Reload tracking: detect changed module sources and re-execute them.

use crate::error::RuntimeError;
use crate::loader::ModuleLoader;
use crate::registry::ModuleRegistry;
use crate::signature::Signature;

/// Outcome of one reload sweep across the registry.
#[derive(Debug, Default)]
pub struct ReloadReport {
    /// Modules whose namespaces were replaced in this sweep
    pub reloaded: Vec<String>,
    /// Modules whose reload failed, with the error; their namespaces
    /// and signature records are untouched
    pub errors: Vec<(String, RuntimeError)>,
}

impl ReloadReport {
    /// Returns true if nothing was reloaded and nothing failed.
    pub fn is_empty(&self) -> bool {
        self.reloaded.is_empty() && self.errors.is_empty()
    }

    /// Returns true if any module failed to reload.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Re-checks every registered module and reloads the changed ones.
///
/// The host calls this between units of interactive work, so no function
/// from a tracked namespace can be mid-call while its bindings are
/// replaced. For each module: if the source signature is unchanged the
/// module is skipped; otherwise the loader re-executes the source into
/// the existing namespace. On failure the old bindings stay valid and
/// the signature record is left stale so the next sweep retries.
pub fn check_and_reload_all(
    registry: &ModuleRegistry,
    loader: &mut ModuleLoader,
) -> ReloadReport {
    let mut report = ReloadReport::default();

    for name in registry.names() {
        let Some(entry) = registry.get(&name) else {
            continue;
        };

        let current = match Signature::of_file(&entry.path) {
            Ok(signature) => signature,
            Err(e) => {
                tracing::debug!(module = %name, error = %e, "signature check failed");
                report.errors.push((name, e.into()));
                continue;
            }
        };

        if current == entry.signature {
            continue;
        }

        match loader.load_into(&name, &entry.path, &entry.namespace) {
            Ok(()) => {
                registry.update_signature(&name, current);
                tracing::info!(module = %name, signature = %current, "module reloaded");
                report.reloaded.push(name);
            }
            Err(e) => {
                tracing::debug!(module = %name, error = %e, "reload failed, keeping old bindings");
                report.errors.push((name, e));
            }
        }
    }

    report
}
