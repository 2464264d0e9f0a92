// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Rill Project Developers

//! Error types for the rill runtime

use thiserror::Error;

/// Result type for rill runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors that can occur while resolving, loading, or reloading modules.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// No candidate file was found in the base directory or search path
    #[error("Cannot find module '{0}'")]
    ModuleNotFound(String),

    /// The module name is not a valid identifier
    #[error("Invalid module name '{0}'")]
    InvalidName(String),

    /// Parsing or executing a module's source failed
    #[error("Error loading module '{module}': {source}")]
    Load {
        /// The module name
        module: String,
        /// The underlying engine error
        source: rill_script::Error,
    },

    /// An engine error from evaluating interactive input
    #[error("{0}")]
    Script(#[from] rill_script::Error),

    /// File system error
    #[error("File system error: {0}")]
    Fs(#[from] std::io::Error),
}

impl RuntimeError {
    /// Wraps an engine error as a load failure for `module`.
    pub fn load(module: impl Into<String>, source: rill_script::Error) -> Self {
        Self::Load {
            module: module.into(),
            source,
        }
    }
}
