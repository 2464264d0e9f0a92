// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Rill Project Developers

//! Content-based change detection for module source files.

use std::fmt;
use std::io;
use std::path::Path;

/// The last-observed content signature of a module source file.
///
/// A blake3 hash of the file's bytes. A module is reloaded exactly when
/// the current signature of its file differs from the recorded one;
/// timestamp churn without a content change never triggers a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature(blake3::Hash);

impl Signature {
    /// Computes the signature of the file at `path`.
    pub fn of_file(path: &Path) -> io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self(blake3::hash(&bytes)))
    }

    /// Computes the signature of in-memory source text.
    pub fn of_source(source: &str) -> Self {
        Self(blake3::hash(source.as_bytes()))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short prefix is plenty for display purposes
        let hex = self.0.to_hex();
        write!(f, "{}", &hex[..8])
    }
}
