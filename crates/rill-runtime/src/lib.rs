// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Rill Project Developers

//! Module system for the rill scripting runtime.
//!
//! This crate layers module resolution, loading, and live reload on top
//! of the [`rill_script`] engine:
//!
//! - [`ModuleResolver`] maps module names to `.rl` source files along a
//!   search path (`RILL_PATH`).
//! - [`ModuleLoader`] parses and executes a source file into a
//!   [`Namespace`](rill_script::Namespace), atomically.
//! - [`ModuleRegistry`] records every loaded module together with its
//!   source [`Signature`].
//! - [`check_and_reload_all`] re-executes modules whose sources changed,
//!   in place, so existing handles observe the new definitions.
//! - [`Session`] ties all of the above to an interactive scope.
//!
//! # Example
//!
//! ```no_run
//! use rill_runtime::Session;
//!
//! let mut session = Session::from_env();
//! session.eval("import util;")?;
//! let value = session.eval("util.greet(\"world\");")?;
//! println!("{value}");
//! # Ok::<(), rill_runtime::RuntimeError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod loader;
mod registry;
mod reload;
mod resolver;
mod session;
mod signature;

pub use error::{Result, RuntimeError};
pub use loader::ModuleLoader;
pub use registry::{ModuleEntry, ModuleRegistry};
pub use reload::{check_and_reload_all, ReloadReport};
pub use resolver::{ModuleResolver, SearchPath, SOURCE_EXTENSION};
pub use session::Session;
pub use signature::Signature;
