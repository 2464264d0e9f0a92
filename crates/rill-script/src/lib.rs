// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Rill Project Developers

//! # rill-script
//!
//! The rill script engine: a small language of top-level function and
//! constant definitions, with a lexer, recursive descent parser, and a
//! tree-walking interpreter.
//!
//! ## Overview
//!
//! A rill source file is a sequence of top-level statements. `let` and
//! `fn` statements populate a [`Namespace`]; a namespace is shared behind
//! an `Arc` handle and can be repopulated in place, which is the
//! foundation for live module reload in `rill-runtime`.
//!
//! ## Quick Start
//!
//! ```rust
//! use rill_script::{Interpreter, Namespace, Value, parse};
//! use std::sync::Arc;
//!
//! let namespace = Arc::new(Namespace::new("m"));
//! let program = parse("fn double(x) { return x * 2; } double(21);").unwrap();
//! let result = Interpreter::new().eval_program(&program, &namespace).unwrap();
//! assert_eq!(result, Value::Number(42.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod runtime;

// Re-exports for convenience
pub use ast::Program;
pub use interpreter::Interpreter;
pub use runtime::{Environment, Function, Namespace, Value};

/// Parses rill source code into a [`Program`].
pub fn parse(source: &str) -> Result<Program, Error> {
    parser::Parser::new(source).parse_program()
}

/// Errors that can occur while scanning, parsing, or executing rill code.
#[derive(Debug, Clone)]
pub enum Error {
    /// Syntax error during parsing
    Syntax(String),
    /// Reference error (undefined name or member)
    Reference(String),
    /// Type error during execution
    Type(String),
    /// A function was called with the wrong number of arguments
    Arity {
        /// The function name
        name: String,
        /// The declared parameter count
        expected: usize,
        /// The number of arguments supplied
        found: usize,
    },
    /// The maximum call depth was exceeded
    RecursionLimit,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Syntax(msg) => write!(f, "SyntaxError: {}", msg),
            Error::Reference(msg) => write!(f, "ReferenceError: {}", msg),
            Error::Type(msg) => write!(f, "TypeError: {}", msg),
            Error::Arity {
                name,
                expected,
                found,
            } => write!(
                f,
                "ArityError: '{}' expects {} argument(s), found {}",
                name, expected, found
            ),
            Error::RecursionLimit => write!(f, "RecursionError: maximum call depth exceeded"),
        }
    }
}

impl std::error::Error for Error {}
