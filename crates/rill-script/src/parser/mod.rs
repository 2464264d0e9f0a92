//! Parser for rill source code.
//!
//! Transforms a stream of tokens into an Abstract Syntax Tree (AST).
//!
//! ## Usage
//!
//! ```rust
//! use rill_script::parser::Parser;
//!
//! let mut parser = Parser::new("let x = 1 + 2;");
//! let program = parser.parse_program().expect("Should parse");
//! ```

mod parser;

pub use parser::Parser;
