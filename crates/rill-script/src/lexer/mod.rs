//! Lexical analysis (tokenization) for rill source code.
//!
//! The lexer transforms rill source text into a stream of tokens
//! that can be consumed by the parser.
//!
//! ## Structure
//!
//! - `scanner.rs` - Main `Scanner` struct that produces tokens
//! - `token.rs` - `Token` and `TokenKind` definitions

mod scanner;
mod token;

pub use scanner::Scanner;
pub use token::{Span, Token, TokenKind};
