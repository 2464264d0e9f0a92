//! Token definitions for the rill lexer.

/// A span in the source code, representing a range of bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length of this span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if this span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The span in the source code
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The different kinds of tokens in rill.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Numeric literal (IEEE 754 double)
    Number(f64),
    /// String literal (contents, escapes already processed)
    String(String),
    /// Boolean true
    True,
    /// Boolean false
    False,
    /// nil
    Nil,

    /// Identifier
    Identifier(String),

    // Keywords
    /// let
    Let,
    /// fn
    Fn,
    /// return
    Return,
    /// if
    If,
    /// else
    Else,
    /// while
    While,
    /// import
    Import,

    // Punctuation
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ;
    Semicolon,
    /// ,
    Comma,
    /// .
    Dot,

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Equal,
    /// ==
    EqualEqual,
    /// !=
    NotEqual,
    /// !
    Bang,
    /// <
    Less,
    /// <=
    LessEqual,
    /// >
    Greater,
    /// >=
    GreaterEqual,
    /// &&
    AmpersandAmpersand,
    /// ||
    PipePipe,

    /// End of input
    Eof,
    /// An unrecognized character
    Invalid,
}

impl TokenKind {
    /// Maps an identifier to its keyword token, if it is one.
    pub fn keyword(name: &str) -> Option<TokenKind> {
        match name {
            "let" => Some(TokenKind::Let),
            "fn" => Some(TokenKind::Fn),
            "return" => Some(TokenKind::Return),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "while" => Some(TokenKind::While),
            "import" => Some(TokenKind::Import),
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            "nil" => Some(TokenKind::Nil),
            _ => None,
        }
    }
}
