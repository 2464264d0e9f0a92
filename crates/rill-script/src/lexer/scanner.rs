//! The scanner that produces tokens from source text.

use super::{Span, Token, TokenKind};
use unicode_xid::UnicodeXID;

/// A scanner that tokenizes rill source code.
pub struct Scanner<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        let start = self.current_pos;

        let Some((_pos, ch)) = self.advance() else {
            return Token::new(TokenKind::Eof, Span::new(start, start));
        };

        let kind = match ch {
            // Single-character tokens
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,

            // Multi-character tokens
            '=' => self.scan_equal(),
            '!' => self.scan_bang(),
            '<' => self.scan_less_than(),
            '>' => self.scan_greater_than(),
            '&' => self.scan_ampersand(),
            '|' => self.scan_pipe(),

            // String literals
            '"' | '\'' => self.scan_string(ch),

            // Numbers
            '0'..='9' => self.scan_number(),

            // Identifiers and keywords
            _ if is_id_start(ch) => self.scan_identifier(start),

            _ => TokenKind::Invalid,
        };

        Token::new(kind, Span::new(start, self.current_pos))
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let result = self.chars.next();
        if let Some((pos, ch)) = result {
            self.current_pos = pos + ch.len_utf8();
        }
        result
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.chars.clone();
        iter.next();
        iter.next().map(|(_, ch)| ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\n' | '\r') => {
                    self.advance();
                }
                Some('/') => {
                    match self.peek_next() {
                        Some('/') => {
                            // Single-line comment: skip until end of line
                            self.advance();
                            self.advance();
                            while let Some(ch) = self.peek() {
                                if ch == '\n' || ch == '\r' {
                                    break;
                                }
                                self.advance();
                            }
                        }
                        Some('*') => {
                            // Multi-line comment: skip until */
                            self.advance();
                            self.advance();
                            let mut prev = ' ';
                            while let Some(ch) = self.peek() {
                                self.advance();
                                if prev == '*' && ch == '/' {
                                    break;
                                }
                                prev = ch;
                            }
                        }
                        _ => break, // Not a comment, it's a division operator
                    }
                }
                _ => break,
            }
        }
    }

    fn scan_equal(&mut self) -> TokenKind {
        if self.peek() == Some('=') {
            self.advance();
            TokenKind::EqualEqual
        } else {
            TokenKind::Equal
        }
    }

    fn scan_bang(&mut self) -> TokenKind {
        if self.peek() == Some('=') {
            self.advance();
            TokenKind::NotEqual
        } else {
            TokenKind::Bang
        }
    }

    fn scan_less_than(&mut self) -> TokenKind {
        if self.peek() == Some('=') {
            self.advance();
            TokenKind::LessEqual
        } else {
            TokenKind::Less
        }
    }

    fn scan_greater_than(&mut self) -> TokenKind {
        if self.peek() == Some('=') {
            self.advance();
            TokenKind::GreaterEqual
        } else {
            TokenKind::Greater
        }
    }

    fn scan_ampersand(&mut self) -> TokenKind {
        if self.peek() == Some('&') {
            self.advance();
            TokenKind::AmpersandAmpersand
        } else {
            TokenKind::Invalid
        }
    }

    fn scan_pipe(&mut self) -> TokenKind {
        if self.peek() == Some('|') {
            self.advance();
            TokenKind::PipePipe
        } else {
            TokenKind::Invalid
        }
    }

    fn scan_string(&mut self, quote: char) -> TokenKind {
        let mut value = String::new();

        loop {
            let Some((_pos, ch)) = self.advance() else {
                // Unterminated string
                return TokenKind::Invalid;
            };

            if ch == quote {
                return TokenKind::String(value);
            }

            if ch == '\\' {
                let Some((_pos, escaped)) = self.advance() else {
                    return TokenKind::Invalid;
                };
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '0' => value.push('\0'),
                    '\\' => value.push('\\'),
                    '\'' => value.push('\''),
                    '"' => value.push('"'),
                    _ => return TokenKind::Invalid,
                }
            } else {
                value.push(ch);
            }
        }
    }

    fn scan_number(&mut self) -> TokenKind {
        let start = self.current_pos - 1;

        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }

        // Fractional part: only if a digit follows the dot, so `m.f`
        // style member access is not swallowed by a number.
        if self.peek() == Some('.') && matches!(self.peek_next(), Some('0'..='9')) {
            self.advance();
            while matches!(self.peek(), Some('0'..='9')) {
                self.advance();
            }
        }

        let text = &self.source[start..self.current_pos];
        match text.parse::<f64>() {
            Ok(n) => TokenKind::Number(n),
            Err(_) => TokenKind::Invalid,
        }
    }

    fn scan_identifier(&mut self, start: usize) -> TokenKind {
        while let Some(ch) = self.peek() {
            if is_id_continue(ch) {
                self.advance();
            } else {
                break;
            }
        }

        let name = &self.source[start..self.current_pos];
        match TokenKind::keyword(name) {
            Some(kind) => kind,
            None => TokenKind::Identifier(name.to_string()),
        }
    }
}

/// Returns true if the character can start an identifier.
fn is_id_start(ch: char) -> bool {
    ch == '_' || ch.is_xid_start()
}

/// Returns true if the character can continue an identifier.
fn is_id_continue(ch: char) -> bool {
    ch == '_' || ch.is_xid_continue()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> Vec<TokenKind> {
        let mut scanner = Scanner::new(source);
        let mut kinds = Vec::new();
        loop {
            let token = scanner.next_token();
            if token.kind == TokenKind::Eof {
                break;
            }
            kinds.push(token.kind);
        }
        kinds
    }

    #[test]
    fn test_scan_let_statement() {
        assert_eq!(
            tokenize("let x = 42;"),
            vec![
                TokenKind::Let,
                TokenKind::Identifier("x".into()),
                TokenKind::Equal,
                TokenKind::Number(42.0),
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_scan_function_declaration() {
        assert_eq!(
            tokenize("fn add(a, b) { return a + b; }"),
            vec![
                TokenKind::Fn,
                TokenKind::Identifier("add".into()),
                TokenKind::LeftParen,
                TokenKind::Identifier("a".into()),
                TokenKind::Comma,
                TokenKind::Identifier("b".into()),
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::Return,
                TokenKind::Identifier("a".into()),
                TokenKind::Plus,
                TokenKind::Identifier("b".into()),
                TokenKind::Semicolon,
                TokenKind::RightBrace,
            ]
        );
    }

    #[test]
    fn test_scan_operators() {
        assert_eq!(
            tokenize("== != <= >= < > && || ! ="),
            vec![
                TokenKind::EqualEqual,
                TokenKind::NotEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::AmpersandAmpersand,
                TokenKind::PipePipe,
                TokenKind::Bang,
                TokenKind::Equal,
            ]
        );
    }

    #[test]
    fn test_scan_string_escapes() {
        assert_eq!(
            tokenize(r#""a\nb" 'c\'d'"#),
            vec![
                TokenKind::String("a\nb".into()),
                TokenKind::String("c'd".into()),
            ]
        );
    }

    #[test]
    fn test_scan_unterminated_string() {
        assert_eq!(tokenize("\"oops"), vec![TokenKind::Invalid]);
    }

    #[test]
    fn test_scan_numbers() {
        assert_eq!(
            tokenize("1 3.14 0.5"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Number(3.14),
                TokenKind::Number(0.5),
            ]
        );
    }

    #[test]
    fn test_member_access_not_a_number() {
        // `m.f` must tokenize as identifier-dot-identifier
        assert_eq!(
            tokenize("m.f"),
            vec![
                TokenKind::Identifier("m".into()),
                TokenKind::Dot,
                TokenKind::Identifier("f".into()),
            ]
        );
    }

    #[test]
    fn test_scan_comments() {
        assert_eq!(
            tokenize("1 // comment\n 2 /* block\n comment */ 3"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Number(2.0),
                TokenKind::Number(3.0),
            ]
        );
    }

    #[test]
    fn test_scan_keywords_and_literals() {
        assert_eq!(
            tokenize("import helpers; true false nil"),
            vec![
                TokenKind::Import,
                TokenKind::Identifier("helpers".into()),
                TokenKind::Semicolon,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Nil,
            ]
        );
    }

    #[test]
    fn test_scan_invalid_character() {
        assert_eq!(tokenize("@"), vec![TokenKind::Invalid]);
    }
}
