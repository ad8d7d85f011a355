//! Lexer for Wisp source text.
//!
//! The lexer is intentionally simple: it recognizes keywords, type
//! names, numeric constants, string literals and single-character
//! punctuators, and tracks line/column positions for diagnostics.
//! All semantic interpretation happens in the parser.

use crate::error::CoreError;
use crate::span::Position;

/// Kind of a token produced by the lexer.
///
/// This is the full token vocabulary of the language surface. The
/// current lexer emits only `Keyword`, `Punctuator`, `Constant`,
/// `Identifier`, `Type` and `StringLiteral`; the remaining kinds are
/// reserved for the operator-classifying lexer stage and are rejected
/// by the parser as unknown tokens if they ever reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Punctuator,
    Constant,
    Identifier,
    Type,
    BinaryOperator,
    UnaryOperator,
    TernaryOperator,
    StringLiteral,
    NumberLiteral,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Punctuator => "punctuator",
            TokenKind::Constant => "constant",
            TokenKind::Identifier => "identifier",
            TokenKind::Type => "type",
            TokenKind::BinaryOperator => "binary operator",
            TokenKind::UnaryOperator => "unary operator",
            TokenKind::TernaryOperator => "ternary operator",
            TokenKind::StringLiteral => "string literal",
            TokenKind::NumberLiteral => "number literal",
        }
    }
}

/// A single token with its kind, text and source range.
///
/// Tokens are immutable once produced; the parser only reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub start: Position,
    pub end: Position,
}

/// Lex a source string into tokens.
///
/// Fails on the first unexpected character with its position; there
/// is no error recovery.
pub fn lex(source: &str) -> Result<Vec<Token>, CoreError> {
    let mut lexer = Lexer {
        chars: source.as_bytes(),
        index: 0,
        line: 1,
        col: 1,
    };
    lexer.run(source)
}

struct Lexer<'src> {
    chars: &'src [u8],
    index: usize,
    line: u32,
    col: u32,
}

impl<'src> Lexer<'src> {
    fn run(&mut self, source: &'src str) -> Result<Vec<Token>, CoreError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek_char() {
            if is_whitespace(ch) {
                self.consume_char();
                continue;
            }
            if ch == b'/' && self.peek_next() == Some(b'/') {
                self.skip_line_comment();
                continue;
            }

            let start = self.position();
            let token = match ch {
                b';' | b':' | b'=' | b'+' | b'-' | b'*' | b'/' | b'%' | b'(' | b')' | b'{'
                | b'}' | b',' => {
                    self.consume_char();
                    Token {
                        kind: TokenKind::Punctuator,
                        value: (ch as char).to_string(),
                        start,
                        end: self.position(),
                    }
                }
                b'"' => self.lex_string(source, start)?,
                b'0'..=b'9' => self.lex_number(source, start),
                _ => {
                    if is_ident_start(ch) {
                        self.lex_ident_or_keyword(source, start)
                    } else {
                        return Err(CoreError::LexError {
                            line: start.line,
                            col: start.col,
                            message: format!("unexpected character '{}'", ch as char),
                        });
                    }
                }
            };

            tokens.push(token);
        }

        Ok(tokens)
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch == b'\n' {
                break;
            }
            self.consume_char();
        }
    }

    fn lex_string(&mut self, source: &'src str, start: Position) -> Result<Token, CoreError> {
        // Consume the opening quote
        self.consume_char();

        let content_start = self.index;
        while let Some(ch) = self.peek_char() {
            match ch {
                b'"' => {
                    let content_end = self.index;
                    self.consume_char(); // closing quote
                    return Ok(Token {
                        kind: TokenKind::StringLiteral,
                        value: source[content_start..content_end].to_string(),
                        start,
                        end: self.position(),
                    });
                }
                b'\\' => {
                    // Skip over escape sequence: backslash + next char (if any)
                    self.consume_char();
                    if self.peek_char().is_some() {
                        self.consume_char();
                    }
                }
                _ => {
                    self.consume_char();
                }
            }
        }

        Err(CoreError::LexError {
            line: start.line,
            col: start.col,
            message: "unterminated string literal".to_string(),
        })
    }

    fn lex_number(&mut self, source: &'src str, start: Position) -> Token {
        let text_start = self.index;

        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                self.consume_char();
            } else {
                break;
            }
        }

        // '.' followed by a digit continues the constant as a float.
        if self.peek_char() == Some(b'.') {
            if let Some(next) = self.peek_next() {
                if next.is_ascii_digit() {
                    self.consume_char(); // '.'
                    while let Some(ch) = self.peek_char() {
                        if ch.is_ascii_digit() {
                            self.consume_char();
                        } else {
                            break;
                        }
                    }
                }
            }
        }

        Token {
            kind: TokenKind::Constant,
            value: source[text_start..self.index].to_string(),
            start,
            end: self.position(),
        }
    }

    fn lex_ident_or_keyword(&mut self, source: &'src str, start: Position) -> Token {
        let text_start = self.index;
        while let Some(ch) = self.peek_char() {
            if is_ident_continue(ch) {
                self.consume_char();
            } else {
                break;
            }
        }

        let text = &source[text_start..self.index];
        let kind = match text {
            "let" | "const" | "function" | "export" | "import" | "return" => TokenKind::Keyword,
            "i32" | "i64" | "f32" | "f64" | "void" => TokenKind::Type,
            _ => TokenKind::Identifier,
        };

        Token {
            kind,
            value: text.to_string(),
            start,
            end: self.position(),
        }
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }

    fn peek_char(&self) -> Option<u8> {
        self.chars.get(self.index).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.chars.get(self.index + 1).copied()
    }

    fn consume_char(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.index += 1;
            if ch == b'\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }
}

fn is_whitespace(ch: u8) -> bool {
    matches!(ch, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_ident_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_' || ch == b'$'
}

fn is_ident_continue(ch: u8) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source)
            .expect("lex")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_a_declaration() {
        let tokens = lex("const x: i32 = 5;").expect("lex");
        let values: Vec<_> = tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, ["const", "x", ":", "i32", "=", "5", ";"]);
        assert_eq!(
            kinds("const x: i32 = 5;"),
            [
                TokenKind::Keyword,
                TokenKind::Identifier,
                TokenKind::Punctuator,
                TokenKind::Type,
                TokenKind::Punctuator,
                TokenKind::Constant,
                TokenKind::Punctuator,
            ]
        );
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = lex("let a: i32;\nlet b: f64;").expect("lex");
        let b = tokens.iter().find(|t| t.value == "b").expect("token b");
        assert_eq!(b.start, Position::new(2, 5));
        assert_eq!(b.end, Position::new(2, 6));
    }

    #[test]
    fn distinguishes_types_from_identifiers() {
        let tokens = lex("i32 i33 f64 foo void").expect("lex");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            [
                TokenKind::Type,
                TokenKind::Identifier,
                TokenKind::Type,
                TokenKind::Identifier,
                TokenKind::Type,
            ]
        );
    }

    #[test]
    fn lexes_float_constants() {
        let tokens = lex("2.5 40").expect("lex");
        assert_eq!(tokens[0].value, "2.5");
        assert_eq!(tokens[0].kind, TokenKind::Constant);
        assert_eq!(tokens[1].value, "40");
    }

    #[test]
    fn skips_line_comments() {
        let tokens = lex("// nothing here\nlet x: i32; // trailing\n").expect("lex");
        let values: Vec<_> = tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, ["let", "x", ":", "i32", ";"]);
    }

    #[test]
    fn lexes_string_literals() {
        let tokens = lex("\"hello\"").expect("lex");
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].value, "hello");
    }

    #[test]
    fn reports_unexpected_characters_with_position() {
        let err = lex("let x: i32;\n  @").unwrap_err();
        match err {
            CoreError::LexError { line, col, .. } => {
                assert_eq!((line, col), (2, 3));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_source_yields_no_tokens() {
        assert!(lex("").expect("lex").is_empty());
    }
}
