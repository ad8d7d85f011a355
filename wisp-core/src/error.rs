use thiserror::Error;

use crate::span::Position;

/// Grammar and contract violations raised by the parser.
///
/// Every variant is fatal to the current parse: the parser unwinds on
/// the first error and never returns a partial AST. Each variant
/// carries the offending position plus enough expected-vs-actual
/// context to locate the fault in source text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected token at {line}:{col}: found {actual}, expected {expected}")]
    UnexpectedToken {
        expected: String,
        actual: String,
        line: u32,
        col: u32,
    },
    #[error("unexpected value at {line}:{col}: found '{actual}', expected {expected}")]
    UnexpectedValue {
        expected: String,
        actual: String,
        line: u32,
        col: u32,
    },
    #[error("unknown token at {line}:{col}: '{value}'")]
    UnknownToken { value: String, line: u32, col: u32 },
    #[error("language feature not supported at {line}:{col}: '{value}'")]
    UnsupportedFeature { value: String, line: u32, col: u32 },
    #[error("{message} at {line}:{col}")]
    SemanticViolation {
        message: String,
        line: u32,
        col: u32,
    },
}

impl ParseError {
    pub fn semantic(message: impl Into<String>, at: Position) -> Self {
        ParseError::SemanticViolation {
            message: message.into(),
            line: at.line,
            col: at.col,
        }
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to read source: {0}")]
    SourceIo(#[from] std::io::Error),
    #[error("lex error at {line}:{col}: {message}")]
    LexError {
        line: u32,
        col: u32,
        message: String,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}
