//! Source positions for diagnostics.

/// A line/column position in the source text.
///
/// Lines and columns are 1-based. Positions exist purely for
/// diagnostics; nothing in the pipeline branches on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    pub fn new(line: u32, col: u32) -> Self {
        Position { line, col }
    }
}

/// A half-open source range, carried by every token and AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }
}
