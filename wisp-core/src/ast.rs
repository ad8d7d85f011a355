//! AST nodes produced by the parser.

use crate::records::{ExportRecord, GlobalRecord, ValueType};
use crate::span::Span;

/// A parsed node, tagged by construct.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Declaration(Declaration),
    Export(Export),
    Constant(Constant),
    Identifier(Identifier),
    Binary(BinaryExpr),
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Node::Declaration(n) => n.span,
            Node::Export(n) => n.span,
            Node::Constant(n) => n.span,
            Node::Identifier(n) => n.span,
            Node::Binary(n) => n.span,
        }
    }
}

/// A `let` / `const` variable declaration.
///
/// `global_index` is assigned only for module-scope declarations, in
/// declaration order starting at 0, and is stable once set: it equals
/// the declaration's position in `Program::globals` at assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub id: String,
    pub is_const: bool,
    pub value_type: ValueType,
    pub init: Option<Box<Node>>,
    pub global_index: Option<u32>,
    pub span: Span,
}

/// An `export` statement wrapping an initialized declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    pub declaration: Declaration,
    pub span: Span,
}

/// A numeric literal; the raw text is kept, the numeric type is
/// resolved later against the declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub id: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub operator: String,
    pub left: Box<Node>,
    pub right: Box<Node>,
    pub span: Span,
}

/// Root of a parse: the statement list plus the declaration table
/// populated as a side effect while parsing.
///
/// The globals/exports lists are append-only and owned exclusively by
/// the program for its lifetime: one parse pass fills them, then the
/// emitters read them and the program is discarded.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Node>,
    pub globals: Vec<GlobalRecord>,
    pub exports: Vec<ExportRecord>,
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.body.is_empty() && self.globals.is_empty() && self.exports.is_empty()
    }
}
