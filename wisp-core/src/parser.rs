//! Recursive-descent parser for Wisp.
//!
//! LL(1) over a [`TokenStream`]: one token of lookahead, no
//! backtracking, fail-fast on the first grammar violation. Parsing a
//! module-scope declaration or export appends the derived record to
//! the program's declaration table as a side effect; the binary
//! emitters consume those records after the parse completes.
//!
//! Binary expressions are folded with a single-pass precedence
//! rotation: each incoming operator is compared against the operator
//! of the previously built node and re-parented when the binding
//! strengths differ. This is correct for the two precedence tiers of
//! the grammar and deliberately not generalized to full precedence
//! climbing.

use crate::ast::{BinaryExpr, Constant, Declaration, Export, Identifier, Node, Program};
use crate::error::{CoreError, ParseError};
use crate::lexer::{Token, TokenKind, lex};
use crate::records::{ConstValue, ExportRecord, ExternalKind, GlobalInit, GlobalRecord, ValueType};
use crate::span::{Position, Span};
use crate::token_stream::TokenStream;

/// Operator binding strength; higher binds tighter. `=` is a marker
/// used to detect assignment, not a true arithmetic operator: its
/// out-of-band value keeps every arithmetic operator sinking into the
/// right-hand side of an assignment.
fn precedence(operator: &str) -> u8 {
    match operator {
        "=" => 99,
        "+" | "-" => 0,
        "*" | "/" | "%" => 1,
        _ => 0,
    }
}

const DECLARATION_KEYWORDS: [&str; 3] = ["let", "const", "function"];

/// Lex and parse a source string into a [`Program`].
pub fn parse(source: &str) -> Result<Program, CoreError> {
    let tokens = lex(source)?;
    let mut parser = Parser::new(TokenStream::new(tokens));
    Ok(parser.parse_program()?)
}

/// Parser state: the token cursor plus the declaration table being
/// filled. A fresh parser is created per parse; nothing is shared
/// across invocations.
pub struct Parser {
    stream: TokenStream,
    globals: Vec<GlobalRecord>,
    exports: Vec<ExportRecord>,
    last_pos: Position,
}

impl Parser {
    pub fn new(stream: TokenStream) -> Self {
        Parser {
            stream,
            globals: Vec::new(),
            exports: Vec::new(),
            last_pos: Position::new(1, 1),
        }
    }

    /// Parse the whole token stream into a program.
    ///
    /// An empty stream is valid and yields an empty program, which
    /// maps to the minimal empty module downstream.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        if self.stream.is_empty() {
            return Ok(Program::default());
        }

        let mut body = Vec::new();
        while self.stream.peek().is_some() {
            if let Some(node) = self.expression(&mut body)? {
                body.push(node);
            }
        }

        Ok(Program {
            body,
            globals: std::mem::take(&mut self.globals),
            exports: std::mem::take(&mut self.exports),
        })
    }

    /// Parse one construct, dispatching on the current token's kind.
    ///
    /// Returns `None` for tokens that close a statement without
    /// producing a node of their own (`;`).
    fn expression(&mut self, body: &mut Vec<Node>) -> Result<Option<Node>, ParseError> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Keyword => self.keyword(token).map(Some),
            TokenKind::Punctuator => self.punctuator(token, body),
            TokenKind::Constant => Ok(Some(self.constant(token))),
            TokenKind::Identifier => Ok(Some(self.identifier(token))),
            _ => Err(ParseError::UnknownToken {
                value: token.value,
                line: token.start.line,
                col: token.start.col,
            }),
        }
    }

    fn keyword(&mut self, token: Token) -> Result<Node, ParseError> {
        match token.value.as_str() {
            "let" | "const" | "function" => {
                self.declaration(token, false).map(Node::Declaration)
            }
            "export" => self.export(token),
            _ => Err(unsupported(&token)),
        }
    }

    fn punctuator(
        &mut self,
        token: Token,
        body: &mut Vec<Node>,
    ) -> Result<Option<Node>, ParseError> {
        match token.value.as_str() {
            // Statement terminator: closes the current node, yields none.
            ";" => Ok(None),
            "=" | "+" | "-" | "*" | "/" | "%" => self.binary(token, body),
            _ => Err(unsupported(&token)),
        }
    }

    /// `(let|const) <identifier> : <type> [= <expression>]`
    ///
    /// At module scope the declaration is assigned the next global
    /// index and its derived record is appended to the globals table.
    fn declaration(&mut self, keyword: Token, in_function: bool) -> Result<Declaration, ParseError> {
        let start = keyword.start;
        let is_const = keyword.value == "const";

        let id = self.expect(TokenKind::Identifier, None)?;
        self.expect(TokenKind::Punctuator, Some(&[":"]))?;
        let annotation = self.expect(TokenKind::Type, None)?;
        let value_type = ValueType::from_name(&annotation.value);

        let mut end = annotation.end;
        let mut init = None;
        if let Some(next) = self.stream.peek() {
            if next.kind == TokenKind::Punctuator && next.value == "=" {
                let equals = self.advance()?;
                let node = self.initializer(&equals)?;
                end = node.span().end;
                init = Some(Box::new(node));
            }
        }

        if is_const && init.is_none() {
            return Err(ParseError::semantic("constant must be initialized", start));
        }

        let mut declaration = Declaration {
            id: id.value,
            is_const,
            value_type,
            init,
            global_index: None,
            span: Span::new(start, end),
        };

        if !in_function {
            declaration.global_index = Some(self.globals.len() as u32);
            let record = derive_global(&declaration)?;
            self.globals.push(record);
        }

        Ok(declaration)
    }

    /// Parse the initializer following `=` up to the statement
    /// terminator, folding binary chains as they arrive.
    fn initializer(&mut self, equals: &Token) -> Result<Node, ParseError> {
        let mut exprs = Vec::new();
        while let Some(next) = self.stream.peek() {
            if next.kind == TokenKind::Punctuator && next.value == ";" {
                break;
            }
            if let Some(node) = self.expression(&mut exprs)? {
                exprs.push(node);
            }
        }

        exprs.pop().ok_or_else(|| match self.stream.peek() {
            Some(next) => ParseError::UnexpectedValue {
                expected: "an initializer expression".to_string(),
                actual: next.value.clone(),
                line: next.start.line,
                col: next.start.col,
            },
            None => ParseError::UnexpectedValue {
                expected: "an initializer expression".to_string(),
                actual: "end of input".to_string(),
                line: equals.end.line,
                col: equals.end.col,
            },
        })
    }

    /// `export (let|const|function) ...`
    ///
    /// Exports must wrap an initialized declaration; the violation is
    /// raised before any export record is appended.
    fn export(&mut self, export: Token) -> Result<Node, ParseError> {
        let start = export.start;

        match self.stream.peek() {
            None => {
                return Err(ParseError::UnexpectedToken {
                    expected: "keyword".to_string(),
                    actual: "end of input".to_string(),
                    line: self.last_pos.line,
                    col: self.last_pos.col,
                });
            }
            Some(next) if next.kind != TokenKind::Keyword => {
                return Err(ParseError::UnexpectedToken {
                    expected: "keyword".to_string(),
                    actual: format!("{} '{}'", next.kind.name(), next.value),
                    line: next.start.line,
                    col: next.start.col,
                });
            }
            Some(next) if !DECLARATION_KEYWORDS.contains(&next.value.as_str()) => {
                return Err(ParseError::UnexpectedValue {
                    expected: "'let' or 'const' or 'function'".to_string(),
                    actual: next.value.clone(),
                    line: next.start.line,
                    col: next.start.col,
                });
            }
            Some(_) => {}
        }

        let keyword = self.advance()?;
        let declaration = self.declaration(keyword, false)?;

        if declaration.init.is_none() {
            return Err(ParseError::semantic("exports must have a value", start));
        }
        let Some(index) = declaration.global_index else {
            return Err(ParseError::semantic(
                "exported declaration is not at module scope",
                start,
            ));
        };

        self.exports.push(ExportRecord {
            index,
            kind: ExternalKind::Global,
            field: declaration.id.clone(),
        });

        let span = Span::new(start, declaration.span.end);
        Ok(Node::Export(Export { declaration, span }))
    }

    /// Fold a binary operator against the most recently parsed node.
    ///
    /// When the previous node is itself a binary expression and the
    /// two operators differ in precedence, the new node is rotated
    /// into the previous node's right subtree; equal precedence
    /// left-associates by keeping the first-built shape.
    fn binary(&mut self, operator: Token, body: &mut Vec<Node>) -> Result<Option<Node>, ParseError> {
        let Some(left) = body.pop() else {
            // Operator with nothing on its left: unary position.
            return Err(unsupported(&operator));
        };

        let right = self.operand(body)?;
        let operator = operator.value;
        let span = Span::new(left.span().start, right.span().end);

        if let Node::Binary(mut prev) = left {
            if precedence(&prev.operator) != precedence(&operator) {
                // Rotate: the tighter-binding pair sinks into the
                // right-hand subtree of the looser node.
                let taken = prev.right;
                let inner_span = Span::new(taken.span().start, right.span().end);
                prev.right = Box::new(Node::Binary(BinaryExpr {
                    operator,
                    left: taken,
                    right: Box::new(right),
                    span: inner_span,
                }));
                prev.span.end = inner_span.end;
                return Ok(Some(Node::Binary(prev)));
            }
            return Ok(Some(Node::Binary(BinaryExpr {
                operator,
                left: Box::new(Node::Binary(prev)),
                right: Box::new(right),
                span,
            })));
        }

        Ok(Some(Node::Binary(BinaryExpr {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            span,
        })))
    }

    /// One right-hand operand for a binary operator.
    fn operand(&mut self, body: &mut Vec<Node>) -> Result<Node, ParseError> {
        match self.expression(body)? {
            Some(node) => Ok(node),
            None => Err(ParseError::UnexpectedValue {
                expected: "an expression".to_string(),
                actual: "';'".to_string(),
                line: self.last_pos.line,
                col: self.last_pos.col,
            }),
        }
    }

    fn constant(&self, token: Token) -> Node {
        Node::Constant(Constant {
            value: token.value,
            span: Span::new(token.start, token.end),
        })
    }

    fn identifier(&self, token: Token) -> Node {
        Node::Identifier(Identifier {
            id: token.value,
            span: Span::new(token.start, token.end),
        })
    }

    /// Consume the current token, requiring its kind (and optionally
    /// its value) to match the grammar position.
    fn expect(&mut self, kind: TokenKind, values: Option<&[&str]>) -> Result<Token, ParseError> {
        let Some(token) = self.stream.peek() else {
            return Err(ParseError::UnexpectedToken {
                expected: kind.name().to_string(),
                actual: "end of input".to_string(),
                line: self.last_pos.line,
                col: self.last_pos.col,
            });
        };

        if token.kind != kind {
            return Err(ParseError::UnexpectedToken {
                expected: kind.name().to_string(),
                actual: format!("{} '{}'", token.kind.name(), token.value),
                line: token.start.line,
                col: token.start.col,
            });
        }

        if let Some(values) = values {
            if !values.contains(&token.value.as_str()) {
                return Err(ParseError::UnexpectedValue {
                    expected: format!("'{}'", values.join("' or '")),
                    actual: token.value.clone(),
                    line: token.start.line,
                    col: token.start.col,
                });
            }
        }

        self.advance()
    }

    fn advance(&mut self) -> Result<Token, ParseError> {
        match self.stream.next() {
            Some(token) => {
                self.last_pos = token.end;
                Ok(token)
            }
            None => Err(ParseError::UnexpectedToken {
                expected: "a token".to_string(),
                actual: "end of input".to_string(),
                line: self.last_pos.line,
                col: self.last_pos.col,
            }),
        }
    }
}

fn unsupported(token: &Token) -> ParseError {
    ParseError::UnsupportedFeature {
        value: token.value.clone(),
        line: token.start.line,
        col: token.start.col,
    }
}

/// Derive the globals-section record for a module-scope declaration.
///
/// Module-scope globals must be literal-initialized: a computed
/// initializer is a semantic violation rather than the start of a
/// constant-folding pass. Declarations without an initializer encode
/// the typed zero constant, since a wasm global entry always carries
/// an initializer expression.
fn derive_global(declaration: &Declaration) -> Result<GlobalRecord, ParseError> {
    let init = match declaration.init.as_deref() {
        None => GlobalInit::Const(declaration.value_type.zero()),
        Some(Node::Constant(constant)) => GlobalInit::Const(resolve_constant(
            &constant.value,
            declaration.value_type,
            constant.span.start,
        )?),
        Some(other) => {
            return Err(ParseError::semantic(
                "global initializer must be a constant expression",
                other.span().start,
            ));
        }
    };

    Ok(GlobalRecord {
        ty: declaration.value_type,
        mutable: !declaration.is_const,
        init,
    })
}

/// Resolve a literal's text against the declared type.
fn resolve_constant(text: &str, ty: ValueType, at: Position) -> Result<ConstValue, ParseError> {
    let invalid = || ParseError::semantic(format!("invalid {} constant '{text}'", type_name(ty)), at);
    match ty {
        ValueType::I32 => text.parse::<i32>().map(ConstValue::I32).map_err(|_| invalid()),
        ValueType::I64 => text.parse::<i64>().map(ConstValue::I64).map_err(|_| invalid()),
        ValueType::F32 => text.parse::<f32>().map(ConstValue::F32).map_err(|_| invalid()),
        ValueType::F64 => text.parse::<f64>().map(ConstValue::F64).map_err(|_| invalid()),
    }
}

fn type_name(ty: ValueType) -> &'static str {
    match ty {
        ValueType::I32 => "i32",
        ValueType::I64 => "i64",
        ValueType::F32 => "f32",
        ValueType::F64 => "f64",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_statement(source: &str) -> Node {
        let program = parse(source).expect("parse");
        assert_eq!(program.body.len(), 1, "expected one statement");
        program.body.into_iter().next().expect("statement")
    }

    #[test]
    fn parses_const_declaration_into_global_record() {
        let program = parse("const x: i32 = 5;").expect("parse");

        let Node::Declaration(decl) = &program.body[0] else {
            panic!("expected declaration, got {:?}", program.body[0]);
        };
        assert_eq!(decl.id, "x");
        assert!(decl.is_const);
        assert_eq!(decl.global_index, Some(0));
        assert!(matches!(decl.init.as_deref(), Some(Node::Constant(c)) if c.value == "5"));

        assert_eq!(
            program.globals,
            vec![GlobalRecord {
                ty: ValueType::I32,
                mutable: false,
                init: GlobalInit::Const(ConstValue::I32(5)),
            }]
        );
        assert!(program.exports.is_empty());
    }

    #[test]
    fn let_without_initializer_parses_with_none() {
        let program = parse("let counter: i32;").expect("parse");
        let Node::Declaration(decl) = &program.body[0] else {
            panic!("expected declaration");
        };
        assert!(decl.init.is_none());
        assert!(!decl.is_const);
        // The record still carries an initializer: the typed zero.
        assert_eq!(
            program.globals[0],
            GlobalRecord {
                ty: ValueType::I32,
                mutable: true,
                init: GlobalInit::Const(ConstValue::I32(0)),
            }
        );
    }

    #[test]
    fn const_without_initializer_is_a_semantic_violation() {
        let err = parse("const x: i32;").unwrap_err();
        let CoreError::Parse(ParseError::SemanticViolation { message, line, col }) = err else {
            panic!("expected semantic violation, got {err:?}");
        };
        assert_eq!(message, "constant must be initialized");
        assert_eq!((line, col), (1, 1));
    }

    #[test]
    fn export_records_point_at_the_declared_global() {
        let program = parse("export const y: i32 = 10;").expect("parse");

        assert_eq!(program.globals.len(), 1);
        assert_eq!(
            program.exports,
            vec![ExportRecord {
                index: 0,
                kind: ExternalKind::Global,
                field: "y".to_string(),
            }]
        );
        let Node::Export(export) = &program.body[0] else {
            panic!("expected export node");
        };
        assert_eq!(export.declaration.global_index, Some(0));
    }

    #[test]
    fn export_index_follows_declaration_order() {
        let program =
            parse("const a: i32 = 1;\nexport let b: f64 = 2.5;").expect("parse");
        assert_eq!(program.globals.len(), 2);
        assert_eq!(program.exports.len(), 1);
        assert_eq!(program.exports[0].index, 1);
        assert_eq!(
            program.globals[1],
            GlobalRecord {
                ty: ValueType::F64,
                mutable: true,
                init: GlobalInit::Const(ConstValue::F64(2.5)),
            }
        );
    }

    #[test]
    fn uninitialized_export_fails_before_any_record_is_emitted() {
        let tokens = lex("export let z: i32;").expect("lex");
        let mut parser = Parser::new(TokenStream::new(tokens));
        let err = parser.parse_program().unwrap_err();
        assert!(
            matches!(&err, ParseError::SemanticViolation { message, .. }
                if message == "exports must have a value"),
            "unexpected error: {err:?}"
        );
        assert!(parser.exports.is_empty());
    }

    #[test]
    fn export_requires_a_declaration_keyword() {
        let err = parse("export foo;").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Parse(ParseError::UnexpectedToken { .. })
        ));

        let err = parse("export return;").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Parse(ParseError::UnexpectedValue { .. })
        ));
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        // a + b * c must fold as a + (b * c).
        let node = single_statement("a + b * c;");
        let Node::Binary(add) = node else {
            panic!("expected binary node");
        };
        assert_eq!(add.operator, "+");
        assert!(matches!(&*add.left, Node::Identifier(id) if id.id == "a"));
        let Node::Binary(mul) = &*add.right else {
            panic!("expected nested multiplication, got {:?}", add.right);
        };
        assert_eq!(mul.operator, "*");
        assert!(matches!(&*mul.left, Node::Identifier(id) if id.id == "b"));
        assert!(matches!(&*mul.right, Node::Identifier(id) if id.id == "c"));
    }

    #[test]
    fn equal_precedence_left_associates() {
        // a - b + c keeps the first-built shape: (a - b) + c.
        let node = single_statement("a - b + c;");
        let Node::Binary(outer) = node else {
            panic!("expected binary node");
        };
        assert_eq!(outer.operator, "+");
        let Node::Binary(inner) = &*outer.left else {
            panic!("expected nested subtraction");
        };
        assert_eq!(inner.operator, "-");
        assert!(matches!(&*outer.right, Node::Identifier(id) if id.id == "c"));
    }

    #[test]
    fn assignment_stays_outermost() {
        // a = b + 1 folds the arithmetic under the assignment marker.
        let node = single_statement("a = b + 1;");
        let Node::Binary(assign) = node else {
            panic!("expected binary node");
        };
        assert_eq!(assign.operator, "=");
        assert!(matches!(&*assign.left, Node::Identifier(id) if id.id == "a"));
        let Node::Binary(add) = &*assign.right else {
            panic!("expected arithmetic under the assignment");
        };
        assert_eq!(add.operator, "+");
    }

    #[test]
    fn empty_input_yields_an_empty_program() {
        let program = parse("").expect("parse");
        assert!(program.is_empty());
    }

    #[test]
    fn unknown_token_kind_reports_its_position() {
        let err = parse("\ni32;").unwrap_err();
        let CoreError::Parse(ParseError::UnknownToken { value, line, col }) = err else {
            panic!("expected unknown token, got {err:?}");
        };
        assert_eq!(value, "i32");
        assert_eq!((line, col), (2, 1));
    }

    #[test]
    fn unimplemented_keywords_are_unsupported_features() {
        let err = parse("import x;").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Parse(ParseError::UnsupportedFeature { .. })
        ));
    }

    #[test]
    fn unimplemented_punctuators_are_unsupported_features() {
        let err = parse("{").unwrap_err();
        let CoreError::Parse(ParseError::UnsupportedFeature { value, .. }) = err else {
            panic!("expected unsupported feature, got {err:?}");
        };
        assert_eq!(value, "{");
    }

    #[test]
    fn unary_minus_is_not_supported() {
        let err = parse("const x: i32 = -5;").unwrap_err();
        let CoreError::Parse(ParseError::UnsupportedFeature { value, .. }) = err else {
            panic!("expected unsupported feature, got {err:?}");
        };
        assert_eq!(value, "-");
    }

    #[test]
    fn computed_global_initializers_are_rejected() {
        let err = parse("const x: i32 = 2 + 3;").unwrap_err();
        assert!(
            matches!(&err, CoreError::Parse(ParseError::SemanticViolation { message, .. })
                if message.contains("constant expression")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn unrecognized_annotation_falls_back_to_i32() {
        let program = parse("let v: void = 1;").expect("parse");
        assert_eq!(program.globals[0].ty, ValueType::I32);
    }

    #[test]
    fn literal_must_fit_the_declared_type() {
        let err = parse("const x: i32 = 2.5;").unwrap_err();
        assert!(
            matches!(&err, CoreError::Parse(ParseError::SemanticViolation { message, .. })
                if message.contains("invalid i32 constant")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn float_literals_resolve_against_f32() {
        let program = parse("const x: f32 = 1.5;").expect("parse");
        assert_eq!(
            program.globals[0].init,
            GlobalInit::Const(ConstValue::F32(1.5))
        );
    }

    #[test]
    fn missing_colon_is_an_unexpected_token() {
        let err = parse("const x i32 = 5;").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Parse(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn missing_initializer_after_equals_is_rejected() {
        let err = parse("let x: i32 = ;").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Parse(ParseError::UnexpectedValue { .. })
        ));
    }
}
