//! alanpp-par - recursive-descent parser for Alan++.
//!
//! Alan++'s grammar is LL(1): every production is chosen by looking at
//! exactly one token of lookahead, so this crate needs none of the
//! operator-precedence machinery a general-purpose expression grammar would
//! (no binding-power tables, no Pratt loop) — a `match` on the current
//! token's kind is enough at every choice point. The grammar itself:
//!
//! ```text
//! Program        ::= Block EOP
//! Block          ::= '{' StatementList '}'
//! StatementList  ::= Statement StatementList | ε
//! Statement      ::= PrintStmt | AssignStmt | VarDecl | WhileStmt | IfStmt | Block
//! PrintStmt      ::= 'print' '(' Expr ')'
//! AssignStmt     ::= ID '=' Expr
//! VarDecl        ::= TYPE ID
//! WhileStmt      ::= 'while' BoolExpr Block
//! IfStmt         ::= 'if' BoolExpr Block
//! Expr           ::= IntExpr | StringExpr | BoolExpr | ID
//! IntExpr        ::= DIGIT ('+' Expr)?
//! StringExpr     ::= '"' CHAR* '"'
//! BoolExpr       ::= '(' Expr BOOLOP Expr ')' | BOOLVAL
//! ```
//!
//! `Parser::parse_program` only ever returns a [`CstNode`] once the whole
//! program parsed without error; any failed production reports a diagnostic
//! and returns `None`, and every caller up the chain propagates that `None`
//! rather than trying to resynchronize and keep going. A malformed program
//! gets exactly the diagnostics produced up to the point parsing gave up.

pub mod ast;
pub mod edge_cases;
pub mod expr;
pub mod stmt;

pub use ast::CstNode;

use alanpp_lex::{Lexer, Token, TokenKind};
use alanpp_util::{DiagnosticBuilder, DiagnosticCode, Handler, Span, Stage};

/// Parses a token stream into a [`CstNode`] tree.
///
/// The whole token stream is materialized up front (Alan++ source files are
/// small, and the single `+`-chain in `IntExpr` needs unbounded lookahead in
/// the worst case, so there is no benefit to driving the lexer lazily token
/// by token).
pub struct Parser<'a> {
    tokens: Vec<Token>,
    position: usize,
    handler: &'a Handler,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, handler: &'a Handler) -> Self {
        Self {
            tokens,
            position: 0,
            handler,
        }
    }

    /// Lexes `source` and hands the resulting tokens to a new parser.
    pub fn from_source(source: &str, handler: &'a Handler) -> Self {
        let tokens: Vec<Token> = Lexer::new(source, handler).collect();
        Self::new(tokens, handler)
    }

    /// `Program ::= Block EOP`
    pub fn parse_program(&mut self) -> Option<CstNode> {
        let block = self.parse_block()?;
        let eop = self.expect_eop()?;
        Some(CstNode::node("Program", vec![block, eop]))
    }

    pub(crate) fn current(&self) -> Token {
        self.tokens
            .get(self.position)
            .cloned()
            .unwrap_or_else(|| self.synthetic_eof())
    }

    fn synthetic_eof(&self) -> Token {
        let (line, column) = self
            .tokens
            .last()
            .map(|t| (t.line, t.column))
            .unwrap_or((1, 1));
        Token::new(TokenKind::Eof, line, column)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let tok = self.current();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        tok
    }

    /// Reports the offending token's position, or the previous token's
    /// position if the stream has already run out.
    fn error_position(&self) -> (u32, u32) {
        if let Some(tok) = self.tokens.get(self.position) {
            (tok.line, tok.column)
        } else if let Some(prev) = self.tokens.last() {
            (prev.line, prev.column)
        } else {
            (1, 1)
        }
    }

    pub(crate) fn error(&self, code: DiagnosticCode, message: impl Into<String>) {
        let (line, column) = self.error_position();
        DiagnosticBuilder::error(message)
            .code(code)
            .stage(Stage::Parser)
            .span(Span::point(line, column))
            .emit(self.handler);
    }

    /// Consumes a token whose kind carries no data (braces, parens, `=`,
    /// `+`, keywords, `$`) and renders a CST leaf from it.
    pub(crate) fn expect_exact(
        &mut self,
        expected: TokenKind,
        node_name: &'static str,
    ) -> Option<CstNode> {
        let tok = self.current();
        if tok.kind == expected {
            self.advance();
            Some(CstNode::leaf(
                node_name,
                tok.kind.to_string(),
                tok.line,
                tok.column,
            ))
        } else {
            self.error(
                DiagnosticCode::E_PARSER_EXPECTED_TOKEN,
                format!("expected '{expected}', found '{}'", tok.kind),
            );
            None
        }
    }

    pub(crate) fn expect_id(&mut self) -> Option<CstNode> {
        let tok = self.current();
        if let TokenKind::Id(sym) = &tok.kind {
            let sym = *sym;
            self.advance();
            Some(CstNode::leaf("Id", sym.to_string(), tok.line, tok.column))
        } else {
            self.error(
                DiagnosticCode::E_PARSER_EXPECTED_TOKEN,
                format!("expected an identifier, found '{}'", tok.kind),
            );
            None
        }
    }

    pub(crate) fn expect_type(&mut self) -> Option<CstNode> {
        let tok = self.current();
        if let TokenKind::Type(ty) = &tok.kind {
            let ty = *ty;
            self.advance();
            Some(CstNode::leaf("Type", ty.as_str(), tok.line, tok.column))
        } else {
            self.error(
                DiagnosticCode::E_PARSER_EXPECTED_TOKEN,
                format!("expected a type keyword, found '{}'", tok.kind),
            );
            None
        }
    }

    pub(crate) fn expect_digit(&mut self) -> Option<CstNode> {
        let tok = self.current();
        if let TokenKind::Digit(d) = &tok.kind {
            let d = *d;
            self.advance();
            Some(CstNode::leaf("Digit", d.to_string(), tok.line, tok.column))
        } else {
            self.error(
                DiagnosticCode::E_PARSER_EXPECTED_TOKEN,
                format!("expected a digit, found '{}'", tok.kind),
            );
            None
        }
    }

    pub(crate) fn expect_char(&mut self) -> Option<CstNode> {
        let tok = self.current();
        if let TokenKind::Char(c) = &tok.kind {
            let c = *c;
            self.advance();
            Some(CstNode::leaf("Char", c.to_string(), tok.line, tok.column))
        } else {
            self.error(
                DiagnosticCode::E_PARSER_EXPECTED_TOKEN,
                format!("expected a string character, found '{}'", tok.kind),
            );
            None
        }
    }

    pub(crate) fn expect_boolval(&mut self) -> Option<CstNode> {
        let tok = self.current();
        if let TokenKind::BoolVal(b) = &tok.kind {
            let b = *b;
            self.advance();
            Some(CstNode::leaf("BoolVal", b.to_string(), tok.line, tok.column))
        } else {
            self.error(
                DiagnosticCode::E_PARSER_EXPECTED_TOKEN,
                format!("expected 'true' or 'false', found '{}'", tok.kind),
            );
            None
        }
    }

    pub(crate) fn expect_boolop(&mut self) -> Option<CstNode> {
        let tok = self.current();
        if let TokenKind::BoolOp(op) = &tok.kind {
            let op = *op;
            self.advance();
            Some(CstNode::leaf("BoolOp", op.as_str(), tok.line, tok.column))
        } else {
            self.error(
                DiagnosticCode::E_PARSER_EXPECTED_TOKEN,
                format!("expected '==' or '!=', found '{}'", tok.kind),
            );
            None
        }
    }

    fn expect_eop(&mut self) -> Option<CstNode> {
        let tok = self.current();
        if tok.kind == TokenKind::Eop {
            self.advance();
            Some(CstNode::leaf("Eop", "$", tok.line, tok.column))
        } else {
            self.error(
                DiagnosticCode::E_PARSER_MISSING_EOP,
                "program is missing its '$' end-of-program marker",
            );
            None
        }
    }
}
