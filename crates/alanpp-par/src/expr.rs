//! Expression parsing.
//!
//! ```text
//! Expr           ::= IntExpr | StringExpr | BoolExpr | ID
//! IntExpr        ::= DIGIT ('+' Expr)?
//! StringExpr     ::= '"' CHAR* '"'
//! BoolExpr       ::= '(' Expr BOOLOP Expr ')' | BOOLVAL
//! ```
//!
//! There is exactly one operator (`+`) and it appears at exactly one place
//! in the grammar, so there is no precedence to climb: `IntExpr` is a single
//! `DIGIT` optionally followed by `'+' Expr` — note that the right-hand side
//! of `+` is a full `Expr`, not another `IntExpr`, so `1+1` and `1+(a==b)`
//! are both grammatically `IntExpr`s whose second child is an arbitrary
//! expression. This reads as a right-associative chain of single digits
//! rather than assembling a multi-digit integer; `12` is two `IntExpr`s in
//! sequence at the statement level; a single `IntExpr` node only spans
//! digits joined by `+`.

use alanpp_lex::TokenKind;
use alanpp_util::DiagnosticCode;

use crate::{CstNode, Parser};

impl<'a> Parser<'a> {
    pub fn parse_expr(&mut self) -> Option<CstNode> {
        let inner = match self.current().kind {
            TokenKind::Digit(_) => self.parse_int_expr()?,
            TokenKind::Quote => self.parse_string_expr()?,
            TokenKind::LParen | TokenKind::BoolVal(_) => self.parse_bool_expr()?,
            TokenKind::Id(_) => self.expect_id()?,
            ref other => {
                self.error(
                    DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                    format!("'{other}' does not start an expression"),
                );
                return None;
            }
        };
        Some(CstNode::node("Expr", vec![inner]))
    }

    fn parse_int_expr(&mut self) -> Option<CstNode> {
        let digit = self.expect_digit()?;
        let mut children = vec![digit];
        if self.current().kind == TokenKind::IntOp {
            let op = self.expect_exact(TokenKind::IntOp, "IntOp")?;
            let rhs = self.parse_expr()?;
            children.push(op);
            children.push(rhs);
        }
        Some(CstNode::node("IntExpr", children))
    }

    fn parse_string_expr(&mut self) -> Option<CstNode> {
        let open = self.expect_exact(TokenKind::Quote, "Quote")?;
        let mut children = vec![open];
        while matches!(self.current().kind, TokenKind::Char(_)) {
            children.push(self.expect_char()?);
        }
        let close = self.expect_exact(TokenKind::Quote, "Quote")?;
        children.push(close);
        Some(CstNode::node("StringExpr", children))
    }

    pub(crate) fn parse_bool_expr(&mut self) -> Option<CstNode> {
        if self.current().kind == TokenKind::LParen {
            let lparen = self.expect_exact(TokenKind::LParen, "LParen")?;
            let left = self.parse_expr()?;
            let op = self.expect_boolop()?;
            let right = self.parse_expr()?;
            let rparen = self.expect_exact(TokenKind::RParen, "RParen")?;
            Some(CstNode::node(
                "BoolExpr",
                vec![lparen, left, op, right, rparen],
            ))
        } else {
            let boolval = self.expect_boolval()?;
            Some(CstNode::node("BoolExpr", vec![boolval]))
        }
    }
}
