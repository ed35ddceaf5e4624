//! Statement and block parsing.
//!
//! ```text
//! Block          ::= '{' StatementList '}'
//! StatementList  ::= Statement StatementList | ε
//! Statement      ::= PrintStmt | AssignStmt | VarDecl | WhileStmt | IfStmt | Block
//! PrintStmt      ::= 'print' '(' Expr ')'
//! AssignStmt     ::= ID '=' Expr
//! VarDecl        ::= TYPE ID
//! WhileStmt      ::= 'while' BoolExpr Block
//! IfStmt         ::= 'if' BoolExpr Block
//! ```
//!
//! `StatementList`'s left recursion is flattened into a plain `Vec` of
//! `Statement` children on a single `StatementList` node rather than
//! rendered as a literal chain of nested ε-terminated nodes — nothing reads
//! the CST recursively enough to care, and a flat repetition is the
//! idiomatic shape for "zero or more" in a tree built out of `Vec`s.

use alanpp_lex::TokenKind;
use alanpp_util::DiagnosticCode;

use crate::{CstNode, Parser};

impl<'a> Parser<'a> {
    pub fn parse_block(&mut self) -> Option<CstNode> {
        let lbrace = self.expect_exact(TokenKind::LBrace, "LBrace")?;
        let statements = self.parse_statement_list()?;
        let rbrace = self.expect_exact(TokenKind::RBrace, "RBrace")?;
        Some(CstNode::node("Block", vec![lbrace, statements, rbrace]))
    }

    /// Once the lookahead commits to the `Statement StatementList` branch, a
    /// failure inside that statement is a hard failure for the whole list —
    /// it does not fall back to treating what follows as the `ε` branch.
    fn parse_statement_list(&mut self) -> Option<CstNode> {
        let mut statements = Vec::new();
        while self.starts_statement() {
            statements.push(self.parse_statement()?);
        }
        Some(CstNode::node("StatementList", statements))
    }

    fn starts_statement(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Print
                | TokenKind::Type(_)
                | TokenKind::Id(_)
                | TokenKind::While
                | TokenKind::If
                | TokenKind::LBrace
        )
    }

    fn parse_statement(&mut self) -> Option<CstNode> {
        let inner = match self.current().kind {
            TokenKind::Print => self.parse_print_stmt()?,
            TokenKind::Type(_) => self.parse_var_decl()?,
            TokenKind::Id(_) => self.parse_assign_stmt()?,
            TokenKind::While => self.parse_while_stmt()?,
            TokenKind::If => self.parse_if_stmt()?,
            TokenKind::LBrace => self.parse_block()?,
            ref other => {
                self.error(
                    DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN,
                    format!("'{other}' does not start a statement"),
                );
                return None;
            }
        };
        Some(CstNode::node("Statement", vec![inner]))
    }

    fn parse_print_stmt(&mut self) -> Option<CstNode> {
        let kw = self.expect_exact(TokenKind::Print, "Print")?;
        let lparen = self.expect_exact(TokenKind::LParen, "LParen")?;
        let expr = self.parse_expr()?;
        let rparen = self.expect_exact(TokenKind::RParen, "RParen")?;
        Some(CstNode::node("PrintStmt", vec![kw, lparen, expr, rparen]))
    }

    fn parse_assign_stmt(&mut self) -> Option<CstNode> {
        let id = self.expect_id()?;
        let assign = self.expect_exact(TokenKind::Assign, "Assign")?;
        let expr = self.parse_expr()?;
        Some(CstNode::node("AssignStmt", vec![id, assign, expr]))
    }

    fn parse_var_decl(&mut self) -> Option<CstNode> {
        let ty = self.expect_type()?;
        let id = self.expect_id()?;
        Some(CstNode::node("VarDecl", vec![ty, id]))
    }

    fn parse_while_stmt(&mut self) -> Option<CstNode> {
        let kw = self.expect_exact(TokenKind::While, "While")?;
        let cond = self.parse_bool_expr()?;
        let body = self.parse_block()?;
        Some(CstNode::node("WhileStmt", vec![kw, cond, body]))
    }

    fn parse_if_stmt(&mut self) -> Option<CstNode> {
        let kw = self.expect_exact(TokenKind::If, "If")?;
        let cond = self.parse_bool_expr()?;
        let body = self.parse_block()?;
        Some(CstNode::node("IfStmt", vec![kw, cond, body]))
    }
}

#[cfg(test)]
mod tests {
    use alanpp_util::Handler;

    use crate::Parser;

    fn parse_stmt(source: &str) -> (Option<crate::CstNode>, Handler) {
        let handler = Handler::new();
        let mut parser = Parser::from_source(source, &handler);
        let node = parser.parse_block();
        (node, handler)
    }

    #[test]
    fn empty_block_has_an_empty_statement_list() {
        let (block, handler) = parse_stmt("{}");
        assert!(!handler.has_errors());
        let block = block.unwrap();
        let list = &block.children[1];
        assert_eq!(list.name, "StatementList");
        assert!(list.children.is_empty());
    }

    #[test]
    fn print_statement_parses() {
        let (block, handler) = parse_stmt(r#"{print("a")}"#);
        assert!(!handler.has_errors());
        let block = block.unwrap();
        assert_eq!(block.children[1].children.len(), 1);
    }

    #[test]
    fn var_decl_then_assignment() {
        let (block, handler) = parse_stmt("{int a a=1}");
        assert!(!handler.has_errors());
        let stmts = &block.unwrap().children[1].children;
        assert_eq!(stmts.len(), 2);
    }

    #[test]
    fn nested_block_is_a_statement() {
        let (block, handler) = parse_stmt("{{}}");
        assert!(!handler.has_errors());
        let stmts = &block.unwrap().children[1].children;
        assert_eq!(stmts.len(), 1);
        assert_eq!(stmts[0].children[0].name, "Block");
    }

    #[test]
    fn while_and_if_require_a_bool_expr_condition() {
        let (block, handler) = parse_stmt("{while(a==b){}if true{}}");
        assert!(!handler.has_errors());
        assert_eq!(block.unwrap().children[1].children.len(), 2);
    }

    #[test]
    fn stray_token_ends_the_statement_list_without_consuming_it() {
        // `)` starts no statement, so the list simply stops; the caller
        // (here, the missing closing brace) reports the real problem.
        let (block, handler) = parse_stmt("{int a)");
        assert!(handler.has_errors());
        assert!(block.is_none());
    }

    #[test]
    fn unexpected_token_inside_a_would_be_statement_is_reported() {
        let handler = Handler::new();
        let mut parser = Parser::from_source("{+}", &handler);
        let result = parser.parse_block();
        assert!(result.is_none());
        assert!(handler.has_errors());
    }
}
