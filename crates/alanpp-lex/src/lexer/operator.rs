//! Operator lexing.
//!
//! Alan++ has exactly one arithmetic operator (`+`, always `INTOP`) and two
//! comparison operators that share a one-character lookahead with their
//! simpler counterparts: `=` is `ASSIGN` unless followed by another `=`
//! (then `==`, `BOOLOP(Eq)`), and `!` is always an error unless followed by
//! `=` (then `!=`, `BOOLOP(NotEq)`) — Alan++ has no unary `!`.

use alanpp_util::DiagnosticCode;

use super::core::Lexer;
use crate::token::{BoolOp, Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(super) fn lex_plus(&mut self) -> Token {
        self.cursor.advance();
        self.make(TokenKind::IntOp)
    }

    pub(super) fn lex_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.current_char() == '=' {
            self.cursor.advance();
            self.make(TokenKind::BoolOp(BoolOp::Eq))
        } else {
            self.make(TokenKind::Assign)
        }
    }

    pub(super) fn lex_bang(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.current_char() == '=' {
            self.cursor.advance();
            self.make(TokenKind::BoolOp(BoolOp::NotEq))
        } else {
            let kind = self.report_error(
                DiagnosticCode::E_LEXER_BANG_WITHOUT_EQ,
                "'!' must be followed by '=' to form '!='",
            );
            self.make(kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use alanpp_util::Handler;

    use super::*;

    fn tokens(source: &str) -> Vec<TokenKind> {
        let handler = Handler::new();
        Lexer::new(source, &handler).map(|t| t.kind).collect()
    }

    #[test]
    fn plus_is_always_intop() {
        assert_eq!(tokens("+"), vec![TokenKind::IntOp]);
    }

    #[test]
    fn equals_splits_on_lookahead() {
        assert_eq!(tokens("="), vec![TokenKind::Assign]);
        assert_eq!(tokens("=="), vec![TokenKind::BoolOp(BoolOp::Eq)]);
        assert_eq!(
            tokens("===" ),
            vec![TokenKind::BoolOp(BoolOp::Eq), TokenKind::Assign]
        );
    }

    #[test]
    fn not_eq_splits_on_lookahead() {
        assert_eq!(tokens("!="), vec![TokenKind::BoolOp(BoolOp::NotEq)]);
    }

    #[test]
    fn bang_without_eq_is_an_error() {
        let handler = Handler::new();
        let toks: Vec<_> = Lexer::new("!a", &handler).map(|t| t.kind).collect();
        assert!(matches!(toks[0], TokenKind::Error(_)));
        assert_eq!(handler.error_count(), 1);
    }
}
