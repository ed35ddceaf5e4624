//! Numeric literal lexing.
//!
//! Alan++ has no multi-digit number literal at the lexer level — `DIGIT` is
//! a per-character token, just like `CHAR` is for string bodies. A run of
//! digits like `42` lexes as `DIGIT(4)` then `DIGIT(2)`; assembling them
//! into an integer value is the parser's job.

use super::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(super) fn lex_digit(&mut self) -> Token {
        let c = self.cursor.current_char();
        let value = c.to_digit(10).expect("caller only dispatches here for ascii digits");
        self.cursor.advance();
        self.make(TokenKind::Digit(value))
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
    fn single_digit() {
        assert_eq!(tokens("7"), vec![TokenKind::Digit(7)]);
    }

    #[test]
    fn multi_digit_run_is_one_token_per_digit() {
        assert_eq!(
            tokens("123"),
            vec![TokenKind::Digit(1), TokenKind::Digit(2), TokenKind::Digit(3)]
        );
    }

    #[test]
    fn zero_is_a_valid_digit() {
        assert_eq!(tokens("0"), vec![TokenKind::Digit(0)]);
    }
}
