//! Identifier and keyword lexing.
//!
//! Alan++ identifiers are a single lowercase letter; there is no
//! maximal-munch identifier scanning. Instead, at each position the lexer
//! checks whether the remaining source starts with one of the eight
//! reserved words and, if so, consumes the whole word; otherwise it
//! consumes exactly one letter as an `ID`. This is why `print` lexes as one
//! `PRINT` token but `prin` lexes as four separate `ID` tokens — no prefix
//! of "prin" matches any reserved word.

use alanpp_util::Symbol;

use super::core::Lexer;
use crate::token::{Token, TokenKind, KEYWORDS};

impl<'a> Lexer<'a> {
    pub(super) fn lex_identifier(&mut self) -> Token {
        let remaining = self.cursor.remaining();
        let matched = KEYWORDS
            .iter()
            .filter(|kw| remaining.starts_with(*kw))
            .max_by_key(|kw| kw.len());

        if let Some(word) = matched {
            self.cursor.advance_n(word.chars().count());
            return self.make(TokenKind::keyword(word));
        }

        let letter = self.cursor.current_char();
        self.cursor.advance();
        self.make(TokenKind::Id(Symbol::intern(&letter.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use alanpp_util::Handler;

    use super::*;

    fn lex_one(source: &str) -> TokenKind {
        let handler = Handler::new();
        Lexer::new(source, &handler).next_token().kind
    }

    #[test]
    fn single_letter_is_an_id() {
        assert_eq!(lex_one("a"), TokenKind::Id(Symbol::intern("a")));
        assert_eq!(lex_one("z"), TokenKind::Id(Symbol::intern("z")));
    }

    #[test]
    fn all_eight_reserved_words_lex_as_keywords() {
        assert_eq!(lex_one("print"), TokenKind::Print);
        assert_eq!(lex_one("while"), TokenKind::While);
        assert_eq!(lex_one("if"), TokenKind::If);
        assert_eq!(lex_one("true"), TokenKind::BoolVal(true));
        assert_eq!(lex_one("false"), TokenKind::BoolVal(false));
    }

    #[test]
    fn longest_prefix_wins_when_ambiguous() {
        // "if" is itself a full keyword, with nothing else in the table
        // sharing its prefix, so it must not fall back to "i" + "f".
        let handler = Handler::new();
        let toks: Vec<_> = Lexer::new("if", &handler).map(|t| t.kind).collect();
        assert_eq!(toks, vec![TokenKind::If]);
    }

    #[test]
    fn prin_is_four_identifiers_not_a_keyword_prefix() {
        let handler = Handler::new();
        let toks: Vec<_> = Lexer::new("prin", &handler).map(|t| t.kind).collect();
        assert_eq!(
            toks,
            vec![
                TokenKind::Id(Symbol::intern("p")),
                TokenKind::Id(Symbol::intern("r")),
                TokenKind::Id(Symbol::intern("i")),
                TokenKind::Id(Symbol::intern("n")),
            ]
        );
    }

    #[test]
    fn keyword_followed_by_identifier_splits_correctly() {
        // "ifa" starts with the keyword "if", leaving "a" as its own ID.
        let handler = Handler::new();
        let toks: Vec<_> = Lexer::new("ifa", &handler).map(|t| t.kind).collect();
        assert_eq!(toks, vec![TokenKind::If, TokenKind::Id(Symbol::intern("a"))]);
    }
}
