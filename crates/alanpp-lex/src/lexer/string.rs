//! String literal lexing.
//!
//! A string literal is a pair of `"` tokens with a run of `CHAR` tokens
//! between them — there is no escape processing and no raw-string form.
//! Because each character inside the string is its own token, the lexer
//! needs a little state (`in_string`) to know that the next call to
//! [`Lexer::next_token`] should continue a literal already in progress
//! rather than start a fresh token from scratch.

use alanpp_util::DiagnosticCode;

use super::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    /// Consumes the opening `"` and switches into string-body mode.
    pub(super) fn lex_string_open(&mut self) -> Token {
        self.cursor.advance();
        self.in_string = true;
        self.make(TokenKind::Quote)
    }

    /// Consumes one character of an open string literal: the closing `"`,
    /// one `[a-z ]` body character, or an error for anything else.
    pub(super) fn lex_string_body(&mut self) -> Token {
        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            self.in_string = false;
            let kind = self.report_error(
                DiagnosticCode::E_LEXER_UNTERMINATED_STRING,
                "String literal is not terminated before end of input",
            );
            return self.make(kind);
        }

        match self.cursor.current_char() {
            '"' => {
                self.cursor.advance();
                self.in_string = false;
                self.make(TokenKind::Quote)
            }
            '\n' => {
                self.cursor.advance();
                self.in_string = false;
                let kind = self.report_error(
                    DiagnosticCode::E_LEXER_NEWLINE_IN_STRING,
                    "Newline inside string literal",
                );
                self.make(kind)
            }
            c if c == ' ' || c.is_ascii_lowercase() => {
                self.cursor.advance();
                self.make(TokenKind::Char(c))
            }
            other => {
                self.cursor.advance();
                let kind = self.report_error(
                    DiagnosticCode::E_LEXER_INVALID_STRING_CHAR,
                    format!("Invalid character '{other}' in string literal"),
                );
                self.make(kind)
            }
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
    fn empty_string_is_two_quotes() {
        assert_eq!(tokens("\"\""), vec![TokenKind::Quote, TokenKind::Quote]);
    }

    #[test]
    fn string_body_is_one_char_token_per_letter() {
        assert_eq!(
            tokens("\"ab c\""),
            vec![
                TokenKind::Quote,
                TokenKind::Char('a'),
                TokenKind::Char('b'),
                TokenKind::Char(' '),
                TokenKind::Char('c'),
                TokenKind::Quote,
            ]
        );
    }

    #[test]
    fn unterminated_string_reports_error_at_eof() {
        let handler = Handler::new();
        let toks: Vec<_> = Lexer::new("\"ab", &handler).map(|t| t.kind).collect();
        assert!(matches!(toks.last().unwrap(), TokenKind::Error(_)));
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn newline_in_string_is_an_error_and_closes_the_literal() {
        let handler = Handler::new();
        let toks: Vec<_> = Lexer::new("\"a\nb\"", &handler).map(|t| t.kind).collect();
        assert!(matches!(toks[1], TokenKind::Char('a')));
        assert!(matches!(toks[2], TokenKind::Error(_)));
        // Lexing resumes fresh after the newline, so `b` and the final `"`
        // are read as ordinary top-level tokens, not more string body.
        assert_eq!(toks[3], TokenKind::Id(alanpp_util::Symbol::intern("b")));
        assert_eq!(toks[4], TokenKind::Quote);
    }

    #[test]
    fn uppercase_or_digit_inside_string_is_invalid() {
        let handler = Handler::new();
        let _: Vec<_> = Lexer::new("\"A\"", &handler).map(|t| t.kind).collect();
        assert_eq!(handler.error_count(), 1);
    }
}
