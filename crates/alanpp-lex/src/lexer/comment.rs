//! Whitespace and comment skipping.
//!
//! Alan++ has one comment form, `/* ... */`, with no nesting and no `//`
//! line-comment variant. A bare `/` not immediately followed by `*` is left
//! alone here and falls through to the dispatcher in `core.rs`, which
//! reports it as an ordinary invalid character — `/` is not a punctuator on
//! its own.

use alanpp_util::DiagnosticCode;

use super::core::Lexer;

impl<'a> Lexer<'a> {
    pub(super) fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' | '\n' => {
                    self.cursor.advance();
                }
                '/' if self.cursor.peek_char(1) == '*' => {
                    self.skip_block_comment();
                }
                _ => break,
            }
        }
    }

    fn skip_block_comment(&mut self) {
        let start = self.cursor.position();
        let start_line = self.cursor.line();
        let start_column = self.cursor.column();
        self.cursor.advance(); // '/'
        self.cursor.advance(); // '*'

        loop {
            if self.cursor.is_at_end() {
                self.token_start = start;
                self.token_start_line = start_line;
                self.token_start_column = start_column;
                self.report_error(
                    DiagnosticCode::E_LEXER_UNTERMINATED_COMMENT,
                    "Block comment is not terminated before end of input",
                );
                return;
            }
            if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                self.cursor.advance();
                self.cursor.advance();
                return;
            }
            self.cursor.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use alanpp_util::Handler;

    use super::*;
    use crate::token::TokenKind;

    fn tokens(source: &str) -> Vec<TokenKind> {
        let handler = Handler::new();
        Lexer::new(source, &handler).map(|t| t.kind).collect()
    }

    #[test]
    fn whitespace_between_tokens_is_skipped() {
        assert_eq!(
            tokens("  {  \t\n }  "),
            vec![TokenKind::LBrace, TokenKind::RBrace]
        );
    }

    #[test]
    fn block_comment_is_skipped_entirely() {
        assert_eq!(tokens("{/* a comment\nspanning lines */}"), vec![TokenKind::LBrace, TokenKind::RBrace]);
    }

    #[test]
    fn comment_between_tokens_acts_like_whitespace() {
        assert_eq!(
            tokens("i/**/f"),
            vec![TokenKind::Id(alanpp_util::Symbol::intern("i")), TokenKind::Id(alanpp_util::Symbol::intern("f"))]
        );
    }

    #[test]
    fn unterminated_comment_reports_error() {
        let handler = Handler::new();
        let _: Vec<_> = Lexer::new("{/* never closed", &handler)
            .map(|t| t.kind)
            .collect();
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn lone_slash_is_not_treated_as_a_comment() {
        let handler = Handler::new();
        let toks: Vec<_> = Lexer::new("/", &handler).map(|t| t.kind).collect();
        assert!(matches!(toks[0], TokenKind::Error(_)));
    }
}
