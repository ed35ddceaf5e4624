//! Core lexer implementation.
//!
//! This module contains the main `Lexer` struct and its dispatch loop.

use alanpp_util::{DiagnosticBuilder, DiagnosticCode, Handler, Span, Stage};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Lexer for Alan++.
///
/// Transforms source text into a stream of [`Token`]s one at a time. Most of
/// the dispatch is direct: each punctuator is one character of lookahead.
/// The one piece of state that survives across calls to [`Lexer::next_token`]
/// is `in_string` — once an opening `"` is seen, subsequent calls read one
/// string-body character (or the closing `"`) at a time rather than
/// consuming the whole literal in one call, since `CHAR` is a token kind in
/// its own right.
pub struct Lexer<'a> {
    pub(super) cursor: Cursor<'a>,
    pub(super) handler: &'a Handler,
    pub(super) in_string: bool,
    pub(super) token_start: usize,
    pub(super) token_start_line: u32,
    pub(super) token_start_column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            in_string: false,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Returns the next token from the source code.
    pub fn next_token(&mut self) -> Token {
        if self.in_string {
            return self.lex_string_body();
        }

        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return self.make(TokenKind::Eof);
        }

        match self.cursor.current_char() {
            '{' => {
                self.cursor.advance();
                self.make(TokenKind::LBrace)
            }
            '}' => {
                self.cursor.advance();
                self.make(TokenKind::RBrace)
            }
            '(' => {
                self.cursor.advance();
                self.make(TokenKind::LParen)
            }
            ')' => {
                self.cursor.advance();
                self.make(TokenKind::RParen)
            }
            '+' => self.lex_plus(),
            '=' => self.lex_equals(),
            '!' => self.lex_bang(),
            '"' => self.lex_string_open(),
            '$' => {
                self.cursor.advance();
                self.make(TokenKind::Eop)
            }
            c if c.is_ascii_digit() => self.lex_digit(),
            c if c.is_ascii_lowercase() => self.lex_identifier(),
            c => {
                self.cursor.advance();
                let kind = self.report_error(
                    DiagnosticCode::E_LEXER_INVALID_CHAR,
                    format!("Invalid character '{c}'"),
                );
                self.make(kind)
            }
        }
    }

    /// Wraps a token kind with the start position recorded for the token
    /// currently being lexed.
    pub(super) fn make(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.token_start_line, self.token_start_column)
    }

    /// Reports a lexical error at the current token's span and returns the
    /// `Error` token kind carrying the same message, so callers can still
    /// hand a token back to the parser instead of aborting outright.
    pub(super) fn report_error(
        &self,
        code: DiagnosticCode,
        message: impl Into<String>,
    ) -> TokenKind {
        let message = message.into();
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        );
        DiagnosticBuilder::error(message.clone())
            .code(code)
            .stage(Stage::Lexer)
            .span(span)
            .emit(self.handler);
        TokenKind::Error(message)
    }

    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    pub fn column(&self) -> u32 {
        self.cursor.column()
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}
