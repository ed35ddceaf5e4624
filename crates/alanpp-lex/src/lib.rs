//! alanpp-lex - lexical analysis for Alan++.
//!
//! Alan++'s lexer is a direct-coded, single-pass scanner: each call to
//! [`Lexer::next_token`] consumes exactly one token from the source and
//! reports the character position it started at. There is no separate
//! tokenize-the-whole-file pass; the parser drives the lexer one token at a
//! time through its [`Iterator`] implementation.
//!
//! The token set is closed and small (see [`token::TokenKind`]), so unlike a
//! general-purpose language's lexer there is no number-base sniffing, no
//! escape-sequence table, and no identifier interning beyond single
//! lowercase letters and the eight reserved words.

pub mod cursor;
pub mod edge_cases;
pub mod lexer;
pub mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{BoolOp, PrimitiveType, Token, TokenKind, KEYWORDS};
