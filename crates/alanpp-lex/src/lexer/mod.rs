//! Lexer implementation, split by concern:
//! - `core` - the `Lexer` struct, its dispatch loop, and error reporting
//! - `identifier` - longest-prefix keyword/identifier lexing
//! - `number` - single-digit numeric tokens
//! - `string` - quote-delimited, per-character string bodies
//! - `operator` - `=`/`==` and `!=`, the only two multi-character operators
//! - `comment` - whitespace and `/* */` block comments

mod comment;
mod core;
mod identifier;
mod number;
mod operator;
mod string;

pub use core::Lexer;
