//! Token kinds produced by the lexer.
//!
//! Alan++ has a closed, small token set: four delimiters, two operators that
//! both fold into a single-character lookahead (`=`/`==`, `!=`), string
//! delimiters and per-character string bodies, single-digit numeric tokens,
//! eight reserved words, and an end-of-program marker. There is no multi-
//! character number literal and no escape-processed string literal — those
//! are assembled one token at a time by the parser, not the lexer.

use alanpp_util::Symbol;

/// The eight reserved words of Alan++, checked by longest-prefix match
/// before a run of lowercase letters falls back to a single-letter `Id`.
pub const KEYWORDS: [&str; 8] = [
    "print", "while", "if", "int", "string", "boolean", "true", "false",
];

/// `==` vs `!=`, the only two binary comparison operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoolOp {
    Eq,
    NotEq,
}

impl BoolOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BoolOp::Eq => "==",
            BoolOp::NotEq => "!=",
        }
    }
}

/// The three primitive types a `TYPE` token can name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveType {
    Int,
    String,
    Boolean,
}

impl PrimitiveType {
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveType::Int => "int",
            PrimitiveType::String => "string",
            PrimitiveType::Boolean => "boolean",
        }
    }

    /// Maps a reserved type word to its `PrimitiveType`. Returns `None` for
    /// anything that isn't one of the three type keywords.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "int" => Some(PrimitiveType::Int),
            "string" => Some(PrimitiveType::String),
            "boolean" => Some(PrimitiveType::Boolean),
            _ => None,
        }
    }
}

/// One lexical token kind, per the closed set of token kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    LBrace,
    RBrace,
    LParen,
    RParen,
    Assign,
    IntOp,
    BoolOp(BoolOp),
    Quote,
    Char(char),
    Digit(u32),
    Id(Symbol),
    Type(PrimitiveType),
    BoolVal(bool),
    Print,
    While,
    If,
    Eop,
    Eof,
    Error(String),
}

impl TokenKind {
    /// Builds the token for one of the eight reserved words. Callers are
    /// expected to have already matched `word` against [`KEYWORDS`].
    pub fn keyword(word: &str) -> Self {
        match word {
            "print" => TokenKind::Print,
            "while" => TokenKind::While,
            "if" => TokenKind::If,
            "true" => TokenKind::BoolVal(true),
            "false" => TokenKind::BoolVal(false),
            "int" | "string" | "boolean" => {
                TokenKind::Type(PrimitiveType::from_keyword(word).expect("checked above"))
            }
            other => panic!("{other:?} is not one of the reserved words"),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TokenKind::Error(_))
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, TokenKind::Eof)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::LBrace => write!(f, "{{"),
            TokenKind::RBrace => write!(f, "}}"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Assign => write!(f, "="),
            TokenKind::IntOp => write!(f, "+"),
            TokenKind::BoolOp(op) => write!(f, "{}", op.as_str()),
            TokenKind::Quote => write!(f, "\""),
            TokenKind::Char(c) => write!(f, "{c}"),
            TokenKind::Digit(d) => write!(f, "{d}"),
            TokenKind::Id(sym) => write!(f, "{sym}"),
            TokenKind::Type(ty) => write!(f, "{}", ty.as_str()),
            TokenKind::BoolVal(b) => write!(f, "{b}"),
            TokenKind::Print => write!(f, "print"),
            TokenKind::While => write!(f, "while"),
            TokenKind::If => write!(f, "if"),
            TokenKind::Eop => write!(f, "$"),
            TokenKind::Eof => write!(f, "<eof>"),
            TokenKind::Error(msg) => write!(f, "<error: {msg}>"),
        }
    }
}

/// A token together with the position of its first character.
///
/// Alan++ source files are small enough that a `(line, column)` pair is kept
/// directly on the token rather than a full byte-range [`alanpp_util::Span`];
/// the parser and diagnostics only ever need the start position to report an
/// error against.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, line: u32, column: u32) -> Self {
        Self { kind, line, column }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_maps_control_words_directly() {
        assert_eq!(TokenKind::keyword("print"), TokenKind::Print);
        assert_eq!(TokenKind::keyword("while"), TokenKind::While);
        assert_eq!(TokenKind::keyword("if"), TokenKind::If);
    }

    #[test]
    fn keyword_maps_types_and_bools() {
        assert_eq!(TokenKind::keyword("int"), TokenKind::Type(PrimitiveType::Int));
        assert_eq!(TokenKind::keyword("boolean"), TokenKind::Type(PrimitiveType::Boolean));
        assert_eq!(TokenKind::keyword("true"), TokenKind::BoolVal(true));
        assert_eq!(TokenKind::keyword("false"), TokenKind::BoolVal(false));
    }

    #[test]
    fn keywords_table_has_all_eight_reserved_words() {
        assert_eq!(KEYWORDS.len(), 8);
        assert!(KEYWORDS.contains(&"print"));
        assert!(KEYWORDS.contains(&"boolean"));
    }

    #[test]
    fn display_renders_readable_text() {
        assert_eq!(TokenKind::LBrace.to_string(), "{");
        assert_eq!(TokenKind::BoolOp(BoolOp::NotEq).to_string(), "!=");
        assert_eq!(TokenKind::Eop.to_string(), "$");
    }

    #[test]
    fn is_error_and_is_eof() {
        assert!(TokenKind::Error("bad".into()).is_error());
        assert!(TokenKind::Eof.is_eof());
        assert!(!TokenKind::IntOp.is_error());
    }
}
