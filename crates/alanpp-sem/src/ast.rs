//! Abstract syntax tree produced by semantic analysis.
//!
//! Where the parser's [`alanpp_par::CstNode`] is a literal rendition of every
//! grammar production, punctuation included, an [`AstNode`] keeps only the
//! shape that later stages (type checking, code generation) actually need:
//! braces, parentheses, and the `Expr`/`BoolOp`/`Type` wrapper productions
//! are dropped, and what remains is named by a closed [`AstKind`] rather than
//! an open string.

/// The closed set of AST node kinds. Unlike [`alanpp_par::CstNode::name`]
/// this is not extensible — every Alan++ construct maps onto exactly one of
/// these fourteen kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AstKind {
    Program,
    Block,
    VarDecl,
    Assignment,
    Print,
    If,
    While,
    Id,
    IntExpr,
    StringExpr,
    BoolExpr,
    BoolVal,
    Digit,
    Char,
}

/// One AST node. `value` carries a terminal's lexeme (a digit, an
/// identifier's name) or, on an interior node, the one piece of data that
/// node's kind alone cannot express — `+`/`==`/`!=`'s operator, or a
/// `VarDecl`'s declared type keyword — and is `None` everywhere else.
/// `line`/`column` are copied from the CST node the analyzer built this one
/// from, so a later diagnostic can still point at source text even though
/// the CST itself is long gone by then.
#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub kind: AstKind,
    pub value: Option<String>,
    pub children: Vec<AstNode>,
    pub line: u32,
    pub column: u32,
}

impl AstNode {
    pub fn leaf(kind: AstKind, value: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            value: Some(value.into()),
            children: Vec::new(),
            line,
            column,
        }
    }

    pub fn node(kind: AstKind, children: Vec<AstNode>, line: u32, column: u32) -> Self {
        Self {
            kind,
            value: None,
            children,
            line,
            column,
        }
    }

    /// An interior node that still carries a value of its own — binary `+`
    /// and `==`/`!=` keep their operator in `value` alongside their two
    /// operand children, rather than spending a whole child node on an
    /// operator that never varies independently of the parent's kind.
    pub fn operator_node(
        kind: AstKind,
        op: impl Into<String>,
        children: Vec<AstNode>,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            kind,
            value: Some(op.into()),
            children,
            line,
            column,
        }
    }
}
