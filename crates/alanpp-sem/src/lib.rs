//! alanpp-sem - semantic analysis for Alan++.
//!
//! Takes the parser's concrete syntax tree and produces two things: an
//! [`ast::AstNode`] tree stripped of punctuation, and the fully populated
//! [`scope::ScopeTree`] that tree's identifiers resolve against. Scope
//! checking, declaration/shadowing rules, type compatibility on assignment,
//! and initialized/used tracking all happen in a single walk — there is no
//! separate "resolve names" pass followed by a "check types" pass, since
//! Alan++ has no forward references: every name used in an expression must
//! already have been declared by an earlier statement in an enclosing
//! scope, so resolving and type-checking can happen in the same left-to-
//! right traversal that builds the AST.
pub mod analysis;
pub mod ast;
pub mod edge_cases;
pub mod scope;

pub use analysis::Analyzer;
pub use ast::{AstKind, AstNode};
pub use scope::{Scope, ScopeError, ScopeId, ScopeTree, SymbolEntry};

use alanpp_par::CstNode;
use alanpp_util::Handler;

/// Analyzes an already-parsed program, returning its AST. Diagnostics
/// (errors and warnings alike) land on `handler`; callers check
/// `handler.has_errors()` before trusting the result for code generation.
pub fn analyze(cst: &CstNode, handler: &Handler) -> AstNode {
    Analyzer::new(handler).analyze_program(cst)
}

/// Same as [`analyze`], but also returns the [`ScopeTree`] built along the
/// way — used by callers that need to inspect the symbol table itself
/// (the driver's `--emit symbols`) rather than just the checked tree.
pub fn analyze_with_scopes(cst: &CstNode, handler: &Handler) -> (AstNode, ScopeTree) {
    Analyzer::new(handler).analyze_program_with_scopes(cst)
}
