//! alanpp-util - foundation types shared by every stage of the Alan++ pipeline.
//!
//! The lexer, parser, analyzer, and code generator all build on a handful of
//! small, dependency-free primitives: interned symbols for identifiers and
//! keywords, spans for `(line, column)` source locations, typed index vectors
//! for arena-style storage, and a diagnostic handler that every stage reports
//! into. None of these types know anything about Alan++ grammar or semantics;
//! they exist so the stages above don't reinvent them.
//!
//! Alan++ compiles one file at a time, synchronously, on a single thread —
//! nothing here is built for concurrent access.

pub mod diagnostic;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{
    Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level, SourceSnippet, Stage,
};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, Span};
pub use symbol::{Symbol, SymbolPretty};
