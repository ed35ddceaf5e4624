//! The scope arena.
//!
//! Alan++ blocks nest arbitrarily (`{ { { } } }` is a legal program), and a
//! name declared in an inner block must stop being visible once that block's
//! closing brace is reached while still being resolvable from anywhere
//! inside it, including other nested blocks declared later. An arena of
//! scopes indexed by a small `Copy` id sidesteps the self-referential
//! `Scope { parent: &Scope }` borrow a tree of real references would demand:
//! `exit_scope` moves the tree's "current" pointer back to a scope's parent
//! without ever removing that scope from the arena, so every scope that ever
//! existed is still reachable by id for as long as the tree lives.
use std::fmt;

use indexmap::IndexMap;

use alanpp_lex::PrimitiveType;
use alanpp_util::{Idx, IndexVec, Symbol};

/// Identifies one scope inside a [`ScopeTree`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl Idx for ScopeId {
    fn from_usize(idx: usize) -> Self {
        ScopeId(idx as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A declared name's full record, tracked per the symbol table's fields:
/// its type, whether it has ever been assigned, and whether it has ever been
/// read. Both flags feed end-of-analysis warnings rather than hard errors.
#[derive(Debug, Clone)]
pub struct SymbolEntry {
    pub name: Symbol,
    pub ty: PrimitiveType,
    pub initialized: bool,
    pub used: bool,
    pub line: u32,
    pub column: u32,
}

/// One block's worth of declarations, plus the scope it nests inside. The
/// root block (the program's outermost `{ }`) has no parent and sits at
/// `scope_level` 0; each nested block is one level deeper than the scope it
/// was opened inside.
#[derive(Debug, Default)]
pub struct Scope {
    pub entries: IndexMap<Symbol, SymbolEntry>,
    pub parent: Option<ScopeId>,
    pub scope_level: u32,
}

/// What can go wrong declaring or resolving a name. The analyzer turns these
/// into diagnostics; the tree itself has no notion of a `Handler`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeError {
    /// Already declared in the current scope (not an ancestor — shadowing
    /// an outer declaration is fine).
    DuplicateInScope,
    /// No scope from the current one up to the root declares this name.
    Unresolved,
}

impl fmt::Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeError::DuplicateInScope => write!(f, "already declared in this scope"),
            ScopeError::Unresolved => write!(f, "not declared in any enclosing scope"),
        }
    }
}

/// The tree of scopes a single program's analysis walks. `current` always
/// names the scope the analyzer is presently inside; it moves to a fresh
/// child on `enter_scope` and back to that child's parent on `exit_scope`.
pub struct ScopeTree {
    scopes: IndexVec<ScopeId, Scope>,
    current: ScopeId,
}

impl ScopeTree {
    /// A tree with just its root scope, already current.
    pub fn new() -> Self {
        let mut scopes = IndexVec::new();
        let root = scopes.push(Scope::default());
        Self {
            scopes,
            current: root,
        }
    }

    pub fn current_scope(&self) -> ScopeId {
        self.current
    }

    /// Opens a new child of the current scope and makes it current.
    pub fn enter_scope(&mut self) -> ScopeId {
        let level = self.scopes[self.current].scope_level + 1;
        let child = self.scopes.push(Scope {
            entries: IndexMap::new(),
            parent: Some(self.current),
            scope_level: level,
        });
        self.current = child;
        child
    }

    /// Returns to the current scope's parent. The scope being left stays in
    /// the arena — only `current` moves — so anything still holding its
    /// `ScopeId` can keep reading it after the block that opened it closes.
    ///
    /// Panics if called on the root scope; the analyzer only ever calls this
    /// once per matching `enter_scope`, and the root is never entered twice.
    pub fn exit_scope(&mut self) {
        self.current = self.scopes[self.current]
            .parent
            .expect("exit_scope called on the root scope");
    }

    /// Declares `name` in the current scope. Fails if the current scope —
    /// and only the current scope, shadowing an ancestor's declaration is
    /// fine — already has an entry of that name.
    pub fn declare(
        &mut self,
        name: Symbol,
        ty: PrimitiveType,
        line: u32,
        column: u32,
    ) -> Result<(), ScopeError> {
        let scope = &mut self.scopes[self.current];
        if scope.entries.contains_key(&name) {
            return Err(ScopeError::DuplicateInScope);
        }
        scope.entries.insert(
            name,
            SymbolEntry {
                name,
                ty,
                initialized: false,
                used: false,
                line,
                column,
            },
        );
        Ok(())
    }

    /// Walks from the current scope up through its ancestors looking for
    /// `name`, returning the id of the scope it was found in.
    pub fn resolve(&self, name: Symbol) -> Option<ScopeId> {
        let mut scope = self.current;
        loop {
            if self.scopes[scope].entries.contains_key(&name) {
                return Some(scope);
            }
            scope = self.scopes[scope].parent?;
        }
    }

    pub fn entry(&self, scope: ScopeId, name: Symbol) -> Option<&SymbolEntry> {
        self.scopes[scope].entries.get(&name)
    }

    pub fn entry_mut(&mut self, scope: ScopeId, name: Symbol) -> Option<&mut SymbolEntry> {
        self.scopes[scope].entries.get_mut(&name)
    }

    /// Every scope in the arena, in creation order (root first). The
    /// end-of-analysis unused-variable sweep visits each entry exactly
    /// once this way, without caring about the tree's nesting.
    pub fn all_scopes(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.as_slice().iter()
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}
