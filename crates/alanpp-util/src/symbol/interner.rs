//! Single-threaded string interner.
//!
//! Alan++ compiles one file at a time on one thread (see the driver's
//! synchronous pipeline), so the interner doesn't need DashMap or atomics —
//! a `RefCell`-wrapped `FxHashMap` keyed by string, plus a side table for
//! index-to-string lookups, is enough.

use std::cell::RefCell;
use rustc_hash::FxHashMap;

use super::{InternerStats, Symbol};

thread_local! {
    /// Per-thread string table. Reserved words are pre-interned the first
    /// time a thread touches it.
    pub static STRING_TABLE: StringTable = StringTable::with_known_symbols();
}

/// Number of symbols reserved for known keywords; see `symbol::mod`'s
/// `RESERVED_SYMBOLS_END`.
const RESERVED_SYMBOLS_END: u32 = 16;

pub struct StringTable {
    by_string: RefCell<FxHashMap<&'static str, u32>>,
    by_index: RefCell<Vec<&'static str>>,
    hits: RefCell<usize>,
    misses: RefCell<usize>,
}

impl StringTable {
    fn new() -> Self {
        Self {
            by_string: RefCell::new(FxHashMap::default()),
            by_index: RefCell::new(Vec::with_capacity(64)),
            hits: RefCell::new(0),
            misses: RefCell::new(0),
        }
    }

    fn with_known_symbols() -> Self {
        let table = Self::new();
        table.initialize_known_symbols();
        table
    }

    /// Pre-intern the reserved words in `mod.rs` order, so their indices
    /// line up with the `KW_*`/`TY_*` constants there.
    fn initialize_known_symbols(&self) {
        const KNOWN: [&str; 8] = ["print", "while", "if", "int", "string", "boolean", "true", "false"];

        for (idx, word) in KNOWN.iter().enumerate() {
            let idx = idx as u32;
            debug_assert!(idx < RESERVED_SYMBOLS_END);
            let interned: &'static str = Box::leak(word.to_string().into_boxed_str());
            self.by_string.borrow_mut().insert(interned, idx);
            self.by_index.borrow_mut().push(interned);
        }
    }

    pub fn intern(&self, string: &str) -> Symbol {
        if let Some(&index) = self.by_string.borrow().get(string) {
            *self.hits.borrow_mut() += 1;
            return Symbol { index };
        }

        *self.misses.borrow_mut() += 1;
        let interned: &'static str = Box::leak(string.to_string().into_boxed_str());
        let mut by_index = self.by_index.borrow_mut();
        let index = by_index.len() as u32;
        by_index.push(interned);
        drop(by_index);
        self.by_string.borrow_mut().insert(interned, index);
        Symbol { index }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        self.by_index.borrow().get(symbol.index as usize).copied()
    }

    pub fn stats(&self) -> InternerStats {
        let by_index = self.by_index.borrow();
        InternerStats {
            count: by_index.len(),
            capacity: self.by_string.borrow().capacity(),
            collisions: 0,
            hits: *self.hits.borrow(),
            misses: *self.misses.borrow(),
        }
    }

    #[cfg(test)]
    pub(crate) fn reset_stats(&self) {
        *self.hits.borrow_mut() = 0;
        *self.misses.borrow_mut() = 0;
    }
}
