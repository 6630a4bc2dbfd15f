// malt-types - Symbol type with interning
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Symbols are the identifiers bound in environments.
//!
//! # Interning
//!
//! Symbol names are interned in a per-thread table, so two symbols created
//! from the same text share one allocation and usually compare by pointer.
//! Values are `Rc`-based and never leave their thread, which is why the
//! interner is thread-local rather than behind a lock.
//!
//! Interned names live for the lifetime of the thread. Programs that
//! generate unbounded numbers of distinct symbols (e.g. via `gensym`) will
//! see the table grow accordingly.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

thread_local! {
    static SYMBOL_INTERNER: RefCell<HashSet<Rc<str>>> = RefCell::new(HashSet::new());
}

fn intern(name: &str) -> Rc<str> {
    SYMBOL_INTERNER.with(|table| {
        let mut table = table.borrow_mut();
        if let Some(existing) = table.get(name) {
            Rc::clone(existing)
        } else {
            let interned: Rc<str> = Rc::from(name);
            table.insert(Rc::clone(&interned));
            interned
        }
    })
}

/// An interned identifier.
#[derive(Clone)]
pub struct Symbol {
    name: Rc<str>,
}

impl Symbol {
    /// Create (or look up) the symbol with the given name.
    pub fn new(name: &str) -> Self {
        Symbol { name: intern(name) }
    }

    /// Get the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.name)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.name, &other.name) || self.name == other.name
    }
}

impl Eq for Symbol {}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}
