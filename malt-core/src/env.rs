// malt-core - Environment for lexical scoping
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! A scope-chain implementation of the [`Environment`] capability.
//!
//! Closures only ever see an [`EnvRef`]; this module supplies a concrete
//! environment and a parameter binder that hosts can plug into closures
//! when they have no scoping rules of their own.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use malt_types::{EnvRef, Environment, Error, Result, Symbol, Value};

/// A lexical environment for variable bindings.
///
/// Environments form a chain through parent references. Each environment
/// has its own bindings map and optionally a parent for outer scope lookup.
/// Clones share the same scope, so a binding made through one handle is
/// visible through all of them.
///
/// # Examples
///
/// ```
/// use malt_core::Env;
/// use malt_types::{Symbol, Value};
///
/// let env = Env::new();
/// env.define(Symbol::new("x"), Value::int(42));
/// assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), Value::int(42));
///
/// // Children see parent bindings and may shadow them
/// let child = env.child();
/// assert_eq!(child.lookup(&Symbol::new("x")).unwrap(), Value::int(42));
/// child.define(Symbol::new("x"), Value::int(100));
/// assert_eq!(child.lookup(&Symbol::new("x")).unwrap(), Value::int(100));
/// assert_eq!(env.lookup(&Symbol::new("x")).unwrap(), Value::int(42));
/// ```
#[derive(Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

struct EnvInner {
    bindings: HashMap<Symbol, Value>,
    parent: Option<EnvRef>,
}

impl Env {
    /// Create a new root environment with no parent.
    pub fn new() -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: None,
            })),
        }
    }

    /// Create an environment whose outer scope is `parent`.
    pub fn with_parent(parent: EnvRef) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: Some(parent),
            })),
        }
    }

    /// Create a child environment with this environment as parent.
    #[must_use]
    pub fn child(&self) -> Self {
        Env::with_parent(self.to_ref())
    }

    /// This environment as a shared capability handle.
    pub fn to_ref(&self) -> EnvRef {
        Rc::new(self.clone())
    }

    /// Define a binding in this environment (not parent).
    pub fn define(&self, sym: Symbol, val: Value) {
        self.inner.borrow_mut().bindings.insert(sym, val);
    }

    /// Look up a symbol in this environment or parent chain.
    pub fn lookup(&self, sym: &Symbol) -> Result<Value> {
        let parent = {
            let inner = self.inner.borrow();
            if let Some(val) = inner.bindings.get(sym) {
                return Ok(val.clone());
            }
            inner.parent.clone()
        };
        match parent {
            Some(p) => p.get(sym),
            None => Err(Error::UndefinedSymbol(sym.clone())),
        }
    }

    /// Check if a symbol is bound in this scope only.
    #[must_use]
    pub fn defines(&self, sym: &Symbol) -> bool {
        self.inner.borrow().bindings.contains_key(sym)
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for Env {
    fn find(&self, sym: &Symbol) -> Option<EnvRef> {
        if self.defines(sym) {
            return Some(self.to_ref());
        }
        let parent = self.inner.borrow().parent.clone();
        parent.and_then(|p| p.find(sym))
    }

    fn set(&self, sym: Symbol, val: Value) -> Value {
        self.define(sym, val.clone());
        val
    }

    fn get(&self, sym: &Symbol) -> Result<Value> {
        self.lookup(sym)
    }
}

/// Symbol that marks the rest parameter in a parameter list.
pub const REST_MARKER: &str = "&";

/// Bind a parameter spec to arguments in a fresh child of `parent`.
///
/// `params` is a list or vector of symbols, optionally ending in
/// `& rest`, which collects the remaining arguments into a list. `args`
/// is the argument list. Too few or too many arguments is an arity error;
/// a malformed parameter spec is a bind error.
///
/// This has the shape of the binder callback closures expect, so it can be
/// passed to [`Closure::new`](malt_types::Closure::new) directly.
pub fn bind_params(parent: &EnvRef, params: &Value, args: Value) -> Result<EnvRef> {
    let params = params.as_sequence().map_err(|_| {
        Error::bind(format!(
            "parameter spec must be a list or vector, got {}",
            params.type_name()
        ))
    })?;
    let args = args.as_sequence()?.clone();

    let mut fixed = Vec::new();
    let mut rest = None;
    let mut iter = params.iter();
    while let Some(param) = iter.next() {
        let Value::Symbol(sym) = param else {
            return Err(Error::bind(format!(
                "parameter must be a symbol, got {}",
                param.type_name()
            )));
        };
        if sym.name() == REST_MARKER {
            match (iter.next(), iter.next()) {
                (Some(Value::Symbol(rest_sym)), None) => rest = Some(rest_sym.clone()),
                _ => {
                    return Err(Error::bind(
                        "'&' must be followed by exactly one symbol",
                    ));
                }
            }
            break;
        }
        fixed.push(sym.clone());
    }

    match rest {
        Some(_) if args.len() < fixed.len() => {
            return Err(Error::arity_at_least(fixed.len(), args.len()));
        }
        None if args.len() != fixed.len() => {
            return Err(Error::arity(fixed.len(), args.len()));
        }
        _ => {}
    }

    let env = Env::with_parent(Rc::clone(parent));
    for (sym, arg) in fixed.iter().zip(args.iter()) {
        env.define(sym.clone(), arg.clone());
    }
    if let Some(rest_sym) = rest {
        let remaining: Vec<Value> = args.iter().skip(fixed.len()).cloned().collect();
        env.define(rest_sym, Value::list(remaining));
    }
    Ok(env.to_ref())
}
