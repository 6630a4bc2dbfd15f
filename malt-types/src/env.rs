// malt-types - Environment capability
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The environment capability consumed by closures.
//!
//! The value core never walks scopes itself; it only stores a shared
//! reference to whatever environment the evaluator hands it and passes that
//! reference back through the evaluator and binder callbacks. A concrete
//! scope chain lives in `malt-core`.

use std::rc::Rc;

use crate::error::Result;
use crate::symbol::Symbol;
use crate::value::Value;

/// Shared handle to an environment.
///
/// Closures holding the same handle observe each other's bindings
/// immediately: there is no copy-on-write at this layer.
pub type EnvRef = Rc<dyn Environment>;

/// Variable lookup and binding over a chain of scopes.
pub trait Environment {
    /// The nearest enclosing scope that defines `sym`, if any.
    fn find(&self, sym: &Symbol) -> Option<EnvRef>;

    /// Define or overwrite `sym` in this scope, returning the value.
    fn set(&self, sym: Symbol, val: Value) -> Value;

    /// Look `sym` up through the scope chain.
    ///
    /// Fails with [`Error::UndefinedSymbol`](crate::Error::UndefinedSymbol)
    /// when no scope binds it.
    fn get(&self, sym: &Symbol) -> Result<Value>;
}

/// Evaluator callback: evaluate an expression in an environment.
pub type EvalFn = dyn Fn(&Value, &EnvRef) -> Result<Value>;

/// Environment-builder callback: bind `params` to the argument list in a
/// new child of the given parent environment.
pub type BindFn = dyn Fn(&EnvRef, &Value, Value) -> Result<EnvRef>;
