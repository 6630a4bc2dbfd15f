// malt-core - Function application
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Function application for Malt.
//!
//! [`apply`] is the single entry point for calling a value. Native functions
//! get the arguments directly. Closures go through their injected binder to
//! build the call environment and then through their injected evaluator to
//! run the body. The macro flag plays no part here; deciding whether to
//! expand a macro is the evaluator's business, before it ever calls `apply`.

use malt_types::{Closure, Error, NativeFn, Result, Value};

/// Apply a function to arguments.
pub fn apply(func: &Value, args: &[Value]) -> Result<Value> {
    match func {
        Value::NativeFn(f) => apply_native(f, args),
        Value::Closure(f) => apply_closure(f, args),
        other => {
            tracing::debug!(type_name = other.type_name(), "apply on non-function");
            Err(Error::NotCallable(format!("{:?}", other)))
        }
    }
}

/// Apply a function to the elements of a list or vector.
pub fn apply_seq(func: &Value, args: &Value) -> Result<Value> {
    let args: Vec<Value> = args.as_sequence()?.iter().cloned().collect();
    apply(func, &args)
}

/// Apply a native function. Its result or error is returned unchanged.
pub(crate) fn apply_native(func: &NativeFn, args: &[Value]) -> Result<Value> {
    tracing::trace!(name = func.name(), argc = args.len(), "apply native fn");
    func.call(args)
}

/// Apply a closure: bind, then evaluate the body in the bound environment.
///
/// A binder failure is returned as-is and the evaluator is never invoked.
pub(crate) fn apply_closure(func: &Closure, args: &[Value]) -> Result<Value> {
    tracing::trace!(argc = args.len(), is_macro = func.is_macro(), "apply closure");
    let arg_list = Value::list(args.to_vec());
    let env = (func.binder())(func.env(), func.params(), arg_list).inspect_err(|e| {
        tracing::debug!(error = %e, "closure parameter binding failed");
    })?;
    (func.evaluator())(func.body(), &env)
}
