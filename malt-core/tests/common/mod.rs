// malt-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers for malt-core integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`tiny_eval`] - A minimal evaluator: symbols, `if`, `fn`, calls
//! - [`make_closure`] - Build a closure wired to `tiny_eval` and `bind_params`
//! - [`base_env`] - Root environment with `+` and `<` bound
//! - [`sum_fn`] - Native function summing integer arguments

#![allow(dead_code)]

use std::rc::Rc;

pub use malt_core::{
    Closure, Env, EnvRef, Environment, Error, Result, Symbol, Value, apply, bind_params,
};

/// Native function summing integer arguments.
pub fn sum_fn() -> Value {
    Value::native_fn("+", |args| {
        let mut total = 0i64;
        for arg in args {
            let n = match arg {
                Value::Number(n) => n.to_i64(),
                _ => None,
            }
            .ok_or_else(|| Error::type_mismatch("integer", arg.type_name()))?;
            total = total
                .checked_add(n)
                .ok_or_else(|| Error::Thrown(Value::string("integer overflow")))?;
        }
        Ok(Value::int(total))
    })
}

/// Native `<` over two integers.
pub fn less_than_fn() -> Value {
    Value::native_fn("<", |args| {
        let [a, b] = args else {
            return Err(Error::arity_named("<", 2, args.len()));
        };
        match (a, b) {
            (Value::Number(x), Value::Number(y)) => match (x.to_i64(), y.to_i64()) {
                (Some(x), Some(y)) => Ok(Value::bool(x < y)),
                _ => Err(Error::type_mismatch("integer", "number")),
            },
            _ => Err(Error::type_mismatch("number", "other")),
        }
    })
}

/// Root environment with `+` and `<` bound.
pub fn base_env() -> Env {
    let env = Env::new();
    env.define(Symbol::new("+"), sum_fn());
    env.define(Symbol::new("<"), less_than_fn());
    env
}

/// Build a closure over `env` evaluated by [`tiny_eval`].
pub fn make_closure(params: Value, body: Value, env: EnvRef) -> Value {
    Value::Closure(Closure::new(
        body,
        env,
        params,
        Rc::new(tiny_eval),
        Rc::new(bind_params),
    ))
}

/// A deliberately small evaluator: enough to drive closures through
/// `apply` in tests. Supports symbol lookup, `(if c a b)`,
/// `(fn [params] body)` and ordinary calls.
pub fn tiny_eval(expr: &Value, env: &EnvRef) -> Result<Value> {
    match expr {
        Value::Symbol(sym) => env.get(sym),
        Value::List(items, _) if !items.is_empty() => {
            if let Value::Symbol(head) = &items[0] {
                match head.name() {
                    "if" => {
                        let test = tiny_eval(&items[1], env)?;
                        let branch = if test.is_truthy() { &items[2] } else { &items[3] };
                        return tiny_eval(branch, env);
                    }
                    "fn" => {
                        let (params, body) = (items[1].clone(), items[2].clone());
                        return Ok(make_closure(params, body, Rc::clone(env)));
                    }
                    _ => {}
                }
            }
            let func = tiny_eval(&items[0], env)?;
            let mut args = Vec::with_capacity(items.len() - 1);
            for item in items.iter().skip(1) {
                args.push(tiny_eval(item, env)?);
            }
            apply(&func, &args)
        }
        other => Ok(other.clone()),
    }
}

/// Shorthand for a list form.
pub fn form(items: Vec<Value>) -> Value {
    Value::list(items)
}

/// Shorthand for a symbol.
pub fn sym(name: &str) -> Value {
    Value::symbol(name)
}

/// Shorthand for a parameter vector.
pub fn params(names: &[&str]) -> Value {
    Value::vector(names.iter().map(|n| Value::symbol(n)).collect())
}
