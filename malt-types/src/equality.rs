// malt-types - Structural equality
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Structural equality over [`Value`].
//!
//! [`equal`] is total: it never fails and never panics. Two values are
//! comparable when they are the same variant, or when both are sequential
//! (a list and a vector with pairwise-equal elements are equal). Metadata is
//! ignored everywhere.
//!
//! Inputs must be acyclic. The only way to build a cycle is through an
//! [`Atom`](crate::Atom), and atoms compare by identity, so equality never
//! follows one into its contents.

use crate::value::Value;

/// Structural equality with list/vector equivalence.
///
/// Hash maps are equal only when they have the same key count and every key
/// of `a` maps to an equal value in `b`. The count check makes this
/// symmetric: `{k 1}` and `{k 1, other 2}` are unequal in either order.
pub fn equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Nil, Value::Nil) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (
            Value::List(xs, _) | Value::Vector(xs, _),
            Value::List(ys, _) | Value::Vector(ys, _),
        ) => xs.len() == ys.len() && xs.iter().zip(ys.iter()).all(|(x, y)| equal(x, y)),
        (Value::HashMap(xm, _), Value::HashMap(ym, _)) => {
            // Key counts match, so "every key of `a` is in `b`" also means
            // the key sets are identical.
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, xv)| ym.get(k).is_some_and(|yv| equal(xv, yv)))
        }
        (Value::NativeFn(x), Value::NativeFn(y)) => x == y,
        (Value::Closure(x), Value::Closure(y)) => x == y,
        (Value::Atom(x), Value::Atom(y)) => x == y,
        _ => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        equal(self, other)
    }
}

impl Eq for Value {}
