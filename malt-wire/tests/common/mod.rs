// malt-wire - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers for malt-wire integration tests.
//!
//! - [`to_wire`] - Encode a data value (no functions) as a wire node
//! - [`wire_value`] - proptest strategy for data values
//!
//! Atoms compare by identity, so decoded trees are checked by re-encoding
//! them with [`to_wire`] rather than with `==`.

#![allow(dead_code)]

use proptest::prelude::*;
use serde_json::{Map, Value as Json, json};

pub use malt_wire::{Decoder, Error, FnNodePolicy, Result, Value, decode_slice, decode_str};

/// Encode a data value as a wire node.
///
/// Functions have no wire form and atoms encode their current contents.
/// Metadata is carried through for collections and atoms.
pub fn to_wire(value: &Value) -> Json {
    let tagged = |tag: &str, payload: Json, meta: Option<&std::rc::Rc<Value>>| {
        let mut node = Map::new();
        node.insert(tag.to_string(), payload);
        if let Some(meta) = meta {
            node.insert("meta".to_string(), to_wire(meta));
        }
        Json::Object(node)
    };
    match value {
        Value::Nil => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Number(n) => serde_json::from_str(n.as_str()).unwrap(),
        Value::String(s) => Json::String(s.to_string()),
        Value::Symbol(s) => json!({ "symbol": s.name() }),
        Value::List(items, meta) => tagged(
            "list",
            Json::Array(items.iter().map(to_wire).collect()),
            meta.as_ref(),
        ),
        Value::Vector(items, meta) => tagged(
            "vector",
            Json::Array(items.iter().map(to_wire).collect()),
            meta.as_ref(),
        ),
        Value::HashMap(map, meta) => tagged(
            "hashmap",
            Json::Object(
                map.iter()
                    .map(|(k, v)| (k.to_string(), to_wire(v)))
                    .collect(),
            ),
            meta.as_ref(),
        ),
        Value::Atom(a) => tagged("atom", to_wire(&a.deref()), a.meta()),
        Value::NativeFn(_) | Value::Closure(_) => panic!("functions have no wire encoding"),
    }
}

/// Numeric literal text in a few shapes, including values beyond `i64`.
pub fn number_text() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<i64>().prop_map(|n| n.to_string()),
        any::<i128>().prop_map(|n| n.to_string()),
        (any::<i32>(), 1u32..1000).prop_map(|(i, f)| format!("{}.{}", i, f)),
        (1u32..100, -20i32..20).prop_map(|(m, e)| format!("{}e{}", m, e)),
    ]
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::Bool),
        number_text().prop_map(|t| Value::Number(t.parse().unwrap())),
        "[a-z ]{0,8}".prop_map(|s| Value::string(s.as_str())),
        "[a-z]{1,6}".prop_map(|s| Value::keyword(&s)),
        "[a-z][a-z0-9-]{0,6}".prop_map(|s| Value::symbol(&s)),
    ]
}

/// Strategy for data values that have a wire encoding.
pub fn wire_value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::list),
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::vector),
            prop::collection::vec(("[a-z]{1,4}", inner.clone()), 0..4).prop_map(|pairs| {
                let flat: Vec<Value> = pairs
                    .into_iter()
                    .flat_map(|(k, v)| [Value::string(k.as_str()), v])
                    .collect();
                Value::new_hash_map(&flat).unwrap()
            }),
            inner.clone().prop_map(Value::atom),
            (prop::collection::vec(inner.clone(), 0..3), inner)
                .prop_map(|(items, meta)| Value::vector(items).with_meta(meta).unwrap()),
        ]
    })
}
