// malt-wire - JSON wire-format decoding for Malt values
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # malt-wire
//!
//! Decodes the JSON wire encoding produced by the reader into [`Value`]s.
//!
//! Every node is one of:
//!
//! | Wire node | Value |
//! |-----------|-------|
//! | `null` | `Nil` |
//! | `true` / `false` | `Bool` |
//! | numeric literal | `Number` (exact value) |
//! | `"text"` | `String` |
//! | `{"symbol": "name"}` | `Symbol` |
//! | `{"atom": node, "meta"?: node}` | `Atom` |
//! | `{"list": [node...], "meta"?: node}` | `List` |
//! | `{"hashmap": {"key": node...}, "meta"?: node}` | `HashMap` |
//! | `{"vector": [node...], "meta"?: node}` | `Vector` |
//! | `{"fn": ..., "meta"?: node}` | placeholder `NativeFn` |
//!
//! Decoding is strict: unrecognized fields are rejected at every level, and
//! a failure anywhere in the tree discards the whole decode. A field
//! repeated inside one object resolves to its last occurrence.
//!
//! ```
//! use malt_types::Value;
//!
//! let value = malt_wire::decode_str(r#"{"list": [1, "foo", {"symbol": "x"}]}"#).unwrap();
//! assert_eq!(
//!     value,
//!     Value::list(vec![Value::int(1), Value::string("foo"), Value::symbol("x")])
//! );
//! ```

pub mod decode;

pub use decode::{
    DEFAULT_MAX_DEPTH, Decoder, FnNodePolicy, PLACEHOLDER_FN_NAME, decode_slice, decode_str,
};

// Re-export value types for convenience
pub use malt_types::{Error, Result, Value};
