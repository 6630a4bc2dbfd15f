// malt-wire - Wire tree decoding
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Conversion from parsed JSON nodes to [`Value`].
//!
//! Object nodes are dispatched on a reserved tag field, probed in the fixed
//! order `symbol`, `atom`, `list`, `hashmap`, `vector`, `fn`. The first tag
//! present decides the variant; any field other than that tag (and `meta`,
//! where the variant carries metadata) is an error. A field repeated within
//! one object is not an error: the JSON parser keeps the last occurrence.
//!
//! Numeric literals are decoded exactly, but the text a decoded [`Number`]
//! reports through `as_str` is the parser's rendering of the literal, which
//! may differ in form from the input (`1E5` can come back as `1e+5`).
//!
//! Decoded atoms and `fn` placeholders are fresh values on every decode and
//! compare by identity, so decoding the same atom text twice gives two
//! values that are not `equal`.

use std::rc::Rc;

use malt_types::{Error, HashMap, Number, Result, Value};
use serde_json::{Map, Value as Json};

/// Default nesting limit for [`Decoder`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Name given to the placeholder function produced for `fn` nodes.
pub const PLACEHOLDER_FN_NAME: &str = "wire-fn";

const TAG_SYMBOL: &str = "symbol";
const TAG_ATOM: &str = "atom";
const TAG_LIST: &str = "list";
const TAG_HASHMAP: &str = "hashmap";
const TAG_VECTOR: &str = "vector";
const TAG_FN: &str = "fn";
const FIELD_META: &str = "meta";

/// Probe order for tagged object nodes.
const TAGS: [&str; 6] = [TAG_SYMBOL, TAG_ATOM, TAG_LIST, TAG_HASHMAP, TAG_VECTOR, TAG_FN];

/// What to do with `fn` nodes, which cannot carry executable code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FnNodePolicy {
    /// Decode to a native function that fails with `NotCallable` when applied.
    #[default]
    Placeholder,
    /// Fail the decode.
    Reject,
}

/// Decoder configuration.
///
/// # Examples
///
/// ```
/// use malt_wire::{Decoder, FnNodePolicy};
///
/// let decoder = Decoder::new().with_max_depth(4).with_fn_nodes(FnNodePolicy::Reject);
/// assert!(decoder.decode_str(r#"{"fn": null}"#).is_err());
/// assert!(decoder.decode_str(r#"{"list":[{"list":[{"list":[{"list":[{"list":[]}]}]}]}]}"#).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    max_depth: usize,
    fn_nodes: FnNodePolicy,
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder {
            max_depth: DEFAULT_MAX_DEPTH,
            fn_nodes: FnNodePolicy::default(),
        }
    }
}

impl Decoder {
    /// Create a decoder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth. The top-level node is depth 1.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the policy for `fn` nodes.
    #[must_use]
    pub fn with_fn_nodes(mut self, policy: FnNodePolicy) -> Self {
        self.fn_nodes = policy;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn fn_nodes(&self) -> FnNodePolicy {
        self.fn_nodes
    }

    /// Parse and decode wire text.
    pub fn decode_str(&self, text: &str) -> Result<Value> {
        tracing::trace!(len = text.len(), "decode wire text");
        let json: Json = serde_json::from_str(text).map_err(|e| reject(format!("{}", e)))?;
        self.decode_value(&json)
    }

    /// Parse and decode wire bytes.
    pub fn decode_slice(&self, bytes: &[u8]) -> Result<Value> {
        tracing::trace!(len = bytes.len(), "decode wire bytes");
        let json: Json = serde_json::from_slice(bytes).map_err(|e| reject(format!("{}", e)))?;
        self.decode_value(&json)
    }

    /// Decode an already parsed JSON node.
    pub fn decode_value(&self, node: &Json) -> Result<Value> {
        self.decode_node(node, 1)
    }

    fn decode_node(&self, node: &Json, depth: usize) -> Result<Value> {
        if depth > self.max_depth {
            return Err(reject(format!(
                "nesting exceeds maximum depth of {}",
                self.max_depth
            )));
        }
        match node {
            Json::Null => Ok(Value::Nil),
            Json::Bool(b) => Ok(Value::Bool(*b)),
            Json::Number(n) => {
                let number = Number::parse(&n.to_string()).inspect_err(|e| {
                    tracing::debug!(error = %e, "rejected numeric literal");
                })?;
                Ok(Value::Number(number))
            }
            Json::String(s) => Ok(Value::string(s.as_str())),
            Json::Array(_) => Err(reject("bare array is not a valid node")),
            Json::Object(fields) => self.decode_object(fields, depth),
        }
    }

    fn decode_object(&self, fields: &Map<String, Json>, depth: usize) -> Result<Value> {
        let Some(tag) = TAGS.into_iter().find(|tag| fields.contains_key(*tag)) else {
            let mut names: Vec<String> = fields.keys().cloned().collect();
            names.sort();
            tracing::debug!(fields = ?names, "object node without a variant tag");
            return Err(Error::UnknownVariant { fields: names });
        };

        let allow_meta = tag != TAG_SYMBOL;
        if let Some(extra) = fields
            .keys()
            .find(|k| k.as_str() != tag && !(allow_meta && k.as_str() == FIELD_META))
        {
            return Err(reject(format!("unexpected field \"{}\" in {} node", extra, tag)));
        }

        let payload = &fields[tag];
        let value = match tag {
            TAG_SYMBOL => match payload {
                Json::String(name) => return Ok(Value::symbol(name)),
                other => {
                    return Err(reject(format!(
                        "symbol name must be a string, got {}",
                        json_kind(other)
                    )));
                }
            },
            TAG_ATOM => Value::atom(self.decode_node(payload, depth + 1)?),
            TAG_LIST => Value::list(self.decode_elements(tag, payload, depth)?),
            TAG_VECTOR => Value::vector(self.decode_elements(tag, payload, depth)?),
            TAG_HASHMAP => self.decode_hash_map(payload, depth)?,
            _ => self.decode_fn()?,
        };

        match fields.get(FIELD_META) {
            Some(meta) => value.with_meta(self.decode_node(meta, depth + 1)?),
            None => Ok(value),
        }
    }

    fn decode_elements(&self, tag: &str, payload: &Json, depth: usize) -> Result<Vec<Value>> {
        match payload {
            Json::Null => Ok(Vec::new()),
            Json::Array(items) => items
                .iter()
                .map(|item| self.decode_node(item, depth + 1))
                .collect(),
            other => Err(reject(format!(
                "{} payload must be an array, got {}",
                tag,
                json_kind(other)
            ))),
        }
    }

    fn decode_hash_map(&self, payload: &Json, depth: usize) -> Result<Value> {
        let entries = match payload {
            Json::Null => return Ok(Value::HashMap(HashMap::new(), None)),
            Json::Object(entries) => entries,
            other => {
                return Err(reject(format!(
                    "hashmap payload must be an object, got {}",
                    json_kind(other)
                )));
            }
        };
        let mut map = HashMap::new();
        for (key, node) in entries {
            map.insert(Rc::from(key.as_str()), self.decode_node(node, depth + 1)?);
        }
        Ok(Value::HashMap(map, None))
    }

    fn decode_fn(&self) -> Result<Value> {
        match self.fn_nodes {
            FnNodePolicy::Placeholder => Ok(Value::native_fn(PLACEHOLDER_FN_NAME, |_| {
                Err(Error::NotCallable(
                    "function decoded from wire format".to_string(),
                ))
            })),
            FnNodePolicy::Reject => Err(reject("function nodes are not supported")),
        }
    }
}

/// Decode wire text with the default [`Decoder`].
pub fn decode_str(text: &str) -> Result<Value> {
    Decoder::default().decode_str(text)
}

/// Decode wire bytes with the default [`Decoder`].
pub fn decode_slice(bytes: &[u8]) -> Result<Value> {
    Decoder::default().decode_slice(bytes)
}

fn reject(message: impl Into<String>) -> Error {
    let message = message.into();
    tracing::debug!(%message, "wire decode rejected");
    Error::Decode(message)
}

fn json_kind(node: &Json) -> &'static str {
    match node {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
