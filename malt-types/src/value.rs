// malt-types - Value types for Malt
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Core value type for Malt.
//!
//! `Value` is the closed set of variants every other part of the interpreter
//! speaks. Values are immutable and cheap to clone (`Rc` and persistent `im`
//! collections); the one exception is [`Atom`], whose slot can be replaced
//! in place and is shared by every clone.
//!
//! Keywords are not a separate variant. They are strings carrying the
//! [`KEYWORD_PREFIX`](crate::keyword::KEYWORD_PREFIX) marker; see
//! [`crate::keyword`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use im::{HashMap, Vector};

use crate::env::{BindFn, EnvRef, EvalFn};
use crate::error::{AritySpec, Error, Result};
use crate::keyword;
use crate::number::Number;
use crate::symbol::Symbol;

/// Metadata attached to a value. Any value may serve as metadata.
pub type Meta = Option<Rc<Value>>;

/// Signature of a host-native function.
pub type NativeFnImpl = dyn Fn(&[Value]) -> Result<Value>;

/// The core value type for Malt.
///
/// Types that support metadata (List, Vector, HashMap, NativeFn, Closure,
/// Atom) carry an optional `Rc<Value>`. Metadata does not affect equality.
#[derive(Clone)]
pub enum Value {
    /// The nil value
    Nil,
    /// Boolean true or false
    Bool(bool),
    /// Exact integer or decimal
    Number(Number),
    /// Identifier
    Symbol(Symbol),
    /// Immutable string; keyword when prefixed with U+029E
    String(Rc<str>),
    /// Ordered list with optional metadata
    List(Vector<Value>, Meta),
    /// Ordered vector with optional metadata
    Vector(Vector<Value>, Meta),
    /// String-keyed map with optional metadata
    HashMap(HashMap<Rc<str>, Value>, Meta),
    /// Host (Rust) function
    NativeFn(NativeFn),
    /// Interpreted function or macro
    Closure(Closure),
    /// Mutable reference cell
    Atom(Atom),
}

// ============================================================================
// Function Types
// ============================================================================

/// A native (Rust) function.
#[derive(Clone)]
pub struct NativeFn {
    name: &'static str,
    func: Rc<NativeFnImpl>,
    meta: Meta,
}

impl NativeFn {
    /// Wrap a host callback.
    pub fn new(name: &'static str, func: Rc<NativeFnImpl>) -> Self {
        NativeFn {
            name,
            func,
            meta: None,
        }
    }

    /// Get the function name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Invoke the host callback.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.func)(args)
    }

    pub fn meta(&self) -> Option<&Rc<Value>> {
        self.meta.as_ref()
    }

    /// Copy of this function carrying `meta`.
    #[must_use]
    pub fn with_meta(&self, meta: Meta) -> Self {
        NativeFn {
            name: self.name,
            func: Rc::clone(&self.func),
            meta,
        }
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<native-fn {}>", self.name)
    }
}

impl PartialEq for NativeFn {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

/// An interpreted function.
///
/// The closure does not know how to evaluate its body or bind its
/// parameters; the evaluator injects both behaviours as callbacks when it
/// creates the closure.
#[derive(Clone)]
pub struct Closure {
    inner: Rc<ClosureInner>,
    is_macro: bool,
    meta: Meta,
}

struct ClosureInner {
    body: Value,
    env: EnvRef,
    params: Value,
    eval: Rc<EvalFn>,
    bind: Rc<BindFn>,
}

impl Closure {
    /// Create a closure over `env`.
    pub fn new(
        body: Value,
        env: EnvRef,
        params: Value,
        eval: Rc<EvalFn>,
        bind: Rc<BindFn>,
    ) -> Self {
        Closure {
            inner: Rc::new(ClosureInner {
                body,
                env,
                params,
                eval,
                bind,
            }),
            is_macro: false,
            meta: None,
        }
    }

    /// The body expression.
    pub fn body(&self) -> &Value {
        &self.inner.body
    }

    /// The captured defining environment.
    pub fn env(&self) -> &EnvRef {
        &self.inner.env
    }

    /// The formal-parameter spec.
    pub fn params(&self) -> &Value {
        &self.inner.params
    }

    pub fn evaluator(&self) -> &Rc<EvalFn> {
        &self.inner.eval
    }

    pub fn binder(&self) -> &Rc<BindFn> {
        &self.inner.bind
    }

    /// Copy of this closure flagged as a macro. The original is untouched.
    #[must_use]
    pub fn set_macro(&self) -> Self {
        Closure {
            inner: Rc::clone(&self.inner),
            is_macro: true,
            meta: self.meta.clone(),
        }
    }

    /// Whether the evaluator should macro-expand calls to this closure.
    pub fn is_macro(&self) -> bool {
        self.is_macro
    }

    pub fn meta(&self) -> Option<&Rc<Value>> {
        self.meta.as_ref()
    }

    /// Copy of this closure carrying `meta`.
    #[must_use]
    pub fn with_meta(&self, meta: Meta) -> Self {
        Closure {
            inner: Rc::clone(&self.inner),
            is_macro: self.is_macro,
            meta,
        }
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_macro {
            write!(f, "#<macro>")
        } else {
            write!(f, "#<fn>")
        }
    }
}

impl PartialEq for Closure {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner) && self.is_macro == other.is_macro
    }
}

// ============================================================================
// Atom Type
// ============================================================================

/// A mutable reference cell.
///
/// Clones share the slot: a `set` through any clone is seen by all of them.
/// Reads and writes are not synchronised; atoms never cross threads.
#[derive(Clone)]
pub struct Atom {
    value: Rc<RefCell<Value>>,
    meta: Meta,
}

impl Atom {
    /// Create a new Atom with an initial value.
    pub fn new(value: Value) -> Self {
        Atom {
            value: Rc::new(RefCell::new(value)),
            meta: None,
        }
    }

    /// Get the current value (deref).
    pub fn deref(&self) -> Value {
        self.value.borrow().clone()
    }

    /// Replace the held value in place, returning the new value.
    pub fn set(&self, new_val: Value) -> Value {
        *self.value.borrow_mut() = new_val.clone();
        new_val
    }

    pub fn meta(&self) -> Option<&Rc<Value>> {
        self.meta.as_ref()
    }

    /// Handle to the same slot carrying `meta`.
    #[must_use]
    pub fn with_meta(&self, meta: Meta) -> Self {
        Atom {
            value: Rc::clone(&self.value),
            meta,
        }
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(atom {:?})", self.value.borrow())
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        // Atoms are equal if they point to the same value cell
        Rc::ptr_eq(&self.value, &other.value)
    }
}

// ============================================================================
// Constructors, predicates and projections
// ============================================================================

impl Value {
    /// Create a nil value
    pub fn nil() -> Self {
        Value::Nil
    }

    /// Create a boolean value
    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Create a number value
    pub fn number(n: impl Into<Number>) -> Self {
        Value::Number(n.into())
    }

    /// Create an integer number value
    pub fn int(n: i64) -> Self {
        Value::Number(Number::from(n))
    }

    /// Create a symbol value
    pub fn symbol(name: &str) -> Self {
        Value::Symbol(Symbol::new(name))
    }

    /// Create a string value
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    /// Create a keyword value (a string with the keyword prefix)
    pub fn keyword(name: &str) -> Self {
        Value::String(keyword::encode(name).into())
    }

    /// Create a list from elements
    pub fn list(elements: Vec<Value>) -> Self {
        Value::List(elements.into_iter().collect(), None)
    }

    /// Create a vector from elements
    pub fn vector(elements: Vec<Value>) -> Self {
        Value::Vector(elements.into_iter().collect(), None)
    }

    /// Create an atom holding `value`
    pub fn atom(value: Value) -> Self {
        Value::Atom(Atom::new(value))
    }

    /// Create a native function value
    pub fn native_fn<F>(name: &'static str, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + 'static,
    {
        Value::NativeFn(NativeFn::new(name, Rc::new(func)))
    }

    /// Build a hash map from alternating key/value elements.
    ///
    /// Fails with an arity error on an odd element count and with a key-type
    /// error when a key position holds anything other than a string or
    /// keyword. Later duplicates of a key overwrite earlier ones.
    pub fn new_hash_map(elements: &[Value]) -> Result<Value> {
        if elements.len() % 2 == 1 {
            return Err(Error::ArityError {
                expected: AritySpec::Even,
                got: elements.len(),
                name: Some("hash-map".to_string()),
            });
        }
        let mut map = HashMap::new();
        for pair in elements.chunks_exact(2) {
            match &pair[0] {
                Value::String(key) => {
                    map.insert(Rc::clone(key), pair[1].clone());
                }
                other => {
                    return Err(Error::KeyType {
                        got: other.type_name(),
                    });
                }
            }
        }
        Ok(Value::HashMap(map, None))
    }

    /// Build a hash map from a list or vector of alternating keys and values.
    pub fn hash_map_from_seq(seq: &Value) -> Result<Value> {
        let elements: Vec<Value> = seq.as_sequence()?.iter().cloned().collect();
        Value::new_hash_map(&elements)
    }

    /// Check if this value is nil
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Check if this value is exactly `true`
    pub fn is_true(&self) -> bool {
        matches!(self, Value::Bool(true))
    }

    /// Check if this value is exactly `false`
    pub fn is_false(&self) -> bool {
        matches!(self, Value::Bool(false))
    }

    /// Check if this value is truthy (not nil and not false)
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    /// True for strings carrying the keyword prefix.
    pub fn is_keyword(&self) -> bool {
        matches!(self, Value::String(s) if keyword::is_keyword_text(s))
    }

    /// True for every string, keywords included.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_, _))
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Value::Vector(_, _))
    }

    pub fn is_hash_map(&self) -> bool {
        matches!(self, Value::HashMap(_, _))
    }

    pub fn is_native_fn(&self) -> bool {
        matches!(self, Value::NativeFn(_))
    }

    pub fn is_closure(&self) -> bool {
        matches!(self, Value::Closure(_))
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Value::Atom(_))
    }

    /// List or vector.
    pub fn is_sequential(&self) -> bool {
        matches!(self, Value::List(_, _) | Value::Vector(_, _))
    }

    /// Either callable variant.
    pub fn is_fn(&self) -> bool {
        matches!(self, Value::NativeFn(_) | Value::Closure(_))
    }

    /// Project a list or vector to its ordered elements.
    pub fn as_sequence(&self) -> Result<&Vector<Value>> {
        match self {
            Value::List(items, _) | Value::Vector(items, _) => Ok(items),
            other => Err(Error::type_mismatch_in(
                "sequence projection",
                "list or vector",
                other.type_name(),
            )),
        }
    }

    /// Bare keyword name, if this is a keyword.
    pub fn keyword_name(&self) -> Option<&str> {
        match self {
            Value::String(s) => keyword::name_of(s),
            _ => None,
        }
    }

    /// Copy of this closure flagged as a macro.
    pub fn set_macro(&self) -> Result<Value> {
        match self {
            Value::Closure(c) => Ok(Value::Closure(c.set_macro())),
            other => Err(Error::type_mismatch_in(
                "set-macro",
                "closure",
                other.type_name(),
            )),
        }
    }

    /// Macro flag of a closure; false for every other variant.
    pub fn is_macro(&self) -> bool {
        matches!(self, Value::Closure(c) if c.is_macro())
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Symbol(_) => "symbol",
            Value::String(s) if keyword::is_keyword_text(s) => "keyword",
            Value::String(_) => "string",
            Value::List(_, _) => "list",
            Value::Vector(_, _) => "vector",
            Value::HashMap(_, _) => "hash-map",
            Value::NativeFn(_) => "native-fn",
            Value::Closure(c) if c.is_macro() => "macro",
            Value::Closure(_) => "closure",
            Value::Atom(_) => "atom",
        }
    }

    /// Get the metadata of this value, if any.
    pub fn meta(&self) -> Option<&Rc<Value>> {
        match self {
            Value::List(_, meta) | Value::Vector(_, meta) | Value::HashMap(_, meta) => {
                meta.as_ref()
            }
            Value::NativeFn(f) => f.meta(),
            Value::Closure(c) => c.meta(),
            Value::Atom(a) => a.meta(),
            _ => None,
        }
    }

    /// Returns true if this value type supports metadata.
    pub fn supports_meta(&self) -> bool {
        matches!(
            self,
            Value::List(_, _)
                | Value::Vector(_, _)
                | Value::HashMap(_, _)
                | Value::NativeFn(_)
                | Value::Closure(_)
                | Value::Atom(_)
        )
    }

    /// Return a new value with the given metadata.
    pub fn with_meta(&self, meta: Value) -> Result<Value> {
        let meta = Some(Rc::new(meta));
        match self {
            Value::List(items, _) => Ok(Value::List(items.clone(), meta)),
            Value::Vector(items, _) => Ok(Value::Vector(items.clone(), meta)),
            Value::HashMap(map, _) => Ok(Value::HashMap(map.clone(), meta)),
            Value::NativeFn(f) => Ok(Value::NativeFn(f.with_meta(meta))),
            Value::Closure(c) => Ok(Value::Closure(c.with_meta(meta))),
            Value::Atom(a) => Ok(Value::Atom(a.with_meta(meta))),
            other => Err(Error::type_mismatch_in(
                "with-meta",
                "collection, function or atom",
                other.type_name(),
            )),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

// ============================================================================
// Debug implementation
// ============================================================================

fn write_seq(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: &Vector<Value>,
    close: &str,
) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{:?}", item)?;
    }
    write!(f, "{}", close)
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Note: Metadata is not displayed
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Symbol(sym) => write!(f, "{}", sym),
            Value::String(s) => match keyword::name_of(s) {
                Some(name) => write!(f, ":{}", name),
                None => write!(f, "{:?}", s),
            },
            Value::List(items, _) => write_seq(f, "(", items, ")"),
            Value::Vector(items, _) => write_seq(f, "[", items, "]"),
            Value::HashMap(map, _) => {
                // Sorted for a stable rendering
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                write!(f, "{{")?;
                for (i, (k, v)) in entries.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?} {:?}", Value::String(Rc::clone(k)), v)?;
                }
                write!(f, "}}")
            }
            Value::NativeFn(nf) => write!(f, "{:?}", nf),
            Value::Closure(c) => write!(f, "{:?}", c),
            Value::Atom(a) => write!(f, "{:?}", a),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
