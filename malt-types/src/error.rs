// malt-types - Error types for the Malt value core
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types shared by the value model, the wire decoder and `apply`.

use std::fmt;

use crate::symbol::Symbol;
use crate::value::Value;

/// Result type for Malt operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the value core.
#[derive(Debug, Clone)]
pub enum Error {
    /// Malformed wire bytes or a node that violates the wire schema
    Decode(String),
    /// An object node carrying none of the recognised discriminant fields
    UnknownVariant { fields: Vec<String> },
    /// Wrong number of elements or arguments
    ArityError {
        expected: AritySpec,
        got: usize,
        name: Option<String>,
    },
    /// Hash-map key that is not a string or keyword
    KeyType { got: &'static str },
    /// Operation applied to a value of the wrong variant
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
        context: Option<String>,
    },
    /// Attempted to call something that isn't callable
    NotCallable(String),
    /// Parameter/argument mismatch reported by an environment builder
    Bind(String),
    /// Symbol not bound anywhere in the scope chain
    UndefinedSymbol(Symbol),
    /// Interpreted-language value thrown across the host boundary
    Thrown(Value),
}

/// Specification for expected arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AritySpec {
    Exact(usize),
    AtLeast(usize),
    Even,
}

impl fmt::Display for AritySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AritySpec::Exact(n) => write!(f, "{}", n),
            AritySpec::AtLeast(n) => write!(f, "at least {}", n),
            AritySpec::Even => write!(f, "an even number"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Decode(msg) => write!(f, "Decode error: {}", msg),
            Error::UnknownVariant { fields } => {
                if fields.is_empty() {
                    write!(f, "Unknown wire variant: object has no fields")
                } else {
                    write!(f, "Unknown wire variant with fields: {}", fields.join(", "))
                }
            }
            Error::ArityError {
                expected,
                got,
                name,
            } => {
                if let Some(name) = name {
                    write!(
                        f,
                        "Wrong number of arguments to '{}': expected {}, got {}",
                        name, expected, got
                    )
                } else {
                    write!(
                        f,
                        "Wrong number of arguments: expected {}, got {}",
                        expected, got
                    )
                }
            }
            Error::KeyType { got } => {
                write!(f, "Hash-map key must be a string or keyword, got {}", got)
            }
            Error::TypeMismatch {
                expected,
                got,
                context,
            } => {
                if let Some(ctx) = context {
                    write!(f, "{}: expected {}, got {}", ctx, expected, got)
                } else {
                    write!(f, "Type error: expected {}, got {}", expected, got)
                }
            }
            Error::NotCallable(val) => write!(f, "Cannot call value: {}", val),
            Error::Bind(msg) => write!(f, "Bind error: {}", msg),
            Error::UndefinedSymbol(sym) => write!(f, "'{}' not found", sym),
            Error::Thrown(val) => write!(f, "{:?}", val),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Create an arity error for exact arity.
    pub fn arity(expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(expected),
            got,
            name: None,
        }
    }

    /// Create an arity error for exact arity with function name.
    pub fn arity_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for minimum arity.
    pub fn arity_at_least(expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::AtLeast(expected),
            got,
            name: None,
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(expected: &'static str, got: &'static str) -> Self {
        Error::TypeMismatch {
            expected,
            got,
            context: None,
        }
    }

    /// Create a type mismatch error with context.
    pub fn type_mismatch_in(
        context: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        Error::TypeMismatch {
            expected,
            got,
            context: Some(context.into()),
        }
    }

    /// Create a bind error.
    pub fn bind(message: impl Into<String>) -> Self {
        Error::Bind(message.into())
    }

    /// The thrown value carried by this error, if any.
    pub fn thrown_value(&self) -> Option<&Value> {
        match self {
            Error::Thrown(val) => Some(val),
            _ => None,
        }
    }
}

impl From<Value> for Error {
    fn from(val: Value) -> Self {
        Error::Thrown(val)
    }
}
