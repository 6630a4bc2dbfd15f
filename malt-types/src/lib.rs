// malt-types - Value model for the Malt interpreter
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # malt-types
//!
//! The shared vocabulary of the Malt interpreter: the [`Value`] enum, exact
//! [`Number`]s, interned [`Symbol`]s, keyword encoding, structural
//! [`equal`]ity, the [`Environment`] capability closures capture, and the
//! [`Error`] taxonomy every layer reports through.

pub mod env;
pub mod equality;
pub mod error;
pub mod keyword;
pub mod number;
pub mod symbol;
pub mod value;

pub use env::{BindFn, EnvRef, Environment, EvalFn};
pub use equality::equal;
pub use error::{AritySpec, Error, Result};
pub use im::{HashMap, Vector};
pub use keyword::KEYWORD_PREFIX;
pub use num_bigint::BigInt;
pub use number::Number;
pub use symbol::Symbol;
pub use value::{Atom, Closure, Meta, NativeFn, NativeFnImpl, Value};
