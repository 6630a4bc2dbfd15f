// malt-core - Function application for the Malt interpreter
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # malt-core
//!
//! Uniform function application over the two callable variants, plus a
//! reference scope-chain [`Env`] and parameter binder for hosts that want
//! one. The evaluator itself lives outside this crate and reaches back in
//! through the callbacks stored on each [`Closure`].

pub mod apply;
pub mod env;

pub use apply::{apply, apply_seq};
pub use env::{Env, REST_MARKER, bind_params};

// Re-export value types for convenience
pub use malt_types::{Closure, EnvRef, Environment, Error, Result, Symbol, Value};
