//! Knob Core - Foundational value types for knob
//!
//! This crate provides the types that the schema layer builds on:
//! - `Kind`, `Arity`, `ValueType` - The closed set of primitive kinds
//! - `Scalar`, `Comparison` - Per-kind ordering and parsing
//! - `Value`, `List` - Scalar and list values with a uniform contract
//! - Error types and Result alias

mod error;
mod kind;
mod primitive;
mod value;

pub use error::{KnobError, Result};
pub use kind::{Arity, Kind, ValueType};
pub use primitive::{
    bool_greater, bool_greater_equal, bool_less, bool_less_equal, Comparison, Scalar,
};
pub use value::{List, Value};
