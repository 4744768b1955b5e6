//! Primitive scalar values and their per-kind ordering
//!
//! Every kind has a total order and an equality relation. Comparing two
//! scalars of different kinds is always a `TypeMismatch`; numbers are never
//! converted between signed, unsigned and floating point representations.
//! Booleans are ordered `false < true`.

use crate::error::{KnobError, Result};
use crate::kind::Kind;
use std::fmt;

/// A single primitive payload
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Text(String),
}

/// One of the comparisons every kind supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
}

impl Comparison {
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::Equal => "==",
            Comparison::Greater => ">",
            Comparison::GreaterEqual => ">=",
            Comparison::Less => "<",
            Comparison::LessEqual => "<=",
        }
    }

    fn apply<T: PartialOrd>(self, a: &T, b: &T) -> bool {
        match self {
            Comparison::Equal => a == b,
            Comparison::Greater => a > b,
            Comparison::GreaterEqual => a >= b,
            Comparison::Less => a < b,
            Comparison::LessEqual => a <= b,
        }
    }

    fn apply_bool(self, a: bool, b: bool) -> bool {
        match self {
            Comparison::Equal => a == b,
            Comparison::Greater => bool_greater(a, b),
            Comparison::GreaterEqual => bool_greater_equal(a, b),
            Comparison::Less => bool_less(a, b),
            Comparison::LessEqual => bool_less_equal(a, b),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `a > b` for booleans:
///
/// | a | b | a > b |
/// |---|---|-------|
/// | F | F | F |
/// | F | T | F |
/// | T | F | T |
/// | T | T | F |
pub fn bool_greater(a: bool, b: bool) -> bool {
    a && !b
}

/// `a >= b` for booleans:
///
/// | a | b | a >= b |
/// |---|---|--------|
/// | F | F | T |
/// | F | T | F |
/// | T | F | T |
/// | T | T | T |
pub fn bool_greater_equal(a: bool, b: bool) -> bool {
    a || !b
}

/// `a < b` for booleans:
///
/// | a | b | a < b |
/// |---|---|-------|
/// | F | F | F |
/// | F | T | T |
/// | T | F | F |
/// | T | T | F |
pub fn bool_less(a: bool, b: bool) -> bool {
    !a && b
}

/// `a <= b` for booleans:
///
/// | a | b | a <= b |
/// |---|---|--------|
/// | F | F | T |
/// | F | T | T |
/// | T | F | F |
/// | T | T | T |
pub fn bool_less_equal(a: bool, b: bool) -> bool {
    !a || b
}

impl Scalar {
    pub fn kind(&self) -> Kind {
        match self {
            Scalar::Int(_) => Kind::Int,
            Scalar::UInt(_) => Kind::UInt,
            Scalar::Float(_) => Kind::Float,
            Scalar::Bool(_) => Kind::Bool,
            Scalar::Text(_) => Kind::Text,
        }
    }

    /// Parse text using the grammar of the given kind.
    ///
    /// Integers are base 10, floats accept decimal and exponent forms,
    /// booleans accept exactly `true` and `false`, and strings are taken
    /// verbatim.
    pub fn parse(kind: Kind, text: &str) -> Result<Scalar> {
        let failure = |reason: String| KnobError::ParseFailure {
            input: text.to_string(),
            target: kind.name().to_string(),
            reason,
        };

        match kind {
            Kind::Int => text.parse().map(Scalar::Int).map_err(|e| failure(e.to_string())),
            Kind::UInt => text.parse().map(Scalar::UInt).map_err(|e| failure(e.to_string())),
            Kind::Float => text.parse().map(Scalar::Float).map_err(|e| failure(e.to_string())),
            Kind::Bool => text.parse().map(Scalar::Bool).map_err(|e| failure(e.to_string())),
            Kind::Text => Ok(Scalar::Text(text.to_string())),
        }
    }

    /// Apply a comparison with `self` on the left.
    /// Returns `TypeMismatch` if the kinds differ.
    pub fn compare(&self, op: Comparison, other: &Scalar) -> Result<bool> {
        match (self, other) {
            (Scalar::Int(a), Scalar::Int(b)) => Ok(op.apply(a, b)),
            (Scalar::UInt(a), Scalar::UInt(b)) => Ok(op.apply(a, b)),
            (Scalar::Float(a), Scalar::Float(b)) => Ok(op.apply(a, b)),
            (Scalar::Bool(a), Scalar::Bool(b)) => Ok(op.apply_bool(*a, *b)),
            (Scalar::Text(a), Scalar::Text(b)) => Ok(op.apply(a, b)),
            _ => Err(KnobError::type_mismatch(self.kind(), other.kind())),
        }
    }

    pub fn equal(&self, other: &Scalar) -> Result<bool> {
        self.compare(Comparison::Equal, other)
    }

    pub fn greater(&self, other: &Scalar) -> Result<bool> {
        self.compare(Comparison::Greater, other)
    }

    pub fn greater_equal(&self, other: &Scalar) -> Result<bool> {
        self.compare(Comparison::GreaterEqual, other)
    }

    pub fn less(&self, other: &Scalar) -> Result<bool> {
        self.compare(Comparison::Less, other)
    }

    pub fn less_equal(&self, other: &Scalar) -> Result<bool> {
        self.compare(Comparison::LessEqual, other)
    }

    /// Number of characters for text, `None` for every other kind
    pub fn char_count(&self) -> Option<usize> {
        match self {
            Scalar::Text(s) => Some(s.chars().count()),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::UInt(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<u64> for Scalar {
    fn from(v: u64) -> Self {
        Scalar::UInt(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}
