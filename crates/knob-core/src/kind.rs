//! Primitive kinds and value types

use crate::error::{KnobError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The primitive kind of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "int64")]
    Int,
    #[serde(rename = "uint64")]
    UInt,
    #[serde(rename = "float64")]
    Float,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "string")]
    Text,
}

impl Kind {
    /// Every primitive kind
    pub const ALL: [Kind; 5] = [Kind::Int, Kind::UInt, Kind::Float, Kind::Bool, Kind::Text];

    pub fn name(&self) -> &'static str {
        match self {
            Kind::Int => "int64",
            Kind::UInt => "uint64",
            Kind::Float => "float64",
            Kind::Bool => "bool",
            Kind::Text => "string",
        }
    }

    /// Whether values of this kind are ordered numbers
    pub fn is_numeric(&self) -> bool {
        matches!(self, Kind::Int | Kind::UInt | Kind::Float)
    }

    pub fn scalar(self) -> ValueType {
        ValueType::new(self, Arity::Scalar)
    }

    pub fn list(self) -> ValueType {
        ValueType::new(self, Arity::List)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = KnobError;

    fn from_str(s: &str) -> Result<Self> {
        Kind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| KnobError::UnknownKind(s.to_string()))
    }
}

/// Whether a value holds one payload or a homogeneous list of them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arity {
    Scalar,
    List,
}

/// A primitive kind together with its arity, e.g. `float64` or `[uint64]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValueType {
    pub kind: Kind,
    pub arity: Arity,
}

impl ValueType {
    pub fn new(kind: Kind, arity: Arity) -> Self {
        Self { kind, arity }
    }

    pub fn is_list(&self) -> bool {
        self.arity == Arity::List
    }

    /// The same kind with scalar arity
    pub fn as_scalar(&self) -> ValueType {
        self.kind.scalar()
    }

    /// The same kind with list arity
    pub fn as_list(&self) -> ValueType {
        self.kind.list()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arity {
            Arity::Scalar => write!(f, "{}", self.kind),
            Arity::List => write!(f, "[{}]", self.kind),
        }
    }
}
