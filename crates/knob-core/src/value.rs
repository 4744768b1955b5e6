//! Typed values: scalars and homogeneous lists
//!
//! A [`Value`] never changes its kind or arity once constructed. Its payload
//! can be replaced through [`Value::set`] or [`Value::parse_in_place`], and
//! [`Clone`] is the only way to share it.

use crate::error::{KnobError, Result};
use crate::kind::{Arity, Kind, ValueType};
use crate::primitive::{Comparison, Scalar};
use std::fmt;
use std::str::FromStr;

/// A homogeneous list of primitive payloads
#[derive(Debug, Clone, PartialEq)]
pub enum List {
    Int(Vec<i64>),
    UInt(Vec<u64>),
    Float(Vec<f64>),
    Bool(Vec<bool>),
    Text(Vec<String>),
}

impl List {
    /// An empty list of the given kind
    pub fn empty(kind: Kind) -> Self {
        match kind {
            Kind::Int => List::Int(Vec::new()),
            Kind::UInt => List::UInt(Vec::new()),
            Kind::Float => List::Float(Vec::new()),
            Kind::Bool => List::Bool(Vec::new()),
            Kind::Text => List::Text(Vec::new()),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            List::Int(_) => Kind::Int,
            List::UInt(_) => Kind::UInt,
            List::Float(_) => Kind::Float,
            List::Bool(_) => Kind::Bool,
            List::Text(_) => Kind::Text,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            List::Int(v) => v.len(),
            List::UInt(v) => v.len(),
            List::Float(v) => v.len(),
            List::Bool(v) => v.len(),
            List::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the items as scalars
    pub fn iter(&self) -> Box<dyn Iterator<Item = Scalar> + '_> {
        match self {
            List::Int(v) => Box::new(v.iter().map(|x| Scalar::Int(*x))),
            List::UInt(v) => Box::new(v.iter().map(|x| Scalar::UInt(*x))),
            List::Float(v) => Box::new(v.iter().map(|x| Scalar::Float(*x))),
            List::Bool(v) => Box::new(v.iter().map(|x| Scalar::Bool(*x))),
            List::Text(v) => Box::new(v.iter().map(|x| Scalar::Text(x.clone()))),
        }
    }

    /// Parse a comma separated list. Each item is trimmed before parsing;
    /// blank input gives an empty list.
    pub fn parse(kind: Kind, text: &str) -> Result<List> {
        if text.trim().is_empty() {
            return Ok(List::empty(kind));
        }

        Ok(match kind {
            Kind::Int => List::Int(parse_items(kind, text)?),
            Kind::UInt => List::UInt(parse_items(kind, text)?),
            Kind::Float => List::Float(parse_items(kind, text)?),
            Kind::Bool => List::Bool(parse_items(kind, text)?),
            Kind::Text => List::Text(parse_items(kind, text)?),
        })
    }

    /// Element-wise equality. Lists of different length are unequal,
    /// lists of different kinds are a `TypeMismatch`.
    pub fn equal(&self, other: &List) -> Result<bool> {
        self.check_kind(other.kind())?;
        Ok(self == other)
    }

    /// Whether any item equals the given scalar
    pub fn contains(&self, x: &Scalar) -> Result<bool> {
        self.check_kind(x.kind())?;
        Ok(self.iter().any(|item| item == *x))
    }

    /// Whether every item satisfies `item <op> bound`.
    /// An empty list satisfies no comparison.
    pub fn all(&self, op: Comparison, bound: &Scalar) -> Result<bool> {
        self.check_kind(bound.kind())?;

        if self.is_empty() {
            return Ok(false);
        }

        for item in self.iter() {
            if !item.compare(op, bound)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn greater(&self, bound: &Scalar) -> Result<bool> {
        self.all(Comparison::Greater, bound)
    }

    pub fn greater_equal(&self, bound: &Scalar) -> Result<bool> {
        self.all(Comparison::GreaterEqual, bound)
    }

    pub fn less(&self, bound: &Scalar) -> Result<bool> {
        self.all(Comparison::Less, bound)
    }

    pub fn less_equal(&self, bound: &Scalar) -> Result<bool> {
        self.all(Comparison::LessEqual, bound)
    }

    fn check_kind(&self, other: Kind) -> Result<()> {
        if self.kind() != other {
            return Err(KnobError::type_mismatch(self.kind(), other));
        }
        Ok(())
    }
}

fn parse_items<T>(kind: Kind, text: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    text.split(',')
        .map(str::trim)
        .map(|item| {
            item.parse::<T>().map_err(|e| KnobError::ParseFailure {
                input: text.to_string(),
                target: kind.list().to_string(),
                reason: format!("item '{}': {}", item, e),
            })
        })
        .collect()
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

impl Scalar {
    /// Whether this scalar equals one of the list's items
    pub fn one_of(&self, list: &List) -> Result<bool> {
        list.contains(self)
    }
}

/// A typed value of fixed kind and arity
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    List(List),
}

impl Value {
    /// Parse text as a value of the given type
    pub fn parse(value_type: ValueType, text: &str) -> Result<Value> {
        match value_type.arity {
            Arity::Scalar => Scalar::parse(value_type.kind, text).map(Value::Scalar),
            Arity::List => List::parse(value_type.kind, text).map(Value::List),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Scalar(s) => s.kind(),
            Value::List(l) => l.kind(),
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Value::Scalar(_) => Arity::Scalar,
            Value::List(_) => Arity::List,
        }
    }

    pub fn value_type(&self) -> ValueType {
        ValueType::new(self.kind(), self.arity())
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            Value::Scalar(_) => None,
        }
    }

    /// Replace the payload. The new value must have the same type.
    pub fn set(&mut self, other: Value) -> Result<()> {
        if other.value_type() != self.value_type() {
            return Err(KnobError::type_mismatch(self.value_type(), other.value_type()));
        }
        *self = other;
        Ok(())
    }

    /// Re-parse the payload from text, keeping the current type.
    /// The value is left untouched if parsing fails.
    pub fn parse_in_place(&mut self, text: &str) -> Result<()> {
        *self = Value::parse(self.value_type(), text)?;
        Ok(())
    }

    /// List length, or character count for a text scalar
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::Scalar(s) => s.char_count(),
            Value::List(l) => Some(l.len()),
        }
    }

    /// Compare against a scalar bound. Lists must satisfy the comparison for
    /// every item (and never satisfy it when empty).
    pub fn compare(&self, op: Comparison, bound: &Scalar) -> Result<bool> {
        match self {
            Value::Scalar(s) => s.compare(op, bound),
            Value::List(l) => l.all(op, bound),
        }
    }

    /// Whether a scalar value is one of the list's items
    pub fn one_of(&self, list: &List) -> Result<bool> {
        match self {
            Value::Scalar(s) => s.one_of(list),
            Value::List(_) => Err(KnobError::type_mismatch(
                self.kind().scalar(),
                self.value_type(),
            )),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => write!(f, "{}", s),
            Value::List(l) => write!(f, "{}", l),
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<List> for Value {
    fn from(l: List) -> Self {
        Value::List(l)
    }
}

macro_rules! impl_from_payload {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Scalar(Scalar::from(v))
                }
            }

            impl From<Vec<$t>> for List {
                fn from(v: Vec<$t>) -> Self {
                    List::$variant(v)
                }
            }

            impl From<Vec<$t>> for Value {
                fn from(v: Vec<$t>) -> Self {
                    Value::List(List::$variant(v))
                }
            }
        )*
    };
}

impl_from_payload! {
    i64 => Int,
    u64 => UInt,
    f64 => Float,
    bool => Bool,
    String => Text,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Scalar(Scalar::from(v))
    }
}

impl From<Vec<&str>> for List {
    fn from(v: Vec<&str>) -> Self {
        List::Text(v.into_iter().map(String::from).collect())
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Value::List(List::from(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_round_trip() {
        let v = Value::parse(Kind::UInt.list(), "2, 4, 6").unwrap();
        assert_eq!(v, Value::from(vec![2u64, 4, 6]));
        assert_eq!(v.to_string(), "2,4,6");
        assert_eq!(v.value_type(), Kind::UInt.list());
    }

    #[test]
    fn test_parse_string_list_trims_items() {
        let v = Value::parse(Kind::Text.list(), " a ,b,  c d ").unwrap();
        assert_eq!(v, Value::from(vec!["a", "b", "c d"]));
    }

    #[test]
    fn test_parse_blank_list_is_empty() {
        let v = Value::parse(Kind::Float.list(), "  ").unwrap();
        assert_eq!(v.length(), Some(0));

        // no single empty string item for text lists either
        let v = Value::parse(Kind::Text.list(), "").unwrap();
        assert_eq!(v, Value::List(List::empty(Kind::Text)));
        assert_eq!(v.length(), Some(0));

        // but a blank item among others is kept
        let v = Value::parse(Kind::Text.list(), "a,,b").unwrap();
        assert_eq!(v, Value::from(vec!["a", "", "b"]));
    }

    #[test]
    fn test_parse_list_failure() {
        let err = Value::parse(Kind::Int.list(), "1, x, 3").unwrap_err();
        assert!(matches!(err, KnobError::ParseFailure { ref target, .. } if target == "[int64]"));
        assert!(Value::parse(Kind::Bool.list(), "true,False").is_err());
    }

    #[test]
    fn test_empty_list_orderings_are_false() {
        let empty = List::empty(Kind::Float);
        let x = Scalar::Float(0.0);

        assert!(!empty.greater(&x).unwrap());
        assert!(!empty.greater_equal(&x).unwrap());
        assert!(!empty.less(&x).unwrap());
        assert!(!empty.less_equal(&x).unwrap());
    }

    #[test]
    fn test_list_orderings_are_universal() {
        let list = List::from(vec![3i64, 5, 7]);

        assert!(list.greater(&Scalar::Int(2)).unwrap());
        assert!(!list.greater(&Scalar::Int(3)).unwrap());
        assert!(list.greater_equal(&Scalar::Int(3)).unwrap());
        assert!(list.less(&Scalar::Int(8)).unwrap());
        assert!(!list.less(&Scalar::Int(7)).unwrap());
        assert!(list.less_equal(&Scalar::Int(7)).unwrap());
    }

    #[test]
    fn test_bool_list_orderings() {
        let list = List::from(vec![true, true]);
        assert!(list.greater(&Scalar::Bool(false)).unwrap());
        assert!(!list.less(&Scalar::Bool(true)).unwrap());
    }

    #[test]
    fn test_list_equal() {
        let a = List::from(vec![1.5, 2.5]);

        assert!(a.equal(&List::from(vec![1.5, 2.5])).unwrap());
        assert!(!a.equal(&List::from(vec![2.5, 1.5])).unwrap());
        assert!(!a.equal(&List::from(vec![1.5])).unwrap());
        assert!(matches!(
            a.equal(&List::from(vec![1i64, 2])),
            Err(KnobError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_list_contains_and_one_of() {
        let list = List::from(vec!["red", "green"]);

        assert!(list.contains(&Scalar::from("red")).unwrap());
        assert!(!list.contains(&Scalar::from("blue")).unwrap());
        assert!(Scalar::from("green").one_of(&list).unwrap());
        assert!(list.contains(&Scalar::Int(1)).is_err());
        assert!(Scalar::UInt(1).one_of(&List::from(vec![1i64])).is_err());
    }

    #[test]
    fn test_list_comparison_kind_mismatch() {
        let list = List::from(vec![1u64]);
        assert!(matches!(list.greater(&Scalar::Int(0)), Err(KnobError::TypeMismatch { .. })));
        // an empty list still checks the kind
        assert!(List::empty(Kind::UInt).less(&Scalar::Float(0.0)).is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Value::from(vec![1i64, 2]);
        let mut copy = original.clone();
        copy.parse_in_place("9").unwrap();

        assert_eq!(original, Value::from(vec![1i64, 2]));
        assert_eq!(copy, Value::from(vec![9i64]));
    }

    #[test]
    fn test_set_keeps_type() {
        let mut v = Value::from(2.5);
        v.set(Value::from(3.5)).unwrap();
        assert_eq!(v, Value::from(3.5));

        assert!(matches!(v.set(Value::from(3i64)), Err(KnobError::TypeMismatch { .. })));
        assert!(v.set(Value::from(vec![3.5])).is_err());
        assert_eq!(v, Value::from(3.5));
    }

    #[test]
    fn test_parse_in_place_failure_leaves_value() {
        let mut v = Value::from(true);
        assert!(v.parse_in_place("yes").is_err());
        assert_eq!(v, Value::from(true));
    }

    #[test]
    fn test_length() {
        assert_eq!(Value::from("four").length(), Some(4));
        assert_eq!(Value::from(vec![false, true]).length(), Some(2));
        assert_eq!(Value::from(4u64).length(), None);
    }

    #[test]
    fn test_value_compare_dispatch() {
        let bound = Scalar::Float(1.0);
        assert!(Value::from(2.0).compare(Comparison::Greater, &bound).unwrap());
        assert!(Value::from(vec![2.0, 3.0]).compare(Comparison::Greater, &bound).unwrap());
        assert!(!Value::from(Vec::<f64>::new()).compare(Comparison::Greater, &bound).unwrap());
        assert!(Value::from(vec![1.0]).one_of(&List::from(vec![1.0])).is_err());
    }
}
