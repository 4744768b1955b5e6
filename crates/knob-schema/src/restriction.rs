//! Restriction definitions
//!
//! A restriction pairs a [`RestrictionKind`] with a parameter value, as in
//! `greater(2.0)` or `oneOf(a,b,c)`.

use knob_core::{Comparison, KnobError, Kind, List, Result, Scalar, Value, ValueType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of rule a restriction enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RestrictionKind {
    /// Value used when none is given; makes the element optional
    Default,
    /// Minimum length of a list or string
    MinLen,
    /// Maximum length of a list or string
    MaxLen,
    /// Exclusive lower bound
    Greater,
    /// Inclusive lower bound
    GreaterEqual,
    /// Exclusive upper bound
    Less,
    /// Inclusive upper bound
    LessEqual,
    /// Enumerated set of allowed values
    OneOf,
}

impl RestrictionKind {
    /// Every restriction kind, in declaration processing order
    pub const ALL: [RestrictionKind; 8] = [
        RestrictionKind::Default,
        RestrictionKind::MinLen,
        RestrictionKind::MaxLen,
        RestrictionKind::Greater,
        RestrictionKind::GreaterEqual,
        RestrictionKind::Less,
        RestrictionKind::LessEqual,
        RestrictionKind::OneOf,
    ];

    /// The token used for this kind in declarations
    pub fn token(&self) -> &'static str {
        match self {
            RestrictionKind::Default => "default",
            RestrictionKind::MinLen => "minLen",
            RestrictionKind::MaxLen => "maxLen",
            RestrictionKind::Greater => "greater",
            RestrictionKind::GreaterEqual => "greaterEqual",
            RestrictionKind::Less => "less",
            RestrictionKind::LessEqual => "lessEqual",
            RestrictionKind::OneOf => "oneOf",
        }
    }

    /// Greater, GreaterEqual, Less or LessEqual
    pub fn is_range(&self) -> bool {
        self.comparison().is_some()
    }

    /// MinLen or MaxLen
    pub fn is_length(&self) -> bool {
        matches!(self, RestrictionKind::MinLen | RestrictionKind::MaxLen)
    }

    /// The comparison a range kind applies between a value and its bound
    pub fn comparison(&self) -> Option<Comparison> {
        match self {
            RestrictionKind::Greater => Some(Comparison::Greater),
            RestrictionKind::GreaterEqual => Some(Comparison::GreaterEqual),
            RestrictionKind::Less => Some(Comparison::Less),
            RestrictionKind::LessEqual => Some(Comparison::LessEqual),
            _ => None,
        }
    }

    /// Whether this kind may be attached to an element of the given type
    pub fn applicable_to(&self, target: ValueType) -> bool {
        match self {
            RestrictionKind::Default => true,
            RestrictionKind::MinLen | RestrictionKind::MaxLen => {
                target.is_list() || target.kind == Kind::Text
            }
            RestrictionKind::Greater
            | RestrictionKind::GreaterEqual
            | RestrictionKind::Less
            | RestrictionKind::LessEqual => target.kind.is_numeric(),
            RestrictionKind::OneOf => {
                !target.is_list() && (target.kind.is_numeric() || target.kind == Kind::Text)
            }
        }
    }

    /// The type a parameter of this kind is parsed as, for an element of
    /// the given type
    pub fn param_type(&self, element: ValueType) -> ValueType {
        match self {
            RestrictionKind::Default => element,
            RestrictionKind::MinLen | RestrictionKind::MaxLen => Kind::UInt.scalar(),
            RestrictionKind::OneOf => element.as_list(),
            _ => element.as_scalar(),
        }
    }
}

impl fmt::Display for RestrictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for RestrictionKind {
    type Err = KnobError;

    fn from_str(s: &str) -> Result<Self> {
        RestrictionKind::ALL
            .into_iter()
            .find(|k| k.token() == s)
            .ok_or_else(|| KnobError::UnknownRestriction(s.to_string()))
    }
}

/// A restriction kind with its parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Restriction {
    kind: RestrictionKind,
    param: Value,
}

impl Restriction {
    /// Create a restriction, checking the parameter has the shape the kind
    /// requires: a scalar bound for range kinds, a list for `oneOf` and a
    /// `uint64` for length kinds.
    pub fn new(kind: RestrictionKind, param: Value) -> Result<Self> {
        let got = param.value_type();
        let shape_ok = match kind {
            RestrictionKind::Default => true,
            RestrictionKind::MinLen | RestrictionKind::MaxLen => got == Kind::UInt.scalar(),
            RestrictionKind::OneOf => got.is_list(),
            _ => !got.is_list(),
        };

        if !shape_ok {
            let expected = match kind {
                RestrictionKind::MinLen | RestrictionKind::MaxLen => "uint64".to_string(),
                RestrictionKind::OneOf => format!("[{}]", got.kind),
                _ => got.kind.to_string(),
            };
            return Err(KnobError::type_mismatch(expected, got)
                .context(format!("{} parameter", kind)));
        }

        Ok(Self { kind, param })
    }

    pub fn default_value(value: impl Into<Value>) -> Self {
        Self {
            kind: RestrictionKind::Default,
            param: value.into(),
        }
    }

    pub fn min_len(len: u64) -> Self {
        Self {
            kind: RestrictionKind::MinLen,
            param: Value::from(len),
        }
    }

    pub fn max_len(len: u64) -> Self {
        Self {
            kind: RestrictionKind::MaxLen,
            param: Value::from(len),
        }
    }

    pub fn greater(bound: impl Into<Scalar>) -> Self {
        Self::bound(RestrictionKind::Greater, bound.into())
    }

    pub fn greater_equal(bound: impl Into<Scalar>) -> Self {
        Self::bound(RestrictionKind::GreaterEqual, bound.into())
    }

    pub fn less(bound: impl Into<Scalar>) -> Self {
        Self::bound(RestrictionKind::Less, bound.into())
    }

    pub fn less_equal(bound: impl Into<Scalar>) -> Self {
        Self::bound(RestrictionKind::LessEqual, bound.into())
    }

    pub fn one_of(values: impl Into<List>) -> Self {
        Self {
            kind: RestrictionKind::OneOf,
            param: Value::List(values.into()),
        }
    }

    fn bound(kind: RestrictionKind, bound: Scalar) -> Self {
        Self {
            kind,
            param: Value::Scalar(bound),
        }
    }

    /// Parse a raw parameter string for an element of the given type.
    ///
    /// Length parameters are always `uint64`, `oneOf` is a list of the
    /// element's kind, range bounds are a scalar of the element's kind (also
    /// for list elements), and `default` has the element's own type.
    pub fn parse(element: ValueType, kind: RestrictionKind, raw: &str) -> Result<Self> {
        let param = Value::parse(kind.param_type(element), raw)
            .map_err(|e| e.context(format!("failed to parse {} parameter", kind)))?;
        Self::new(kind, param)
    }

    pub fn kind(&self) -> RestrictionKind {
        self.kind
    }

    pub fn param(&self) -> &Value {
        &self.param
    }

    /// The scalar parameter of a range or length restriction
    pub fn scalar_param(&self) -> Result<&Scalar> {
        self.param.as_scalar().ok_or_else(|| {
            KnobError::type_mismatch(self.param.kind(), self.param.value_type())
                .context(format!("{} parameter", self.kind))
        })
    }

    /// Evaluate this restriction against a concrete value.
    ///
    /// `default` accepts every value. Length kinds fail with `TypeMismatch`
    /// for values that have no length (non-text scalars).
    pub fn is_satisfied_by(&self, value: &Value) -> Result<bool> {
        match self.kind {
            RestrictionKind::Default => Ok(true),
            RestrictionKind::MinLen | RestrictionKind::MaxLen => {
                let limit = match self.scalar_param()? {
                    Scalar::UInt(n) => *n,
                    other => return Err(KnobError::type_mismatch(Kind::UInt, other.kind())),
                };
                let len = value.length().ok_or_else(|| {
                    KnobError::type_mismatch("list or string", value.value_type())
                })? as u64;

                Ok(if self.kind == RestrictionKind::MinLen {
                    len >= limit
                } else {
                    len <= limit
                })
            }
            RestrictionKind::OneOf => match &self.param {
                Value::List(allowed) => value.one_of(allowed),
                Value::Scalar(s) => Err(KnobError::type_mismatch(s.kind().list(), s.kind())),
            },
            range => {
                let op = range
                    .comparison()
                    .ok_or_else(|| KnobError::UnknownRestriction(range.to_string()))?;
                value.compare(op, self.scalar_param()?)
            }
        }
    }
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.param)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use knob_core::Arity;

    #[test]
    fn test_tokens_round_trip() {
        for kind in RestrictionKind::ALL {
            assert_eq!(kind.token().parse::<RestrictionKind>().unwrap(), kind);
        }
        assert!(matches!(
            "between".parse::<RestrictionKind>(),
            Err(KnobError::UnknownRestriction(_))
        ));
    }

    #[test]
    fn test_tokens_match_serde() {
        #[derive(Deserialize)]
        struct Probe {
            kind: RestrictionKind,
        }

        for kind in RestrictionKind::ALL {
            let probe: Probe = toml::from_str(&format!("kind = \"{}\"", kind.token())).unwrap();
            assert_eq!(probe.kind, kind);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Restriction::default_value(2.5).to_string(), "default(2.5)");
        assert_eq!(Restriction::one_of(vec![2u64, 4, 6]).to_string(), "oneOf(2,4,6)");
        assert_eq!(Restriction::min_len(3).to_string(), "minLen(3)");
    }

    fn check_applicable(target: ValueType, expected: &[RestrictionKind]) {
        for kind in RestrictionKind::ALL {
            assert_eq!(
                kind.applicable_to(target),
                expected.contains(&kind),
                "{} on {}",
                kind,
                target
            );
        }
    }

    #[test]
    fn test_applicable_to_numbers() {
        use RestrictionKind::*;
        for kind in [Kind::Int, Kind::UInt, Kind::Float] {
            check_applicable(
                kind.scalar(),
                &[Default, Greater, GreaterEqual, Less, LessEqual, OneOf],
            );
            check_applicable(
                kind.list(),
                &[Default, Greater, GreaterEqual, Less, LessEqual, MinLen, MaxLen],
            );
        }
    }

    #[test]
    fn test_applicable_to_string_and_bool() {
        use RestrictionKind::*;
        check_applicable(Kind::Text.scalar(), &[Default, OneOf, MinLen, MaxLen]);
        check_applicable(Kind::Text.list(), &[Default, MinLen, MaxLen]);
        check_applicable(Kind::Bool.scalar(), &[Default]);
        check_applicable(Kind::Bool.list(), &[Default, MinLen, MaxLen]);
    }

    #[test]
    fn test_parse_param_types() {
        let r = Restriction::parse(Kind::Text.scalar(), RestrictionKind::MinLen, "2").unwrap();
        assert_eq!(r.param(), &Value::from(2u64));

        let r = Restriction::parse(Kind::Int.scalar(), RestrictionKind::Greater, "-2").unwrap();
        assert_eq!(r.param(), &Value::from(-2i64));

        let r = Restriction::parse(Kind::Float.list(), RestrictionKind::LessEqual, "27.5").unwrap();
        assert_eq!(r.param(), &Value::from(27.5));

        let r = Restriction::parse(Kind::UInt.scalar(), RestrictionKind::OneOf, "2, 4,6").unwrap();
        assert_eq!(r.param(), &Value::from(vec![2u64, 4, 6]));

        let r = Restriction::parse(Kind::Text.scalar(), RestrictionKind::OneOf, "2,4,6").unwrap();
        assert_eq!(r.param(), &Value::from(vec!["2", "4", "6"]));

        let r = Restriction::parse(Kind::Int.list(), RestrictionKind::Default, "1,2").unwrap();
        assert_eq!(r.param().arity(), Arity::List);
    }

    #[test]
    fn test_parse_failures() {
        let err = Restriction::parse(Kind::Float.scalar(), RestrictionKind::MinLen, "2.5")
            .unwrap_err();
        assert!(matches!(err.root(), KnobError::ParseFailure { .. }));

        let err = Restriction::parse(Kind::Bool.scalar(), RestrictionKind::Default, "twue")
            .unwrap_err();
        assert!(matches!(err.root(), KnobError::ParseFailure { .. }));
    }

    #[test]
    fn test_new_checks_param_shape() {
        assert!(Restriction::new(RestrictionKind::Greater, Value::from(vec![1i64])).is_err());
        assert!(Restriction::new(RestrictionKind::OneOf, Value::from(1i64)).is_err());
        assert!(Restriction::new(RestrictionKind::MinLen, Value::from(1i64)).is_err());
        assert!(Restriction::new(RestrictionKind::Default, Value::from(vec![1i64])).is_ok());
        assert!(Restriction::new(RestrictionKind::MaxLen, Value::from(1u64)).is_ok());
    }

    #[test]
    fn test_is_satisfied_by_range() {
        let r = Restriction::greater(5.0);
        assert!(r.is_satisfied_by(&Value::from(7.2)).unwrap());
        assert!(!r.is_satisfied_by(&Value::from(5.0)).unwrap());
        assert!(r.is_satisfied_by(&Value::from(vec![6.0, 7.0])).unwrap());
        assert!(!r.is_satisfied_by(&Value::from(Vec::<f64>::new())).unwrap());
        assert!(r.is_satisfied_by(&Value::from(7i64)).is_err());
    }

    #[test]
    fn test_is_satisfied_by_length() {
        assert!(Restriction::min_len(3).is_satisfied_by(&Value::from("abc")).unwrap());
        assert!(!Restriction::min_len(3).is_satisfied_by(&Value::from("ab")).unwrap());
        assert!(Restriction::max_len(1).is_satisfied_by(&Value::from(vec![1u64])).unwrap());
        assert!(!Restriction::max_len(1).is_satisfied_by(&Value::from(vec![1u64, 2])).unwrap());
        assert!(Restriction::max_len(1).is_satisfied_by(&Value::from(1u64)).is_err());
    }

    #[test]
    fn test_is_satisfied_by_one_of() {
        let r = Restriction::one_of(vec!["a", "b"]);
        assert!(r.is_satisfied_by(&Value::from("a")).unwrap());
        assert!(!r.is_satisfied_by(&Value::from("c")).unwrap());
        assert!(r.is_satisfied_by(&Value::from(vec!["a"])).is_err());
    }
}
