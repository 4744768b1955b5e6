//! Validated configuration elements

use crate::restriction::{Restriction, RestrictionKind};
use crate::validator::validate;
use knob_core::{Arity, KnobError, Kind, Result, Value, ValueType};

/// A named, typed configuration slot with a validated restriction set.
///
/// Elements are only ever handed out after validation succeeds, so every
/// `Element` has kind-unique, applicable and pairwise compatible
/// restrictions. An element without a `default` restriction is required.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    value_type: ValueType,
    restrictions: Vec<Restriction>,
    description: Option<String>,
}

impl Element {
    /// Build and validate an element
    pub fn new(
        name: impl Into<String>,
        value_type: ValueType,
        restrictions: Vec<Restriction>,
    ) -> Result<Self> {
        let name = name.into();
        validate(&name, value_type, &restrictions)?;

        Ok(Self {
            name,
            value_type,
            restrictions,
            description: None,
        })
    }

    /// Attach a human readable description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Build an element from `(token, raw parameter)` pairs such as
    /// `("greater", "0.5")` or `("oneOf", "a, b, c")`
    pub fn parse<'a, I>(name: impl Into<String>, value_type: ValueType, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let name = name.into();
        let restrictions = pairs
            .into_iter()
            .map(|(token, raw)| {
                let kind: RestrictionKind = token.parse()?;
                Restriction::parse(value_type, kind, raw)
            })
            .collect::<Result<Vec<_>>>()
            .map_err(|e| e.context(format!("element '{}'", name)))?;

        Self::new(name, value_type, restrictions)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn kind(&self) -> Kind {
        self.value_type.kind
    }

    pub fn arity(&self) -> Arity {
        self.value_type.arity
    }

    /// True if no default is given
    pub fn required(&self) -> bool {
        self.restriction(RestrictionKind::Default).is_none()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.restriction(RestrictionKind::Default).map(|r| r.param())
    }

    /// The restriction of the given kind, if attached
    pub fn restriction(&self, kind: RestrictionKind) -> Option<&Restriction> {
        self.restrictions.iter().find(|r| r.kind() == kind)
    }

    /// All restrictions, in declaration order
    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }

    /// Check a candidate value against the element type and every
    /// restriction
    pub fn check(&self, value: &Value) -> Result<()> {
        if value.value_type() != self.value_type {
            return Err(KnobError::type_mismatch(self.value_type, value.value_type())
                .context(format!("element '{}'", self.name)));
        }

        for r in &self.restrictions {
            let satisfied = r
                .is_satisfied_by(value)
                .map_err(|e| e.context(format!("element '{}'", self.name)))?;

            if !satisfied {
                return Err(KnobError::Violation {
                    element: self.name.clone(),
                    restriction: r.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// The value to use for this element: the given one after checking it,
    /// otherwise a copy of the default
    pub fn resolve(&self, value: Option<Value>) -> Result<Value> {
        match value {
            Some(v) => {
                self.check(&v)?;
                Ok(v)
            }
            None => self
                .default_value()
                .cloned()
                .ok_or_else(|| KnobError::MissingValue(self.name.clone())),
        }
    }
}
