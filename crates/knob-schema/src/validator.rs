//! Single-pass validation of an element's restriction set

use crate::compat::compatible;
use crate::restriction::Restriction;
use knob_core::{KnobError, Result, ValueType};
use std::collections::HashSet;
use tracing::{debug, warn};

/// How far validation has progressed. A failure at any stage is terminal
/// and reported as the first error encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Unvalidated,
    /// Every restriction kind is unique and applies to the element type
    Applicable,
    /// Every pair of restrictions can hold together
    Compatible,
    Valid,
}

/// Checks one element's restrictions: kind uniqueness, applicability, then
/// all-pairs compatibility
#[derive(Debug)]
pub struct Validator<'a> {
    element: &'a str,
    target: ValueType,
    restrictions: &'a [Restriction],
    stage: Stage,
}

impl<'a> Validator<'a> {
    pub fn new(element: &'a str, target: ValueType, restrictions: &'a [Restriction]) -> Self {
        Self {
            element,
            target,
            restrictions,
            stage: Stage::Unvalidated,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run every stage, stopping at the first error
    pub fn run(&mut self) -> Result<Stage> {
        if let Err(err) = self.advance() {
            warn!(element = self.element, error = %err, "element rejected");
            return Err(err);
        }
        Ok(self.stage)
    }

    fn advance(&mut self) -> Result<()> {
        self.check_unique()?;
        self.check_applicable()?;
        self.enter(Stage::Applicable);

        self.check_compatible()?;
        self.enter(Stage::Compatible);

        self.enter(Stage::Valid);
        Ok(())
    }

    fn enter(&mut self, stage: Stage) {
        self.stage = stage;
        debug!(element = self.element, stage = ?stage, "validation stage");
    }

    fn check_unique(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for r in self.restrictions {
            if !seen.insert(r.kind()) {
                return Err(KnobError::DuplicateKind {
                    element: self.element.to_string(),
                    kind: r.kind().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Every restriction applies to the target, and its parameter has the
    /// type that kind takes for the target
    fn check_applicable(&self) -> Result<()> {
        for r in self.restrictions {
            if !r.kind().applicable_to(self.target) {
                return Err(KnobError::NotApplicable {
                    element: self.element.to_string(),
                    restriction: r.kind().to_string(),
                    target: self.target.to_string(),
                });
            }

            let expected = r.kind().param_type(self.target);
            let got = r.param().value_type();
            if got != expected {
                return Err(KnobError::type_mismatch(expected, got)
                    .context(format!("element '{}': {} parameter", self.element, r.kind())));
            }
        }
        Ok(())
    }

    fn check_compatible(&self) -> Result<()> {
        for (i, first) in self.restrictions.iter().enumerate() {
            for second in &self.restrictions[i + 1..] {
                let ok = compatible(first, second)
                    .map_err(|e| e.context(format!("element '{}'", self.element)))?;
                if !ok {
                    return Err(KnobError::NotCompatible {
                        element: self.element.to_string(),
                        first: first.to_string(),
                        second: second.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Validate a restriction set for an element of the given type
pub fn validate(element: &str, target: ValueType, restrictions: &[Restriction]) -> Result<()> {
    Validator::new(element, target, restrictions).run().map(|_| ())
}
