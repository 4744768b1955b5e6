//! TOML element declarations
//!
//! ```toml
//! [element.timeout]
//! type = "float64"
//! greater = 0.0
//! default = 2.5
//!
//! [element.ports]
//! type = "uint64"
//! list = true
//! minLen = 1
//! lessEqual = 65535
//! ```

use crate::element::Element;
use crate::restriction::RestrictionKind;
use knob_core::{Arity, KnobError, Kind, Result, ValueType};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// TOML file format for element declarations
#[derive(Debug, Deserialize)]
pub struct ElementFile {
    #[serde(default)]
    pub element: BTreeMap<String, ElementDefinition>,
}

/// Element definition as it appears in TOML files
#[derive(Debug, Clone, Deserialize)]
pub struct ElementDefinition {
    #[serde(rename = "type")]
    pub kind: Kind,
    #[serde(default)]
    pub list: bool,
    /// Overrides the table key as the element name
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Remaining keys are restriction tokens
    #[serde(flatten)]
    pub restrictions: BTreeMap<String, toml::Value>,
}

impl ElementDefinition {
    pub fn value_type(&self) -> ValueType {
        let arity = if self.list { Arity::List } else { Arity::Scalar };
        ValueType::new(self.kind, arity)
    }

    /// Build the element declared under `key`
    pub fn to_element(&self, key: &str) -> Result<Element> {
        let name = self.name.as_deref().unwrap_or(key);
        if !is_valid_name(name) {
            return Err(KnobError::InvalidName(name.to_string()));
        }

        for token in self.restrictions.keys() {
            token
                .parse::<RestrictionKind>()
                .map_err(|e| e.context(format!("element '{}'", name)))?;
        }

        // fixed processing order, whatever order the file used
        let mut pairs = Vec::new();
        for kind in RestrictionKind::ALL {
            if let Some(param) = self.restrictions.get(kind.token()) {
                let raw = raw_param(param).map_err(|e| {
                    e.context(format!("element '{}': {} parameter", name, kind))
                })?;
                pairs.push((kind.token(), raw));
            }
        }

        let element = Element::parse(
            name,
            self.value_type(),
            pairs.iter().map(|(token, raw)| (*token, raw.as_str())),
        )?;

        Ok(match &self.description {
            Some(text) => element.with_description(text.clone()),
            None => element,
        })
    }
}

/// Render a TOML parameter in the textual form restriction parsing expects.
/// Arrays become comma separated lists.
fn raw_param(value: &toml::Value) -> Result<String> {
    match value {
        toml::Value::String(s) => Ok(s.clone()),
        toml::Value::Integer(i) => Ok(i.to_string()),
        // Debug keeps the fraction, so `2.0` never parses as an integer
        toml::Value::Float(f) => Ok(format!("{:?}", f)),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        toml::Value::Array(items) => Ok(items
            .iter()
            .map(raw_param)
            .collect::<Result<Vec<_>>>()?
            .join(",")),
        other => Err(KnobError::ParseFailure {
            input: other.to_string(),
            target: "restriction parameter".to_string(),
            reason: format!("unsupported TOML {}", other.type_str()),
        }),
    }
}

/// Names look like identifiers: `[_A-Za-z][_0-9A-Za-z]*`
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Load and validate every element declared in a TOML string.
/// Elements come back sorted by table key.
pub fn load_elements(content: &str) -> Result<Vec<Element>> {
    let file: ElementFile = toml::from_str(content)?;

    let mut seen = HashSet::new();
    let mut elements = Vec::with_capacity(file.element.len());
    for (key, def) in &file.element {
        let element = def.to_element(key)?;
        if !seen.insert(element.name().to_string()) {
            return Err(KnobError::DuplicateElement(element.name().to_string()));
        }
        elements.push(element);
    }

    debug!(count = elements.len(), "loaded element declarations");
    Ok(elements)
}
