//! Knob Schema - Restrictions and element validation
//!
//! This crate decides whether the restrictions declared for a configuration
//! element can hold together, and hands out only elements that pass:
//! - `Restriction`, `RestrictionKind` - Bounds, enumerations, lengths, defaults
//! - `compatible` - Symbolic pairwise compatibility
//! - `Validator` - Uniqueness, applicability and compatibility checks
//! - `Element` - A validated element with lookup accessors
//! - `load_elements` - Element declarations from TOML

mod compat;
mod decl;
mod element;
mod restriction;
mod validator;

pub use compat::compatible;
pub use decl::{load_elements, ElementDefinition, ElementFile};
pub use element::Element;
pub use restriction::{Restriction, RestrictionKind};
pub use validator::{validate, Stage, Validator};
