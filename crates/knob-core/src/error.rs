//! Error types for knob

use thiserror::Error;

/// The main error type for knob operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KnobError {
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Parse failure: '{input}' is not a valid {target}: {reason}")]
    ParseFailure {
        input: String,
        target: String,
        reason: String,
    },

    #[error("Element '{element}': restriction {restriction} is not applicable to {target}")]
    NotApplicable {
        element: String,
        restriction: String,
        target: String,
    },

    #[error("Element '{element}': {first} is not compatible with {second}")]
    NotCompatible {
        element: String,
        first: String,
        second: String,
    },

    #[error("Element '{element}': restriction {kind} is given more than once")]
    DuplicateKind { element: String, kind: String },

    #[error("Element '{element}': value {value} violates {restriction}")]
    Violation {
        element: String,
        restriction: String,
        value: String,
    },

    #[error("Missing value for required element: {0}")]
    MissingValue(String),

    #[error("Invalid element name: {0}")]
    InvalidName(String),

    #[error("Duplicate element name: {0}")]
    DuplicateElement(String),

    #[error("Unknown value kind: {0}")]
    UnknownKind(String),

    #[error("Unknown restriction: {0}")]
    UnknownRestriction(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<KnobError>,
    },
}

impl KnobError {
    /// Wrap this error with a description of the operation that failed
    pub fn context(self, context: impl Into<String>) -> Self {
        KnobError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with all context layers removed
    pub fn root(&self) -> &KnobError {
        match self {
            KnobError::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Build a `TypeMismatch` from anything displayable
    pub fn type_mismatch(expected: impl ToString, got: impl ToString) -> Self {
        KnobError::TypeMismatch {
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }
}

/// Result type alias for knob operations
pub type Result<T> = std::result::Result<T, KnobError>;

impl From<toml::de::Error> for KnobError {
    fn from(err: toml::de::Error) -> Self {
        KnobError::TomlParseError(err.to_string())
    }
}
