//! Error and warning types for schema extraction and generation

use std::fmt;
use thiserror::Error;

/// Result type alias for extraction operations
pub type SchemaResult<T> = Result<T, ExtractionError>;

/// A field's type text does not match any supported shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse type `{raw}`: {reason}")]
pub struct TypeParseError {
    /// The type text as written in the declaration
    pub raw: String,

    /// Why the text was rejected
    pub reason: String,
}

impl TypeParseError {
    pub fn new(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            reason: reason.into(),
        }
    }
}

/// Fatal error while turning declaration source into a registry
///
/// Extraction is all-or-nothing: any of these aborts the run before a
/// single artifact is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// The declaration source is not syntactically valid
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// A field annotation could not be parsed into a type expression
    #[error("invalid type for field {record}.{field}: {source}")]
    InvalidType {
        record: String,
        field: String,
        #[source]
        source: TypeParseError,
    },

    /// A field-metadata call has an unexpected shape
    #[error("malformed field metadata for {record}.{field}: {message}")]
    MalformedField {
        record: String,
        field: String,
        message: String,
    },

    /// A configuration block sets a recognized key to something other than a literal
    #[error("ambiguous configuration in {record}: {message}")]
    AmbiguousConfig { record: String, message: String },

    /// Two records share a name
    #[error("record {0} is declared more than once")]
    DuplicateRecord(String),

    /// Two fields of one record share a name
    #[error("field {record}.{field} is declared more than once")]
    DuplicateField { record: String, field: String },
}

impl ExtractionError {
    /// Name of the record the error is attached to, if any
    pub fn record(&self) -> Option<&str> {
        match self {
            ExtractionError::Syntax { .. } => None,
            ExtractionError::InvalidType { record, .. }
            | ExtractionError::MalformedField { record, .. }
            | ExtractionError::AmbiguousConfig { record, .. }
            | ExtractionError::DuplicateField { record, .. } => Some(record),
            ExtractionError::DuplicateRecord(record) => Some(record),
        }
    }
}

/// A type name that is not in the registry
///
/// Non-fatal: generators fall back to treating the name as an opaque value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnresolvedReference {
    /// Record whose field carries the reference
    pub record: String,

    /// Field name in source spelling
    pub field: String,

    /// The name that failed to resolve
    pub type_name: String,
}

impl UnresolvedReference {
    pub fn new(
        record: impl Into<String>,
        field: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            record: record.into(),
            field: field.into(),
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} references unknown type `{}`; treating it as an opaque value",
            self.record, self.field, self.type_name
        )
    }
}
