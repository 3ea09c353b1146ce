//! schemabridge-core - Schema model, type expressions and documentation layout
//!
//! This crate provides the language-neutral types shared by the extraction
//! front-end and every generator:
//! - [`TypeExpr`] for a field's declared type
//! - [`FieldSpec`], [`SchemaSpec`] and [`SchemaRegistry`] for extracted records
//! - [`DocsLayout`] for the editorial page classification
//! - [`ExtractionError`], [`TypeParseError`] and [`UnresolvedReference`]

mod config;
mod error;
mod schema;
mod types;

pub use config::{DocsLayout, LayoutError};
pub use error::{ExtractionError, SchemaResult, TypeParseError, UnresolvedReference};
pub use schema::{FieldDefault, FieldSpec, SchemaRegistry, SchemaSpec};
pub use types::{Primitive, TypeExpr};

/// Log levels accepted on the command line
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    /// Lowercase name, as used by filter directives
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DocsLayout, ExtractionError, FieldDefault, FieldSpec, LogLevel, Primitive, SchemaRegistry,
        SchemaResult, SchemaSpec, TypeExpr, TypeParseError, UnresolvedReference,
    };
}
