//! schemabridge-python - Python declaration front-end
//!
//! Reads a Python module and produces a [`SchemaRegistry`] of every class
//! derived from the configured record base:
//! - [`parse_module`] parses source text with `rustpython-parser`
//! - [`extract_source`] walks the statement tree and collects records
//!
//! [`SchemaRegistry`]: schemabridge_core::SchemaRegistry

mod extract;
mod parse;

pub use extract::{DEFAULT_BASE_CLASS, ExtractOptions, clean_docstring, extract_source};
pub use parse::{parse_expression, parse_module};
