//! schemabridge-cli - Generate PHP classes and reference docs from Pydantic schemas
//!
//! The `schemabridge` binary wraps these modules:
//! - [`manifest`] parses and validates `schemabridge.toml`
//! - [`generate`] extracts records and renders every artifact
//! - [`codegen`] holds the pure PHP and Markdown generators
//! - [`docs_build`] publishes the Sphinx-built Python reference

pub mod codegen;
pub mod docs_build;
pub mod generate;
pub mod manifest;
