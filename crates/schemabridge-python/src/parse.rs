//! Thin wrapper over `rustpython-parser` that reports failures as
//! [`ExtractionError::Syntax`] with 1-based line and column.

use rustpython_parser::{Parse, ParseError, ast};
use schemabridge_core::{ExtractionError, SchemaResult};

/// Label passed to the parser for top-level sources.
const MODULE_PATH: &str = "<schemas>";

/// Label passed to the parser for string annotations.
const ANNOTATION_PATH: &str = "<annotation>";

/// Parse a complete module into its statement list.
pub fn parse_module(source: &str) -> SchemaResult<ast::Suite> {
    ast::Suite::parse(source, MODULE_PATH).map_err(|err| syntax_error(source, &err))
}

/// Parse a single expression, such as a forward-reference annotation.
pub fn parse_expression(source: &str) -> SchemaResult<ast::Expr> {
    ast::Expr::parse(source, ANNOTATION_PATH).map_err(|err| syntax_error(source, &err))
}

fn syntax_error(source: &str, err: &ParseError) -> ExtractionError {
    let (line, column) = line_column(source, usize::from(err.offset));
    ExtractionError::Syntax {
        line,
        column,
        message: err.error.to_string(),
    }
}

/// 1-based line and column of a byte offset.
pub(crate) fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    let before = &source[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |index| index + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

#[cfg(test)]
#[path = "parse/parse_tests.rs"]
mod parse_tests;
