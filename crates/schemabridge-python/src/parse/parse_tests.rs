#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn string_value(expr: &ast::Expr) -> &str {
    match expr {
        ast::Expr::Constant(ast::ExprConstant {
            value: ast::Constant::Str(text),
            ..
        }) => text,
        other => panic!("Expected a string constant, got {other:?}"),
    }
}

// line_column tests

#[test_case("abc", 0, (1, 1); "start")]
#[test_case("abc", 2, (1, 3); "same line")]
#[test_case("ab\ncd", 3, (2, 1); "after newline")]
#[test_case("ab\ncd\nef", 7, (3, 2); "third line")]
#[test_case("ab", 99, (1, 3); "past end clamps")]
#[test_case("é\nx", 1, (1, 1); "inside multibyte char")]
fn line_column___maps_offset(source: &str, offset: usize, expected: (usize, usize)) {
    assert_eq!(line_column(source, offset), expected);
}

// parse_module tests

#[test]
fn parse_module___valid_source___returns_statements() {
    let suite = parse_module("import typing\n\nclass A(BaseModel):\n    x: int\n").unwrap();

    assert_eq!(suite.len(), 2);
    assert!(matches!(suite[1], ast::Stmt::ClassDef(_)));
}

#[test]
fn parse_module___invalid_statement___reports_its_line() {
    let err = parse_module("class A(BaseModel):\n    x: int\n    y: = 3\n").unwrap_err();

    assert!(matches!(err, ExtractionError::Syntax { line: 3, .. }));
}

#[test]
fn parse_module___unclosed_call___is_a_syntax_error() {
    let err = parse_module("class A(BaseModel):\n    x: int = Field(\n").unwrap_err();

    assert!(matches!(err, ExtractionError::Syntax { .. }));
}

// String decoding

#[test_case(r#""caf\u00e9""#, "café"; "four digit unicode escape")]
#[test_case(r#""\U0001F600""#, "\u{1F600}"; "eight digit unicode escape")]
#[test_case(r#""\x41""#, "A"; "hex escape")]
#[test_case(r#""\101""#, "A"; "octal escape")]
#[test_case(r#""\012""#, "\n"; "octal newline")]
#[test_case(r#""\N{BULLET}""#, "•"; "named escape")]
#[test_case(r#""tab\there""#, "tab\there"; "simple escape")]
#[test_case(r#"r"\x41""#, r"\x41"; "raw string keeps backslash")]
#[test_case(r#""a" 'b'"#, "ab"; "implicit concatenation")]
fn parse_expression___string_literal___decoded(source: &str, expected: &str) {
    let expr = parse_expression(source).unwrap();

    assert_eq!(string_value(&expr), expected);
}

#[test]
fn parse_expression___invalid___is_a_syntax_error() {
    let err = parse_expression("List[").unwrap_err();

    assert!(matches!(err, ExtractionError::Syntax { line: 1, .. }));
}
