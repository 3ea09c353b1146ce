#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Primitive recognition
// ============================================================================

#[test_case("str", Primitive::Str)]
#[test_case("int", Primitive::Int)]
#[test_case("float", Primitive::Float)]
#[test_case("bool", Primitive::Bool)]
#[test_case("UUID", Primitive::Uuid)]
#[test_case("uuid.UUID", Primitive::Uuid)]
fn TypeExpr___parse_primitive___returns_scalar(raw: &str, expected: Primitive) {
    assert_eq!(TypeExpr::parse(raw).unwrap(), TypeExpr::Scalar(expected));
}

#[test_case("List[int]", "List[int]" ; "capitalized list")]
#[test_case("list[int]", "List[int]" ; "builtin list")]
#[test_case("typing.List[int]", "List[int]" ; "typing list")]
#[test_case("Optional[UUID]", "Optional[UUID]" ; "optional uuid")]
#[test_case("typing.Optional[str]", "Optional[str]" ; "typing optional")]
#[test_case("bool | None", "Optional[bool]" ; "none union")]
fn TypeExpr___parse_wrapper_spelling___normalizes(raw: &str, canonical: &str) {
    assert_eq!(TypeExpr::parse(raw).unwrap().to_string(), canonical);
}

// ============================================================================
// Rejected shapes
// ============================================================================

#[test_case("" ; "empty")]
#[test_case("   " ; "blank")]
#[test_case("List[" ; "open bracket")]
#[test_case("List]int[" ; "reversed brackets")]
#[test_case("List[]" ; "missing argument")]
#[test_case("Optional[List[str]]" ; "optional of list")]
#[test_case("Union[int, str]" ; "union constructor")]
#[test_case("Tuple[int, int]" ; "tuple constructor")]
#[test_case("None" ; "bare none")]
#[test_case("1abc" ; "leading digit")]
#[test_case("a..b" ; "empty segment")]
#[test_case("Literal['x']" ; "literal")]
fn TypeExpr___parse_unsupported___fails(raw: &str) {
    assert!(TypeExpr::parse(raw).is_err());
}
