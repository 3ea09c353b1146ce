//! Property-based tests for type expression parsing
//!
//! Tests that parsing never panics on arbitrary text, and that the canonical
//! spelling of every accepted type parses back to the same expression.

use proptest::prelude::*;
use schemabridge_core::TypeExpr;

// Strategy: identifiers that are not primitives or `None`
fn arb_record_name() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9_]{0,24}".prop_filter("not a reserved name", |name| {
        name != "None" && name != "UUID"
    })
}

// Strategy: leaf spellings, primitive or record
fn arb_leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("str".to_string()),
        Just("int".to_string()),
        Just("float".to_string()),
        Just("bool".to_string()),
        Just("UUID".to_string()),
        arb_record_name(),
    ]
}

// Strategy: any supported declaration spelling
fn arb_type_text() -> impl Strategy<Value = String> {
    arb_leaf().prop_flat_map(|leaf| {
        prop_oneof![
            Just(leaf.clone()),
            Just(format!("List[{leaf}]")),
            Just(format!("list[{leaf}]")),
            Just(format!("Optional[{leaf}]")),
            Just(format!("{leaf} | None")),
        ]
    })
}

proptest! {
    /// Property: parsing arbitrary text returns a value or an error, never panics
    #[test]
    fn proptest_parse_never_panics(text in ".{0,64}") {
        let _ = TypeExpr::parse(&text);
    }

    /// Property: bracket soup never panics either
    #[test]
    fn proptest_parse_brackets_never_panics(text in "[\\[\\]A-Za-z|. ,]{0,32}") {
        let _ = TypeExpr::parse(&text);
    }

    /// Property: the canonical spelling of a parsed type parses to the same type
    #[test]
    fn proptest_canonical_spelling_reparses(text in arb_type_text()) {
        let parsed = TypeExpr::parse(&text)
            .expect("Supported spellings should parse");

        let reparsed = TypeExpr::parse(&parsed.to_string())
            .expect("Canonical spelling should parse");

        prop_assert_eq!(reparsed, parsed);
    }

    /// Property: wrapping never nests deeper than one level
    #[test]
    fn proptest_parsed_types_have_single_wrapper(text in arb_type_text()) {
        let parsed = TypeExpr::parse(&text)
            .expect("Supported spellings should parse");

        if let Some(inner) = parsed.inner() {
            prop_assert!(inner.inner().is_none());
        }
    }
}
