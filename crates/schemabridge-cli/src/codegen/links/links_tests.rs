#![allow(non_snake_case)]

use super::*;
use schemabridge_core::SchemaSpec;
use test_case::test_case;

fn registry() -> SchemaRegistry {
    SchemaRegistry::from_schemas(
        [
            "CommentScore",
            "SpamDetectionResult",
            "LogicalFallacy",
            "SpamSignal",
            "Orphan",
        ]
        .map(SchemaSpec::new),
    )
    .unwrap()
}

fn layout() -> DocsLayout {
    DocsLayout::new()
        .with_main_record("CommentScore")
        .with_main_record("SpamDetectionResult")
        .with_inline_subtypes("CommentScore", ["LogicalFallacy"])
        .with_inline_subtypes("SpamDetectionResult", ["SpamSignal"])
}

#[test_case("LogicalFallacy", "CommentScore", Some("#logicalfallacy") ; "inline subtype of current page")]
#[test_case("CommentScore", "CommentScore", Some("#commentscore") ; "self reference")]
#[test_case("SpamDetectionResult", "CommentScore", Some("./SpamDetectionResult") ; "other main record")]
#[test_case("SpamSignal", "CommentScore", Some("./SpamDetectionResult#spamsignal") ; "subtype of another page")]
#[test_case("Orphan", "CommentScore", None ; "record documented nowhere")]
#[test_case("Ghost", "CommentScore", None ; "unknown name")]
fn LinkResolver___resolve(type_name: &str, current: &str, expected: Option<&str>) {
    let registry = registry();
    let layout = layout();
    let resolver = LinkResolver::new(&registry, &layout);

    let link = resolver.resolve(type_name, current).map(|target| target.to_string());

    assert_eq!(link.as_deref(), expected);
}

#[test]
fn LinkResolver___inline_subtype___never_links_to_separate_page() {
    let registry = registry();
    let layout = layout();
    let resolver = LinkResolver::new(&registry, &layout);

    let link = resolver.resolve("LogicalFallacy", "CommentScore");

    assert_eq!(link, Some(LinkTarget::Anchor("logicalfallacy".to_string())));
}

#[test]
fn LinkTarget___display___relative_links() {
    assert_eq!(LinkTarget::Anchor("point".into()).to_string(), "#point");
    assert_eq!(LinkTarget::Page("Point".into()).to_string(), "./Point");
    assert_eq!(
        LinkTarget::PageAnchor {
            page: "Shape".into(),
            anchor: "point".into()
        }
        .to_string(),
        "./Shape#point"
    );
}
