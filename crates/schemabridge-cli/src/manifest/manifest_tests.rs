#![allow(non_snake_case)]

use super::*;

const FULL: &str = r#"
[source]
path = "respectify/schemas.py"
module = "respectify.schemas"
base_class = "Schema"

[php]
output_dir = "../respectify-php/src/Schemas"
namespace = "Respectify\\Schemas"
readonly_frozen = true

[docs]
output_dir = "docs/reference/schemas"
main_records = ["CommentScore", "SpamDetectionResult"]

[docs.inline_subtypes]
CommentScore = ["LogicalFallacy", "ObjectionablePhrase"]

[banner]
source_label = "respectify/schemas.py (main)"
regenerate_command = "make schemas"

[reference_docs]
source_dir = "docs"
dest_dir = "../site/docs/reference/api/python"

[reference_docs.links]
"Schema reference" = "../../schemas/"
"#;

const MINIMAL: &str = r#"
[source]
path = "schemas.py"
module = "app.schemas"

[php]
output_dir = "php"
namespace = "App\\Schemas"

[docs]
output_dir = "docs"
"#;

fn minimal() -> Manifest {
    Manifest::from_str(MINIMAL).unwrap()
}

// Manifest parsing tests

#[test]
fn Manifest___from_str___parses_full_manifest() {
    let manifest = Manifest::from_str(FULL).unwrap();

    assert_eq!(manifest.source.path, PathBuf::from("respectify/schemas.py"));
    assert_eq!(manifest.source.module, "respectify.schemas");
    assert_eq!(manifest.source.base_class, "Schema");
    assert_eq!(manifest.php.namespace, "Respectify\\Schemas");
    assert!(manifest.php.readonly_frozen);
    assert_eq!(
        manifest.docs.main_records,
        vec!["CommentScore", "SpamDetectionResult"]
    );
    assert_eq!(
        manifest.docs.inline_subtypes["CommentScore"],
        vec!["LogicalFallacy", "ObjectionablePhrase"]
    );
    assert_eq!(
        manifest.banner.regenerate_command.as_deref(),
        Some("make schemas")
    );

    let reference = manifest.reference_docs.unwrap();
    assert_eq!(reference.generator, "sphinx-build");
    assert_eq!(reference.title, "Python API Reference");
    assert_eq!(reference.build_dir, None);
    assert_eq!(reference.links["Schema reference"], "../../schemas/");
}

#[test]
fn Manifest___from_str___applies_defaults() {
    let manifest = minimal();

    assert_eq!(manifest.source.base_class, "BaseModel");
    assert!(!manifest.php.readonly_frozen);
    assert!(manifest.docs.main_records.is_empty());
    assert!(manifest.docs.inline_subtypes.is_empty());
    assert!(manifest.reference_docs.is_none());
    assert_eq!(manifest.base_dir(), Path::new("."));
}

#[test]
fn Manifest___from_str___missing_section___returns_error() {
    let toml = r#"
[source]
path = "schemas.py"
module = "app.schemas"
"#;

    let result = Manifest::from_str(toml);

    assert!(result.is_err());
}

#[test]
fn Manifest___from_str___invalid_toml___returns_error() {
    let result = Manifest::from_str("[source\npath = ");

    assert!(result.is_err());
}

// Path resolution tests

#[test]
fn Manifest___resolve___relative_paths_join_base_dir() {
    let manifest = minimal().with_base_dir("/project");

    assert_eq!(manifest.source_path(), PathBuf::from("/project/schemas.py"));
    assert_eq!(manifest.php_output_dir(), PathBuf::from("/project/php"));
    assert_eq!(manifest.docs_output_dir(), PathBuf::from("/project/docs"));
}

#[test]
fn Manifest___resolve___absolute_paths_unchanged() {
    let manifest = minimal().with_base_dir("/project");

    assert_eq!(
        manifest.resolve(Path::new("/elsewhere/out")),
        PathBuf::from("/elsewhere/out")
    );
}

#[test]
fn Manifest___from_file___base_dir_is_manifest_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schemabridge.toml");
    std::fs::write(&path, MINIMAL).unwrap();

    let manifest = Manifest::from_file(&path).unwrap();

    assert_eq!(manifest.base_dir(), dir.path());
    assert_eq!(manifest.source_path(), dir.path().join("schemas.py"));
}

#[test]
fn Manifest___from_file___missing_file___returns_error() {
    let result = Manifest::from_file("/nonexistent/schemabridge.toml");

    let error = result.unwrap_err();
    assert!(error.to_string().contains("Failed to read manifest"));
}

// Derived options tests

#[test]
fn Manifest___layout___preserves_order() {
    let manifest = Manifest::from_str(FULL).unwrap();

    let layout = manifest.layout();

    assert_eq!(layout.sidebar_position("CommentScore"), Some(1));
    assert_eq!(layout.sidebar_position("SpamDetectionResult"), Some(2));
    assert!(layout.is_inline_subtype_of("ObjectionablePhrase", "CommentScore"));
}

#[test]
fn Manifest___banner___explicit_values_win() {
    let manifest = Manifest::from_str(FULL).unwrap();

    let banner = manifest.banner();

    assert_eq!(banner.source_label, "respectify/schemas.py (main)");
    assert_eq!(banner.regenerate_command, "make schemas");
}

#[test]
fn Manifest___banner___defaults_to_source_path() {
    let banner = minimal().banner();

    assert_eq!(banner.source_label, "schemas.py");
    assert_eq!(banner.regenerate_command, "schemabridge generate");
}

#[test]
fn Manifest___options___carry_namespace_module_and_base_class() {
    let manifest = Manifest::from_str(FULL).unwrap();

    assert_eq!(manifest.php_options().namespace, "Respectify\\Schemas");
    assert!(manifest.php_options().readonly_frozen);
    assert_eq!(manifest.docs_options().module, "respectify.schemas");
    assert_eq!(manifest.docs_options().namespace, "Respectify\\Schemas");
    assert_eq!(manifest.extract_options().base_class, "Schema");
}

// Manifest validation tests

#[test]
fn Manifest___validate___accepts_valid_manifest() {
    assert!(Manifest::from_str(FULL).unwrap().validate().is_ok());
    assert!(minimal().validate().is_ok());
}

#[test]
fn Manifest___validate___empty_module___fails() {
    let mut manifest = minimal();
    manifest.source.module = "  ".to_string();

    let error = manifest.validate().unwrap_err();

    assert!(error.to_string().contains("Source module"));
}

#[test]
fn Manifest___validate___empty_namespace___fails() {
    let mut manifest = minimal();
    manifest.php.namespace = String::new();

    let error = manifest.validate().unwrap_err();

    assert!(error.to_string().contains("namespace"));
}

#[test]
fn Manifest___validate___namespace_with_trailing_backslash___fails() {
    let mut manifest = minimal();
    manifest.php.namespace = "App\\Schemas\\".to_string();

    assert!(manifest.validate().is_err());
}

#[test]
fn Manifest___validate___empty_paths___fail() {
    let mut manifest = minimal();
    manifest.source.path = PathBuf::new();
    assert!(manifest.validate().is_err());

    let mut manifest = minimal();
    manifest.php.output_dir = PathBuf::new();
    assert!(manifest.validate().is_err());

    let mut manifest = minimal();
    manifest.docs.output_dir = PathBuf::new();
    assert!(manifest.validate().is_err());
}

#[test]
fn Manifest___validate___duplicate_main_record___fails() {
    let mut manifest = minimal();
    manifest.docs.main_records = vec!["A".to_string(), "A".to_string()];

    let error = manifest.validate().unwrap_err();

    assert!(format!("{error:#}").contains("A is listed more than once"));
}

#[test]
fn Manifest___validate___subtype_under_two_parents___fails() {
    let mut manifest = minimal();
    manifest.docs.main_records = vec!["A".to_string(), "B".to_string()];
    manifest
        .docs
        .inline_subtypes
        .insert("A".to_string(), vec!["Shared".to_string()]);
    manifest
        .docs
        .inline_subtypes
        .insert("B".to_string(), vec!["Shared".to_string()]);

    assert!(manifest.validate().is_err());
}

#[test]
fn Manifest___validate___parent_not_main___fails() {
    let mut manifest = minimal();
    manifest
        .docs
        .inline_subtypes
        .insert("Orphan".to_string(), vec!["Child".to_string()]);

    let error = manifest.validate().unwrap_err();

    assert!(format!("{error:#}").contains("Orphan is not a main record"));
}

#[test]
fn Manifest___validate___subtype_is_main___fails() {
    let mut manifest = minimal();
    manifest.docs.main_records = vec!["A".to_string(), "B".to_string()];
    manifest
        .docs
        .inline_subtypes
        .insert("A".to_string(), vec!["B".to_string()]);

    assert!(manifest.validate().is_err());
}

#[test]
fn Manifest___validate___empty_reference_generator___fails() {
    let mut manifest = Manifest::from_str(FULL).unwrap();
    if let Some(reference) = manifest.reference_docs.as_mut() {
        reference.generator = String::new();
    }

    assert!(manifest.validate().is_err());
}

// manifest_path tests

#[test]
fn manifest_path___none___uses_default_file() {
    assert_eq!(manifest_path(None), PathBuf::from("schemabridge.toml"));
    assert_eq!(
        manifest_path(Some(PathBuf::from("custom.toml"))),
        PathBuf::from("custom.toml")
    );
}
