#![allow(non_snake_case)]

use super::*;

const SCHEMAS: &str = r#"
from typing import List, Optional
from pydantic import BaseModel, Field


class Point(BaseModel):
    """a coordinate"""

    x: int
    y: int


class Box(BaseModel):
    corner: Optional[Point] = None


class Group(BaseModel):
    points: List[Point] = Field(default_factory=list)
    ghosts: List[Ghost] = Field(default_factory=list)
"#;

fn manifest(main_records: &[&str]) -> Manifest {
    let records = main_records
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let toml = format!(
        r#"
[source]
path = "schemas.py"
module = "app.schemas"

[php]
output_dir = "php"
namespace = "App\\Schemas"

[docs]
output_dir = "docs"
main_records = [{records}]
"#
    );
    Manifest::from_str(&toml).unwrap().with_base_dir("/out")
}

fn registry() -> SchemaRegistry {
    extract_source(SCHEMAS, &ExtractOptions::default()).unwrap()
}

// plan tests

#[test]
fn plan___one_php_class_per_record_in_declaration_order() {
    let plan = plan(&manifest(&[]), &registry());

    let paths: Vec<PathBuf> = plan.artifacts.iter().map(|a| a.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            PathBuf::from("/out/php/Point.php"),
            PathBuf::from("/out/php/Box.php"),
            PathBuf::from("/out/php/Group.php"),
        ]
    );
    assert_eq!(plan.count(ArtifactKind::PhpClass), 3);
    assert_eq!(plan.count(ArtifactKind::DocPage), 0);
}

#[test]
fn plan___doc_pages_only_for_main_records() {
    let plan = plan(&manifest(&["Group", "Box"]), &registry());

    let pages: Vec<&Path> = plan
        .artifacts
        .iter()
        .filter(|a| a.kind == ArtifactKind::DocPage)
        .map(|a| a.path.as_path())
        .collect();
    assert_eq!(
        pages,
        vec![Path::new("/out/docs/Group.md"), Path::new("/out/docs/Box.md")]
    );
}

#[test]
fn plan___missing_main_record___reported_not_rendered() {
    let plan = plan(&manifest(&["Point", "Missing"]), &registry());

    assert_eq!(plan.missing_main_records, vec!["Missing"]);
    assert_eq!(plan.count(ArtifactKind::DocPage), 1);
}

#[test]
fn plan___unresolved_references___deduplicated_across_artifacts() {
    let plan = plan(&manifest(&["Group"]), &registry());

    assert_eq!(
        plan.unresolved,
        vec![UnresolvedReference::new("Group", "ghosts", "Ghost")]
    );
    assert_eq!(plan.warning_count(), 1);
}

#[test]
fn plan___clean_source___no_warnings() {
    let registry = extract_source(
        "class Point(BaseModel):\n    x: int\n",
        &ExtractOptions::default(),
    )
    .unwrap();

    let plan = plan(&manifest(&["Point"]), &registry);

    assert_eq!(plan.warning_count(), 0);
}

#[test]
fn plan___rerun___byte_identical() {
    let first = plan(&manifest(&["Point", "Group"]), &registry());
    let second = plan(&manifest(&["Point", "Group"]), &registry());

    assert_eq!(first.artifacts, second.artifacts);
}

// write_artifacts tests

#[test]
fn write_artifacts___creates_directories_and_files() {
    let dir = tempfile::tempdir().unwrap();
    let artifacts = vec![Artifact {
        kind: ArtifactKind::PhpClass,
        path: dir.path().join("nested/php/Point.php"),
        contents: "<?php\n".to_string(),
    }];

    write_artifacts(&artifacts).unwrap();

    let written = fs::read_to_string(dir.path().join("nested/php/Point.php")).unwrap();
    assert_eq!(written, "<?php\n");
}

#[test]
fn write_artifacts___overwrites_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Point.php");
    fs::write(&path, "stale").unwrap();

    write_artifacts(&[Artifact {
        kind: ArtifactKind::PhpClass,
        path: path.clone(),
        contents: "fresh".to_string(),
    }])
    .unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "fresh");
}

// load_registry tests

#[test]
fn load_registry___reads_source_relative_to_manifest() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("schemas.py"), SCHEMAS).unwrap();
    let manifest = manifest(&[]).with_base_dir(dir.path());

    let registry = load_registry(&manifest).unwrap();

    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Point", "Box", "Group"]);
}

#[test]
fn load_registry___missing_source___returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = manifest(&[]).with_base_dir(dir.path());

    let error = load_registry(&manifest).unwrap_err();

    assert!(error.to_string().contains("Failed to read schema source"));
}

#[test]
fn load_registry___syntax_error___returns_error_with_context() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("schemas.py"), "class Broken(BaseModel:\n").unwrap();
    let manifest = manifest(&[]).with_base_dir(dir.path());

    let error = load_registry(&manifest).unwrap_err();

    assert!(error.to_string().contains("Failed to extract records"));
}
