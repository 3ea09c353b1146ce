//! Generate command: extract records and write PHP classes and doc pages

use crate::codegen::{generate_doc_page, generate_php_class};
use crate::manifest::{self, Manifest};
use anyhow::{Context, Result};
use schemabridge_core::{SchemaRegistry, UnresolvedReference};
use schemabridge_logging::WarningCollector;
use schemabridge_python::{ExtractOptions, extract_source};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Flags for the generate command
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Render and report, but write nothing
    pub dry_run: bool,

    /// Fail before writing when any warning was produced
    pub deny_warnings: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    PhpClass,
    DocPage,
}

/// One rendered output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub contents: String,
}

/// Everything a run would write, rendered in memory
#[derive(Debug, Clone, Default)]
pub struct GenerationPlan {
    pub artifacts: Vec<Artifact>,

    /// Deduplicated and sorted
    pub unresolved: Vec<UnresolvedReference>,

    /// Main records named by the layout but absent from the source
    pub missing_main_records: Vec<String>,
}

impl GenerationPlan {
    pub fn warning_count(&self) -> usize {
        self.unresolved.len() + self.missing_main_records.len()
    }

    pub fn count(&self, kind: ArtifactKind) -> usize {
        self.artifacts.iter().filter(|a| a.kind == kind).count()
    }
}

/// Read the manifest's source file and extract its records
pub fn load_registry(manifest: &Manifest) -> Result<SchemaRegistry> {
    extract_file(&manifest.source_path(), &manifest.extract_options())
}

fn extract_file(path: &Path, options: &ExtractOptions) -> Result<SchemaRegistry> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema source: {:?}", path))?;

    extract_source(&source, options)
        .with_context(|| format!("Failed to extract records from {:?}", path))
}

/// Render every artifact without touching the filesystem
pub fn plan(manifest: &Manifest, registry: &SchemaRegistry) -> GenerationPlan {
    let php_dir = manifest.php_output_dir();
    let docs_dir = manifest.docs_output_dir();
    let php_options = manifest.php_options();
    let docs_options = manifest.docs_options();
    let layout = manifest.layout();

    let mut artifacts = Vec::new();
    let mut unresolved = BTreeSet::new();

    for schema in registry.iter() {
        let rendered = generate_php_class(schema, registry, &php_options);
        debug!(record = %schema.name, "rendered PHP class");
        unresolved.extend(rendered.warnings);
        artifacts.push(Artifact {
            kind: ArtifactKind::PhpClass,
            path: php_dir.join(format!("{}.php", schema.name)),
            contents: rendered.source,
        });
    }

    let mut missing_main_records = Vec::new();
    for name in &layout.main_records {
        let Some(schema) = registry.get(name) else {
            missing_main_records.push(name.clone());
            continue;
        };

        let rendered = generate_doc_page(schema, registry, &layout, &docs_options);
        debug!(record = %schema.name, "rendered documentation page");
        unresolved.extend(rendered.warnings);
        artifacts.push(Artifact {
            kind: ArtifactKind::DocPage,
            path: docs_dir.join(format!("{}.md", schema.name)),
            contents: rendered.source,
        });
    }

    GenerationPlan {
        artifacts,
        unresolved: unresolved.into_iter().collect(),
        missing_main_records,
    }
}

/// Write every artifact, creating output directories as needed
pub fn write_artifacts(artifacts: &[Artifact]) -> Result<()> {
    for artifact in artifacts {
        if let Some(parent) = artifact.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        fs::write(&artifact.path, &artifact.contents)
            .with_context(|| format!("Failed to write {:?}", artifact.path))?;
    }
    Ok(())
}

/// Log each warning in a plan
pub fn report_warnings(plan: &GenerationPlan) {
    for reference in &plan.unresolved {
        warn!("{reference}");
    }
    for name in &plan.missing_main_records {
        warn!("main record {name} is not declared in the source; no page generated");
    }
}

/// Generate command implementation
pub fn run(manifest_path: Option<PathBuf>, options: GenerateOptions) -> Result<()> {
    let path = manifest::manifest_path(manifest_path);

    println!("Loading manifest: {}", path.display());

    let manifest = manifest::load(&path)?;
    let registry = load_registry(&manifest)?;
    info!(records = registry.len(), source = ?manifest.source_path(), "extracted records");

    let plan = plan(&manifest, &registry);
    report_warnings(&plan);

    if options.deny_warnings && plan.warning_count() > 0 {
        anyhow::bail!(
            "{} warning(s) with --deny-warnings; nothing was written",
            plan.warning_count()
        );
    }

    let php_count = plan.count(ArtifactKind::PhpClass);
    let docs_count = plan.count(ArtifactKind::DocPage);

    if options.dry_run {
        for artifact in &plan.artifacts {
            println!("  would write {}", artifact.path.display());
        }
        println!(
            "\nDry run: {} PHP classes and {} documentation pages not written.",
            php_count, docs_count
        );
        return Ok(());
    }

    write_artifacts(&plan.artifacts)?;
    info!(files = plan.artifacts.len(), "wrote artifacts");

    println!(
        "✓ PHP classes: {} → {}",
        php_count,
        manifest.php_output_dir().display()
    );
    println!(
        "✓ Documentation pages: {} → {}",
        docs_count,
        manifest.docs_output_dir().display()
    );

    let warnings = WarningCollector::global().count();
    if warnings > 0 {
        println!("\nGenerated with {} warning(s).", warnings);
    } else {
        println!("\nGeneration complete!");
    }

    Ok(())
}

/// Inspect command implementation: print the extracted registry as JSON
pub fn inspect(
    manifest_path: Option<PathBuf>,
    source: Option<PathBuf>,
    base_class: Option<String>,
) -> Result<()> {
    let registry = match source {
        Some(source) => {
            let mut options = ExtractOptions::default();
            if let Some(base_class) = base_class {
                options = options.with_base_class(base_class);
            }
            extract_file(&source, &options)?
        }
        None => {
            let path = manifest::manifest_path(manifest_path);
            let mut manifest = manifest::load(&path)?;
            if let Some(base_class) = base_class {
                manifest.source.base_class = base_class;
            }
            load_registry(&manifest)?
        }
    };

    let json = serde_json::to_string_pretty(&registry).context("Failed to serialize records")?;
    println!("{json}");

    Ok(())
}

#[cfg(test)]
#[path = "generate/generate_tests.rs"]
mod generate_tests;
