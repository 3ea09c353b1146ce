//! Manifest parsing and validation

use crate::codegen::{Banner, DocsOptions, PhpOptions};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use schemabridge_core::DocsLayout;
use schemabridge_python::{DEFAULT_BASE_CLASS, ExtractOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Manifest file looked up when `-m` is not given
pub const DEFAULT_MANIFEST: &str = "schemabridge.toml";

/// schemabridge.toml manifest structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub source: SourceSection,
    pub php: PhpSection,
    pub docs: DocsSection,

    #[serde(default)]
    pub banner: BannerSection,

    #[serde(default)]
    pub reference_docs: Option<ReferenceDocsSection>,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    /// Python file declaring the records
    pub path: PathBuf,

    /// Import path shown in documentation, e.g. `respectify.schemas`
    pub module: String,

    #[serde(default = "default_base_class")]
    pub base_class: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhpSection {
    pub output_dir: PathBuf,
    pub namespace: String,

    #[serde(default)]
    pub readonly_frozen: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsSection {
    pub output_dir: PathBuf,

    /// Records with their own page, in sidebar order
    #[serde(default)]
    pub main_records: Vec<String>,

    /// Parent record to the records documented on its page
    #[serde(default)]
    pub inline_subtypes: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BannerSection {
    /// Defaults to `source.path` as written
    #[serde(default)]
    pub source_label: Option<String>,

    #[serde(default)]
    pub regenerate_command: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceDocsSection {
    #[serde(default = "default_generator")]
    pub generator: String,

    pub source_dir: PathBuf,

    /// Defaults to `<source_dir>/_build`
    #[serde(default)]
    pub build_dir: Option<PathBuf>,

    pub dest_dir: PathBuf,

    #[serde(default = "default_title")]
    pub title: String,

    /// Extra landing-page links, label to href
    #[serde(default)]
    pub links: IndexMap<String, String>,
}

fn default_base_class() -> String {
    DEFAULT_BASE_CLASS.to_string()
}

fn default_generator() -> String {
    "sphinx-build".to_string()
}

fn default_title() -> String {
    "Python API Reference".to_string()
}

impl Manifest {
    /// Load manifest from a file; relative paths resolve against its directory
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {:?}", path))?;

        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(Self::from_str(&content)?.with_base_dir(base_dir))
    }

    /// Parse manifest from string; relative paths resolve against `.`
    pub fn from_str(content: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(content).context("Failed to parse manifest")?;
        Ok(manifest.with_base_dir("."))
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a manifest path against the manifest's directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn source_path(&self) -> PathBuf {
        self.resolve(&self.source.path)
    }

    pub fn php_output_dir(&self) -> PathBuf {
        self.resolve(&self.php.output_dir)
    }

    pub fn docs_output_dir(&self) -> PathBuf {
        self.resolve(&self.docs.output_dir)
    }

    pub fn layout(&self) -> DocsLayout {
        let layout = self
            .docs
            .main_records
            .iter()
            .fold(DocsLayout::new(), |layout, name| layout.with_main_record(name));

        self.docs
            .inline_subtypes
            .iter()
            .fold(layout, |layout, (parent, subtypes)| {
                layout.with_inline_subtypes(parent, subtypes)
            })
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions::default().with_base_class(&self.source.base_class)
    }

    pub fn php_options(&self) -> PhpOptions {
        PhpOptions {
            namespace: self.php.namespace.clone(),
            banner: self.banner(),
            readonly_frozen: self.php.readonly_frozen,
        }
    }

    pub fn docs_options(&self) -> DocsOptions {
        DocsOptions {
            module: self.source.module.clone(),
            namespace: self.php.namespace.clone(),
        }
    }

    pub fn banner(&self) -> Banner {
        let defaults = Banner::default();
        Banner {
            source_label: self
                .banner
                .source_label
                .clone()
                .unwrap_or_else(|| self.source.path.display().to_string()),
            regenerate_command: self
                .banner
                .regenerate_command
                .clone()
                .unwrap_or(defaults.regenerate_command),
        }
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        if self.source.path.as_os_str().is_empty() {
            anyhow::bail!("Source path cannot be empty");
        }

        if self.source.module.trim().is_empty() {
            anyhow::bail!("Source module cannot be empty");
        }

        if self.source.base_class.trim().is_empty() {
            anyhow::bail!("Base class cannot be empty");
        }

        if self.php.output_dir.as_os_str().is_empty() {
            anyhow::bail!("PHP output directory cannot be empty");
        }

        let namespace = self.php.namespace.trim();
        if namespace.is_empty() {
            anyhow::bail!("PHP namespace cannot be empty");
        }
        if namespace.starts_with('\\') || namespace.ends_with('\\') {
            anyhow::bail!(
                "PHP namespace should not start or end with a backslash: {}",
                namespace
            );
        }

        if self.docs.output_dir.as_os_str().is_empty() {
            anyhow::bail!("Docs output directory cannot be empty");
        }

        self.layout().validate().context("Invalid docs layout")?;

        if let Some(reference) = &self.reference_docs {
            if reference.generator.trim().is_empty() {
                anyhow::bail!("Reference docs generator cannot be empty");
            }
            if reference.source_dir.as_os_str().is_empty() {
                anyhow::bail!("Reference docs source directory cannot be empty");
            }
            if reference.dest_dir.as_os_str().is_empty() {
                anyhow::bail!("Reference docs destination directory cannot be empty");
            }
        }

        Ok(())
    }
}

/// Resolve the manifest path given on the command line
pub fn manifest_path(path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST))
}

/// Load and validate a manifest
pub fn load(path: &Path) -> Result<Manifest> {
    let manifest = Manifest::from_file(path)?;
    manifest
        .validate()
        .with_context(|| format!("Invalid manifest: {:?}", path))?;
    Ok(manifest)
}

/// Check command implementation
pub fn check(manifest_path: Option<PathBuf>) -> Result<()> {
    let path = self::manifest_path(manifest_path);

    println!("Checking manifest: {}", path.display());

    let manifest = load(&path)?;
    let registry = crate::generate::load_registry(&manifest)?;
    let layout = manifest.layout();

    println!(
        "✓ Source: {} ({})",
        manifest.source.path.display(),
        manifest.source.module
    );
    println!("✓ Records: {}", registry.len());
    println!("✓ Main records: {}", layout.main_records.len());
    println!(
        "✓ Inline subtypes: {}",
        layout.inline_subtypes.values().map(Vec::len).sum::<usize>()
    );

    let warnings = crate::generate::plan(&manifest, &registry).warning_count();
    if warnings > 0 {
        println!("\nManifest is valid, with {} warning(s).", warnings);
    } else {
        println!("\nManifest is valid!");
    }

    Ok(())
}

#[cfg(test)]
#[path = "manifest/manifest_tests.rs"]
mod manifest_tests;
