//! Docs-build command: build the Python reference docs and publish them
//!
//! Runs the configured HTML generator (Sphinx by default) over the reference
//! sources, replaces `<dest_dir>/html` with the fresh output and writes a
//! landing `index.md` linking into it.

use crate::manifest::{self, Manifest, ReferenceDocsSection};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Directories a docs build reads and writes, resolved against the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsBuildPaths {
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    pub dest_dir: PathBuf,
}

impl DocsBuildPaths {
    pub fn new(manifest: &Manifest, reference: &ReferenceDocsSection) -> Self {
        let source_dir = manifest.resolve(&reference.source_dir);
        let build_dir = match &reference.build_dir {
            Some(build_dir) => manifest.resolve(build_dir),
            None => source_dir.join("_build"),
        };
        Self {
            source_dir,
            build_dir,
            dest_dir: manifest.resolve(&reference.dest_dir),
        }
    }

    /// Where the generator writes HTML
    pub fn html_output(&self) -> PathBuf {
        self.build_dir.join("html")
    }

    /// Where the HTML is published
    pub fn published_html(&self) -> PathBuf {
        self.dest_dir.join("html")
    }
}

/// Docs-build command implementation
pub fn run(manifest_path: Option<PathBuf>) -> Result<()> {
    let path = manifest::manifest_path(manifest_path);
    let manifest = manifest::load(&path)?;

    let Some(reference) = &manifest.reference_docs else {
        anyhow::bail!("Manifest {:?} has no [reference_docs] section", path);
    };
    let paths = DocsBuildPaths::new(&manifest, reference);

    if !paths.source_dir.is_dir() {
        anyhow::bail!(
            "Reference docs source directory does not exist: {:?}",
            paths.source_dir
        );
    }

    println!("Building reference docs from {}", paths.source_dir.display());
    remove_dir_if_exists(&paths.build_dir)?;
    run_generator(&reference.generator, &paths, manifest.base_dir())?;

    let html = paths.html_output();
    if !html.is_dir() {
        anyhow::bail!("Generator output directory does not exist: {:?}", html);
    }

    remove_dir_if_exists(&paths.dest_dir)?;
    let copied = copy_dir(&html, &paths.published_html())?;
    info!(files = copied, dest = ?paths.dest_dir, "published reference docs");

    let index = paths.dest_dir.join("index.md");
    fs::write(&index, landing_page(reference))
        .with_context(|| format!("Failed to write {:?}", index))?;

    println!("✓ HTML: {} files → {}", copied, paths.published_html().display());
    println!("✓ Landing page: {}", index.display());

    Ok(())
}

fn run_generator(generator: &str, paths: &DocsBuildPaths, working_dir: &Path) -> Result<()> {
    debug!(generator, source = ?paths.source_dir, "running reference docs generator");

    let status = Command::new(generator)
        .args(["-b", "html", "-E"])
        .arg(&paths.source_dir)
        .arg(paths.html_output())
        .current_dir(working_dir)
        .status()
        .with_context(|| format!("Failed to execute {} (is it installed?)", generator))?;

    if !status.success() {
        anyhow::bail!("{} failed with exit code: {:?}", generator, status.code());
    }

    Ok(())
}

fn remove_dir_if_exists(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).with_context(|| format!("Failed to remove {:?}", dir))?;
    }
    Ok(())
}

/// Recursively copy `src` into `dst`, returning the number of files copied
pub fn copy_dir(src: &Path, dst: &Path) -> Result<usize> {
    fs::create_dir_all(dst).with_context(|| format!("Failed to create directory: {:?}", dst))?;

    let mut copied = 0;
    for entry in fs::read_dir(src).with_context(|| format!("Failed to read {:?}", src))? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {:?}", entry.path()))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Landing page placed next to the published HTML
pub fn landing_page(reference: &ReferenceDocsSection) -> String {
    let mut md = String::new();

    md.push_str("---\n");
    md.push_str("sidebar_position: 1\n");
    md.push_str("---\n\n");
    md.push_str(&format!("# {}\n\n", reference.title));
    md.push_str("The complete API reference is generated from the Python docstrings.\n\n");
    md.push_str("- [Full API Documentation](./html/index.html)\n");
    for (label, href) in &reference.links {
        md.push_str(&format!("- [{label}]({href})\n"));
    }

    md
}
