//! Cross-reference resolution between documentation pages.

use schemabridge_core::{DocsLayout, SchemaRegistry};
use std::fmt;

/// Where a record's documentation lives, relative to the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Heading on the current page
    Anchor(String),

    /// Another record's page
    Page(String),

    /// Heading on another record's page
    PageAnchor { page: String, anchor: String },
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkTarget::Anchor(anchor) => write!(f, "#{anchor}"),
            LinkTarget::Page(page) => write!(f, "./{page}"),
            LinkTarget::PageAnchor { page, anchor } => write!(f, "./{page}#{anchor}"),
        }
    }
}

/// Heading anchor generated for a record name.
pub fn anchor(name: &str) -> String {
    name.to_lowercase()
}

/// Resolves record names to links using the editorial page layout.
#[derive(Debug, Clone, Copy)]
pub struct LinkResolver<'a> {
    registry: &'a SchemaRegistry,
    layout: &'a DocsLayout,
}

impl<'a> LinkResolver<'a> {
    pub fn new(registry: &'a SchemaRegistry, layout: &'a DocsLayout) -> Self {
        Self { registry, layout }
    }

    /// Link for `type_name` when rendering the page of `current`.
    ///
    /// Unknown names and records documented nowhere get no link.
    pub fn resolve(&self, type_name: &str, current: &str) -> Option<LinkTarget> {
        if !self.registry.contains(type_name) {
            return None;
        }
        if type_name == current || self.layout.is_inline_subtype_of(type_name, current) {
            return Some(LinkTarget::Anchor(anchor(type_name)));
        }
        if self.layout.is_main(type_name) {
            return Some(LinkTarget::Page(type_name.to_string()));
        }
        self.layout
            .parent_of(type_name)
            .map(|parent| LinkTarget::PageAnchor {
                page: parent.to_string(),
                anchor: anchor(type_name),
            })
    }
}

#[cfg(test)]
#[path = "links/links_tests.rs"]
mod links_tests;
